//! Transition engine: pure decision logic over successive UPS readings.

use super::alerts::{AlertEvent, CRITICAL_BATTERY_MINUTES, ON_BATTERY_SOURCE};
use super::device::DeviceReading;

/// Last-observed power source, carried across poll cycles.
///
/// Updated only from successful readings; a failed poll leaves it
/// untouched. Single writer (the poll task), so no locking.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    last_power_source: String,
    initialized: bool,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Power source label from the most recent successful reading,
    /// `None` before the first one.
    pub fn last_power_source(&self) -> Option<&str> {
        self.initialized.then_some(self.last_power_source.as_str())
    }

    /// Evaluate a freshly polled reading against the stored state.
    ///
    /// Returns the alerts to dispatch, in dispatch order:
    /// 1. source change (only once a baseline exists; labels compared
    ///    exactly, case-sensitive)
    /// 2. critical battery (on battery and at most
    ///    [`CRITICAL_BATTERY_MINUTES`] left; an unknown runtime is
    ///    never critical)
    ///
    /// The stored state is updated from the reading unconditionally,
    /// whether or not anything fired.
    pub fn observe(&mut self, reading: &DeviceReading) -> Vec<AlertEvent> {
        let mut alerts = Vec::new();

        if self.initialized && reading.power_source != self.last_power_source {
            alerts.push(AlertEvent::SourceChanged {
                from: self.last_power_source.clone(),
                to: reading.power_source.clone(),
                battery_minutes: reading.battery_minutes,
            });
        }

        if reading.power_source == ON_BATTERY_SOURCE
            && reading
                .battery_minutes
                .is_some_and(|minutes| minutes <= CRITICAL_BATTERY_MINUTES)
        {
            alerts.push(AlertEvent::CriticalBattery {
                battery_minutes: reading.battery_minutes,
            });
        }

        self.last_power_source = reading.power_source.clone();
        self.initialized = true;

        alerts
    }
}
