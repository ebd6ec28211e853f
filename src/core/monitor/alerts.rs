//! Alert events produced by the transition engine.
//!
//! Each event carries its own SMS body and its own inter-message pacing
//! delay; the two pacing constants are deliberately distinct per alert
//! type to stay below the gateway's throttling limits.

use std::time::Duration;

/// Remaining runtime (minutes) at or below which the battery is critical
pub const CRITICAL_BATTERY_MINUTES: u32 = 7;

/// Power source label the UPS reports while running on battery
pub const ON_BATTERY_SOURCE: &str = "Battery";

/// Pacing between recipient sends for source-change alerts
const SOURCE_CHANGE_PACING: Duration = Duration::from_millis(5000);

/// Pacing between recipient sends for critical-battery alerts
const CRITICAL_BATTERY_PACING: Duration = Duration::from_millis(3000);

/// An alert fired by one poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEvent {
    /// The UPS switched its output power source
    SourceChanged {
        from: String,
        to: String,
        battery_minutes: Option<u32>,
    },
    /// The UPS is on battery with critically low runtime left
    CriticalBattery { battery_minutes: Option<u32> },
}

impl AlertEvent {
    /// SMS body for this alert.
    ///
    /// The `\n` sequences are sent literally; the gateway expands them
    /// on the handset side.
    pub fn message(&self) -> String {
        match self {
            AlertEvent::SourceChanged {
                from,
                to,
                battery_minutes,
            } => format!(
                "UPS changed its power source from {} to {} \\n\\nRemaining battery runtime: {} min \\n\\nMessage generated by upswatch",
                from,
                to,
                minutes_label(*battery_minutes)
            ),
            AlertEvent::CriticalBattery { battery_minutes } => format!(
                "Critically low UPS battery!\\n\\nRemaining battery runtime: {} min\\n\\nMessage generated by upswatch",
                minutes_label(*battery_minutes)
            ),
        }
    }

    /// Delay between recipient sends for this alert type.
    pub fn pacing(&self) -> Duration {
        match self {
            AlertEvent::SourceChanged { .. } => SOURCE_CHANGE_PACING,
            AlertEvent::CriticalBattery { .. } => CRITICAL_BATTERY_PACING,
        }
    }
}

fn minutes_label(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) => m.to_string(),
        None => "unknown".to_string(),
    }
}
