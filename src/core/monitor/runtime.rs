//! Tokio runtime and poll loop for the query-decide-notify cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use super::device::{DeviceReading, UpsDevice};
use super::transition::MonitorState;
use crate::core::config::Config;
use crate::core::sms::dispatch_alert;
use crate::error::UpswatchError;

/// Wrapper around the tokio runtime driving the poll loop.
pub struct MonitorRuntime {
    /// Shutdown signal sender
    shutdown_tx: broadcast::Sender<()>,

    /// Handle to the runtime (for shutdown)
    _runtime_handle: tokio::runtime::Runtime,
}

impl MonitorRuntime {
    /// Create a new MonitorRuntime with the poll loop already running.
    pub fn new(config: Arc<Config>) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("upswatch-worker")
            .build()?;

        let (shutdown_tx, _) = broadcast::channel::<()>(1);
        runtime.spawn(poll_loop(config, shutdown_tx.subscribe()));

        Ok(Self {
            shutdown_tx,
            _runtime_handle: runtime,
        })
    }

    /// Stop the poll loop. The runtime shuts down when dropped.
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Recurring poll loop. One tick = query, decide, notify.
///
/// Ticks never overlap: a tick that outlasts the interval delays the
/// next one instead of running concurrently with it.
pub async fn poll_loop(config: Arc<Config>, mut shutdown: broadcast::Receiver<()>) {
    let mut ticker = interval(Duration::from_secs(config.poll_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let device = UpsDevice::new(config.ups_addr(), config.snmp_community.clone());
    let mut state = MonitorState::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_cycle(&config, &device, &mut state).await;
            }
            _ = shutdown.recv() => break,
        }
    }
}

/// One poll cycle. Every failure ends up in the log; nothing escapes
/// to kill the loop.
async fn run_cycle(config: &Config, device: &UpsDevice, state: &mut MonitorState) {
    let reading = match device.query().await {
        Ok(reading) => reading,
        Err(UpswatchError::Unreachable(e)) => {
            log::warn!("Can't connect to the UPS: {}", e);
            return;
        }
        Err(e) => {
            log::warn!("Can't retrieve information from the UPS: {}", e);
            return;
        }
    };

    process_reading(&config.gateway_addr(), &config.recipients(), state, &reading).await;
}

/// Decide and notify for one successful reading.
///
/// Transition bookkeeping commits before any session runs; a gateway
/// failure afterwards cannot roll it back.
pub async fn process_reading(
    gateway_addr: &str,
    recipients: &[String],
    state: &mut MonitorState,
    reading: &DeviceReading,
) {
    let alerts = state.observe(reading);

    for alert in alerts {
        log::info!("Dispatching alert: {:?}", alert);
        match dispatch_alert(gateway_addr, recipients, &alert).await {
            Ok(report) if report.sends_failed > 0 => log::warn!(
                "Alert dispatched, {} of {} sends failed",
                report.sends_failed,
                report.sends_attempted
            ),
            Ok(report) => log::info!("Alert dispatched to {} recipients", report.sends_attempted),
            Err(e) => log::error!("Alert dispatch failed: {}", e),
        }
    }
}
