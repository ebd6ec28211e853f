// Core business logic module

pub mod config;
pub mod monitor;
pub mod sms;

// Re-export commonly used items
pub use config::Config;
pub use monitor::{AlertEvent, DeviceReading, MonitorRuntime, MonitorState, UpsDevice};
