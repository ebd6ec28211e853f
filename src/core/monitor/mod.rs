//! UPS monitoring core functionality.
//!
//! This module provides the business logic for polling the UPS over
//! SNMP, detecting power-source transitions, and driving the poll loop.

pub mod alerts;
mod device;
mod runtime;
mod transition;

pub use alerts::AlertEvent;
pub use device::{DeviceReading, UpsDevice};
pub use runtime::{process_reading, MonitorRuntime};
pub use transition::MonitorState;
