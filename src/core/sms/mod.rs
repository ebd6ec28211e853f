//! SMS gateway client: wire protocol grammar and notification sessions.

pub mod protocol;
mod session;

pub use session::{dispatch_alert, SessionReport};
