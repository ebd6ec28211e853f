use std::io;
use thiserror::Error;

/// Custom error type for the upswatch daemon
#[derive(Error, Debug)]
pub enum UpswatchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UPS unreachable: {0}")]
    Unreachable(String),

    #[error("Malformed UPS response: {0}")]
    MalformedResponse(String),

    #[error("SMS gateway connection failed: {0}")]
    Connect(String),

    #[error("SMS send failed: {0}")]
    Send(String),

    #[error("SMS gateway receive failed: {0}")]
    Receive(String),
}

/// Result type alias for the upswatch daemon
pub type Result<T> = std::result::Result<T, UpswatchError>;

impl UpswatchError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        UpswatchError::Config(msg.into())
    }

    /// Create an unreachable-device error
    pub fn unreachable<S: Into<String>>(msg: S) -> Self {
        UpswatchError::Unreachable(msg.into())
    }

    /// Create a malformed-response error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        UpswatchError::MalformedResponse(msg.into())
    }

    /// Create a gateway connect error
    pub fn connect<S: Into<String>>(msg: S) -> Self {
        UpswatchError::Connect(msg.into())
    }

    /// Create a send error
    pub fn send<S: Into<String>>(msg: S) -> Self {
        UpswatchError::Send(msg.into())
    }

    /// Create a receive error
    pub fn receive<S: Into<String>>(msg: S) -> Self {
        UpswatchError::Receive(msg.into())
    }
}
