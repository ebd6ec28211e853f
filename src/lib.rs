// Upswatch Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, UpswatchError};

// Module declarations
pub mod core;

// Re-export commonly used types
pub use core::config::Config;

use std::fs::File;
use std::path::Path;

// Initialize logging; stderr by default, a file sink when configured
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Info);

    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
