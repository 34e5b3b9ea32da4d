//! mstr-core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other SDK crates:
//! - Connection and logging configuration
//! - Global error types covering all error categories
//! - Structured logging with tracing
//! - Common constants (header names, pagination sentinels)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::SdkConfig;
pub use error::{MstrError, MstrResult};
pub use logging::init_logging;
