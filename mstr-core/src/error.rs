//! Global error types for the SDK.
//!
//! All error categories across the SDK are unified into a single
//! `MstrError` enum with conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using MstrError.
pub type MstrResult<T> = Result<T, MstrError>;

/// Unified error type covering all error categories in the SDK.
#[derive(Error, Debug)]
pub enum MstrError {
    // -- Configuration errors --
    /// Invalid configuration or invalid call parameters.
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation required a selected project and none was selected.
    #[error("no project selected: {0}")]
    ProjectNotSelected(String),

    // -- Request errors --
    /// The server rejected the request (4xx).
    #[error("client error (status {status}): {message}")]
    Client {
        /// HTTP status code.
        status: u16,
        /// Combined caller context and server diagnostic.
        message: String,
    },

    /// The server failed to process the request (5xx).
    #[error("server error (status {status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Combined caller context and server diagnostic.
        message: String,
    },

    /// The server returned a status outside the success/4xx/5xx classes.
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Combined caller context and server diagnostic.
        message: String,
    },

    // -- Transport errors --
    /// HTTP transport failure (connection, TLS, protocol).
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    // -- Data errors --
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // -- Generic --
    /// An unexpected internal error (e.g. a failed background task).
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MstrError {
    /// Whether this error was raised before any request was dispatched.
    pub fn is_configuration(&self) -> bool {
        matches!(self, MstrError::Config(_) | MstrError::ProjectNotSelected(_))
    }
}

impl From<serde_json::Error> for MstrError {
    fn from(e: serde_json::Error) -> Self {
        MstrError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for MstrError {
    fn from(e: toml::de::Error) -> Self {
        MstrError::Config(e.to_string())
    }
}
