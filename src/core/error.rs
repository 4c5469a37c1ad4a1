//! Error types and handling for the resource server.
//!
//! This module defines the error type returned by server startup: invalid
//! configuration or a transport that fails to come up.

use thiserror::Error;

/// A specialized Result type for resource server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the resource server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the HTTP transport.
    #[cfg(feature = "http")]
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
