//! Transport error types.

use thiserror::Error;

/// Errors that can occur in transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an error after binding.
    #[error("Server on {address} failed: {source}")]
    ServeError {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Create a serve error.
    pub fn serve(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::ServeError {
            address: address.into(),
            source,
        }
    }
}
