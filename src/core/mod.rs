//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks around the resource
//! registry: error handling, configuration, path security and, with the
//! `http` feature, the transport layer.

pub mod config;
pub mod error;
pub mod security;

#[cfg(feature = "http")]
pub mod transport;

pub use config::{Config, DevelopmentConfig, ProviderConfig};
pub use error::{Error, Result};
pub use security::{PathSecurityError, resolve_within_root};

#[cfg(feature = "http")]
pub use transport::{HttpConfig, HttpTransport};
