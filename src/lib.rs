//! Static Resource Registry
//!
//! This crate maps named resource providers to file lookups, so a web
//! application can locate static resources (images, stylesheets, scripts)
//! either from one specific provider or by scanning all of them in
//! registration order.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, path security and (feature `http`) the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **resources**: Providers, development-mode overrides and the registry
//!
//! # Example
//!
//! ```rust,no_run
//! use resource_registry::domains::resources::{FilesystemProvider, ResourceRegistry};
//! use resource_registry::core::Config;
//!
//! let config = Config::from_env().expect("valid configuration");
//! let mut registry = ResourceRegistry::new(config.development.clone());
//! registry.register("core", FilesystemProvider::new("/srv/core/resources"));
//!
//! let logo = registry.resolve(None, "images/logo.png").unwrap();
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, Result};
pub use crate::domains::resources::{FilesystemProvider, ResourceProvider, ResourceRegistry};
