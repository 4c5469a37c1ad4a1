//! Transport layer for the resource server.
//!
//! - **HTTP**: static resources over GET - feature: `http`
//!
//! The transport owns only the connection lifecycle; every lookup is
//! delegated to the shared [`ResourceRegistry`](crate::domains::resources::ResourceRegistry).

mod config;
mod error;

pub mod http;

pub use config::HttpConfig;
pub use error::TransportError;
pub use http::HttpTransport;
