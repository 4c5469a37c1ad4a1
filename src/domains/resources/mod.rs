//! Resources domain module.
//!
//! Maps named resource providers to file lookups. A web module asks the
//! registry either for a resource from one named provider, or from whichever
//! registered provider has it first.
//!
//! ## Architecture
//!
//! - `provider.rs` - The `ResourceProvider` capability
//! - `filesystem.rs` - Directory-backed provider with a development root
//! - `development.rs` - Development-mode overrides applied on registration
//! - `registry.rs` - The ordered provider registry

mod development;
mod error;
mod filesystem;
mod provider;
mod registry;

pub use development::{DevelopmentMode, SkipReason};
pub use error::ResourceError;
pub use filesystem::FilesystemProvider;
pub use provider::ResourceProvider;
pub use registry::{ProviderMap, ResourceRegistry};
