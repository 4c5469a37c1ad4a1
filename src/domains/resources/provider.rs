//! The `ResourceProvider` capability.
//!
//! A provider owns one resource root (a module's bundled assets, a local
//! working copy, ...) and answers a single question: which file on disk
//! backs a given relative resource path.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use super::error::ResourceError;

/// A capability that resolves relative resource paths to concrete files.
///
/// Providers are registered by name in a
/// [`ResourceRegistry`](super::ResourceRegistry) and shared read-only across
/// request handlers once startup is complete, hence the `Send + Sync` bound.
///
/// # Implementations
///
/// - [`FilesystemProvider`](super::FilesystemProvider): resolves under a directory,
///   with an optional development root
///
/// # Example
///
/// ```ignore
/// let provider = FilesystemProvider::new("/srv/core/resources");
/// if let Some(file) = provider.resolve("images/logo.png") {
///     serve(file);
/// }
/// ```
pub trait ResourceProvider: Send + Sync + Debug {
    /// Resolve a relative resource path to a file location.
    ///
    /// Returns `None` when this provider does not have the resource.
    fn resolve(&self, path: &str) -> Option<PathBuf>;

    /// Whether this provider accepts a development root override.
    fn supports_development_root(&self) -> bool {
        false
    }

    /// Redirect this provider's resource root to a local directory.
    ///
    /// Providers without a development mode leave themselves untouched; the
    /// registry checks [`supports_development_root`](Self::supports_development_root)
    /// before calling this.
    fn set_development_root(&mut self, _root: PathBuf) -> Result<(), ResourceError> {
        Ok(())
    }

    /// The development root currently in effect, if any.
    fn development_root(&self) -> Option<&Path> {
        None
    }

    /// Returns a human-readable name for this kind of provider (for logging).
    fn kind(&self) -> &'static str;
}
