//! Filesystem-backed resource provider.
//!
//! Resources are looked up relative to a base directory. When a development
//! root is set, lookups are redirected there instead so that a working copy
//! can be edited live without rebuilding the bundled assets.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ResourceError;
use super::provider::ResourceProvider;
use crate::core::security::resolve_within_root;

/// A resource provider that resolves files under a directory.
///
/// Every lookup is validated by [`resolve_within_root`], so requests such as
/// `../../etc/passwd` or `/etc/passwd` never resolve.
#[derive(Debug, Clone)]
pub struct FilesystemProvider {
    root: PathBuf,
    development_root: Option<PathBuf>,
    allow_symlinks: bool,
}

impl FilesystemProvider {
    /// Creates a provider rooted at `root`.
    ///
    /// The root does not have to exist yet; lookups simply miss until it does.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            development_root: None,
            allow_symlinks: true,
        }
    }

    /// Sets whether symlinked resources may be followed.
    pub fn with_symlinks(mut self, allow: bool) -> Self {
        self.allow_symlinks = allow;
        self
    }

    /// Returns the bundled resource root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the root lookups currently go to.
    pub fn active_root(&self) -> &Path {
        self.development_root.as_deref().unwrap_or(&self.root)
    }
}

impl ResourceProvider for FilesystemProvider {
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let root = self.active_root();
        match resolve_within_root(root, path, self.allow_symlinks) {
            Ok(file) if file.is_file() => Some(file),
            Ok(_) => {
                debug!("{} in {} is not a regular file", path, root.display());
                None
            }
            Err(e) => {
                debug!("{} not resolved in {}: {}", path, root.display(), e);
                None
            }
        }
    }

    fn supports_development_root(&self) -> bool {
        true
    }

    fn set_development_root(&mut self, root: PathBuf) -> Result<(), ResourceError> {
        if !root.is_dir() {
            return Err(ResourceError::invalid_path(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        self.development_root = Some(root);
        Ok(())
    }

    fn development_root(&self) -> Option<&Path> {
        self.development_root.as_deref()
    }

    fn kind(&self) -> &'static str {
        "FilesystemProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"png").unwrap();

        let provider = FilesystemProvider::new(dir.path());
        let file = provider.resolve("a.png").unwrap();

        assert_eq!(fs::read(file).unwrap(), b"png");
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempdir().unwrap();
        let provider = FilesystemProvider::new(dir.path());

        assert!(provider.resolve("missing.png").is_none());
    }

    #[test]
    fn test_directories_do_not_resolve() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("images")).unwrap();

        let provider = FilesystemProvider::new(dir.path());

        assert!(provider.resolve("images").is_none());
    }

    #[test]
    fn test_traversal_does_not_resolve() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("resources");
        fs::create_dir(&root).unwrap();
        fs::write(dir.path().join("secret.txt"), b"nope").unwrap();

        let provider = FilesystemProvider::new(&root);

        assert!(provider.resolve("../secret.txt").is_none());
        assert!(provider.resolve("/etc/passwd").is_none());
    }

    #[test]
    fn test_missing_root_resolves_nothing() {
        let dir = tempdir().unwrap();
        let provider = FilesystemProvider::new(dir.path().join("not-yet"));

        assert!(provider.resolve("a.png").is_none());
    }

    #[test]
    fn test_development_root_redirects_lookups() {
        let bundled = tempdir().unwrap();
        let working = tempdir().unwrap();
        fs::write(bundled.path().join("site.css"), b"bundled").unwrap();
        fs::write(working.path().join("site.css"), b"working").unwrap();
        fs::write(bundled.path().join("only-bundled.css"), b"x").unwrap();

        let mut provider = FilesystemProvider::new(bundled.path());
        provider
            .set_development_root(working.path().to_path_buf())
            .unwrap();

        let file = provider.resolve("site.css").unwrap();
        assert_eq!(fs::read(file).unwrap(), b"working");
        assert!(provider.resolve("only-bundled.css").is_none());
        assert_eq!(provider.development_root(), Some(working.path()));
        assert_eq!(provider.active_root(), working.path());
    }

    #[test]
    fn test_development_root_must_be_directory() {
        let bundled = tempdir().unwrap();
        let mut provider = FilesystemProvider::new(bundled.path());

        let result = provider.set_development_root(bundled.path().join("nope"));

        assert!(matches!(result, Err(ResourceError::InvalidPath(_))));
        assert!(provider.development_root().is_none());
        assert_eq!(provider.active_root(), bundled.path());
    }

    #[test]
    fn test_kind_and_capability() {
        let provider = FilesystemProvider::new("/srv/resources");
        assert_eq!(provider.kind(), "FilesystemProvider");
        assert!(provider.supports_development_root());
        assert_eq!(provider.root(), Path::new("/srv/resources"));
    }
}
