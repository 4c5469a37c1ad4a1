use std::io;
use std::path::{Component, Path, PathBuf};

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Absolute resource path '{path}' is not allowed")]
    AbsolutePath { path: PathBuf },

    #[error("Resource path '{path}' contains a parent directory component")]
    ParentTraversal { path: PathBuf },

    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Symlink '{path}' points outside allowed root directory")]
    SymlinkOutsideRoot { path: PathBuf },

    #[error("Symlink '{path}' is not allowed")]
    SymlinkNotAllowed { path: PathBuf },

    #[error("Cannot canonicalize path '{path}': {error}")]
    CannotCanonicalize { path: PathBuf, error: io::Error },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Resolves a relative resource path against a root directory.
///
/// This function performs the following checks:
/// 1. Rejects absolute paths and any `..` component before touching the disk
/// 2. Requires the joined path to exist
/// 3. With `allow_symlinks` off, rejects a symlink anywhere below `root`
/// 4. Canonicalizes the result and ensures it stays within the canonical root
///
/// # Arguments
///
/// * `root` - The provider's resource root
/// * `relative` - The requested resource path, e.g. `images/logo.png`
/// * `allow_symlinks` - Whether a symlinked resource may be followed
///
/// # Returns
///
/// * `Ok(PathBuf)` - The canonicalized, validated path
/// * `Err(PathSecurityError)` - If validation fails
///
/// # Examples
///
/// ```rust,ignore
/// let file = resolve_within_root(Path::new("/srv/core/resources"), "css/site.css", true)?;
/// ```
pub fn resolve_within_root(
    root: &Path,
    relative: &str,
    allow_symlinks: bool,
) -> Result<PathBuf, PathSecurityError> {
    let requested = Path::new(relative);

    for component in requested.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(PathSecurityError::AbsolutePath {
                    path: requested.to_path_buf(),
                });
            }
            Component::ParentDir => {
                return Err(PathSecurityError::ParentTraversal {
                    path: requested.to_path_buf(),
                });
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    let canonical_root = root.canonicalize().map_err(|e| PathSecurityError::IoError {
        path: root.to_path_buf(),
        error: e,
    })?;

    let candidate = root.join(requested);

    // `exists` follows symlinks, so a dangling link counts as missing
    if !candidate.exists() {
        return Err(PathSecurityError::PathNotFound { path: candidate });
    }

    if !allow_symlinks {
        reject_symlinks(root, requested)?;
    }
    let is_symlink = candidate.is_symlink();

    let canonical_path =
        candidate
            .canonicalize()
            .map_err(|e| PathSecurityError::CannotCanonicalize {
                path: candidate.clone(),
                error: e,
            })?;

    if !is_within_root(&canonical_path, &canonical_root) {
        if is_symlink {
            return Err(PathSecurityError::SymlinkOutsideRoot { path: candidate });
        }
        return Err(PathSecurityError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    Ok(canonical_path)
}

/// Fails on the first symlink found walking from `root` down to `requested`.
fn reject_symlinks(root: &Path, requested: &Path) -> Result<(), PathSecurityError> {
    let mut current = root.to_path_buf();
    for component in requested.components() {
        if let Component::Normal(part) = component {
            current.push(part);
            let metadata = current
                .symlink_metadata()
                .map_err(|e| PathSecurityError::IoError {
                    path: current.clone(),
                    error: e,
                })?;
            if metadata.file_type().is_symlink() {
                return Err(PathSecurityError::SymlinkNotAllowed { path: current });
            }
        }
    }
    Ok(())
}

/// Checks if a path is within (or equal to) a root directory
fn is_within_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_path_within_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("test.txt"), "test").unwrap();

        let result = resolve_within_root(temp_dir.path(), "test.txt", true);

        let resolved = result.unwrap();
        assert!(resolved.ends_with("test.txt"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_nested_path_within_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("images/icons")).unwrap();
        fs::write(temp_dir.path().join("images/icons/add.png"), "png").unwrap();

        let result = resolve_within_root(temp_dir.path(), "./images/icons/add.png", true);

        assert!(result.is_ok());
    }

    #[test]
    fn test_absolute_path_rejected() {
        let temp_dir = TempDir::new().unwrap();

        let result = resolve_within_root(temp_dir.path(), "/etc/passwd", true);

        assert!(matches!(result, Err(PathSecurityError::AbsolutePath { .. })));
    }

    #[test]
    fn test_path_traversal_blocked() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(temp_dir.path().join("test.txt"), "test").unwrap();

        // The file exists, but only by stepping out of the root
        let result = resolve_within_root(&subdir, "../test.txt", true);

        assert!(matches!(
            result,
            Err(PathSecurityError::ParentTraversal { .. })
        ));
        assert!(resolve_within_root(&subdir, "a/../../test.txt", true).is_err());
    }

    #[test]
    fn test_nonexistent_path() {
        let temp_dir = TempDir::new().unwrap();

        let result = resolve_within_root(temp_dir.path(), "does_not_exist.txt", true);

        assert!(matches!(result, Err(PathSecurityError::PathNotFound { .. })));
    }

    #[test]
    fn test_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("gone");

        let result = resolve_within_root(&root, "a.png", true);

        assert!(matches!(result, Err(PathSecurityError::IoError { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_within_root() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let target_file = temp_dir.path().join("target.txt");
        fs::write(&target_file, "test").unwrap();
        symlink(&target_file, temp_dir.path().join("link.txt")).unwrap();

        let result = resolve_within_root(temp_dir.path(), "link.txt", true);

        assert!(result.unwrap().ends_with("target.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_outside_root_blocked() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let target_file = outside_dir.path().join("target.txt");
        fs::write(&target_file, "test").unwrap();
        symlink(&target_file, root_dir.path().join("link.txt")).unwrap();

        let result = resolve_within_root(root_dir.path(), "link.txt", true);

        assert!(matches!(
            result,
            Err(PathSecurityError::SymlinkOutsideRoot { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_disallowed_by_config() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let target_file = temp_dir.path().join("target.txt");
        fs::write(&target_file, "test").unwrap();
        symlink(&target_file, temp_dir.path().join("link.txt")).unwrap();

        let result = resolve_within_root(temp_dir.path(), "link.txt", false);

        assert!(matches!(
            result,
            Err(PathSecurityError::SymlinkNotAllowed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_disallowed_by_config() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let real_dir = temp_dir.path().join("real");
        fs::create_dir(&real_dir).unwrap();
        fs::write(real_dir.join("a.css"), "body {}").unwrap();
        symlink(&real_dir, temp_dir.path().join("linked")).unwrap();

        let result = resolve_within_root(temp_dir.path(), "linked/a.css", false);

        match result {
            Err(PathSecurityError::SymlinkNotAllowed { path }) => {
                assert!(path.ends_with("linked"));
            }
            other => panic!("expected SymlinkNotAllowed, got {:?}", other),
        }
        assert!(resolve_within_root(temp_dir.path(), "real/a.css", false).is_ok());
        assert!(resolve_within_root(temp_dir.path(), "linked/a.css", true).is_ok());
    }
}
