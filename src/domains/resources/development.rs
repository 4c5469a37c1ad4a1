//! Development-mode overrides applied at registration time.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use super::provider::ResourceProvider;
use crate::core::config::DevelopmentConfig;

/// What happened to a provider's development root during registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevelopmentMode {
    /// No development property is configured for the provider.
    Inactive,

    /// The provider now resolves from this directory.
    Applied { root: PathBuf },

    /// A development property was configured but could not be applied.
    /// The provider keeps its original configuration.
    Skipped { root: PathBuf, reason: SkipReason },
}

/// Why a configured development root was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The configured path does not exist or is not a directory.
    NotADirectory,

    /// The provider has no development mode.
    Unsupported,

    /// The provider refused the directory.
    Rejected(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory => write!(f, "path does not exist or is not a directory"),
            Self::Unsupported => write!(f, "provider has no development mode"),
            Self::Rejected(msg) => write!(f, "provider rejected the directory: {}", msg),
        }
    }
}

impl DevelopmentMode {
    /// Returns true if the development root was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Returns the skip reason, if the override was configured but not applied.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Skipped { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Apply the configured development root for `name` to `provider`, if any.
///
/// Failures never propagate: they are logged and reported in the returned
/// [`DevelopmentMode`], and the provider is left as it was.
pub(crate) fn apply_development_root(
    name: &str,
    provider: &mut dyn ResourceProvider,
    config: &DevelopmentConfig,
) -> DevelopmentMode {
    let Some(root) = config.root_for(name) else {
        return DevelopmentMode::Inactive;
    };

    let reason = if !root.is_dir() {
        SkipReason::NotADirectory
    } else if !provider.supports_development_root() {
        SkipReason::Unsupported
    } else {
        match provider.set_development_root(root.clone()) {
            Ok(()) => {
                info!(
                    "Development mode enabled for resource provider {}: {}",
                    name,
                    root.display()
                );
                return DevelopmentMode::Applied { root };
            }
            Err(e) => SkipReason::Rejected(e.to_string()),
        }
    };

    warn!(
        "Failed to set development mode for resource provider {} to {}: {}",
        name,
        root.display(),
        reason
    );
    DevelopmentMode::Skipped { root, reason }
}
