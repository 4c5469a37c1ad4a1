//! Configuration management for the resource registry and server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::{info, warn};

use super::error::{Error, Result};

#[cfg(feature = "http")]
use super::transport::HttpConfig;

/// Default prefix for development-root properties.
pub const DEFAULT_DEVELOPMENT_PREFIX: &str = "resources.development";

/// Shell-friendly environment prefix for development roots (`RESOURCES_DEV_<NAME>`).
const DEV_ENV_PREFIX: &str = "RESOURCES_DEV_";

/// Main configuration structure.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Providers to register at startup, in lookup order.
    pub providers: Vec<ProviderConfig>,

    /// Development-mode overrides for provider roots.
    pub development: DevelopmentConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Security and path validation configuration.
    pub security: SecurityConfig,

    /// HTTP endpoint configuration.
    #[cfg(feature = "http")]
    pub http: HttpConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// A filesystem provider to register at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Registry name of the provider.
    pub name: String,

    /// Directory holding the provider's bundled resources.
    pub root: PathBuf,
}

/// Development-mode configuration.
///
/// A provider registered under `name` has its resource root redirected when
/// the property `<prefix>.<name>` is set. The property value names a local
/// working copy; `resource_subdir`, if set, is appended to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevelopmentConfig {
    /// Property key prefix, e.g. `resources.development`.
    pub prefix: String,

    /// Path appended to every property value (e.g. `src/main/webapp/resources`).
    pub resource_subdir: Option<PathBuf>,

    /// Property key to value, as collected from the environment.
    pub properties: BTreeMap<String, String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for security and path validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Whether filesystem providers may follow symlinked resources.
    /// Symlink targets must still lie inside the provider's root.
    pub allow_symlinks: bool,
}

impl Default for DevelopmentConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_DEVELOPMENT_PREFIX.to_string(),
            resource_subdir: None,
            properties: BTreeMap::new(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allow_symlinks: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "resource-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            providers: Vec::new(),
            development: DevelopmentConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            security: SecurityConfig::default(),
            #[cfg(feature = "http")]
            http: HttpConfig::default(),
        }
    }
}

impl DevelopmentConfig {
    /// The property key consulted for provider `name`.
    pub fn property_key(&self, name: &str) -> String {
        format!("{}.{}", self.prefix, name)
    }

    /// The development root configured for provider `name`, if any.
    pub fn root_for(&self, name: &str) -> Option<PathBuf> {
        let value = self.properties.get(&self.property_key(name))?;
        let mut root = PathBuf::from(value);
        if let Some(subdir) = &self.resource_subdir {
            root.push(subdir);
        }
        Some(root)
    }

    /// Set the development property for provider `name`.
    pub fn set_root(&mut self, name: &str, value: impl Into<String>) {
        let key = self.property_key(name);
        self.properties.insert(key, value.into());
    }

    /// Collect development settings from environment-style variables.
    ///
    /// Both `<prefix>.<name>` and `RESOURCES_DEV_<NAME>` are recognised and
    /// the former wins when both name a provider. The `RESOURCES_DEV_<NAME>`
    /// form is lower-cased, so it can only reach providers whose names are
    /// all lower case; use `<prefix>.<name>` for any other name.
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let mut config = Self::default();

        if let Some(prefix) = non_empty(vars, "RESOURCES_DEV_PREFIX") {
            config.prefix = prefix.to_string();
        }
        if let Some(subdir) = non_empty(vars, "RESOURCES_DEV_SUBDIR") {
            config.resource_subdir = Some(PathBuf::from(subdir));
        }

        for (key, value) in vars {
            let Some(name) = key.strip_prefix(DEV_ENV_PREFIX) else {
                continue;
            };
            if name.is_empty() || name == "PREFIX" || name == "SUBDIR" || value.trim().is_empty() {
                continue;
            }
            config.set_root(&name.to_lowercase(), value.trim());
        }

        let exact_prefix = format!("{}.", config.prefix);
        for (key, value) in vars {
            match key.strip_prefix(&exact_prefix) {
                Some(name) if !name.is_empty() && !value.trim().is_empty() => {
                    config.properties.insert(key.clone(), value.trim().to_string());
                }
                _ => {}
            }
        }

        config
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// Variables are expected to be prefixed with `RESOURCES_`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        // Non UTF-8 variables cannot name providers or paths we understand
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::from_vars(&vars)
    }

    /// Build configuration from a set of environment-style variables.
    ///
    /// Fails if `RESOURCES_PROVIDERS` contains an entry that cannot be parsed.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(name) = non_empty(vars, "RESOURCES_SERVER_NAME") {
            config.server.name = name.to_string();
        }

        if let Some(level) = non_empty(vars, "RESOURCES_LOG_LEVEL") {
            config.logging.level = level.to_string();
        }

        if let Some(timestamps) = non_empty(vars, "RESOURCES_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = parse_flag(timestamps, true);
        }

        if let Some(providers) = non_empty(vars, "RESOURCES_PROVIDERS") {
            config.providers = parse_providers(providers)?;
        }

        config.development = DevelopmentConfig::from_vars(vars);

        if let Some(allow_symlinks) = non_empty(vars, "RESOURCES_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = parse_flag(allow_symlinks, true);
        }

        #[cfg(feature = "http")]
        {
            config.http = HttpConfig::from_vars(vars);
        }

        Ok(config)
    }

    /// Log what was configured. Call once logging is initialized.
    pub fn log_summary(&self) {
        if self.providers.is_empty() {
            warn!("RESOURCES_PROVIDERS not set - no resource providers will be registered");
        }
        for provider in &self.providers {
            info!(
                "Resource provider configured: {} -> {}",
                provider.name,
                provider.root.display()
            );
        }
        for key in self.development.properties.keys() {
            info!("Development property set: {}", key);
        }
        info!("Symlinks allowed: {}", self.security.allow_symlinks);
    }
}

/// Parse `name=dir,name=dir` into provider configs, preserving order.
///
/// Provider names may not contain `/`, since they form one path segment of
/// the HTTP routes.
pub fn parse_providers(spec: &str) -> Result<Vec<ProviderConfig>> {
    spec.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((name, root)) if !name.trim().is_empty() && !root.trim().is_empty() => {
                let name = name.trim();
                if name.contains('/') {
                    return Err(Error::config(format!(
                        "provider name '{}' must not contain '/'",
                        name
                    )));
                }
                Ok(ProviderConfig {
                    name: name.to_string(),
                    root: PathBuf::from(root.trim()),
                })
            }
            _ => Err(Error::config(format!(
                "malformed provider entry '{}' (expected name=dir)",
                entry
            ))),
        })
        .collect()
}

pub(crate) fn non_empty<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_flag(value: &str, default: bool) -> bool {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
