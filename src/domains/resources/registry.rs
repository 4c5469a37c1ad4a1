//! Resource Registry - named providers with ordered lookup.
//!
//! The registry is built once at startup, then shared read-only. Providers
//! are kept in registration order; an unscoped lookup asks each provider in
//! turn and the first one that has the resource wins.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use super::development::{DevelopmentMode, apply_development_root};
use super::error::ResourceError;
use super::filesystem::FilesystemProvider;
use super::provider::ResourceProvider;
use crate::core::config::{Config, DevelopmentConfig};

/// Ordered map of provider name to provider.
pub type ProviderMap = IndexMap<String, Arc<dyn ResourceProvider>>;

/// Registry of named [`ResourceProvider`]s.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    providers: ProviderMap,
    development: DevelopmentConfig,
}

impl ResourceRegistry {
    /// Create an empty registry that applies development overrides from `development`.
    pub fn new(development: DevelopmentConfig) -> Self {
        Self {
            providers: IndexMap::new(),
            development,
        }
    }

    /// Build a registry holding a [`FilesystemProvider`] for every configured
    /// provider, registered in configuration order.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new(config.development.clone());
        for provider in &config.providers {
            registry.register(
                provider.name.clone(),
                FilesystemProvider::new(&provider.root)
                    .with_symlinks(config.security.allow_symlinks),
            );
        }
        registry
    }

    /// Register a provider under `name`, replacing any provider already
    /// registered under that name.
    ///
    /// A replaced provider keeps its original position in the lookup order.
    /// If a development root is configured for `name`, it is applied to the
    /// provider first; failing to apply it is logged and reported in the
    /// returned [`DevelopmentMode`], never treated as an error.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        provider: impl ResourceProvider + 'static,
    ) -> DevelopmentMode {
        self.register_boxed(name, Box::new(provider))
    }

    /// Register an already boxed provider. See [`register`](Self::register).
    pub fn register_boxed(
        &mut self,
        name: impl Into<String>,
        mut provider: Box<dyn ResourceProvider>,
    ) -> DevelopmentMode {
        let name = name.into();
        let mode = apply_development_root(&name, provider.as_mut(), &self.development);

        info!("Registering resource provider: {} ({})", name, provider.kind());
        if self.providers.insert(name.clone(), Arc::from(provider)).is_some() {
            info!("Resource provider {} replaced an earlier registration", name);
        }

        mode
    }

    /// Register several providers, in iteration order.
    pub fn register_all<I>(&mut self, providers: I) -> Vec<(String, DevelopmentMode)>
    where
        I: IntoIterator<Item = (String, Box<dyn ResourceProvider>)>,
    {
        providers
            .into_iter()
            .map(|(name, provider)| {
                let mode = self.register_boxed(name.clone(), provider);
                (name, mode)
            })
            .collect()
    }

    /// Resolve a resource path.
    ///
    /// With a provider name, only that provider is asked; an unregistered name
    /// is a [`ResourceError::ProviderNotFound`]. Without one, providers are
    /// asked in registration order and the first match is returned.
    pub fn resolve(
        &self,
        provider: Option<&str>,
        path: &str,
    ) -> Result<Option<PathBuf>, ResourceError> {
        match provider {
            Some(name) => {
                let provider = self
                    .providers
                    .get(name)
                    .ok_or_else(|| ResourceError::provider_not_found(name))?;
                Ok(provider.resolve(path))
            }
            None => Ok(self.resolve_any(path)),
        }
    }

    /// Resolve a resource path from whichever provider has it first.
    pub fn resolve_any(&self, path: &str) -> Option<PathBuf> {
        self.locate(path).map(|(_, file)| file)
    }

    /// Like [`resolve_any`](Self::resolve_any), also reporting which provider matched.
    pub fn locate(&self, path: &str) -> Option<(&str, PathBuf)> {
        let found = self
            .providers
            .iter()
            .find_map(|(name, provider)| provider.resolve(path).map(|file| (name.as_str(), file)));

        if found.is_none() {
            debug!("Resource {} not found in any registered provider", path);
        }
        found
    }

    /// Read-only view of the registered providers, in registration order.
    pub fn list_providers(&self) -> &ProviderMap {
        &self.providers
    }

    /// Look up a provider by name.
    pub fn provider(&self, name: &str) -> Option<&Arc<dyn ResourceProvider>> {
        self.providers.get(name)
    }

    /// Provider names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// The development settings this registry applies at registration.
    pub fn development(&self) -> &DevelopmentConfig {
        &self.development
    }
}
