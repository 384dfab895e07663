//! Effective configuration resolution.
//!
//! Frontends create one [`ConfigResolver`] at startup and ask it for the
//! current configuration whenever they need one.

use std::env::VarError;
use std::path::PathBuf;

use crate::config::environment::apply_env_overrides_with;
use crate::config::merge::merge;
use crate::config::paths::expand_home;
use crate::config::schema::Config;
use crate::config::store::{FileStore, PersistedStore};
use crate::discovery::{GitRootLocator, LocalDiscovery, RootLocator};
use crate::error::{ConfigError, Result};

/// An effective configuration together with the local file that shaped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub config: Config,
    pub local_path: Option<PathBuf>,
}

/// Build the global configuration: defaults, then `lookup`'d environment
/// variables, then the persisted store opened at `meta.path`.
///
/// Creates the store file when it does not exist yet.
pub fn build_global<F>(lookup: F) -> Result<(Config, FileStore)>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    let mut template = Config::template();
    apply_env_overrides_with(&mut template, lookup)?;

    let path = expand_home(&template.meta.path)?;
    let store = FileStore::open(path, template)?;
    let global = store.get()?;
    Ok((global, store))
}

/// Owns the global configuration and produces effective configurations.
#[derive(Debug)]
pub struct ConfigResolver<S = FileStore, L = GitRootLocator> {
    global: Config,
    store: S,
    discovery: LocalDiscovery<L>,
}

impl ConfigResolver {
    /// Resolver over the process environment and working directory.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        let (global, store) = build_global(|key| std::env::var(key))?;
        Ok(Self::with_parts(global, store, LocalDiscovery::new(cwd)))
    }
}

impl<S: PersistedStore, L: RootLocator> ConfigResolver<S, L> {
    /// Resolver whose global configuration is read from `store`.
    pub fn new(store: S, discovery: LocalDiscovery<L>) -> Result<Self> {
        let global = store.get()?;
        Ok(Self::with_parts(global, store, discovery))
    }

    pub fn with_parts(global: Config, store: S, discovery: LocalDiscovery<L>) -> Self {
        Self {
            global,
            store,
            discovery,
        }
    }

    /// The global configuration, before local overrides and setup.
    pub fn global(&self) -> &Config {
        &self.global
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn discovery(&self) -> &LocalDiscovery<L> {
        &self.discovery
    }

    /// The effective configuration and its local source, if any.
    pub fn resolve(&self) -> Result<Resolution> {
        let (overlay, local_path) = match self.discovery.find()? {
            Some(local) => (Some(local.overlay), Some(local.path)),
            None => (None, None),
        };

        Ok(Resolution {
            config: merge(self.global.clone(), overlay),
            local_path,
        })
    }

    /// The effective configuration.
    pub fn get(&self) -> Result<Config> {
        Ok(self.resolve()?.config)
    }

    /// Edit the persisted store, then reload the global configuration.
    ///
    /// Local override files are not involved.
    pub fn edit(&mut self) -> Result<()> {
        self.store.edit()?;
        self.global = self.store.get()?;
        Ok(())
    }
}
