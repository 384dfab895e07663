//! Evans Config Library
//!
//! Resolves the effective configuration of the evans gRPC client from
//! compiled-in defaults, `EVANS_*` environment variables, the persisted
//! user config file and an optional project-local `.evans.toml`.

pub mod config;
pub mod discovery;
pub mod error;
pub mod resolver;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{
        Config, ConfigOverlay, DefaultSettings, Env, FileStore, Header, Input, Log, Meta,
        PersistedStore, Repl, Request, Server,
    };

    // Discovery
    pub use crate::discovery::{GitRootLocator, LocalConfig, LocalDiscovery, RootLocator};

    // Resolution
    pub use crate::error::{ConfigError, VcsError};
    pub use crate::resolver::{ConfigResolver, Resolution, build_global};
}
