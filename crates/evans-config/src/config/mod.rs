//! Configuration schema and layering
//!
//! Layers, lowest precedence first:
//! - Compiled-in defaults
//! - `EVANS_*` environment variables
//! - Persisted store: ~/.config/evans/config.toml
//! - Project-local: .evans.toml (cwd or working-tree root)

pub mod defaults;
pub mod environment;
pub mod merge;
pub mod overlay;
pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use environment::{ENV_PREFIX, apply_env_overrides, apply_env_overrides_with, env_key};
pub use merge::{merge, setup};
pub use overlay::ConfigOverlay;
pub use parser::{parse_config_file, parse_config_str, to_toml};
pub use paths::{LOCAL_CONFIG_NAME, expand_home};
pub use schema::{Config, DefaultSettings, Env, Header, Input, Linked, Log, Meta, Repl, Request, Server};
pub use store::{FileStore, PersistedStore};
