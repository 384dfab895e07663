//! Error types for configuration resolution.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Errors surfaced by the resolver.
///
/// `Env`, `Store` and `HomeDir` happen while building the global
/// configuration and leave the process without any usable configuration.
/// `Io` and `Parse` come from a config file that exists but cannot be read
/// or decoded; they are never downgraded to "no override".
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Env {
        key: String,
        value: String,
        reason: String,
    },

    #[error("failed to open config store at {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine home directory")]
    HomeDir,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("editor `{editor}` failed: {reason}")]
    Editor { editor: String, reason: String },
}

impl ConfigError {
    /// True for errors raised while building the global configuration.
    pub fn is_fatal_init(&self) -> bool {
        matches!(
            self,
            ConfigError::Env { .. } | ConfigError::Store { .. } | ConfigError::HomeDir
        )
    }
}

/// Failures of the working-tree root query.
///
/// Discovery treats every one of these as "not inside a working tree".
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{program}` wrote to stderr: {stderr}")]
    Stderr { program: String, stderr: String },

    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("failed waiting for `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
