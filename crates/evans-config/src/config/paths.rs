//! Config path resolution helpers.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// File name of the project-local override.
pub const LOCAL_CONFIG_NAME: &str = ".evans.toml";

/// Expand a leading `~` against the user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    expand_home_with(path, dirs::home_dir())
}

pub fn expand_home_with(path: &str, home: Option<PathBuf>) -> Result<PathBuf> {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(path));
    };

    let home = home.ok_or(ConfigError::HomeDir)?;
    Ok(home.join(rest))
}

/// `.evans.toml` inside `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_NAME)
}
