//! Persisted user configuration (`~/.config/evans/config.toml`).

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ConfigError, Result};

use super::parser::{parse_config_file, parse_config_str, to_toml};
use super::schema::Config;

const FALLBACK_EDITOR: &str = "vi";

/// Storage for the user's saved configuration.
pub trait PersistedStore {
    /// Backing file location.
    fn path(&self) -> &Path;

    /// Saved state layered over the template the store was opened with.
    fn get(&self) -> Result<Config>;

    /// Let the user edit the saved state.
    fn edit(&self) -> Result<()>;
}

/// TOML-file backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    config_path: PathBuf,
    template: Config,
}

impl FileStore {
    /// Open the store, writing `template` to `path` on first use.
    pub fn open(path: PathBuf, template: Config) -> Result<Self> {
        let store = Self {
            config_path: path,
            template,
        };

        if !store.config_path.exists() {
            store.save(&store.template)?;
            tracing::info!(path = %store.config_path.display(), "created config file");
        }

        Ok(store)
    }

    pub fn template(&self) -> &Config {
        &self.template
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let content = to_toml(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| self.store_error(source))?;
        }
        std::fs::write(&self.config_path, content).map_err(|source| self.store_error(source))?;
        Ok(())
    }

    fn store_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Store {
            path: self.config_path.clone(),
            source,
        }
    }
}

impl PersistedStore for FileStore {
    fn path(&self) -> &Path {
        &self.config_path
    }

    fn get(&self) -> Result<Config> {
        let content =
            std::fs::read_to_string(&self.config_path).map_err(|source| self.store_error(source))?;
        let saved = parse_config_str(&content).map_err(|message| ConfigError::Parse {
            path: self.config_path.clone(),
            message,
        })?;
        let mut config = self.template.clone();
        saved.apply_to(&mut config);
        Ok(config)
    }

    fn edit(&self) -> Result<()> {
        self.edit_with(&editor_command())
    }
}

impl FileStore {
    /// Open the backing file in `editor` and check the result still decodes.
    ///
    /// `editor` may carry arguments (`code --wait`); the path is appended.
    pub fn edit_with(&self, editor: &str) -> Result<()> {
        let mut parts = editor.split_whitespace();
        let program = parts.next().unwrap_or(FALLBACK_EDITOR);

        tracing::debug!(editor, path = %self.config_path.display(), "launching editor");
        let status = Command::new(program)
            .args(parts)
            .arg(&self.config_path)
            .status()
            .map_err(|e| ConfigError::Editor {
                editor: editor.to_string(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ConfigError::Editor {
                editor: editor.to_string(),
                reason: format!("exited with {status}"),
            });
        }

        // Surface a broken edit now rather than on the next run.
        parse_config_file(&self.config_path)?;
        Ok(())
    }
}

/// `$VISUAL`, then `$EDITOR`, then `vi`.
fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}
