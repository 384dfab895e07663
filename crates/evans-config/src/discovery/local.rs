//! Project-local `.evans.toml` lookup.

use std::path::{Path, PathBuf};

use crate::config::overlay::ConfigOverlay;
use crate::config::parser::parse_config_file;
use crate::config::paths::local_config_path;
use crate::error::{ConfigError, Result, VcsError};

use super::git::{GitRootLocator, RootLocator};

/// A decoded override file and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    pub path: PathBuf,
    pub overlay: ConfigOverlay,
}

/// Searches for the override file: `cwd` first, then the working-tree root.
#[derive(Debug, Clone)]
pub struct LocalDiscovery<L = GitRootLocator> {
    cwd: PathBuf,
    locator: L,
}

impl LocalDiscovery<GitRootLocator> {
    pub fn new(cwd: PathBuf) -> Self {
        Self::with_locator(cwd, GitRootLocator::new())
    }
}

impl<L: RootLocator> LocalDiscovery<L> {
    pub fn with_locator(cwd: PathBuf, locator: L) -> Self {
        Self { cwd, locator }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Locate and decode the override file.
    ///
    /// `Ok(None)` when there is no file in `cwd`, no working tree, or no file
    /// at its root. A file that exists but cannot be read or decoded is an
    /// error.
    pub fn find(&self) -> Result<Option<LocalConfig>> {
        if let Some(path) = self.locate()? {
            let overlay = parse_config_file(&path)?;
            tracing::debug!(path = %path.display(), "loaded local config");
            return Ok(Some(LocalConfig { path, overlay }));
        }
        Ok(None)
    }

    /// Path of the override file that [`find`](Self::find) would load.
    pub fn locate(&self) -> Result<Option<PathBuf>> {
        let direct = local_config_path(&self.cwd);
        if exists(&direct)? {
            return Ok(Some(direct));
        }

        let root = match self.locator.working_tree_root(&self.cwd) {
            Ok(root) => root,
            Err(err) => {
                log_vcs_miss(&err);
                return Ok(None);
            }
        };

        let at_root = local_config_path(&root);
        if exists(&at_root)? {
            return Ok(Some(at_root));
        }

        tracing::debug!(root = %root.display(), "no local config at working-tree root");
        Ok(None)
    }
}

/// `Ok(false)` only for "not found"; other stat failures are reported.
fn exists(path: &Path) -> Result<bool> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn log_vcs_miss(err: &VcsError) {
    match err {
        VcsError::Timeout { .. } | VcsError::Stderr { .. } => {
            tracing::warn!(error = %err, "working-tree lookup failed, ignoring local config");
        }
        _ => tracing::debug!(error = %err, "not inside a working tree"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FixedRoot(Option<PathBuf>);

    impl RootLocator for FixedRoot {
        fn working_tree_root(&self, _cwd: &Path) -> std::result::Result<PathBuf, VcsError> {
            self.0.clone().ok_or_else(|| VcsError::Stderr {
                program: "git".to_string(),
                stderr: "fatal: not a git repository".to_string(),
            })
        }
    }

    #[test]
    fn prefers_file_in_cwd() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let cwd = root.join("sub");
        std::fs::create_dir_all(&cwd).unwrap();
        std::fs::write(root.join(".evans.toml"), "[server]\nport = \"1\"\n").unwrap();
        std::fs::write(cwd.join(".evans.toml"), "[server]\nport = \"2\"\n").unwrap();

        let discovery = LocalDiscovery::with_locator(cwd.clone(), FixedRoot(Some(root)));
        let local = discovery.find().unwrap().unwrap();

        assert_eq!(local.path, cwd.join(".evans.toml"));
        assert_eq!(local.overlay.server.unwrap().port.as_deref(), Some("2"));
    }

    #[test]
    fn falls_back_to_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let cwd = root.join("a").join("b");
        std::fs::create_dir_all(&cwd).unwrap();
        std::fs::write(root.join(".evans.toml"), "[server]\ntls = true\n").unwrap();

        let discovery = LocalDiscovery::with_locator(cwd, FixedRoot(Some(root.clone())));
        let local = discovery.find().unwrap().unwrap();

        assert_eq!(local.path, root.join(".evans.toml"));
        assert_eq!(local.overlay.server.unwrap().tls, Some(true));
    }

    #[test]
    fn no_file_anywhere_is_none() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();

        let discovery = LocalDiscovery::with_locator(root.join("x"), FixedRoot(Some(root)));
        assert!(discovery.find().unwrap().is_none());
    }

    #[test]
    fn vcs_failure_is_none() {
        let temp = TempDir::new().unwrap();

        let discovery = LocalDiscovery::with_locator(temp.path().to_path_buf(), FixedRoot(None));
        assert!(discovery.find().unwrap().is_none());
    }

    #[test]
    fn malformed_root_file_is_error() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let cwd = root.join("sub");
        std::fs::create_dir_all(&cwd).unwrap();
        std::fs::write(root.join(".evans.toml"), "[server\n").unwrap();

        let discovery = LocalDiscovery::with_locator(cwd, FixedRoot(Some(root)));
        assert!(matches!(discovery.find(), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn unreadable_entry_is_io_error() {
        let temp = TempDir::new().unwrap();
        // A directory named like the file exists but cannot be read as one.
        std::fs::create_dir(temp.path().join(".evans.toml")).unwrap();

        let discovery = LocalDiscovery::with_locator(temp.path().to_path_buf(), FixedRoot(None));
        assert!(matches!(discovery.find(), Err(ConfigError::Io { .. })));
    }
}
