//! Working-tree root lookup through `git rev-parse --show-cdup`.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::VcsError;

/// Upper bound on the git query.
pub const DEFAULT_VCS_TIMEOUT: Duration = Duration::from_secs(3);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Finds the root of the working tree enclosing a directory.
pub trait RootLocator {
    /// Root of the working tree containing `cwd`.
    fn working_tree_root(&self, cwd: &Path) -> Result<PathBuf, VcsError>;
}

/// Asks git for the path from `cwd` up to the working-tree root.
#[derive(Debug, Clone)]
pub struct GitRootLocator {
    program: String,
    timeout: Duration,
}

impl Default for GitRootLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRootLocator {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            timeout: DEFAULT_VCS_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a different executable in place of `git`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Relative prefix from `cwd` to the root, as printed by `--show-cdup`.
    ///
    /// Empty when `cwd` is the root itself.
    pub fn show_cdup(&self, cwd: &Path) -> Result<String, VcsError> {
        let child = Command::new(&self.program)
            .args(["rev-parse", "--show-cdup"])
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| VcsError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let (status, stdout, stderr) = self.wait_bounded(child)?;

        if !status.success() {
            return Err(VcsError::Failed {
                program: self.program.clone(),
                status,
                stderr: stderr.trim().to_string(),
            });
        }
        if !stderr.is_empty() {
            return Err(VcsError::Stderr {
                program: self.program.clone(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout.trim().to_string())
    }

    /// Wait for `child`, killing it once the timeout elapses.
    ///
    /// Both pipes are drained on reader threads so a chatty child cannot
    /// stall on a full pipe buffer.
    fn wait_bounded(
        &self,
        mut child: Child,
    ) -> Result<(std::process::ExitStatus, String, String), VcsError> {
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let start = Instant::now();
        let status = loop {
            match child.try_wait().map_err(|e| self.io_error(e))? {
                Some(status) => break status,
                None if start.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Readers are left detached: grandchildren may still hold the pipes.
                    return Err(VcsError::Timeout {
                        program: self.program.clone(),
                        timeout: self.timeout,
                    });
                }
                None => std::thread::sleep(POLL_INTERVAL),
            }
        };

        let stdout = self.collect(stdout)?;
        let stderr = self.collect(stderr)?;
        Ok((status, stdout, stderr))
    }

    fn collect(
        &self,
        reader: Option<JoinHandle<std::io::Result<String>>>,
    ) -> Result<String, VcsError> {
        let Some(reader) = reader else {
            return Ok(String::new());
        };
        match reader.join() {
            Ok(read) => read.map_err(|e| self.io_error(e)),
            Err(_) => Err(self.io_error(std::io::Error::other("pipe reader panicked"))),
        }
    }

    fn io_error(&self, source: std::io::Error) -> VcsError {
        VcsError::Io {
            program: self.program.clone(),
            source,
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<String>> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        pipe.read_to_string(&mut buf)?;
        Ok(buf)
    })
}

impl RootLocator for GitRootLocator {
    fn working_tree_root(&self, cwd: &Path) -> Result<PathBuf, VcsError> {
        let cdup = self.show_cdup(cwd)?;
        Ok(cwd.join(cdup))
    }
}
