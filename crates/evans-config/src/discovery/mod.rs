//! Discovery of the project-local override file.
//!
//! - `./.evans.toml` in the working directory
//! - `.evans.toml` at the root of the enclosing git working tree

mod git;
mod local;

pub use git::{DEFAULT_VCS_TIMEOUT, GitRootLocator, RootLocator};
pub use local::{LocalConfig, LocalDiscovery};
