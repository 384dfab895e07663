//! Configuration layer merging logic
//!
//! Global (defaults -> environment -> store) -> project-local `.evans.toml`.

use super::defaults::{DEFAULT_INPUT_PROMPT_FORMAT, default_header, is_placeholder};
use super::overlay::ConfigOverlay;
use super::schema::Config;

/// Overlay the project-local layer onto the global configuration.
///
/// # Arguments
/// * `global` - Configuration built from defaults, environment and the store
/// * `local` - Decoded `.evans.toml`, if one was found
///
/// # Returns
/// The effective configuration, already passed through [`setup`]
pub fn merge(global: Config, local: Option<ConfigOverlay>) -> Config {
    let mut merged = global;

    if let Some(local) = local {
        local.apply_to(&mut merged);
    }

    setup(&mut merged);
    merged
}

/// Normalise a configuration before it is handed to consumers.
///
/// Idempotent. `repl()` and `env()` always borrow `config.server`, so there
/// is no server link to restore here.
pub fn setup(config: &mut Config) {
    if is_placeholder(&config.default.proto_file) {
        config.default.proto_file.clear();
    }
    if is_placeholder(&config.default.proto_path) {
        config.default.proto_path.clear();
    }

    if config.request.header.is_empty() {
        config.request.header.push(default_header());
    }

    if config.input.prompt_format.is_empty() {
        config.input.prompt_format = DEFAULT_INPUT_PROMPT_FORMAT.to_string();
    }
}
