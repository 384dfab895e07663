//! `EVANS_*` environment overrides.
//!
//! Every leaf field is bound to `EVANS_<TABLE>_<FIELD>`, with the TOML key
//! upper-cased and its separators dropped (`repl.promptFormat` ->
//! `EVANS_REPL_PROMPTFORMAT`).

use std::env::{self, VarError};

use crate::error::{ConfigError, Result};

use super::schema::{Config, Header};

pub const ENV_PREFIX: &str = "EVANS";

/// Name of the variable bound to `table.field`.
pub fn env_key(table: &str, field: &str) -> String {
    format!(
        "{ENV_PREFIX}_{}_{}",
        table.to_ascii_uppercase(),
        field.to_ascii_uppercase()
    )
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    apply_env_overrides_with(config, |key| env::var(key))
}

/// Apply overrides read through `lookup`, which behaves like [`env::var`].
pub fn apply_env_overrides_with<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let vars = EnvReader { lookup };

    if let Some(list) = vars.list("default", "protoPath")? {
        config.default.proto_path = list;
    }
    if let Some(list) = vars.list("default", "protoFile")? {
        config.default.proto_file = list;
    }
    if let Some(package) = vars.string("default", "package")? {
        config.default.package = package;
    }
    if let Some(service) = vars.string("default", "service")? {
        config.default.service = service;
    }

    if let Some(path) = vars.string("meta", "path")? {
        config.meta.path = path;
    }
    if let Some(auto_update) = vars.bool("meta", "autoUpdate")? {
        config.meta.auto_update = auto_update;
    }
    if let Some(level) = vars.string("meta", "updateLevel")? {
        config.meta.update_level = level;
    }

    if let Some(format) = vars.string("repl", "promptFormat")? {
        config.repl.prompt_format = format;
    }
    if let Some(colored) = vars.bool("repl", "coloredOutput")? {
        config.repl.colored_output = colored;
    }
    if let Some(show) = vars.bool("repl", "showSplashText")? {
        config.repl.show_splash_text = show;
    }
    if let Some(path) = vars.string("repl", "splashTextPath")? {
        config.repl.splash_text_path = path;
    }

    if let Some(host) = vars.string("server", "host")? {
        config.server.host = host;
    }
    if let Some(port) = vars.string("server", "port")? {
        config.server.port = port;
    }
    if let Some(reflection) = vars.bool("server", "reflection")? {
        config.server.reflection = reflection;
    }
    if let Some(tls) = vars.bool("server", "tls")? {
        config.server.tls = tls;
    }

    if let Some(prefix) = vars.string("log", "prefix")? {
        config.log.prefix = prefix;
    }

    if let Some(headers) = vars.headers("request", "header")? {
        config.request.header = headers;
    }
    if let Some(web) = vars.bool("request", "web")? {
        config.request.web = web;
    }

    if let Some(format) = vars.string("input", "promptFormat")? {
        config.input.prompt_format = format;
    }

    Ok(())
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    fn string(&self, table: &str, field: &str) -> Result<Option<String>> {
        let key = env_key(table, field);
        match (self.lookup)(&key) {
            Ok(val) => Ok(Some(val)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(raw)) => Err(ConfigError::Env {
                key,
                value: raw.to_string_lossy().into_owned(),
                reason: "contains invalid UTF-8".to_string(),
            }),
        }
    }

    fn bool(&self, table: &str, field: &str) -> Result<Option<bool>> {
        let Some(value) = self.string(table, field)? else {
            return Ok(None);
        };
        match parse_bool(&value) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(ConfigError::Env {
                key: env_key(table, field),
                value,
                reason: "expected a boolean".to_string(),
            }),
        }
    }

    fn list(&self, table: &str, field: &str) -> Result<Option<Vec<String>>> {
        Ok(self.string(table, field)?.map(|value| split_list(&value)))
    }

    /// `key=val` pairs separated by commas, in order.
    fn headers(&self, table: &str, field: &str) -> Result<Option<Vec<Header>>> {
        let Some(value) = self.string(table, field)? else {
            return Ok(None);
        };

        let mut headers = Vec::new();
        for entry in split_list(&value) {
            let Some((key, val)) = entry.split_once('=') else {
                return Err(ConfigError::Env {
                    key: env_key(table, field),
                    value,
                    reason: format!("header entry {entry:?} is not of the form key=val"),
                });
            };
            headers.push(Header::new(key.trim(), val.trim()));
        }
        Ok(Some(headers))
    }
}

fn split_list(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(|item| item.trim().to_string()).collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
