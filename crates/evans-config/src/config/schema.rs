//! Configuration schema
//!
//! Mirrors the layout of the persisted `config.toml` and of `.evans.toml`:
//! - `[default]` proto search paths and default package/service
//! - `[meta]` store location and update policy
//! - `[repl]` / `[env]` front-end settings sharing the `[server]` table
//! - `[server]` connection target
//! - `[log]`, `[request]`, `[input]`

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Root configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub default: DefaultSettings,
    pub meta: Meta,
    pub repl: Repl,
    pub env: Env,
    pub server: Server,
    pub log: Log,
    pub request: Request,
    pub input: Input,
}

/// Proto lookup defaults.
///
/// `proto_path` and `proto_file` hold `[""]` in templates so the key shows up
/// in a freshly written config file; `setup` turns that back into `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DefaultSettings {
    pub proto_path: Vec<String>,
    pub proto_file: Vec<String>,
    pub package: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    /// Location of the persisted store. May start with `~`.
    pub path: String,
    pub auto_update: bool,
    pub update_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Repl {
    pub prompt_format: String,
    pub colored_output: bool,
    pub show_splash_text: bool,
    pub splash_text_path: String,
}

/// Settings for the non-interactive front end. Only the shared server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Env {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: String,
    pub reflection: bool,
    pub tls: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Log {
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    /// Replayed to the server in this order.
    pub header: Vec<Header>,
    pub web: bool,
}

/// A single outbound request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub val: String,
}

impl Header {
    pub fn new(key: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            val: val.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Input {
    pub prompt_format: String,
}

/// A sub-record borrowed together with the configuration's single [`Server`].
///
/// `repl()` and `env()` hand these out so both front ends always observe the
/// same server settings.
#[derive(Debug)]
pub struct Linked<'a, T> {
    inner: &'a T,
    server: &'a Server,
}

impl<T> Clone for Linked<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Linked<'_, T> {}

impl<'a, T> Linked<'a, T> {
    pub fn server(&self) -> &'a Server {
        self.server
    }

    pub fn get(&self) -> &'a T {
        self.inner
    }
}

impl<T> Deref for Linked<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.inner
    }
}

impl Config {
    pub fn repl(&self) -> Linked<'_, Repl> {
        Linked {
            inner: &self.repl,
            server: &self.server,
        }
    }

    pub fn env(&self) -> Linked<'_, Env> {
        Linked {
            inner: &self.env,
            server: &self.server,
        }
    }

    /// `host:port` of the configured server.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
