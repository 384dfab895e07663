//! Partially-populated configuration
//!
//! A config file only mentions the keys its author cares about. Decoding it
//! into [`ConfigOverlay`] keeps that information: a missing key stays `None`,
//! while an explicit `web = false` is `Some(false)` and still wins over the
//! layer below.

use serde::Deserialize;

use super::schema::{Config, Header};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverlay {
    pub default: Option<DefaultOverlay>,
    pub meta: Option<MetaOverlay>,
    pub repl: Option<ReplOverlay>,
    pub env: Option<EnvOverlay>,
    pub server: Option<ServerOverlay>,
    pub log: Option<LogOverlay>,
    pub request: Option<RequestOverlay>,
    pub input: Option<InputOverlay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultOverlay {
    pub proto_path: Option<Vec<String>>,
    pub proto_file: Option<Vec<String>>,
    pub package: Option<String>,
    pub service: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaOverlay {
    pub path: Option<String>,
    pub auto_update: Option<bool>,
    pub update_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplOverlay {
    pub prompt_format: Option<String>,
    pub colored_output: Option<bool>,
    pub show_splash_text: Option<bool>,
    pub splash_text_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnvOverlay {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerOverlay {
    pub host: Option<String>,
    pub port: Option<String>,
    pub reflection: Option<bool>,
    pub tls: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogOverlay {
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequestOverlay {
    pub header: Option<Vec<Header>>,
    pub web: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputOverlay {
    pub prompt_format: Option<String>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl ConfigOverlay {
    /// True when the overlay mentions no key at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Write every explicitly set value into `base`.
    ///
    /// Lists are replaced as a whole, never merged element-wise.
    pub fn apply_to(self, base: &mut Config) {
        if let Some(default) = self.default {
            set(&mut base.default.proto_path, default.proto_path);
            set(&mut base.default.proto_file, default.proto_file);
            set(&mut base.default.package, default.package);
            set(&mut base.default.service, default.service);
        }

        if let Some(meta) = self.meta {
            set(&mut base.meta.path, meta.path);
            set(&mut base.meta.auto_update, meta.auto_update);
            set(&mut base.meta.update_level, meta.update_level);
        }

        if let Some(repl) = self.repl {
            set(&mut base.repl.prompt_format, repl.prompt_format);
            set(&mut base.repl.colored_output, repl.colored_output);
            set(&mut base.repl.show_splash_text, repl.show_splash_text);
            set(&mut base.repl.splash_text_path, repl.splash_text_path);
        }

        if let Some(server) = self.server {
            set(&mut base.server.host, server.host);
            set(&mut base.server.port, server.port);
            set(&mut base.server.reflection, server.reflection);
            set(&mut base.server.tls, server.tls);
        }

        if let Some(log) = self.log {
            set(&mut base.log.prefix, log.prefix);
        }

        if let Some(request) = self.request {
            set(&mut base.request.header, request.header);
            set(&mut base.request.web, request.web);
        }

        if let Some(input) = self.input {
            set(&mut base.input.prompt_format, input.prompt_format);
        }
    }
}
