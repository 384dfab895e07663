use super::schema::{Config, Header, Input, Log, Meta, Repl, Request, Server};

pub const DEFAULT_STORE_PATH: &str = "~/.config/evans/config.toml";
pub const DEFAULT_UPDATE_LEVEL: &str = "patch";
pub const DEFAULT_REPL_PROMPT_FORMAT: &str = "{package}.{service}@{addr}:{port}";
pub const DEFAULT_INPUT_PROMPT_FORMAT: &str = "{ancestor}{name} ({type}) => ";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "50051";
pub const DEFAULT_LOG_PREFIX: &str = "[evans] ";
pub const DEFAULT_HEADER_KEY: &str = "grpc-client";
pub const DEFAULT_HEADER_VAL: &str = "evans";

/// The header identifying this client to the server.
pub fn default_header() -> Header {
    Header::new(DEFAULT_HEADER_KEY, DEFAULT_HEADER_VAL)
}

/// Single-element list used so an empty list still shows as an editable key.
pub(crate) fn placeholder_list() -> Vec<String> {
    vec![String::new()]
}

pub(crate) fn is_placeholder(list: &[String]) -> bool {
    matches!(list, [only] if only.is_empty())
}

impl Config {
    /// Compiled-in defaults as handed to the persisted store.
    ///
    /// Same as `Config::default()` except that the proto lists carry the
    /// `[""]` placeholder.
    pub fn template() -> Self {
        let mut config = Self::default();
        config.default.proto_path = placeholder_list();
        config.default.proto_file = placeholder_list();
        config
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
            auto_update: false,
            update_level: DEFAULT_UPDATE_LEVEL.to_string(),
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self {
            prompt_format: DEFAULT_REPL_PROMPT_FORMAT.to_string(),
            colored_output: true,
            show_splash_text: true,
            splash_text_path: String::new(),
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT.to_string(),
            reflection: false,
            tls: false,
        }
    }
}

impl Default for Log {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_LOG_PREFIX.to_string(),
        }
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            header: vec![default_header()],
            web: false,
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self {
            prompt_format: DEFAULT_INPUT_PROMPT_FORMAT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, "50051");
        assert!(!config.server.reflection);
        assert!(!config.server.tls);
        assert!(config.repl.colored_output);
        assert!(config.repl.show_splash_text);
        assert_eq!(config.meta.path, "~/.config/evans/config.toml");
        assert_eq!(config.meta.update_level, "patch");
        assert_eq!(config.log.prefix, "[evans] ");
        assert_eq!(config.request.header, vec![Header::new("grpc-client", "evans")]);
        assert_eq!(config.input.prompt_format, "{ancestor}{name} ({type}) => ");
    }

    #[test]
    fn test_template_seeds_placeholders() {
        let template = Config::template();
        assert_eq!(template.default.proto_path, vec![String::new()]);
        assert_eq!(template.default.proto_file, vec![String::new()]);
        assert_eq!(template.request.header.len(), 1);
    }

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder(&[String::new()]));
        assert!(!is_placeholder(&[]));
        assert!(!is_placeholder(&["a.proto".to_string()]));
        assert!(!is_placeholder(&[String::new(), String::new()]));
    }
}
