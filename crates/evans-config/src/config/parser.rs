//! TOML parser with helpful error messages

use std::path::Path;

use super::overlay::ConfigOverlay;
use super::schema::Config;
use crate::error::{ConfigError, Result};

/// Read and decode a config file.
///
/// The caller has already established that `path` exists, so every failure
/// here is reported.
pub fn parse_config_file(path: &Path) -> Result<ConfigOverlay> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&content).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Decode config file content.
pub fn parse_config_str(content: &str) -> std::result::Result<ConfigOverlay, String> {
    toml::from_str(content).map_err(|e| enhance_toml_error(&e, content))
}

/// Render a decode error with the offending lines when a position is known.
fn enhance_toml_error(error: &toml::de::Error, content: &str) -> String {
    let message = error.message().to_string();

    let Some(span) = error.span() else {
        return format!("TOML parsing error: {message}");
    };

    let line_num = content[..span.start.min(content.len())]
        .matches('\n')
        .count()
        + 1;
    let context = get_line_context(content, line_num);
    format!("TOML parsing error at line {line_num}:\n{context}\n\nError: {message}")
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 1).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a configuration to TOML string
pub fn to_toml(config: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_valid_config() {
        let toml = r#"
[server]
host = "localhost"
port = "8080"
reflection = true

[[request.header]]
key = "grpc-client"
val = "evans"
"#;

        let overlay = parse_config_str(toml).unwrap();
        let server = overlay.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("localhost"));
        assert_eq!(server.port.as_deref(), Some("8080"));
        assert_eq!(server.reflection, Some(true));
        assert_eq!(overlay.request.unwrap().header.unwrap().len(), 1);
    }

    #[test]
    fn test_parse_empty_config() {
        let overlay = parse_config_str("").unwrap();
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let toml = r#"
[server
host = "localhost"
"#; // Missing closing bracket

        let err = parse_config_str(toml).unwrap_err();
        assert!(err.contains("TOML parsing error at line"));
        assert!(err.contains(">>>"));
    }

    #[test]
    fn test_parse_wrong_type() {
        let err = parse_config_str("[server]\ntls = \"yes\"\n").unwrap_err();
        assert!(err.contains("TOML parsing error"));
    }

    #[test]
    fn test_parse_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[log]\nprefix = \"[grpc] \"").unwrap();

        let overlay = parse_config_file(temp_file.path()).unwrap();
        assert_eq!(overlay.log.unwrap().prefix.as_deref(), Some("[grpc] "));
    }

    #[test]
    fn test_parse_file_error_names_path() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[server]\nport = 50051").unwrap();

        let err = parse_config_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&temp_file.path().display().to_string()));
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let err = parse_config_file(Path::new("/nonexistent/path/.evans.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_to_toml_decodes_back() {
        let mut original = Config::template();
        original.server.tls = true;
        original.default.package = "api.v1".to_string();

        let toml_str = to_toml(&original).unwrap();
        let mut decoded = Config::default();
        parse_config_str(&toml_str).unwrap().apply_to(&mut decoded);

        assert_eq!(decoded, original);
    }
}
