use tempfile::TempDir;

use evans_config::config::{Config, FileStore, Header, PersistedStore};
use evans_config::error::ConfigError;

#[test]
fn open_missing_writes_template_in_nested_directory() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a").join("b").join("config.toml");

    let store = FileStore::open(path.clone(), Config::template()).unwrap();

    assert!(path.exists());
    assert_eq!(store.get().unwrap(), Config::template());
}

#[test]
fn save_then_get_roundtrip() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::open(temp.path().join("config.toml"), Config::template()).unwrap();

    let mut config = Config::template();
    config.server.host = "grpc.internal".to_string();
    config.request.header = vec![
        Header::new("authorization", "Bearer abc"),
        Header::new("x-trace", "1"),
    ];
    config.repl.show_splash_text = false;

    store.save(&config).unwrap();
    let loaded = store.get().unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn partial_file_falls_back_to_template() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[log]\nprefix = \"> \"\n").unwrap();

    let mut template = Config::template();
    template.server.port = "9000".to_string();
    let store = FileStore::open(path, template).unwrap();

    let loaded = store.get().unwrap();
    assert_eq!(loaded.log.prefix, "> ");
    assert_eq!(loaded.server.port, "9000");
    assert_eq!(store.template().server.port, "9000");
}

#[test]
fn unwritable_location_is_store_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let err = FileStore::open(blocker.join("config.toml"), Config::template()).unwrap_err();

    assert!(matches!(err, ConfigError::Store { .. }));
    assert!(err.is_fatal_init());
}

#[test]
fn unreadable_store_is_fatal_store_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::create_dir(&path).unwrap();

    let store = FileStore::open(path, Config::template()).unwrap();
    let err = store.get().unwrap_err();

    assert!(matches!(err, ConfigError::Store { .. }));
    assert!(err.is_fatal_init());
}
