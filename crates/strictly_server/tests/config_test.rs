//! Tests for config loading, validation, and command-line overrides.

use std::io::Write;
use std::path::PathBuf;
use strictly_server::{Cli, ServerConfig};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Temp file");
    file.write_all(content.as_bytes()).expect("Write config");
    file
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(*config.board().rows(), 6);
    assert_eq!(*config.board().columns(), 7);
    assert_eq!(*config.channel_capacity(), 256);
    assert!(config.static_dir().is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_toml_is_default() {
    let config = ServerConfig::from_toml("").expect("Empty config parses");
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = ServerConfig::from_toml(
        r#"
        port = 8080

        [board]
        columns = 9
        "#,
    )
    .expect("Valid config");
    assert_eq!(*config.port(), 8080);
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.board().rows(), 6);
    assert_eq!(*config.board().columns(), 9);
}

#[test]
fn test_from_file() {
    let file = write_config(
        r#"
        host = "0.0.0.0"
        static_dir = "public"
        "#,
    );
    let config = ServerConfig::from_file(file.path()).expect("Valid config");
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(config.static_dir().as_deref(), Some(PathBuf::from("public").as_path()));
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).expect_err("No file");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_toml_is_error() {
    let err = ServerConfig::from_toml("port = \"eighty\"").expect_err("Wrong type");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_board_bounds_validated() {
    for (rows, columns) in [(3, 7), (6, 17), (0, 0)] {
        let config = ServerConfig::from_toml(&format!(
            "[board]\nrows = {rows}\ncolumns = {columns}\n"
        ))
        .expect("Parses");
        assert!(config.board_size().is_err(), "{rows}x{columns}");
        assert!(config.validate().is_err(), "{rows}x{columns}");
    }

    let config = ServerConfig::from_toml("[board]\nrows = 16\ncolumns = 4\n").expect("Parses");
    let size = config.board_size().expect("In range");
    assert_eq!((*size.rows(), *size.columns()), (16, 4));
}

#[test]
fn test_other_values_validated() {
    let zero_capacity = ServerConfig::default().with_channel_capacity(0);
    assert!(zero_capacity.validate().is_err());

    let blank_host = ServerConfig::default().with_host("  ");
    assert!(blank_host.validate().is_err());
}

#[test]
fn test_cli_overrides_file() {
    let file = write_config("port = 4000\n[board]\nrows = 8\n");
    let cli = Cli {
        config: file.path().to_path_buf(),
        port: Some(5000),
        columns: Some(8),
        static_dir: Some(PathBuf::from("web")),
        ..Cli::default()
    };

    let config = cli.load_config().expect("Valid config");
    assert_eq!(*config.port(), 5000);
    assert_eq!(*config.board().rows(), 8);
    assert_eq!(*config.board().columns(), 8);
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(config.static_dir().as_deref(), Some(PathBuf::from("web").as_path()));
}

#[test]
fn test_cli_without_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let cli = Cli {
        config: dir.path().join("strictly_server.toml"),
        host: Some("0.0.0.0".to_string()),
        ..Cli::default()
    };

    let config = cli.load_config().expect("Defaults are valid");
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 3000);
}

#[test]
fn test_cli_rejects_bad_override() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let cli = Cli {
        config: dir.path().join("strictly_server.toml"),
        rows: Some(2),
        ..Cli::default()
    };

    assert!(cli.load_config().is_err());
}
