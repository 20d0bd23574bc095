//! Тесты CLI-обёртки: вывод, форматы, конфигурация

use super::common::{cli, run_cli};
use db_cli::common::{CliConfig, OutputFormat};
use db_cli::Error;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_successful_parse_prints_nothing() {
    let output = run_cli(&["--query", "SELECT * FROM items"]).unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_debug_ast_prints_pretty_json() {
    let output = run_cli(&["--query", "SELECT * FROM items", "--debug-ast"]).unwrap();

    assert!(output.starts_with("{\n  \"statement_type\": \"SELECT\""));
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["projections"], "*");
    assert_eq!(value["from_table"], "items");
}

#[test]
fn test_debug_ast_text_format() {
    // --format попадает в конфигурацию через load_config
    let cli = cli(&[
        "-q",
        "insert into t values (1, 'a')",
        "--debug-ast",
        "--format",
        "text",
    ]);
    let config = cli.load_config().unwrap();
    assert_eq!(config.output_format, OutputFormat::Text);
    assert_eq!(
        cli.execute(&config).unwrap(),
        "INSERT INTO t VALUES (1, 'a')"
    );
}

#[test]
fn test_tokens_flag() {
    let output = run_cli(&["--query", "SELECT a FROM t", "--tokens"]).unwrap();
    assert_eq!(
        output,
        "KEYWORD 'SELECT' @0\nIDENTIFIER 'a' @7\nKEYWORD 'FROM' @9\nIDENTIFIER 't' @14\nEOF '' @15"
    );
}

#[test]
fn test_syntax_error_is_returned() {
    let err = run_cli(&["--query", "SELECT name users", "--debug-ast"]).unwrap_err();

    assert!(matches!(err, Error::Syntax { position: 12, .. }));
    assert!(err.to_string().starts_with("Syntax error at position 12"));
}

#[test]
fn test_tokens_are_not_printed_on_parse_failure() {
    let result = run_cli(&["--query", "SELECT name users", "--tokens"]);
    assert!(result.is_err());
}

#[test]
fn test_query_length_limit() {
    let cli = cli(&["--query", "SELECT * FROM a_rather_long_table_name"]);
    let config = CliConfig {
        max_query_length: 16,
        ..CliConfig::default()
    };

    assert!(matches!(
        cli.execute(&config),
        Err(Error::Validation { .. })
    ));
}

#[test]
fn test_deep_nesting_is_a_syntax_error() {
    // 29000 уровней скобок укладываются в лимит длины запроса
    let depth = 29_000;
    let query = format!(
        "SELECT * FROM t WHERE {}1{}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let err = run_cli(&["--query", &query]).unwrap_err();

    match err {
        Error::Syntax {
            position, message, ..
        } => {
            assert_eq!(position, 22 + 100);
            assert_eq!(message, "Expression nesting exceeds maximum depth of 100");
        }
        other => panic!("Ожидалась синтаксическая ошибка, получено {:?}", other),
    }
}

#[test]
fn test_nesting_limit_comes_from_config() {
    let cli = cli(&["--query", "SELECT * FROM t WHERE ((a = 1))"]);
    let config = CliConfig {
        max_nesting_depth: 1,
        ..CliConfig::default()
    };
    assert!(matches!(
        cli.execute(&config),
        Err(Error::Syntax { position: 23, .. })
    ));

    let config = CliConfig {
        max_nesting_depth: 2,
        ..CliConfig::default()
    };
    assert!(cli.execute(&config).is_ok());
}

#[test]
fn test_default_valued_flag_overrides_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "output_format = \"text\"").unwrap();

    let path = file.path().to_string_lossy().to_string();
    let cli = cli(&["--query", "SELECT * FROM t", "--config", &path, "--format", "json"]);
    assert_eq!(cli.load_config().unwrap().output_format, OutputFormat::Json);
}

#[test]
fn test_config_file_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "output_format = \"text\"").unwrap();
    writeln!(file, "log_level = \"debug\"").unwrap();
    writeln!(file, "max_query_length = 100").unwrap();

    let path = file.path().to_string_lossy().to_string();
    let cli = cli(&["--query", "SELECT * FROM t", "--config", &path]);
    let config = cli.load_config().unwrap();

    assert_eq!(config.output_format, OutputFormat::Text);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.max_query_length, 100);
}

#[test]
fn test_flags_override_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "output_format = \"text\"").unwrap();
    writeln!(file, "log_level = \"debug\"").unwrap();

    let path = file.path().to_string_lossy().to_string();
    let cli = cli(&[
        "--query",
        "SELECT * FROM t",
        "--config",
        &path,
        "--format",
        "json",
        "--log-level",
        "error",
    ]);
    let config = cli.load_config().unwrap();

    assert_eq!(config.output_format, OutputFormat::Json);
    assert_eq!(config.log_level, "error");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let cli = cli(&["--query", "SELECT * FROM t", "--config", "/nonexistent/db-cli.toml"]);
    let err = cli.load_config().unwrap_err();
    assert!(err.to_string().contains("failed to load config"));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let cli = cli(&["--query", "SELECT * FROM t", "--log-level", "chatty"]);
    assert!(cli.load_config().is_err());
}

#[test]
fn test_config_round_trip_through_file() {
    let file = NamedTempFile::new().unwrap();
    let config = CliConfig {
        output_format: OutputFormat::Text,
        log_level: "info".to_string(),
        max_query_length: 512,
        max_nesting_depth: 16,
    };

    config.to_file(file.path()).unwrap();
    assert_eq!(CliConfig::from_file(file.path()).unwrap(), config);
}
