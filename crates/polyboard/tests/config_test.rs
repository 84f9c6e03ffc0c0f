//! Tests for configuration loading and command-line overrides.

use clap::Parser;
use polyboard::{AppConfig, Cli, Command};
use polyboard_core::{SearchSettings, VariantRegistry};
use polyboard_variants::ReferenceEngine;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.default_variant(), "Kalah");
    assert_eq!(*config.search_depth(), 5);
    assert_eq!(*config.search_time_secs(), 3);
    assert!(*config.auto_reply());
    assert_eq!(config.log_filter(), &None);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = write_config(
        r#"
default_variant = "Othello"
search_depth = 7
log_filter = "warn"
"#,
    );

    let config = AppConfig::from_file(file.path()).unwrap();

    assert_eq!(config.default_variant(), "Othello");
    assert_eq!(config.search_settings(), SearchSettings::new(7, 3));
    assert_eq!(config.log_filter().as_deref(), Some("warn"));
    assert!(*config.auto_reply());
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_config("search_depth = \"deep\"");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_zero_bounds_are_rejected() {
    let file = write_config("search_time_secs = 0");
    let config = AppConfig::load_or_default(file.path()).unwrap();
    assert!(config.validate().is_err());
    assert!(AppConfig::default().with_search_depth(0).validate().is_err());
    assert!(AppConfig::default().validate().is_ok());
}

#[test]
fn test_variant_resolves_by_name_or_index() {
    let registry = VariantRegistry::from_engine(&ReferenceEngine).unwrap();

    let by_name = AppConfig::default().with_default_variant("connect 4".to_string());
    assert_eq!(by_name.variant_index(&registry).unwrap(), 1);

    let by_index = AppConfig::default().with_default_variant("3".to_string());
    assert_eq!(by_index.variant_index(&registry).unwrap(), 3);

    assert_eq!(AppConfig::default().variant_index(&registry).unwrap(), 4);

    let unknown = AppConfig::default().with_default_variant("Chess".to_string());
    assert!(unknown.variant_index(&registry).is_err());
    let past_end = AppConfig::default().with_default_variant("5".to_string());
    assert!(past_end.variant_index(&registry).is_err());
}

#[test]
fn test_command_line_overrides_file() {
    let cli = Cli::try_parse_from([
        "polyboard",
        "console",
        "--variant",
        "Ataxx",
        "--depth",
        "2",
        "--no-auto-reply",
    ])
    .unwrap();

    let config = cli.overlay(AppConfig::default());

    assert_eq!(cli.command, Some(Command::Console));
    assert_eq!(config.default_variant(), "Ataxx");
    assert_eq!(*config.search_depth(), 2);
    assert_eq!(*config.search_time_secs(), 3);
    assert!(!*config.auto_reply());
}

#[test]
fn test_no_subcommand_means_tui() {
    let cli = Cli::try_parse_from(["polyboard"]).unwrap();
    assert_eq!(cli.command.unwrap_or_default(), Command::Tui);
    assert_eq!(cli.config.to_str(), Some("polyboard.toml"));
}
