#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Unit tests for CLI parsing and config overrides

use crate::cli::{Cli, Commands, ConfigArgs};
use crate::config::{ErrorCodeScope, UnmappedPolicy, CONFIG_FILE_NAME};
use crate::generator::OutputFormat;
use clap::Parser;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["routegen", "generate", "--schema", "api.yaml"]).unwrap();
    match cli.command {
        Commands::Generate {
            schema,
            output,
            format,
            allow_partial,
            report,
            config,
        } => {
            assert_eq!(schema.to_string_lossy(), "api.yaml");
            assert_eq!(output.to_string_lossy(), "gen");
            assert_eq!(format, OutputFormat::Json);
            assert!(!allow_partial);
            assert!(!report);
            assert_eq!(config, ConfigArgs::default());
        }
        _ => panic!("Expected Generate command"),
    }
    assert!(!cli.verbose);
}

#[test]
fn test_generate_with_overrides() {
    let cli = Cli::try_parse_from([
        "routegen",
        "generate",
        "-s",
        "api.yaml",
        "-o",
        "out",
        "--format",
        "yaml",
        "--unmapped",
        "error",
        "--error-code-scope",
        "schema",
        "--fallback-status",
        "503",
        "--options-key",
        "route",
        "--allow-partial",
        "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Generate { format, config, allow_partial, .. } => {
            assert_eq!(format, OutputFormat::Yaml);
            assert!(allow_partial);
            assert_eq!(config.unmapped, Some(UnmappedPolicy::Error));
            assert_eq!(config.error_code_scope, Some(ErrorCodeScope::Schema));
            assert_eq!(config.fallback_status, Some(503));
            assert_eq!(config.options_key.as_deref(), Some("route"));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_all_commands_parse() {
    for args in [
        vec!["routegen", "check", "--schema", "api.yaml"],
        vec!["routegen", "inspect", "--schema", "api.yaml"],
        vec!["routegen", "inspect", "--schema", "api.yaml", "--dump", "json"],
    ] {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.command.schema().to_string_lossy(), "api.yaml");
    }
}

#[test]
fn test_missing_schema_rejected() {
    assert!(Cli::try_parse_from(["routegen", "check"]).is_err());
    assert!(Cli::try_parse_from(["routegen", "generate", "-s", "a.yaml", "--format", "xml"]).is_err());
}

#[test]
fn test_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("api.yaml");
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "fallback_status = 502\nmax_depth = 3\n",
    )
    .unwrap();

    let args = ConfigArgs {
        max_depth: Some(5),
        ..ConfigArgs::default()
    };
    let config = args.resolve(&schema).unwrap();
    assert_eq!(config.fallback_status, 502);
    assert_eq!(config.max_depth, 5);
}

#[test]
fn test_invalid_override_rejected() {
    let dir = TempDir::new().unwrap();
    let args = ConfigArgs {
        fallback_status: Some(99),
        ..ConfigArgs::default()
    };
    assert!(args.resolve(&dir.path().join("api.yaml")).is_err());
}
