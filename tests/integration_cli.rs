// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and command handlers.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use envkit::cli::check::OutputFormat;
use envkit::cli::validate::ValidateKind;
use envkit::cli::{Cli, Command};
use envkit::cmd::check::check_source;
use envkit::cmd::validate::{Outcome, evaluate};
use envkit::config::Config;
use envkit::env::EnvMap;

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_check_with_configs() {
    let cli = Cli::try_parse_from([
        "envkit",
        "--no-default-config",
        "-c",
        "schema.toml",
        "check",
        "--format",
        "env",
    ])
    .unwrap();

    assert!(cli.global.no_default_config);
    let Some(Command::Check(args)) = cli.command else {
        panic!("expected check command");
    };
    assert_eq!(args.format, OutputFormat::Env);
}

#[test]
fn cli_validate_kinds() {
    for (name, kind) in [
        ("guid", ValidateKind::Guid),
        ("email", ValidateKind::Email),
        ("iso-date", ValidateKind::IsoDate),
        ("number", ValidateKind::Number),
        ("non-empty", ValidateKind::NonEmpty),
        ("json", ValidateKind::Json),
    ] {
        let cli = Cli::try_parse_from(["envkit", "validate", name, "x"]).unwrap();
        let Some(Command::Validate(args)) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.kind, kind, "{name}");
    }
}

#[test]
fn cli_unknown_command() {
    assert!(Cli::try_parse_from(["envkit", "build"]).is_err());
}

#[test]
fn cli_stage_override() {
    let cli = Cli::try_parse_from(["envkit", "--stage", "pro", "schema"]).unwrap();
    assert!(
        cli.global
            .to_config_overrides()
            .contains(&("log.stage", "pro".to_string()))
    );
}

// =============================================================================
// Handlers
// =============================================================================

#[test]
fn cmd_check_env_output() {
    let config = Config::parse(
        r#"
[[vars]]
name = "REGION"
kind = "enum"
allowed = ["eu", "us"]

[[vars]]
name = "REPLICAS"
kind = "int"
"#,
    )
    .unwrap();
    let cli = Cli::try_parse_from(["envkit", "check", "--format", "env"]).unwrap();
    let Some(Command::Check(args)) = cli.command else {
        panic!("expected check command");
    };

    let source: EnvMap = [("REGION", "eu"), ("REPLICAS", "3")].into_iter().collect();
    let output = check_source(&args, &config, source).unwrap();
    insta::assert_snapshot!(output, @r"
    REGION=eu
    REPLICAS=3
    ");
}

#[test]
fn cmd_validate_email() {
    assert_eq!(
        evaluate(ValidateKind::Email, "user@example.com"),
        Outcome::Valid
    );
    for bad in ["@example.com", "user@.com", "user@com.", "a b@c.d"] {
        assert_eq!(evaluate(ValidateKind::Email, bad), Outcome::Invalid, "{bad}");
    }
}
