// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::scoped_env_vars;
use super::{Config, ConfigLoader, ConfigSource, ParserKind, VarParser, VarSpec};
use crate::env::{Dotenv, EnvMap, EnvValue};
use crate::error::{ConfigError, ParseError};
use crate::logging::LogLevel;
use std::path::PathBuf;

const SCHEMA: &str = r#"
[log]
stage = "pro"

[[vars]]
name = "PORT"
kind = "int"

[[vars]]
name = "NODE_ENV"
kind = "enum"
allowed = ["dev", "pro"]

[[vars]]
name = "HOSTS"
kind = "array"
item = "string"
delimiter = ";"
"#;

fn spec(name: &str, kind: &str) -> VarSpec {
    VarSpec::new(name, kind)
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.log.level, LogLevel::INFO);
    assert_eq!(config.log.file_level, LogLevel::TRACE);
    assert_eq!(config.log.stage, "dev");
    assert!(config.dotenv.enabled);
    assert!(config.vars.is_empty());
}

#[test]
fn test_parse_schema() {
    let config = Config::parse(SCHEMA).unwrap();

    assert_eq!(config.log.stage, "pro");
    assert!(config.logger().is_production());
    let names: Vec<_> = config.vars.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["PORT", "NODE_ENV", "HOSTS"], "case and order kept");
}

#[test]
fn test_format_schema() {
    let config = Config::parse(SCHEMA).unwrap();
    insta::assert_snapshot!(config.format_schema().unwrap().join("\n"), @r"
    PORT     = int
    NODE_ENV = enum(dev|pro)
    HOSTS    = array<string>(';')
    ");
}

#[test]
fn test_to_registry_builds_snapshot() {
    let config = Config::parse(SCHEMA).unwrap();
    let registry = config.to_registry().unwrap();
    assert_eq!(registry.names().collect::<Vec<_>>(), ["PORT", "NODE_ENV", "HOSTS"]);

    let source: EnvMap = [("PORT", "8080"), ("NODE_ENV", "dev"), ("HOSTS", "a; b")]
        .into_iter()
        .collect();
    let snapshot = registry.snapshot(&source).unwrap();

    assert_eq!(snapshot.get("PORT"), Some(&EnvValue::Int(8080)));
    assert_eq!(snapshot.get_as::<String>("NODE_ENV").unwrap(), "dev");
    assert_eq!(snapshot.get_as::<Vec<String>>("HOSTS").unwrap(), ["a", "b"]);
}

#[test]
fn test_to_registry_reports_parse_errors() {
    let config = Config::parse(SCHEMA).unwrap();
    let source: EnvMap = [("PORT", "80"), ("NODE_ENV", "qa")].into_iter().collect();

    let err = config.to_registry().unwrap().snapshot(&source).unwrap_err();
    assert_eq!(
        err,
        ParseError::NotAllowed {
            value: "qa".to_string(),
            allowed: vec!["dev".to_string(), "pro".to_string()],
        }
    );
}

#[test]
fn test_unknown_kind_is_rejected() {
    let err = Config::parse(
        r#"
[[vars]]
name = "PORT"
kind = "integer"
"#,
    )
    .unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"unknown parser kind 'integer' for variable 'PORT'");
}

#[test]
fn test_parser_kind_names() {
    assert_eq!(ParserKind::from_name("INT"), Some(ParserKind::Int));
    assert_eq!(ParserKind::from_name(" guid "), Some(ParserKind::Guid));
    assert_eq!(ParserKind::from_name("number"), None);
    for kind in ParserKind::ALL {
        assert_eq!(ParserKind::from_name(kind.as_str()), Some(kind));
    }
}

#[test]
fn test_var_spec_resolution() {
    assert_eq!(spec("A", "bool").resolve().unwrap(), VarParser::Bool);
    assert_eq!(
        spec("A", "csv").resolve().unwrap(),
        VarParser::Csv { delimiter: ',' }
    );

    let enum_items = VarSpec {
        item: Some("enum".to_string()),
        allowed: vec!["x".to_string()],
        ..spec("A", "array")
    };
    assert_eq!(
        enum_items.resolve().unwrap(),
        VarParser::Array {
            item: Box::new(VarParser::Enum {
                allowed: vec!["x".to_string()]
            }),
            delimiter: ',',
        }
    );
}

#[test]
fn test_var_spec_invalid_definitions() {
    let cases = [
        spec("E", "enum"),
        spec("L", "array"),
        VarSpec {
            item: Some("csv".to_string()),
            ..spec("L", "array")
        },
        VarSpec {
            delimiter: Some("::".to_string()),
            ..spec("C", "csv")
        },
        VarSpec {
            delimiter: Some(";".to_string()),
            ..spec("I", "int")
        },
        VarSpec {
            item: Some("int".to_string()),
            ..spec("S", "string")
        },
    ];

    let messages: Vec<_> = cases
        .iter()
        .map(|c| c.resolve().unwrap_err().to_string())
        .collect();
    insta::assert_snapshot!(messages.join("\n"), @r"
    invalid definition for variable 'E': kind 'enum' requires a non-empty 'allowed' list
    invalid definition for variable 'L': kind 'array' requires 'item'
    invalid definition for variable 'L': nested lists are not supported
    invalid definition for variable 'C': delimiter must be a single character, got '::'
    invalid definition for variable 'I': kind 'int' does not take 'delimiter'
    invalid definition for variable 'S': kind 'string' does not take 'item'
    ");
}

#[test]
fn test_unknown_item_kind() {
    let err = VarSpec {
        item: Some("list".to_string()),
        ..spec("L", "array")
    }
    .resolve()
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKind { kind, .. } if kind == "list"));
}

#[test]
fn test_duplicate_variable_is_rejected() {
    let config = Config {
        vars: vec![spec("A", "int"), spec("A", "string")],
        ..Config::default()
    };
    insta::assert_snapshot!(
        config.validate().unwrap_err().to_string(),
        @"invalid definition for variable 'A': declared more than once"
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    let result = Config::parse("[log]\nverbosity = 3");
    assert!(result.is_err(), "unknown fields should be rejected");
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let err = Config::parse("[log]\nlevel = 9").unwrap_err();
    assert!(err.to_string().contains("0-6"), "{err}");
}

#[test]
fn test_dotenv_settings_source() {
    let config = Config::parse("[dotenv]\nenabled = false").unwrap();
    assert_eq!(config.dotenv.source().dotenv(), &Dotenv::Disabled);

    let config = Config::parse("[dotenv]\npath = \"config/.env.local\"").unwrap();
    assert_eq!(
        config.dotenv.source().dotenv(),
        &Dotenv::Path(PathBuf::from("config/.env.local"))
    );

    assert_eq!(Config::default().dotenv.source().dotenv(), &Dotenv::Default);
}

#[test]
fn test_config_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{SCHEMA}").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.vars.len(), 3);
}

#[test]
fn test_config_loader_missing_required_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .add_toml_file(dir.path().join("missing.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn test_config_loader_optional_file() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new().add_toml_file_optional(dir.path().join("missing.toml"));
    assert!(loader.sources().is_empty(), "missing optional files are not listed");
    assert!(loader.build().is_ok());
}

#[test]
fn test_config_loader_env_override() {
    // SAFETY: the prefix is unique to this test.
    unsafe {
        std::env::set_var("EKCFGTEST_LOG__LEVEL", "5");
        std::env::set_var("EKCFGTEST_LOG__STAGE", "pro");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[log]\nlevel = 2\nstage = \"dev\"")
        .with_env_prefix("EKCFGTEST")
        .build()
        .unwrap();

    assert_eq!(config.log.level, LogLevel::TRACE);
    assert_eq!(config.log.stage, "pro");

    // SAFETY: as above.
    unsafe {
        std::env::remove_var("EKCFGTEST_LOG__LEVEL");
        std::env::remove_var("EKCFGTEST_LOG__STAGE");
    }
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[log]\nlevel = 3")
        .set("log.level", 1)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.log.level, LogLevel::ERROR);
}

#[test]
fn test_config_loader_layered_sources() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[log]
level = 4
stage = "dev"

[[vars]]
name = "PORT"
kind = "int"
"#
    )
    .unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(file.path())
        .add_toml_str("[log]\nstage = \"pro\"");
    assert_eq!(loader.format_sources().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.log.level, LogLevel::DEBUG, "file value should persist");
    assert_eq!(config.log.stage, "pro", "string should override file");
    assert_eq!(config.vars, [spec("PORT", "int")]);
}

#[test]
fn test_config_loader_format_sources() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.toml");
    let local = dir.path().join("local.toml");
    std::fs::write(&base, "").unwrap();
    std::fs::write(&local, "").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file_optional(&local)
        .add_toml_file_optional(dir.path().join("absent.toml"))
        .add_toml_str("");
    assert_eq!(
        loader.sources(),
        [
            ConfigSource::File(base.clone()),
            ConfigSource::Optional(local),
            ConfigSource::Inline,
        ]
    );
    assert_eq!(loader.sources()[0].path(), Some(base.as_path()));
    assert_eq!(ConfigSource::Inline.path(), None);

    let lines = loader
        .format_sources()
        .join("\n")
        .replace(&dir.path().display().to_string(), "<dir>");
    insta::assert_snapshot!(lines, @r"
    1. <dir>/base.toml
    2. <dir>/local.toml (optional)
    3. <inline>
    ");
}

#[test]
fn test_scoped_env_vars_keeps_settings_sections() {
    let vars = [
        ("ENVKIT_LOG__LEVEL", "4"),
        ("envkit_dotenv__enabled", "false"),
        ("ENVKIT_HOME", "/opt/envkit"),
        ("ENVKIT_VARS__PORT", "int"),
        ("ENVKIT_LOGGING__LEVEL", "1"),
        ("OTHER_LOG__LEVEL", "2"),
    ]
    .map(|(k, v)| (k.to_string(), v.to_string()));

    let scoped = scoped_env_vars("ENVKIT", vars);
    let mut keys: Vec<_> = scoped.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["ENVKIT_LOG__LEVEL", "envkit_dotenv__enabled"]);
}

#[test]
fn test_config_loader_ignores_unrelated_prefixed_vars() {
    // SAFETY: the prefix is unique to this test.
    unsafe {
        std::env::set_var("EKSCOPETEST_HOME", "/opt/envkit");
        std::env::set_var("EKSCOPETEST_LOG__STAGE", "pro");
    }

    let result = ConfigLoader::new()
        .add_toml_str("[log]\nlevel = 2")
        .with_env_prefix("EKSCOPETEST")
        .build();

    // SAFETY: as above.
    unsafe {
        std::env::remove_var("EKSCOPETEST_HOME");
        std::env::remove_var("EKSCOPETEST_LOG__STAGE");
    }

    let config = result.unwrap();
    assert_eq!(config.log.stage, "pro");
    assert_eq!(config.log.level, LogLevel::WARN);
}
