// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for snapshot construction.
//!
//! Exercises the public builder, the `env_snapshot!` macro and the parser
//! set together, the way an application would at startup.

use envkit::env::{EnvMap, EnvValue, EnvironmentBuilder, ProcessEnv, Registry, Snapshot};
use envkit::env_snapshot;
use envkit::error::ParseError;
use envkit::parser::{
    array_of, csv_with, one_of, parse_as_array, parse_as_bool, parse_as_csv, parse_as_date,
    parse_as_float, parse_as_guid, parse_as_int, parse_as_json, parse_as_string,
};
use envkit::validator::{Guid, Validator};
use serde::Deserialize;

fn source(vars: &[(&str, &str)]) -> EnvMap {
    vars.iter().copied().collect()
}

// =============================================================================
// Typed snapshots
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Limits {
    max_connections: u32,
    burst: bool,
}

env_snapshot! {
    /// Settings of a small web service.
    pub struct ServiceEnv {
        port: i64 = "PORT" => parse_as_int,
        debug: bool = "DEBUG" => parse_as_bool,
        ratio: f64 = "SAMPLE_RATIO" => parse_as_float,
        stage: &'static str = "NODE_ENV" => one_of(&["dev", "pro"]),
        instance: Guid = "INSTANCE_ID" => parse_as_guid,
        limits: Limits = "LIMITS" => parse_as_json,
        allowed_ports: Vec<i64> = "ALLOWED_PORTS" => array_of(parse_as_int),
        paths: Vec<String> = "SEARCH_PATH" => csv_with(':'),
        motd: String = "MOTD" => parse_as_string,
    }
}

fn service_vars() -> EnvMap {
    source(&[
        ("PORT", "8080"),
        ("DEBUG", "TrUe"),
        ("SAMPLE_RATIO", "0.25"),
        ("NODE_ENV", "pro"),
        ("INSTANCE_ID", "123e4567-e89b-12d3-a456-426614174000"),
        ("LIMITS", r#"{"max_connections": 64, "burst": false}"#),
        ("ALLOWED_PORTS", "80, 443"),
        ("SEARCH_PATH", "/usr/bin:/bin"),
    ])
}

#[test]
fn typed_snapshot_from_source() {
    let env = ServiceEnv::from_source(&service_vars()).unwrap();

    assert_eq!(*env.port(), 8080);
    assert!(*env.debug());
    assert!((env.ratio() - 0.25).abs() < f64::EPSILON);
    assert_eq!(*env.stage(), "pro");
    assert_eq!(env.instance().as_str(), "123e4567-e89b-12d3-a456-426614174000");
    assert_eq!(
        env.limits(),
        &Limits {
            max_connections: 64,
            burst: false
        }
    );
    assert_eq!(env.allowed_ports(), &[80, 443]);
    assert_eq!(env.paths(), &["/usr/bin", "/bin"]);
    assert_eq!(env.motd(), "", "unset variables are read as empty strings");
}

#[test]
fn typed_snapshot_stops_at_first_error() {
    let mut vars = service_vars();
    vars.set("DEBUG", "yes").set("SAMPLE_RATIO", "4.");

    let err = ServiceEnv::from_source(&vars).unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidBoolean {
            value: "yes".to_string()
        }
    );
}

#[test]
fn typed_snapshot_array_item_error() {
    let mut vars = service_vars();
    vars.set("ALLOWED_PORTS", "80,http");

    let err = ServiceEnv::from_source(&vars).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"Invalid integer: "http""#);
}

#[test]
fn typed_snapshot_variable_names() {
    insta::assert_debug_snapshot!(ServiceEnv::VARIABLES, @r#"
    [
        "PORT",
        "DEBUG",
        "SAMPLE_RATIO",
        "NODE_ENV",
        "INSTANCE_ID",
        "LIMITS",
        "ALLOWED_PORTS",
        "SEARCH_PATH",
        "MOTD",
    ]
    "#);
}

// =============================================================================
// Dynamic snapshots
// =============================================================================

fn build(vars: &[(&str, &str)]) -> Result<Snapshot, ParseError> {
    EnvironmentBuilder::with_source(source(vars))
        .var("PORT", parse_as_int)
        .var("DEBUG", parse_as_bool)
        .var("STARTED", parse_as_date)
        .build()
}

#[test]
fn snapshot_holds_parsed_values() {
    let snapshot = build(&[
        ("PORT", "8080"),
        ("DEBUG", "0"),
        ("STARTED", "2025-08-01T12:00:00+02:00"),
    ])
    .unwrap();

    assert_eq!(snapshot.get_as::<i64>("PORT"), Ok(8080));
    assert_eq!(snapshot.get_as::<bool>("DEBUG"), Ok(false));
    insta::assert_snapshot!(snapshot.get("STARTED").unwrap().to_string(), @"2025-08-01T12:00:00+02:00");
}

#[test]
fn snapshot_build_is_all_or_nothing() {
    let result = build(&[("PORT", "8080"), ("DEBUG", "2"), ("STARTED", "2025")]);
    assert_eq!(
        result,
        Err(ParseError::InvalidBoolean {
            value: "2".to_string()
        })
    );
}

#[test]
fn snapshot_is_shared_across_threads() {
    let snapshot = build(&[("PORT", "1"), ("DEBUG", "1"), ("STARTED", "2025-01")]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let snapshot = snapshot.clone();
            std::thread::spawn(move || snapshot.get_as::<i64>("PORT"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(1));
    }
}

#[test]
fn snapshot_from_process_environment() {
    // SAFETY: the variable name is unique to this test binary.
    unsafe { std::env::set_var("EKIT_SNAPSHOT_PORT", "8080") };

    let snapshot = Registry::new()
        .with("EKIT_SNAPSHOT_PORT", parse_as_int)
        .with("EKIT_SNAPSHOT_MISSING", parse_as_string)
        .snapshot(&ProcessEnv::without_dotenv())
        .unwrap();

    // SAFETY: as above.
    unsafe { std::env::set_var("EKIT_SNAPSHOT_PORT", "9090") };

    assert_eq!(snapshot.get("EKIT_SNAPSHOT_PORT"), Some(&EnvValue::Int(8080)));
    assert_eq!(
        snapshot.get_as::<String>("EKIT_SNAPSHOT_MISSING").unwrap(),
        ""
    );
}

// =============================================================================
// Parser set
// =============================================================================

#[test]
fn parsers_boolean_literals() {
    for raw in ["1", "true", "TRUE", "TrUe"] {
        assert_eq!(parse_as_bool(raw), Ok(true), "{raw}");
    }
    for raw in ["0", "false", "FALSE", "FaLsE"] {
        assert_eq!(parse_as_bool(raw), Ok(false), "{raw}");
    }
    for raw in ["", "yes", "2"] {
        assert!(parse_as_bool(raw).is_err(), "{raw}");
    }
}

#[test]
fn parsers_integer_shapes() {
    assert_eq!(parse_as_int("-42"), Ok(-42));
    for raw in ["12.5", "+10", "--5", ""] {
        assert!(parse_as_int(raw).is_err(), "{raw}");
    }
}

#[test]
fn parsers_array_matches_csv_then_map() {
    let raw = " 1, 2 ,3";
    let via_csv: Result<Vec<i64>, ParseError> = parse_as_csv(raw)
        .unwrap()
        .iter()
        .map(String::as_str)
        .map(parse_as_int)
        .collect();
    assert_eq!(parse_as_array(raw, parse_as_int), via_csv);
    assert_eq!(parse_as_array("1,2,3", parse_as_int), Ok(vec![1, 2, 3]));
}

#[test]
fn parsers_json_shape_mismatch() {
    let err = parse_as_json::<Limits>(r#"{"max_connections": "many"}"#).unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON: "), "{err}");
}

#[test]
fn validators_guid_segments() {
    assert!(Validator::is_guid("123e4567-e89b-12d3-a456-426614174000"));
    assert!(!Validator::is_guid("invalid-guid"));
    assert!(!Validator::is_guid("123e4567-e89b-12d3-a456-42661417400"));
    assert!(!Validator::is_guid("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"));
}
