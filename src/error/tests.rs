// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, EnvkitError, EnvkitResult, ParseError, SnapshotError};

#[test]
fn test_parse_error_display() {
    let err = ParseError::InvalidInteger {
        value: "12.5".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @r#"Invalid integer: "12.5""#);
}

#[test]
fn test_not_allowed_lists_choices() {
    let err = ParseError::NotAllowed {
        value: "qa".to_string(),
        allowed: vec!["dev".to_string(), "pro".to_string()],
    };
    insta::assert_snapshot!(err.to_string(), @r#"Invalid value "qa", allowed: dev, pro"#);
}

#[test]
fn test_parse_error_accessors() {
    let err = ParseError::InvalidBoolean {
        value: "yes".to_string(),
    };
    assert_eq!(err.value(), "yes");
    assert_eq!(err.expected(), "boolean");
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::UnknownKind {
        variable: "PORT".to_string(),
        kind: "integer64".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"unknown parser kind 'integer64' for variable 'PORT'");
}

#[test]
fn test_from_boxes_sub_errors() {
    let err: EnvkitError = SnapshotError::MissingKey {
        key: "PORT".to_string(),
    }
    .into();
    insta::assert_snapshot!(err.to_string(), @"snapshot error: variable 'PORT' is not part of the snapshot");
}

#[test]
fn test_envkit_error_size() {
    // Box<str> variants are a fat pointer; with discriminant that is 24 bytes
    let size = std::mem::size_of::<EnvkitError>();
    assert!(size <= 24, "EnvkitError is {size} bytes, expected <= 24");
}

#[test]
fn test_envkit_result_size() {
    let size = std::mem::size_of::<EnvkitResult<()>>();
    assert!(size <= 24, "EnvkitResult<()> is {size} bytes, expected <= 24");
}
