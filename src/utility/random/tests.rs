// envkit: typed environment snapshots
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{DEFAULT_INT_RANGE, RandomGenerator};
use crate::validator::Validator;

#[test]
fn test_pick() {
    let mut random = RandomGenerator::seeded(7);
    let suits = ['♠', '♥', '♦', '♣'];
    for _ in 0..50 {
        let card = random.pick(&suits).unwrap();
        assert!(suits.contains(card));
    }
    assert_eq!(random.pick::<u8>(&[]), None);
}

#[test]
fn test_int_stays_in_range() {
    let mut random = RandomGenerator::new();
    for _ in 0..200 {
        let roll = random.int(1, 6).unwrap();
        assert!((1..=6).contains(&roll));
    }
    assert_eq!(random.int(5, 5), Some(5));
    assert_eq!(random.int(6, 1), None);
    assert!(DEFAULT_INT_RANGE.contains(&random.default_int()));
}

#[test]
fn test_string_is_alphanumeric() {
    let mut random = RandomGenerator::new();
    let value = random.string(8);
    assert_eq!(value.len(), 8);
    assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(random.string(0).is_empty());
}

#[test]
fn test_bool_produces_both_values() {
    let mut random = RandomGenerator::seeded(42);
    let values: Vec<bool> = (0..100).map(|_| random.bool()).collect();
    assert!(values.contains(&true));
    assert!(values.contains(&false));
}

#[test]
fn test_guid_is_valid_v4() {
    let mut random = RandomGenerator::new();
    for _ in 0..20 {
        let guid = random.guid().unwrap();
        assert!(Validator::is_guid(guid.as_str()), "{guid}");
        assert_eq!(&guid.as_str()[14..15], "4");
        assert!(matches!(&guid.as_str()[19..20], "8" | "9" | "a" | "b"));
    }
}

#[test]
fn test_seeded_is_deterministic() {
    let mut a = RandomGenerator::seeded(1);
    let mut b = RandomGenerator::seeded(1);
    assert_eq!(a.string(16), b.string(16));
    assert_eq!(a.guid().unwrap(), b.guid().unwrap());
}
