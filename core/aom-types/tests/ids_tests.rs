use aom_types::{PostStatus, RecordId, absint};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── RecordId ──────────────────────────────────────────────────────

#[test]
fn record_id_rejects_zero() {
    assert!(RecordId::new(0).is_none());
}

#[test]
fn record_id_roundtrips_raw_value() {
    let id = RecordId::new(42).unwrap();
    assert_eq!(id.get(), 42);
    assert_eq!(u64::from(id), 42);
}

#[test]
fn record_id_display_and_parse() {
    let id = RecordId::new(1234).unwrap();
    let parsed = RecordId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn record_id_parse_invalid() {
    assert!(RecordId::from_str("not-a-number").is_err());
    assert!(RecordId::from_str("0").is_err());
    assert!(RecordId::from_str("-3").is_err());
}

#[test]
fn record_id_from_input_coerces() {
    assert_eq!(RecordId::from_input("7").map(|id| id.get()), Some(7));
    assert_eq!(RecordId::from_input("7 rabbits").map(|id| id.get()), Some(7));
    assert!(RecordId::from_input("rabbits").is_none());
    assert!(RecordId::from_input("-7").is_none());
}

#[test]
fn record_id_hash_and_eq() {
    let id = RecordId::new(5).unwrap();
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id);
    assert_eq!(set.len(), 1);
}

#[test]
fn record_id_serializes_as_number() {
    let id = RecordId::new(9).unwrap();
    assert_eq!(serde_json::to_string(&id).unwrap(), "9");
    let parsed: RecordId = serde_json::from_str("9").unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn record_id_deserialize_zero_fails() {
    assert!(serde_json::from_str::<RecordId>("0").is_err());
}

// ── PostStatus ────────────────────────────────────────────────────

#[test]
fn only_publish_is_public() {
    for status in PostStatus::ALL {
        assert_eq!(status.is_public(), status == PostStatus::Publish, "{status}");
    }
}

#[test]
fn status_parse_roundtrip() {
    for status in PostStatus::ALL {
        assert_eq!(PostStatus::from_str(status.as_str()).unwrap(), status);
    }
}

#[test]
fn status_parse_unknown() {
    assert!(PostStatus::from_str("published").is_err());
}

#[test]
fn status_serde_uses_host_names() {
    let json = serde_json::to_string(&PostStatus::AutoDraft).unwrap();
    assert_eq!(json, "\"auto-draft\"");
    let parsed: PostStatus = serde_json::from_str("\"publish\"").unwrap();
    assert_eq!(parsed, PostStatus::Publish);
}

// ── absint properties ────────────────────────────────────────────

proptest! {
    #[test]
    fn absint_matches_plain_parse(n in 0u64..u64::MAX) {
        prop_assert_eq!(absint(&n.to_string()), n);
    }

    #[test]
    fn absint_negative_is_zero(n in 1u64..u64::MAX) {
        prop_assert_eq!(absint(&format!("-{n}")), 0);
    }

    #[test]
    fn absint_ignores_trailing_garbage(n in 0u64..1_000_000, tail in "[a-z ]{0,8}") {
        prop_assert_eq!(absint(&format!("{n}{tail}")), n);
    }
}
