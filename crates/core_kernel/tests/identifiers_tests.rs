//! Tests for strongly-typed identifiers

use core_kernel::{PropertyId, SessionId};
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn test_prefixes() {
    assert_eq!(PropertyId::prefix(), "PRP");
    assert_eq!(SessionId::prefix(), "SES");
}

#[test]
fn test_session_id_display_and_parse() {
    let id = SessionId::new();
    let text = id.to_string();
    assert!(text.starts_with("SES-"));
    assert_eq!(text.parse::<SessionId>().unwrap(), id);
}

#[test]
fn test_invalid_string_is_rejected() {
    assert!("PRP-not-a-uuid".parse::<PropertyId>().is_err());
}

#[test]
fn test_uuid_round_trip() {
    let uuid = Uuid::now_v7();
    let id = PropertyId::from_uuid(uuid);
    assert_eq!(*id.as_uuid(), uuid);
    let back: Uuid = id.into();
    assert_eq!(back, uuid);
}

#[test]
fn test_serde_is_transparent() {
    let id = PropertyId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));
}

#[test]
fn test_many_ids_are_unique() {
    let ids: HashSet<PropertyId> = (0..1_000).map(|_| PropertyId::new()).collect();
    assert_eq!(ids.len(), 1_000);
}
