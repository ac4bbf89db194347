use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = JournalEntryId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_is_time_ordered() {
    let first = JournalEntryId::new();
    let second = JournalEntryId::new();
    assert!(first <= second);
    assert_eq!(first.into_inner().get_version_num(), 7);
}

#[test]
fn test_typed_id_uuid_conversions() {
    let uuid = Uuid::new_v4();
    let id = ClosingBatchId::from(uuid);
    assert_eq!(id.into_inner(), uuid);
    assert_eq!(Uuid::from(id), uuid);
    assert_eq!(ClosingBatchId::from_uuid(uuid), id);
}

#[test]
fn test_typed_id_display_and_parse() {
    let uuid = Uuid::new_v4();
    let id = JournalLineId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
    assert_eq!(JournalLineId::from_str(&uuid.to_string()).unwrap(), id);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(ClosingStatusId::from_str("not-a-uuid").is_err());
}
