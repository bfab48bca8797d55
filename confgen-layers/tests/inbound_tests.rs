//! Inbound validation boundary: untrusted pairs against a key table.

use confgen_layers::{store_inbound, ConfigStore, LayerError, LayerRead};
use confgen_types::{KeyTable, TransportType, TransportValue};

fn sync_table() -> KeyTable {
    let mut t = KeyTable::new();
    t.insert("BlockUSBMount", TransportType::Number);
    t.insert("AllowedPathRegex", TransportType::Regex);
    t.insert("FullSyncLastSuccess", TransportType::Date);
    t
}

#[test]
fn accepted_pair_is_stored() {
    let store = ConfigStore::new();
    store_inbound(
        &store.sync,
        &sync_table(),
        "BlockUSBMount",
        TransportValue::Number(1.into()),
    )
    .unwrap();
    assert_eq!(
        store.sync.get("BlockUSBMount"),
        Some(TransportValue::Number(1.into()))
    );
}

#[test]
fn unknown_key_is_rejected_and_not_stored() {
    let store = ConfigStore::new();
    let err = store_inbound(
        &store.sync,
        &sync_table(),
        "EventLogPath",
        TransportValue::String("/tmp/x".into()),
    )
    .unwrap_err();
    assert!(matches!(err, LayerError::UnknownKey { key } if key == "EventLogPath"));
    assert!(store.sync.snapshot().is_empty());
}

#[test]
fn transport_type_mismatch_is_rejected() {
    let store = ConfigStore::new();
    let err = store_inbound(
        &store.sync,
        &sync_table(),
        "AllowedPathRegex",
        TransportValue::Number(5.into()),
    )
    .unwrap_err();
    match err {
        LayerError::TypeMismatch {
            key,
            expected,
            found,
        } => {
            assert_eq!(key, "AllowedPathRegex");
            assert_eq!(expected, TransportType::Regex);
            assert_eq!(found, TransportType::Number);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
    assert!(store.sync.snapshot().is_empty());
}

#[test]
fn update_sync_state_writes_only_the_sync_layer() {
    let store = ConfigStore::new();
    store.update_sync_state("ClientMode", TransportValue::Number(2.into()));
    assert_eq!(
        store.sync.get("ClientMode"),
        Some(TransportValue::Number(2.into()))
    );
    assert!(store.config.snapshot().is_empty());
}
