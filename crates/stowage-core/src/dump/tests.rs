use super::*;
use crate::{
    budget::{MemoryBudget, Unmetered},
    config::MigrationConfig,
    storage::MemoryStorage,
    ty::{Location, TypeId},
    types::Address,
    value::{Composite, CompositeKind, PathDomain, Value},
};
use serde_json::json;

const OWNER: Address = Address::from_u64(0x0102);

fn line(parts: &[&[u8]], data: &[u8]) -> String {
    let parts: Vec<_> = parts
        .iter()
        .map(|part| json!({ "Value": hex::encode(part) }))
        .collect();

    json!({ "Key": { "KeyParts": parts }, "Value": hex::encode(data) }).to_string()
}

fn path_key(domain: &str, identifier: &str) -> Vec<u8> {
    format!("{domain}\u{1f}{identifier}").into_bytes()
}

fn token(kind: CompositeKind, fields: Vec<(String, Value)>) -> Value {
    Value::Composite(Composite::new(
        kind,
        TypeId::new(
            Some(Location::for_address(OWNER, "Token.Vault")),
            "Token.Vault".into(),
        ),
        fields,
    ))
}

//
// Reading
//

#[test]
fn reader_keeps_non_empty_registers() {
    let owner = OWNER.to_array();
    let input = [
        line(&[&owner, b"", b"storage\x1fa"], b"{}"),
        String::new(),
        line(&[&owner, b"", b"storage\x1fb"], b""),
        line(&[&owner, b"", b"$\0\0\0\0\0\0\0\x01", b"extra"], b"\x01"),
    ]
    .join("\n");

    let mut store = DumpStore::new();
    let report = DumpReader::new()
        .read(input.as_bytes(), &mut store)
        .expect("read");

    assert_eq!(
        report,
        ReadReport {
            lines: 3,
            kept: 2,
            filtered: 0,
            empty: 1,
        }
    );
    assert_eq!(
        store.get(&RegisterKey::new(owner.to_vec(), Vec::new(), b"storage\x1fa".to_vec())),
        Some(&b"{}"[..])
    );
}

#[test]
fn reader_filters_by_owner() {
    let other = Address::from_u64(9).to_array();
    let input = [
        line(&[&OWNER.to_array(), b"", b"k"], b"\x01"),
        line(&[&other, b"", b"k"], b"\x02"),
    ]
    .join("\n");

    let mut store = DumpStore::new();
    let report = DumpReader::new()
        .with_addresses([OWNER])
        .read(input.as_bytes(), &mut store)
        .expect("read");

    assert_eq!(report.kept, 1);
    assert_eq!(report.filtered, 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn reader_rejects_short_keys() {
    let input = format!("{}\n{}", line(&[b"a", b"", b"k"], b"\x01"), line(&[b"a", b""], b"\x01"));

    let err = DumpReader::new()
        .read(input.as_bytes(), &mut DumpStore::new())
        .expect_err("two parts");

    assert!(matches!(err, DumpError::KeyParts { line: 2, count: 2 }));
    assert_eq!(err.class(), crate::error::ErrorClass::Corruption);
}

#[test]
fn reader_rejects_bad_hex_and_json() {
    let bad_hex = r#"{"Key":{"KeyParts":[{"Value":"zz"},{"Value":""},{"Value":""}]},"Value":"00"}"#;
    let err = DumpReader::new()
        .read(bad_hex.as_bytes(), &mut DumpStore::new())
        .expect_err("bad hex");
    assert!(matches!(err, DumpError::InvalidHex { line: 1, .. }));

    let err = DumpReader::new()
        .read(&b"{\"Key\":"[..], &mut DumpStore::new())
        .expect_err("bad json");
    assert!(matches!(err, DumpError::MalformedEntry { line: 1, .. }));
}

//
// Loading
//

#[test]
fn load_decodes_storage_paths_and_counts_the_rest() {
    let owner = OWNER.as_bytes().to_vec();
    let vault = token(
        CompositeKind::Resource,
        vec![("uuid".into(), Value::UInt64(1))],
    );
    let broken = token(CompositeKind::Resource, vec![("uuid".into(), Value::UInt8(1))]);

    let mut store = DumpStore::new();
    let mut put = |key: Vec<u8>, value: &[u8]| {
        store.insert(RegisterKey::new(owner.clone(), Vec::new(), key), value.to_vec());
    };
    put(path_key("storage", "vault"), &crate::interchange::encode(&vault).expect("encode"));
    put(path_key("public", "broken"), &crate::interchange::encode(&broken).expect("encode"));
    put(path_key("private", "garbage"), b"not json");
    put(path_key("secret", "x"), b"{}");
    put(b"$\0\0\0\0\0\0\0\x02".to_vec(), b"slab bytes");
    put(b"contract_names".to_vec(), b"\x80");

    let (storage, report) = store.load(&Unmetered);

    assert_eq!(
        report,
        LoadReport {
            values: 2,
            slabs: 1,
            skipped: 2,
            failures: 1,
            missing_uuid: 1,
        }
    );
    assert_eq!(storage.get(OWNER, PathDomain::Storage, "vault"), Some(&vault));
    assert_eq!(storage.get(OWNER, PathDomain::Public, "broken"), Some(&broken));
}

#[test]
fn load_budget_failures_are_counted_not_fatal() {
    let mut source = MemoryStorage::new();
    source.insert(
        OWNER,
        PathDomain::Storage,
        "list",
        Value::Array((0..50u8).map(Value::UInt8).collect()),
    );
    let store = DumpStore::from_storage(&source).expect("encode");

    let (storage, report) = store.load(&MemoryBudget::new(10));

    assert_eq!(report.failures, 1);
    assert!(storage.is_empty());
}

#[test]
fn configured_memory_limit_applies_per_register() {
    let mut source = MemoryStorage::new();
    for identifier in ["a", "b", "c"] {
        source.insert(
            OWNER,
            PathDomain::Storage,
            identifier,
            Value::Array((0..4u8).map(Value::UInt8).collect()),
        );
    }
    source.insert(
        OWNER,
        PathDomain::Storage,
        "list",
        Value::Array((0..50u8).map(Value::UInt8).collect()),
    );
    let store = DumpStore::from_storage(&source).expect("encode");

    let config = MigrationConfig::default().with_memory_limit(20);
    let (storage, report) = store.load_with_config(&config);
    assert_eq!(report.values, 3);
    assert_eq!(report.failures, 1);
    assert!(storage.get(OWNER, PathDomain::Storage, "list").is_none());

    let (_, report) = store.load_with_config(&MigrationConfig::default());
    assert_eq!(report.values, 4);
    assert_eq!(report.failures, 0);
}

#[test]
fn storage_round_trips_through_a_dump() {
    let mut source = MemoryStorage::new();
    source.insert(OWNER, PathDomain::Storage, "n", Value::UInt64(7));
    source.insert(OWNER, PathDomain::Public, "s", Value::from("hello"));
    source.insert(
        Address::from_u64(3),
        PathDomain::Private,
        "vault",
        token(CompositeKind::Resource, vec![("uuid".into(), Value::UInt64(2))]),
    );

    let mut bytes = Vec::new();
    let written = DumpStore::from_storage(&source)
        .expect("encode")
        .write_entries(&mut bytes)
        .expect("write");
    assert_eq!(written, 3);

    let mut store = DumpStore::new();
    DumpReader::new()
        .read(bytes.as_slice(), &mut store)
        .expect("read");
    let (loaded, report) = store.load(&Unmetered);

    assert_eq!(report.values, 3);
    assert_eq!(loaded, source);
}

#[test]
fn dump_error_converts_to_internal_error() {
    let err: crate::error::InternalError = DumpError::KeyParts { line: 1, count: 0 }.into();

    assert_eq!(err.origin, crate::error::ErrorOrigin::Dump);
    assert!(err.message.contains("line 1"));
}
