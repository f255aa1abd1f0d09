use super::*;
use crate::{
    error::InternalError,
    obs::{RecordingReporter, ReportEvent},
    types::Address,
    value::{PathDomain, Value},
};

const ALICE: Address = Address::from_u64(1);
const BOB: Address = Address::from_u64(2);

fn fixture() -> MemoryStorage {
    let mut storage = MemoryStorage::new();

    // an existing but empty public map
    storage
        .domain_map_mut(ALICE, PathDomain::Public, true)
        .expect("create");
    for (identifier, n) in [("a", 1u8), ("b", 2), ("c", 3)] {
        storage.insert(ALICE, PathDomain::Storage, identifier, Value::UInt8(n));
    }

    storage
}

#[test]
fn walk_skips_absent_and_empty_domains() {
    let mut storage = fixture();
    let reporter = RecordingReporter::new();
    let mut seen = Vec::new();

    let written = AccountStorage::new(&mut storage, ALICE)
        .for_each_value::<InternalError, _>(
            &PathDomain::ALL,
            |key, map_key, _| {
                seen.push((key.domain, map_key.to_string()));
                Ok(None)
            },
            &reporter,
        )
        .expect("walk");

    assert_eq!(written, 0);
    assert!(reporter.is_empty());
    assert_eq!(
        seen,
        [
            (PathDomain::Storage, "a".to_string()),
            (PathDomain::Storage, "b".to_string()),
            (PathDomain::Storage, "c".to_string()),
        ]
    );
}

#[test]
fn replacements_are_written_and_walk_continues() {
    let mut storage = fixture();
    let reporter = RecordingReporter::new();
    let mut visited = 0;

    let written = AccountStorage::new(&mut storage, ALICE)
        .for_each_value::<InternalError, _>(
            &[PathDomain::Storage],
            |_, map_key, value| {
                visited += 1;
                Ok(match (map_key.as_str(), value) {
                    ("b", Value::UInt8(n)) => Some(Value::UInt8(n * 10)),
                    _ => None,
                })
            },
            &reporter,
        )
        .expect("walk");

    assert_eq!(written, 1);
    assert_eq!(visited, 3);
    assert_eq!(
        storage.get(ALICE, PathDomain::Storage, "b"),
        Some(&Value::UInt8(20))
    );
    assert_eq!(
        reporter.events(),
        [ReportEvent::Entry {
            address: ALICE,
            domain: PathDomain::Storage,
            identifier: "b".into(),
        }]
    );
}

#[test]
fn converter_error_stops_the_walk() {
    let mut storage = fixture();
    let reporter = RecordingReporter::new();
    let mut visited = Vec::new();

    let err = AccountStorage::new(&mut storage, ALICE)
        .for_each_value(
            &[PathDomain::Storage],
            |_, map_key, _| {
                visited.push(map_key.to_string());
                if map_key.as_str() == "b" {
                    return Err(InternalError::storage_corruption("bad entry"));
                }
                Ok(Some(Value::Void))
            },
            &reporter,
        )
        .expect_err("walk aborts");

    assert_eq!(err.message, "bad entry");
    assert_eq!(visited, ["a", "b"]);
    assert_eq!(reporter.len(), 1);
    assert_eq!(
        storage.get(ALICE, PathDomain::Storage, "c"),
        Some(&Value::UInt8(3))
    );
}

#[test]
fn next_key_after_is_strict() {
    let map: StorageMap = [("a", 1u8), ("c", 3)]
        .into_iter()
        .map(|(k, n)| (k.to_string(), Value::UInt8(n)))
        .collect();

    assert_eq!(map.next_key_after(None), Some("a"));
    assert_eq!(map.next_key_after(Some("a")), Some("c"));
    assert_eq!(map.next_key_after(Some("b")), Some("c"));
    assert_eq!(map.next_key_after(Some("c")), None);
}

#[test]
fn partition_and_merge_preserve_every_entry() {
    let mut storage = fixture();
    storage.insert(BOB, PathDomain::Private, "x", Value::Bool(true));
    storage.insert(Address::from_u64(3), PathDomain::Public, "y", Value::Void);

    let original = storage.clone();
    let parts = storage.partition(2);

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].accounts(), [ALICE, Address::from_u64(3)]);
    assert_eq!(parts[1].accounts(), [BOB]);

    let mut merged = MemoryStorage::new();
    for part in parts {
        merged.merge(part);
    }
    assert_eq!(merged, original);
}

#[test]
fn partition_never_returns_zero_parts() {
    assert_eq!(MemoryStorage::new().partition(0).len(), 1);
    assert_eq!(fixture().partition(8).len(), 1);
}

#[test]
fn domain_map_mut_creates_only_on_request() {
    let mut storage = MemoryStorage::new();

    assert!(
        storage
            .domain_map_mut(BOB, PathDomain::Storage, false)
            .expect("lookup")
            .is_none()
    );
    assert!(
        storage
            .domain_map_mut(BOB, PathDomain::Storage, true)
            .expect("create")
            .is_some()
    );
    assert_eq!(storage.accounts(), [BOB]);
    assert!(storage.is_empty());
}

#[test]
fn every_replacement_is_reported_under_its_identifier() {
    let mut storage = fixture();
    let reporter = RecordingReporter::new();

    let written = AccountStorage::new(&mut storage, ALICE)
        .for_each_value::<InternalError, _>(
            &[PathDomain::Public, PathDomain::Storage],
            |_, _, _| Ok(Some(Value::Void)),
            &reporter,
        )
        .expect("walk");

    let identifiers: Vec<_> = reporter
        .events()
        .into_iter()
        .map(|event| match event {
            ReportEvent::Entry {
                domain, identifier, ..
            } => (domain, identifier),
            other => panic!("unexpected event {other:?}"),
        })
        .collect();

    assert_eq!(written, 3);
    assert_eq!(
        identifiers,
        [
            (PathDomain::Storage, "a".to_string()),
            (PathDomain::Storage, "b".to_string()),
            (PathDomain::Storage, "c".to_string()),
        ]
    );
}
