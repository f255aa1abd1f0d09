use super::*;
use crate::{
    migration::MigrationFailure,
    ty::Type,
    types::Address,
    value::{AddressPath, Path, PathDomain},
};
use rayon::prelude::*;

const OWNER: Address = Address::from_u64(0x0a);

fn address_path() -> AddressPath {
    AddressPath::new(OWNER, Path::new(PathDomain::Public, "receiver"))
}

fn failure() -> MigrationFailure {
    MigrationFailure {
        address: OWNER,
        domain: PathDomain::Storage,
        identifier: "vault".into(),
        migration: "Test".into(),
        message: "boom".into(),
    }
}

fn drive(reporter: &dyn Reporter) {
    reporter.report(OWNER, PathDomain::Storage, "vault");
    reporter.migrated_path_capability(
        OWNER,
        &address_path(),
        &Type::fully_entitled_account_reference(),
    );
    reporter.missing_capability_id(OWNER, &address_path());
    reporter.failure(&failure());
}

#[test]
fn recording_reporter_keeps_arrival_order() {
    let reporter = RecordingReporter::new();
    drive(&reporter);

    assert_eq!(
        reporter.events(),
        [
            ReportEvent::Entry {
                address: OWNER,
                domain: PathDomain::Storage,
                identifier: "vault".into(),
            },
            ReportEvent::PathCapability {
                address: OWNER,
                address_path: address_path(),
                borrow_type: Type::fully_entitled_account_reference(),
            },
            ReportEvent::MissingCapabilityId {
                address: OWNER,
                address_path: address_path(),
            },
            ReportEvent::Failure(failure()),
        ]
    );
}

#[test]
fn counting_reporter_counts_each_method() {
    let reporter = CountingReporter::new();
    drive(&reporter);
    drive(&reporter);

    assert_eq!(
        reporter.counts(),
        ReportCounts {
            entries: 2,
            capabilities: 2,
            missing: 2,
            failures: 2,
        }
    );
}

#[test]
fn reporters_tolerate_concurrent_workers() {
    let counter = CountingReporter::new();
    let recorder = RecordingReporter::new();

    (0..64u64).into_par_iter().for_each(|n| {
        let owner = Address::from_u64(n);
        counter.report(owner, PathDomain::Private, "x");
        recorder.report(owner, PathDomain::Private, "x");
    });

    assert_eq!(counter.counts().entries, 64);
    assert_eq!(recorder.len(), 64);
}

#[test]
fn noop_and_tracing_reporters_accept_every_event() {
    drive(&NoopReporter);
    drive(&TracingReporter);
}
