use crate::{
    migration::MigrationFailure,
    ty::Type,
    types::Address,
    value::{AddressPath, PathDomain},
};
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

///
/// Reporter
///
/// Observer for migration outcomes. Shared by every worker of a
/// partitioned run, so all methods take `&self`.
///

pub trait Reporter: Send + Sync {
    /// One entry was rewritten in place.
    fn report(&self, address: Address, domain: PathDomain, identifier: &str);

    /// A path capability was converted into an ID capability.
    fn migrated_path_capability(
        &self,
        address: Address,
        address_path: &AddressPath,
        borrow_type: &Type,
    );

    /// No controller mapping exists for a path capability.
    fn missing_capability_id(&self, address: Address, address_path: &AddressPath);

    /// A migration pass failed for one value.
    fn failure(&self, _failure: &MigrationFailure) {}
}

///
/// NoopReporter
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _: Address, _: PathDomain, _: &str) {}

    fn migrated_path_capability(&self, _: Address, _: &AddressPath, _: &Type) {}

    fn missing_capability_id(&self, _: Address, _: &AddressPath) {}
}

///
/// TracingReporter
///
/// Emits one structured `tracing` event per outcome. No subscriber is
/// installed here.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, address: Address, domain: PathDomain, identifier: &str) {
        tracing::debug!(%address, %domain, identifier, "migrated storage entry");
    }

    fn migrated_path_capability(
        &self,
        address: Address,
        address_path: &AddressPath,
        borrow_type: &Type,
    ) {
        tracing::debug!(
            %address,
            capability = %address_path,
            borrow_type = %borrow_type,
            "migrated path capability"
        );
    }

    fn missing_capability_id(&self, address: Address, address_path: &AddressPath) {
        tracing::warn!(%address, capability = %address_path, "missing capability controller");
    }

    fn failure(&self, failure: &MigrationFailure) {
        tracing::warn!(
            address = %failure.address,
            domain = %failure.domain,
            identifier = %failure.identifier,
            migration = %failure.migration,
            message = %failure.message,
            "value migration failed"
        );
    }
}

///
/// ReportCounts
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReportCounts {
    pub entries: u64,
    pub capabilities: u64,
    pub missing: u64,
    pub failures: u64,
}

///
/// CountingReporter
///
/// Lock-free counters, one per reporter method.
///

#[derive(Debug, Default)]
pub struct CountingReporter {
    entries: AtomicU64,
    capabilities: AtomicU64,
    missing: AtomicU64,
    failures: AtomicU64,
}

impl CountingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn counts(&self) -> ReportCounts {
        ReportCounts {
            entries: self.entries.load(Ordering::Relaxed),
            capabilities: self.capabilities.load(Ordering::Relaxed),
            missing: self.missing.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

impl Reporter for CountingReporter {
    fn report(&self, _: Address, _: PathDomain, _: &str) {
        self.entries.fetch_add(1, Ordering::Relaxed);
    }

    fn migrated_path_capability(&self, _: Address, _: &AddressPath, _: &Type) {
        self.capabilities.fetch_add(1, Ordering::Relaxed);
    }

    fn missing_capability_id(&self, _: Address, _: &AddressPath) {
        self.missing.fetch_add(1, Ordering::Relaxed);
    }

    fn failure(&self, _: &MigrationFailure) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}

///
/// ReportEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReportEvent {
    Entry {
        address: Address,
        domain: PathDomain,
        identifier: String,
    },
    PathCapability {
        address: Address,
        address_path: AddressPath,
        borrow_type: Type,
    },
    MissingCapabilityId {
        address: Address,
        address_path: AddressPath,
    },
    Failure(MigrationFailure),
}

///
/// RecordingReporter
///
/// Keeps every event in arrival order.
///

#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, event: ReportEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, address: Address, domain: PathDomain, identifier: &str) {
        self.push(ReportEvent::Entry {
            address,
            domain,
            identifier: identifier.to_string(),
        });
    }

    fn migrated_path_capability(
        &self,
        address: Address,
        address_path: &AddressPath,
        borrow_type: &Type,
    ) {
        self.push(ReportEvent::PathCapability {
            address,
            address_path: address_path.clone(),
            borrow_type: borrow_type.clone(),
        });
    }

    fn missing_capability_id(&self, address: Address, address_path: &AddressPath) {
        self.push(ReportEvent::MissingCapabilityId {
            address,
            address_path: address_path.clone(),
        });
    }

    fn failure(&self, failure: &MigrationFailure) {
        self.push(ReportEvent::Failure(failure.clone()));
    }
}
