use crate::{
    config::MigrationConfig,
    migration::{MigrationError, MigrationFailure, MigrationSummary, ValueMigration},
    obs::Reporter,
    storage::{AccountStorage, MemoryStorage, Storage, StorageKey, StorageMapKey},
    ty::Type,
    types::Address,
    value::{AddressPath, PathDomain, Value},
};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

///
/// MigrationEngine
///
/// Ordered set of value passes applied to account storage. The engine
/// holds no storage and no mutable state, so one instance can drive any
/// number of partitions concurrently.
///

pub struct MigrationEngine {
    config: MigrationConfig,
    migrations: Vec<Box<dyn ValueMigration>>,
}

impl MigrationEngine {
    #[must_use]
    pub fn new(config: MigrationConfig) -> Self {
        Self {
            config,
            migrations: Vec::new(),
        }
    }

    /// Register a pass. Passes run in registration order on every value.
    #[must_use]
    pub fn with_migration(mut self, migration: impl ValueMigration + 'static) -> Self {
        self.migrations.push(Box::new(migration));
        self
    }

    #[must_use]
    pub const fn config(&self) -> &MigrationConfig {
        &self.config
    }

    pub fn migration_names(&self) -> impl Iterator<Item = &str> {
        self.migrations.iter().map(|m| m.name())
    }

    /// Migrate every configured domain of one account.
    pub fn migrate_account<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        address: Address,
        reporter: &dyn Reporter,
    ) -> Result<MigrationSummary, MigrationError> {
        let counter = SummaryReporter::new(reporter);
        let mut failures = Vec::new();

        let migrated = AccountStorage::new(storage, address).for_each_value(
            &self.config.domains,
            |storage_key, map_key, value| {
                self.migrate_entry(storage_key, map_key, value, &counter, &mut failures)
            },
            &counter,
        )?;

        let summary = MigrationSummary {
            migrated: migrated as u64,
            missing: counter.missing(),
            failures,
        };

        tracing::info!(
            %address,
            migrated = summary.migrated,
            missing = summary.missing,
            failures = summary.failures.len(),
            "migrated account"
        );

        Ok(summary)
    }

    /// Migrate `addresses` in order. Stops at the first fatal error; writes
    /// already committed stay in place.
    pub fn run<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        addresses: &[Address],
        reporter: &dyn Reporter,
    ) -> Result<MigrationSummary, MigrationError> {
        let mut summary = MigrationSummary::default();

        for &address in addresses {
            summary.merge(self.migrate_account(storage, address, reporter)?);
        }

        tracing::info!(
            accounts = addresses.len(),
            migrated = summary.migrated,
            missing = summary.missing,
            failures = summary.failures.len(),
            "migration run finished"
        );

        Ok(summary)
    }

    /// Migrate every account the storage knows about.
    pub fn run_all<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        reporter: &dyn Reporter,
    ) -> Result<MigrationSummary, MigrationError> {
        let addresses = storage.accounts();

        self.run(storage, &addresses, reporter)
    }

    /// Split `storage` into disjoint address partitions and migrate them on
    /// the rayon pool. Partitions are merged back into `storage` even when a
    /// worker fails, so committed writes are never lost.
    pub fn run_partitioned(
        &self,
        storage: &mut MemoryStorage,
        parts: usize,
        reporter: &dyn Reporter,
    ) -> Result<MigrationSummary, MigrationError> {
        let partitions = std::mem::take(storage).partition(parts);

        tracing::info!(partitions = partitions.len(), "starting partitioned migration");

        let results: Vec<_> = partitions
            .into_par_iter()
            .map(|mut part| {
                let result = self.run_all(&mut part, reporter);
                (part, result)
            })
            .collect();

        let mut summary = MigrationSummary::default();
        let mut first_error = None;

        for (part, result) in results {
            storage.merge(part);
            match result {
                Ok(part_summary) => summary.merge(part_summary),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(summary),
        }
    }

    // Apply every pass to one stored value. Non-fatal failures are recorded
    // and leave the value as the previous pass produced it.
    fn migrate_entry(
        &self,
        storage_key: &StorageKey,
        map_key: &StorageMapKey,
        value: &Value,
        reporter: &dyn Reporter,
        failures: &mut Vec<MigrationFailure>,
    ) -> Result<Option<Value>, MigrationError> {
        let mut current: Option<Value> = None;

        for migration in &self.migrations {
            let pass = Pass {
                migration: migration.as_ref(),
                storage_key,
                map_key,
                reporter,
            };

            match pass.value(current.as_ref().unwrap_or(value)) {
                Ok(Some(next)) => current = Some(next),
                Ok(None) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    let failure = MigrationFailure {
                        address: storage_key.address,
                        domain: storage_key.domain,
                        identifier: map_key.to_string(),
                        migration: migration.name().to_string(),
                        message: err.to_string(),
                    };
                    reporter.failure(&failure);

                    if self.config.halt_on_first_error {
                        return Err(MigrationError::Halted(failure));
                    }
                    failures.push(failure);
                }
            }
        }

        Ok(current)
    }
}

///
/// Pass
///
/// One migration applied to one stored value tree, children first.
///

struct Pass<'a> {
    migration: &'a dyn ValueMigration,
    storage_key: &'a StorageKey,
    map_key: &'a StorageMapKey,
    reporter: &'a dyn Reporter,
}

impl Pass<'_> {
    fn value(&self, value: &Value) -> Result<Option<Value>, MigrationError> {
        let rebuilt = match value {
            Value::Optional(Some(inner)) => self.value(inner)?.map(Value::some),
            Value::Array(elements) => self.values(elements)?.map(Value::Array),
            Value::Dictionary(entries) => self.entries(entries)?.map(Value::Dictionary),
            Value::Composite(composite) => match self.values(composite.field_values())? {
                Some(values) => {
                    let mut composite = composite.clone();
                    composite.replace_field_values(values)?;
                    Some(Value::Composite(composite))
                }
                None => None,
            },
            _ => None,
        };

        let current = rebuilt.as_ref().unwrap_or(value);
        let migrated = self.migration.migrate(
            self.storage_key,
            self.map_key,
            current,
            self.reporter,
        )?;

        Ok(migrated.or(rebuilt))
    }

    // Unchanged prefixes are only cloned once a later element changes.
    fn values(&self, values: &[Value]) -> Result<Option<Vec<Value>>, MigrationError> {
        let mut out: Option<Vec<Value>> = None;

        for (i, value) in values.iter().enumerate() {
            match (self.value(value)?, out.as_mut()) {
                (Some(next), Some(out)) => out.push(next),
                (Some(next), None) => {
                    let mut rebuilt = Vec::with_capacity(values.len());
                    rebuilt.extend_from_slice(&values[..i]);
                    rebuilt.push(next);
                    out = Some(rebuilt);
                }
                (None, Some(out)) => out.push(value.clone()),
                (None, None) => {}
            }
        }

        Ok(out)
    }

    fn entries(
        &self,
        entries: &[(Value, Value)],
    ) -> Result<Option<Vec<(Value, Value)>>, MigrationError> {
        let mut out: Option<Vec<(Value, Value)>> = None;

        for (i, (key, value)) in entries.iter().enumerate() {
            let next_key = self.value(key)?;
            let next_value = self.value(value)?;

            if out.is_none() && (next_key.is_some() || next_value.is_some()) {
                let mut rebuilt = Vec::with_capacity(entries.len());
                rebuilt.extend_from_slice(&entries[..i]);
                out = Some(rebuilt);
            }

            if let Some(out) = out.as_mut() {
                out.push((
                    next_key.unwrap_or_else(|| key.clone()),
                    next_value.unwrap_or_else(|| value.clone()),
                ));
            }
        }

        Ok(out)
    }
}

///
/// SummaryReporter
///
/// Forwards to the caller's reporter while counting missing mappings for
/// the account summary.
///

struct SummaryReporter<'r> {
    inner: &'r dyn Reporter,
    missing: AtomicU64,
}

impl<'r> SummaryReporter<'r> {
    const fn new(inner: &'r dyn Reporter) -> Self {
        Self {
            inner,
            missing: AtomicU64::new(0),
        }
    }

    fn missing(&self) -> u64 {
        self.missing.load(Ordering::Relaxed)
    }
}

impl Reporter for SummaryReporter<'_> {
    fn report(&self, address: Address, domain: PathDomain, identifier: &str) {
        self.inner.report(address, domain, identifier);
    }

    fn migrated_path_capability(
        &self,
        address: Address,
        address_path: &AddressPath,
        borrow_type: &Type,
    ) {
        self.inner
            .migrated_path_capability(address, address_path, borrow_type);
    }

    fn missing_capability_id(&self, address: Address, address_path: &AddressPath) {
        self.missing.fetch_add(1, Ordering::Relaxed);
        self.inner.missing_capability_id(address, address_path);
    }

    fn failure(&self, failure: &MigrationFailure) {
        self.inner.failure(failure);
    }
}
