use crate::{
    budget::{MemoryGauge, Unmetered},
    config::MigrationConfig,
    dump::{DumpStore, RegisterKey},
    interchange::{DecodeError, decode_with_gauge},
    storage::MemoryStorage,
    types::Address,
    value::{PathDomain, Value},
};

///
/// LoadReport
///
/// Register counts from one `DumpStore::load`.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    /// Storage path registers decoded into the store.
    pub values: usize,

    pub slabs: usize,

    /// Registers that are neither slabs nor storage paths.
    pub skipped: usize,

    pub failures: usize,

    /// Resources without a `UInt64` `uuid` field.
    pub missing_uuid: usize,
}

impl DumpStore {
    /// Decode every storage path register into a `MemoryStorage`.
    ///
    /// Per-register failures are logged and counted; they never abort the
    /// load.
    pub fn load(&self, gauge: &dyn MemoryGauge) -> (MemoryStorage, LoadReport) {
        self.load_with(|data| decode_with_gauge(data, gauge))
    }

    /// Like [`DumpStore::load`], with `memory_limit` applied to each register
    /// as a fresh budget.
    pub fn load_with_config(&self, config: &MigrationConfig) -> (MemoryStorage, LoadReport) {
        self.load_with(|data| match config.memory_budget() {
            Some(budget) => decode_with_gauge(data, &budget),
            None => decode_with_gauge(data, &Unmetered),
        })
    }

    fn load_with(
        &self,
        mut decode: impl FnMut(&[u8]) -> Result<Value, DecodeError>,
    ) -> (MemoryStorage, LoadReport) {
        let mut storage = MemoryStorage::new();
        let mut report = LoadReport::default();

        for (key, data) in self.iter() {
            if key.is_slab() {
                report.slabs += 1;
                continue;
            }

            let Some((address, domain, identifier)) = storage_path(key) else {
                report.skipped += 1;
                continue;
            };

            let value = match decode(data) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(
                        %address,
                        %domain,
                        identifier,
                        size = data.len(),
                        error = %err,
                        "failed to decode stored value"
                    );
                    report.failures += 1;
                    continue;
                }
            };

            value.inspect(&mut |v| {
                if let Value::Composite(composite) = v
                    && composite.is_resource()
                    && !matches!(composite.field("uuid"), Some(Value::UInt64(_)))
                {
                    tracing::warn!(%address, %domain, identifier, "resource has no UInt64 uuid");
                    report.missing_uuid += 1;
                }
            });

            storage.insert(address, domain, identifier, value);
            report.values += 1;
        }

        tracing::info!(
            values = report.values,
            slabs = report.slabs,
            skipped = report.skipped,
            failures = report.failures,
            missing_uuid = report.missing_uuid,
            "loaded register dump"
        );

        (storage, report)
    }
}

// `(owner, domain, identifier)` of a storage path register, if it is one.
fn storage_path(key: &RegisterKey) -> Option<(Address, PathDomain, &str)> {
    let (domain, identifier) = key.path_parts()?;
    let domain = PathDomain::parse(std::str::from_utf8(domain).ok()?).ok()?;
    let identifier = std::str::from_utf8(identifier).ok()?;
    let address = Address::try_from_slice(&key.owner).ok()?;

    Some((address, domain, identifier))
}
