use crate::{
    error::InternalError,
    obs::Reporter,
    storage::{Storage, StorageKey, StorageMapKey},
    types::Address,
    value::{PathDomain, Value},
};

///
/// AccountStorage
///
/// One account's view over a `Storage`. Walks the account's domain maps
/// and writes converter replacements back in place.
///

pub struct AccountStorage<'s, S: Storage + ?Sized> {
    storage: &'s mut S,
    address: Address,
}

impl<'s, S: Storage + ?Sized> AccountStorage<'s, S> {
    pub const fn new(storage: &'s mut S, address: Address) -> Self {
        Self { storage, address }
    }

    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Visit every stored value of `domains` in map order.
    ///
    /// A `Some` from `converter` overwrites the entry under the same
    /// identifier and is reported. The walk is driven by a key cursor, so
    /// a write for the current entry never disturbs the remaining order.
    /// Returns the number of entries written.
    pub fn for_each_value<E, F>(
        &mut self,
        domains: &[PathDomain],
        mut converter: F,
        reporter: &dyn Reporter,
    ) -> Result<usize, E>
    where
        E: From<InternalError>,
        F: FnMut(&StorageKey, &StorageMapKey, &Value) -> Result<Option<Value>, E>,
    {
        let mut written = 0;

        for &domain in domains {
            let storage_key = StorageKey::new(self.address, domain);
            let mut cursor: Option<String> = None;

            loop {
                let Some(map) = self.storage.domain_map(self.address, domain)? else {
                    break;
                };
                let Some(identifier) = map.next_key_after(cursor.as_deref()) else {
                    break;
                };

                let map_key = StorageMapKey::new(identifier);
                let value = map.get(map_key.as_str()).ok_or_else(|| {
                    InternalError::storage_not_found(format!("{storage_key}/{map_key}"))
                })?;

                if let Some(replacement) = converter(&storage_key, &map_key, value)? {
                    let map = self
                        .storage
                        .domain_map_mut(self.address, domain, false)?
                        .ok_or_else(|| {
                            InternalError::storage_internal(format!(
                                "domain map {storage_key} disappeared during traversal"
                            ))
                        })?;

                    map.set_value(map_key.as_str(), replacement);
                    reporter.report(self.address, domain, map_key.as_str());
                    written += 1;
                }

                cursor = Some(map_key.0);
            }
        }

        Ok(written)
    }
}
