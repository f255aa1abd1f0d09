use crate::{
    error::InternalError,
    storage::{Storage, StorageMap},
    types::Address,
    value::{PathDomain, Value},
};
use std::collections::BTreeMap;

///
/// MemoryStorage
///
/// Caller-owned in-memory store. Can be split into disjoint address
/// partitions for parallel workers and merged back afterwards.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MemoryStorage {
    accounts: BTreeMap<Address, BTreeMap<PathDomain, StorageMap>>,
}

impl MemoryStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// Write one entry, creating the account domain if needed.
    pub fn insert(
        &mut self,
        address: Address,
        domain: PathDomain,
        identifier: impl Into<String>,
        value: Value,
    ) -> Option<Value> {
        self.accounts
            .entry(address)
            .or_default()
            .entry(domain)
            .or_default()
            .set_value(identifier, value)
    }

    #[must_use]
    pub fn get(&self, address: Address, domain: PathDomain, identifier: &str) -> Option<&Value> {
        self.accounts
            .get(&address)
            .and_then(|domains| domains.get(&domain))
            .and_then(|map| map.get(identifier))
    }

    /// Total number of stored entries across all accounts and domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts
            .values()
            .flat_map(BTreeMap::values)
            .map(StorageMap::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(address, domain, identifier, value)` in storage order.
    pub fn entries(&self) -> impl Iterator<Item = (Address, PathDomain, &str, &Value)> {
        self.accounts.iter().flat_map(|(address, domains)| {
            domains.iter().flat_map(move |(domain, map)| {
                map.iter()
                    .map(move |(identifier, value)| (*address, *domain, identifier, value))
            })
        })
    }

    /// Split into at most `parts` stores holding disjoint address sets.
    ///
    /// Addresses are dealt round-robin in order, so partitions stay balanced
    /// by account count.
    #[must_use]
    pub fn partition(self, parts: usize) -> Vec<Self> {
        let parts = parts.clamp(1, self.accounts.len().max(1));
        let mut out = vec![Self::new(); parts];

        for (i, (address, domains)) in self.accounts.into_iter().enumerate() {
            out[i % parts].accounts.insert(address, domains);
        }

        out
    }

    /// Absorb another store. Entries of `other` win on collision.
    pub fn merge(&mut self, other: Self) {
        for (address, domains) in other.accounts {
            let target = self.accounts.entry(address).or_default();
            for (domain, map) in domains {
                let target_map = target.entry(domain).or_default();
                for (identifier, value) in map {
                    target_map.set_value(identifier, value);
                }
            }
        }
    }
}

impl Storage for MemoryStorage {
    fn domain_map(
        &self,
        address: Address,
        domain: PathDomain,
    ) -> Result<Option<&StorageMap>, InternalError> {
        Ok(self
            .accounts
            .get(&address)
            .and_then(|domains| domains.get(&domain)))
    }

    fn domain_map_mut(
        &mut self,
        address: Address,
        domain: PathDomain,
        create: bool,
    ) -> Result<Option<&mut StorageMap>, InternalError> {
        if create {
            return Ok(Some(
                self.accounts
                    .entry(address)
                    .or_default()
                    .entry(domain)
                    .or_default(),
            ));
        }

        Ok(self
            .accounts
            .get_mut(&address)
            .and_then(|domains| domains.get_mut(&domain)))
    }

    fn accounts(&self) -> Vec<Address> {
        self.accounts.keys().copied().collect()
    }
}
