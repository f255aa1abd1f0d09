//! Account-addressed, domain-partitioned storage view.
//!
//! The persistent store is an external collaborator; this module only
//! defines the boundary (`Storage`) and an in-memory reference store.

mod account;
mod map;
mod memory;

#[cfg(test)]
mod tests;

pub use account::AccountStorage;
pub use map::StorageMap;
pub use memory::MemoryStorage;

use crate::{error::InternalError, types::Address, value::PathDomain};
use std::fmt::{self, Display};

///
/// Storage
///
/// Ordered `(address, domain) → StorageMap` store. Maps are created lazily
/// on first mutable access with `create = true`.
///

pub trait Storage {
    fn domain_map(
        &self,
        address: Address,
        domain: PathDomain,
    ) -> Result<Option<&StorageMap>, InternalError>;

    fn domain_map_mut(
        &mut self,
        address: Address,
        domain: PathDomain,
        create: bool,
    ) -> Result<Option<&mut StorageMap>, InternalError>;

    /// Every address that owns at least one domain map, in order.
    fn accounts(&self) -> Vec<Address>;
}

///
/// StorageKey
///
/// One account domain.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StorageKey {
    pub address: Address,
    pub domain: PathDomain,
}

impl StorageKey {
    #[must_use]
    pub const fn new(address: Address, domain: PathDomain) -> Self {
        Self { address, domain }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.domain)
    }
}

///
/// StorageMapKey
///
/// Identifier of one entry inside a domain map.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StorageMapKey(pub String);

impl StorageMapKey {
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StorageMapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
