use crate::{
    ty::Type,
    types::Address,
    value::{AddressPath, Path},
};
use std::{collections::BTreeMap, sync::Arc};

///
/// CapabilityTarget
///
/// The controller a legacy path capability resolves to.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapabilityTarget {
    pub id: u64,
    pub borrow_type: Type,
}

///
/// CapabilityMapping
///
/// Frozen `(address, path) → controller` lookup. Only a builder can
/// write to it, so workers sharing the `Arc` never observe a mutation.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CapabilityMapping {
    targets: BTreeMap<AddressPath, CapabilityTarget>,
}

impl CapabilityMapping {
    #[must_use]
    pub fn builder() -> CapabilityMappingBuilder {
        CapabilityMappingBuilder::default()
    }

    #[must_use]
    pub fn get(&self, address_path: &AddressPath) -> Option<&CapabilityTarget> {
        self.targets.get(address_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

///
/// CapabilityMappingBuilder
///

#[derive(Debug, Default)]
pub struct CapabilityMappingBuilder {
    targets: BTreeMap<AddressPath, CapabilityTarget>,
}

impl CapabilityMappingBuilder {
    /// Record the controller for `path` on `address`. A later record for the
    /// same key replaces the earlier one.
    pub fn record(
        &mut self,
        address: Address,
        path: Path,
        id: u64,
        borrow_type: Type,
    ) -> &mut Self {
        self.targets.insert(
            AddressPath::new(address, path),
            CapabilityTarget { id, borrow_type },
        );
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<CapabilityMapping> {
        Arc::new(CapabilityMapping {
            targets: self.targets,
        })
    }
}
