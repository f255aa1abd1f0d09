//! Path capability → ID capability conversion.

mod mapping;


pub use mapping::{CapabilityMapping, CapabilityMappingBuilder, CapabilityTarget};

use crate::{
    migration::{MigrationError, ValueMigration},
    obs::Reporter,
    storage::{StorageKey, StorageMapKey},
    ty::{ReferenceType, Type},
    value::{Capability, IdCapability, Value},
};
use std::sync::Arc;

///
/// CapabilityValueMigration
///
/// Rewrites every path capability that has a controller in the mapping.
/// Capabilities without one are reported and left in place.
///

#[derive(Clone, Debug)]
pub struct CapabilityValueMigration {
    mapping: Arc<CapabilityMapping>,
}

impl CapabilityValueMigration {
    pub const NAME: &'static str = "CapabilityValueMigration";

    #[must_use]
    pub const fn new(mapping: Arc<CapabilityMapping>) -> Self {
        Self { mapping }
    }

    #[must_use]
    pub fn mapping(&self) -> &CapabilityMapping {
        &self.mapping
    }
}

impl ValueMigration for CapabilityValueMigration {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn migrate(
        &self,
        storage_key: &StorageKey,
        _: &StorageMapKey,
        value: &Value,
        reporter: &dyn Reporter,
    ) -> Result<Option<Value>, MigrationError> {
        let Value::Capability(Capability::Path(capability)) = value else {
            return Ok(None);
        };

        let address_path = capability.address_path();
        let Some(target) = self.mapping.get(&address_path) else {
            reporter.missing_capability_id(storage_key.address, &address_path);
            return Ok(None);
        };

        let borrow_type = capability
            .borrow_type
            .as_ref()
            .unwrap_or(&target.borrow_type);

        let Type::Reference(reference) = borrow_type else {
            return Err(MigrationError::NonReferenceBorrowType {
                address_path,
                borrow_type: borrow_type.clone(),
            });
        };

        // the account type upgrade widens every legacy account reference
        let reference = if reference.references_legacy_account() {
            ReferenceType::fully_entitled_account()
        } else {
            reference.clone()
        };
        let borrow_type = Type::Reference(reference);

        reporter.migrated_path_capability(storage_key.address, &address_path, &borrow_type);

        Ok(Some(Value::Capability(Capability::Id(IdCapability::new(
            target.id,
            capability.address,
            borrow_type,
        )))))
    }
}
