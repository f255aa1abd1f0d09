//! Core runtime for stowage: the value and type model, the canonical JSON
//! interchange codec, account storage, and the in-place migration engine.

// public exports are one module level down
pub mod budget;
pub mod config;
pub mod dump;
pub mod error;
pub mod interchange;
pub mod migration;
pub mod obs;
pub mod storage;
pub mod ty;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Domain vocabulary for integrators wiring a migration run.
/// Errors and reporters stay in their modules.
///

pub mod prelude {
    pub use crate::{
        config::MigrationConfig,
        migration::{
            MigrationEngine, MigrationSummary, ValueMigration,
            capability::{CapabilityMapping, CapabilityValueMigration},
        },
        storage::{MemoryStorage, Storage, StorageKey, StorageMapKey},
        ty::{Type, TypeId},
        types::Address,
        value::{Capability, Composite, Path, PathDomain, Value},
    };
}
