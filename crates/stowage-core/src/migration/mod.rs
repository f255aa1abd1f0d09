//! In-place storage migration.
//!
//! A `MigrationEngine` walks account storage and hands every stored value,
//! nested values first, to each registered `ValueMigration` pass.

pub mod capability;
mod engine;


pub use engine::MigrationEngine;

use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    obs::Reporter,
    storage::{StorageKey, StorageMapKey},
    ty::Type,
    types::Address,
    value::{AddressPath, FieldCountMismatch, PathDomain, Value},
};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// ValueMigration
///
/// One rewrite pass. Returning `Ok(None)` leaves the value untouched.
///

pub trait ValueMigration: Send + Sync {
    fn name(&self) -> &str;

    fn migrate(
        &self,
        storage_key: &StorageKey,
        map_key: &StorageMapKey,
        value: &Value,
        reporter: &dyn Reporter,
    ) -> Result<Option<Value>, MigrationError>;
}

///
/// MigrationError
///

#[derive(Debug, ThisError)]
pub enum MigrationError {
    #[error("capability {address_path} has non-reference borrow type {borrow_type}")]
    NonReferenceBorrowType {
        address_path: AddressPath,
        borrow_type: Type,
    },

    #[error("{0}")]
    Failed(String),

    #[error("migration invariant violated: {0}")]
    Invariant(String),

    #[error("migration halted: {0}")]
    Halted(MigrationFailure),

    #[error(transparent)]
    Storage(#[from] InternalError),
}

impl MigrationError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Fatal errors abort the run. Everything else is recorded per value.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NonReferenceBorrowType { .. } => ErrorClass::Corruption,
            Self::Failed(_) | Self::Halted(_) => ErrorClass::Internal,
            Self::Invariant(_) => ErrorClass::InvariantViolation,
            Self::Storage(err) => err.class,
        }
    }
}

impl From<FieldCountMismatch> for MigrationError {
    fn from(err: FieldCountMismatch) -> Self {
        Self::Invariant(err.to_string())
    }
}

impl From<MigrationError> for InternalError {
    fn from(err: MigrationError) -> Self {
        match err {
            MigrationError::Storage(err) => err,
            err => Self::new(err.class(), ErrorOrigin::Migration, err.to_string()),
        }
    }
}

///
/// MigrationFailure
///
/// A recorded, non-fatal failure of one pass on one stored value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationFailure {
    pub address: Address,
    pub domain: PathDomain,
    pub identifier: String,
    pub migration: String,
    pub message: String,
}

impl Display for MigrationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed at {}/{}/{}: {}",
            self.migration, self.address, self.domain, self.identifier, self.message
        )
    }
}

///
/// MigrationSummary
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MigrationSummary {
    /// Entries rewritten in storage.
    pub migrated: u64,

    /// Path capabilities left in place for lack of a controller mapping.
    pub missing: u64,

    pub failures: Vec<MigrationFailure>,
}

impl MigrationSummary {
    pub fn merge(&mut self, other: Self) {
        self.migrated += other.migrated;
        self.missing += other.missing;
        self.failures.extend(other.failures);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.missing == 0
    }
}
