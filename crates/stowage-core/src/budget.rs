//! Memory budget threaded through every decode allocation site.
//!
//! Units are abstract (bytes for text, elements for containers); only the
//! ceiling comparison is meaningful.

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error as ThisError;

///
/// MemoryKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MemoryKind {
    Value,
    String,
    RawString,
    BigInt,
    ArrayElement,
    DictionaryEntry,
    CompositeField,
    Parameter,
    TypeNode,
}

impl MemoryKind {
    const COUNT: usize = 9;

    const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::String => "string",
            Self::RawString => "raw_string",
            Self::BigInt => "big_int",
            Self::ArrayElement => "array_element",
            Self::DictionaryEntry => "dictionary_entry",
            Self::CompositeField => "composite_field",
            Self::Parameter => "parameter",
            Self::TypeNode => "type_node",
        }
    }
}

///
/// MemoryUsage
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MemoryUsage {
    pub kind: MemoryKind,
    pub amount: u64,
}

impl MemoryUsage {
    #[must_use]
    pub const fn new(kind: MemoryKind, amount: u64) -> Self {
        Self { kind, amount }
    }

    /// Usage for `len` units of `kind`, saturating on platforms where
    /// `usize` exceeds 64 bits.
    #[must_use]
    pub fn of_len(kind: MemoryKind, len: usize) -> Self {
        Self::new(kind, u64::try_from(len).unwrap_or(u64::MAX))
    }
}

///
/// BudgetError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BudgetError {
    #[error(
        "memory budget exceeded: {requested} {} units requested with {used} of {limit} used",
        kind.label()
    )]
    Exceeded {
        kind: MemoryKind,
        requested: u64,
        used: u64,
        limit: u64,
    },
}

impl From<BudgetError> for InternalError {
    fn from(err: BudgetError) -> Self {
        Self::new(ErrorClass::LimitExceeded, ErrorOrigin::Budget, err.to_string())
    }
}

///
/// MemoryGauge
///
/// Called before an allocation; an error means the allocation must not
/// happen.
///

pub trait MemoryGauge: Send + Sync {
    fn meter(&self, usage: MemoryUsage) -> Result<(), BudgetError>;
}

///
/// Unmetered
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Unmetered;

impl MemoryGauge for Unmetered {
    fn meter(&self, _: MemoryUsage) -> Result<(), BudgetError> {
        Ok(())
    }
}

///
/// MemoryBudget
///
/// Atomic unit counter checked against a caller-supplied ceiling.
/// A rejected request leaves the counters untouched.
///

#[derive(Debug)]
pub struct MemoryBudget {
    limit: u64,
    used: AtomicU64,
    per_kind: [AtomicU64; MemoryKind::COUNT],
}

impl MemoryBudget {
    #[must_use]
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            used: AtomicU64::new(0),
            per_kind: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    #[must_use]
    pub fn used(&self) -> u64 {
        self.used.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn used_by(&self, kind: MemoryKind) -> u64 {
        self.per_kind[kind.index()].load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used())
    }
}

impl MemoryGauge for MemoryBudget {
    fn meter(&self, usage: MemoryUsage) -> Result<(), BudgetError> {
        let limit = self.limit;

        self.used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                used.checked_add(usage.amount).filter(|next| *next <= limit)
            })
            .map_err(|used| BudgetError::Exceeded {
                kind: usage.kind,
                requested: usage.amount,
                used,
                limit,
            })?;

        self.per_kind[usage.kind.index()].fetch_add(usage.amount, Ordering::Relaxed);

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_accepts_requests_up_to_the_limit() {
        let budget = MemoryBudget::new(10);

        budget
            .meter(MemoryUsage::new(MemoryKind::String, 6))
            .expect("within limit");
        budget
            .meter(MemoryUsage::new(MemoryKind::ArrayElement, 4))
            .expect("exactly at limit");

        assert_eq!(budget.used(), 10);
        assert_eq!(budget.used_by(MemoryKind::String), 6);
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn rejected_request_does_not_consume_budget() {
        let budget = MemoryBudget::new(5);
        budget
            .meter(MemoryUsage::new(MemoryKind::Value, 3))
            .expect("within limit");

        let err = budget
            .meter(MemoryUsage::new(MemoryKind::BigInt, 3))
            .expect_err("over limit");

        assert_eq!(
            err,
            BudgetError::Exceeded {
                kind: MemoryKind::BigInt,
                requested: 3,
                used: 3,
                limit: 5,
            }
        );
        assert_eq!(budget.used(), 3);
        assert_eq!(budget.used_by(MemoryKind::BigInt), 0);
    }

    #[test]
    fn overflowing_request_is_rejected() {
        let budget = MemoryBudget::new(u64::MAX);
        budget
            .meter(MemoryUsage::new(MemoryKind::Value, 1))
            .expect("within limit");

        assert!(
            budget
                .meter(MemoryUsage::new(MemoryKind::Value, u64::MAX))
                .is_err()
        );
    }

    #[test]
    fn budget_error_converts_to_limit_exceeded() {
        let err: InternalError = BudgetError::Exceeded {
            kind: MemoryKind::String,
            requested: 1,
            used: 0,
            limit: 0,
        }
        .into();

        assert_eq!(err.class, ErrorClass::LimitExceeded);
        assert_eq!(err.origin, ErrorOrigin::Budget);
    }
}
