use derive_more::Display;
use num_bigint::{BigInt, BigUint};
use std::sync::LazyLock;
use thiserror::Error as ThisError;

static INT256_MAX: LazyLock<BigInt> = LazyLock::new(|| (BigInt::from(1i32) << 255usize) - 1);
static INT256_MIN: LazyLock<BigInt> = LazyLock::new(|| -(BigInt::from(1i32) << 255usize));
static UINT256_MAX: LazyLock<BigUint> =
    LazyLock::new(|| (BigUint::from(1u8) << 256usize) - 1u8);

///
/// WideIntError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum WideIntError {
    #[error("{0} does not fit in {1}")]
    OutOfRange(String, &'static str),
}

///
/// Int256
///
/// Signed 256-bit integer backed by an arbitrary-precision value.
/// The range is checked on construction.
///

#[derive(Clone, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Int256(BigInt);

impl Int256 {
    pub fn try_new(value: BigInt) -> Result<Self, WideIntError> {
        if value > *INT256_MAX || value < *INT256_MIN {
            return Err(WideIntError::OutOfRange(value.to_string(), "Int256"));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn max_value() -> Self {
        Self(INT256_MAX.clone())
    }

    #[must_use]
    pub fn min_value() -> Self {
        Self(INT256_MIN.clone())
    }

    #[must_use]
    pub const fn get(&self) -> &BigInt {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> BigInt {
        self.0
    }
}

impl From<i128> for Int256 {
    fn from(n: i128) -> Self {
        Self(BigInt::from(n))
    }
}

///
/// UInt256
///
/// Unsigned 256-bit integer.
///

#[derive(Clone, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UInt256(BigUint);

impl UInt256 {
    pub fn try_new(value: BigUint) -> Result<Self, WideIntError> {
        if value > *UINT256_MAX {
            return Err(WideIntError::OutOfRange(value.to_string(), "UInt256"));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn max_value() -> Self {
        Self(UINT256_MAX.clone())
    }

    #[must_use]
    pub const fn get(&self) -> &BigUint {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl From<u128> for UInt256 {
    fn from(n: u128) -> Self {
        Self(BigUint::from(n))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int256_bounds_are_inclusive() {
        assert!(Int256::try_new(INT256_MAX.clone()).is_ok());
        assert!(Int256::try_new(INT256_MIN.clone()).is_ok());
        assert!(Int256::try_new(INT256_MAX.clone() + 1).is_err());
        assert!(Int256::try_new(INT256_MIN.clone() - 1).is_err());
    }

    #[test]
    fn uint256_rejects_overflow_and_negatives() {
        assert!(UInt256::try_new(UINT256_MAX.clone()).is_ok());
        assert!(UInt256::try_new(UINT256_MAX.clone() + 1u8).is_err());
    }

    #[test]
    fn display_is_plain_decimal() {
        assert_eq!(Int256::from(-5i128).to_string(), "-5");
        assert_eq!(
            UInt256::max_value().to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }
}
