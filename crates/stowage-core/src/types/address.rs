use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// AddressError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum AddressError {
    #[error("address literal must start with 0x")]
    MissingPrefix,

    #[error("address is not valid hex: {0}")]
    InvalidHex(String),

    #[error("address is {len} bytes (max {})", Address::LENGTH)]
    TooLong { len: usize },
}

///
/// Address
///
/// Fixed-width account address. Shorter inputs are left-padded with zeros,
/// so `0x01` and `0x0000000000000001` name the same account.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address([u8; Address::LENGTH]);

impl Address {
    pub const LENGTH: usize = 8;
    pub const ZERO: Self = Self([0; Self::LENGTH]);

    #[must_use]
    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn from_u64(n: u64) -> Self {
        Self(n.to_be_bytes())
    }

    /// Left-pad `bytes` into an address.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() > Self::LENGTH {
            return Err(AddressError::TooLong { len: bytes.len() });
        }

        let mut out = [0u8; Self::LENGTH];
        out[Self::LENGTH - bytes.len()..].copy_from_slice(bytes);

        Ok(Self(out))
    }

    /// Parse bare hex digits (no prefix), as used inside type identifiers.
    pub fn from_hex(digits: &str) -> Result<Self, AddressError> {
        let bytes =
            hex::decode(digits).map_err(|err| AddressError::InvalidHex(err.to_string()))?;

        Self::try_from_slice(&bytes)
    }

    /// Parse a `0x`-prefixed literal.
    pub fn from_literal(literal: &str) -> Result<Self, AddressError> {
        let digits = literal
            .strip_prefix("0x")
            .ok_or(AddressError::MissingPrefix)?;

        Self::from_hex(digits)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub const fn to_array(self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Full-width lowercase hex digits without prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<[u8; Self::LENGTH]> for Address {
    fn from(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_left_padded() {
        assert_eq!(Address::from_literal("0x01"), Ok(Address::from_u64(1)));
        assert_eq!(Address::from_u64(1).to_string(), "0x0000000000000001");
    }

    #[test]
    fn malformed_literals_are_rejected() {
        assert_eq!(Address::from_literal("01"), Err(AddressError::MissingPrefix));
        assert!(matches!(
            Address::from_literal("0xzz"),
            Err(AddressError::InvalidHex(_))
        ));
        assert_eq!(
            Address::from_literal("0x000000000000000001"),
            Err(AddressError::TooLong { len: 9 })
        );
    }
}
