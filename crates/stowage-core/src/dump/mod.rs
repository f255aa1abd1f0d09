//! Register dump loading.
//!
//! A dump is line-delimited JSON, one ledger register per line:
//! `{"Key":{"KeyParts":[{"Value":"<hex>"},...]},"Value":"<hex>"}`.
//! Registers are read into a caller-owned `DumpStore` and then decoded into
//! a `MemoryStorage` that migrations can run against.

mod load;
mod reader;
mod store;

#[cfg(test)]
mod tests;

pub use load::LoadReport;
pub use reader::{DumpReader, ReadReport};
pub use store::{DumpStore, RegisterKey};

use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    interchange::EncodeError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Key parts every register must carry: owner, controller, key.
pub const KEY_PART_COUNT: usize = 3;

/// Separator between the domain and identifier of a storage path key.
pub const STORAGE_PATH_SEPARATOR: u8 = 0x1f;

/// Slab register keys are `$` followed by an 8-byte index.
pub const SLAB_KEY_LENGTH: usize = 9;

///
/// DumpError
///

#[derive(Debug, ThisError)]
pub enum DumpError {
    #[error("dump i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed register entry: {message}")]
    MalformedEntry { line: usize, message: String },

    #[error("line {line}: expected at least 3 key parts, got {count}")]
    KeyParts { line: usize, count: usize },

    #[error("line {line}: invalid hex in {field}: {source}")]
    InvalidHex {
        line: usize,
        field: String,
        source: hex::FromHexError,
    },

    #[error("failed to encode register: {0}")]
    Encode(String),
}

impl DumpError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Io(_) | Self::Encode(_) => ErrorClass::Internal,
            Self::MalformedEntry { .. } | Self::KeyParts { .. } | Self::InvalidHex { .. } => {
                ErrorClass::Corruption
            }
        }
    }
}

impl From<EncodeError> for DumpError {
    fn from(err: EncodeError) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<serde_json::Error> for DumpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<DumpError> for InternalError {
    fn from(err: DumpError) -> Self {
        Self::new(err.class(), ErrorOrigin::Dump, err.to_string())
    }
}

///
/// EncodedEntry
///
/// Wire shape of one dump line.
///

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EncodedEntry {
    key: EncodedKey,
    value: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EncodedKey {
    key_parts: Vec<EncodedKeyPart>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EncodedKeyPart {
    value: String,
}
