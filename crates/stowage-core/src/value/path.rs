use crate::types::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// PathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("unknown path domain '{0}'")]
    UnknownDomain(String),
}

///
/// PathDomain
///
/// Closed set of storage partitions a path may name.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PathDomain {
    Storage,
    Private,
    Public,
}

impl PathDomain {
    pub const ALL: [Self; 3] = [Self::Storage, Self::Private, Self::Public];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Private => "private",
            Self::Public => "public",
        }
    }

    pub fn parse(label: &str) -> Result<Self, PathError> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.label() == label)
            .ok_or_else(|| PathError::UnknownDomain(label.to_string()))
    }
}

impl Display for PathDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PathDomain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PathDomain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;

        Self::parse(&label).map_err(de::Error::custom)
    }
}

///
/// Path
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Path {
    pub domain: PathDomain,
    pub identifier: String,
}

impl Path {
    #[must_use]
    pub fn new(domain: PathDomain, identifier: impl Into<String>) -> Self {
        Self {
            domain,
            identifier: identifier.into(),
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.domain, self.identifier)
    }
}

///
/// AddressPath
///
/// A path qualified by the account that owns it.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AddressPath {
    pub address: Address,
    pub path: Path,
}

impl AddressPath {
    #[must_use]
    pub const fn new(address: Address, path: Path) -> Self {
        Self { address, path }
    }
}

impl Display for AddressPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.address, self.path)
    }
}

///
/// Link
///
/// Legacy binding of a target path to a borrow type name.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Link {
    pub target_path: Path,
    pub borrow_type: String,
}

impl Link {
    #[must_use]
    pub fn new(target_path: Path, borrow_type: impl Into<String>) -> Self {
        Self {
            target_path,
            borrow_type: borrow_type.into(),
        }
    }
}
