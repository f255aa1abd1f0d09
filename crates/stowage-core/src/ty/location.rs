use crate::types::{Address, AddressError};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// NATIVE COMPOSITE TYPES
///
/// Built-in nominal types that are identified without a location.
///

pub const NATIVE_COMPOSITE_TYPES: [&str; 9] = [
    "AccountKey",
    "PublicKey",
    "HashAlgorithm",
    "SignatureAlgorithm",
    "DeployedContract",
    "AuthAccount.Contracts",
    "PublicAccount.Contracts",
    "AuthAccount.Keys",
    "PublicAccount.Keys",
];

#[must_use]
pub fn is_native_composite_type(qualified_identifier: &str) -> bool {
    NATIVE_COMPOSITE_TYPES.contains(&qualified_identifier)
}

///
/// TypeIdError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TypeIdError {
    #[error("type ID is empty")]
    Empty,

    #[error("type ID '{0}' is missing its location")]
    MissingLocation(String),

    #[error("type ID '{0}' is missing its qualified identifier")]
    MissingIdentifier(String),

    #[error("type ID '{type_id}' has an invalid address: {source}")]
    InvalidAddress {
        type_id: String,
        source: AddressError,
    },

    #[error("type ID '{0}' has an invalid hex location")]
    InvalidHex(String),

    #[error("type ID '{0}' names no location and no native type")]
    Unknown(String),
}

///
/// Location
///
/// Where a nominal type is defined.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Location {
    Address { address: Address, name: String },
    String(String),
    Identifier(String),
    Transaction(Vec<u8>),
    Script(Vec<u8>),
}

impl Location {
    const ADDRESS_PREFIX: &'static str = "A";
    const STRING_PREFIX: &'static str = "S";
    const IDENTIFIER_PREFIX: &'static str = "I";
    const TRANSACTION_PREFIX: &'static str = "t";
    const SCRIPT_PREFIX: &'static str = "s";

    /// Address location for the contract declaring `qualified_identifier`.
    #[must_use]
    pub fn for_address(address: Address, qualified_identifier: &str) -> Self {
        let name = qualified_identifier
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string();

        Self::Address { address, name }
    }

    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Address { .. } => Self::ADDRESS_PREFIX,
            Self::String(_) => Self::STRING_PREFIX,
            Self::Identifier(_) => Self::IDENTIFIER_PREFIX,
            Self::Transaction(_) => Self::TRANSACTION_PREFIX,
            Self::Script(_) => Self::SCRIPT_PREFIX,
        }
    }

    /// Encode the full type ID of `qualified_identifier` declared here.
    #[must_use]
    pub fn type_id(&self, qualified_identifier: &str) -> String {
        let prefix = self.prefix();

        match self {
            Self::Address { address, .. } => {
                format!("{prefix}.{}.{qualified_identifier}", address.to_hex())
            }
            Self::String(s) | Self::Identifier(s) => {
                format!("{prefix}.{s}.{qualified_identifier}")
            }
            Self::Transaction(bytes) | Self::Script(bytes) => {
                format!("{prefix}.{}.{qualified_identifier}", hex::encode(bytes))
            }
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address { address, name } => write!(f, "{address}.{name}"),
            Self::String(s) | Self::Identifier(s) => f.write_str(s),
            Self::Transaction(bytes) | Self::Script(bytes) => {
                write!(f, "{}", hex::encode(bytes))
            }
        }
    }
}

///
/// TypeId
///
/// Decoded on-the-wire identity of a nominal type.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TypeId {
    pub location: Option<Location>,
    pub qualified_identifier: String,
}

impl TypeId {
    #[must_use]
    pub const fn new(location: Option<Location>, qualified_identifier: String) -> Self {
        Self {
            location,
            qualified_identifier,
        }
    }

    /// Split a type ID into location and qualified identifier.
    ///
    /// Unknown prefixes are not an error here: the whole string becomes the
    /// qualified identifier and the location is absent. Use
    /// [`TypeId::decode_known`] to also reject unknown native names.
    pub fn decode(type_id: &str) -> Result<Self, TypeIdError> {
        if type_id.is_empty() {
            return Err(TypeIdError::Empty);
        }

        let parts: Vec<&str> = type_id.splitn(3, '.').collect();
        let prefix = parts[0];

        let native = || Self::new(None, type_id.to_string());

        let location_part = |required_identifier: bool| -> Result<(&str, String), TypeIdError> {
            let location = parts
                .get(1)
                .ok_or_else(|| TypeIdError::MissingLocation(type_id.to_string()))?;
            let qualified = parts.get(2).copied().unwrap_or_default();
            if required_identifier && qualified.is_empty() {
                return Err(TypeIdError::MissingIdentifier(type_id.to_string()));
            }

            Ok((location, qualified.to_string()))
        };

        let decoded = match prefix {
            Location::ADDRESS_PREFIX if parts.len() > 1 => {
                let (hex_address, qualified) = location_part(true)?;
                if hex_address.is_empty() {
                    return Err(TypeIdError::MissingLocation(type_id.to_string()));
                }
                let address =
                    Address::from_hex(hex_address).map_err(|source| TypeIdError::InvalidAddress {
                        type_id: type_id.to_string(),
                        source,
                    })?;

                Self::new(
                    Some(Location::for_address(address, &qualified)),
                    qualified,
                )
            }
            Location::STRING_PREFIX if parts.len() > 1 => {
                let (location, qualified) = location_part(false)?;
                Self::new(Some(Location::String(location.to_string())), qualified)
            }
            Location::IDENTIFIER_PREFIX if parts.len() > 1 => {
                let (location, qualified) = location_part(false)?;
                Self::new(Some(Location::Identifier(location.to_string())), qualified)
            }
            Location::TRANSACTION_PREFIX | Location::SCRIPT_PREFIX if parts.len() > 1 => {
                let (location, qualified) = location_part(false)?;
                let bytes =
                    hex::decode(location).map_err(|_| TypeIdError::InvalidHex(type_id.to_string()))?;
                let location = if prefix == Location::TRANSACTION_PREFIX {
                    Location::Transaction(bytes)
                } else {
                    Location::Script(bytes)
                };

                Self::new(Some(location), qualified)
            }
            _ => native(),
        };

        Ok(decoded)
    }

    /// Decode and require either a location or a native composite type.
    pub fn decode_known(type_id: &str) -> Result<Self, TypeIdError> {
        let decoded = Self::decode(type_id)?;
        if decoded.location.is_none() && !is_native_composite_type(&decoded.qualified_identifier) {
            return Err(TypeIdError::Unknown(type_id.to_string()));
        }

        Ok(decoded)
    }
}

impl Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => f.write_str(&location.type_id(&self.qualified_identifier)),
            None => f.write_str(&self.qualified_identifier),
        }
    }
}
