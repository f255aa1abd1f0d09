#[macro_use]
mod macros;

#[cfg(test)]
mod tests;

use std::fmt;

///
/// PrimitiveKind
///
/// Canonical leaf type kind shared by the value model and the interchange
/// codec. Every kind maps to exactly one wire label.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PrimitiveKind {
    Any,
    AnyStruct,
    AnyResource,
    MetaType,
    Void,
    Never,
    Bool,
    String,
    Character,
    Bytes,
    Address,
    Number,
    SignedNumber,
    Integer,
    SignedInteger,
    FixedPoint,
    SignedFixedPoint,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Word8,
    Word16,
    Word32,
    Word64,
    Fix64,
    UFix64,
    Path,
    CapabilityPath,
    StoragePath,
    PublicPath,
    PrivatePath,
    AuthAccount,
    PublicAccount,
    AuthAccountKeys,
    PublicAccountKeys,
    AuthAccountContracts,
    PublicAccountContracts,
    DeployedContract,
    AccountKey,
    Account,
}

impl PrimitiveKind {
    /// Return the full metadata descriptor for one primitive kind.
    #[must_use]
    pub const fn metadata(self) -> PrimitiveMetadata {
        primitive_kind_registry!(metadata_from_registry, self)
    }

    /// Resolve a wire label back to its kind.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        primitive_kind_registry!(from_label_from_registry, label)
    }

    /// Stable wire label used as the interchange `"kind"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    #[must_use]
    pub const fn family(self) -> PrimitiveFamily {
        self.metadata().family
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.metadata().is_signed
    }

    /// Fixed bit width, or `None` for unbounded and non-numeric kinds.
    #[must_use]
    pub const fn bit_width(self) -> Option<u16> {
        match self.metadata().bit_width {
            0 => None,
            width => Some(width),
        }
    }

    /// Kinds retired by the account-type upgrade.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        self.metadata().is_legacy
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self.family(), PrimitiveFamily::Integer | PrimitiveFamily::Word)
    }

    #[must_use]
    pub const fn is_fixed_point(self) -> bool {
        matches!(self.family(), PrimitiveFamily::FixedPoint)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// PrimitiveMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrimitiveMetadata {
    pub label: &'static str,
    pub family: PrimitiveFamily,
    pub is_signed: bool,
    pub bit_width: u16,
    pub is_legacy: bool,
}

///
/// PrimitiveFamily
///
/// Coarse routing family for primitive kinds.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrimitiveFamily {
    Abstract,
    Simple,
    Text,
    NumericSupertype,
    Integer,
    Word,
    FixedPoint,
    Path,
    Account,
}

/// Ordered list of all primitive kinds in registry order.
pub const ALL_PRIMITIVE_KINDS: [PrimitiveKind; 51] =
    primitive_kind_registry!(all_kinds_from_registry);
