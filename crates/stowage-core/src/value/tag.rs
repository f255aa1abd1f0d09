use crate::value::{CompositeKind, Value};

///
/// ValueTag
///
/// Interchange `"type"` discriminator for every value variant.
///
/// IMPORTANT:
/// Labels are part of the wire format and must never change.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueTag {
    Void,
    Optional,
    Bool,
    Character,
    String,
    Address,
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
    Array,
    Dictionary,
    Struct,
    Resource,
    Event,
    Contract,
    Enum,
    Link,
    Path,
    Type,
    Capability,
}

impl ValueTag {
    pub const ALL: [Self; 37] = [
        Self::Void,
        Self::Optional,
        Self::Bool,
        Self::Character,
        Self::String,
        Self::Address,
        Self::Int,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Int128,
        Self::Int256,
        Self::UInt,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::UInt128,
        Self::UInt256,
        Self::Word8,
        Self::Word16,
        Self::Word32,
        Self::Word64,
        Self::Fix64,
        Self::UFix64,
        Self::Array,
        Self::Dictionary,
        Self::Struct,
        Self::Resource,
        Self::Event,
        Self::Contract,
        Self::Enum,
        Self::Link,
        Self::Path,
        Self::Type,
        Self::Capability,
    ];

    /// Stable wire label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Optional => "Optional",
            Self::Bool => "Bool",
            Self::Character => "Character",
            Self::String => "String",
            Self::Address => "Address",
            Self::Int => "Int",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Int128 => "Int128",
            Self::Int256 => "Int256",
            Self::UInt => "UInt",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::UInt128 => "UInt128",
            Self::UInt256 => "UInt256",
            Self::Word8 => "Word8",
            Self::Word16 => "Word16",
            Self::Word32 => "Word32",
            Self::Word64 => "Word64",
            Self::Fix64 => "Fix64",
            Self::UFix64 => "UFix64",
            Self::Array => "Array",
            Self::Dictionary => "Dictionary",
            Self::Struct => "Struct",
            Self::Resource => "Resource",
            Self::Event => "Event",
            Self::Contract => "Contract",
            Self::Enum => "Enum",
            Self::Link => "Link",
            Self::Path => "Path",
            Self::Type => "Type",
            Self::Capability => "Capability",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.label() == label)
    }

    /// Composite kind carried by this tag, if any.
    #[must_use]
    pub const fn composite_kind(self) -> Option<CompositeKind> {
        match self {
            Self::Struct => Some(CompositeKind::Struct),
            Self::Resource => Some(CompositeKind::Resource),
            Self::Event => Some(CompositeKind::Event),
            Self::Contract => Some(CompositeKind::Contract),
            Self::Enum => Some(CompositeKind::Enum),
            _ => None,
        }
    }
}

/// Wire tag for one value.
#[must_use]
pub(super) const fn value_tag(value: &Value) -> ValueTag {
    match value {
        Value::Void => ValueTag::Void,
        Value::Optional(_) => ValueTag::Optional,
        Value::Bool(_) => ValueTag::Bool,
        Value::Character(_) => ValueTag::Character,
        Value::String(_) => ValueTag::String,
        Value::Address(_) => ValueTag::Address,
        Value::Int(_) => ValueTag::Int,
        Value::Int8(_) => ValueTag::Int8,
        Value::Int16(_) => ValueTag::Int16,
        Value::Int32(_) => ValueTag::Int32,
        Value::Int64(_) => ValueTag::Int64,
        Value::Int128(_) => ValueTag::Int128,
        Value::Int256(_) => ValueTag::Int256,
        Value::UInt(_) => ValueTag::UInt,
        Value::UInt8(_) => ValueTag::UInt8,
        Value::UInt16(_) => ValueTag::UInt16,
        Value::UInt32(_) => ValueTag::UInt32,
        Value::UInt64(_) => ValueTag::UInt64,
        Value::UInt128(_) => ValueTag::UInt128,
        Value::UInt256(_) => ValueTag::UInt256,
        Value::Word8(_) => ValueTag::Word8,
        Value::Word16(_) => ValueTag::Word16,
        Value::Word32(_) => ValueTag::Word32,
        Value::Word64(_) => ValueTag::Word64,
        Value::Fix64(_) => ValueTag::Fix64,
        Value::UFix64(_) => ValueTag::UFix64,
        Value::Array(_) => ValueTag::Array,
        Value::Dictionary(_) => ValueTag::Dictionary,
        Value::Composite(composite) => match composite.kind() {
            CompositeKind::Struct => ValueTag::Struct,
            CompositeKind::Resource => ValueTag::Resource,
            CompositeKind::Event => ValueTag::Event,
            CompositeKind::Contract => ValueTag::Contract,
            CompositeKind::Enum => ValueTag::Enum,
        },
        Value::Link(_) => ValueTag::Link,
        Value::Path(_) => ValueTag::Path,
        Value::TypeValue(_) => ValueTag::Type,
        Value::Capability(_) => ValueTag::Capability,
    }
}
