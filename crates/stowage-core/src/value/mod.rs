//! Runtime value universe persisted in account storage.

mod capability;
mod composite;
mod path;
mod tag;

#[cfg(test)]
mod tests;

pub use capability::*;
pub use composite::*;
pub use path::*;
pub use tag::ValueTag;

use crate::{
    ty::{PrimitiveKind, Type},
    types::{Address, Character, Fix64, Int256, UFix64, UInt256},
};
use num_bigint::{BigInt, BigUint};

///
/// Value
///
/// Closed sum of every storable value. `Word*` variants are wrapping bit
/// patterns; `Int`/`UInt` are unbounded.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Void,
    Bool(bool),
    Optional(Option<Box<Self>>),
    Character(Character),
    String(String),
    Address(Address),
    Int(BigInt),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(i128),
    Int256(Int256),
    UInt(BigUint),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(u128),
    UInt256(UInt256),
    Word8(u8),
    Word16(u16),
    Word32(u32),
    Word64(u64),
    Fix64(Fix64),
    UFix64(UFix64),
    Array(Vec<Self>),
    Dictionary(Vec<(Self, Self)>),
    Composite(Composite),
    Link(Link),
    Path(Path),
    TypeValue(Option<Type>),
    Capability(Capability),
}

impl Value {
    #[must_use]
    pub fn some(inner: Self) -> Self {
        Self::Optional(Some(Box::new(inner)))
    }

    #[must_use]
    pub const fn none() -> Self {
        Self::Optional(None)
    }

    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::value_tag(self)
    }

    #[must_use]
    pub const fn as_composite(&self) -> Option<&Composite> {
        match self {
            Self::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_capability(&self) -> Option<&Capability> {
        match self {
            Self::Capability(capability) => Some(capability),
            _ => None,
        }
    }

    /// True for values whose static type is a resource.
    #[must_use]
    pub fn is_resource(&self) -> bool {
        match self {
            Self::Composite(composite) => composite.is_resource(),
            Self::Optional(Some(inner)) => inner.is_resource(),
            Self::Array(_) | Self::Dictionary(_) => self.static_type().is_resource(),
            _ => false,
        }
    }

    /// Visit this value and every nested value, parents first.
    pub fn inspect(&self, visit: &mut impl FnMut(&Self)) {
        visit(self);

        match self {
            Self::Optional(Some(inner)) => inner.inspect(visit),
            Self::Array(elements) => {
                for element in elements {
                    element.inspect(visit);
                }
            }
            Self::Dictionary(entries) => {
                for (key, value) in entries {
                    key.inspect(visit);
                    value.inspect(visit);
                }
            }
            Self::Composite(composite) => {
                for value in composite.field_values() {
                    value.inspect(visit);
                }
            }
            _ => {}
        }
    }

    /// Deterministic type of this value.
    ///
    /// Containers take the element type when every element agrees and fall
    /// back to `AnyResource`/`AnyStruct` otherwise. Empty containers and
    /// absent optionals use `Never`.
    #[must_use]
    pub fn static_type(&self) -> Type {
        let primitive = Type::Primitive;

        match self {
            Self::Void => primitive(PrimitiveKind::Void),
            Self::Bool(_) => primitive(PrimitiveKind::Bool),
            Self::Optional(None) => Type::optional(primitive(PrimitiveKind::Never)),
            Self::Optional(Some(inner)) => Type::optional(inner.static_type()),
            Self::Character(_) => primitive(PrimitiveKind::Character),
            Self::String(_) => primitive(PrimitiveKind::String),
            Self::Address(_) => primitive(PrimitiveKind::Address),
            Self::Int(_) => primitive(PrimitiveKind::Int),
            Self::Int8(_) => primitive(PrimitiveKind::Int8),
            Self::Int16(_) => primitive(PrimitiveKind::Int16),
            Self::Int32(_) => primitive(PrimitiveKind::Int32),
            Self::Int64(_) => primitive(PrimitiveKind::Int64),
            Self::Int128(_) => primitive(PrimitiveKind::Int128),
            Self::Int256(_) => primitive(PrimitiveKind::Int256),
            Self::UInt(_) => primitive(PrimitiveKind::UInt),
            Self::UInt8(_) => primitive(PrimitiveKind::UInt8),
            Self::UInt16(_) => primitive(PrimitiveKind::UInt16),
            Self::UInt32(_) => primitive(PrimitiveKind::UInt32),
            Self::UInt64(_) => primitive(PrimitiveKind::UInt64),
            Self::UInt128(_) => primitive(PrimitiveKind::UInt128),
            Self::UInt256(_) => primitive(PrimitiveKind::UInt256),
            Self::Word8(_) => primitive(PrimitiveKind::Word8),
            Self::Word16(_) => primitive(PrimitiveKind::Word16),
            Self::Word32(_) => primitive(PrimitiveKind::Word32),
            Self::Word64(_) => primitive(PrimitiveKind::Word64),
            Self::Fix64(_) => primitive(PrimitiveKind::Fix64),
            Self::UFix64(_) => primitive(PrimitiveKind::UFix64),
            Self::Array(elements) => {
                Type::array(common_type(elements.iter().map(Self::static_type)))
            }
            Self::Dictionary(entries) => Type::dictionary(
                common_type(entries.iter().map(|(k, _)| k.static_type())),
                common_type(entries.iter().map(|(_, v)| v.static_type())),
            ),
            Self::Composite(composite) => Type::Composite(composite.ty().clone()),
            Self::Link(_) => primitive(PrimitiveKind::AnyStruct),
            Self::Path(path) => primitive(match path.domain {
                PathDomain::Storage => PrimitiveKind::StoragePath,
                PathDomain::Private => PrimitiveKind::PrivatePath,
                PathDomain::Public => PrimitiveKind::PublicPath,
            }),
            Self::TypeValue(_) => primitive(PrimitiveKind::MetaType),
            Self::Capability(capability) => {
                Type::Capability(capability.borrow_type().cloned().map(Box::new))
            }
        }
    }
}

// Least common type of a sequence of element types.
fn common_type(mut types: impl Iterator<Item = Type>) -> Type {
    let Some(first) = types.next() else {
        return Type::Primitive(PrimitiveKind::Never);
    };

    let mut any_resource = first.is_resource();
    let mut uniform = true;
    for ty in types {
        any_resource |= ty.is_resource();
        if ty != first {
            uniform = false;
        }
    }

    match (uniform, any_resource) {
        (true, _) => first,
        (false, true) => Type::Primitive(PrimitiveKind::AnyResource),
        (false, false) => Type::Primitive(PrimitiveKind::AnyStruct),
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Address> for Value {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<Composite> for Value {
    fn from(composite: Composite) -> Self {
        Self::Composite(composite)
    }
}

impl From<Capability> for Value {
    fn from(capability: Capability) -> Self {
        Self::Capability(capability)
    }
}

impl From<Path> for Value {
    fn from(path: Path) -> Self {
        Self::Path(path)
    }
}
