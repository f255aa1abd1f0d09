//! Reified type descriptors: the shape of a value without its data.

mod location;


pub use location::*;
pub use stowage_primitives::PrimitiveKind;

use std::fmt::{self, Display};

///
/// Type
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Type {
    Primitive(PrimitiveKind),
    Optional(Box<Self>),
    VariableSizedArray(Box<Self>),
    ConstantSizedArray { element: Box<Self>, size: u64 },
    Dictionary { key: Box<Self>, value: Box<Self> },
    Capability(Option<Box<Self>>),
    Reference(ReferenceType),
    Function(FunctionType),
    Restricted(RestrictedType),
    Composite(CompositeType),
}

impl Type {
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::VariableSizedArray(Box::new(element))
    }

    #[must_use]
    pub fn dictionary(key: Self, value: Self) -> Self {
        Self::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    #[must_use]
    pub fn reference(authorization: Authorization, referenced: Self) -> Self {
        Self::Reference(ReferenceType::new(authorization, referenced))
    }

    /// `auth(Storage, Contracts, Keys, Inbox, Capabilities) &Account`
    #[must_use]
    pub fn fully_entitled_account_reference() -> Self {
        Self::Reference(ReferenceType::fully_entitled_account())
    }

    #[must_use]
    pub const fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    /// True when this type names a resource (and so its values are linear).
    #[must_use]
    pub fn is_resource(&self) -> bool {
        match self {
            Self::Primitive(kind) => *kind == PrimitiveKind::AnyResource,
            Self::Optional(inner) | Self::VariableSizedArray(inner) => inner.is_resource(),
            Self::ConstantSizedArray { element, .. } => element.is_resource(),
            Self::Dictionary { value, .. } => value.is_resource(),
            Self::Restricted(restricted) => restricted.ty.is_resource(),
            Self::Composite(composite) => matches!(
                composite.kind,
                CompositeTypeKind::Resource | CompositeTypeKind::ResourceInterface
            ),
            Self::Capability(_) | Self::Reference(_) | Self::Function(_) => false,
        }
    }
}

impl From<PrimitiveKind> for Type {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::VariableSizedArray(element) => write!(f, "[{element}]"),
            Self::ConstantSizedArray { element, size } => write!(f, "[{element}; {size}]"),
            Self::Dictionary { key, value } => write!(f, "{{{key}: {value}}}"),
            Self::Capability(Some(borrow)) => write!(f, "Capability<{borrow}>"),
            Self::Capability(None) => f.write_str("Capability"),
            Self::Reference(reference) => write!(f, "{reference}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Restricted(restricted) => write!(f, "{restricted}"),
            Self::Composite(composite) => f.write_str(&composite.type_id()),
        }
    }
}

///
/// Authorization
///
/// `Authorized` is the legacy boolean auth flag; entitlement sets replace it.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Authorization {
    #[default]
    Unauthorized,
    Authorized,
    Entitlements(Vec<String>),
}

impl Authorization {
    pub const ACCOUNT_ENTITLEMENTS: [&'static str; 5] =
        ["Storage", "Contracts", "Keys", "Inbox", "Capabilities"];

    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        !matches!(self, Self::Unauthorized)
    }

    #[must_use]
    pub fn entitlements(&self) -> &[String] {
        match self {
            Self::Entitlements(set) => set,
            Self::Unauthorized | Self::Authorized => &[],
        }
    }
}

///
/// ReferenceType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferenceType {
    pub authorization: Authorization,
    pub referenced: Box<Type>,
}

impl ReferenceType {
    #[must_use]
    pub fn new(authorization: Authorization, referenced: Type) -> Self {
        Self {
            authorization,
            referenced: Box::new(referenced),
        }
    }

    #[must_use]
    pub fn fully_entitled_account() -> Self {
        let entitlements = Authorization::ACCOUNT_ENTITLEMENTS
            .iter()
            .map(ToString::to_string)
            .collect();

        Self::new(
            Authorization::Entitlements(entitlements),
            Type::Primitive(PrimitiveKind::Account),
        )
    }

    /// True when the referenced type is the legacy `AuthAccount`,
    /// whatever the authorization.
    #[must_use]
    pub fn references_legacy_account(&self) -> bool {
        *self.referenced == Type::Primitive(PrimitiveKind::AuthAccount)
    }
}

impl Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.authorization {
            Authorization::Unauthorized => write!(f, "&{}", self.referenced),
            Authorization::Authorized => write!(f, "auth &{}", self.referenced),
            Authorization::Entitlements(set) => {
                write!(f, "auth({}) &{}", set.join(", "), self.referenced)
            }
        }
    }
}

///
/// Parameter
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameter {
    pub label: String,
    pub identifier: String,
    pub ty: Type,
}

impl Parameter {
    #[must_use]
    pub fn new(label: impl Into<String>, identifier: impl Into<String>, ty: Type) -> Self {
        Self {
            label: label.into(),
            identifier: identifier.into(),
            ty,
        }
    }
}

///
/// FunctionType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionType {
    pub type_id: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Box<Type>,
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_id.is_empty() {
            return f.write_str(&self.type_id);
        }

        let params: Vec<String> = self.parameters.iter().map(|p| p.ty.to_string()).collect();
        write!(f, "(({}): {})", params.join(", "), self.return_type)
    }
}

///
/// RestrictedType
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RestrictedType {
    pub type_id: String,
    pub ty: Box<Type>,
    pub restrictions: Vec<Type>,
}

impl Display for RestrictedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_id.is_empty() {
            return f.write_str(&self.type_id);
        }

        let restrictions: Vec<String> = self.restrictions.iter().map(ToString::to_string).collect();
        write!(f, "{}{{{}}}", self.ty, restrictions.join(", "))
    }
}

///
/// Field
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub identifier: String,
    pub ty: Type,
}

impl Field {
    #[must_use]
    pub fn new(identifier: impl Into<String>, ty: Type) -> Self {
        Self {
            identifier: identifier.into(),
            ty,
        }
    }
}

///
/// CompositeTypeKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompositeTypeKind {
    Struct,
    Resource,
    Event,
    Contract,
    Enum,
    StructInterface,
    ResourceInterface,
    ContractInterface,
}

impl CompositeTypeKind {
    pub const ALL: [Self; 8] = [
        Self::Struct,
        Self::Resource,
        Self::Event,
        Self::Contract,
        Self::Enum,
        Self::StructInterface,
        Self::ResourceInterface,
        Self::ContractInterface,
    ];

    /// Interchange `"kind"` label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Struct => "Struct",
            Self::Resource => "Resource",
            Self::Event => "Event",
            Self::Contract => "Contract",
            Self::Enum => "Enum",
            Self::StructInterface => "StructInterface",
            Self::ResourceInterface => "ResourceInterface",
            Self::ContractInterface => "ContractInterface",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

///
/// CompositeType
///
/// Nominal type. `raw_type` is only meaningful for enums.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompositeType {
    pub kind: CompositeTypeKind,
    pub location: Option<Location>,
    pub qualified_identifier: String,
    pub fields: Vec<Field>,
    pub initializers: Vec<Vec<Parameter>>,
    pub raw_type: Option<Box<Type>>,
}

impl CompositeType {
    #[must_use]
    pub fn new(kind: CompositeTypeKind, id: TypeId, fields: Vec<Field>) -> Self {
        Self {
            kind,
            location: id.location,
            qualified_identifier: id.qualified_identifier,
            fields,
            initializers: Vec::new(),
            raw_type: None,
        }
    }

    #[must_use]
    pub fn with_initializers(mut self, initializers: Vec<Vec<Parameter>>) -> Self {
        self.initializers = initializers;
        self
    }

    #[must_use]
    pub fn with_raw_type(mut self, raw_type: Type) -> Self {
        self.raw_type = Some(Box::new(raw_type));
        self
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        TypeId::new(self.location.clone(), self.qualified_identifier.clone())
    }

    #[must_use]
    pub fn type_id(&self) -> String {
        self.id().to_string()
    }

    #[must_use]
    pub fn field(&self, identifier: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }
}
