use crate::{
    ty::{CompositeType, CompositeTypeKind, Field, Location, TypeId},
    value::Value,
};
use thiserror::Error as ThisError;

///
/// FieldCountMismatch
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("composite has {expected} fields, got {actual} replacement values")]
pub struct FieldCountMismatch {
    pub expected: usize,
    pub actual: usize,
}

///
/// CompositeKind
///
/// Value-level composite variants. Interfaces never have values.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompositeKind {
    Struct,
    Resource,
    Event,
    Contract,
    Enum,
}

impl CompositeKind {
    #[must_use]
    pub const fn type_kind(self) -> CompositeTypeKind {
        match self {
            Self::Struct => CompositeTypeKind::Struct,
            Self::Resource => CompositeTypeKind::Resource,
            Self::Event => CompositeTypeKind::Event,
            Self::Contract => CompositeTypeKind::Contract,
            Self::Enum => CompositeTypeKind::Enum,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        self.type_kind().label()
    }
}

///
/// Composite
///
/// Nominal value. Field values and the type's field list are parallel;
/// the only mutation is a whole-vector swap that keeps them in step.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Composite {
    kind: CompositeKind,
    ty: CompositeType,
    values: Vec<Value>,
}

impl Composite {
    /// Build a composite, deriving each field type from its value.
    #[must_use]
    pub fn new(kind: CompositeKind, id: TypeId, fields: Vec<(String, Value)>) -> Self {
        let mut field_types = Vec::with_capacity(fields.len());
        let mut values = Vec::with_capacity(fields.len());

        for (name, value) in fields {
            field_types.push(Field::new(name, value.static_type()));
            values.push(value);
        }

        Self {
            kind,
            ty: CompositeType::new(kind.type_kind(), id, field_types),
            values,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CompositeKind {
        self.kind
    }

    #[must_use]
    pub const fn ty(&self) -> &CompositeType {
        &self.ty
    }

    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        self.ty.location.as_ref()
    }

    #[must_use]
    pub fn qualified_identifier(&self) -> &str {
        &self.ty.qualified_identifier
    }

    #[must_use]
    pub fn type_id(&self) -> String {
        self.ty.type_id()
    }

    #[must_use]
    pub const fn is_resource(&self) -> bool {
        matches!(self.kind, CompositeKind::Resource)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.identifier.as_str(), value))
    }

    #[must_use]
    pub fn field_values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields()
            .find_map(|(field, value)| (field == name).then_some(value))
    }

    /// Swap in a complete new field-value vector, returning the old one.
    ///
    /// Field types are re-derived for the new values. A length mismatch is
    /// rejected and leaves the composite untouched.
    pub fn replace_field_values(
        &mut self,
        values: Vec<Value>,
    ) -> Result<Vec<Value>, FieldCountMismatch> {
        if values.len() != self.values.len() {
            return Err(FieldCountMismatch {
                expected: self.values.len(),
                actual: values.len(),
            });
        }

        for (field, value) in self.ty.fields.iter_mut().zip(&values) {
            field.ty = value.static_type();
        }

        Ok(std::mem::replace(&mut self.values, values))
    }
}
