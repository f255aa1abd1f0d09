use crate::{
    interchange::{EncodeError, keys, kinds},
    ty::{Authorization, CompositeType, Parameter, Type},
    value::{Capability, Composite, Path, Value},
};
use serde_json::{Map, Value as Json, json};

/// Encode one value as canonical interchange bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(&value_to_json(value))?)
}

/// Encode one type node.
pub fn encode_type(ty: &Type) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(&type_to_json(ty))?)
}

/// Build the interchange tree for a value.
#[must_use]
pub fn value_to_json(value: &Value) -> Json {
    let tag = value.tag().label();

    let payload = match value {
        Value::Void => return json!({ keys::TYPE: tag }),
        Value::Optional(None) => Json::Null,
        Value::Optional(Some(inner)) => value_to_json(inner),
        Value::Bool(b) => Json::Bool(*b),
        Value::Character(c) => Json::String(c.to_string()),
        Value::String(s) => Json::String(s.clone()),
        Value::Address(address) => Json::String(address.to_string()),
        Value::Int(n) => decimal(n),
        Value::Int8(n) => decimal(n),
        Value::Int16(n) => decimal(n),
        Value::Int32(n) => decimal(n),
        Value::Int64(n) => decimal(n),
        Value::Int128(n) => decimal(n),
        Value::Int256(n) => decimal(n),
        Value::UInt(n) => decimal(n),
        Value::UInt8(n) | Value::Word8(n) => decimal(n),
        Value::UInt16(n) | Value::Word16(n) => decimal(n),
        Value::UInt32(n) | Value::Word32(n) => decimal(n),
        Value::UInt64(n) | Value::Word64(n) => decimal(n),
        Value::UInt128(n) => decimal(n),
        Value::UInt256(n) => decimal(n),
        Value::Fix64(n) => decimal(n),
        Value::UFix64(n) => decimal(n),
        Value::Array(elements) => Json::Array(elements.iter().map(value_to_json).collect()),
        Value::Dictionary(entries) => Json::Array(
            entries
                .iter()
                .map(|(k, v)| json!({ keys::KEY: value_to_json(k), keys::VALUE: value_to_json(v) }))
                .collect(),
        ),
        Value::Composite(composite) => composite_payload(composite),
        Value::Link(link) => json!({
            keys::TARGET_PATH: path_node(&link.target_path),
            keys::BORROW_TYPE: link.borrow_type,
        }),
        Value::Path(path) => path_payload(path),
        Value::TypeValue(ty) => json!({ keys::STATIC_TYPE: optional_type(ty.as_ref()) }),
        Value::Capability(capability) => capability_payload(capability),
    };

    json!({ keys::TYPE: tag, keys::VALUE: payload })
}

fn decimal(n: &impl ToString) -> Json {
    Json::String(n.to_string())
}

fn composite_payload(composite: &Composite) -> Json {
    let fields: Vec<Json> = composite
        .fields()
        .map(|(name, value)| json!({ keys::NAME: name, keys::VALUE: value_to_json(value) }))
        .collect();

    json!({ keys::ID: composite.type_id(), keys::FIELDS: fields })
}

fn path_payload(path: &Path) -> Json {
    json!({
        keys::DOMAIN: path.domain.label(),
        keys::IDENTIFIER: path.identifier,
    })
}

fn path_node(path: &Path) -> Json {
    value_to_json(&Value::Path(path.clone()))
}

fn capability_payload(capability: &Capability) -> Json {
    match capability {
        Capability::Path(cap) => json!({
            keys::PATH: path_node(&cap.path),
            keys::ADDRESS: cap.address.to_string(),
            keys::BORROW_TYPE: optional_type(cap.borrow_type.as_ref()),
        }),
        Capability::Id(cap) => json!({
            keys::ID: cap.id.to_string(),
            keys::ADDRESS: cap.address.to_string(),
            keys::BORROW_TYPE: type_to_json(&cap.borrow_type),
        }),
    }
}

// Absent types travel as "".
fn optional_type(ty: Option<&Type>) -> Json {
    ty.map_or_else(|| Json::String(String::new()), type_to_json)
}

/// Build the interchange tree for a type.
#[must_use]
pub fn type_to_json(ty: &Type) -> Json {
    match ty {
        Type::Primitive(kind) => json!({ keys::KIND: kind.label() }),
        Type::Optional(inner) => json!({
            keys::KIND: kinds::OPTIONAL,
            keys::TYPE: type_to_json(inner),
        }),
        Type::VariableSizedArray(element) => json!({
            keys::KIND: kinds::VARIABLE_SIZED_ARRAY,
            keys::TYPE: type_to_json(element),
        }),
        Type::ConstantSizedArray { element, size } => json!({
            keys::KIND: kinds::CONSTANT_SIZED_ARRAY,
            keys::TYPE: type_to_json(element),
            keys::SIZE: size,
        }),
        Type::Dictionary { key, value } => json!({
            keys::KIND: kinds::DICTIONARY,
            keys::KEY: type_to_json(key),
            keys::VALUE: type_to_json(value),
        }),
        Type::Capability(borrow) => json!({
            keys::KIND: kinds::CAPABILITY,
            keys::TYPE: optional_type(borrow.as_deref()),
        }),
        Type::Reference(reference) => {
            let mut node = Map::new();
            node.insert(keys::KIND.into(), kinds::REFERENCE.into());
            node.insert(
                keys::AUTHORIZED.into(),
                reference.authorization.is_authorized().into(),
            );
            if let Authorization::Entitlements(set) = &reference.authorization {
                node.insert(keys::ENTITLEMENTS.into(), set.clone().into());
            }
            node.insert(keys::TYPE.into(), type_to_json(&reference.referenced));

            Json::Object(node)
        }
        Type::Function(function) => json!({
            keys::KIND: kinds::FUNCTION,
            keys::TYPE_ID: function.type_id,
            keys::PARAMETERS: parameters(&function.parameters),
            keys::RETURN: type_to_json(&function.return_type),
        }),
        Type::Restricted(restricted) => json!({
            keys::KIND: kinds::RESTRICTION,
            keys::TYPE_ID: restricted.type_id,
            keys::TYPE: type_to_json(&restricted.ty),
            keys::RESTRICTIONS: restricted.restrictions.iter().map(type_to_json).collect::<Vec<_>>(),
        }),
        Type::Composite(composite) => nominal(composite),
    }
}

fn parameters(params: &[Parameter]) -> Json {
    params
        .iter()
        .map(|param| {
            json!({
                keys::LABEL: param.label,
                keys::ID: param.identifier,
                keys::TYPE: type_to_json(&param.ty),
            })
        })
        .collect()
}

fn nominal(composite: &CompositeType) -> Json {
    let fields: Vec<Json> = composite
        .fields
        .iter()
        .map(|field| json!({ keys::ID: field.identifier, keys::TYPE: type_to_json(&field.ty) }))
        .collect();
    let initializers: Vec<Json> = composite
        .initializers
        .iter()
        .map(|params| parameters(params))
        .collect();

    json!({
        keys::KIND: composite.kind.label(),
        keys::TYPE: optional_type(composite.raw_type.as_deref()),
        keys::TYPE_ID: composite.type_id(),
        keys::FIELDS: fields,
        keys::INITIALIZERS: initializers,
    })
}
