use crate::{
    budget::{MemoryGauge, MemoryKind, MemoryUsage, Unmetered},
    interchange::{DecodeError, keys, kinds},
    ty::{
        Authorization, CompositeType, CompositeTypeKind, Field, FunctionType, Parameter,
        PrimitiveKind, ReferenceType, RestrictedType, Type, TypeId,
    },
    types::{Address, Character, Fix64, Int256, UFix64, UInt256},
    value::{
        Capability, Composite, CompositeKind, IdCapability, Link, Path, PathCapability,
        PathDomain, Value, ValueTag,
    },
};
use num_bigint::{BigInt, BigUint};
use serde_json::{Map, Value as Json};
use std::str::FromStr;

type Object = Map<String, Json>;

/// Decode one value node without a memory ceiling.
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    decode_with_gauge(bytes, &Unmetered)
}

/// Decode one value node, metering every allocation against `gauge`.
pub fn decode_with_gauge(bytes: &[u8], gauge: &dyn MemoryGauge) -> Result<Value, DecodeError> {
    let json = parse(bytes)?;

    Decoder { gauge }.value(&json)
}

/// Decode one type node.
pub fn decode_type(bytes: &[u8]) -> Result<Type, DecodeError> {
    decode_type_with_gauge(bytes, &Unmetered)
}

pub fn decode_type_with_gauge(bytes: &[u8], gauge: &dyn MemoryGauge) -> Result<Type, DecodeError> {
    let json = parse(bytes)?;

    Decoder { gauge }.ty(&json)
}

fn parse(bytes: &[u8]) -> Result<Json, DecodeError> {
    serde_json::from_slice(bytes).map_err(|err| DecodeError::InvalidJson(err.to_string()))
}

///
/// Decoder
///

struct Decoder<'g> {
    gauge: &'g dyn MemoryGauge,
}

impl Decoder<'_> {
    fn meter(&self, kind: MemoryKind, len: usize) -> Result<(), DecodeError> {
        self.gauge.meter(MemoryUsage::of_len(kind, len))?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    fn value(&self, json: &Json) -> Result<Value, DecodeError> {
        const CONTEXT: &str = "value node";

        let node = as_object(json, CONTEXT)?;
        let label = get_str(node, CONTEXT, keys::TYPE)?;
        let tag =
            ValueTag::from_label(label).ok_or_else(|| DecodeError::UnknownTag(label.to_string()))?;

        self.meter(MemoryKind::Value, 1)?;

        // Void carries no payload at all.
        if tag == ValueTag::Void {
            if node.len() != 1 {
                return Err(DecodeError::UnexpectedKeys {
                    context: "Void node",
                });
            }

            return Ok(Value::Void);
        }
        if node.len() != 2 {
            return Err(DecodeError::UnexpectedKeys { context: CONTEXT });
        }

        let payload = get(node, CONTEXT, keys::VALUE)?;
        self.payload(tag, payload)
    }

    fn payload(&self, tag: ValueTag, payload: &Json) -> Result<Value, DecodeError> {
        let kind = tag.label();

        let value = match tag {
            ValueTag::Void => Value::Void,
            ValueTag::Optional => {
                if payload.is_null() {
                    Value::none()
                } else {
                    Value::some(self.value(payload)?)
                }
            }
            ValueTag::Bool => Value::Bool(
                payload
                    .as_bool()
                    .ok_or_else(|| DecodeError::shape(kind, "a boolean"))?,
            ),
            ValueTag::Character => {
                let text = self.string(payload, kind)?;
                Value::Character(Character::try_new(text)?)
            }
            ValueTag::String => Value::String(self.string(payload, kind)?.to_string()),
            ValueTag::Address => Value::Address(address(payload)?),

            ValueTag::Int => Value::Int(self.big(payload, kind, true)?),
            ValueTag::Int8 => Value::Int8(native(payload, kind, true)?),
            ValueTag::Int16 => Value::Int16(native(payload, kind, true)?),
            ValueTag::Int32 => Value::Int32(native(payload, kind, true)?),
            ValueTag::Int64 => Value::Int64(native(payload, kind, true)?),
            ValueTag::Int128 => Value::Int128(native(payload, kind, true)?),
            ValueTag::Int256 => {
                let big: BigInt = self.big(payload, kind, true)?;
                let text = big.to_string();
                Value::Int256(Int256::try_new(big).map_err(|_| DecodeError::literal(kind, &text))?)
            }
            ValueTag::UInt => Value::UInt(self.big(payload, kind, false)?),
            ValueTag::UInt8 => Value::UInt8(native(payload, kind, false)?),
            ValueTag::UInt16 => Value::UInt16(native(payload, kind, false)?),
            ValueTag::UInt32 => Value::UInt32(native(payload, kind, false)?),
            ValueTag::UInt64 => Value::UInt64(native(payload, kind, false)?),
            ValueTag::UInt128 => Value::UInt128(native(payload, kind, false)?),
            ValueTag::UInt256 => {
                let big: BigUint = self.big(payload, kind, false)?;
                let text = big.to_string();
                Value::UInt256(
                    UInt256::try_new(big).map_err(|_| DecodeError::literal(kind, &text))?,
                )
            }
            ValueTag::Word8 => Value::Word8(native(payload, kind, false)?),
            ValueTag::Word16 => Value::Word16(native(payload, kind, false)?),
            ValueTag::Word32 => Value::Word32(native(payload, kind, false)?),
            ValueTag::Word64 => Value::Word64(native(payload, kind, false)?),
            ValueTag::Fix64 => {
                let literal = as_str(payload, kind)?;
                Value::Fix64(Fix64::parse(literal).map_err(|_| DecodeError::literal(kind, literal))?)
            }
            ValueTag::UFix64 => {
                let literal = as_str(payload, kind)?;
                Value::UFix64(
                    UFix64::parse(literal).map_err(|_| DecodeError::literal(kind, literal))?,
                )
            }

            ValueTag::Array => Value::Array(self.array(payload)?),
            ValueTag::Dictionary => Value::Dictionary(self.dictionary(payload)?),
            ValueTag::Struct
            | ValueTag::Resource
            | ValueTag::Event
            | ValueTag::Contract
            | ValueTag::Enum => {
                let composite_kind = tag
                    .composite_kind()
                    .ok_or_else(|| DecodeError::UnknownTag(kind.to_string()))?;
                Value::Composite(self.composite(composite_kind, payload)?)
            }
            ValueTag::Link => Value::Link(self.link(payload)?),
            ValueTag::Path => Value::Path(self.path(payload)?),
            ValueTag::Type => {
                let node = as_object(payload, "Type payload")?;
                Value::TypeValue(self.optional_type(get(node, "Type payload", keys::STATIC_TYPE)?)?)
            }
            ValueTag::Capability => Value::Capability(self.capability(payload)?),
        };

        Ok(value)
    }

    fn string<'a>(&self, payload: &'a Json, kind: &'static str) -> Result<&'a str, DecodeError> {
        let text = as_str(payload, kind)?;
        self.meter(MemoryKind::String, text.len())?;

        Ok(text)
    }

    fn raw_string<'a>(
        &self,
        node: &'a Object,
        context: &'static str,
        key: &'static str,
    ) -> Result<&'a str, DecodeError> {
        let text = get_str(node, context, key)?;
        self.meter(MemoryKind::RawString, text.len())?;

        Ok(text)
    }

    fn big<T: FromStr>(
        &self,
        payload: &Json,
        kind: &'static str,
        signed: bool,
    ) -> Result<T, DecodeError> {
        let literal = decimal(payload, kind, signed)?;
        self.meter(MemoryKind::BigInt, literal.len())?;

        literal
            .parse()
            .map_err(|_| DecodeError::literal(kind, literal))
    }

    fn array(&self, payload: &Json) -> Result<Vec<Value>, DecodeError> {
        let elements = payload
            .as_array()
            .ok_or_else(|| DecodeError::shape("Array payload", "an array"))?;
        self.meter(MemoryKind::ArrayElement, elements.len())?;

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.value(element)?);
        }

        Ok(values)
    }

    fn dictionary(&self, payload: &Json) -> Result<Vec<(Value, Value)>, DecodeError> {
        const CONTEXT: &str = "dictionary entry";

        let entries = payload
            .as_array()
            .ok_or_else(|| DecodeError::shape("Dictionary payload", "an array"))?;
        self.meter(MemoryKind::DictionaryEntry, entries.len())?;

        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry = as_object(entry, CONTEXT)?;
            let key = self.value(get(entry, CONTEXT, keys::KEY)?)?;
            let value = self.value(get(entry, CONTEXT, keys::VALUE)?)?;
            pairs.push((key, value));
        }

        Ok(pairs)
    }

    fn composite(&self, kind: CompositeKind, payload: &Json) -> Result<Composite, DecodeError> {
        const CONTEXT: &str = "composite payload";
        const FIELD: &str = "composite field";

        let node = as_object(payload, CONTEXT)?;
        let id = TypeId::decode_known(get_str(node, CONTEXT, keys::ID)?)?;

        let fields = get_array(node, CONTEXT, keys::FIELDS)?;
        self.meter(MemoryKind::CompositeField, fields.len())?;

        let mut decoded = Vec::with_capacity(fields.len());
        for field in fields {
            let field = as_object(field, FIELD)?;
            let name = self.raw_string(field, FIELD, keys::NAME)?;
            let value = self.value(get(field, FIELD, keys::VALUE)?)?;
            decoded.push((name.to_string(), value));
        }

        Ok(Composite::new(kind, id, decoded))
    }

    fn path(&self, payload: &Json) -> Result<Path, DecodeError> {
        const CONTEXT: &str = "Path payload";

        let node = as_object(payload, CONTEXT)?;
        let domain = self.raw_string(node, CONTEXT, keys::DOMAIN)?;
        let identifier = self.raw_string(node, CONTEXT, keys::IDENTIFIER)?;

        Ok(Path::new(PathDomain::parse(domain)?, identifier))
    }

    // A nested value node that must be a Path.
    fn path_node(&self, json: &Json, context: &'static str) -> Result<Path, DecodeError> {
        match self.value(json)? {
            Value::Path(path) => Ok(path),
            _ => Err(DecodeError::shape(context, "a Path value")),
        }
    }

    fn link(&self, payload: &Json) -> Result<Link, DecodeError> {
        const CONTEXT: &str = "Link payload";

        let node = as_object(payload, CONTEXT)?;
        let target = self.path_node(get(node, CONTEXT, keys::TARGET_PATH)?, "link target")?;
        let borrow_type = self.raw_string(node, CONTEXT, keys::BORROW_TYPE)?;

        Ok(Link::new(target, borrow_type))
    }

    fn capability(&self, payload: &Json) -> Result<Capability, DecodeError> {
        const CONTEXT: &str = "Capability payload";

        let node = as_object(payload, CONTEXT)?;
        let address = address(get(node, CONTEXT, keys::ADDRESS)?)?;
        let borrow_type = get(node, CONTEXT, keys::BORROW_TYPE)?;

        match (node.get(keys::PATH), node.get(keys::ID)) {
            (Some(path), None) => {
                let path = self.path_node(path, "capability path")?;
                let borrow_type = self.optional_type(borrow_type)?;

                Ok(Capability::Path(PathCapability::new(address, path, borrow_type)))
            }
            (None, Some(id)) => {
                let id = native(id, "capability ID", false)?;
                let borrow_type = self.ty(borrow_type)?;

                Ok(Capability::Id(IdCapability::new(id, address, borrow_type)))
            }
            _ => Err(DecodeError::shape(
                CONTEXT,
                "addressed by exactly one of 'path' or 'id'",
            )),
        }
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    // `""` stands for an absent type.
    fn optional_type(&self, json: &Json) -> Result<Option<Type>, DecodeError> {
        if json.as_str() == Some("") {
            return Ok(None);
        }

        self.ty(json).map(Some)
    }

    fn ty(&self, json: &Json) -> Result<Type, DecodeError> {
        const CONTEXT: &str = "type node";

        let node = as_object(json, CONTEXT)?;
        let kind = get_str(node, CONTEXT, keys::KIND)?;
        self.meter(MemoryKind::TypeNode, 1)?;

        let inner = |key: &'static str| -> Result<Box<Type>, DecodeError> {
            Ok(Box::new(self.ty(get(node, CONTEXT, key)?)?))
        };

        let ty = match kind {
            kinds::OPTIONAL => Type::Optional(inner(keys::TYPE)?),
            kinds::VARIABLE_SIZED_ARRAY => Type::VariableSizedArray(inner(keys::TYPE)?),
            kinds::CONSTANT_SIZED_ARRAY => {
                let size = get(node, CONTEXT, keys::SIZE)?
                    .as_u64()
                    .ok_or_else(|| DecodeError::shape(keys::SIZE, "an unsigned integer"))?;

                Type::ConstantSizedArray {
                    element: inner(keys::TYPE)?,
                    size,
                }
            }
            kinds::DICTIONARY => Type::Dictionary {
                key: inner(keys::KEY)?,
                value: inner(keys::VALUE)?,
            },
            kinds::CAPABILITY => Type::Capability(
                self.optional_type(get(node, CONTEXT, keys::TYPE)?)?
                    .map(Box::new),
            ),
            kinds::REFERENCE => Type::Reference(ReferenceType {
                authorization: self.authorization(node)?,
                referenced: inner(keys::TYPE)?,
            }),
            kinds::FUNCTION => Type::Function(FunctionType {
                type_id: get_str(node, CONTEXT, keys::TYPE_ID)?.to_string(),
                parameters: self.parameters(get(node, CONTEXT, keys::PARAMETERS)?)?,
                return_type: inner(keys::RETURN)?,
            }),
            kinds::RESTRICTION => {
                let restrictions = get_array(node, CONTEXT, keys::RESTRICTIONS)?
                    .iter()
                    .map(|restriction| self.ty(restriction))
                    .collect::<Result<Vec<_>, _>>()?;

                Type::Restricted(RestrictedType {
                    type_id: get_str(node, CONTEXT, keys::TYPE_ID)?.to_string(),
                    ty: inner(keys::TYPE)?,
                    restrictions,
                })
            }
            other => {
                if let Some(primitive) = PrimitiveKind::from_label(other) {
                    Type::Primitive(primitive)
                } else if let Some(nominal) = CompositeTypeKind::from_label(other) {
                    Type::Composite(self.nominal(node, nominal)?)
                } else {
                    return Err(DecodeError::UnknownKind(other.to_string()));
                }
            }
        };

        Ok(ty)
    }

    fn authorization(&self, node: &Object) -> Result<Authorization, DecodeError> {
        let authorized = get(node, "reference type", keys::AUTHORIZED)?
            .as_bool()
            .ok_or_else(|| DecodeError::shape(keys::AUTHORIZED, "a boolean"))?;

        match (authorized, node.get(keys::ENTITLEMENTS)) {
            (false, None) => Ok(Authorization::Unauthorized),
            (true, None) => Ok(Authorization::Authorized),
            (true, Some(set)) => {
                let set = set
                    .as_array()
                    .ok_or_else(|| DecodeError::shape(keys::ENTITLEMENTS, "an array"))?;

                let mut entitlements = Vec::with_capacity(set.len());
                for entitlement in set {
                    let name = as_str(entitlement, keys::ENTITLEMENTS)?;
                    self.meter(MemoryKind::RawString, name.len())?;
                    entitlements.push(name.to_string());
                }

                Ok(Authorization::Entitlements(entitlements))
            }
            (false, Some(_)) => Err(DecodeError::shape(
                "unauthorized reference",
                "free of entitlements",
            )),
        }
    }

    fn parameters(&self, json: &Json) -> Result<Vec<Parameter>, DecodeError> {
        const CONTEXT: &str = "parameter";

        let params = json
            .as_array()
            .ok_or_else(|| DecodeError::shape(keys::PARAMETERS, "an array"))?;
        self.meter(MemoryKind::Parameter, params.len())?;

        let mut parameters = Vec::with_capacity(params.len());
        for param in params {
            let param = as_object(param, CONTEXT)?;
            parameters.push(Parameter::new(
                self.raw_string(param, CONTEXT, keys::LABEL)?,
                self.raw_string(param, CONTEXT, keys::ID)?,
                self.ty(get(param, CONTEXT, keys::TYPE)?)?,
            ));
        }

        Ok(parameters)
    }

    fn nominal(&self, node: &Object, kind: CompositeTypeKind) -> Result<CompositeType, DecodeError> {
        const CONTEXT: &str = "nominal type";
        const FIELD: &str = "field type";

        let id = TypeId::decode_known(get_str(node, CONTEXT, keys::TYPE_ID)?)?;

        let field_nodes = get_array(node, CONTEXT, keys::FIELDS)?;
        self.meter(MemoryKind::CompositeField, field_nodes.len())?;

        let mut fields = Vec::with_capacity(field_nodes.len());
        for field in field_nodes {
            let field = as_object(field, FIELD)?;
            fields.push(Field::new(
                self.raw_string(field, FIELD, keys::ID)?,
                self.ty(get(field, FIELD, keys::TYPE)?)?,
            ));
        }

        let initializers = get_array(node, CONTEXT, keys::INITIALIZERS)?
            .iter()
            .map(|params| self.parameters(params))
            .collect::<Result<Vec<_>, _>>()?;

        let mut ty = CompositeType::new(kind, id, fields).with_initializers(initializers);

        // Only enums carry a raw type.
        if kind == CompositeTypeKind::Enum
            && let Some(raw) = self.optional_type(get(node, CONTEXT, keys::TYPE)?)?
        {
            ty = ty.with_raw_type(raw);
        }

        Ok(ty)
    }
}

// ----------------------------------------------------------------------
// Shape helpers
// ----------------------------------------------------------------------

fn as_object<'a>(json: &'a Json, context: &'static str) -> Result<&'a Object, DecodeError> {
    json.as_object()
        .ok_or_else(|| DecodeError::shape(context, "an object"))
}

fn as_str<'a>(json: &'a Json, context: &'static str) -> Result<&'a str, DecodeError> {
    json.as_str()
        .ok_or_else(|| DecodeError::shape(context, "a string"))
}

fn get<'a>(
    node: &'a Object,
    context: &'static str,
    key: &'static str,
) -> Result<&'a Json, DecodeError> {
    node.get(key)
        .ok_or(DecodeError::MissingKey { context, key })
}

fn get_str<'a>(
    node: &'a Object,
    context: &'static str,
    key: &'static str,
) -> Result<&'a str, DecodeError> {
    as_str(get(node, context, key)?, key)
}

fn get_array<'a>(
    node: &'a Object,
    context: &'static str,
    key: &'static str,
) -> Result<&'a Vec<Json>, DecodeError> {
    get(node, context, key)?
        .as_array()
        .ok_or_else(|| DecodeError::shape(key, "an array"))
}

// Validate `[-]digits` without touching the number itself.
fn decimal<'a>(json: &'a Json, kind: &'static str, signed: bool) -> Result<&'a str, DecodeError> {
    let literal = as_str(json, kind)?;
    let digits = if signed {
        literal.strip_prefix('-').unwrap_or(literal)
    } else {
        literal
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::literal(kind, literal));
    }

    Ok(literal)
}

fn native<T: FromStr>(json: &Json, kind: &'static str, signed: bool) -> Result<T, DecodeError> {
    let literal = decimal(json, kind, signed)?;

    literal
        .parse()
        .map_err(|_| DecodeError::literal(kind, literal))
}

fn address(json: &Json) -> Result<Address, DecodeError> {
    Ok(Address::from_literal(as_str(json, "Address")?)?)
}
