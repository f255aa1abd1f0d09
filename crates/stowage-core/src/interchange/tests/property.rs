use crate::{
    interchange::{decode, decode_type, encode, encode_type},
    ty::{
        Authorization, CompositeType, CompositeTypeKind, Field, FunctionType, Location, Parameter,
        ReferenceType, RestrictedType, Type, TypeId,
    },
    types::{Address, Character, Fix64, Int256, UFix64, UInt256},
    value::{
        Capability, Composite, CompositeKind, IdCapability, Link, Path, PathCapability,
        PathDomain, Value,
    },
};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;
use stowage_primitives::ALL_PRIMITIVE_KINDS;

fn arb_address() -> impl Strategy<Value = Address> {
    any::<u64>().prop_map(Address::from_u64)
}

fn arb_path() -> impl Strategy<Value = Path> {
    (
        prop::sample::select(PathDomain::ALL.to_vec()),
        "[a-zA-Z_][a-zA-Z0-9_]{0,12}",
    )
        .prop_map(|(domain, identifier)| Path::new(domain, identifier))
}

fn arb_qualified() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,5}(\\.[A-Z][a-z]{0,5})?"
}

fn arb_type_id() -> impl Strategy<Value = TypeId> {
    prop_oneof![
        (arb_address(), arb_qualified()).prop_map(|(address, qualified)| {
            TypeId::new(Some(Location::for_address(address, &qualified)), qualified)
        }),
        ("[a-z]{0,6}", arb_qualified())
            .prop_map(|(s, qualified)| TypeId::new(Some(Location::String(s)), qualified)),
        ("[a-z]{0,6}", arb_qualified())
            .prop_map(|(s, qualified)| TypeId::new(Some(Location::Identifier(s)), qualified)),
        (prop::collection::vec(any::<u8>(), 0..8), arb_qualified())
            .prop_map(|(b, qualified)| TypeId::new(Some(Location::Transaction(b)), qualified)),
        (prop::collection::vec(any::<u8>(), 0..8), arb_qualified())
            .prop_map(|(b, qualified)| TypeId::new(Some(Location::Script(b)), qualified)),
        Just(TypeId::new(None, "PublicKey".into())),
    ]
}

fn arb_authorization() -> impl Strategy<Value = Authorization> {
    prop_oneof![
        Just(Authorization::Unauthorized),
        Just(Authorization::Authorized),
        prop::collection::vec("[A-Z][a-z]{0,6}", 0..3).prop_map(Authorization::Entitlements),
    ]
}

fn arb_type() -> impl Strategy<Value = Type> {
    let leaf = prop::sample::select(ALL_PRIMITIVE_KINDS.to_vec()).prop_map(Type::Primitive);

    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(Type::optional),
            inner.clone().prop_map(Type::array),
            (inner.clone(), any::<u64>()).prop_map(|(element, size)| {
                Type::ConstantSizedArray {
                    element: Box::new(element),
                    size,
                }
            }),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Type::dictionary(k, v)),
            prop::option::of(inner.clone()).prop_map(|t| Type::Capability(t.map(Box::new))),
            (arb_authorization(), inner.clone())
                .prop_map(|(auth, t)| Type::Reference(ReferenceType::new(auth, t))),
            (
                "[a-z]{0,4}",
                prop::collection::vec(("[a-z_]{1,3}", "[a-z]{1,3}", inner.clone()), 0..3),
                inner.clone(),
            )
                .prop_map(|(type_id, params, ret)| {
                    Type::Function(FunctionType {
                        type_id,
                        parameters: params
                            .into_iter()
                            .map(|(label, id, ty)| Parameter::new(label, id, ty))
                            .collect(),
                        return_type: Box::new(ret),
                    })
                }),
            ("[a-z]{0,4}", inner.clone(), prop::collection::vec(inner.clone(), 0..3)).prop_map(
                |(type_id, ty, restrictions)| {
                    Type::Restricted(RestrictedType {
                        type_id,
                        ty: Box::new(ty),
                        restrictions,
                    })
                }
            ),
            (
                prop::sample::select(CompositeTypeKind::ALL.to_vec()),
                arb_type_id(),
                prop::collection::vec(("[a-z]{1,4}", inner.clone()), 0..3),
                prop::option::of(inner),
            )
                .prop_map(|(kind, id, fields, raw)| {
                    let fields = fields
                        .into_iter()
                        .map(|(name, ty)| Field::new(name, ty))
                        .collect();
                    let ty = CompositeType::new(kind, id, fields);

                    match (kind, raw) {
                        (CompositeTypeKind::Enum, Some(raw)) => Type::Composite(ty.with_raw_type(raw)),
                        _ => Type::Composite(ty),
                    }
                }),
        ]
    })
}

fn arb_scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Void),
        any::<bool>().prop_map(Value::Bool),
        any::<char>().prop_map(|c| Value::Character(Character::try_from(c).expect("one char"))),
        any::<String>().prop_map(Value::String),
        arb_address().prop_map(Value::Address),
        any::<i128>().prop_map(|n| Value::Int(BigInt::from(n) * 1_000_003)),
        any::<i8>().prop_map(Value::Int8),
        any::<i16>().prop_map(Value::Int16),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        any::<i128>().prop_map(Value::Int128),
        prop_oneof![
            any::<i128>().prop_map(Int256::from),
            Just(Int256::max_value()),
            Just(Int256::min_value()),
        ]
        .prop_map(Value::Int256),
        any::<u128>().prop_map(|n| Value::UInt(BigUint::from(n) * 7u8)),
        any::<u8>().prop_map(Value::UInt8),
        any::<u16>().prop_map(Value::UInt16),
        any::<u32>().prop_map(Value::UInt32),
        any::<u64>().prop_map(Value::UInt64),
        any::<u128>().prop_map(Value::UInt128),
        prop_oneof![any::<u128>().prop_map(UInt256::from), Just(UInt256::max_value())]
            .prop_map(Value::UInt256),
        any::<u8>().prop_map(Value::Word8),
        any::<u16>().prop_map(Value::Word16),
        any::<u32>().prop_map(Value::Word32),
        any::<u64>().prop_map(Value::Word64),
        any::<i64>().prop_map(|n| Value::Fix64(Fix64::from_atomic(n))),
        any::<u64>().prop_map(|n| Value::UFix64(UFix64::from_atomic(n))),
        arb_path().prop_map(Value::Path),
        (arb_path(), "[A-Za-z&{}<>.]{0,12}")
            .prop_map(|(path, borrow)| Value::Link(Link::new(path, borrow))),
        prop::option::of(arb_type()).prop_map(Value::TypeValue),
        (arb_address(), arb_path(), prop::option::of(arb_type())).prop_map(
            |(address, path, borrow)| {
                Value::Capability(Capability::Path(PathCapability::new(address, path, borrow)))
            }
        ),
        (any::<u64>(), arb_address(), arb_type()).prop_map(|(id, address, borrow)| {
            Value::Capability(Capability::Id(IdCapability::new(id, address, borrow)))
        }),
    ]
}

fn arb_composite_kind() -> impl Strategy<Value = CompositeKind> {
    prop_oneof![
        Just(CompositeKind::Struct),
        Just(CompositeKind::Resource),
        Just(CompositeKind::Event),
        Just(CompositeKind::Contract),
        Just(CompositeKind::Enum),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar_value().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::option::of(inner.clone()).prop_map(|v| Value::Optional(v.map(Box::new))),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((inner.clone(), inner.clone()), 0..4).prop_map(Value::Dictionary),
            (
                arb_composite_kind(),
                arb_type_id(),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..4),
            )
                .prop_map(|(kind, id, fields)| Value::Composite(Composite::new(kind, id, fields))),
        ]
    })
}

proptest! {
    #[test]
    fn value_round_trip(value in arb_value()) {
        let bytes = encode(&value).expect("encode");
        let decoded = decode(&bytes).expect("decode");

        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn type_round_trip(ty in arb_type()) {
        let bytes = encode_type(&ty).expect("encode");
        let decoded = decode_type(&bytes).expect("decode");

        prop_assert_eq!(decoded, ty);
    }

    #[test]
    fn encoding_is_deterministic(value in arb_value()) {
        prop_assert_eq!(encode(&value).expect("encode"), encode(&value.clone()).expect("encode"));
    }

    #[test]
    fn type_id_round_trip(id in arb_type_id()) {
        let decoded = TypeId::decode_known(&id.to_string()).expect("decode");

        prop_assert_eq!(decoded, id);
    }
}
