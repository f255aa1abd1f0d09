use super::*;
use crate::ty::{Location, TypeId};

fn test_id(name: &str) -> TypeId {
    TypeId::new(Some(Location::String("test".into())), name.to_string())
}

fn vault(balance: u64) -> Composite {
    Composite::new(
        CompositeKind::Resource,
        test_id("Vault"),
        vec![
            ("uuid".into(), Value::UInt64(1)),
            ("balance".into(), Value::UFix64(UFix64::from_units(balance))),
        ],
    )
}

#[test]
fn composite_field_types_follow_values() {
    let composite = vault(10);
    let names: Vec<&str> = composite.ty().fields.iter().map(|f| f.identifier.as_str()).collect();

    assert_eq!(names, ["uuid", "balance"]);
    assert_eq!(
        composite.ty().field("balance").map(|f| &f.ty),
        Some(&Type::Primitive(PrimitiveKind::UFix64))
    );
    assert_eq!(composite.field("uuid"), Some(&Value::UInt64(1)));
    assert!(composite.is_resource());
}

#[test]
fn replace_field_values_rejects_length_mismatch() {
    let mut composite = vault(1);
    let before = composite.clone();

    let err = composite
        .replace_field_values(vec![Value::UInt64(2)])
        .expect_err("one value for two fields");

    assert_eq!(err, FieldCountMismatch { expected: 2, actual: 1 });
    assert_eq!(composite, before);
}

#[test]
fn replace_field_values_swaps_and_retypes() {
    let mut composite = vault(1);

    let old = composite
        .replace_field_values(vec![Value::UInt64(9), Value::string("x")])
        .expect("same length");

    assert_eq!(old[0], Value::UInt64(1));
    assert_eq!(composite.field("balance"), Some(&Value::string("x")));
    assert_eq!(
        composite.ty().field("balance").map(|f| &f.ty),
        Some(&Type::Primitive(PrimitiveKind::String))
    );
}

#[test]
fn container_static_types() {
    let uniform = Value::Array(vec![Value::Int8(1), Value::Int8(2)]);
    let mixed = Value::Array(vec![Value::Int8(1), Value::Bool(true)]);
    let resources = Value::Array(vec![vault(1).into(), Value::Bool(true)]);
    let empty = Value::Dictionary(Vec::new());

    assert_eq!(
        uniform.static_type(),
        Type::array(Type::Primitive(PrimitiveKind::Int8))
    );
    assert_eq!(
        mixed.static_type(),
        Type::array(Type::Primitive(PrimitiveKind::AnyStruct))
    );
    assert_eq!(
        resources.static_type(),
        Type::array(Type::Primitive(PrimitiveKind::AnyResource))
    );
    assert_eq!(
        empty.static_type(),
        Type::dictionary(
            Type::Primitive(PrimitiveKind::Never),
            Type::Primitive(PrimitiveKind::Never)
        )
    );
    assert!(resources.is_resource());
    assert!(!uniform.is_resource());
}

#[test]
fn path_static_type_follows_domain() {
    for (domain, kind) in [
        (PathDomain::Storage, PrimitiveKind::StoragePath),
        (PathDomain::Private, PrimitiveKind::PrivatePath),
        (PathDomain::Public, PrimitiveKind::PublicPath),
    ] {
        let value = Value::Path(Path::new(domain, "flowTokenVault"));
        assert_eq!(value.static_type(), Type::Primitive(kind));
    }
}

#[test]
fn path_domain_parse_is_closed() {
    assert_eq!(PathDomain::parse("public"), Ok(PathDomain::Public));
    assert_eq!(
        PathDomain::parse("Public"),
        Err(PathError::UnknownDomain("Public".into()))
    );
}

#[test]
fn address_path_display() {
    let path = AddressPath::new(Address::from_u64(1), Path::new(PathDomain::Public, "receiver"));

    assert_eq!(path.to_string(), "0x0000000000000001/public/receiver");
}

#[test]
fn capability_eras() {
    let borrow = Type::reference(
        crate::ty::Authorization::Unauthorized,
        Type::Primitive(PrimitiveKind::AnyStruct),
    );
    let legacy = Capability::Path(PathCapability::new(
        Address::from_u64(2),
        Path::new(PathDomain::Public, "cap"),
        None,
    ));
    let current = Capability::Id(IdCapability::new(7, Address::from_u64(2), borrow.clone()));

    assert!(legacy.is_legacy());
    assert_eq!(legacy.borrow_type(), None);
    assert!(!current.is_legacy());
    assert_eq!(current.borrow_type(), Some(&borrow));
    assert_eq!(
        Value::Capability(current).static_type(),
        Type::Capability(Some(Box::new(borrow)))
    );
}

#[test]
fn tags_cover_every_label_once() {
    for tag in ValueTag::ALL {
        assert_eq!(ValueTag::from_label(tag.label()), Some(tag));
    }
    assert_eq!(ValueTag::from_label("Bogus"), None);
    assert_eq!(Value::from(vault(1)).tag(), ValueTag::Resource);
    assert_eq!(Value::TypeValue(None).tag().label(), "Type");
}

#[test]
fn inspect_visits_parents_first() {
    let value = Value::Array(vec![
        Value::some(Value::from(vault(3))),
        Value::Dictionary(vec![(Value::from("k"), Value::Bool(false))]),
    ]);
    let mut tags = Vec::new();

    value.inspect(&mut |v| tags.push(v.tag()));

    assert_eq!(tags[..3], [ValueTag::Array, ValueTag::Optional, ValueTag::Resource]);
    assert_eq!(
        tags[tags.len() - 3..],
        [ValueTag::Dictionary, ValueTag::String, ValueTag::Bool]
    );
}
