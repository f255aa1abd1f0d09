use crate::{ALL_PRIMITIVE_KINDS, PrimitiveFamily, PrimitiveKind};
use std::collections::HashSet;

#[test]
fn every_label_resolves_back_to_its_kind() {
    for kind in ALL_PRIMITIVE_KINDS {
        assert_eq!(
            PrimitiveKind::from_label(kind.label()),
            Some(kind),
            "label {} must round-trip",
            kind.label()
        );
    }
}

#[test]
fn labels_are_unique() {
    let labels: HashSet<_> = ALL_PRIMITIVE_KINDS.iter().map(|k| k.label()).collect();

    assert_eq!(labels.len(), ALL_PRIMITIVE_KINDS.len());
}

#[test]
fn unknown_label_is_rejected() {
    assert_eq!(PrimitiveKind::from_label("Bogus"), None);
    assert_eq!(PrimitiveKind::from_label("int8"), None);
}

#[test]
fn meta_type_uses_type_label() {
    assert_eq!(PrimitiveKind::MetaType.label(), "Type");
    assert_eq!(
        PrimitiveKind::from_label("AuthAccount.Keys"),
        Some(PrimitiveKind::AuthAccountKeys)
    );
}

#[test]
fn integer_metadata_matches_width_and_sign() {
    assert_eq!(PrimitiveKind::Int256.bit_width(), Some(256));
    assert!(PrimitiveKind::Int256.is_signed());
    assert_eq!(PrimitiveKind::UInt.bit_width(), None);
    assert!(!PrimitiveKind::UInt.is_signed());
    assert!(PrimitiveKind::Word16.is_integer());
    assert!(PrimitiveKind::UFix64.is_fixed_point());
    assert_eq!(PrimitiveKind::Fix64.family(), PrimitiveFamily::FixedPoint);
}

#[test]
fn supertypes_and_simple_kinds_have_their_own_families() {
    for kind in [PrimitiveKind::Number, PrimitiveKind::SignedFixedPoint] {
        assert_eq!(kind.family(), PrimitiveFamily::NumericSupertype);
    }
    for kind in [PrimitiveKind::Bool, PrimitiveKind::Address, PrimitiveKind::MetaType] {
        assert_eq!(kind.family(), PrimitiveFamily::Simple);
    }
    assert_eq!(PrimitiveKind::AnyStruct.family(), PrimitiveFamily::Abstract);
}

#[test]
fn only_old_account_types_are_legacy() {
    let legacy: Vec<_> = ALL_PRIMITIVE_KINDS
        .into_iter()
        .filter(|k| k.is_legacy())
        .collect();

    assert!(legacy.contains(&PrimitiveKind::AuthAccount));
    assert!(!legacy.contains(&PrimitiveKind::Account));
    assert!(legacy.iter().all(|k| k.family() == PrimitiveFamily::Account));
}
