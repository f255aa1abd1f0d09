// NOTE: Labels are wire-stable. They appear verbatim as the `"kind"` of
// interchange type nodes and must not be renamed.
// NOTE: bit_width = 0 means "unbounded or not a sized number".
#[macro_export]
macro_rules! primitive_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Any, "Any", Abstract, is_signed = false, bit_width = 0, is_legacy = false),
            (AnyStruct, "AnyStruct", Abstract, is_signed = false, bit_width = 0, is_legacy = false),
            (AnyResource, "AnyResource", Abstract, is_signed = false, bit_width = 0, is_legacy = false),
            (MetaType, "Type", Simple, is_signed = false, bit_width = 0, is_legacy = false),
            (Void, "Void", Simple, is_signed = false, bit_width = 0, is_legacy = false),
            (Never, "Never", Simple, is_signed = false, bit_width = 0, is_legacy = false),
            (Bool, "Bool", Simple, is_signed = false, bit_width = 0, is_legacy = false),
            (String, "String", Text, is_signed = false, bit_width = 0, is_legacy = false),
            (Character, "Character", Text, is_signed = false, bit_width = 0, is_legacy = false),
            (Bytes, "Bytes", Simple, is_signed = false, bit_width = 0, is_legacy = false),
            (Address, "Address", Simple, is_signed = false, bit_width = 64, is_legacy = false),
            (Number, "Number", NumericSupertype, is_signed = false, bit_width = 0, is_legacy = false),
            (SignedNumber, "SignedNumber", NumericSupertype, is_signed = true, bit_width = 0, is_legacy = false),
            (Integer, "Integer", NumericSupertype, is_signed = false, bit_width = 0, is_legacy = false),
            (SignedInteger, "SignedInteger", NumericSupertype, is_signed = true, bit_width = 0, is_legacy = false),
            (FixedPoint, "FixedPoint", NumericSupertype, is_signed = false, bit_width = 0, is_legacy = false),
            (SignedFixedPoint, "SignedFixedPoint", NumericSupertype, is_signed = true, bit_width = 0, is_legacy = false),
            (Int, "Int", Integer, is_signed = true, bit_width = 0, is_legacy = false),
            (Int8, "Int8", Integer, is_signed = true, bit_width = 8, is_legacy = false),
            (Int16, "Int16", Integer, is_signed = true, bit_width = 16, is_legacy = false),
            (Int32, "Int32", Integer, is_signed = true, bit_width = 32, is_legacy = false),
            (Int64, "Int64", Integer, is_signed = true, bit_width = 64, is_legacy = false),
            (Int128, "Int128", Integer, is_signed = true, bit_width = 128, is_legacy = false),
            (Int256, "Int256", Integer, is_signed = true, bit_width = 256, is_legacy = false),
            (UInt, "UInt", Integer, is_signed = false, bit_width = 0, is_legacy = false),
            (UInt8, "UInt8", Integer, is_signed = false, bit_width = 8, is_legacy = false),
            (UInt16, "UInt16", Integer, is_signed = false, bit_width = 16, is_legacy = false),
            (UInt32, "UInt32", Integer, is_signed = false, bit_width = 32, is_legacy = false),
            (UInt64, "UInt64", Integer, is_signed = false, bit_width = 64, is_legacy = false),
            (UInt128, "UInt128", Integer, is_signed = false, bit_width = 128, is_legacy = false),
            (UInt256, "UInt256", Integer, is_signed = false, bit_width = 256, is_legacy = false),
            (Word8, "Word8", Word, is_signed = false, bit_width = 8, is_legacy = false),
            (Word16, "Word16", Word, is_signed = false, bit_width = 16, is_legacy = false),
            (Word32, "Word32", Word, is_signed = false, bit_width = 32, is_legacy = false),
            (Word64, "Word64", Word, is_signed = false, bit_width = 64, is_legacy = false),
            (Fix64, "Fix64", FixedPoint, is_signed = true, bit_width = 64, is_legacy = false),
            (UFix64, "UFix64", FixedPoint, is_signed = false, bit_width = 64, is_legacy = false),
            (Path, "Path", Path, is_signed = false, bit_width = 0, is_legacy = false),
            (CapabilityPath, "CapabilityPath", Path, is_signed = false, bit_width = 0, is_legacy = false),
            (StoragePath, "StoragePath", Path, is_signed = false, bit_width = 0, is_legacy = false),
            (PublicPath, "PublicPath", Path, is_signed = false, bit_width = 0, is_legacy = false),
            (PrivatePath, "PrivatePath", Path, is_signed = false, bit_width = 0, is_legacy = false),
            (AuthAccount, "AuthAccount", Account, is_signed = false, bit_width = 0, is_legacy = true),
            (PublicAccount, "PublicAccount", Account, is_signed = false, bit_width = 0, is_legacy = true),
            (AuthAccountKeys, "AuthAccount.Keys", Account, is_signed = false, bit_width = 0, is_legacy = true),
            (PublicAccountKeys, "PublicAccount.Keys", Account, is_signed = false, bit_width = 0, is_legacy = true),
            (AuthAccountContracts, "AuthAccount.Contracts", Account, is_signed = false, bit_width = 0, is_legacy = true),
            (PublicAccountContracts, "PublicAccount.Contracts", Account, is_signed = false, bit_width = 0, is_legacy = true),
            (DeployedContract, "DeployedContract", Account, is_signed = false, bit_width = 0, is_legacy = false),
            (AccountKey, "AccountKey", Account, is_signed = false, bit_width = 0, is_legacy = false),
            (Account, "Account", Account, is_signed = false, bit_width = 0, is_legacy = false),
        }
    };
}

#[macro_export]
macro_rules! primitive_kind_registry {
    ($macro:ident) => {
        $crate::primitive_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::primitive_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($primitive:ident, $label:literal, $family:ident, is_signed = $is_signed:expr, bit_width = $bit_width:expr, is_legacy = $is_legacy:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::PrimitiveKind::$primitive => $crate::PrimitiveMetadata {
                    label: $label,
                    family: $crate::PrimitiveFamily::$family,
                    is_signed: $is_signed,
                    bit_width: $bit_width,
                    is_legacy: $is_legacy,
                },
            )*
        }
    };
}

macro_rules! from_label_from_registry {
    ( @args $label_arg:expr; @entries $( ($primitive:ident, $label:literal, $family:ident, is_signed = $is_signed:expr, bit_width = $bit_width:expr, is_legacy = $is_legacy:expr) ),* $(,)? ) => {
        match $label_arg {
            $( $label => Some($crate::PrimitiveKind::$primitive), )*
            _ => None,
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($primitive:ident, $label:literal, $family:ident, is_signed = $is_signed:expr, bit_width = $bit_width:expr, is_legacy = $is_legacy:expr) ),* $(,)? ) => {
        [ $( $crate::PrimitiveKind::$primitive ),* ]
    };
}
