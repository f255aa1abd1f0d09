//! Canonical self-describing JSON interchange for values and types.
//!
//! Every value node is `{"type": <tag>, "value": <payload>}`, except `Void`
//! which is `{"type": "Void"}`. Numbers travel as decimal strings.

mod decode;
mod encode;
mod error;


pub use decode::{decode, decode_type, decode_type_with_gauge, decode_with_gauge};
pub use encode::{encode, encode_type, type_to_json, value_to_json};
pub use error::{DecodeError, EncodeError};

///
/// Keys
///

pub(crate) mod keys {
    pub const TYPE: &str = "type";
    pub const KIND: &str = "kind";
    pub const VALUE: &str = "value";
    pub const KEY: &str = "key";
    pub const NAME: &str = "name";
    pub const FIELDS: &str = "fields";
    pub const INITIALIZERS: &str = "initializers";
    pub const ID: &str = "id";
    pub const TARGET_PATH: &str = "targetPath";
    pub const BORROW_TYPE: &str = "borrowType";
    pub const DOMAIN: &str = "domain";
    pub const IDENTIFIER: &str = "identifier";
    pub const STATIC_TYPE: &str = "staticType";
    pub const ADDRESS: &str = "address";
    pub const PATH: &str = "path";
    pub const AUTHORIZED: &str = "authorized";
    pub const ENTITLEMENTS: &str = "entitlements";
    pub const SIZE: &str = "size";
    pub const TYPE_ID: &str = "typeID";
    pub const RESTRICTIONS: &str = "restrictions";
    pub const LABEL: &str = "label";
    pub const PARAMETERS: &str = "parameters";
    pub const RETURN: &str = "return";
}

///
/// Type kinds that are not primitive leaves or nominal composites.
///

pub(crate) mod kinds {
    pub const OPTIONAL: &str = "Optional";
    pub const VARIABLE_SIZED_ARRAY: &str = "VariableSizedArray";
    pub const CONSTANT_SIZED_ARRAY: &str = "ConstantSizedArray";
    pub const DICTIONARY: &str = "Dictionary";
    pub const CAPABILITY: &str = "Capability";
    pub const REFERENCE: &str = "Reference";
    pub const FUNCTION: &str = "Function";
    pub const RESTRICTION: &str = "Restriction";
}
