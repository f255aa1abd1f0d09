use crate::{
    budget::BudgetError,
    error::{ErrorClass, ErrorOrigin, InternalError},
    ty::TypeIdError,
    types::{AddressError, CharacterError},
    value::PathError,
};
use thiserror::Error as ThisError;

///
/// DecodeError
///
/// Every variant except `MemoryLimitExceeded` is an invalid-structure
/// failure and renders with the same prefix. Callers that only need the
/// coarse signal use [`DecodeError::is_invalid_structure`].
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecodeError {
    #[error("invalid interchange structure: malformed JSON: {0}")]
    InvalidJson(String),

    #[error("invalid interchange structure: {context} must be {expected}")]
    UnexpectedShape {
        context: &'static str,
        expected: &'static str,
    },

    #[error("invalid interchange structure: {context} is missing key '{key}'")]
    MissingKey {
        context: &'static str,
        key: &'static str,
    },

    #[error("invalid interchange structure: {context} has unexpected keys")]
    UnexpectedKeys { context: &'static str },

    #[error("invalid interchange structure: unknown value type '{0}'")]
    UnknownTag(String),

    #[error("invalid interchange structure: unknown type kind '{0}'")]
    UnknownKind(String),

    #[error("invalid interchange structure: invalid {kind} literal '{literal}'")]
    InvalidLiteral { kind: &'static str, literal: String },

    #[error("invalid interchange structure: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("invalid interchange structure: {0}")]
    InvalidCharacter(#[from] CharacterError),

    #[error("invalid interchange structure: {0}")]
    InvalidPath(#[from] PathError),

    #[error("invalid interchange structure: {0}")]
    InvalidTypeId(#[from] TypeIdError),

    #[error("memory limit exceeded while decoding: {0}")]
    MemoryLimitExceeded(#[from] BudgetError),
}

impl DecodeError {
    #[must_use]
    pub const fn is_invalid_structure(&self) -> bool {
        !matches!(self, Self::MemoryLimitExceeded(_))
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MemoryLimitExceeded(_) => ErrorClass::LimitExceeded,
            _ => ErrorClass::Corruption,
        }
    }

    pub(crate) const fn shape(context: &'static str, expected: &'static str) -> Self {
        Self::UnexpectedShape { context, expected }
    }

    pub(crate) fn literal(kind: &'static str, literal: &str) -> Self {
        Self::InvalidLiteral {
            kind,
            literal: literal.to_string(),
        }
    }
}

impl From<DecodeError> for InternalError {
    fn from(err: DecodeError) -> Self {
        Self::new(err.class(), ErrorOrigin::Interchange, err.to_string())
    }
}

///
/// EncodeError
///

#[derive(Debug, ThisError)]
pub enum EncodeError {
    #[error("failed to serialize interchange JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EncodeError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Internal
    }
}

impl From<EncodeError> for InternalError {
    fn from(err: EncodeError) -> Self {
        Self::new(err.class(), ErrorOrigin::Interchange, err.to_string())
    }
}
