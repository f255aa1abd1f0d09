use derive_more::{Deref, Display};
use thiserror::Error as ThisError;
use unicode_segmentation::UnicodeSegmentation;

///
/// CharacterError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CharacterError {
    #[error("character literal is empty")]
    Empty,

    #[error("'{0}' is more than one character")]
    Multiple(String),
}

///
/// Character
///
/// Exactly one extended grapheme cluster.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Character(String);

impl Character {
    pub fn try_new(text: impl Into<String>) -> Result<Self, CharacterError> {
        let text = text.into();
        validate(&text)?;

        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<char> for Character {
    type Error = CharacterError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::try_new(c.to_string())
    }
}

fn validate(text: &str) -> Result<(), CharacterError> {
    match text.graphemes(true).count() {
        0 => Err(CharacterError::Empty),
        1 => Ok(()),
        _ => Err(CharacterError::Multiple(text.to_string())),
    }
}

///
/// TESTS
///
