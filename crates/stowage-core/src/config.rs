//! Run configuration, loaded from TOML.

use crate::{
    budget::MemoryBudget,
    error::{ErrorClass, ErrorOrigin, InternalError},
    value::PathDomain,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Read { .. } => ErrorClass::NotFound,
            Self::Parse(_) | Self::Invalid(_) => ErrorClass::Unsupported,
        }
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(err.class(), ErrorOrigin::Config, err.to_string())
    }
}

///
/// MigrationConfig
///
/// Settings shared by every worker of a run.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    /// Domains visited per account, in order.
    pub domains: Vec<PathDomain>,

    /// Abort the run on the first per-value failure instead of recording it.
    pub halt_on_first_error: bool,

    /// Unit ceiling applied to each decoded value. `None` leaves decoding
    /// unmetered.
    pub memory_limit: Option<u64>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            domains: PathDomain::ALL.to_vec(),
            halt_on_first_error: false,
            memory_limit: None,
        }
    }
}

impl MigrationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub const fn with_halt_on_first_error(mut self, halt: bool) -> Self {
        self.halt_on_first_error = halt;
        self
    }

    #[must_use]
    pub fn with_domains(mut self, domains: impl IntoIterator<Item = PathDomain>) -> Self {
        self.domains = domains.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_memory_limit(mut self, limit: u64) -> Self {
        self.memory_limit = Some(limit);
        self
    }

    /// Fresh budget for one decode pass, if a limit is configured.
    #[must_use]
    pub fn memory_budget(&self) -> Option<MemoryBudget> {
        self.memory_limit.map(MemoryBudget::new)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (i, domain) in self.domains.iter().enumerate() {
            if self.domains[..i].contains(domain) {
                return Err(ConfigError::Invalid(format!("domain '{domain}' listed twice")));
            }
        }

        Ok(())
    }
}

///
/// TESTS
///
