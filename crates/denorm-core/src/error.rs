use crate::{config::ConfigError, store::StoreError, value::Value};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// DenormalizeError
///
/// Every failure the engine can raise. Errors abort the whole call; there is
/// no partial result. A missing entity is not an error (see `Marker`).
///

#[derive(Debug, ThisError)]
pub enum DenormalizeError {
    #[error("argument {argument} is required")]
    MissingArgument { argument: &'static str },

    #[error("unknown schema [{schema}]: {reason}")]
    UnknownSchema { schema: String, reason: &'static str },

    #[error("unknown union variant '{tag}' (expected one of: {})", .expected.join(", "))]
    UnknownVariant {
        tag: String,
        expected: Vec<&'static str>,
    },

    #[error("invalid selector for {schema}: expected {expected}, found {found:?}")]
    InvalidSelector {
        schema: String,
        expected: &'static str,
        found: Value,
    },
}

impl DenormalizeError {
    pub(crate) const fn missing(argument: &'static str) -> Self {
        Self::MissingArgument { argument }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingArgument { .. } | Self::InvalidSelector { .. } => ErrorClass::Argument,
            Self::UnknownSchema { .. } | Self::UnknownVariant { .. } => ErrorClass::Schema,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Stable classification of engine errors.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    #[display("argument")]
    Argument,
    #[display("schema")]
    Schema,
}

///
/// Error
///
/// Umbrella error for callers that load config and snapshots as well as
/// denormalize; the engine itself only returns `DenormalizeError`.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Denormalize(#[from] DenormalizeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
