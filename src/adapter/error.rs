//! Registration-time failures
//!
//! None of these are fatal: the manager logs them and the offending
//! adapter is simply unavailable.

use crate::types::TypeKey;
use thiserror::Error;

/// Raised by an adapter's own `declare` step (the "reflection" failure).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct DeclarationError(pub String);

impl DeclarationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("adapter {adapter} targets the root type {target}")]
    RootTarget { adapter: String, target: TypeKey },

    #[error("adapter {adapter} targets unknown type {target}")]
    UnknownTarget { adapter: String, target: TypeKey },

    #[error("adapter {adapter} failed to declare its methods: {source}")]
    Declaration {
        adapter: String,
        #[source]
        source: DeclarationError,
    },

    #[error("adapter {adapter} declares invalid method name '{method}'")]
    InvalidMethodName { adapter: String, method: String },

    #[error("adapter {adapter} declares method '{method}' more than once")]
    DuplicateMethod { adapter: String, method: String },

    #[error("adapter {adapter}: method '{method}' has a required parameter after an optional one")]
    ParameterOrder { adapter: String, method: String },
}

impl RegistrationError {
    /// Name of the adapter that was rejected
    pub fn adapter(&self) -> &str {
        match self {
            Self::RootTarget { adapter, .. }
            | Self::UnknownTarget { adapter, .. }
            | Self::Declaration { adapter, .. }
            | Self::InvalidMethodName { adapter, .. }
            | Self::DuplicateMethod { adapter, .. }
            | Self::ParameterOrder { adapter, .. } => adapter,
        }
    }
}
