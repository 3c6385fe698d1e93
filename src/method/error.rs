//! Per-call failures

use crate::types::TypeKey;
use thiserror::Error;

/// Failure raised by a method executor itself.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct MethodFailure(pub String);

impl MethodFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&str> for MethodFailure {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MethodFailure {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Why a dispatched call did not produce a result.
///
/// The three variants let a scripting host tell
/// "no such capability" apart from bad arguments and runtime failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    #[error("no such method '{method}' on {target}")]
    UnknownMethod { method: String, target: TypeKey },

    #[error("bad arguments for '{method}': {reason}")]
    ArgumentMismatch { method: String, reason: String },

    #[error("'{method}' failed: {source}")]
    Execution {
        method: String,
        #[source]
        source: MethodFailure,
    },
}

impl CallError {
    pub fn method(&self) -> &str {
        match self {
            Self::UnknownMethod { method, .. }
            | Self::ArgumentMismatch { method, .. }
            | Self::Execution { method, .. } => method,
        }
    }
}
