//! TypeKey: identity of a host class or interface

use serde::{Deserialize, Serialize};

/// Identifies a concrete or abstract type in the host's type system.
///
/// Serializes as a plain string (e.g. `"tile.furnace"`, `"INode"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(String);

impl TypeKey {
    /// Key of the default universal root type.
    pub const DEFAULT_ROOT: &'static str = "object";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The default universal root type
    pub fn root() -> Self {
        Self(Self::DEFAULT_ROOT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_key_serializes_as_string() {
        let key = TypeKey::from("tile.furnace");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"tile.furnace\"");

        let back: TypeKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn root_uses_default_key() {
        assert_eq!(TypeKey::root().as_str(), "object");
    }
}
