//! Parameter and return shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value kinds a scripting host can pass or receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    String,
    Number,
    Boolean,
    /// Array or map
    Table,
    /// Anything but nil
    Any,
    /// No value; only meaningful as a return shape
    Void,
}

impl ArgType {
    /// Does `value` have this shape?
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Table => value.is_array() || value.is_object(),
            Self::Any => !value.is_null(),
            Self::Void => value.is_null(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Table => "table",
            Self::Any => "any",
            Self::Void => "void",
        }
    }
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared shape of one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ArgType,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, kind: ArgType) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
            description: None,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ArgType) -> Self {
        Self {
            optional: true,
            ..Self::required(name, kind)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Check `args` against `params`, returning a human-readable reason on mismatch.
pub(crate) fn check_shape(params: &[ParamSpec], args: &[Value]) -> Result<(), String> {
    let required = params.iter().filter(|p| !p.optional).count();
    if args.len() < required {
        return Err(format!(
            "expected at least {} argument(s), got {}",
            required,
            args.len()
        ));
    }
    if args.len() > params.len() {
        return Err(format!(
            "expected at most {} argument(s), got {}",
            params.len(),
            args.len()
        ));
    }

    for (idx, (param, value)) in params.iter().zip(args).enumerate() {
        if param.optional && value.is_null() {
            continue;
        }
        if !param.kind.matches(value) {
            return Err(format!(
                "argument #{} ({}) must be {}, got {}",
                idx + 1,
                param.name,
                param.kind,
                json_kind(value)
            ));
        }
    }
    Ok(())
}

/// Signature string such as `(slot: number, count?: number)`
pub(crate) fn signature(params: &[ParamSpec]) -> String {
    let rendered: Vec<String> = params
        .iter()
        .map(|p| {
            let marker = if p.optional { "?" } else { "" };
            format!("{}{}: {}", p.name, marker, p.kind)
        })
        .collect();
    format!("({})", rendered.join(", "))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "table",
    }
}
