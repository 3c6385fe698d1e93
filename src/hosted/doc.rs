//! Method documentation for script-side introspection

use crate::adapter::AdaptedClass;
use crate::method::{ArgType, MethodDescriptor, MethodOrigin, ParamSpec};
use serde::{Deserialize, Serialize};

/// Serializable description of one method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDoc {
    pub name: String,
    pub signature: String,
    pub params: Vec<ParamSpec>,
    pub returns: ArgType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: MethodOrigin,
}

impl MethodDoc {
    pub fn from_descriptor<E>(descriptor: &MethodDescriptor<E>) -> Self {
        Self {
            name: descriptor.name().to_string(),
            signature: descriptor.signature(),
            params: descriptor.params().to_vec(),
            returns: descriptor.returns(),
            description: descriptor.doc().map(str::to_string),
            source: descriptor.origin().clone(),
        }
    }
}

/// Docs for every method of a class, sorted by name
pub fn describe_class<E>(class: &AdaptedClass<E>) -> Vec<MethodDoc> {
    class
        .methods()
        .map(|descriptor| MethodDoc::from_descriptor(descriptor.as_ref()))
        .collect()
}
