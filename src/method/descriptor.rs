//! Method declarations (author-facing) and descriptors (resolved, immutable)

use super::error::CallError;
use super::shape::{check_shape, signature, ArgType, ParamSpec};
use crate::types::TypeKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One declared operation, built through [`MethodTable`].
#[derive(Debug, Clone)]
pub struct MethodDeclaration<E> {
    pub(crate) name: String,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) returns: ArgType,
    pub(crate) doc: Option<String>,
    pub(crate) executor: E,
}

impl<E> MethodDeclaration<E> {
    pub fn new(name: impl Into<String>, executor: E) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: ArgType::Void,
            doc: None,
            executor,
        }
    }

    pub fn doc(&mut self, doc: impl Into<String>) -> &mut Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn param(&mut self, name: impl Into<String>, kind: ArgType) -> &mut Self {
        self.params.push(ParamSpec::required(name, kind));
        self
    }

    pub fn optional_param(&mut self, name: impl Into<String>, kind: ArgType) -> &mut Self {
        self.params.push(ParamSpec::optional(name, kind));
        self
    }

    /// Add a fully specified parameter (e.g. one with a description)
    pub fn with_param(&mut self, param: ParamSpec) -> &mut Self {
        self.params.push(param);
        self
    }

    pub fn returns(&mut self, kind: ArgType) -> &mut Self {
        self.returns = kind;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Collects the declarations of one adapter or one self-describing type.
///
/// Executor-kind specific `method(..)` constructors live next to the
/// executor types; this generic part only stores declarations in order.
#[derive(Debug, Clone)]
pub struct MethodTable<E> {
    declarations: Vec<MethodDeclaration<E>>,
}

impl<E> Default for MethodTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MethodTable<E> {
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Declare a method bound to an already-built executor
    pub fn add(&mut self, name: impl Into<String>, executor: E) -> &mut MethodDeclaration<E> {
        self.declarations.push(MethodDeclaration::new(name, executor));
        let last = self.declarations.len() - 1;
        &mut self.declarations[last]
    }

    pub fn declarations(&self) -> &[MethodDeclaration<E>] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub(crate) fn into_declarations(self) -> Vec<MethodDeclaration<E>> {
        self.declarations
    }
}

/// Where a descriptor came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Registered by an integration module
    External,
    /// Synthesized from a type's own declared methods
    Inline,
}

/// Identity of the adapter that owns a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodOrigin {
    pub adapter: String,
    pub provenance: Provenance,
    /// The type whose adapter (or own declaration) supplied the method
    pub declared_on: TypeKey,
}

impl std::fmt::Display for MethodOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.provenance {
            Provenance::External => write!(f, "adapter {} for {}", self.adapter, self.declared_on),
            Provenance::Inline => write!(f, "inline methods of {}", self.declared_on),
        }
    }
}

/// Immutable description of one invokable operation
#[derive(Debug, Clone)]
pub struct MethodDescriptor<E> {
    name: String,
    params: Vec<ParamSpec>,
    returns: ArgType,
    doc: Option<String>,
    origin: MethodOrigin,
    executor: E,
}

impl<E> MethodDescriptor<E> {
    pub(crate) fn from_declaration(
        declaration: MethodDeclaration<E>,
        origin: MethodOrigin,
    ) -> Self {
        Self {
            name: declaration.name,
            params: declaration.params,
            returns: declaration.returns,
            doc: declaration.doc,
            origin,
            executor: declaration.executor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn returns(&self) -> ArgType {
        self.returns
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn origin(&self) -> &MethodOrigin {
        &self.origin
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// `name(param: kind, ...) -> returns`
    pub fn signature(&self) -> String {
        format!("{}{} -> {}", self.name, signature(&self.params), self.returns)
    }

    /// Validate call arguments against the declared parameter shapes
    pub fn check_arguments(&self, args: &[Value]) -> Result<(), CallError> {
        check_shape(&self.params, args).map_err(|reason| CallError::ArgumentMismatch {
            method: self.name.clone(),
            reason,
        })
    }
}
