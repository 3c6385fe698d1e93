//! AdapterWrapper: one adapter normalized into method descriptors

use super::error::RegistrationError;
use super::kind::AdapterKind;
use crate::method::{MethodDeclaration, MethodDescriptor, MethodOrigin, MethodTable, Provenance};
use crate::types::TypeKey;
use std::collections::HashSet;
use std::sync::Arc;

/// Uniform view of one adapter bound to its target type.
///
/// External wrappers come from registered adapter instances; inline wrappers
/// are synthesized from a type's own declared methods.
#[derive(Debug)]
pub struct AdapterWrapper<E> {
    target: TypeKey,
    adapter: String,
    provenance: Provenance,
    methods: Vec<Arc<MethodDescriptor<E>>>,
}

impl<E> AdapterWrapper<E> {
    /// Wrap a registered adapter instance
    pub(crate) fn external<K>(adapter: &K::Adapter) -> Result<Self, RegistrationError>
    where
        K: AdapterKind<Executor = E>,
    {
        let name = K::adapter_name(adapter);
        let target = K::target_type(adapter);

        let mut table = MethodTable::new();
        K::declare(adapter, &mut table).map_err(|source| RegistrationError::Declaration {
            adapter: name.clone(),
            source,
        })?;

        Self::external_from_table(target, name, table)
    }

    /// Wrap declarations an external adapter has already made
    pub(crate) fn external_from_table(
        target: TypeKey,
        adapter: String,
        table: MethodTable<E>,
    ) -> Result<Self, RegistrationError> {
        Self::build(target, adapter, Provenance::External, table.into_declarations())
    }

    /// Synthesize the inline wrapper from `target`'s own declarations.
    ///
    /// Inherited declarations belong to the ancestor's wrapper, so that
    /// resolution ranks them at the ancestor's position.
    pub(crate) fn inline(
        target: TypeKey,
        declarations: Vec<MethodDeclaration<E>>,
    ) -> Result<Self, RegistrationError> {
        let name = inline_adapter_name(&target);
        Self::build(target, name, Provenance::Inline, declarations)
    }

    /// An inline wrapper with no methods
    pub(crate) fn empty_inline(target: TypeKey) -> Self {
        Self {
            adapter: inline_adapter_name(&target),
            target,
            provenance: Provenance::Inline,
            methods: Vec::new(),
        }
    }

    fn build(
        target: TypeKey,
        adapter: String,
        provenance: Provenance,
        declarations: Vec<MethodDeclaration<E>>,
    ) -> Result<Self, RegistrationError> {
        let mut seen = HashSet::new();
        let mut methods = Vec::with_capacity(declarations.len());

        for declaration in declarations {
            let method = declaration.name().to_string();
            if !is_valid_method_name(&method) {
                return Err(RegistrationError::InvalidMethodName { adapter, method });
            }
            if !seen.insert(method.clone()) {
                return Err(RegistrationError::DuplicateMethod { adapter, method });
            }
            let trailing_optional = declaration
                .params
                .iter()
                .skip_while(|p| !p.optional)
                .all(|p| p.optional);
            if !trailing_optional {
                return Err(RegistrationError::ParameterOrder { adapter, method });
            }

            let origin = MethodOrigin {
                adapter: adapter.clone(),
                provenance,
                declared_on: target.clone(),
            };
            let descriptor = MethodDescriptor::from_declaration(declaration, origin);
            methods.push(Arc::new(descriptor));
        }

        Ok(Self {
            target,
            adapter,
            provenance,
            methods,
        })
    }

    pub fn target(&self) -> &TypeKey {
        &self.target
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Descriptors in declaration order
    pub fn methods(&self) -> &[Arc<MethodDescriptor<E>>] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&Arc<MethodDescriptor<E>>> {
        self.methods.iter().find(|m| m.name() == name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

fn inline_adapter_name(target: &TypeKey) -> String {
    format!("inline:{}", target)
}

/// Scripting-host identifier: `[A-Za-z_][A-Za-z0-9_]*`
fn is_valid_method_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
