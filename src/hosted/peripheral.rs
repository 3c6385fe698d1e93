//! HostedPeripheral: a world object exposed as a remote-callable device

use super::doc::{describe_class, MethodDoc};
use crate::adapter::{AdaptedClass, Computer, PeripheralAdapterManager, PeripheralExecutor, Target};
use crate::method::{CallError, MethodFailure};
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Built-in: method name -> signature
pub const LIST_METHODS: &str = "listMethods";

/// Built-in: full documentation of every adapter method
pub const METHOD_DOCS: &str = "getAdvancedMethodsData";

const BUILTINS: [&str; 2] = [LIST_METHODS, METHOD_DOCS];

/// One world object bound to its peripheral AdaptedClass.
///
/// Adapter-declared methods take precedence over the built-in
/// introspection methods of the same name.
pub struct HostedPeripheral {
    class: Arc<AdaptedClass<PeripheralExecutor>>,
    target: Arc<dyn Target>,
    attached: DashMap<u32, String>,
}

impl HostedPeripheral {
    pub fn new(manager: &PeripheralAdapterManager, target: Arc<dyn Target>) -> Self {
        let class = manager.get_adapter_class(&target.type_key());
        Self {
            class,
            target,
            attached: DashMap::new(),
        }
    }

    /// Device type reported to scripts
    pub fn peripheral_type(&self) -> String {
        self.target.type_key().to_string()
    }

    pub fn class(&self) -> &Arc<AdaptedClass<PeripheralExecutor>> {
        &self.class
    }

    pub fn target(&self) -> &Arc<dyn Target> {
        &self.target
    }

    /// Adapter methods plus built-ins, sorted
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .class
            .method_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        for builtin in BUILTINS {
            if !self.class.contains(builtin) {
                names.push(builtin.to_string());
            }
        }
        names.sort();
        names
    }

    pub fn call(
        &self,
        computer: &dyn Computer,
        method: &str,
        args: &[Value],
    ) -> Result<Value, CallError> {
        if let Some(descriptor) = self.class.method(method) {
            descriptor.check_arguments(args)?;
            tracing::trace!(computer = computer.id(), method, "peripheral call");
            return descriptor
                .executor()
                .execute(computer, self.target.as_ref(), args)
                .map_err(|source| CallError::Execution {
                    method: method.to_string(),
                    source,
                });
        }

        match method {
            LIST_METHODS => Ok(self.list_methods()),
            METHOD_DOCS => serde_json::to_value(self.documentation()).map_err(|e| {
                CallError::Execution {
                    method: method.to_string(),
                    source: MethodFailure(e.to_string()),
                }
            }),
            _ => Err(CallError::UnknownMethod {
                method: method.to_string(),
                target: self.class.target().clone(),
            }),
        }
    }

    pub fn documentation(&self) -> Vec<MethodDoc> {
        describe_class(&self.class)
    }

    /// Record a computer attaching to this peripheral
    pub fn attach(&self, computer: &dyn Computer) {
        tracing::debug!(
            computer = computer.id(),
            side = computer.attachment_name(),
            peripheral = %self.target.type_key(),
            "computer attached"
        );
        self.attached
            .insert(computer.id(), computer.attachment_name().to_string());
    }

    /// Returns false if the computer was not attached
    pub fn detach(&self, computer: &dyn Computer) -> bool {
        self.attached.remove(&computer.id()).is_some()
    }

    /// Attached computer ids, sorted
    pub fn attached_computers(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.attached.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    fn list_methods(&self) -> Value {
        let listing: Map<String, Value> = self
            .class
            .methods()
            .map(|d| (d.name().to_string(), Value::String(d.signature())))
            .collect();
        Value::Object(listing)
    }
}

impl std::fmt::Debug for HostedPeripheral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedPeripheral")
            .field("type", &self.target.type_key())
            .field("methods", &self.class.len())
            .field("attached", &self.attached.len())
            .finish()
    }
}
