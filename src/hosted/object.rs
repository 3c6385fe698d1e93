//! ObjectWrapper: a value exposed to scripts through object adapters

use super::doc::{describe_class, MethodDoc};
use crate::adapter::{AdaptedClass, ObjectAdapterManager, ObjectExecutor, Target};
use crate::method::CallError;
use serde_json::Value;
use std::sync::Arc;

/// One instance bound to its object AdaptedClass
#[derive(Clone)]
pub struct ObjectWrapper {
    class: Arc<AdaptedClass<ObjectExecutor>>,
    target: Arc<dyn Target>,
}

impl ObjectWrapper {
    /// Bind `target` to the class resolved for its runtime type
    pub fn wrap(manager: &ObjectAdapterManager, target: Arc<dyn Target>) -> Self {
        let class = manager.get_adapter_class(&target.type_key());
        Self { class, target }
    }

    pub fn class(&self) -> &Arc<AdaptedClass<ObjectExecutor>> {
        &self.class
    }

    pub fn target(&self) -> &Arc<dyn Target> {
        &self.target
    }

    pub fn method_names(&self) -> Vec<String> {
        self.class.method_names().into_iter().map(str::to_string).collect()
    }

    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value, CallError> {
        let descriptor = self.class.lookup(method)?;
        descriptor.check_arguments(args)?;
        descriptor
            .executor()
            .execute(self.target.as_ref(), args)
            .map_err(|source| CallError::Execution {
                method: method.to_string(),
                source,
            })
    }

    pub fn documentation(&self) -> Vec<MethodDoc> {
        describe_class(&self.class)
    }
}

impl std::fmt::Debug for ObjectWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectWrapper")
            .field("type", &self.target.type_key())
            .field("methods", &self.class.len())
            .finish()
    }
}
