//! Adapter kinds: the two families of adapters and their executors
//!
//! Object adapters expose capabilities of arbitrary values handed to a
//! script. Peripheral adapters expose live devices and their executors also
//! receive the calling computer. Both share one registry implementation,
//! parameterized by [`AdapterKind`].

use super::error::DeclarationError;
use crate::method::{MethodDeclaration, MethodFailure, MethodTable};
use crate::types::TypeKey;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

/// A host instance (entity, block, item...) that methods run against.
pub trait Target: Any + Send + Sync {
    /// The instance's concrete runtime type
    fn type_key(&self) -> TypeKey;

    fn as_any(&self) -> &dyn Any;
}

/// Downcast a target to the Rust type an executor expects.
pub fn downcast_target<T: Target>(target: &dyn Target) -> Result<&T, MethodFailure> {
    target.as_any().downcast_ref::<T>().ok_or_else(|| {
        MethodFailure(format!(
            "target of type {} is not a {}",
            target.type_key(),
            short_type_name(std::any::type_name::<T>())
        ))
    })
}

/// The computer on whose behalf a peripheral method runs
pub trait Computer: Send + Sync {
    fn id(&self) -> u32;

    /// Side or name under which the peripheral is attached
    fn attachment_name(&self) -> &str;
}

type ObjectFn = dyn Fn(&dyn Target, &[Value]) -> Result<Value, MethodFailure> + Send + Sync;
type PeripheralFn =
    dyn Fn(&dyn Computer, &dyn Target, &[Value]) -> Result<Value, MethodFailure> + Send + Sync;

/// Bound callable for an object method
#[derive(Clone)]
pub struct ObjectExecutor(Arc<ObjectFn>);

impl ObjectExecutor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Target, &[Value]) -> Result<Value, MethodFailure> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn execute(&self, target: &dyn Target, args: &[Value]) -> Result<Value, MethodFailure> {
        (self.0)(target, args)
    }
}

impl std::fmt::Debug for ObjectExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ObjectExecutor")
    }
}

/// Bound callable for a peripheral method
#[derive(Clone)]
pub struct PeripheralExecutor(Arc<PeripheralFn>);

impl PeripheralExecutor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Computer, &dyn Target, &[Value]) -> Result<Value, MethodFailure>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn execute(
        &self,
        computer: &dyn Computer,
        target: &dyn Target,
        args: &[Value],
    ) -> Result<Value, MethodFailure> {
        (self.0)(computer, target, args)
    }
}

impl std::fmt::Debug for PeripheralExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PeripheralExecutor")
    }
}

impl MethodTable<ObjectExecutor> {
    /// Declare an object method
    pub fn method<F>(
        &mut self,
        name: impl Into<String>,
        f: F,
    ) -> &mut MethodDeclaration<ObjectExecutor>
    where
        F: Fn(&dyn Target, &[Value]) -> Result<Value, MethodFailure> + Send + Sync + 'static,
    {
        self.add(name, ObjectExecutor::new(f))
    }
}

impl MethodTable<PeripheralExecutor> {
    /// Declare a peripheral method
    pub fn method<F>(
        &mut self,
        name: impl Into<String>,
        f: F,
    ) -> &mut MethodDeclaration<PeripheralExecutor>
    where
        F: Fn(&dyn Computer, &dyn Target, &[Value]) -> Result<Value, MethodFailure>
            + Send
            + Sync
            + 'static,
    {
        self.add(name, PeripheralExecutor::new(f))
    }
}

/// Adapter exposing methods on arbitrary values of one target type.
pub trait ObjectAdapter: Send + Sync {
    /// The class or interface this adapter applies to
    fn target_type(&self) -> TypeKey;

    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Declare this adapter's methods
    fn declare(&self, methods: &mut MethodTable<ObjectExecutor>) -> Result<(), DeclarationError>;
}

/// Adapter exposing methods of a world object as a remote-callable device.
pub trait PeripheralAdapter: Send + Sync {
    /// The class or interface this adapter applies to
    fn target_type(&self) -> TypeKey;

    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Declare this adapter's methods
    fn declare(
        &self,
        methods: &mut MethodTable<PeripheralExecutor>,
    ) -> Result<(), DeclarationError>;
}

/// Ties an adapter trait to its executor type.
///
/// [`AdapterManager`](super::AdapterManager) is generic over this, giving two
/// registries with identical logic and no shared state.
pub trait AdapterKind: Send + Sync + 'static {
    type Adapter: ?Sized + Send + Sync;
    type Executor: Clone + Send + Sync + std::fmt::Debug + 'static;

    /// Used in log lines
    const LABEL: &'static str;

    fn target_type(adapter: &Self::Adapter) -> TypeKey;

    fn adapter_name(adapter: &Self::Adapter) -> String;

    fn declare(
        adapter: &Self::Adapter,
        methods: &mut MethodTable<Self::Executor>,
    ) -> Result<(), DeclarationError>;
}

/// Object capability adapters
#[derive(Debug)]
pub struct ObjectKind;

impl AdapterKind for ObjectKind {
    type Adapter = dyn ObjectAdapter;
    type Executor = ObjectExecutor;

    const LABEL: &'static str = "object";

    fn target_type(adapter: &Self::Adapter) -> TypeKey {
        adapter.target_type()
    }

    fn adapter_name(adapter: &Self::Adapter) -> String {
        adapter.name().to_string()
    }

    fn declare(
        adapter: &Self::Adapter,
        methods: &mut MethodTable<ObjectExecutor>,
    ) -> Result<(), DeclarationError> {
        adapter.declare(methods)
    }
}

/// Peripheral adapters
#[derive(Debug)]
pub struct PeripheralKind;

impl AdapterKind for PeripheralKind {
    type Adapter = dyn PeripheralAdapter;
    type Executor = PeripheralExecutor;

    const LABEL: &'static str = "peripheral";

    fn target_type(adapter: &Self::Adapter) -> TypeKey {
        adapter.target_type()
    }

    fn adapter_name(adapter: &Self::Adapter) -> String {
        adapter.name().to_string()
    }

    fn declare(
        adapter: &Self::Adapter,
        methods: &mut MethodTable<PeripheralExecutor>,
    ) -> Result<(), DeclarationError> {
        adapter.declare(methods)
    }
}

/// `a::b::Name` -> `Name`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
