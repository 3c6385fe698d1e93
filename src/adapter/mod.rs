//! Adapter layer
//!
//! Adapters declare methods for a target class or interface. The manager
//! stores them by target, and on first request for a concrete type walks
//! that type's ancestry to merge every applicable adapter into one cached
//! [`AdaptedClass`].

mod class;
mod error;
mod kind;
mod manager;
mod wrapper;

pub use class::{AdaptedClass, MethodCollision};
pub use error::{DeclarationError, RegistrationError};
pub use kind::{
    downcast_target, AdapterKind, Computer, ObjectAdapter, ObjectExecutor, ObjectKind,
    PeripheralAdapter, PeripheralExecutor, PeripheralKind, Target,
};
pub use manager::{AdapterManager, ManagerStats, RegistryConfig};
pub use wrapper::AdapterWrapper;

/// Registry of object capability adapters
pub type ObjectAdapterManager = AdapterManager<ObjectKind>;

/// Registry of peripheral adapters
pub type PeripheralAdapterManager = AdapterManager<PeripheralKind>;
