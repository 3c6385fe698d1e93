//! Periphery: capability adaptation for scripted world objects
//!
//! Given an object of a host type the script runtime knows nothing about,
//! find every operation it supports and expose them under stable names.
//!
//! # Core Concepts
//!
//! - **Adapters**: author-supplied method declarations for one target class
//!   or interface
//! - **Inline methods**: a type's own declared methods, wrapped automatically
//! - **AdaptedClass**: the merged, cached method table of one concrete type
//! - **Managers**: two independent registries, one for object capabilities
//!   and one for peripherals
//!
//! # Example
//!
//! ```
//! use periphery::{Registries, TypeCatalog, TypeInfo, TypeKey};
//!
//! let catalog = TypeCatalog::new()
//!     .with_type(TypeInfo::class("tile"))
//!     .unwrap();
//! let registries = Registries::new(catalog);
//! let class = registries.objects().get_adapter_class(&TypeKey::from("tile"));
//! assert!(class.is_empty());
//! ```

pub mod adapter;
pub mod bootstrap;
pub mod hosted;
pub mod method;
mod registries;
pub mod types;

pub use adapter::{
    downcast_target, AdaptedClass, AdapterKind, AdapterManager, AdapterWrapper, Computer,
    DeclarationError, ManagerStats, MethodCollision, ObjectAdapter, ObjectAdapterManager,
    ObjectExecutor, ObjectKind, PeripheralAdapter, PeripheralAdapterManager, PeripheralExecutor,
    PeripheralKind, RegistrationError, RegistryConfig, Target,
};
pub use bootstrap::{plan_peripheral_registration, BootstrapConfig, RegistrationPlan};
pub use hosted::{HostedPeripheral, MethodDoc, ObjectWrapper};
pub use method::{
    ArgType, CallError, MethodDescriptor, MethodFailure, MethodOrigin, MethodTable, ParamSpec,
    Provenance,
};
pub use registries::Registries;
pub use types::{CatalogError, TypeCatalog, TypeInfo, TypeKey, TypeKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
