//! Host type model
//!
//! The host engine's classes and interfaces are not Rust types, so the
//! hierarchy is registered explicitly: every type names its superclass and
//! the interfaces it implements. Resolution walks this catalog.

mod catalog;
mod key;

pub use catalog::{CatalogError, TypeCatalog, TypeInfo, TypeKind};
pub use key::TypeKey;
