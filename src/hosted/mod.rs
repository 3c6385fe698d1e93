//! Dispatch consumers
//!
//! A hosted wrapper binds one instance to the AdaptedClass of its runtime
//! type and routes named calls to the matching executor.

mod doc;
mod object;
mod peripheral;

pub use doc::{describe_class, MethodDoc};
pub use object::ObjectWrapper;
pub use peripheral::{HostedPeripheral, LIST_METHODS, METHOD_DOCS};
