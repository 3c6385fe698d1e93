//! Method descriptions
//!
//! Rust has no runtime reflection, so adapters describe their operations
//! declaratively through a [`MethodTable`]: name, parameter and return
//! shapes, documentation and the executor closure. Wrappers normalize
//! those declarations into immutable [`MethodDescriptor`]s.

mod args;
mod descriptor;
mod error;
mod shape;

pub use args::{arg_bool, arg_f64, arg_i64, arg_opt, arg_str};
pub use descriptor::{
    MethodDeclaration, MethodDescriptor, MethodOrigin, MethodTable, Provenance,
};
pub use error::{CallError, MethodFailure};
pub use shape::{ArgType, ParamSpec};
