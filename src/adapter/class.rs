//! AdaptedClass: the merged method table for one concrete type

use super::wrapper::AdapterWrapper;
use crate::method::{CallError, MethodDescriptor, MethodOrigin, Provenance};
use crate::types::TypeKey;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A method name supplied by more than one adapter; the first one won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodCollision {
    pub method: String,
    pub winner: MethodOrigin,
    pub shadowed: MethodOrigin,
}

impl MethodCollision {
    /// Two external adapters for the same exact type: registration order decided
    pub fn is_equally_specific(&self) -> bool {
        self.winner.declared_on == self.shadowed.declared_on
            && self.winner.provenance == Provenance::External
            && self.shadowed.provenance == Provenance::External
    }
}

/// Name-keyed table of every method applicable to one concrete type.
///
/// Built once by the manager and immutable afterwards.
#[derive(Debug)]
pub struct AdaptedClass<E> {
    target: TypeKey,
    methods: BTreeMap<String, Arc<MethodDescriptor<E>>>,
    collisions: Vec<MethodCollision>,
}

impl<E> AdaptedClass<E> {
    /// Merge wrappers given in precedence order: the first descriptor seen
    /// for a name wins.
    pub(crate) fn merge<'a, I>(target: TypeKey, wrappers: I, warn_on_shadowing: bool) -> Self
    where
        I: IntoIterator<Item = &'a Arc<AdapterWrapper<E>>>,
        E: 'a,
    {
        let mut methods: BTreeMap<String, Arc<MethodDescriptor<E>>> = BTreeMap::new();
        let mut collisions = Vec::new();

        for wrapper in wrappers {
            for descriptor in wrapper.methods() {
                let Some(existing) = methods.get(descriptor.name()) else {
                    methods.insert(descriptor.name().to_string(), descriptor.clone());
                    continue;
                };

                let collision = MethodCollision {
                    method: descriptor.name().to_string(),
                    winner: existing.origin().clone(),
                    shadowed: descriptor.origin().clone(),
                };
                report_collision(&target, &collision, warn_on_shadowing);
                collisions.push(collision);
            }
        }

        Self {
            target,
            methods,
            collisions,
        }
    }

    pub fn target(&self) -> &TypeKey {
        &self.target
    }

    pub fn method(&self, name: &str) -> Option<&Arc<MethodDescriptor<E>>> {
        self.methods.get(name)
    }

    /// Like [`method`](Self::method) but a miss is a typed `UnknownMethod`
    pub fn lookup(&self, name: &str) -> Result<&Arc<MethodDescriptor<E>>, CallError> {
        self.methods.get(name).ok_or_else(|| CallError::UnknownMethod {
            method: name.to_string(),
            target: self.target.clone(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Method names, sorted
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }

    pub fn methods(&self) -> impl Iterator<Item = &Arc<MethodDescriptor<E>>> {
        self.methods.values()
    }

    pub fn collisions(&self) -> &[MethodCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

fn report_collision(target: &TypeKey, collision: &MethodCollision, warn_on_shadowing: bool) {
    let reason = if collision.is_equally_specific() {
        "equally specific adapters declare the same method, first registered wins"
    } else if collision.winner.declared_on == collision.shadowed.declared_on {
        "inline method shadowed by an external adapter for the same type"
    } else {
        "method shadowed by a more specific declaration"
    };

    if collision.is_equally_specific() || warn_on_shadowing {
        tracing::warn!(
            target_type = %target,
            method = %collision.method,
            winner = %collision.winner,
            shadowed = %collision.shadowed,
            "{}",
            reason
        );
    } else {
        tracing::debug!(
            target_type = %target,
            method = %collision.method,
            winner = %collision.winner,
            shadowed = %collision.shadowed,
            "{}",
            reason
        );
    }
}
