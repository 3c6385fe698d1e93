//! AdapterManager: adapter registry and AdaptedClass cache
//!
//! Adapters are registered during a single-threaded init phase. Resolution
//! may run concurrently afterwards: every lazily written cache is a
//! `DashMap`, and builds happen outside map locks, so racing callers may
//! construct the same class twice but all of them return the one that was
//! published first.
//!
//! Cached classes are never evicted. Host types are fixed for the lifetime
//! of the process; an adapter registered after a class was cached does not
//! show up in that class.

use super::class::AdaptedClass;
use super::error::RegistrationError;
use super::kind::AdapterKind;
use super::wrapper::AdapterWrapper;
use crate::method::{MethodDeclaration, MethodTable};
use crate::types::{TypeCatalog, TypeKey};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Registry behaviour switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Log shadowed methods at warn level (otherwise debug). Equally
    /// specific collisions are always warned about.
    pub warn_on_shadowing: bool,
    /// Reject adapters whose target type is missing from the catalog
    pub reject_unknown_targets: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            warn_on_shadowing: true,
            reject_unknown_targets: false,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for hosts that validate every target against their catalog
    pub fn strict() -> Self {
        Self {
            reject_unknown_targets: true,
            ..Self::new()
        }
    }
}

/// Snapshot of manager counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManagerStats {
    /// External adapters accepted
    pub external_adapters: usize,
    /// Inline wrappers constructed (eager and lazy)
    pub inline_wrappers_built: usize,
    /// AdaptedClass constructions, including ones that lost a race
    pub classes_built: usize,
    /// Classes currently cached
    pub cached_classes: usize,
}

/// Registry for one adapter kind.
pub struct AdapterManager<K: AdapterKind> {
    catalog: Arc<TypeCatalog>,
    config: RegistryConfig,
    external: DashMap<TypeKey, Vec<Arc<AdapterWrapper<K::Executor>>>>,
    declared: DashMap<TypeKey, Vec<MethodDeclaration<K::Executor>>>,
    inline: DashMap<TypeKey, Arc<AdapterWrapper<K::Executor>>>,
    classes: DashMap<TypeKey, Arc<AdaptedClass<K::Executor>>>,
    external_count: AtomicUsize,
    inline_built: AtomicUsize,
    classes_built: AtomicUsize,
}

impl<K: AdapterKind> AdapterManager<K> {
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self::with_config(catalog, RegistryConfig::default())
    }

    pub fn with_config(catalog: Arc<TypeCatalog>, config: RegistryConfig) -> Self {
        Self {
            catalog,
            config,
            external: DashMap::new(),
            declared: DashMap::new(),
            inline: DashMap::new(),
            classes: DashMap::new(),
            external_count: AtomicUsize::new(0),
            inline_built: AtomicUsize::new(0),
            classes_built: AtomicUsize::new(0),
        }
    }

    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register an external adapter.
    ///
    /// Failures are logged and returned; the adapter is dropped and the
    /// registry is unchanged.
    pub fn add_adapter(&self, adapter: &K::Adapter) -> Result<(), RegistrationError> {
        let name = K::adapter_name(adapter);
        let target = K::target_type(adapter);

        let result = self
            .check_target(&name, &target)
            .and_then(|()| AdapterWrapper::external::<K>(adapter));
        let wrapper = match result {
            Ok(wrapper) => wrapper,
            Err(e) => {
                tracing::warn!(
                    kind = K::LABEL,
                    adapter = %name,
                    error = %e,
                    "adapter rejected, it will be disabled"
                );
                return Err(e);
            }
        };

        tracing::info!(
            kind = K::LABEL,
            adapter = %name,
            target_type = %target,
            methods = wrapper.len(),
            "registering adapter"
        );
        self.external
            .entry(target)
            .or_default()
            .push(Arc::new(wrapper));
        self.external_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Attach a type's own self-declared methods.
    ///
    /// This is the registration-time analog of annotating methods on the
    /// type itself. The declarations form the type's inline wrapper, which
    /// the classes of its subtypes merge at this type's ancestry position.
    pub fn declare_inline<F>(&self, target: impl Into<TypeKey>, declare: F)
    where
        F: FnOnce(&mut MethodTable<K::Executor>),
    {
        let target = target.into();
        let mut table = MethodTable::new();
        declare(&mut table);
        tracing::debug!(
            kind = K::LABEL,
            target_type = %target,
            methods = table.len(),
            "declared inline methods"
        );
        self.declared
            .entry(target)
            .or_default()
            .extend(table.into_declarations());
    }

    /// Eagerly build and store the inline wrapper for `target`
    pub fn add_inline_adapter(&self, target: impl Into<TypeKey>) -> Result<(), RegistrationError> {
        let target = target.into();
        let name = format!("inline:{}", target);

        let result = self
            .check_target(&name, &target)
            .and_then(|()| self.wrap_inline(&target));
        let wrapper = match result {
            Ok(wrapper) => wrapper,
            Err(e) => {
                tracing::warn!(
                    kind = K::LABEL,
                    target_type = %target,
                    error = %e,
                    "inline adapter rejected"
                );
                return Err(e);
            }
        };

        tracing::info!(
            kind = K::LABEL,
            target_type = %target,
            methods = wrapper.len(),
            "registering auto-created adapter"
        );
        self.inline.insert(target, Arc::new(wrapper));
        Ok(())
    }

    /// Resolve (and cache) the merged method table for a concrete type.
    pub fn get_adapter_class(&self, concrete: &TypeKey) -> Arc<AdaptedClass<K::Executor>> {
        if let Some(cached) = self.classes.get(concrete) {
            return cached.value().clone();
        }

        let built = Arc::new(self.adapt_class(concrete));
        self.classes
            .entry(concrete.clone())
            .or_insert(built)
            .value()
            .clone()
    }

    /// External wrappers registered exactly for `target`, in registration order
    pub fn get_external_adapters(&self, target: &TypeKey) -> Vec<Arc<AdapterWrapper<K::Executor>>> {
        self.external
            .get(target)
            .map(|wrappers| wrappers.value().clone())
            .unwrap_or_default()
    }

    /// Inline wrapper for `target`, synthesized and cached on first request
    pub fn get_inline_adapter(&self, target: &TypeKey) -> Arc<AdapterWrapper<K::Executor>> {
        if let Some(wrapper) = self.inline.get(target) {
            return wrapper.value().clone();
        }

        let wrapper = match self.wrap_inline(target) {
            Ok(wrapper) => wrapper,
            Err(e) => {
                tracing::warn!(
                    kind = K::LABEL,
                    target_type = %target,
                    error = %e,
                    "inline methods rejected, type gets none"
                );
                AdapterWrapper::empty_inline(target.clone())
            }
        };
        self.inline
            .entry(target.clone())
            .or_insert(Arc::new(wrapper))
            .value()
            .clone()
    }

    /// Every type with an applicable adapter: external targets plus types
    /// whose inline wrapper has at least one method.
    pub fn get_all_target_types(&self) -> BTreeSet<TypeKey> {
        let mut targets: BTreeSet<TypeKey> =
            self.external.iter().map(|e| e.key().clone()).collect();
        targets.extend(
            self.inline
                .iter()
                .filter(|e| !e.value().is_empty())
                .map(|e| e.key().clone()),
        );
        targets
    }

    /// Candidates assignable to at least one target type.
    ///
    /// O(candidates × targets); meant for one-time bootstrap scans.
    pub fn adaptable_candidates<I>(&self, candidates: I) -> BTreeSet<TypeKey>
    where
        I: IntoIterator<Item = TypeKey>,
    {
        let targets = self.get_all_target_types();
        candidates
            .into_iter()
            .filter(|candidate| {
                targets
                    .iter()
                    .any(|target| self.catalog.is_assignable(candidate, target))
            })
            .collect()
    }

    pub fn target_type_count(&self) -> usize {
        self.get_all_target_types().len()
    }

    pub fn is_cached(&self, concrete: &TypeKey) -> bool {
        self.classes.contains_key(concrete)
    }

    pub fn stats(&self) -> ManagerStats {
        ManagerStats {
            external_adapters: self.external_count.load(Ordering::Relaxed),
            inline_wrappers_built: self.inline_built.load(Ordering::Relaxed),
            classes_built: self.classes_built.load(Ordering::Relaxed),
            cached_classes: self.classes.len(),
        }
    }

    fn check_target(&self, adapter: &str, target: &TypeKey) -> Result<(), RegistrationError> {
        if self.catalog.is_root(target) {
            return Err(RegistrationError::RootTarget {
                adapter: adapter.to_string(),
                target: target.clone(),
            });
        }
        if self.config.reject_unknown_targets && !self.catalog.contains(target) {
            return Err(RegistrationError::UnknownTarget {
                adapter: adapter.to_string(),
                target: target.clone(),
            });
        }
        Ok(())
    }

    /// Walk the ancestry and merge every applicable wrapper.
    ///
    /// Per ancestor (most specific first): external wrappers in registration
    /// order, then that ancestor's inline wrapper. An inherited inline method
    /// therefore ranks at the type that declared it.
    fn adapt_class(&self, concrete: &TypeKey) -> AdaptedClass<K::Executor> {
        self.classes_built.fetch_add(1, Ordering::Relaxed);

        let mut wrappers = Vec::new();
        for ancestor in self.catalog.ancestry(concrete) {
            if self.catalog.is_root(&ancestor) {
                continue;
            }
            wrappers.extend(self.get_external_adapters(&ancestor));
            wrappers.push(self.get_inline_adapter(&ancestor));
        }

        let class = AdaptedClass::merge(concrete.clone(), &wrappers, self.config.warn_on_shadowing);
        tracing::debug!(
            kind = K::LABEL,
            target_type = %concrete,
            wrappers = wrappers.len(),
            methods = class.len(),
            "adapted class"
        );
        class
    }

    /// Inline wrapper from the methods `target` declares itself
    fn wrap_inline(
        &self,
        target: &TypeKey,
    ) -> Result<AdapterWrapper<K::Executor>, RegistrationError> {
        self.inline_built.fetch_add(1, Ordering::Relaxed);

        let declarations = self
            .declared
            .get(target)
            .map(|declared| declared.value().clone())
            .unwrap_or_default();
        AdapterWrapper::inline(target.clone(), declarations)
    }
}
