//! TypeCatalog: the registered class/interface hierarchy
//!
//! Answers the two questions resolution needs: "what are the ancestors of
//! this type, most specific first?" and "is this type assignable to that
//! one?".

use super::key::TypeKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Errors raised while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("type already registered: {0}")]
    DuplicateType(TypeKey),

    #[error("the root type {0} is implicit and cannot be registered")]
    RootRedefined(TypeKey),

    #[error("interface {0} cannot declare a superclass")]
    InterfaceWithSuperclass(TypeKey),

    #[error("class {class} cannot extend interface {parent}")]
    ExtendsInterface { class: TypeKey, parent: TypeKey },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Whether a type is a class or an interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

/// One registered host type and its direct supertypes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub key: TypeKey,
    #[serde(default)]
    pub kind: TypeKind,
    /// Direct superclass; `None` means the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeKey>,
    /// Directly implemented (or, for interfaces, extended) interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeKey>,
}

impl TypeInfo {
    pub fn class(key: impl Into<TypeKey>) -> Self {
        Self {
            key: key.into(),
            kind: TypeKind::Class,
            superclass: None,
            interfaces: Vec::new(),
        }
    }

    pub fn interface(key: impl Into<TypeKey>) -> Self {
        Self {
            key: key.into(),
            kind: TypeKind::Interface,
            superclass: None,
            interfaces: Vec::new(),
        }
    }

    pub fn extends(mut self, superclass: impl Into<TypeKey>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<TypeKey>) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    root: Option<TypeKey>,
    #[serde(default)]
    types: Vec<TypeInfo>,
}

/// Registered hierarchy of host types.
///
/// Built once during initialization and then shared read-only (usually
/// behind an `Arc`) by every adapter manager.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    root: TypeKey,
    types: HashMap<TypeKey, TypeInfo>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog {
    /// Create a catalog whose universal root is `"object"`
    pub fn new() -> Self {
        Self::with_root(TypeKey::root())
    }

    pub fn with_root(root: impl Into<TypeKey>) -> Self {
        Self {
            root: root.into(),
            types: HashMap::new(),
        }
    }

    /// Parse a catalog from YAML.
    ///
    /// ```yaml
    /// root: object
    /// types:
    ///   - key: INode
    ///     kind: interface
    ///   - key: tile.node
    ///     superclass: tile
    ///     interfaces: [INode]
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(source)?;
        let mut catalog = match file.root {
            Some(root) => Self::with_root(root),
            None => Self::new(),
        };
        for info in file.types {
            catalog.register(info)?;
        }
        Ok(catalog)
    }

    /// Load a YAML catalog file
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml(&source)?;
        tracing::debug!(path = %path.display(), types = catalog.len(), "loaded type catalog");
        Ok(catalog)
    }

    /// Register a type. Supertypes may be registered later.
    ///
    /// A class extending an interface is rejected whichever of the two is
    /// registered first.
    pub fn register(&mut self, info: TypeInfo) -> Result<(), CatalogError> {
        if info.key == self.root {
            return Err(CatalogError::RootRedefined(info.key));
        }
        if self.types.contains_key(&info.key) {
            return Err(CatalogError::DuplicateType(info.key));
        }
        if info.kind == TypeKind::Interface {
            if let Some(parent) = info.superclass.as_ref().filter(|p| **p != self.root) {
                tracing::debug!(
                    interface = %info.key,
                    superclass = %parent,
                    "rejecting interface superclass"
                );
                return Err(CatalogError::InterfaceWithSuperclass(info.key));
            }
            if let Some(class) = self.subclass_of(&info.key) {
                return Err(CatalogError::ExtendsInterface {
                    class,
                    parent: info.key,
                });
            }
        }
        if let Some(parent) = &info.superclass {
            if self.is_interface(parent) {
                return Err(CatalogError::ExtendsInterface {
                    class: info.key.clone(),
                    parent: parent.clone(),
                });
            }
        }
        self.types.insert(info.key.clone(), info);
        Ok(())
    }

    /// First registered type (by key) whose superclass is `parent`
    fn subclass_of(&self, parent: &TypeKey) -> Option<TypeKey> {
        self.types
            .values()
            .filter(|info| info.superclass.as_ref() == Some(parent))
            .map(|info| info.key.clone())
            .min()
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_type(mut self, info: TypeInfo) -> Result<Self, CatalogError> {
        self.register(info)?;
        Ok(self)
    }

    pub fn root(&self) -> &TypeKey {
        &self.root
    }

    pub fn is_root(&self, key: &TypeKey) -> bool {
        *key == self.root
    }

    pub fn get(&self, key: &TypeKey) -> Option<&TypeInfo> {
        self.types.get(key)
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.is_root(key) || self.types.contains_key(key)
    }

    pub fn is_interface(&self, key: &TypeKey) -> bool {
        self.types
            .get(key)
            .map(|info| info.kind == TypeKind::Interface)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All registered keys, sorted
    pub fn keys(&self) -> BTreeSet<TypeKey> {
        self.types.keys().cloned().collect()
    }

    /// Direct supertypes of `key`, superclass first, root excluded
    pub fn direct_supertypes(&self, key: &TypeKey) -> Vec<TypeKey> {
        let Some(info) = self.types.get(key) else {
            return Vec::new();
        };
        let mut parents = Vec::with_capacity(1 + info.interfaces.len());
        if let Some(parent) = &info.superclass {
            if !self.is_root(parent) {
                parents.push(parent.clone());
            }
        }
        for interface in &info.interfaces {
            if !self.is_root(interface) && !parents.contains(interface) {
                parents.push(interface.clone());
            }
        }
        parents
    }

    /// Reflexive, transitive closure of `key`'s supertypes.
    ///
    /// Topologically ordered: every type precedes all of its supertypes.
    /// Among types whose subtypes have all been emitted, the one discovered
    /// first by a breadth-first walk (superclass before interfaces) goes
    /// next. The root is always last.
    pub fn ancestry(&self, key: &TypeKey) -> Vec<TypeKey> {
        if self.is_root(key) {
            return vec![self.root.clone()];
        }

        // Breadth-first discovery; `links` holds (child, parent) indices.
        let mut discovered = vec![key.clone()];
        let mut index: HashMap<TypeKey, usize> = HashMap::from([(key.clone(), 0)]);
        let mut links: Vec<(usize, usize)> = Vec::new();
        let mut cursor = 0;
        while cursor < discovered.len() {
            let current = discovered[cursor].clone();
            for parent in self.direct_supertypes(&current) {
                let parent_idx = match index.get(&parent) {
                    Some(idx) => *idx,
                    None => {
                        discovered.push(parent.clone());
                        index.insert(parent, discovered.len() - 1);
                        discovered.len() - 1
                    }
                };
                links.push((cursor, parent_idx));
            }
            cursor += 1;
        }

        let count = discovered.len();
        let mut waiting_on = vec![0usize; count];
        for &(_, parent) in &links {
            waiting_on[parent] += 1;
        }

        let mut ready: BTreeSet<usize> = (0..count).filter(|&i| waiting_on[i] == 0).collect();
        let mut emitted = vec![false; count];
        let mut ordered = Vec::with_capacity(count + 1);

        while let Some(next) = ready.pop_first() {
            emitted[next] = true;
            ordered.push(discovered[next].clone());
            for &(child, parent) in &links {
                if child == next {
                    waiting_on[parent] -= 1;
                    if waiting_on[parent] == 0 {
                        ready.insert(parent);
                    }
                }
            }
        }

        // A cyclic catalog leaves some types unreleased.
        if ordered.len() < count {
            tracing::warn!(
                type_key = %key,
                "cycle in type hierarchy, appending remaining ancestors"
            );
            for (idx, was_emitted) in emitted.iter().enumerate() {
                if !was_emitted {
                    ordered.push(discovered[idx].clone());
                }
            }
        }

        ordered.push(self.root.clone());
        ordered
    }

    /// True if a value of type `from` can be used where `to` is expected
    pub fn is_assignable(&self, from: &TypeKey, to: &TypeKey) -> bool {
        if from == to || self.is_root(to) {
            return true;
        }
        self.ancestry(from).iter().any(|ancestor| ancestor == to)
    }
}
