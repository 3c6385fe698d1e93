//! Bootstrap scan: which world types get a peripheral handler
//!
//! Every world-object type falls into one of three groups: it provides its
//! own peripheral, it is adapted by at least one registered adapter, or
//! neither. The host attaches the matching handler to each type once at
//! startup.

use crate::adapter::PeripheralAdapterManager;
use crate::types::TypeKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Marker types the scan classifies against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Base class of every world object that can be attached
    pub world_object_base: TypeKey,
    /// Interface of types that build their own peripheral
    pub provider_marker: TypeKey,
    /// Interface of types that already are peripherals
    pub native_peripheral_marker: TypeKey,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            world_object_base: TypeKey::from("tile"),
            provider_marker: TypeKey::from("IPeripheralProvider"),
            native_peripheral_marker: TypeKey::from("IPeripheral"),
        }
    }
}

impl BootstrapConfig {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }
}

/// Outcome of the scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationPlan {
    /// Types that get the adapter-backed handler
    pub adapted: BTreeSet<TypeKey>,
    /// Types that get the provider-backed handler
    pub providers: BTreeSet<TypeKey>,
    /// Adapter targets that are neither world objects nor interfaces
    pub skipped_targets: BTreeSet<TypeKey>,
}

impl RegistrationPlan {
    pub fn handler_count(&self) -> usize {
        self.adapted.len() + self.providers.len()
    }
}

/// Partition `world_types` into provider-backed and adapter-backed types.
///
/// Adapter targets that are themselves world objects are adapted directly
/// (the host matches subclasses on its own). Interface targets are matched
/// against every remaining candidate by assignability.
pub fn plan_peripheral_registration<I>(
    manager: &PeripheralAdapterManager,
    world_types: I,
    config: &BootstrapConfig,
) -> RegistrationPlan
where
    I: IntoIterator<Item = TypeKey>,
{
    let catalog = manager.catalog();
    let mut plan = RegistrationPlan::default();
    let mut candidates = BTreeSet::new();

    for world_type in world_types {
        if catalog.is_assignable(&world_type, &config.provider_marker) {
            plan.providers.insert(world_type);
        } else if !catalog.is_assignable(&world_type, &config.native_peripheral_marker) {
            candidates.insert(world_type);
        }
    }

    for target in manager.get_all_target_types() {
        if catalog.is_assignable(&target, &config.world_object_base) {
            plan.adapted.insert(target);
        } else if !catalog.is_interface(&target) {
            tracing::warn!(
                target_type = %target,
                "adapter target is neither interface nor world object, skipping"
            );
            plan.skipped_targets.insert(target);
        } else {
            candidates.retain(|candidate| {
                if catalog.is_assignable(candidate, &target) {
                    plan.adapted.insert(candidate.clone());
                    false
                } else {
                    true
                }
            });
        }
    }

    tracing::info!(
        total = plan.handler_count(),
        providers = plan.providers.len(),
        adapters = plan.adapted.len(),
        "registering peripheral handlers"
    );
    plan
}
