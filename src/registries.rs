//! Registries: the long-lived context holding both adapter managers
//!
//! Passed by reference to whatever needs lookup instead of living in
//! globals, so each test can build an isolated set.

use crate::adapter::{
    ObjectAdapter, ObjectAdapterManager, PeripheralAdapter, PeripheralAdapterManager,
    RegistrationError, RegistryConfig, Target,
};
use crate::hosted::{HostedPeripheral, ObjectWrapper};
use crate::types::{TypeCatalog, TypeKey};
use std::sync::Arc;

/// Object and peripheral registries over one shared type catalog.
///
/// The two managers never share cached state.
pub struct Registries {
    catalog: Arc<TypeCatalog>,
    objects: ObjectAdapterManager,
    peripherals: PeripheralAdapterManager,
}

impl Registries {
    pub fn new(catalog: TypeCatalog) -> Self {
        Self::with_config(catalog, RegistryConfig::default())
    }

    pub fn with_config(catalog: TypeCatalog, config: RegistryConfig) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            objects: ObjectAdapterManager::with_config(catalog.clone(), config.clone()),
            peripherals: PeripheralAdapterManager::with_config(catalog.clone(), config),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Arc<TypeCatalog> {
        &self.catalog
    }

    pub fn objects(&self) -> &ObjectAdapterManager {
        &self.objects
    }

    pub fn peripherals(&self) -> &PeripheralAdapterManager {
        &self.peripherals
    }

    pub fn add_object_adapter<A: ObjectAdapter + 'static>(
        &self,
        adapter: A,
    ) -> Result<(), RegistrationError> {
        self.objects.add_adapter(&adapter)
    }

    pub fn add_peripheral_adapter<A: PeripheralAdapter + 'static>(
        &self,
        adapter: A,
    ) -> Result<(), RegistrationError> {
        self.peripherals.add_adapter(&adapter)
    }

    pub fn add_inline_peripheral_adapter(
        &self,
        target: impl Into<TypeKey>,
    ) -> Result<(), RegistrationError> {
        self.peripherals.add_inline_adapter(target)
    }

    /// Expose a value to scripts through the object registry
    pub fn wrap_object(&self, target: Arc<dyn Target>) -> ObjectWrapper {
        ObjectWrapper::wrap(&self.objects, target)
    }

    /// Expose a world object as a peripheral
    pub fn create_hosted_peripheral(&self, target: Arc<dyn Target>) -> HostedPeripheral {
        HostedPeripheral::new(&self.peripherals, target)
    }
}
