//! Startup scan of world-object types
//!
//! Run with: `cargo test --test bootstrap_scan`

mod common;

use common::{init_tracing, key, world_catalog, world_object_types, EnergyAdapter};
use periphery::{
    plan_peripheral_registration, BootstrapConfig, DeclarationError, MethodTable,
    PeripheralAdapter, PeripheralExecutor, Registries, TypeKey,
};
use serde_json::json;

struct Targeting(&'static str);

impl PeripheralAdapter for Targeting {
    fn target_type(&self) -> TypeKey {
        TypeKey::from(self.0)
    }

    fn declare(&self, table: &mut MethodTable<PeripheralExecutor>) -> Result<(), DeclarationError> {
        table.method("ping", |_computer, _target, _args| Ok(json!("pong")));
        Ok(())
    }
}

fn names(set: &std::collections::BTreeSet<TypeKey>) -> Vec<&str> {
    set.iter().map(TypeKey::as_str).collect()
}

#[test]
fn scan_partitions_world_types() {
    init_tracing();
    let registries = Registries::new(world_catalog());
    registries.add_peripheral_adapter(EnergyAdapter).unwrap();
    registries.add_peripheral_adapter(Targeting("IInventory")).unwrap();

    let plan = plan_peripheral_registration(
        registries.peripherals(),
        world_object_types(),
        &BootstrapConfig::default(),
    );

    assert_eq!(names(&plan.providers), vec!["tile.modem"]);
    // tile.turtle is an IInventory but already a native peripheral.
    assert_eq!(
        names(&plan.adapted),
        vec!["tile.battery", "tile.chest", "tile.furnace", "tile.machine"]
    );
    assert!(plan.skipped_targets.is_empty());
    assert_eq!(plan.handler_count(), 5);
}

#[test]
fn world_object_targets_are_adapted_directly() {
    init_tracing();
    let registries = Registries::new(world_catalog());
    registries.add_peripheral_adapter(Targeting("tile.dirt")).unwrap();
    registries.add_peripheral_adapter(Targeting("entity")).unwrap();

    let plan = plan_peripheral_registration(
        registries.peripherals(),
        world_object_types(),
        &BootstrapConfig::default(),
    );

    assert_eq!(names(&plan.adapted), vec!["tile.dirt"]);
    // An entity class is neither an interface nor a world object.
    assert_eq!(names(&plan.skipped_targets), vec!["entity"]);
}

#[test]
fn inline_adapters_count_as_targets() {
    init_tracing();
    let registries = Registries::new(world_catalog());
    registries.peripherals().declare_inline("tile.chest", |t| {
        t.method("open", |_computer, _target, _args| Ok(json!(true)));
    });
    registries.add_inline_peripheral_adapter("tile.chest").unwrap();

    let plan = plan_peripheral_registration(
        registries.peripherals(),
        world_object_types(),
        &BootstrapConfig::default(),
    );
    assert_eq!(names(&plan.adapted), vec!["tile.chest"]);
}

#[test]
fn markers_come_from_config() {
    init_tracing();
    let registries = Registries::new(world_catalog());
    registries.add_peripheral_adapter(Targeting("IInventory")).unwrap();

    // With the chest interface as "provider" marker, chests provide themselves.
    let config = BootstrapConfig::from_yaml("provider_marker: IInventory\n").unwrap();
    let plan =
        plan_peripheral_registration(registries.peripherals(), world_object_types(), &config);

    assert!(plan.providers.contains(&key("tile.chest")));
    assert!(plan.providers.contains(&key("tile.furnace")));
    assert!(plan.adapted.is_empty());
}
