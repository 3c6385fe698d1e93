//! Peripheral dispatch: adapter methods, built-ins and attachment
//!
//! Run with: `cargo test --test peripheral_dispatch`

mod common;

use common::{init_tracing, key, world_catalog, EnergyAdapter, Machine, TestComputer};
use periphery::hosted::{LIST_METHODS, METHOD_DOCS};
use periphery::{CallError, MethodDoc, Provenance, Registries};
use serde_json::json;
use std::sync::Arc;

fn registries() -> Registries {
    init_tracing();
    let registries = Registries::new(world_catalog());
    registries.add_peripheral_adapter(EnergyAdapter).unwrap();
    registries
}

#[test]
fn peripheral_exposes_adapter_methods_and_builtins() {
    let registries = registries();
    let battery = registries.create_hosted_peripheral(Arc::new(Machine::new("tile.battery")));

    assert_eq!(battery.peripheral_type(), "tile.battery");
    assert_eq!(
        battery.method_names(),
        vec!["drain", "getAdvancedMethodsData", "getEnergy", "listMethods", "whoAsked"]
    );
}

#[test]
fn executors_see_the_calling_computer() {
    let registries = registries();
    let battery = registries.create_hosted_peripheral(Arc::new(Machine::new("tile.battery")));

    let left = TestComputer::new(3, "left");
    let back = TestComputer::new(9, "back");
    assert_eq!(
        battery.call(&left, "whoAsked", &[]).unwrap(),
        json!({ "id": 3, "side": "left" })
    );
    assert_eq!(
        battery.call(&back, "whoAsked", &[]).unwrap(),
        json!({ "id": 9, "side": "back" })
    );
}

#[test]
fn calls_mutate_the_bound_instance() {
    let registries = registries();
    let machine = Arc::new(Machine::new("tile.furnace").with_energy(100));
    let furnace = registries.create_hosted_peripheral(machine.clone());
    let computer = TestComputer::new(1, "top");

    assert_eq!(furnace.call(&computer, "drain", &[json!(30)]).unwrap(), json!(70));
    assert_eq!(furnace.call(&computer, "getEnergy", &[]).unwrap(), json!(70));

    let err = furnace.call(&computer, "drain", &[json!(500)]).unwrap_err();
    assert!(matches!(err, CallError::Execution { .. }));
    assert_eq!(err.to_string(), "'drain' failed: only 70 stored");
    assert_eq!(machine.energy.load(std::sync::atomic::Ordering::SeqCst), 70);
}

#[test]
fn error_taxonomy_is_distinct() {
    let registries = registries();
    let battery = registries.create_hosted_peripheral(Arc::new(Machine::new("tile.battery")));
    let computer = TestComputer::new(1, "top");

    let unknown = battery.call(&computer, "explode", &[]).unwrap_err();
    assert_eq!(
        unknown,
        CallError::UnknownMethod {
            method: "explode".to_string(),
            target: key("tile.battery"),
        }
    );

    let mismatch = battery.call(&computer, "drain", &[json!("lots")]).unwrap_err();
    assert!(matches!(mismatch, CallError::ArgumentMismatch { .. }));

    let arity = battery.call(&computer, "getEnergy", &[json!(1)]).unwrap_err();
    assert!(matches!(arity, CallError::ArgumentMismatch { .. }));

    let failed = battery.call(&computer, "drain", &[json!(-5)]).unwrap_err();
    assert!(matches!(failed, CallError::Execution { .. }));
}

#[test]
fn non_peripheral_types_only_have_builtins() {
    let registries = registries();
    let dirt = registries.create_hosted_peripheral(Arc::new(Machine::new("tile.dirt")));

    assert!(dirt.class().is_empty());
    assert_eq!(dirt.method_names(), vec![METHOD_DOCS, LIST_METHODS]);
    assert_eq!(dirt.call(&TestComputer::new(1, "top"), LIST_METHODS, &[]).unwrap(), json!({}));
}

#[test]
fn introspection_builtins_describe_each_method() {
    let registries = registries();
    let battery = registries.create_hosted_peripheral(Arc::new(Machine::new("tile.battery")));
    let computer = TestComputer::new(1, "top");

    let listing = battery.call(&computer, LIST_METHODS, &[]).unwrap();
    assert_eq!(
        listing,
        json!({
            "drain": "drain(amount: number) -> number",
            "getEnergy": "getEnergy() -> number",
            "whoAsked": "whoAsked() -> table",
        })
    );

    let docs = battery.call(&computer, METHOD_DOCS, &[]).unwrap();
    let docs: Vec<MethodDoc> = serde_json::from_value(docs).unwrap();
    assert_eq!(docs, battery.documentation());
    let energy = docs.iter().find(|d| d.name == "getEnergy").unwrap();
    assert_eq!(energy.description.as_deref(), Some("Stored energy"));
    assert_eq!(energy.source.provenance, Provenance::External);
    assert_eq!(energy.source.declared_on, key("IEnergyStorage"));
}

#[test]
fn inline_peripheral_adapter_is_registered_eagerly() {
    let registries = registries();
    registries.peripherals().declare_inline("tile.chest", |t| {
        t.method("open", |_computer, _target, _args| Ok(json!(true)));
    });
    registries.add_inline_peripheral_adapter("tile.chest").unwrap();

    assert!(registries
        .peripherals()
        .get_all_target_types()
        .contains(&key("tile.chest")));

    let chest = registries.create_hosted_peripheral(Arc::new(Machine::new("tile.chest")));
    assert_eq!(chest.call(&TestComputer::new(1, "top"), "open", &[]).unwrap(), json!(true));
}

#[test]
fn attachment_is_tracked_per_computer() {
    let registries = registries();
    let battery = registries.create_hosted_peripheral(Arc::new(Machine::new("tile.battery")));
    let left = TestComputer::new(4, "left");
    let right = TestComputer::new(2, "right");

    battery.attach(&left);
    battery.attach(&right);
    assert_eq!(battery.attached_computers(), vec![2, 4]);

    assert!(battery.detach(&left));
    assert!(!battery.detach(&left));
    assert_eq!(battery.attached_computers(), vec![2]);
}

#[test]
fn concurrent_peripherals_share_one_class() {
    let registries = registries();

    let peripherals: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..6)
            .map(|_| {
                scope.spawn(|| {
                    registries.create_hosted_peripheral(Arc::new(Machine::new("tile.furnace")))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let first = peripherals[0].class();
    assert!(peripherals.iter().all(|p| Arc::ptr_eq(p.class(), first)));
    assert_eq!(registries.peripherals().stats().cached_classes, 1);
}
