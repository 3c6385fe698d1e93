//! World type catalog fixture

use periphery::{TypeCatalog, TypeKey};

/// Machines, storage and two peripheral markers
pub const WORLD_YAML: &str = r#"
root: object
types:
  - key: IPeripheral
    kind: interface
  - key: IPeripheralProvider
    kind: interface
  - key: IInventory
    kind: interface
  - key: ISidedInventory
    kind: interface
    interfaces: [IInventory]
  - key: IEnergyStorage
    kind: interface
  - key: tile
  - key: tile.chest
    superclass: tile
    interfaces: [IInventory]
  - key: tile.machine
    superclass: tile
    interfaces: [IEnergyStorage]
  - key: tile.furnace
    superclass: tile.machine
    interfaces: [ISidedInventory]
  - key: tile.battery
    superclass: tile.machine
  - key: tile.modem
    superclass: tile
    interfaces: [IPeripheralProvider]
  - key: tile.turtle
    superclass: tile
    interfaces: [IPeripheral, IInventory]
  - key: tile.dirt
    superclass: tile
  - key: entity
  - key: entity.minecart_chest
    superclass: entity
    interfaces: [IInventory]
"#;

pub fn world_catalog() -> TypeCatalog {
    TypeCatalog::from_yaml(WORLD_YAML).expect("world fixture parses")
}

pub fn key(s: &str) -> TypeKey {
    TypeKey::from(s)
}

/// World-object types a host would scan at startup
pub fn world_object_types() -> Vec<TypeKey> {
    [
        "tile.chest",
        "tile.machine",
        "tile.furnace",
        "tile.battery",
        "tile.modem",
        "tile.turtle",
        "tile.dirt",
    ]
    .into_iter()
    .map(TypeKey::from)
    .collect()
}
