//! World objects, adapters and a computer

use periphery::method::{arg_i64, arg_opt};
use periphery::{
    downcast_target, ArgType, Computer, DeclarationError, MethodFailure, MethodTable,
    ObjectAdapter, ObjectExecutor, PeripheralAdapter, PeripheralExecutor, Target, TypeKey,
};
use serde_json::json;
use std::any::Any;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// Any tile or entity with an inventory and an energy buffer
pub struct Machine {
    pub kind: TypeKey,
    pub slots: Mutex<Vec<Option<String>>>,
    pub energy: AtomicI64,
}

impl Machine {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: TypeKey::from(kind),
            slots: Mutex::new(vec![None; 9]),
            energy: AtomicI64::new(0),
        }
    }

    pub fn with_item(self, slot: usize, item: &str) -> Self {
        self.slots.lock().unwrap()[slot] = Some(item.to_string());
        self
    }

    pub fn with_energy(self, energy: i64) -> Self {
        self.energy.store(energy, Ordering::SeqCst);
        self
    }
}

impl Target for Machine {
    fn type_key(&self) -> TypeKey {
        self.kind.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Object adapter for IInventory
pub struct InventoryAdapter;

impl ObjectAdapter for InventoryAdapter {
    fn target_type(&self) -> TypeKey {
        TypeKey::from("IInventory")
    }

    fn declare(&self, table: &mut MethodTable<ObjectExecutor>) -> Result<(), DeclarationError> {
        table
            .method("getSize", |target, _args| {
                let machine = downcast_target::<Machine>(target)?;
                let slots = machine
                    .slots
                    .lock()
                    .map_err(|_| MethodFailure::new("inventory poisoned"))?;
                Ok(json!(slots.len()))
            })
            .doc("Number of slots")
            .returns(ArgType::Number);

        table
            .method("getItem", |target, args| {
                let machine = downcast_target::<Machine>(target)?;
                let slot = arg_i64(args, 0)?;
                let slots = machine
                    .slots
                    .lock()
                    .map_err(|_| MethodFailure::new("inventory poisoned"))?;
                let item = usize::try_from(slot)
                    .ok()
                    .and_then(|idx| slots.get(idx))
                    .ok_or_else(|| MethodFailure::new(format!("slot {} out of range", slot)))?;
                Ok(json!(item))
            })
            .param("slot", ArgType::Number)
            .returns(ArgType::Any);

        table
            .method("countItems", |target, args| {
                let machine = downcast_target::<Machine>(target)?;
                let filter = arg_opt(args, 0).and_then(|v| v.as_str());
                let slots = machine
                    .slots
                    .lock()
                    .map_err(|_| MethodFailure::new("inventory poisoned"))?;
                let count = slots
                    .iter()
                    .flatten()
                    .filter(|item| filter.map_or(true, |f| item.as_str() == f))
                    .count();
                Ok(json!(count))
            })
            .optional_param("item", ArgType::String)
            .returns(ArgType::Number);
        Ok(())
    }
}

/// Peripheral adapter for IEnergyStorage
pub struct EnergyAdapter;

impl PeripheralAdapter for EnergyAdapter {
    fn target_type(&self) -> TypeKey {
        TypeKey::from("IEnergyStorage")
    }

    fn declare(&self, table: &mut MethodTable<PeripheralExecutor>) -> Result<(), DeclarationError> {
        table
            .method("getEnergy", |_computer, target, _args| {
                let machine = downcast_target::<Machine>(target)?;
                Ok(json!(machine.energy.load(Ordering::SeqCst)))
            })
            .doc("Stored energy")
            .returns(ArgType::Number);

        table
            .method("drain", |_computer, target, args| {
                let machine = downcast_target::<Machine>(target)?;
                let amount = arg_i64(args, 0)?;
                if amount < 0 {
                    return Err(MethodFailure::new("amount must not be negative"));
                }
                let before = machine.energy.fetch_sub(amount, Ordering::SeqCst);
                if before < amount {
                    machine.energy.fetch_add(amount, Ordering::SeqCst);
                    return Err(MethodFailure::new(format!("only {} stored", before)));
                }
                Ok(json!(before - amount))
            })
            .param("amount", ArgType::Number)
            .returns(ArgType::Number);

        table
            .method("whoAsked", |computer, _target, _args| {
                Ok(json!({ "id": computer.id(), "side": computer.attachment_name() }))
            })
            .returns(ArgType::Table);
        Ok(())
    }
}

/// Computer attached on one side
pub struct TestComputer {
    pub id: u32,
    pub side: String,
}

impl TestComputer {
    pub fn new(id: u32, side: &str) -> Self {
        Self {
            id,
            side: side.to_string(),
        }
    }
}

impl Computer for TestComputer {
    fn id(&self) -> u32 {
        self.id
    }

    fn attachment_name(&self) -> &str {
        &self.side
    }
}
