//! Common test utilities for the periphery integration tests
//!
//! This module provides a small modded world (type catalog loaded from
//! YAML), world objects to adapt, and a computer to call them from.

#![allow(dead_code)]

pub mod devices;
pub mod world;

pub use devices::{EnergyAdapter, InventoryAdapter, Machine, TestComputer};
pub use world::{key, world_catalog, world_object_types, WORLD_YAML};

/// Route tracing output through the test harness; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
