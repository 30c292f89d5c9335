//! Simulation systems.
//!
//! Submodules overview
//! - [`cooking`] – advance skewer sides on the grill and report transitions
//! - [`dispenser`] – lever edge detection and liquid transfer
//! - [`skewerslot`] – dwell timer and meatball attachment
//! - [`time`] – update simulation time and delta

pub mod cooking;
pub mod dispenser;
pub mod skewerslot;
pub mod time;
