//! Event types and logging observers.
//!
//! Systems trigger these events on state transitions so presentation code can
//! react without polling.
//!
//! Submodules:
//! - [`cooking`] – skewer state transitions
//! - [`dispense`] – dispenser start/stop edges
//! - [`slot`] – meatball attached to a skewer
pub mod cooking;
pub mod dispense;
pub mod slot;
