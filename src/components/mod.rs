//! ECS components for simulated kitchen objects.
//!
//! Submodules overview:
//! - [`dispenser`] – lever-operated liquid source and its tuning
//! - [`receptacle`] – capacity-bounded container that catches liquid
//! - [`skewer`] – two-sided cooking progress and the raw/cooked/burned states
//! - [`skewerslot`] – meatball slot on a skewer and the meatball marker

pub mod dispenser;
pub mod receptacle;
pub mod skewer;
pub mod skewerslot;
