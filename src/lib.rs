//! Kitchen simulation core.
//!
//! Grill and liquid-pouring simulation for an interactive cooking scene,
//! built on `bevy_ecs`. Skewers, dispensers and receptacles are entities;
//! per-frame updates are systems; state transitions are events delivered to
//! observers. [`kitchen::Kitchen`] wraps all of it behind an entity-keyed API.

pub mod color;
pub mod components;
pub mod error;
pub mod events;
pub mod kitchen;
pub mod resources;
pub mod systems;
