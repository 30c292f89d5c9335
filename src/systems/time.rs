//! Frame clock.
//!
//! [`update_world_time`] runs before the schedule so every system of the
//! frame sees the same scaled [`WorldTime::delta`].
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::worldtime::WorldTime;

/// Step the clock by the raw frame delta and return the scaled delta.
///
/// Callers validate `dt` first; see [`check_delta`](crate::error::check_delta).
pub fn update_world_time(world: &mut World, dt: f32) -> f32 {
    let mut clock = world.resource_mut::<WorldTime>();
    let scaled = clock.advance(dt);
    trace!("frame {} dt {scaled}", clock.frame_count);
    scaled
}
