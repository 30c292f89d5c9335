//! Simulation clock resource.
//!
//! Updated once per [`Kitchen::advance`](crate::kitchen::Kitchen::advance) by
//! [`update_world_time`](crate::systems::time::update_world_time). Systems
//! read `delta`, which already has `time_scale` applied.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since the kitchen was created.
    pub elapsed: f32,
    /// Scaled seconds of the current frame.
    pub delta: f32,
    /// Multiplier applied to every incoming frame delta.
    pub time_scale: f32,
    /// Frames advanced so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Count one frame of `dt` raw seconds. Returns the scaled delta.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.delta = dt * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.delta
    }
}
