//! Meatball slot on a skewer stick.
//!
//! A loose [`Meatball`] offered to a [`SkewerSlot`] has to rest there for
//! [`ATTACH_DELAY`] seconds before it sticks. Pulling it out earlier cancels
//! the attempt, and offering it again restarts the wait. A skewer holds at
//! most one meatball.
//!
//! # Related
//!
//! - [`crate::systems::skewerslot::skewer_slot_system`] – counts the dwell and attaches
//! - [`crate::events::slot::MeatballAttached`] – emitted once a meatball sticks

use bevy_ecs::prelude::{Component, Entity};

/// Seconds a meatball must sit in the slot before it sticks.
pub const ATTACH_DELAY: f32 = 0.1;

/// Loose or skewered meatball.
#[derive(Component, Clone, Debug, Default)]
pub struct Meatball {
    pub attached_to: Option<Entity>,
}

impl Meatball {
    pub fn is_attached(&self) -> bool {
        self.attached_to.is_some()
    }
}

/// Slot that holds at most one meatball.
#[derive(Component, Clone, Debug, Default)]
pub struct SkewerSlot {
    pub pending: Option<Entity>,
    pub dwell: f32,
    pub attached: Option<Entity>,
}

impl SkewerSlot {
    /// A meatball entered the slot. Restarts the dwell timer.
    pub fn offer(&mut self, meatball: Entity) {
        self.pending = Some(meatball);
        self.dwell = 0.0;
    }

    /// Whatever was waiting left the slot.
    pub fn withdraw(&mut self) {
        self.pending = None;
        self.dwell = 0.0;
    }

    /// Accumulate dwell time. Returns the pending meatball once it is ready to attach.
    pub fn advance(&mut self, dt: f32) -> Option<Entity> {
        let meatball = self.pending?;
        self.dwell += dt;
        if self.dwell >= ATTACH_DELAY {
            self.withdraw();
            Some(meatball)
        } else {
            None
        }
    }

    pub fn has_meatball(&self) -> bool {
        self.attached.is_some()
    }
}
