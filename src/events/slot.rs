//! Meatball attachment events.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// A meatball stuck to a skewer.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeatballAttached {
    pub skewer: Entity,
    pub meatball: Entity,
}

pub fn log_meatball_attached(trigger: On<MeatballAttached>) {
    let event = trigger.event();
    info!(
        "Meatball {:?} attached to skewer {:?}",
        event.meatball, event.skewer
    );
}
