//! Meatball slot system.
//!
//! Counts dwell time for meatballs resting in a [`SkewerSlot`] and attaches
//! them once [`ATTACH_DELAY`](crate::components::skewerslot::ATTACH_DELAY)
//! has passed. A skewer holds one meatball; further attempts are rejected.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::skewerslot::{Meatball, SkewerSlot};
use crate::events::slot::MeatballAttached;
use crate::resources::worldtime::WorldTime;

pub fn skewer_slot_system(
    world_time: Res<WorldTime>,
    mut slots: Query<(Entity, &mut SkewerSlot)>,
    mut meatballs: Query<&mut Meatball>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (skewer, mut slot) in slots.iter_mut() {
        // a meatball that got attached elsewhere in the meantime is dropped
        if let Some(pending) = slot.pending
            && meatballs.get(pending).is_ok_and(|m| m.is_attached())
        {
            slot.withdraw();
        }

        let Some(candidate) = slot.advance(dt) else {
            continue;
        };
        if slot.has_meatball() {
            warn!("Skewer {skewer:?} already has a meatball attached!");
            continue;
        }
        let Ok(mut meatball) = meatballs.get_mut(candidate) else {
            warn!("Meatball {candidate:?} vanished before attaching");
            continue;
        };
        meatball.attached_to = Some(skewer);
        slot.attached = Some(candidate);
        commands.trigger(MeatballAttached {
            skewer,
            meatball: candidate,
        });
    }
}
