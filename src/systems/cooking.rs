//! Skewer cooking system.
//!
//! Each frame [`cooking_system`] advances every [`Skewer`] by the world
//! delta. Only sides that are on the grill move; terminal skewers are left
//! alone. A [`SkewerStateChanged`] is triggered for every transition.

use bevy_ecs::prelude::*;
use log::error;

use crate::components::skewer::Skewer;
use crate::events::cooking::SkewerStateChanged;
use crate::resources::worldtime::WorldTime;

/// Advance all skewers and report state transitions.
pub fn cooking_system(
    world_time: Res<WorldTime>,
    mut skewers: Query<(Entity, &mut Skewer)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut skewer) in skewers.iter_mut() {
        let from = skewer.state();
        match skewer.tick(dt) {
            Ok(Some(state)) => {
                commands.trigger(SkewerStateChanged {
                    entity,
                    from,
                    state,
                });
            }
            Ok(None) => {}
            // WorldTime is only written with validated deltas
            Err(e) => error!("Skewer {entity:?} tick failed: {e}"),
        }
    }
}
