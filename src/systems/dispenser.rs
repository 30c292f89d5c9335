//! Liquid dispenser system.
//!
//! [`dispenser_system`] runs the lever edge detection and the pour step for
//! every [`Dispenser`], then pushes the poured volume into each receptacle in
//! range.
//!
//! Several dispensers may pour into the same receptacle within one frame.
//! Fill is additive so the order does not matter for volume, but colour
//! blending is applied sequentially in query order, so the final colour of a
//! shared receptacle depends on that order.
//!
//! A target that no longer exists is removed from the dispenser the first
//! time it would have been poured into.

use bevy_ecs::prelude::*;
use log::{debug, error, warn};
use smallvec::SmallVec;

use crate::components::dispenser::Dispenser;
use crate::components::receptacle::LiquidReceptacle;
use crate::events::dispense::DispensingChanged;
use crate::resources::worldtime::WorldTime;

/// Toggle pouring from the lever and transfer liquid to receptacles in range.
pub fn dispenser_system(
    world_time: Res<WorldTime>,
    mut dispensers: Query<(Entity, &mut Dispenser)>,
    mut receptacles: Query<&mut LiquidReceptacle>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut dispenser) in dispensers.iter_mut() {
        let wants = dispenser.wants_to_dispense();
        if dispenser.set_active(wants) {
            commands.trigger(DispensingChanged {
                entity,
                dispensing: wants,
            });
        }
        if !wants {
            continue;
        }

        let ratio = dispenser.angle_ratio();
        let step = match dispenser.tick(dt, ratio) {
            Ok(step) => step,
            Err(e) => {
                error!("Dispenser {entity:?} tick failed: {e}");
                continue;
            }
        };
        if step <= 0.0 {
            continue;
        }

        if dispenser.targets().is_empty() {
            debug!("Dispenser {entity:?} pouring {step} onto the floor");
        }
        let mut gone: SmallVec<[Entity; 4]> = SmallVec::new();
        for &target in dispenser.targets() {
            match receptacles.get_mut(target) {
                Ok(mut receptacle) => {
                    dispenser.pour_into(&mut receptacle, step, dt);
                    debug!(
                        "Transferred {step} to {target:?}, fill now {}",
                        receptacle.fill_amount()
                    );
                }
                Err(_) => gone.push(target),
            }
        }
        for target in gone {
            warn!("Dispenser {entity:?} target {target:?} is gone, dropping it");
            dispenser.exit_target(target);
        }
    }
}
