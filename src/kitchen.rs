//! Kitchen facade.
//!
//! [`Kitchen`] owns the ECS [`World`] and the per-frame [`Schedule`] and
//! exposes the whole simulation as a small entity-keyed API: contact and
//! proximity signals in, progress and fill levels out. Hosts that already
//! run their own `bevy_ecs` world can skip this type and register the
//! systems from [`crate::systems`] directly.
//!
//! # Frame Order
//!
//! [`Kitchen::advance`] updates [`WorldTime`] and then runs, in order:
//!
//! 1. [`skewer_slot_system`] – attach meatballs that dwelt long enough
//! 2. [`cooking_system`] – advance skewer sides on the grill
//! 3. [`dispenser_system`] – lever edges and liquid transfer
//!
//! Events triggered by the systems are delivered to observers before
//! `advance` returns.
//!
//! # Errors
//!
//! Every call naming an entity checks that the entity carries the matching
//! component and returns a [`SimError`] otherwise. Time steps must be finite
//! and non-negative.

use bevy_ecs::prelude::*;
use log::{debug, info};
use serde::Serialize;

use crate::color::Rgb;
use crate::components::dispenser::{Dispenser, DispenserProfile};
use crate::components::receptacle::LiquidReceptacle;
use crate::components::skewer::{CookingProfile, Side, Skewer, SkewerState};
use crate::components::skewerslot::{Meatball, SkewerSlot};
use crate::error::{SimError, check_delta};
use crate::events::cooking::log_skewer_state_changed;
use crate::events::dispense::log_dispensing_changed;
use crate::events::slot::log_meatball_attached;
use crate::resources::kitchenconfig::KitchenConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::cooking::cooking_system;
use crate::systems::dispenser::dispenser_system;
use crate::systems::skewerslot::skewer_slot_system;
use crate::systems::time::update_world_time;

pub struct Kitchen {
    world: World,
    update: Schedule,
}

impl Kitchen {
    /// Build a kitchen from a configuration. The configuration is validated.
    pub fn new(config: KitchenConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
        world.insert_resource(config);

        world.add_observer(log_skewer_state_changed);
        world.add_observer(log_dispensing_changed);
        world.add_observer(log_meatball_attached);
        world.flush();

        let mut update = Schedule::default();
        update.add_systems((skewer_slot_system, cooking_system, dispenser_system).chain());

        info!("Kitchen ready");
        Ok(Self { world, update })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access, e.g. to register extra observers.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &KitchenConfig {
        self.world.resource::<KitchenConfig>()
    }

    pub fn time(&self) -> WorldTime {
        *self.world.resource::<WorldTime>()
    }

    pub fn set_time_scale(&mut self, time_scale: f32) -> Result<(), SimError> {
        if !(time_scale.is_finite() && time_scale >= 0.0) {
            return Err(SimError::InvalidInput {
                field: "time_scale",
                reason: format!("{time_scale} must be finite and non-negative"),
            });
        }
        self.world.resource_mut::<WorldTime>().time_scale = time_scale;
        Ok(())
    }

    // --------------- Spawning ---------------

    /// Spawn a raw skewer with the configured cooking profile.
    pub fn spawn_skewer(&mut self) -> Result<Entity, SimError> {
        let profile = self.config().cooking;
        self.spawn_skewer_with(profile)
    }

    pub fn spawn_skewer_with(&mut self, profile: CookingProfile) -> Result<Entity, SimError> {
        let skewer = Skewer::new(profile)?;
        let entity = self.world.spawn((skewer, SkewerSlot::default())).id();
        debug!("Spawned skewer {entity:?}");
        Ok(entity)
    }

    /// Spawn a full dispenser with the configured profile.
    pub fn spawn_dispenser(&mut self) -> Result<Entity, SimError> {
        let profile = self.config().dispenser;
        self.spawn_dispenser_with(profile)
    }

    pub fn spawn_dispenser_with(&mut self, profile: DispenserProfile) -> Result<Entity, SimError> {
        let dispenser = Dispenser::new(profile)?;
        let entity = self.world.spawn(dispenser).id();
        debug!("Spawned dispenser {entity:?}");
        Ok(entity)
    }

    /// Spawn an empty receptacle.
    pub fn spawn_receptacle(&mut self, capacity: f32, color: Rgb) -> Result<Entity, SimError> {
        let receptacle = LiquidReceptacle::new(capacity, color)?;
        Ok(self.world.spawn(receptacle).id())
    }

    pub fn spawn_meatball(&mut self) -> Entity {
        self.world.spawn(Meatball::default()).id()
    }

    // --------------- Inbound signals ---------------

    /// A skewer side touched the grill. Returns `true` if it started cooking.
    pub fn contact_begin(&mut self, skewer: Entity, side: Side) -> Result<bool, SimError> {
        Ok(self.skewer_mut(skewer)?.begin_cooking(side))
    }

    /// A skewer side left the grill. Returns `true` if it was cooking.
    pub fn contact_end(&mut self, skewer: Entity, side: Side) -> Result<bool, SimError> {
        Ok(self.skewer_mut(skewer)?.end_cooking(side))
    }

    /// A receptacle moved under a dispenser's spout.
    pub fn proximity_enter(
        &mut self,
        dispenser: Entity,
        receptacle: Entity,
    ) -> Result<bool, SimError> {
        self.receptacle(receptacle)?;
        let added = self.dispenser_mut(dispenser)?.enter_target(receptacle);
        if added {
            debug!("Receptacle {receptacle:?} in range of {dispenser:?}");
        }
        Ok(added)
    }

    /// A receptacle left the spout area.
    ///
    /// A receptacle that is still registered may be removed even after it was
    /// despawned.
    pub fn proximity_exit(
        &mut self,
        dispenser: Entity,
        receptacle: Entity,
    ) -> Result<bool, SimError> {
        let removed = self.dispenser_mut(dispenser)?.exit_target(receptacle);
        if !removed {
            self.receptacle(receptacle)?;
        }
        Ok(removed)
    }

    /// Current lever angle in degrees. Pouring reacts on the next `advance`.
    pub fn set_lever_angle(&mut self, dispenser: Entity, degrees: f32) -> Result<(), SimError> {
        self.dispenser_mut(dispenser)?.set_lever_angle(degrees)
    }

    pub fn refill(&mut self, dispenser: Entity) -> Result<(), SimError> {
        self.dispenser_mut(dispenser)?.refill();
        Ok(())
    }

    /// A meatball is resting in the skewer's slot.
    ///
    /// Returns `false` when the meatball is already on a skewer.
    pub fn slot_enter(&mut self, skewer: Entity, meatball: Entity) -> Result<bool, SimError> {
        let attached = self
            .world
            .get::<Meatball>(meatball)
            .ok_or(SimError::UnknownMeatball(meatball))?
            .is_attached();
        let mut slot = self
            .world
            .get_mut::<SkewerSlot>(skewer)
            .ok_or(SimError::UnknownSkewer(skewer))?;
        if attached {
            return Ok(false);
        }
        debug!("Meatball {meatball:?} entered slot of {skewer:?}");
        slot.offer(meatball);
        Ok(true)
    }

    /// Whatever was resting in the slot was pulled out.
    pub fn slot_exit(&mut self, skewer: Entity) -> Result<(), SimError> {
        self.world
            .get_mut::<SkewerSlot>(skewer)
            .ok_or(SimError::UnknownSkewer(skewer))?
            .withdraw();
        Ok(())
    }

    /// Advance the simulation by `dt` unscaled seconds.
    pub fn advance(&mut self, dt: f32) -> Result<(), SimError> {
        let dt = check_delta(dt)?;
        update_world_time(&mut self.world, dt);
        self.update.run(&mut self.world);
        self.world.clear_trackers();
        Ok(())
    }

    // --------------- Queries ---------------

    pub fn progress(&self, skewer: Entity, side: Side) -> Result<f32, SimError> {
        Ok(self.skewer(skewer)?.progress(side))
    }

    pub fn skewer_state(&self, skewer: Entity) -> Result<SkewerState, SimError> {
        Ok(self.skewer(skewer)?.state())
    }

    /// Presentation colour of one side of the meat.
    pub fn side_color(&self, skewer: Entity, side: Side) -> Result<Rgb, SimError> {
        Ok(self.skewer(skewer)?.side_color(side))
    }

    pub fn attached_meatball(&self, skewer: Entity) -> Result<Option<Entity>, SimError> {
        self.world
            .get::<SkewerSlot>(skewer)
            .map(|slot| slot.attached)
            .ok_or(SimError::UnknownSkewer(skewer))
    }

    pub fn fill_amount(&self, receptacle: Entity) -> Result<f32, SimError> {
        Ok(self.receptacle(receptacle)?.fill_amount())
    }

    pub fn color(&self, receptacle: Entity) -> Result<Rgb, SimError> {
        Ok(self.receptacle(receptacle)?.color())
    }

    pub fn dispenser_amount(&self, dispenser: Entity) -> Result<f32, SimError> {
        Ok(self.dispenser(dispenser)?.current_amount())
    }

    pub fn is_dispensing(&self, dispenser: Entity) -> Result<bool, SimError> {
        Ok(self.dispenser(dispenser)?.is_dispensing())
    }

    /// Serializable view of every simulated object, ordered by entity.
    pub fn snapshot(&mut self) -> KitchenSnapshot {
        let mut skewers: Vec<SkewerSnapshot> = self
            .world
            .query::<(Entity, &Skewer)>()
            .iter(&self.world)
            .map(|(entity, skewer)| SkewerSnapshot {
                id: entity.to_bits(),
                state: skewer.state(),
                side1: skewer.progress(Side::One),
                side2: skewer.progress(Side::Two),
            })
            .collect();
        skewers.sort_by_key(|s| s.id);

        let mut dispensers: Vec<DispenserSnapshot> = self
            .world
            .query::<(Entity, &Dispenser)>()
            .iter(&self.world)
            .map(|(entity, dispenser)| DispenserSnapshot {
                id: entity.to_bits(),
                amount: dispenser.current_amount(),
                dispensing: dispenser.is_dispensing(),
                targets: dispenser.targets().iter().map(|e| e.to_bits()).collect(),
            })
            .collect();
        dispensers.sort_by_key(|d| d.id);

        let mut receptacles: Vec<ReceptacleSnapshot> = self
            .world
            .query::<(Entity, &LiquidReceptacle)>()
            .iter(&self.world)
            .map(|(entity, r)| ReceptacleSnapshot {
                id: entity.to_bits(),
                fill_amount: r.fill_amount(),
                capacity: r.capacity(),
                color: r.color(),
            })
            .collect();
        receptacles.sort_by_key(|r| r.id);

        KitchenSnapshot {
            elapsed: self.time().elapsed,
            skewers,
            dispensers,
            receptacles,
        }
    }

    // --------------- Lookups ---------------

    fn skewer(&self, entity: Entity) -> Result<&Skewer, SimError> {
        self.world
            .get::<Skewer>(entity)
            .ok_or(SimError::UnknownSkewer(entity))
    }

    fn skewer_mut(&mut self, entity: Entity) -> Result<Mut<'_, Skewer>, SimError> {
        self.world
            .get_mut::<Skewer>(entity)
            .ok_or(SimError::UnknownSkewer(entity))
    }

    fn dispenser(&self, entity: Entity) -> Result<&Dispenser, SimError> {
        self.world
            .get::<Dispenser>(entity)
            .ok_or(SimError::UnknownDispenser(entity))
    }

    fn dispenser_mut(&mut self, entity: Entity) -> Result<Mut<'_, Dispenser>, SimError> {
        self.world
            .get_mut::<Dispenser>(entity)
            .ok_or(SimError::UnknownDispenser(entity))
    }

    fn receptacle(&self, entity: Entity) -> Result<&LiquidReceptacle, SimError> {
        self.world
            .get::<LiquidReceptacle>(entity)
            .ok_or(SimError::UnknownReceptacle(entity))
    }
}

/// Point-in-time view of the kitchen, for logging or JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct KitchenSnapshot {
    pub elapsed: f32,
    pub skewers: Vec<SkewerSnapshot>,
    pub dispensers: Vec<DispenserSnapshot>,
    pub receptacles: Vec<ReceptacleSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkewerSnapshot {
    pub id: u64,
    pub state: SkewerState,
    pub side1: f32,
    pub side2: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DispenserSnapshot {
    pub id: u64,
    pub amount: f32,
    pub dispensing: bool,
    pub targets: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceptacleSnapshot {
    pub id: u64,
    pub fill_amount: f32,
    pub capacity: f32,
    pub color: Rgb,
}
