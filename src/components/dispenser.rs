//! Lever-operated liquid dispenser component.
//!
//! A [`Dispenser`] holds a tank of liquid (or an endless supply) and pours it
//! while its lever is pulled past a threshold angle. The flow rate scales with
//! how far the lever is pulled.
//!
//! # Flow
//!
//! Each frame [`dispenser_system`](crate::systems::dispenser::dispenser_system):
//!
//! 1. compares the lever angle against the threshold and flips
//!    `dispensing` on the edges, emitting
//!    [`DispensingChanged`](crate::events::dispense::DispensingChanged)
//! 2. computes `step = dispense_speed * dt * angle_ratio`
//! 3. drains the tank by `step` unless unlimited
//! 4. adds the whole `step` to every receptacle in range and blends its colour
//!
//! Every target gets the full step; the step is not split between them.
//! With no targets in range the liquid is simply lost.

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

use crate::color::Rgb;
use crate::components::receptacle::LiquidReceptacle;
use crate::error::{SimError, check_delta};

/// Tuning for one dispenser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispenserProfile {
    /// Units per second at full lever.
    pub dispense_speed: f32,
    /// Tank size; the tank starts full.
    pub max_liquid_amount: f32,
    /// Ignore the tank entirely.
    pub unlimited_liquid: bool,
    /// Absolute lever angle, in degrees, that must be exceeded to pour.
    pub dispense_angle_threshold: f32,
    /// Lever angle giving full flow.
    pub max_lever_angle: f32,
    /// Colour of the liquid.
    pub color: Rgb,
}

impl Default for DispenserProfile {
    fn default() -> Self {
        Self {
            dispense_speed: 1.0,
            max_liquid_amount: 10.0,
            unlimited_liquid: true,
            dispense_angle_threshold: 0.0,
            max_lever_angle: 90.0,
            color: Rgb::CYAN,
        }
    }
}

impl DispenserProfile {
    pub fn validate(&self) -> Result<(), SimError> {
        non_negative("dispense_speed", self.dispense_speed)?;
        non_negative("max_liquid_amount", self.max_liquid_amount)?;
        non_negative("dispense_angle_threshold", self.dispense_angle_threshold)?;
        if !(self.max_lever_angle.is_finite() && self.max_lever_angle > 0.0) {
            return Err(SimError::InvalidProfile {
                field: "max_lever_angle",
                reason: format!("{} must be positive", self.max_lever_angle),
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidProfile {
            field,
            reason: format!("{value} must be finite and non-negative"),
        })
    }
}

#[derive(Component, Clone, Debug)]
pub struct Dispenser {
    profile: DispenserProfile,
    current_amount: f32,
    dispensing: bool,
    lever_angle: f32,
    /// Receptacles in range, in arrival order.
    targets: SmallVec<[Entity; 4]>,
}

impl Dispenser {
    /// Create a dispenser with a full tank.
    pub fn new(profile: DispenserProfile) -> Result<Self, SimError> {
        profile.validate()?;
        Ok(Self {
            profile,
            current_amount: profile.max_liquid_amount,
            dispensing: false,
            lever_angle: 0.0,
            targets: SmallVec::new(),
        })
    }

    pub fn profile(&self) -> &DispenserProfile {
        &self.profile
    }

    pub fn current_amount(&self) -> f32 {
        self.current_amount
    }

    pub fn is_dispensing(&self) -> bool {
        self.dispensing
    }

    pub fn lever_angle(&self) -> f32 {
        self.lever_angle
    }

    pub fn color(&self) -> Rgb {
        self.profile.color
    }

    pub fn has_liquid(&self) -> bool {
        self.profile.unlimited_liquid || self.current_amount > 0.0
    }

    /// Top the tank back up.
    pub fn refill(&mut self) {
        self.current_amount = self.profile.max_liquid_amount;
    }

    pub fn set_lever_angle(&mut self, degrees: f32) -> Result<(), SimError> {
        if !degrees.is_finite() {
            return Err(SimError::InvalidInput {
                field: "lever_angle",
                reason: format!("{degrees} is not a finite angle"),
            });
        }
        self.lever_angle = degrees;
        Ok(())
    }

    /// Flow scale from the lever, `|angle| / max_lever_angle` clamped to `[0, 1]`.
    pub fn angle_ratio(&self) -> f32 {
        (self.lever_angle.abs() / self.profile.max_lever_angle).clamp(0.0, 1.0)
    }

    /// Lever past the threshold and something left to pour.
    pub fn wants_to_dispense(&self) -> bool {
        self.lever_angle.abs() > self.profile.dispense_angle_threshold && self.has_liquid()
    }

    /// Switch pouring on or off. Returns `true` only on an actual edge.
    pub fn set_active(&mut self, dispensing: bool) -> bool {
        if self.dispensing == dispensing {
            return false;
        }
        self.dispensing = dispensing;
        true
    }

    /// Drain one step from the tank and return the amount poured this tick.
    ///
    /// Returns `0.0` while not dispensing or when a limited tank is empty.
    pub fn tick(&mut self, dt: f32, angle_ratio: f32) -> Result<f32, SimError> {
        let dt = check_delta(dt)?;
        if !self.dispensing || !self.has_liquid() {
            return Ok(0.0);
        }
        let step = self.profile.dispense_speed * dt * angle_ratio.clamp(0.0, 1.0);
        if step > 0.0 && !self.profile.unlimited_liquid {
            self.current_amount = (self.current_amount - step).max(0.0);
        }
        Ok(step)
    }

    /// Colour blend factor for one tick of `dt` seconds.
    pub fn mix_factor(&self, dt: f32) -> f32 {
        self.profile.dispense_speed * dt * 0.5
    }

    /// Pour `step` into `receptacle` and blend its colour towards ours.
    pub fn pour_into(&self, receptacle: &mut LiquidReceptacle, step: f32, dt: f32) {
        receptacle.add_liquid(step);
        self.mix_color(receptacle, dt);
    }

    pub fn mix_color(&self, receptacle: &mut LiquidReceptacle, dt: f32) {
        receptacle.blend_color(self.profile.color, self.mix_factor(dt));
    }

    /// Add a receptacle to the pour area. Returns `false` if already there.
    pub fn enter_target(&mut self, receptacle: Entity) -> bool {
        if self.targets.contains(&receptacle) {
            return false;
        }
        self.targets.push(receptacle);
        true
    }

    /// Remove a receptacle from the pour area. Returns `false` if it was not there.
    pub fn exit_target(&mut self, receptacle: Entity) -> bool {
        match self.targets.iter().position(|e| *e == receptacle) {
            Some(i) => {
                self.targets.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn targets(&self) -> &[Entity] {
        &self.targets
    }
}
