//! Two-sided skewer cooking state.
//!
//! A [`Skewer`] carries two [`CookSide`]s that heat independently while they
//! touch a grill. Each side walks a single normalized `progress` scalar
//! through two phases:
//!
//! - **Phase A** (`progress < target`): `progress = elapsed / time_to_cook_side`.
//! - **Phase B** (overcook): `progress = target + (1 - target) * overcook_elapsed / time_until_burned`.
//!
//! When a side crosses the target and the other side is already there, the
//! whole skewer becomes [`SkewerState::Cooked`]. When any side reaches `1.0`
//! it becomes [`SkewerState::Burned`]. Both states are terminal: all sides are
//! switched off and further ticks do nothing.
//!
//! Time left over in the tick that crosses the target carries into phase B,
//! so a side's progress depends only on its cumulative active time.
//!
//! # Related
//!
//! - [`crate::systems::cooking::cooking_system`] – ticks active sides every frame
//! - [`crate::events::cooking::SkewerStateChanged`] – emitted on transitions

use std::fmt;

use bevy_ecs::prelude::Component;
use log::debug;
use serde::Serialize;

use crate::color::Rgb;
use crate::error::{SimError, check_delta};

/// Which side of the skewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    /// Host-facing side number, 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }

    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = SimError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Side::One),
            2 => Ok(Side::Two),
            other => Err(SimError::InvalidSide(other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side {}", self.number())
    }
}

/// Timing constants for one skewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CookingProfile {
    /// Seconds for a side to go from raw to `1.0` at the phase A rate.
    pub time_to_cook_side: f32,
    /// Seconds spent in phase B before a side burns.
    pub time_until_burned: f32,
    /// Progress at which a side counts as done.
    pub target_cook_progress: f32,
}

impl Default for CookingProfile {
    fn default() -> Self {
        Self {
            time_to_cook_side: 8.0,
            time_until_burned: 16.0,
            target_cook_progress: 0.9,
        }
    }
}

impl CookingProfile {
    /// Reject values the timing formulas cannot work with.
    pub fn validate(&self) -> Result<(), SimError> {
        positive("time_to_cook_side", self.time_to_cook_side)?;
        positive("time_until_burned", self.time_until_burned)?;
        let t = self.target_cook_progress;
        if !(t > 0.0 && t < 1.0) {
            return Err(SimError::InvalidProfile {
                field: "target_cook_progress",
                reason: format!("{t} is outside (0, 1)"),
            });
        }
        Ok(())
    }

    /// Active seconds needed to reach the target.
    pub fn time_to_target(&self) -> f32 {
        self.target_cook_progress * self.time_to_cook_side
    }

    /// Progress after `overcook_elapsed` seconds of phase B.
    pub fn overcook_progress(&self, overcook_elapsed: f32) -> f32 {
        let t = self.target_cook_progress;
        (t + (1.0 - t) * (overcook_elapsed / self.time_until_burned)).clamp(0.0, 1.0)
    }

    /// Progress of a side that has been active for `active_time` seconds in total.
    pub fn progress_at(&self, active_time: f32) -> f32 {
        let to_target = self.time_to_target();
        if active_time < to_target {
            (active_time / self.time_to_cook_side).clamp(0.0, 1.0)
        } else {
            self.overcook_progress(active_time - to_target)
        }
    }

    /// Meat colour for a given side progress.
    ///
    /// Raw to cooked below the target, cooked to black above it.
    pub fn side_color(&self, progress: f32) -> Rgb {
        let t = self.target_cook_progress;
        if progress >= t {
            let burn = (progress - t) / (1.0 - t);
            Rgb::COOKED_MEAT.lerp(Rgb::BLACK, burn)
        } else {
            Rgb::RAW_MEAT.lerp(Rgb::COOKED_MEAT, progress / t)
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidProfile {
            field,
            reason: format!("{value} must be a positive number of seconds"),
        })
    }
}

/// Heating state of one side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CookSide {
    /// `0.0` raw, `target` done, `1.0` burned.
    pub progress: f32,
    /// Touching a heat zone.
    pub active: bool,
    /// Phase A seconds.
    pub elapsed: f32,
    /// Phase B seconds.
    pub overcook_elapsed: f32,
}

impl CookSide {
    pub fn is_done(&self, profile: &CookingProfile) -> bool {
        self.progress >= profile.target_cook_progress
    }

    /// Rebuild both timers from the stored progress.
    fn resume(&mut self, profile: &CookingProfile) {
        let t = profile.target_cook_progress;
        if self.progress < t {
            self.elapsed = self.progress * profile.time_to_cook_side;
            self.overcook_elapsed = 0.0;
        } else {
            self.elapsed = profile.time_to_target();
            self.overcook_elapsed = (self.progress - t) / (1.0 - t) * profile.time_until_burned;
        }
    }

    /// Phase A step. Returns the unused part of `dt` when the target is crossed.
    fn advance_to_target(&mut self, profile: &CookingProfile, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        let raw = (self.elapsed / profile.time_to_cook_side).clamp(0.0, 1.0);
        if raw < profile.target_cook_progress {
            self.progress = raw;
            return None;
        }
        let leftover = (self.elapsed - profile.time_to_target()).max(0.0);
        self.elapsed = profile.time_to_target();
        self.progress = profile.target_cook_progress;
        Some(leftover)
    }

    /// Phase B step. Returns `true` once the side is burned.
    fn advance_overcook(&mut self, profile: &CookingProfile, dt: f32) -> bool {
        self.overcook_elapsed += dt;
        self.progress = profile.overcook_progress(self.overcook_elapsed);
        if self.overcook_elapsed >= profile.time_until_burned || self.progress >= 1.0 {
            self.progress = 1.0;
            true
        } else {
            false
        }
    }
}

/// Whole-skewer doneness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SkewerState {
    #[default]
    Raw,
    Cooking,
    Cooked,
    Burned,
}

impl SkewerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SkewerState::Cooked | SkewerState::Burned)
    }
}

/// Skewer with two independently heated sides.
#[derive(Component, Clone, Debug, Default)]
pub struct Skewer {
    profile: CookingProfile,
    side1: CookSide,
    side2: CookSide,
    state: SkewerState,
}

impl Skewer {
    /// Create a raw skewer. The profile is validated.
    pub fn new(profile: CookingProfile) -> Result<Self, SimError> {
        profile.validate()?;
        Ok(Self {
            profile,
            ..Default::default()
        })
    }

    pub fn profile(&self) -> &CookingProfile {
        &self.profile
    }

    pub fn state(&self) -> SkewerState {
        self.state
    }

    pub fn side(&self, side: Side) -> &CookSide {
        match side {
            Side::One => &self.side1,
            Side::Two => &self.side2,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut CookSide {
        match side {
            Side::One => &mut self.side1,
            Side::Two => &mut self.side2,
        }
    }

    pub fn progress(&self, side: Side) -> f32 {
        self.side(side).progress
    }

    pub fn side_color(&self, side: Side) -> Rgb {
        self.profile.side_color(self.progress(side))
    }

    pub fn is_cooking(&self, side: Side) -> bool {
        self.side(side).active
    }

    /// Put a side on the heat. Returns `false` when nothing changed.
    pub fn begin_cooking(&mut self, side: Side) -> bool {
        if self.state.is_terminal() || self.side(side).active {
            return false;
        }
        let profile = self.profile;
        let s = self.side_mut(side);
        s.resume(&profile);
        s.active = true;
        debug!("Started cooking {side} at {:.1}%", s.progress * 100.0);
        true
    }

    /// Take a side off the heat. Progress is kept. Returns `false` if it was not cooking.
    pub fn end_cooking(&mut self, side: Side) -> bool {
        let s = self.side_mut(side);
        if !s.active {
            return false;
        }
        s.active = false;
        debug!("Stopped cooking {side} at {:.1}%", s.progress * 100.0);
        true
    }

    /// Advance one side by `dt` seconds.
    ///
    /// Returns the new state when the skewer changed state during this step.
    pub fn tick_side(&mut self, side: Side, dt: f32) -> Result<Option<SkewerState>, SimError> {
        let dt = check_delta(dt)?;
        let before = self.state;
        if before.is_terminal() || !self.side(side).active {
            return Ok(None);
        }
        let profile = self.profile;

        let mut overcook_dt = dt;
        if !self.side(side).is_done(&profile) {
            match self.side_mut(side).advance_to_target(&profile, dt) {
                None => {
                    self.mark_cooking();
                    return Ok(self.transition_from(before));
                }
                Some(leftover) => {
                    debug!("{side} reached target cook progress");
                    if self.side1.is_done(&profile) && self.side2.is_done(&profile) {
                        self.finish(SkewerState::Cooked);
                        return Ok(self.transition_from(before));
                    }
                    overcook_dt = leftover;
                }
            }
        }

        if overcook_dt > 0.0 && self.side_mut(side).advance_overcook(&profile, overcook_dt) {
            self.finish(SkewerState::Burned);
        } else {
            self.mark_cooking();
        }
        Ok(self.transition_from(before))
    }

    /// Advance both sides by `dt`, side one first.
    pub fn tick(&mut self, dt: f32) -> Result<Option<SkewerState>, SimError> {
        let before = self.state;
        for side in Side::BOTH {
            self.tick_side(side, dt)?;
        }
        Ok(self.transition_from(before))
    }

    fn mark_cooking(&mut self) {
        if self.state == SkewerState::Raw
            && (self.side1.progress > 0.0 || self.side2.progress > 0.0)
        {
            self.state = SkewerState::Cooking;
        }
    }

    fn finish(&mut self, state: SkewerState) {
        self.state = state;
        self.side1.active = false;
        self.side2.active = false;
    }

    fn transition_from(&self, before: SkewerState) -> Option<SkewerState> {
        (self.state != before).then_some(self.state)
    }
}
