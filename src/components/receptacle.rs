//! Liquid receptacle component.
//!
//! A [`LiquidReceptacle`] is anything that can catch liquid from a
//! [`Dispenser`](crate::components::dispenser::Dispenser): a cup, a bowl, a
//! sauce pot. Fill is clamped to the receptacle's own capacity and the liquid
//! colour shifts towards whatever is being poured in.

use bevy_ecs::prelude::Component;

use crate::color::Rgb;
use crate::error::SimError;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct LiquidReceptacle {
    fill_amount: f32,
    capacity: f32,
    color: Rgb,
}

impl LiquidReceptacle {
    /// Create an empty receptacle.
    pub fn new(capacity: f32, color: Rgb) -> Result<Self, SimError> {
        if !(capacity.is_finite() && capacity >= 0.0) {
            return Err(SimError::InvalidProfile {
                field: "capacity",
                reason: format!("{capacity} must be a non-negative amount"),
            });
        }
        Ok(Self {
            fill_amount: 0.0,
            capacity,
            color,
        })
    }

    /// Start with some liquid already inside, clamped to capacity.
    pub fn with_fill(mut self, amount: f32) -> Self {
        self.add_liquid(amount);
        self
    }

    pub fn fill_amount(&self) -> f32 {
        self.fill_amount
    }

    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Fill level in `[0, 1]`. An empty-capacity receptacle reports `0`.
    pub fn fill_ratio(&self) -> f32 {
        if self.capacity > 0.0 {
            self.fill_amount / self.capacity
        } else {
            0.0
        }
    }

    pub fn is_full(&self) -> bool {
        self.fill_amount >= self.capacity
    }

    /// Add liquid, clamped to `[0, capacity]`. Returns the amount actually kept.
    pub fn add_liquid(&mut self, amount: f32) -> f32 {
        let before = self.fill_amount;
        self.fill_amount = (self.fill_amount + amount).clamp(0.0, self.capacity);
        self.fill_amount - before
    }

    /// Blend the liquid colour towards `incoming` by `t`.
    pub fn blend_color(&mut self, incoming: Rgb, t: f32) {
        self.color = self.color.lerp(incoming, t);
    }
}
