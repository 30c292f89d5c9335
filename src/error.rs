//! Error type shared by the simulation API.
//!
//! Terminal-state ticks and repeated begin/enter calls are defined no-ops and
//! never produce an error. Everything here is a contract violation by the
//! caller: a bad time step, an entity that is not what the caller claims, or
//! a profile that cannot drive the timing formulas.

use bevy_ecs::prelude::Entity;
use thiserror::Error;

/// Errors reported by [`Kitchen`](crate::kitchen::Kitchen) and the component
/// operations it forwards to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Time step was negative, NaN or infinite.
    #[error("invalid time step: {0}")]
    InvalidDelta(f32),

    /// Side numbers are 1 or 2.
    #[error("invalid skewer side {0}, expected 1 or 2")]
    InvalidSide(u8),

    /// Entity does not exist or carries no `Skewer`.
    #[error("entity {0:?} is not a skewer")]
    UnknownSkewer(Entity),

    /// Entity does not exist or carries no `Dispenser`.
    #[error("entity {0:?} is not a dispenser")]
    UnknownDispenser(Entity),

    /// Entity does not exist or carries no `LiquidReceptacle`.
    #[error("entity {0:?} is not a liquid receptacle")]
    UnknownReceptacle(Entity),

    /// Entity does not exist or carries no `Meatball`.
    #[error("entity {0:?} is not a meatball")]
    UnknownMeatball(Entity),

    /// A cooking or dispenser profile value is out of range.
    #[error("invalid profile value `{field}`: {reason}")]
    InvalidProfile {
        /// Name of the offending setting.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A per-frame input from the host is out of range.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        /// Name of the offending input.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The configuration file could not be read, parsed or written.
    #[error("config error: {0}")]
    Config(String),
}

/// Validate an externally supplied time step.
pub fn check_delta(dt: f32) -> Result<f32, SimError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(dt)
    } else {
        Err(SimError::InvalidDelta(dt))
    }
}
