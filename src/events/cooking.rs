//! Skewer state transition events.
//!
//! [`cooking_system`](crate::systems::cooking::cooking_system) triggers a
//! [`SkewerStateChanged`] whenever a skewer moves between
//! [`SkewerState`]s. Presentation code observes it to swap meshes or play
//! sizzling sounds; the core never touches visuals itself.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<SkewerStateChanged>| {
//!     if trigger.event().state == SkewerState::Burned {
//!         // show the charred mesh
//!     }
//! });
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::skewer::SkewerState;

/// A skewer changed state.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkewerStateChanged {
    /// The skewer entity.
    pub entity: Entity,
    /// State before the transition.
    pub from: SkewerState,
    /// State after the transition.
    pub state: SkewerState,
}

/// Observer that logs skewer transitions.
pub fn log_skewer_state_changed(trigger: On<SkewerStateChanged>) {
    let event = trigger.event();
    match event.state {
        SkewerState::Cooked => info!("Skewer {:?} is perfectly cooked!", event.entity),
        SkewerState::Burned => info!("Skewer {:?} burned!", event.entity),
        state => info!(
            "Skewer {:?}: {:?} -> {:?}",
            event.entity, event.from, state
        ),
    }
}
