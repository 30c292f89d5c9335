//! Dispenser start/stop events.
//!
//! Fired exactly once per lever crossing by
//! [`dispenser_system`](crate::systems::dispenser::dispenser_system). A host
//! typically starts or stops a particle stream here.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// A dispenser started or stopped pouring.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispensingChanged {
    pub entity: Entity,
    pub dispensing: bool,
}

/// Observer that logs dispenser edges.
pub fn log_dispensing_changed(trigger: On<DispensingChanged>) {
    let event = trigger.event();
    if event.dispensing {
        info!("Dispenser {:?} started pouring", event.entity);
    } else {
        info!("Dispenser {:?} stopped pouring", event.entity);
    }
}
