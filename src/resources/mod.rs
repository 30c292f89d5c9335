//! ECS resources made available to systems.
//!
//! Overview
//! - `kitchenconfig` – default tuning loaded from an INI file
//! - `worldtime` – simulation time and delta
pub mod kitchenconfig;
pub mod worldtime;
