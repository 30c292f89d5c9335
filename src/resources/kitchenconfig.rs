//! Kitchen configuration resource.
//!
//! Holds the default cooking and dispenser tuning, loaded from an INI file.
//! Missing keys keep their defaults so a partial file is fine.
//!
//! # Configuration File Format
//!
//! ```ini
//! [cooking]
//! time_to_cook_side = 8.0
//! time_until_burned = 16.0
//! target_cook_progress = 0.9
//!
//! [dispenser]
//! dispense_speed = 1.0
//! max_liquid_amount = 10.0
//! unlimited_liquid = true
//! dispense_angle_threshold = 0.0
//! max_lever_angle = 90.0
//!
//! [time]
//! time_scale = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::dispenser::DispenserProfile;
use crate::components::skewer::CookingProfile;
use crate::error::SimError;

const DEFAULT_CONFIG_PATH: &str = "./kitchen.ini";
const DEFAULT_TIME_SCALE: f32 = 1.0;

/// Kitchen configuration resource.
///
/// New skewers and dispensers spawned through
/// [`Kitchen`](crate::kitchen::Kitchen) use these profiles unless the caller
/// passes its own.
#[derive(Resource, Debug, Clone)]
pub struct KitchenConfig {
    /// Default timing for skewers.
    pub cooking: CookingProfile,
    /// Default tuning for dispensers.
    pub dispenser: DispenserProfile,
    /// Initial simulation time scale.
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KitchenConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            cooking: CookingProfile::default(),
            dispenser: DispenserProfile::default(),
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Check every value before it reaches a component.
    pub fn validate(&self) -> Result<(), SimError> {
        self.cooking.validate()?;
        self.dispenser.validate()?;
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(SimError::InvalidProfile {
                field: "time_scale",
                reason: format!("{} must be finite and non-negative", self.time_scale),
            });
        }
        Ok(())
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting values are invalid.
    pub fn load_from_file(&mut self) -> Result<(), SimError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| SimError::Config(format!("failed to load config file: {e}")))?;
        self.apply(&config)?;
        info!("Loaded kitchen config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), SimError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| SimError::Config(format!("failed to parse config: {e}")))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<(), SimError> {
        let float = |section: &str, key: &str| -> Result<Option<f32>, SimError> {
            config
                .getfloat(section, key)
                .map(|v| v.map(|v| v as f32))
                .map_err(|e| SimError::Config(format!("[{section}] {key}: {e}")))
        };
        let mut next = self.clone();

        // [cooking] section
        if let Some(v) = float("cooking", "time_to_cook_side")? {
            next.cooking.time_to_cook_side = v;
        }
        if let Some(v) = float("cooking", "time_until_burned")? {
            next.cooking.time_until_burned = v;
        }
        if let Some(v) = float("cooking", "target_cook_progress")? {
            next.cooking.target_cook_progress = v;
        }

        // [dispenser] section
        if let Some(v) = float("dispenser", "dispense_speed")? {
            next.dispenser.dispense_speed = v;
        }
        if let Some(v) = float("dispenser", "max_liquid_amount")? {
            next.dispenser.max_liquid_amount = v;
        }
        if let Some(v) = config
            .getbool("dispenser", "unlimited_liquid")
            .map_err(|e| SimError::Config(format!("[dispenser] unlimited_liquid: {e}")))?
        {
            next.dispenser.unlimited_liquid = v;
        }
        if let Some(v) = float("dispenser", "dispense_angle_threshold")? {
            next.dispenser.dispense_angle_threshold = v;
        }
        if let Some(v) = float("dispenser", "max_lever_angle")? {
            next.dispenser.max_lever_angle = v;
        }

        // [time] section
        if let Some(v) = float("time", "time_scale")? {
            next.time_scale = v;
        }

        next.validate()?;
        *self = next;

        info!(
            "Kitchen config: cook {}s/side, burn after {}s, target {}, pour {}/s, tank {} (unlimited={})",
            self.cooking.time_to_cook_side,
            self.cooking.time_until_burned,
            self.cooking.target_cook_progress,
            self.dispenser.dispense_speed,
            self.dispenser.max_liquid_amount,
            self.dispenser.unlimited_liquid
        );
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), SimError> {
        let mut config = Ini::new();

        // [cooking] section
        let c = &self.cooking;
        config.set("cooking", "time_to_cook_side", Some(c.time_to_cook_side.to_string()));
        config.set("cooking", "time_until_burned", Some(c.time_until_burned.to_string()));
        config.set(
            "cooking",
            "target_cook_progress",
            Some(c.target_cook_progress.to_string()),
        );

        // [dispenser] section
        let d = &self.dispenser;
        config.set("dispenser", "dispense_speed", Some(d.dispense_speed.to_string()));
        config.set("dispenser", "max_liquid_amount", Some(d.max_liquid_amount.to_string()));
        config.set("dispenser", "unlimited_liquid", Some(d.unlimited_liquid.to_string()));
        config.set(
            "dispenser",
            "dispense_angle_threshold",
            Some(d.dispense_angle_threshold.to_string()),
        );
        config.set("dispenser", "max_lever_angle", Some(d.max_lever_angle.to_string()));

        // [time] section
        config.set("time", "time_scale", Some(self.time_scale.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| SimError::Config(format!("failed to save config file: {e}")))?;

        info!("Saved kitchen config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_original_tuning() {
        let c = KitchenConfig::new();
        assert_eq!(c.cooking.time_to_cook_side, 8.0);
        assert_eq!(c.cooking.time_until_burned, 16.0);
        assert_eq!(c.cooking.target_cook_progress, 0.9);
        assert_eq!(c.dispenser.dispense_speed, 1.0);
        assert_eq!(c.dispenser.max_liquid_amount, 10.0);
        assert!(c.dispenser.unlimited_liquid);
        assert_eq!(c.dispenser.max_lever_angle, 90.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_ini_keeps_other_defaults() {
        let mut c = KitchenConfig::new();
        c.load_from_str("[cooking]\ntime_to_cook_side = 4.0\n\n[dispenser]\nunlimited_liquid = false\n")
            .unwrap();
        assert_eq!(c.cooking.time_to_cook_side, 4.0);
        assert_eq!(c.cooking.time_until_burned, 16.0);
        assert!(!c.dispenser.unlimited_liquid);
        assert_eq!(c.dispenser.max_liquid_amount, 10.0);
    }

    #[test]
    fn test_invalid_values_leave_config_untouched() {
        let mut c = KitchenConfig::new();
        let err = c
            .load_from_str("[cooking]\ntarget_cook_progress = 1.5\n")
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidProfile {
                field: "target_cook_progress",
                ..
            }
        ));
        assert_eq!(c.cooking.target_cook_progress, 0.9);
    }

    #[test]
    fn test_unparsable_number_is_a_config_error() {
        let mut c = KitchenConfig::new();
        let err = c.load_from_str("[dispenser]\ndispense_speed = fast\n").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let mut c = KitchenConfig::with_path("/nonexistent/kitchen.ini");
        assert!(matches!(c.load_from_file(), Err(SimError::Config(_))));
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let path = std::env::temp_dir().join("kitchensim_config_test.ini");
        let mut c = KitchenConfig::with_path(&path);
        c.cooking.time_to_cook_side = 5.0;
        c.dispenser.unlimited_liquid = false;
        c.time_scale = 0.5;
        c.save_to_file().unwrap();

        let mut loaded = KitchenConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.cooking.time_to_cook_side, 5.0);
        assert!(!loaded.dispenser.unlimited_liquid);
        assert_eq!(loaded.time_scale, 0.5);
        let _ = std::fs::remove_file(&path);
    }
}
