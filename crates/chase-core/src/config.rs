//! Configuration loading for the simulation.
//!
//! All tuning values are loaded from a TOML file. Every section falls back to
//! its defaults, so a file only needs the values it overrides. Loaded
//! configurations are validated before any component is built from them.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Mask progress settings
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Player movement settings
    #[serde(default)]
    pub player: PlayerConfig,
    /// Hunter behavior settings
    #[serde(default)]
    pub hunter: HunterConfig,
    /// Threat indicator settings
    #[serde(default)]
    pub indicator: IndicatorConfig,
}

impl SimConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.progress.validate()?;
        self.player.validate()?;
        self.hunter.validate()?;
        self.indicator.validate()
    }
}

/// Faction progress configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Accumulator value at which a faction fully assimilates the player
    pub max_progress: f32,
    /// How fast the mask appearance eases toward its target, per second
    pub mask_transition_speed: f32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            max_progress: 100.0,
            mask_transition_speed: 2.0,
        }
    }
}

impl ProgressConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("progress.max_progress", self.max_progress)?;
        positive("progress.mask_transition_speed", self.mask_transition_speed)
    }
}

/// Player movement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Top speed in units per second
    pub move_speed: f32,
    /// Velocity blend rate while input is held, per second
    pub acceleration: f32,
    /// Velocity blend rate while input is released, per second
    pub deceleration: f32,
    /// Input magnitudes below this are treated as zero
    pub input_deadzone: f32,
    /// Speed above which the player counts as walking
    pub walk_threshold: f32,
    /// Minimum seconds between accepted walking-state flips
    pub walk_cooldown: f32,
    /// Radius of the player's collision shape for catch detection
    pub catch_radius: f32,
    /// Progress added per second toward the faction of the current zone
    pub zone_progress_rate: f32,
    /// Lower-left corner of the movement bounds
    pub bounds_min: Vec2,
    /// Upper-right corner of the movement bounds
    pub bounds_max: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            acceleration: 10.0,
            deceleration: 10.0,
            input_deadzone: 0.1,
            walk_threshold: 0.1,
            walk_cooldown: 0.1,
            catch_radius: 0.5,
            zone_progress_rate: 10.0,
            bounds_min: Vec2::new(-10.0, -5.0),
            bounds_max: Vec2::new(10.0, 5.0),
        }
    }
}

impl PlayerConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        positive("player.move_speed", self.move_speed)?;
        positive("player.acceleration", self.acceleration)?;
        positive("player.deceleration", self.deceleration)?;
        non_negative("player.input_deadzone", self.input_deadzone)?;
        if self.input_deadzone >= 1.0 {
            return Err(ConfigError::invalid(
                "player.input_deadzone",
                "must be below 1.0 or no input would ever register",
            ));
        }
        positive("player.walk_threshold", self.walk_threshold)?;
        non_negative("player.walk_cooldown", self.walk_cooldown)?;
        positive("player.catch_radius", self.catch_radius)?;
        non_negative("player.zone_progress_rate", self.zone_progress_rate)?;
        validate_bounds(self.bounds_min, self.bounds_max)
    }
}

/// Hunter behavior configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HunterConfig {
    /// Starting movement speed
    pub base_speed: f32,
    /// Speed growth never exceeds this
    pub max_speed: f32,
    /// Whether speed grows over the session
    pub speed_growth_enabled: bool,
    /// Speed gained per second once growth starts
    pub speed_growth_rate: f32,
    /// Session seconds before speed growth starts
    pub growth_start_delay: f32,
    /// Distance at which a hunter notices the player
    pub detection_range: f32,
    /// Distance at which a chasing hunter catches the player
    pub attack_range: f32,
    /// A chase is abandoned beyond this multiple of the detection range
    pub lose_sight_factor: f32,
    /// Radius of the wander patrol around the wander center
    pub wander_radius: f32,
    /// Seconds between wander retargets
    pub wander_interval: f32,
    /// Random +/- variation applied to each wander interval
    pub wander_jitter: f32,
    /// Distance at which a wander target counts as reached
    pub wander_reach_threshold: f32,
    /// Wander radius scale while the player stands in the hunter's territory
    pub same_faction_wander_scale: f32,
    /// Chase speed multiplier while the player is in rival territory
    pub enemy_zone_multiplier: f32,
    /// Chase speed multiplier while the player is in neutral territory
    pub neutral_zone_multiplier: f32,
    /// Radius of the hunter's collision shape for catch detection
    pub body_radius: f32,
    /// Collision impulse magnitude above which the hunter is knocked back
    pub knockback_threshold: f32,
    /// Seconds a recorded collision impulse stays alive
    pub impulse_decay: f32,
    /// Per-second damping of the knockback drift velocity
    pub knockback_damping: f32,
    /// Walking speed while returning to the patrol range
    pub return_speed: f32,
    /// Fraction of the way from the range center toward the hunter used as return target
    pub return_fraction: f32,
    /// Distance to the return target that counts as arrived
    pub return_arrive_distance: f32,
    /// Drift speed below which an arrived hunter counts as settled
    pub return_settle_speed: f32,
    /// Strays beyond this multiple of the patrol radius trigger a return; None disables
    pub leash_factor: Option<f32>,
    /// Seconds between stray checks
    pub leash_check_interval: f32,
}

impl Default for HunterConfig {
    fn default() -> Self {
        Self {
            base_speed: 3.0,
            max_speed: 10.0,
            speed_growth_enabled: true,
            speed_growth_rate: 0.05,
            growth_start_delay: 30.0,
            detection_range: 8.0,
            attack_range: 1.0,
            lose_sight_factor: 1.5,
            wander_radius: 5.0,
            wander_interval: 3.0,
            wander_jitter: 0.5,
            wander_reach_threshold: 0.1,
            same_faction_wander_scale: 0.5,
            enemy_zone_multiplier: 0.5,
            neutral_zone_multiplier: 1.0,
            body_radius: 0.5,
            knockback_threshold: 2.0,
            impulse_decay: 0.5,
            knockback_damping: 5.0,
            return_speed: 3.0,
            return_fraction: 0.8,
            return_arrive_distance: 0.1,
            return_settle_speed: 0.5,
            leash_factor: None,
            leash_check_interval: 1.0,
        }
    }
}

impl HunterConfig {
    /// Validates the hunter settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("hunter.base_speed", self.base_speed)?;
        positive("hunter.max_speed", self.max_speed)?;
        if self.max_speed < self.base_speed {
            return Err(ConfigError::invalid(
                "hunter.max_speed",
                format!(
                    "{} is below base_speed {}",
                    self.max_speed, self.base_speed
                ),
            ));
        }
        non_negative("hunter.speed_growth_rate", self.speed_growth_rate)?;
        non_negative("hunter.growth_start_delay", self.growth_start_delay)?;
        positive("hunter.detection_range", self.detection_range)?;
        positive("hunter.attack_range", self.attack_range)?;
        if self.lose_sight_factor < 1.0 || !self.lose_sight_factor.is_finite() {
            return Err(ConfigError::invalid(
                "hunter.lose_sight_factor",
                "must be at least 1.0 so a chase is not dropped inside the detection range",
            ));
        }
        positive("hunter.wander_radius", self.wander_radius)?;
        positive("hunter.wander_interval", self.wander_interval)?;
        non_negative("hunter.wander_jitter", self.wander_jitter)?;
        if self.wander_jitter >= self.wander_interval {
            return Err(ConfigError::invalid(
                "hunter.wander_jitter",
                "must be smaller than wander_interval",
            ));
        }
        positive("hunter.wander_reach_threshold", self.wander_reach_threshold)?;
        fraction("hunter.same_faction_wander_scale", self.same_faction_wander_scale)?;
        positive("hunter.enemy_zone_multiplier", self.enemy_zone_multiplier)?;
        positive("hunter.neutral_zone_multiplier", self.neutral_zone_multiplier)?;
        positive("hunter.body_radius", self.body_radius)?;
        positive("hunter.knockback_threshold", self.knockback_threshold)?;
        positive("hunter.impulse_decay", self.impulse_decay)?;
        positive("hunter.knockback_damping", self.knockback_damping)?;
        positive("hunter.return_speed", self.return_speed)?;
        fraction("hunter.return_fraction", self.return_fraction)?;
        positive("hunter.return_arrive_distance", self.return_arrive_distance)?;
        positive("hunter.return_settle_speed", self.return_settle_speed)?;
        if let Some(factor) = self.leash_factor {
            positive("hunter.leash_factor", factor)?;
        }
        positive("hunter.leash_check_interval", self.leash_check_interval)
    }
}

/// Threat indicator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Indicator scale for hunters at or beyond `max_distance`
    pub min_scale: f32,
    /// Indicator scale for hunters right next to the player
    pub max_scale: f32,
    /// Distance over which the scale shrinks
    pub max_distance: f32,
    /// Inside this distance the indicator fades toward 30% opacity
    pub fade_distance: f32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 1.5,
            max_distance: 50.0,
            fade_distance: 10.0,
        }
    }
}

impl IndicatorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("indicator.min_scale", self.min_scale)?;
        positive("indicator.max_scale", self.max_scale)?;
        positive("indicator.max_distance", self.max_distance)?;
        positive("indicator.fade_distance", self.fade_distance)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error writing TOML
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// A value is out of its legal range
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must not be negative, got {}", value),
        ))
    }
}

fn fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be in (0, 1], got {}", value),
        ))
    }
}

pub(crate) fn validate_bounds(min: Vec2, max: Vec2) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::invalid("player.bounds", "corners must be finite"));
    }
    if min.x > max.x || min.y > max.y {
        return Err(ConfigError::invalid(
            "player.bounds",
            format!("min {} exceeds max {}", min, max),
        ));
    }
    Ok(())
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Faction Chase Configuration

[progress]
max_progress = 100.0
mask_transition_speed = 2.0

[player]
move_speed = 5.0
acceleration = 10.0
deceleration = 10.0
input_deadzone = 0.1
walk_threshold = 0.1
walk_cooldown = 0.1
catch_radius = 0.5
zone_progress_rate = 10.0
bounds_min = [-10.0, -5.0]
bounds_max = [10.0, 5.0]

[hunter]
base_speed = 3.0
max_speed = 10.0
speed_growth_enabled = true
speed_growth_rate = 0.05
growth_start_delay = 30.0
detection_range = 8.0
attack_range = 1.0
lose_sight_factor = 1.5
wander_radius = 5.0
wander_interval = 3.0
wander_jitter = 0.5
wander_reach_threshold = 0.1
same_faction_wander_scale = 0.5
enemy_zone_multiplier = 0.5
neutral_zone_multiplier = 1.0
body_radius = 0.5
knockback_threshold = 2.0
impulse_decay = 0.5
knockback_damping = 5.0
return_speed = 3.0
return_fraction = 0.8
return_arrive_distance = 0.1
return_settle_speed = 0.5
# leash_factor = 1.5
leash_check_interval = 1.0

[indicator]
min_scale = 0.5
max_scale = 1.5
max_distance = 50.0
fade_distance = 10.0
"#
    .to_string()
}
