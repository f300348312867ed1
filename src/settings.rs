//! Game tunables
//!
//! Loaded from JSON (canvas `data-settings` attribute on the web, a file on
//! native). Every section falls back to the built-in defaults field by field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::input::Controls;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Player ship tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Pixels moved per tick while a direction is held
    pub speed: f32,
    /// Distance from the canvas bottom to the ship's top edge
    pub bottom_offset: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            bottom_offset: PLAYER_BOTTOM_OFFSET,
        }
    }
}

/// Projectile tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Pixels travelled upward per tick
    pub speed: f32,
    pub spawn_offset: f32,
    /// Drawn size; collisions treat the projectile as a point
    pub width: f32,
    pub height: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            spawn_offset: PROJECTILE_SPAWN_OFFSET,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
        }
    }
}

/// Enemy tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    /// Per-enemy speed is sampled uniformly from `[min_speed, max_speed)`
    pub min_speed: f32,
    pub max_speed: f32,
    /// Probability of a spawn on any given tick
    pub spawn_chance: f64,
    pub spawn_inset: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            min_speed: ENEMY_MIN_SPEED,
            max_speed: ENEMY_MAX_SPEED,
            spawn_chance: ENEMY_SPAWN_CHANCE,
            spawn_inset: ENEMY_SPAWN_INSET,
        }
    }
}

/// All game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub enemy: EnemyTuning,
    pub fire_cooldown_secs: f32,
    /// RNG seed; the host clock is used when absent
    pub seed: Option<u64>,
    pub controls: Controls,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            player: PlayerTuning::default(),
            projectile: ProjectileTuning::default(),
            enemy: EnemyTuning::default(),
            fire_cooldown_secs: FIRE_COOLDOWN_SECS,
            seed: None,
            controls: Controls::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like `from_json`, but falls back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Override the play area with the host surface's real size
    pub fn with_canvas_size(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Check every tunable for values the simulation cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("player.speed", self.player.speed),
            ("projectile.speed", self.projectile.speed),
            ("enemy.width", self.enemy.width),
            ("enemy.height", self.enemy.height),
            ("enemy.min_speed", self.enemy.min_speed),
            ("enemy.max_speed", self.enemy.max_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if self.enemy.min_speed > self.enemy.max_speed {
            return Err(invalid(
                "enemy.min_speed",
                format!(
                    "{} exceeds max_speed {}",
                    self.enemy.min_speed, self.enemy.max_speed
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.enemy.spawn_chance) {
            return Err(invalid(
                "enemy.spawn_chance",
                format!("must be within [0, 1], got {}", self.enemy.spawn_chance),
            ));
        }
        if self.player.width > self.canvas_width {
            return Err(invalid("player.width", "wider than the canvas"));
        }
        if self.player.height > self.canvas_height {
            return Err(invalid("player.height", "taller than the canvas"));
        }
        if self.enemy.width > self.canvas_width {
            return Err(invalid("enemy.width", "wider than the canvas"));
        }
        // An enemy at least this tall breaches the floor on its first tick
        if self.enemy.height >= self.canvas_height {
            return Err(invalid("enemy.height", "not shorter than the canvas"));
        }
        // Spawn x is the enemy centre, so its whole box must fit inside the inset
        if self.enemy.spawn_inset < self.enemy.width / 2.0 {
            return Err(invalid(
                "enemy.spawn_inset",
                format!(
                    "must be at least half the enemy width ({})",
                    self.enemy.width / 2.0
                ),
            ));
        }
        if 2.0 * self.enemy.spawn_inset >= self.canvas_width {
            return Err(invalid(
                "enemy.spawn_inset",
                "leaves no room to spawn enemies",
            ));
        }
        if self.player.bottom_offset < 0.0 || self.player.bottom_offset > self.canvas_height {
            return Err(invalid("player.bottom_offset", "places the ship off the canvas"));
        }
        if !(self.fire_cooldown_secs >= 0.0) {
            return Err(invalid("fire_cooldown_secs", "must not be negative"));
        }
        Ok(())
    }

    /// Load settings from the canvas `data-settings` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        let settings = match canvas.get_attribute("data-settings") {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("No data-settings attribute, using defaults");
                Self::default()
            }
        };
        settings.with_canvas_size(canvas.width() as f32, canvas.height() as f32)
    }

    /// Load settings from a JSON file, defaults when no path is given
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(e) => {
                log::warn!("Cannot read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "enemy": { "spawn_chance": 0.5 }, "seed": 7 }"#).unwrap();
        assert_eq!(settings.enemy.spawn_chance, 0.5);
        assert_eq!(settings.enemy.width, ENEMY_WIDTH);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.player, PlayerTuning::default());
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = Settings::from_json(r#"{ "enemy": { "min_speed": 3.0, "max_speed": 2.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "enemy.min_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_spawn_chance_out_of_range() {
        let err = Settings::from_json(r#"{ "enemy": { "spawn_chance": 1.5 } }"#).unwrap_err();
        assert!(err.to_string().contains("enemy.spawn_chance"));
    }

    #[test]
    fn test_rejects_zero_canvas() {
        let settings = Settings::default().with_canvas_size(0.0, 600.0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_fallback_to_default() {
        let settings = Settings::from_json_or_default(r#"{ "player": { "speed": -1 } }"#);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_rejects_inset_narrower_than_half_enemy() {
        let err = Settings::from_json(r#"{ "enemy": { "spawn_inset": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "enemy.spawn_inset",
                ..
            }
        ));
        assert!(Settings::from_json(r#"{ "enemy": { "spawn_inset": 9.5 } }"#).is_err());
        assert!(Settings::from_json(r#"{ "enemy": { "spawn_inset": 10.0 } }"#).is_ok());
    }

    #[test]
    fn test_rejects_sprites_larger_than_canvas() {
        let err = Settings::from_json(r#"{ "enemy": { "height": 600.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("enemy.height"));

        let err = Settings::from_json(r#"{ "player": { "height": 700.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("player.height"));

        let err = Settings::from_json(
            r#"{ "canvas_width": 100.0, "enemy": { "width": 120.0, "spawn_inset": 60.0 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("enemy.width"));
    }
}
