//! Sky Shooter - a vertically scrolling canvas shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, run state)
//! - `renderer`: Drawing the world onto a 2D surface
//! - `game`: Lifecycle controller tying the loop to a host scheduler
//! - `input`: Held-key table and control bindings
//! - `platform`: Browser host and headless host
//! - `settings`: Data-driven tunables

pub mod demo;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{FrameHandle, FrameScheduler, Hud, Shooter, StartControl};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Default play area (canvas pixels)
    pub const CANVAS_WIDTH: f32 = 480.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Pixels per tick
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Distance from the canvas bottom to the player's top edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 30.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 7.0;
    /// Spawn height above the player's top edge
    pub const PROJECTILE_SPAWN_OFFSET: f32 = 10.0;
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 8.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 20.0;
    pub const ENEMY_HEIGHT: f32 = 15.0;
    pub const ENEMY_MIN_SPEED: f32 = 1.0;
    pub const ENEMY_MAX_SPEED: f32 = 2.0;
    /// Per-tick spawn probability (frame-rate coupled)
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.02;
    /// Horizontal margin kept free on both sides when spawning
    pub const ENEMY_SPAWN_INSET: f32 = 20.0;

    /// Fire debounce window in seconds
    pub const FIRE_COOLDOWN_SECS: f32 = 0.2;

    /// Palette
    pub const PLAYER_COLOR: &str = "#00B4D8";
    pub const PROJECTILE_COLOR: &str = "#FFC107";
    pub const ENEMY_COLOR: &str = "#FF6B6B";
    pub const OVERLAY_COLOR: &str = "red";
    pub const OVERLAY_FONT: &str = "30px Poppins";

    /// Terminal overlay
    pub const DESTROYED_TEXT: &str = "DESTROYED!";
    /// Vertical offset of each overlay line from the canvas centre
    pub const OVERLAY_LINE_OFFSET: f32 = 20.0;

    /// Start control
    pub const START_LABEL: &str = "Start Game";
    pub const START_BACKGROUND: &str = "#28a745";
    pub const REPLAY_LABEL: &str = "Play Again";
    pub const REPLAY_BACKGROUND: &str = "var(--color-principal)";
}
