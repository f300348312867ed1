//! World state and core simulation types
//!
//! Everything the update and render steps touch lives in [`World`]; nothing
//! is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::settings::Settings;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Reset and waiting for start
    #[default]
    Idle,
    /// Simulation advancing every frame
    Running,
    /// Run ended, overlay shown
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// An enemy reached the bottom of the play area
    FloorBreach { enemy_id: u32 },
    /// An enemy touched the player's ship
    PlayerHit { enemy_id: u32 },
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// x is the horizontal centre, y the top edge
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Seconds until fire is accepted again
    pub fire_cooldown: f32,
}

impl Player {
    /// Default ship, centred horizontally near the bottom of the canvas
    pub fn new(settings: &Settings) -> Self {
        let tuning = &settings.player;
        Self {
            pos: Vec2::new(
                settings.canvas_width / 2.0,
                settings.canvas_height - tuning.bottom_offset,
            ),
            size: Vec2::new(tuning.width, tuning.height),
            speed: tuning.speed,
            fire_cooldown: 0.0,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Bounding box
    pub fn bounds(&self) -> Rect {
        Rect::centered_top(self.pos, self.size)
    }

    /// Whether the fire control is accepted this tick
    #[inline]
    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }
}

/// A player projectile (collides as a point)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels travelled upward per tick
    pub speed: f32,
}

/// A descending enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// x is the horizontal centre, y the top edge
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels travelled downward per tick, sampled at spawn
    pub speed: f32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::centered_top(self.pos, self.size)
    }

    /// y of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Serializable summary of a world, for logs and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub run_state: RunState,
    pub score: u32,
    pub ticks: u64,
    pub player_x: f32,
    pub projectiles: usize,
    pub enemies: usize,
    pub game_over_cause: Option<GameOverCause>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub run_state: RunState,
    /// Ticks simulated since the last reset
    pub ticks: u64,
    pub game_over_cause: Option<GameOverCause>,
    rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create an idle world with the given settings and RNG seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            player: Player::new(&settings),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            run_state: RunState::Idle,
            ticks: 0,
            game_over_cause: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            settings,
        }
    }

    /// Back to a fresh idle world. The RNG stream carries on.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.settings);
        self.projectiles.clear();
        self.enemies.clear();
        self.score = 0;
        self.run_state = RunState::Idle;
        self.ticks = 0;
        self.game_over_cause = None;
        self.next_id = 1;
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.settings.canvas_width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.settings.canvas_height
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fire one projectile from the ship's nose
    pub fn spawn_projectile(&mut self) -> u32 {
        let id = self.next_entity_id();
        let pos = Vec2::new(
            self.player.pos.x,
            self.player.pos.y - self.settings.projectile.spawn_offset,
        );
        self.projectiles.push(Projectile {
            id,
            pos,
            speed: self.settings.projectile.speed,
        });
        id
    }

    /// Spawn one enemy at the top edge with a random column and speed
    pub fn spawn_enemy(&mut self) -> u32 {
        let tuning = &self.settings.enemy;
        let inset = tuning.spawn_inset;
        let x = self.rng.random_range(inset..self.settings.canvas_width - inset);
        let speed = if tuning.max_speed > tuning.min_speed {
            self.rng.random_range(tuning.min_speed..tuning.max_speed)
        } else {
            tuning.min_speed
        };
        let size = Vec2::new(tuning.width, tuning.height);

        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, 0.0),
            size,
            speed,
        });
        id
    }

    /// Roll the per-tick spawn chance
    pub(crate) fn roll_spawn(&mut self) -> bool {
        let chance = self.settings.enemy.spawn_chance;
        chance > 0.0 && self.rng.random_bool(chance)
    }

    /// Enter the running state. Returns false if already running.
    pub fn begin_run(&mut self) -> bool {
        if self.run_state == RunState::Running {
            return false;
        }
        self.run_state = RunState::Running;
        true
    }

    /// End the run. Returns false if it was not running.
    pub(crate) fn end_run(&mut self, cause: GameOverCause) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        self.run_state = RunState::GameOver;
        self.game_over_cause = Some(cause);
        true
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            run_state: self.run_state,
            score: self.score,
            ticks: self.ticks,
            player_x: self.player.pos.x,
            projectiles: self.projectiles.len(),
            enemies: self.enemies.len(),
            game_over_cause: self.game_over_cause,
        }
    }
}
