//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only, owned by the world
//! - Elapsed time passed in explicitly
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Hit, Rect, find_hits, first_overlap};
pub use state::{Enemy, GameOverCause, Player, Projectile, RunState, World, WorldSnapshot};
pub use tick::{GameEvent, TickInput, tick};
