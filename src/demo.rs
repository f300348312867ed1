//! Demo autopilot
//!
//! Plays the game from the world state alone: chase the enemy closest to the
//! floor and keep the trigger held while lined up under it.

use crate::sim::{TickInput, World};

/// Simple targeting AI used by the headless demo run
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Controls for the next tick
    pub fn decide(&self, world: &World) -> TickInput {
        // Most dangerous enemy: the one nearest the floor
        let Some(target) = world.enemies.iter().max_by(|a, b| {
            a.bottom()
                .partial_cmp(&b.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        }) else {
            return TickInput::default();
        };

        let player = &world.player;
        let offset = target.pos.x - player.pos.x;
        // Within one step counts as lined up, otherwise we jitter around it
        let aligned = offset.abs() <= player.speed;
        let in_reach = offset.abs() < target.size.x / 2.0;

        TickInput {
            left: !aligned && offset < 0.0,
            right: !aligned && offset > 0.0,
            fire: in_reach,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Enemy;
    use glam::Vec2;

    fn world_with_enemies(enemies: &[(f32, f32)]) -> World {
        let mut world = World::new(Settings::default(), 1);
        for &(x, y) in enemies {
            let id = world.next_entity_id();
            world.enemies.push(Enemy {
                id,
                pos: Vec2::new(x, y),
                size: Vec2::new(20.0, 15.0),
                speed: 1.0,
            });
        }
        world
    }

    #[test]
    fn test_no_enemies_holds_nothing() {
        let world = world_with_enemies(&[]);
        assert_eq!(Autopilot::new().decide(&world), TickInput::default());
    }

    #[test]
    fn test_steers_toward_lowest_enemy() {
        // Lower enemy is on the left even though the other is closer
        let world = world_with_enemies(&[(260.0, 50.0), (40.0, 400.0)]);
        let input = Autopilot::new().decide(&world);
        assert!(input.left);
        assert!(!input.right);
        assert!(!input.fire);
    }

    #[test]
    fn test_fires_when_lined_up() {
        let world = world_with_enemies(&[(242.0, 100.0)]);
        let input = Autopilot::new().decide(&world);
        assert!(input.fire);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_fires_while_closing_in() {
        let world = world_with_enemies(&[(248.0, 100.0)]);
        let input = Autopilot::new().decide(&world);
        assert!(input.right);
        assert!(input.fire);
    }
}
