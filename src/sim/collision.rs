//! Axis-aligned collision tests
//!
//! All comparisons are strict: touching edges do not count as contact.

use glam::Vec2;

use super::state::{Enemy, Projectile};

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rectangle whose top edge is centred on `anchor`
    pub fn centered_top(anchor: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(anchor.x - size.x / 2.0, anchor.y),
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Point strictly inside the rectangle
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }

    /// Interiors overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        a_max.x > other.min.x && self.min.x < b_max.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// A confirmed projectile-enemy contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile_id: u32,
    pub enemy_id: u32,
}

/// Pair projectiles with the enemies they strike this tick
///
/// Every match is found before anything is removed. Each projectile hits at
/// most one enemy (the first in collection order that it overlaps and that
/// is still unclaimed) and each enemy absorbs at most one projectile, so a
/// single enemy never scores twice.
pub fn find_hits(projectiles: &[Projectile], enemies: &[Enemy]) -> Vec<Hit> {
    let mut hits = Vec::new();
    let mut claimed = vec![false; enemies.len()];

    for projectile in projectiles {
        let target = enemies
            .iter()
            .enumerate()
            .find(|(i, enemy)| !claimed[*i] && enemy.bounds().contains_point(projectile.pos));
        if let Some((i, enemy)) = target {
            claimed[i] = true;
            hits.push(Hit {
                projectile_id: projectile.id,
                enemy_id: enemy.id,
            });
        }
    }

    hits
}

/// First enemy overlapping the given box, if any
pub fn first_overlap<'a>(bounds: &Rect, enemies: &'a [Enemy]) -> Option<&'a Enemy> {
    enemies.iter().find(|e| e.bounds().overlaps(bounds))
}
