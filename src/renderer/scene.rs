//! Scene drawing: world state in, surface calls out

use super::Surface;
use crate::consts::*;
use crate::sim::{Rect, World};

fn fill(surface: &mut impl Surface, rect: Rect, color: &str) {
    surface.fill_rect(rect.min.x, rect.min.y, rect.size.x, rect.size.y, color);
}

/// Draw one complete frame: player, projectiles, enemies
pub fn render_frame(world: &World, surface: &mut impl Surface) {
    surface.clear(world.width(), world.height());

    fill(surface, world.player.bounds(), PLAYER_COLOR);

    let tuning = &world.settings.projectile;
    for projectile in &world.projectiles {
        surface.fill_rect(
            projectile.pos.x - tuning.width / 2.0,
            projectile.pos.y,
            tuning.width,
            tuning.height,
            PROJECTILE_COLOR,
        );
    }

    for enemy in &world.enemies {
        fill(surface, enemy.bounds(), ENEMY_COLOR);
    }
}

/// Terminal overlay drawn once over the last frame
pub fn render_game_over(world: &World, surface: &mut impl Surface) {
    let cx = world.width() / 2.0;
    let cy = world.height() / 2.0;
    surface.fill_text_centered(
        DESTROYED_TEXT,
        cx,
        cy - OVERLAY_LINE_OFFSET,
        OVERLAY_FONT,
        OVERLAY_COLOR,
    );
    surface.fill_text_centered(
        &format!("Score: {}", world.score),
        cx,
        cy + OVERLAY_LINE_OFFSET,
        OVERLAY_FONT,
        OVERLAY_COLOR,
    );
}
