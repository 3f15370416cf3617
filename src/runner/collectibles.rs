//! Carrot pickups: timed spawning, pickup and despawn.

use super::collision::overlaps_padded;
use super::types::{Carrot, RunnerGame};
use crate::constants::*;
use rand::Rng;

/// True once a full spawn interval of run clock has passed.
pub fn spawn_due(game: &RunnerGame) -> bool {
    game.clock_ms.saturating_sub(game.last_carrot_at_ms) >= CARROT_SPAWN_INTERVAL_MS
}

/// Place a carrot just beyond the right edge of the view, floating in the
/// jump band above the ground.
pub fn spawn_carrot<R: Rng>(game: &mut RunnerGame, rng: &mut R) {
    let lift = rng.gen_range(CARROT_MIN_LIFT..=CARROT_MAX_LIFT);
    game.carrots.push(Carrot {
        x: game.camera.x + VIEWPORT_WIDTH + CARROT_SPAWN_AHEAD,
        y: GROUND_Y - lift - CARROT_SIZE,
        size: CARROT_SIZE,
        speed: game.obstacle_speed * CARROT_SPEED_FACTOR,
        collected: false,
    });
    game.last_carrot_at_ms = game.clock_ms;
}

/// Collectible stage of the frame update. Returns the number of lives gained.
///
/// A carrot touched at full health is left in place so it can still be
/// picked up after the next hit.
pub fn update<R: Rng>(game: &mut RunnerGame, rng: &mut R) -> u32 {
    if !game.features.collectibles {
        return 0;
    }

    if spawn_due(game) {
        spawn_carrot(game, rng);
    }

    let player_box = game.player.bounds();
    let mut gained = 0;
    for carrot in &mut game.carrots {
        carrot.x -= carrot.speed;
        if overlaps_padded(&player_box, &carrot.bounds(), COLLISION_PADDING)
            && game.player.gain_life()
        {
            carrot.collected = true;
            gained += 1;
        }
    }

    let camera_x = game.camera.x;
    game.carrots.retain(|c| !c.collected && c.right() >= camera_x);
    gained
}
