//! Obstacle spawning, movement, scoring and despawn.

use super::types::{Obstacle, RunnerGame};
use crate::constants::*;
use rand::Rng;

/// True when the lookahead window ahead of the camera has run dry.
pub fn needs_spawn(game: &RunnerGame) -> bool {
    match game.furthest_obstacle_x() {
        None => true,
        Some(x) => x < game.camera.x + VIEWPORT_WIDTH + OBSTACLE_LOOKAHEAD,
    }
}

/// Build one obstacle standing on the ground at `x`.
fn random_obstacle<R: Rng>(rng: &mut R, x: f64, speed: f64) -> Obstacle {
    let height = rng.gen_range(OBSTACLE_MIN_HEIGHT..=OBSTACLE_MAX_HEIGHT);
    let width = height * rng.gen_range(OBSTACLE_MIN_RATIO..=OBSTACLE_MAX_RATIO);
    Obstacle {
        x,
        y: GROUND_Y - height,
        width,
        height,
        speed,
        passed: false,
    }
}

/// Append a batch of one or two obstacles beyond the furthest one. Returns
/// the number spawned.
pub fn spawn_batch<R: Rng>(game: &mut RunnerGame, rng: &mut R) -> usize {
    let frequency = game.difficulty.obstacle_frequency();
    let x = match game.furthest_obstacle_x() {
        Some(furthest) => {
            furthest
                + rng.gen_range(
                    (frequency - OBSTACLE_GAP_JITTER)..=(frequency + OBSTACLE_GAP_JITTER),
                )
        }
        // First batch enters just off the right edge of the view
        None => game.camera.x + VIEWPORT_WIDTH,
    };

    let first = random_obstacle(rng, x, game.obstacle_speed);
    let second_x = first.x + first.width + OBSTACLE_PAIR_SPACING;
    game.obstacles.push(first);

    if rng.gen_bool(game.difficulty.pair_chance()) {
        let second = random_obstacle(rng, second_x, game.obstacle_speed);
        game.obstacles.push(second);
        return 2;
    }
    1
}

/// Move every obstacle left by its own speed.
pub fn advance(obstacles: &mut [Obstacle]) {
    for obstacle in obstacles {
        obstacle.x -= obstacle.speed;
    }
}

/// Mark obstacles the player has cleared. Each obstacle scores once.
pub fn score_passed(obstacles: &mut [Obstacle], player_x: f64) -> u32 {
    let mut passed = 0;
    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && player_x > obstacle.right() {
            obstacle.passed = true;
            passed += 1;
        }
    }
    passed
}

/// Drop obstacles that are completely behind the camera.
pub fn prune(obstacles: &mut Vec<Obstacle>, camera_x: f64) {
    obstacles.retain(|o| o.right() >= camera_x);
}

/// Permanently speed up every live obstacle.
pub fn boost(obstacles: &mut [Obstacle], increment: f64) {
    for obstacle in obstacles {
        obstacle.speed += increment;
    }
}
