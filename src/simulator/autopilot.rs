//! Scripted player for headless runs.
//!
//! Jumps when the next obstacle is a fixed number of frames away and spends
//! the second jump when still falling towards one.

use crate::constants::TREADMILL_FACTOR;
use crate::runner::{RunPhase, RunnerGame, RunnerInput};

/// Frames of warning before an obstacle at which to take off.
const LEAD_FRAMES: f64 = 12.0;

/// Horizontal reach, in frames of closing speed, checked before a mid-air
/// jump.
const FALLING_LOOKAHEAD_FRAMES: f64 = 10.0;

/// Closing speed between the player and obstacles, per frame.
fn closing_speed(game: &RunnerGame) -> f64 {
    let drift = if game.features.camera_scroll {
        game.player.speed * TREADMILL_FACTOR
    } else {
        0.0
    };
    game.obstacle_speed + drift
}

/// Distance from the player's front edge to the nearest obstacle still
/// ahead of or under them.
fn nearest_gap(game: &RunnerGame) -> Option<f64> {
    let player_right = game.player.x + game.player.width;
    game.obstacles
        .iter()
        .filter(|o| o.right() > game.player.x)
        .map(|o| o.x - player_right)
        .min_by(|a, b| a.total_cmp(b))
}

/// Input to feed the game before the next frame, if any.
pub fn decide(game: &RunnerGame) -> Option<RunnerInput> {
    match game.phase {
        RunPhase::Ready => return Some(RunnerInput::JumpPressed),
        RunPhase::Running => {}
        _ => return None,
    }

    let gap = nearest_gap(game)?;
    let closing = closing_speed(game);
    let player = &game.player;

    if player.is_on_ground() {
        if gap <= closing * LEAD_FRAMES {
            return Some(RunnerInput::JumpPressed);
        }
        return None;
    }

    let falling = player.velocity > 0.0;
    let jumps_left = player.jumps_used < player.max_jumps;
    if falling && jumps_left && gap <= closing * FALLING_LOOKAHEAD_FRAMES {
        return Some(RunnerInput::JumpPressed);
    }
    None
}
