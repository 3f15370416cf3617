//! Runner game logic: input latching, the fixed-step frame update and the
//! level/countdown state machine.

use super::collision::overlaps_padded;
use super::physics::HitOutcome;
use super::types::{RunPhase, RunnerGame};
use super::{collectibles, obstacles};
use crate::constants::*;
use rand::Rng;

/// UI-agnostic input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerInput {
    JumpPressed,
    JumpReleased,
    LeftPressed,
    LeftReleased,
    RightPressed,
    RightReleased,
    Pause,
    Forfeit, // Esc (press twice to confirm)
    Other,   // Any other key (cancels forfeit_pending)
}

/// What happened during one call to [`tick_run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Fixed frames stepped.
    pub frames: u32,
    pub obstacles_passed: u32,
    pub leveled_up: bool,
    pub new_level: u32,
    pub lives_lost: u32,
    pub lives_gained: u32,
    pub game_over: bool,
    pub countdown_finished: bool,
    /// The game-over delay elapsed; the summary may be shown and the final
    /// score recorded. Fires once per run.
    pub summary_ready: bool,
}

impl TickEvents {
    pub fn changed(&self) -> bool {
        self.frames > 0
    }
}

/// Latch an input event for the next frame.
pub fn process_input(game: &mut RunnerGame, input: RunnerInput) {
    if game.phase == RunPhase::GameOver {
        return; // Restart / menu keys are handled by the caller
    }

    // Ready screen: jump starts the run, nothing else does
    if game.phase == RunPhase::Ready {
        if input == RunnerInput::JumpPressed {
            game.phase = RunPhase::Running;
            log::info!(
                "run started: difficulty={} features={:?}",
                game.difficulty.key(),
                game.features
            );
        }
        return;
    }

    match input {
        RunnerInput::JumpPressed => {
            if game.forfeit_pending {
                game.forfeit_pending = false; // Cancel forfeit
            } else if !game.paused {
                game.controls.jump_queued = true;
            }
        }
        RunnerInput::JumpReleased => {
            game.controls.jump_release_queued = true;
        }
        RunnerInput::LeftPressed => {
            game.forfeit_pending = false;
            game.controls.left_held = true;
        }
        RunnerInput::LeftReleased => {
            game.controls.left_held = false;
        }
        RunnerInput::RightPressed => {
            game.forfeit_pending = false;
            game.controls.right_held = true;
        }
        RunnerInput::RightReleased => {
            game.controls.right_held = false;
        }
        RunnerInput::Pause => {
            if game.forfeit_pending {
                game.forfeit_pending = false;
            } else {
                game.paused = !game.paused;
            }
        }
        RunnerInput::Forfeit => {
            if game.forfeit_pending {
                game.forfeit_pending = false;
                if end_run(game) {
                    log::info!("run forfeited at score {}", game.score);
                }
            } else {
                game.forfeit_pending = true;
            }
        }
        RunnerInput::Other => {
            game.forfeit_pending = false;
        }
    }
}

/// Advance the run by `dt_ms` of wall-clock time.
///
/// Steps the frame update in fixed 16ms increments; leftover time carries to
/// the next call. Nothing advances while waiting to start, paused, or
/// confirming a forfeit.
pub fn tick_run<R: Rng>(game: &mut RunnerGame, dt_ms: u64, rng: &mut R) -> TickEvents {
    let mut events = TickEvents::default();

    if game.summary_shown
        || game.phase == RunPhase::Ready
        || game.paused
        || game.forfeit_pending
    {
        return events;
    }

    // Clamp dt to prevent physics explosion after a stall
    let dt_ms = dt_ms.min(MAX_FRAME_DT_MS);
    game.accumulated_ms += dt_ms;

    while game.accumulated_ms >= FRAME_MS {
        game.accumulated_ms -= FRAME_MS;
        step_frame(game, rng, &mut events);

        if game.summary_shown {
            break;
        }
    }

    events
}

/// Single fixed frame.
fn step_frame<R: Rng>(game: &mut RunnerGame, rng: &mut R, events: &mut TickEvents) {
    game.frame_count += 1;
    game.clock_ms += FRAME_MS;
    events.frames += 1;

    match game.phase {
        RunPhase::Ready => {}
        RunPhase::Running => update_running(game, rng, events),
        RunPhase::LevelTransition => update_countdown(game, events),
        RunPhase::GameOver => update_game_over(game, events),
    }
}

fn update_running<R: Rng>(game: &mut RunnerGame, rng: &mut R, events: &mut TickEvents) {
    game.player.update_invulnerability(game.clock_ms);

    // 1. Camera follow
    if game.features.camera_scroll {
        game.camera.follow(game.player.x, VIEWPORT_WIDTH);
    }

    // 2. Player: consume latched edges, move, integrate
    if game.controls.jump_queued {
        game.controls.jump_queued = false;
        game.player.request_jump();
    }
    if game.controls.jump_release_queued {
        game.controls.jump_release_queued = false;
        game.player.release_jump();
    }
    game.player.steer(&game.controls, &game.camera, &game.features);
    game.player.integrate();
    game.player.animate(game.frame_count);

    // 3. Carrots
    events.lives_gained += collectibles::update(game, rng);

    // 4. Obstacles
    obstacles::advance(&mut game.obstacles);
    if check_obstacle_hits(game, events) {
        return;
    }
    let passed = obstacles::score_passed(&mut game.obstacles, game.player.x);
    game.score += passed;
    events.obstacles_passed += passed;
    obstacles::prune(&mut game.obstacles, game.camera.x);

    // 5. Spawn
    if obstacles::needs_spawn(game) {
        obstacles::spawn_batch(game, rng);
    }

    // 6. Level bookkeeping
    if game.score >= game.level_target() {
        begin_level_transition(game, events);
    }
}

/// Resolve obstacle contact. Returns true if the run ended.
fn check_obstacle_hits(game: &mut RunnerGame, events: &mut TickEvents) -> bool {
    let player_box = game.player.bounds();
    let hit = game
        .obstacles
        .iter()
        .any(|o| overlaps_padded(&player_box, &o.bounds(), COLLISION_PADDING));
    if !hit {
        return false;
    }

    match game.player.take_hit(game.clock_ms) {
        HitOutcome::Ignored => false,
        HitOutcome::Damaged => {
            events.lives_lost += 1;
            log::info!("hit: {} lives left", game.player.lives);
            false
        }
        HitOutcome::Fatal => {
            events.lives_lost += 1;
            if end_run(game) {
                events.game_over = true;
                log::info!("game over: score={} level={}", game.score, game.level);
            }
            true
        }
    }
}

/// Enter GAME_OVER. Idempotent; returns true only on the first call.
fn end_run(game: &mut RunnerGame) -> bool {
    if game.phase == RunPhase::GameOver {
        return false;
    }
    game.phase = RunPhase::GameOver;
    if game.player.died_at_ms.is_none() {
        game.player.died_at_ms = Some(game.clock_ms);
    }
    game.controls = Default::default();
    true
}

fn begin_level_transition(game: &mut RunnerGame, events: &mut TickEvents) {
    let increment = game.difficulty.speed_increment();
    game.level += 1;
    game.countdown = LEVEL_COUNTDOWN_SECONDS;
    game.countdown_step_at_ms = game.clock_ms + COUNTDOWN_STEP_MS;
    obstacles::boost(&mut game.obstacles, increment);
    game.obstacle_speed += increment;
    game.phase = RunPhase::LevelTransition;

    events.leveled_up = true;
    events.new_level = game.level;
    log::info!(
        "level up: {} (obstacle speed {:.2})",
        game.level,
        game.obstacle_speed
    );
}

fn update_countdown(game: &mut RunnerGame, events: &mut TickEvents) {
    if game.clock_ms < game.countdown_step_at_ms {
        return;
    }
    game.countdown = game.countdown.saturating_sub(1);
    game.countdown_step_at_ms += COUNTDOWN_STEP_MS;

    if game.countdown == 0 {
        game.phase = RunPhase::Running;
        // Presses made during the countdown do not carry over
        game.controls.jump_queued = false;
        game.controls.jump_release_queued = false;
        events.countdown_finished = true;
    }
}

fn update_game_over(game: &mut RunnerGame, events: &mut TickEvents) {
    if game.summary_shown {
        return;
    }
    let died_at = game.player.died_at_ms.unwrap_or(game.clock_ms);
    if game.clock_ms.saturating_sub(died_at) >= GAME_OVER_DELAY_MS {
        game.summary_shown = true;
        events.summary_ready = true;
    }
}
