//! Headless run loop driven by the autopilot.
//!
//! Uses the same `process_input` / `tick_run` pair as the terminal game, one
//! fixed frame per tick, with statistics taken from `TickEvents`.

use super::autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::constants::FRAME_MS;
use crate::runner::{process_input, tick_run, Difficulty, RunPhase, RunnerGame};
use crate::scores::{record_final_score, MemoryScoreStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize * config.difficulties.len());

    for (diff_idx, &difficulty) in config.difficulties.iter().enumerate() {
        let mut best = MemoryScoreStore::default();

        for run_idx in 0..config.num_runs {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(
                    seed + (diff_idx as u64) * config.num_runs as u64 + run_idx as u64,
                ),
                None => StdRng::from_entropy(),
            };

            let stats = simulate_single_run(config, difficulty, &mut rng);
            if let Err(e) = record_final_score(&mut best, stats.score) {
                log::debug!("simulated best score not recorded: {}", e);
            }

            if config.verbosity >= 2 {
                println!(
                    "{} run {}/{} - score {}, level {}, frames {}, lives lost {}{}",
                    difficulty.name(),
                    run_idx + 1,
                    config.num_runs,
                    stats.score,
                    stats.level,
                    stats.frames,
                    stats.lives_lost,
                    if stats.timed_out { " (timed out)" } else { "" }
                );
            }
            all_runs.push(stats);
        }

        if config.verbosity >= 1 {
            println!("{}: best score {}", difficulty.name(), best.best);
        }
    }

    SimReport::from_runs(&config.difficulties, all_runs)
}

/// Play one run to game over or the frame limit.
pub fn simulate_single_run<R: Rng>(
    config: &SimConfig,
    difficulty: Difficulty,
    rng: &mut R,
) -> RunStats {
    let mut game = RunnerGame::new(difficulty, config.features);
    let mut stats = RunStats::new(difficulty);

    while game.phase != RunPhase::GameOver && game.frame_count < config.max_frames_per_run {
        if let Some(input) = autopilot::decide(&game) {
            process_input(&mut game, input);
        }
        let events = tick_run(&mut game, FRAME_MS, rng);
        stats.lives_lost += events.lives_lost;
        stats.lives_gained += events.lives_gained;
        if events.leveled_up {
            stats.level_up_frames.push(game.frame_count);
        }
    }

    stats.score = game.score;
    stats.level = game.level;
    stats.frames = game.frame_count;
    stats.timed_out = game.phase != RunPhase::GameOver;
    stats
}
