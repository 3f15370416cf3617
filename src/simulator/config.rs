//! Simulation configuration.

use crate::constants::FRAME_MS;
use crate::runner::{Difficulty, Features};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs per difficulty
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Difficulties to simulate, each gets `num_runs` runs
    pub difficulties: Vec<Difficulty>,

    /// Rule set shared by every run
    pub features: Features,

    /// Frames before a run is cut off as timed out
    pub max_frames_per_run: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            difficulties: Difficulty::ALL.to_vec(),
            features: Features::default(),
            // Ten minutes of play
            max_frames_per_run: 10 * 60 * 1000 / FRAME_MS,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small batch for a quick balance check.
    pub fn quick() -> Self {
        Self {
            num_runs: 20,
            max_frames_per_run: 2 * 60 * 1000 / FRAME_MS,
            ..Default::default()
        }
    }
}
