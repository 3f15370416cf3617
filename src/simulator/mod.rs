//! Headless balance simulator.
//!
//! Plays thousands of runs with a scripted player to compare difficulty
//! tiers: how far each gets, how long it survives and how often it levels.
//! Runs go through the same update loop as the terminal game.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::decide;
pub use config::SimConfig;
pub use report::{DifficultySummary, RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
