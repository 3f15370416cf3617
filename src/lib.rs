//! Hopper - Terminal Endless Runner Library
//!
//! This module exposes the game logic for testing and the simulator.

pub mod config;
pub mod constants;
pub mod input;
pub mod logging;
pub mod menu;
pub mod runner;
pub mod scores;
pub mod simulator;
pub mod ui;
pub mod utils;
