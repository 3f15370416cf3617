//! Terminal rendering.

pub mod game_common;
pub mod menu_scene;
pub mod runner_scene;
pub mod sprites;
pub mod surface;
