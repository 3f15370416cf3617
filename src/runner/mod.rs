//! Endless runner: entity model, frame update loop and input handling.

/// Generate the `ALL`, `from_index()`, `name()` and `key()` methods for the
/// three-tier difficulty enum (Easy / Normal / Hard).
macro_rules! difficulty_enum_impl {
    ($name:ident) => {
        impl $name {
            pub const ALL: [$name; 3] = [$name::Easy, $name::Normal, $name::Hard];

            pub fn from_index(index: usize) -> Self {
                Self::ALL.get(index).copied().unwrap_or($name::Normal)
            }

            pub fn index(&self) -> usize {
                Self::ALL.iter().position(|d| d == self).unwrap_or(1)
            }

            pub fn name(&self) -> &'static str {
                match self {
                    Self::Easy => "Easy",
                    Self::Normal => "Normal",
                    Self::Hard => "Hard",
                }
            }

            /// Lowercase form used in settings files and CLI flags.
            pub fn key(&self) -> &'static str {
                match self {
                    Self::Easy => "easy",
                    Self::Normal => "normal",
                    Self::Hard => "hard",
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|d| d.key().eq_ignore_ascii_case(key.trim()))
            }
        }
    };
}

pub mod collectibles;
pub mod collision;
pub mod logic;
pub mod obstacles;
pub mod physics;
pub mod types;

pub use collision::{overlaps_padded, Rect};
pub use logic::{process_input, tick_run, RunnerInput, TickEvents};
pub use types::{
    Camera, Carrot, Controls, Difficulty, Facing, Features, Obstacle, Player, RunPhase,
    RunnerGame,
};
