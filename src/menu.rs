//! Difficulty selection menu state.

use crate::runner::{Difficulty, Features};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyMenu {
    pub selected: usize,
    pub features: Features,
}

impl DifficultyMenu {
    pub fn new(initial: Difficulty, features: Features) -> Self {
        Self {
            selected: initial.index(),
            features,
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        if self.selected + 1 < Difficulty::ALL.len() {
            self.selected += 1;
        }
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        Difficulty::from_index(self.selected)
    }
}

/// One-line description of a difficulty for the menu.
pub fn describe(difficulty: Difficulty) -> String {
    let jumps = match difficulty.max_jumps() {
        1 => "single jump".to_string(),
        n => format!("{} jumps", n),
    };
    format!(
        "speed {}, {}, level every {}",
        difficulty.obstacle_speed(),
        jumps,
        difficulty.level_threshold()
    )
}
