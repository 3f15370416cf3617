//! Player settings and command-line overrides.

use crate::constants::SETTINGS_FILE;
use crate::runner::{Difficulty, Features};
use crate::utils::persistence::{data_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Persisted settings (`~/.hopper/settings.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last difficulty picked in the menu.
    pub difficulty: Difficulty,
    pub features: Features,
}

impl Settings {
    pub fn load() -> Self {
        match data_path(SETTINGS_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save(&self) -> io::Result<()> {
        save_json(&data_path(SETTINGS_FILE)?, self)
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the game. `skip_menu` is set when a difficulty was given.
    Play { settings: Settings, skip_menu: bool },
    Version,
    Help,
}

/// Apply command-line arguments (without the program name) on top of the
/// saved settings.
pub fn parse_args(args: &[String], saved: Settings) -> Result<Command, String> {
    let mut settings = saved;
    let mut skip_menu = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--difficulty" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| "--difficulty needs a value".to_string())?;
                settings.difficulty = Difficulty::from_key(value)
                    .ok_or_else(|| format!("Unknown difficulty: {}", value))?;
                skip_menu = true;
                i += 1;
            }
            "--classic" => settings.features = Features::classic(),
            "--no-double-jump" => settings.features.double_jump = false,
            "--no-lives" => settings.features.lives = false,
            "--no-scroll" => settings.features.camera_scroll = false,
            "--no-carrots" => settings.features.collectibles = false,
            "--no-steering" => settings.features.steering = false,
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(Command::Play {
        settings,
        skip_menu,
    })
}

pub fn help_text() -> String {
    [
        "Hopper - Terminal Endless Runner",
        "",
        "Usage: hopper [options]",
        "",
        "Options:",
        "  -d, --difficulty <easy|normal|hard>  Skip the menu and start a run",
        "  --classic          Single screen, single jump, one hit ends the run",
        "  --no-double-jump   Limit to one jump",
        "  --no-lives         First collision ends the run",
        "  --no-scroll        Keep the camera fixed",
        "  --no-carrots       Disable life pickups",
        "  --no-steering      Ignore left/right",
        "  -v, --version      Show version information",
        "  -h, --help         Show this help message",
        "",
        "Controls: Space/Up jump (hold for height), Left/Right or A/D move,",
        "          P pause, Esc forfeit, R restart, Enter menu",
    ]
    .join("\n")
}
