//! Endless runner data structures.
//!
//! The player runs right across an endlessly scrolling ground, jumping over
//! obstacles and picking up carrots that restore lives. All entities are plain
//! records owned by [`RunnerGame`] and mutated in place by the frame update.

use super::collision::Rect;
use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Difficulty profile, selected once before a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

difficulty_enum_impl!(Difficulty);

impl Difficulty {
    /// Starting obstacle speed (world units per frame, leftwards).
    pub fn obstacle_speed(&self) -> f64 {
        match self {
            Self::Easy => 3.0,
            Self::Normal => 4.0,
            Self::Hard => 5.0,
        }
    }

    /// Mean horizontal gap between obstacle batches. Actual gaps are drawn
    /// from `frequency ± 100`.
    pub fn obstacle_frequency(&self) -> f64 {
        match self {
            Self::Easy => 500.0,
            Self::Normal => 420.0,
            Self::Hard => 350.0,
        }
    }

    /// Horizontal player speed (world units per frame).
    pub fn player_speed(&self) -> f64 {
        match self {
            Self::Easy => 5.0,
            Self::Normal => 6.0,
            Self::Hard => 7.0,
        }
    }

    /// Jump impulse magnitude. A jump sets velocity to `-jump_height()`.
    pub fn jump_height(&self) -> f64 {
        match self {
            Self::Easy => 16.0,
            Self::Normal => 15.0,
            Self::Hard => 14.0,
        }
    }

    pub fn max_jumps(&self) -> u32 {
        match self {
            Self::Easy | Self::Normal => 2,
            Self::Hard => 1,
        }
    }

    /// Obstacle speed added to every live obstacle on level-up.
    pub fn speed_increment(&self) -> f64 {
        match self {
            Self::Easy => 0.5,
            Self::Normal => 0.75,
            Self::Hard => 1.0,
        }
    }

    /// Points per level. Level `n` ends once score reaches `n * threshold`.
    pub fn level_threshold(&self) -> u32 {
        match self {
            Self::Easy => 10,
            Self::Normal => 15,
            Self::Hard => 20,
        }
    }

    /// Probability that a spawn batch holds two obstacles instead of one.
    pub fn pair_chance(&self) -> f64 {
        match self {
            Self::Hard => 0.4,
            _ => 0.3,
        }
    }
}

/// Optional mechanics. Everything on is the full game; [`Features::classic`]
/// is the single-screen, one-hit original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub double_jump: bool,
    pub lives: bool,
    pub camera_scroll: bool,
    pub collectibles: bool,
    pub steering: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            double_jump: true,
            lives: true,
            camera_scroll: true,
            collectibles: true,
            steering: true,
        }
    }
}

impl Features {
    pub fn classic() -> Self {
        Self {
            double_jump: false,
            lives: false,
            camera_scroll: false,
            collectibles: false,
            steering: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The runner.
#[derive(Debug, Clone)]
pub struct Player {
    /// World x of the left edge.
    pub x: f64,
    /// Top edge; larger values are lower on screen.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity (negative = upward).
    pub velocity: f64,
    pub jumping: bool,
    pub jumps_used: u32,
    pub max_jumps: u32,
    pub speed: f64,
    pub gravity: f64,
    pub jump_impulse: f64,
    pub lives: u32,
    pub invulnerable: bool,
    pub invulnerable_since_ms: u64,
    pub invulnerability_ms: u64,
    pub facing: Facing,
    /// Run clock timestamp of the fatal hit.
    pub died_at_ms: Option<u64>,
    /// Run animation frame (0 or 1), alternates while grounded.
    pub anim_frame: u32,
}

impl Player {
    pub fn new(difficulty: Difficulty, features: Features) -> Self {
        let max_jumps = if features.double_jump {
            difficulty.max_jumps()
        } else {
            1
        };
        Self {
            x: PLAYER_START_X,
            y: GROUND_Y - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            velocity: 0.0,
            jumping: false,
            jumps_used: 0,
            max_jumps,
            speed: difficulty.player_speed(),
            gravity: GRAVITY,
            jump_impulse: difficulty.jump_height(),
            lives: if features.lives { STARTING_LIVES } else { 1 },
            invulnerable: false,
            invulnerable_since_ms: 0,
            invulnerability_ms: INVULNERABILITY_MS,
            facing: Facing::Right,
            died_at_ms: None,
            anim_frame: 0,
        }
    }

    /// Lowest allowed `y` (feet resting on the ground).
    pub fn floor_y(&self) -> f64 {
        GROUND_Y - self.height
    }

    pub fn is_on_ground(&self) -> bool {
        self.y >= self.floor_y()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Horizontal viewport offset. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub x: f64,
}

/// A ground hazard.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Leftward speed in world units per frame.
    pub speed: f64,
    /// Whether the player has cleared this obstacle (scored once).
    pub passed: bool,
}

impl Obstacle {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A carrot pickup that restores one life.
#[derive(Debug, Clone, PartialEq)]
pub struct Carrot {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub collected: bool,
}

impl Carrot {
    pub fn right(&self) -> f64 {
        self.x + self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Waiting for the first jump press. Nothing moves.
    Ready,
    Running,
    /// Countdown between levels; only the countdown timer advances.
    LevelTransition,
    GameOver,
}

/// Input latched between frames. Edge events are consumed by the next frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub jump_queued: bool,
    pub jump_release_queued: bool,
    pub left_held: bool,
    pub right_held: bool,
}

/// Complete state of one run.
#[derive(Debug, Clone)]
pub struct RunnerGame {
    pub difficulty: Difficulty,
    pub features: Features,
    pub phase: RunPhase,
    pub forfeit_pending: bool,
    pub paused: bool,

    // -- Entities --
    pub player: Player,
    pub camera: Camera,
    pub obstacles: Vec<Obstacle>,
    pub carrots: Vec<Carrot>,

    // -- Scoring --
    pub score: u32,
    pub level: u32,
    /// Seconds left in the level-transition countdown.
    pub countdown: u32,
    /// Run clock time of the next countdown decrement.
    pub countdown_step_at_ms: u64,
    /// Speed given to newly spawned obstacles; raised on level-up.
    pub obstacle_speed: f64,
    /// True once the game-over summary became visible.
    pub summary_shown: bool,

    // -- Timing --
    /// Run clock in milliseconds, advanced one frame at a time.
    pub clock_ms: u64,
    pub last_carrot_at_ms: u64,
    /// Sub-frame time accumulator (milliseconds).
    pub accumulated_ms: u64,
    pub frame_count: u64,

    pub controls: Controls,
}

impl RunnerGame {
    pub fn new(difficulty: Difficulty, features: Features) -> Self {
        Self {
            difficulty,
            features,
            phase: RunPhase::Ready,
            forfeit_pending: false,
            paused: false,

            player: Player::new(difficulty, features),
            camera: Camera::default(),
            obstacles: Vec::new(),
            carrots: Vec::new(),

            score: 0,
            level: 1,
            countdown: 0,
            countdown_step_at_ms: 0,
            obstacle_speed: difficulty.obstacle_speed(),
            summary_shown: false,

            clock_ms: 0,
            last_carrot_at_ms: 0,
            accumulated_ms: 0,
            frame_count: 0,

            controls: Controls::default(),
        }
    }

    /// Same difficulty and features, fresh state.
    pub fn restarted(&self) -> Self {
        Self::new(self.difficulty, self.features)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Score at which the current level ends.
    pub fn level_target(&self) -> u32 {
        self.level * self.difficulty.level_threshold()
    }

    /// Left edge of the furthest obstacle, if any.
    pub fn furthest_obstacle_x(&self) -> Option<f64> {
        self.obstacles.iter().map(|o| o.x).reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let game = RunnerGame::new(Difficulty::Normal, Features::default());
        assert_eq!(game.phase, RunPhase::Ready);
        assert_eq!(game.score, 0);
        assert_eq!(game.level, 1);
        assert_eq!(game.countdown, 0);
        assert!(game.obstacles.is_empty());
        assert!(game.carrots.is_empty());
        assert!(game.player.is_on_ground());
        assert_eq!(game.player.lives, STARTING_LIVES);
        assert_eq!(game.player.max_jumps, 2);
        assert!((game.player.x - PLAYER_START_X).abs() < f64::EPSILON);
        assert!((game.camera.x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_difficulty_parameters() {
        let d = Difficulty::Easy;
        assert!((d.obstacle_speed() - 3.0).abs() < f64::EPSILON);
        assert!((d.jump_height() - 16.0).abs() < f64::EPSILON);
        assert_eq!(d.max_jumps(), 2);
        assert!((d.pair_chance() - 0.3).abs() < f64::EPSILON);

        let d = Difficulty::Hard;
        assert!((d.obstacle_speed() - 5.0).abs() < f64::EPSILON);
        assert_eq!(d.max_jumps(), 1);
        assert_eq!(d.level_threshold(), 20);
        assert!((d.pair_chance() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_difficulty_from_index_and_key() {
        assert_eq!(Difficulty::from_index(0), Difficulty::Easy);
        assert_eq!(Difficulty::from_index(2), Difficulty::Hard);
        assert_eq!(Difficulty::from_index(99), Difficulty::Normal);
        assert_eq!(Difficulty::Hard.index(), 2);
        assert_eq!(Difficulty::from_key("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_key(" easy "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_key("nightmare"), None);
        assert_eq!(Difficulty::Normal.name(), "Normal");
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
    }

    #[test]
    fn test_classic_features_limit_player() {
        let game = RunnerGame::new(Difficulty::Easy, Features::classic());
        assert_eq!(game.player.max_jumps, 1);
        assert_eq!(game.player.lives, 1);
    }

    #[test]
    fn test_features_missing_fields_default_on() {
        let features: Features = serde_json::from_str(r#"{"lives": false}"#).unwrap();
        assert!(!features.lives);
        assert!(features.double_jump);
        assert!(features.camera_scroll);
    }

    #[test]
    fn test_level_target_scales_with_level() {
        let mut game = RunnerGame::new(Difficulty::Easy, Features::default());
        assert_eq!(game.level_target(), 10);
        game.level = 3;
        assert_eq!(game.level_target(), 30);
    }

    #[test]
    fn test_restarted_keeps_configuration() {
        let mut game = RunnerGame::new(Difficulty::Hard, Features::classic());
        game.score = 42;
        game.camera.x = 900.0;
        let fresh = game.restarted();
        assert_eq!(fresh.difficulty, Difficulty::Hard);
        assert_eq!(fresh.features, Features::classic());
        assert_eq!(fresh.score, 0);
        assert!((fresh.camera.x).abs() < f64::EPSILON);
    }
}
