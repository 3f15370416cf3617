// Frame timing
pub const FRAME_MS: u64 = 16; // ~60 FPS physics step
pub const MAX_FRAME_DT_MS: u64 = 100; // clamp after pause/lag

// Virtual viewport (world units, canvas-like)
pub const VIEWPORT_WIDTH: f64 = 800.0;
pub const VIEWPORT_HEIGHT: f64 = 400.0;
pub const GROUND_HEIGHT: f64 = 40.0;
pub const GROUND_Y: f64 = VIEWPORT_HEIGHT - GROUND_HEIGHT;

// Player
pub const PLAYER_START_X: f64 = 70.0;
pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_HEIGHT: f64 = 50.0;
pub const GRAVITY: f64 = 0.6;
pub const JUMP_RELEASE_VELOCITY: f64 = -8.0;
pub const TREADMILL_FACTOR: f64 = 0.5;
pub const CAMERA_LEFT_MARGIN: f64 = 10.0;
pub const RUN_ANIM_FRAMES: u32 = 2;
pub const RUN_ANIM_PERIOD: u64 = 8;

// Lives
pub const STARTING_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 5;
pub const INVULNERABILITY_MS: u64 = 1_000;

// Camera
pub const CAMERA_FOLLOW_THRESHOLD: f64 = 0.7;

// Obstacles
pub const OBSTACLE_LOOKAHEAD: f64 = 200.0;
pub const OBSTACLE_GAP_JITTER: f64 = 100.0;
pub const OBSTACLE_MIN_HEIGHT: f64 = 80.0;
pub const OBSTACLE_MAX_HEIGHT: f64 = 150.0;
pub const OBSTACLE_MIN_RATIO: f64 = 0.4;
pub const OBSTACLE_MAX_RATIO: f64 = 0.8;
pub const OBSTACLE_PAIR_SPACING: f64 = 20.0;

// Collectibles
pub const CARROT_SIZE: f64 = 30.0;
pub const CARROT_SPAWN_INTERVAL_MS: u64 = 15_000;
pub const CARROT_SPAWN_AHEAD: f64 = 50.0;
pub const CARROT_MIN_LIFT: f64 = 100.0; // above ground
pub const CARROT_MAX_LIFT: f64 = 200.0;
pub const CARROT_SPEED_FACTOR: f64 = 0.5;

// Collision
pub const COLLISION_PADDING: f64 = 15.0;

// Level transitions
pub const LEVEL_COUNTDOWN_SECONDS: u32 = 3;
pub const COUNTDOWN_STEP_MS: u64 = 1_000;
pub const GAME_OVER_DELAY_MS: u64 = 1_000;

// Persistence
pub const DATA_DIR_NAME: &str = ".hopper";
pub const BEST_SCORE_FILE: &str = "best_score.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "hopper.log";
pub const SPRITE_DIR: &str = "sprites";
