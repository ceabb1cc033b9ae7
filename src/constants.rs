// World geometry (logical units, independent of the terminal size)
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;

// Game timing constants
pub const TICKS_PER_SECOND: u32 = 60;
pub const COUNTDOWN_TICKS: u32 = 240;
pub const COUNTDOWN_TWO_AT: u32 = 180;
pub const COUNTDOWN_ONE_AT: u32 = 120;
pub const COUNTDOWN_GO_AT: u32 = 60;

// Bird constants
pub const BIRD_SIZE: f64 = 30.0;
pub const BIRD_START_X: f64 = SCREEN_WIDTH / 2.0 - 15.0;
pub const BIRD_START_Y: f64 = SCREEN_HEIGHT / 2.0;
pub const BIRD_MAX_ROTATION: f64 = 25.0;

// Obstacle constants
pub const PIPE_WIDTH: f64 = 60.0;
pub const PIPE_MARGIN: f64 = 50.0;
pub const MOVING_PIPE_CHANCE: f64 = 0.4;
pub const MOVING_PIPE_SPEED: f64 = 1.0;
pub const MOVING_PIPE_FLIP_TICKS: u32 = 30;

// Power-up constants
pub const POWERUP_SIZE: f64 = 20.0;
pub const POWERUP_SPEED: f64 = 3.0;
pub const POWERUP_SPAWN_INTERVAL: u32 = 300;
pub const POWERUP_SPAWN_MARGIN: f64 = 100.0;
pub const POWERUP_ANIMATION_STEP: f64 = 0.2;

// Effect durations (ticks)
pub const SHIELD_TICKS: u32 = 300;
pub const SLOW_MOTION_TICKS: u32 = 180;
pub const DOUBLE_SCORE_TICKS: u32 = 300;

// Particle constants
pub const PARTICLE_LIFE: u32 = 30;
pub const PARTICLE_GRAVITY: f64 = 0.2;
pub const PARTICLE_JITTER: f64 = 0.5;
pub const CRASH_PARTICLES: usize = 15;
pub const COLLECT_PARTICLES: usize = 8;

// Menu layout (world units)
pub const MENU_ITEMS: usize = 3;
pub const MENU_ROW_TOP: f64 = 220.0;
pub const MENU_ROW_SPACING: f64 = 80.0;
pub const MENU_ROW_HALF_WIDTH: f64 = 200.0;
pub const DIFFICULTY_ROW_SPACING: f64 = 100.0;
pub const DIFFICULTY_ROW_HALF_WIDTH: f64 = 250.0;
pub const SLIDER_X: f64 = SCREEN_WIDTH / 2.0 + 80.0;
pub const SLIDER_WIDTH: f64 = 200.0;
pub const SLIDER_HEIGHT: f64 = 20.0;
pub const SLIDER_GRAB_MARGIN: f64 = 10.0;
pub const VOLUME_STEP: f32 = 0.1;

// Audio defaults
pub const DEFAULT_SOUND_VOLUME: f32 = 0.5;
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.3;
