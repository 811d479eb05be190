//! Wall Pong - single-player Pong against a wall
//!
//! Core modules:
//! - `sim`: Simulation (arcade physics, paddle control, scoring)
//! - `scene`: Scene lifecycle and per-frame driver
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Data-driven game tuning
//! - `bootstrap`: Startup retry policy and error types

pub mod bootstrap;
pub mod config;
pub mod renderer;
pub mod scene;
pub mod sim;

pub use bootstrap::{BootError, RetryPolicy};
pub use config::{ConfigError, GameConfig};
pub use scene::{GameScene, Scene, SceneRunner};

/// Game configuration constants
pub mod consts {
    /// Logical viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Paddle defaults - left side, moved with the arrow keys
    pub const PADDLE_X: f32 = 50.0;
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Paddle speed while a key is held (units/s)
    pub const PADDLE_SPEED: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_VX: f32 = 200.0;
    pub const BALL_START_VY: f32 = 150.0;
    /// Fully elastic on both axes
    pub const BALL_BOUNCE: f32 = 1.0;
    /// Speed boost when ball hits paddle (multiplicative, uncapped)
    pub const PADDLE_BOOST: f32 = 1.05;

    /// Largest physics sub-step (120 Hz)
    pub const PHYSICS_STEP: f32 = 1.0 / 120.0;
    /// Frame deltas above this are clamped before stepping physics
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Decorative banner at the top of the screen
    pub const BANNER_Y: f32 = 50.0;
    pub const BANNER_WIDTH: f32 = 200.0;
    pub const BANNER_HEIGHT: f32 = 30.0;
    pub const BANNER_TEXT: &str = "Game Loaded!";

    /// Startup polling while the page is not ready
    pub const BOOT_MAX_ATTEMPTS: u32 = 50;
    pub const BOOT_RETRY_INTERVAL_MS: i32 = 100;
}

/// Format the on-screen score label
#[inline]
pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}
