//! Game tuning and configuration
//!
//! Defaults come from [`crate::consts`]. On the web an override can be stored
//! as JSON in LocalStorage; invalid overrides fall back to the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a [`GameConfig`] is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A size or speed that must be positive and finite is not
    NonPositive { field: &'static str, value: f32 },
    /// The paddle cannot fit vertically inside the viewport
    PaddleTooTall { paddle_height: f32, viewport_height: f32 },
    /// The ball cannot fit inside the viewport
    BallTooLarge { radius: f32 },
    /// Hits must never slow the ball down
    BoostBelowOne(f32),
    /// Wall and paddle bounces must keep the ball's speed
    BounceNotOne(f32),
    /// The canvas and HUD are laid out for a fixed viewport
    ViewportFixed { width: f32, height: f32 },
    /// Starting velocity is zero, non-finite, or would skip past the paddle
    BadBallVelocity { velocity: [f32; 2], max_speed: f32 },
    /// Stored JSON could not be parsed
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive and finite, got {}", field, value)
            }
            ConfigError::PaddleTooTall {
                paddle_height,
                viewport_height,
            } => write!(
                f,
                "paddle height {} does not fit in viewport height {}",
                paddle_height, viewport_height
            ),
            ConfigError::BallTooLarge { radius } => {
                write!(f, "ball radius {} does not fit in the viewport", radius)
            }
            ConfigError::BoostBelowOne(boost) => {
                write!(f, "paddle boost must be at least 1.0, got {}", boost)
            }
            ConfigError::BounceNotOne(bounce) => {
                write!(f, "ball bounce must be exactly 1.0, got {}", bounce)
            }
            ConfigError::ViewportFixed { width, height } => write!(
                f,
                "viewport is fixed at {}x{}, got {}x{}",
                VIEWPORT_WIDTH, VIEWPORT_HEIGHT, width, height
            ),
            ConfigError::BadBallVelocity {
                velocity,
                max_speed,
            } => write!(
                f,
                "ball velocity {:?} must be non-zero with speed at most {}",
                velocity, max_speed
            ),
            ConfigError::Parse(e) => write!(f, "malformed config JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Viewport ===
    /// Overrides must match [`VIEWPORT_WIDTH`]x[`VIEWPORT_HEIGHT`]
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Paddle ===
    /// Fixed horizontal center of the paddle
    pub paddle_x: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Vertical speed while a key is held (units/s)
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Initial velocity (units/s)
    pub ball_velocity: [f32; 2],
    /// Bounce coefficient against world edges and the paddle
    pub ball_bounce: f32,
    /// Velocity multiplier applied on every paddle hit
    pub paddle_boost: f32,

    // === Physics ===
    /// Largest physics sub-step (seconds)
    pub physics_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            paddle_x: PADDLE_X,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_velocity: [BALL_START_VX, BALL_START_VY],
            ball_bounce: BALL_BOUNCE,
            paddle_boost: PADDLE_BOOST,

            physics_step: PHYSICS_STEP,
        }
    }
}

impl GameConfig {
    /// Viewport size as a vector
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    pub fn ball_velocity(&self) -> Vec2 {
        Vec2::from(self.ball_velocity)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width != VIEWPORT_WIDTH || self.viewport_height != VIEWPORT_HEIGHT {
            return Err(ConfigError::ViewportFixed {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }

        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("physics_step", self.physics_step),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.paddle_height > self.viewport_height {
            return Err(ConfigError::PaddleTooTall {
                paddle_height: self.paddle_height,
                viewport_height: self.viewport_height,
            });
        }

        if self.ball_radius * 2.0 > self.viewport_width.min(self.viewport_height) {
            return Err(ConfigError::BallTooLarge {
                radius: self.ball_radius,
            });
        }

        if !(self.paddle_boost.is_finite() && self.paddle_boost >= 1.0) {
            return Err(ConfigError::BoostBelowOne(self.paddle_boost));
        }

        if self.ball_bounce != 1.0 {
            return Err(ConfigError::BounceNotOne(self.ball_bounce));
        }

        // One physics sub-step may not carry the ball further than its radius
        let max_speed = self.ball_radius / self.physics_step;
        let speed = self.ball_velocity().length();
        if !(speed.is_finite() && speed > 0.0 && speed <= max_speed) {
            return Err(ConfigError::BadBallVelocity {
                velocity: self.ball_velocity,
                max_speed,
            });
        }

        Ok(())
    }

    /// Parse a JSON override, keeping defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "wall_pong_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                },
                // Nothing stored yet: seed the defaults so they can be edited
                Ok(None) => Self::default().save(),
                Err(_) => log::warn!("LocalStorage not readable"),
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Config saved");
                }
                Err(e) => log::warn!("Failed to save config: {}", e),
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport(), Vec2::new(800.0, 600.0));
        assert_eq!(config.ball_velocity(), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "paddle_speed": 450.0 }"#).unwrap();
        assert_eq!(config.paddle_speed, 450.0);
        assert_eq!(config.paddle_height, PADDLE_HEIGHT);
        assert_eq!(config.paddle_boost, PADDLE_BOOST);
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = GameConfig {
            paddle_height: 700.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleTooTall { .. })
        ));

        let config = GameConfig {
            ball_radius: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().to_string().split(' ').next(),
            Some("ball_radius")
        );

        let config = GameConfig {
            paddle_boost: 0.9,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BoostBelowOne(0.9)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "viewport_width": -1.0 }"#),
            Err(ConfigError::ViewportFixed { .. })
        ));
    }

    #[test]
    fn test_rejects_bounce_other_than_one() {
        assert_eq!(
            GameConfig::from_json(r#"{ "ball_bounce": 0.5 }"#),
            Err(ConfigError::BounceNotOne(0.5))
        );
        assert_eq!(
            GameConfig::from_json(r#"{ "ball_bounce": 1.5 }"#),
            Err(ConfigError::BounceNotOne(1.5))
        );
        let config = GameConfig {
            ball_bounce: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BounceNotOne(b)) if b.is_nan()
        ));
    }

    #[test]
    fn test_viewport_is_fixed() {
        assert_eq!(
            GameConfig::from_json(r#"{ "viewport_width": 300.0 }"#),
            Err(ConfigError::ViewportFixed {
                width: 300.0,
                height: 600.0
            })
        );
        let config = GameConfig::from_json(r#"{ "viewport_width": 800.0 }"#).unwrap();
        assert_eq!(config.viewport(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_rejects_bad_ball_velocity() {
        let too_fast = GameConfig::from_json(r#"{ "ball_velocity": [1e30, 1e30] }"#);
        assert!(matches!(
            too_fast,
            Err(ConfigError::BadBallVelocity { max_speed, .. }) if (max_speed - 1200.0).abs() < 0.1
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "ball_velocity": [0.0, 0.0] }"#),
            Err(ConfigError::BadBallVelocity { .. })
        ));
        let config = GameConfig {
            ball_velocity: [f32::INFINITY, 0.0],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadBallVelocity { .. })
        ));
        // A purely horizontal serve is fine
        assert!(GameConfig::from_json(r#"{ "ball_velocity": [-200.0, 0.0] }"#).is_ok());
    }

    #[test]
    fn test_saved_json_loads_back() {
        let config = GameConfig {
            paddle_speed: 420.0,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json), Ok(config));
    }
}
