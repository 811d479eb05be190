//! Game state and core simulation types
//!
//! Paddle and ball live in the physics world; the state keeps their handles
//! plus everything the physics world does not own (score, paddle position).

use glam::Vec2;

use super::body::{BodyHandle, Edges, Rect, Shape};
use super::physics::{ColliderId, PhysicsError, PhysicsWorld};
use crate::config::GameConfig;
use crate::consts::*;
use crate::score_text;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Scene not created yet
    Initializing,
    /// Entities exist and frames are being simulated
    Running,
}

/// Things that happened during a frame, for HUD and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball hit the paddle; carries the new score and boosted velocity
    PaddleHit { score: u32, velocity: Vec2 },
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Center position (x never changes)
    pub pos: Vec2,
    pub size: Vec2,
    pub body: BodyHandle,
}

impl Paddle {
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.size.y / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size / 2.0)
    }
}

/// The ball; position and velocity are owned by its physics body
#[derive(Debug, Clone)]
pub struct Ball {
    pub radius: f32,
    pub body: BodyHandle,
}

impl Ball {
    pub fn position(&self, physics: &PhysicsWorld) -> Result<Vec2, PhysicsError> {
        physics.position(self.body)
    }

    pub fn velocity(&self, physics: &PhysicsWorld) -> Result<Vec2, PhysicsError> {
        physics.velocity(self.body)
    }
}

/// Static decoration drawn at the top of the screen
#[derive(Debug, Clone)]
pub struct Banner {
    pub pos: Vec2,
    pub size: Vec2,
    pub text: &'static str,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub viewport: Vec2,
    pub paddle: Paddle,
    pub ball: Ball,
    pub score: u32,
    /// Text shown on the scoreboard
    pub score_text: String,
    /// Paddle speed while a key is held (units/s)
    pub paddle_speed: f32,
    /// Velocity multiplier per paddle hit
    pub paddle_boost: f32,
    /// Ball vs paddle collider
    pub paddle_hit: ColliderId,
    pub banner: Banner,
}

impl GameState {
    /// Create every entity and register it with the physics world
    pub fn create(config: &GameConfig, physics: &mut PhysicsWorld) -> Result<Self, PhysicsError> {
        let viewport = config.viewport();
        physics.set_bounds(Rect::new(0.0, 0.0, viewport.x, viewport.y));

        let paddle_pos = Vec2::new(config.paddle_x, viewport.y / 2.0);
        let paddle_size = Vec2::new(config.paddle_width, config.paddle_height);
        let paddle_body = physics.add_static_body(paddle_pos, Shape::Rect { size: paddle_size });

        let ball_body = physics.add_dynamic_body(
            viewport / 2.0,
            Shape::Circle {
                radius: config.ball_radius,
            },
        );
        physics.set_collide_world_bounds(ball_body, Edges::ALL)?;
        physics.set_bounce(ball_body, config.ball_bounce, config.ball_bounce)?;
        physics.set_velocity(ball_body, config.ball_velocity())?;

        let paddle_hit = physics.add_collider(ball_body, paddle_body)?;

        Ok(Self {
            viewport,
            paddle: Paddle {
                pos: paddle_pos,
                size: paddle_size,
                body: paddle_body,
            },
            ball: Ball {
                radius: config.ball_radius,
                body: ball_body,
            },
            score: 0,
            score_text: score_text(0),
            paddle_speed: config.paddle_speed,
            paddle_boost: config.paddle_boost,
            paddle_hit,
            banner: Banner {
                pos: Vec2::new(viewport.x / 2.0, BANNER_Y),
                size: Vec2::new(BANNER_WIDTH, BANNER_HEIGHT),
                text: BANNER_TEXT,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let config = GameConfig::default();
        let mut physics = PhysicsWorld::new(Rect::new(0.0, 0.0, 1.0, 1.0), PHYSICS_STEP);
        let state = GameState::create(&config, &mut physics).unwrap();

        assert_eq!(physics.bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(state.paddle.pos, Vec2::new(50.0, 300.0));
        assert_eq!(state.paddle.half_height(), 50.0);
        assert!(physics.body(state.paddle.body).unwrap().is_static());

        assert_eq!(state.ball.position(&physics).unwrap(), Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.velocity(&physics).unwrap(), Vec2::new(200.0, 150.0));
        let ball = physics.body(state.ball.body).unwrap();
        assert_eq!(ball.bounce, Vec2::ONE);
        assert_eq!(ball.collide_world_bounds, Edges::ALL);

        assert_eq!(state.score, 0);
        assert_eq!(state.score_text, "Score: 0");
        assert_eq!(state.banner.pos, Vec2::new(400.0, 50.0));
    }
}
