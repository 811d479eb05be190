//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Arcade physics for the ball and paddle bodies
//! - Paddle control from a key snapshot
//! - Scoring on paddle hits

pub mod body;
pub mod input;
pub mod physics;
pub mod state;
pub mod tick;

pub use body::{Body, BodyHandle, BodyKind, Edges, Rect, Shape};
pub use input::InputState;
pub use physics::{ColliderId, CollisionEvent, PhysicsError, PhysicsWorld};
pub use state::{Ball, Banner, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{autopilot, clamp_paddle_y, on_frame, on_paddle_hit, paddle_step};
