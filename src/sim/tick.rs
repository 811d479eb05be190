//! Per-frame paddle control and paddle hit scoring

use super::input::InputState;
use super::physics::{PhysicsError, PhysicsWorld};
use super::state::{GameEvent, GameState};
use crate::score_text;

/// Keep a paddle of `half_height` fully inside `[0, viewport_height]`
pub fn clamp_paddle_y(y: f32, half_height: f32, viewport_height: f32) -> f32 {
    if y - half_height < 0.0 {
        half_height
    } else if y + half_height > viewport_height {
        viewport_height - half_height
    } else {
        y
    }
}

/// Advance the paddle for one frame; returns the new center y, or `None`
/// when no direction is held
pub fn paddle_step(state: &GameState, input: &InputState, delta_ms: f32) -> Option<f32> {
    let vel = input.vertical() * state.paddle_speed;
    if vel == 0.0 {
        return None;
    }

    let y = state.paddle.pos.y + vel * (delta_ms / 1000.0);
    Some(clamp_paddle_y(y, state.paddle.half_height(), state.viewport.y))
}

/// Per-frame update: move the paddle from input and sync its static body
///
/// Ball motion is left to the physics step that follows.
pub fn on_frame(
    state: &mut GameState,
    physics: &mut PhysicsWorld,
    delta_ms: f32,
    input: &InputState,
) -> Result<(), PhysicsError> {
    if let Some(y) = paddle_step(state, input, delta_ms) {
        state.paddle.pos.y = y;
        physics.sync_static(state.paddle.body, state.paddle.pos)?;
    }
    Ok(())
}

/// Ball touched the paddle: score it and speed the ball up
pub fn on_paddle_hit(
    state: &mut GameState,
    physics: &mut PhysicsWorld,
) -> Result<GameEvent, PhysicsError> {
    state.score += 1;
    state.score_text = score_text(state.score);

    let velocity = state.ball.velocity(physics)? * state.paddle_boost;
    physics.set_velocity(state.ball.body, velocity)?;

    log::debug!("Paddle hit: score {}, velocity {:?}", state.score, velocity);
    Ok(GameEvent::PaddleHit {
        score: state.score,
        velocity,
    })
}

/// Idle/demo mode: hold whichever key brings the paddle toward the ball
pub fn autopilot(state: &GameState, physics: &PhysicsWorld) -> Result<InputState, PhysicsError> {
    let ball_y = state.ball.position(physics)?.y;
    let dead_zone = state.paddle.half_height() / 2.0;
    let offset = ball_y - state.paddle.pos.y;

    Ok(if offset < -dead_zone {
        InputState::up()
    } else if offset > dead_zone {
        InputState::down()
    } else {
        InputState::IDLE
    })
}
