//! WebGPU rendering module
//!
//! Shapes are generated on the CPU in viewport coordinates each frame and
//! drawn as one triangle list.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, viewport_to_ndc};
pub use vertex::{Vertex, colors};

use crate::sim::{GameState, PhysicsError, PhysicsWorld};

/// Segments used to tessellate the ball
const BALL_SEGMENTS: u32 = 24;

/// Build the frame's vertices: banner, paddle, then ball on top
pub fn scene_vertices(state: &GameState, physics: &PhysicsWorld) -> Result<Vec<Vertex>, PhysicsError> {
    let mut vertices = shapes::rect(state.banner.pos, state.banner.size, colors::BANNER);
    vertices.extend(shapes::rect(state.paddle.pos, state.paddle.size, colors::PADDLE));
    vertices.extend(shapes::circle(
        state.ball.position(physics)?,
        state.ball.radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::Rect;

    #[test]
    fn test_scene_vertices_layout() {
        let config = GameConfig::default();
        let mut physics = PhysicsWorld::new(Rect::new(0.0, 0.0, 800.0, 600.0), config.physics_step);
        let state = GameState::create(&config, &mut physics).unwrap();

        let verts = scene_vertices(&state, &physics).unwrap();
        assert_eq!(verts.len(), 6 + 6 + BALL_SEGMENTS as usize * 3);
        assert!(verts[..6].iter().all(|v| v.color == colors::BANNER));
        assert!(verts[6..12].iter().all(|v| v.color == colors::PADDLE));
        assert!(verts[12..].iter().all(|v| v.color == colors::BALL));
    }
}
