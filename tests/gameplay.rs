//! End-to-end frame loop checks through the public API

use glam::Vec2;
use wall_pong::consts::*;
use wall_pong::sim::{GameEvent, InputState, autopilot};
use wall_pong::{GameConfig, SceneRunner};

const FRAME_MS: f32 = 1000.0 / 60.0;

#[test]
fn test_straight_shot_scores_once() {
    let config = GameConfig {
        ball_velocity: [-200.0, 0.0],
        ..Default::default()
    };
    let mut runner = SceneRunner::for_game(config);
    runner.boot().unwrap();

    let mut hits = Vec::new();
    for _ in 0..120 {
        hits.extend(runner.frame(FRAME_MS, &InputState::IDLE).unwrap());
    }

    assert_eq!(hits.len(), 1);
    let GameEvent::PaddleHit { score, velocity } = hits[0];
    assert_eq!(score, 1);
    assert!((velocity - Vec2::new(210.0, 0.0)).length() < 1e-3);

    let state = runner.state().unwrap();
    assert_eq!(state.score, 1);
    assert_eq!(state.score_text, "Score: 1");
    assert_eq!(state.ball.velocity(runner.physics()).unwrap(), velocity);
}

#[test]
fn test_moved_paddle_body_follows() {
    // Ball flies along y = 300; holding down parks the paddle at the bottom,
    // so a hit can only come from a stale physics body.
    let config = GameConfig {
        ball_velocity: [-200.0, 0.0],
        ..Default::default()
    };
    let mut runner = SceneRunner::for_game(config);
    runner.boot().unwrap();

    let mut hits = 0;
    for _ in 0..120 {
        hits += runner.frame(FRAME_MS, &InputState::down()).unwrap().len();
    }

    let state = runner.state().unwrap();
    let bottom = VIEWPORT_HEIGHT - PADDLE_HEIGHT / 2.0;
    assert_eq!(state.paddle.pos.y, bottom);
    assert_eq!(runner.physics().position(state.paddle.body).unwrap().y, bottom);
    assert_eq!(hits, 0);
    assert_eq!(state.score, 0);
}

#[test]
fn test_autopilot_session_invariants() {
    let mut runner = SceneRunner::for_game(GameConfig::default());
    runner.boot().unwrap();

    let initial = Vec2::new(BALL_START_VX, BALL_START_VY);
    let mut last_speed = initial.length();
    let mut expected_score = 0;

    for _ in 0..3600 {
        let input = autopilot(runner.state().unwrap(), runner.physics()).unwrap();
        for event in runner.frame(FRAME_MS, &input).unwrap() {
            expected_score += 1;
            let GameEvent::PaddleHit { score, .. } = event;
            assert_eq!(score, expected_score);
        }

        let state = runner.state().unwrap();
        let physics = runner.physics();
        let half = state.paddle.half_height();
        assert!(state.paddle.pos.y >= half && state.paddle.pos.y <= VIEWPORT_HEIGHT - half);

        let pos = state.ball.position(physics).unwrap();
        let r = state.ball.radius;
        assert!(pos.x >= r - 1e-3 && pos.x <= VIEWPORT_WIDTH - r + 1e-3);
        assert!(pos.y >= r - 1e-3 && pos.y <= VIEWPORT_HEIGHT - r + 1e-3);

        let speed = state.ball.velocity(physics).unwrap().length();
        assert!(speed >= last_speed * (1.0 - 1e-5));
        last_speed = speed;
    }

    let state = runner.state().unwrap();
    assert!(state.score >= 1);
    assert_eq!(state.score, expected_score);

    let expected = initial * PADDLE_BOOST.powi(state.score as i32);
    let speed = state.ball.velocity(runner.physics()).unwrap().length();
    assert!((speed - expected.length()).abs() < expected.length() * 1e-3);
}
