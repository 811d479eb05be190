//! Scene lifecycle and the per-frame driver
//!
//! A [`Scene`] receives `preload`/`create` once and `update` every frame.
//! [`SceneRunner`] owns the physics world and guarantees the ordering within
//! a frame: scene update, then physics step, then collision callbacks.

use crate::config::GameConfig;
use crate::sim::{
    CollisionEvent, GameEvent, GamePhase, GameState, InputState, PhysicsError, PhysicsWorld, Rect,
    on_frame, on_paddle_hit,
};

/// Lifecycle hooks invoked by [`SceneRunner`]
pub trait Scene {
    /// Asset loading hook; nothing to load by default
    fn preload(&mut self) {}

    /// One-time setup of entities and physics bodies
    fn create(&mut self, physics: &mut PhysicsWorld) -> Result<(), PhysicsError>;

    /// Per-frame update, before physics runs
    fn update(
        &mut self,
        delta_ms: f32,
        input: &InputState,
        physics: &mut PhysicsWorld,
    ) -> Result<(), PhysicsError>;

    /// Called for every collider overlap reported by the physics step
    fn on_collision(
        &mut self,
        event: &CollisionEvent,
        physics: &mut PhysicsWorld,
    ) -> Result<Option<GameEvent>, PhysicsError>;
}

/// The wall pong scene: paddle, ball and score
#[derive(Debug, Clone)]
pub struct GameScene {
    config: GameConfig,
    state: Option<GameState>,
}

impl GameScene {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Game state, available once `create` has run
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }
}

impl Scene for GameScene {
    fn preload(&mut self) {
        log::info!("Scene preload called");
    }

    fn create(&mut self, physics: &mut PhysicsWorld) -> Result<(), PhysicsError> {
        let state = GameState::create(&self.config, physics)?;
        log::info!(
            "Scene created: viewport {}x{}, paddle at {:?}",
            state.viewport.x,
            state.viewport.y,
            state.paddle.pos
        );
        self.state = Some(state);
        Ok(())
    }

    fn update(
        &mut self,
        delta_ms: f32,
        input: &InputState,
        physics: &mut PhysicsWorld,
    ) -> Result<(), PhysicsError> {
        match self.state.as_mut() {
            Some(state) => on_frame(state, physics, delta_ms, input),
            None => Ok(()),
        }
    }

    fn on_collision(
        &mut self,
        event: &CollisionEvent,
        physics: &mut PhysicsWorld,
    ) -> Result<Option<GameEvent>, PhysicsError> {
        match self.state.as_mut() {
            Some(state) if event.collider == state.paddle_hit => {
                on_paddle_hit(state, physics).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// Drives a scene and its physics world frame by frame
#[derive(Debug, Clone)]
pub struct SceneRunner<S: Scene> {
    scene: S,
    physics: PhysicsWorld,
    phase: GamePhase,
}

impl SceneRunner<GameScene> {
    /// Runner for the wall pong scene, physics sized from the config
    pub fn for_game(config: GameConfig) -> Self {
        let bounds = Rect::new(0.0, 0.0, config.viewport_width, config.viewport_height);
        let physics = PhysicsWorld::new(bounds, config.physics_step);
        Self::new(GameScene::new(config), physics)
    }

    pub fn state(&self) -> Option<&GameState> {
        self.scene.state()
    }
}

impl<S: Scene> SceneRunner<S> {
    pub fn new(scene: S, physics: PhysicsWorld) -> Self {
        Self {
            scene,
            physics,
            phase: GamePhase::Initializing,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Run `preload` and `create` once; later calls do nothing
    pub fn boot(&mut self) -> Result<(), PhysicsError> {
        if self.phase == GamePhase::Running {
            return Ok(());
        }
        self.scene.preload();
        self.scene.create(&mut self.physics)?;
        self.phase = GamePhase::Running;
        Ok(())
    }

    /// Simulate one rendered frame of `delta_ms` milliseconds
    pub fn frame(
        &mut self,
        delta_ms: f32,
        input: &InputState,
    ) -> Result<Vec<GameEvent>, PhysicsError> {
        let mut events = Vec::new();
        if self.phase != GamePhase::Running {
            return Ok(events);
        }

        self.scene.update(delta_ms, input, &mut self.physics)?;

        for collision in self.physics.step(delta_ms / 1000.0) {
            if let Some(event) = self.scene.on_collision(&collision, &mut self.physics)? {
                events.push(event);
            }
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_frames_before_boot_do_nothing() {
        let mut runner = SceneRunner::for_game(GameConfig::default());
        assert_eq!(runner.phase(), GamePhase::Initializing);
        assert!(runner.frame(16.0, &InputState::up()).unwrap().is_empty());
        assert!(runner.state().is_none());
    }

    #[test]
    fn test_boot_is_idempotent() {
        let mut runner = SceneRunner::for_game(GameConfig::default());
        runner.boot().unwrap();
        runner.boot().unwrap();
        assert_eq!(runner.phase(), GamePhase::Running);
        // One paddle and one ball, not two of each
        assert!(runner.physics().body(crate::sim::BodyHandle(2)).is_err());
    }

    #[test]
    fn test_zero_frame_is_idempotent() {
        let mut runner = SceneRunner::for_game(GameConfig::default());
        runner.boot().unwrap();
        let state = runner.state().unwrap().clone();
        let ball = *runner.physics().body(state.ball.body).unwrap();

        let events = runner.frame(0.0, &InputState::IDLE).unwrap();
        assert!(events.is_empty());

        let after = runner.state().unwrap();
        assert_eq!(after.paddle.pos, state.paddle.pos);
        assert_eq!(after.score, 0);
        assert_eq!(*runner.physics().body(after.ball.body).unwrap(), ball);
    }

    #[test]
    fn test_ball_moves_with_physics() {
        let mut runner = SceneRunner::for_game(GameConfig::default());
        runner.boot().unwrap();
        runner.frame(100.0, &InputState::IDLE).unwrap();
        let state = runner.state().unwrap();
        let pos = state.ball.position(runner.physics()).unwrap();
        assert!((pos - Vec2::new(420.0, 315.0)).length() < 1e-3);
    }
}
