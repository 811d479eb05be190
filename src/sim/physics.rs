//! Arcade physics world
//!
//! Velocity integration, world-bound containment and collider pairs with
//! single-axis separation. Static bodies only move when the owner pushes a
//! new position into them.

use glam::Vec2;

use crate::consts::MAX_FRAME_DT;

use super::body::{Body, BodyHandle, BodyKind, Edges, Rect, Shape, overlaps, separation};

/// Identifier of a registered collider pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId(u32);

/// Two bodies that overlapped and were separated during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub collider: ColliderId,
    pub a: BodyHandle,
    pub b: BodyHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Handle does not belong to this world
    UnknownBody(BodyHandle),
    /// Static bodies never move, so a static pair can never collide
    StaticPair(BodyHandle, BodyHandle),
    /// Only static bodies accept manual position syncs
    NotStatic(BodyHandle),
}

impl std::fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhysicsError::UnknownBody(h) => write!(f, "unknown body {:?}", h),
            PhysicsError::StaticPair(a, b) => {
                write!(f, "collider between two static bodies {:?} and {:?}", a, b)
            }
            PhysicsError::NotStatic(h) => write!(f, "body {:?} is not static", h),
        }
    }
}

impl std::error::Error for PhysicsError {}

#[derive(Debug, Clone, Copy)]
struct Collider {
    id: ColliderId,
    a: BodyHandle,
    b: BodyHandle,
}

/// Container for all bodies and collider pairs
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    bounds: Rect,
    bodies: Vec<Body>,
    colliders: Vec<Collider>,
    /// Largest sub-step in seconds
    max_step: f32,
}

impl PhysicsWorld {
    pub fn new(bounds: Rect, max_step: f32) -> Self {
        Self {
            bounds,
            bodies: Vec::new(),
            colliders: Vec::new(),
            max_step,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Register a body that collides but is never moved by the simulation
    pub fn add_static_body(&mut self, position: Vec2, shape: Shape) -> BodyHandle {
        self.push(Body::new(BodyKind::Static, position, shape))
    }

    /// Register a body integrated from its velocity every step
    pub fn add_dynamic_body(&mut self, position: Vec2, shape: Shape) -> BodyHandle {
        self.push(Body::new(BodyKind::Dynamic, position, shape))
    }

    fn push(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(body);
        handle
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&Body, PhysicsError> {
        self.bodies
            .get(handle.index())
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, PhysicsError> {
        self.bodies
            .get_mut(handle.index())
            .ok_or(PhysicsError::UnknownBody(handle))
    }

    pub fn position(&self, handle: BodyHandle) -> Result<Vec2, PhysicsError> {
        Ok(self.body(handle)?.position)
    }

    pub fn velocity(&self, handle: BodyHandle) -> Result<Vec2, PhysicsError> {
        Ok(self.body(handle)?.velocity)
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.velocity = velocity;
        Ok(())
    }

    pub fn set_bounce(&mut self, handle: BodyHandle, x: f32, y: f32) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.bounce = Vec2::new(x, y);
        Ok(())
    }

    pub fn set_collide_world_bounds(
        &mut self,
        handle: BodyHandle,
        edges: Edges,
    ) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.collide_world_bounds = edges;
        Ok(())
    }

    /// Edges the body was stopped by during the last step
    pub fn blocked(&self, handle: BodyHandle) -> Result<Edges, PhysicsError> {
        Ok(self.body(handle)?.blocked)
    }

    /// Push a manually moved position into a static body
    pub fn sync_static(&mut self, handle: BodyHandle, position: Vec2) -> Result<(), PhysicsError> {
        let body = self.body_mut(handle)?;
        if !body.is_static() {
            return Err(PhysicsError::NotStatic(handle));
        }
        body.position = position;
        Ok(())
    }

    /// Separate and report `a` and `b` whenever they overlap
    pub fn add_collider(&mut self, a: BodyHandle, b: BodyHandle) -> Result<ColliderId, PhysicsError> {
        let static_a = self.body(a)?.is_static();
        let static_b = self.body(b)?.is_static();
        if static_a && static_b {
            return Err(PhysicsError::StaticPair(a, b));
        }

        let id = ColliderId(self.colliders.len() as u32);
        self.colliders.push(Collider { id, a, b });
        Ok(id)
    }

    /// Advance the world by `dt` seconds, in sub-steps no longer than `max_step`
    ///
    /// `dt` is capped at [`MAX_FRAME_DT`]; a stalled tab resumes with one
    /// short step instead of a burst of sub-steps.
    pub fn step(&mut self, dt: f32) -> Vec<CollisionEvent> {
        let mut events = Vec::new();
        if !(dt > 0.0) {
            return events;
        }
        let dt = dt.min(MAX_FRAME_DT);

        for body in &mut self.bodies {
            body.blocked = Edges::NONE;
        }

        let substeps = (dt / self.max_step).ceil().max(1.0) as u32;
        let sub_dt = dt / substeps as f32;
        for _ in 0..substeps {
            self.substep(sub_dt, &mut events);
        }

        events
    }

    fn substep(&mut self, dt: f32, events: &mut Vec<CollisionEvent>) {
        let bounds = self.bounds;

        for body in self.bodies.iter_mut().filter(|b| !b.is_static()) {
            body.position += body.velocity * dt;
            contain(body, &bounds);
        }

        for i in 0..self.colliders.len() {
            let collider = self.colliders[i];
            let (ia, ib) = (collider.a.index(), collider.b.index());
            let mut a = self.bodies[ia];
            let mut b = self.bodies[ib];

            if !overlaps(&a, &b) {
                continue;
            }

            resolve(&mut a, &mut b);
            // Separation must not push a body through the world edges
            for body in [&mut a, &mut b] {
                if !body.is_static() {
                    contain(body, &bounds);
                }
            }
            self.bodies[ia] = a;
            self.bodies[ib] = b;

            events.push(CollisionEvent {
                collider: collider.id,
                a: collider.a,
                b: collider.b,
            });
        }
    }
}

/// Keep a dynamic body inside the world on the edges it collides with
fn contain(body: &mut Body, bounds: &Rect) {
    let edges = body.collide_world_bounds;
    if !edges.any() {
        return;
    }
    let half = body.shape.half_extents();

    if edges.left && body.position.x - half.x < bounds.min.x {
        body.position.x = bounds.min.x + half.x;
        if body.velocity.x < 0.0 {
            body.velocity.x = -body.velocity.x * body.bounce.x;
        }
        body.blocked.left = true;
    } else if edges.right && body.position.x + half.x > bounds.max.x {
        body.position.x = bounds.max.x - half.x;
        if body.velocity.x > 0.0 {
            body.velocity.x = -body.velocity.x * body.bounce.x;
        }
        body.blocked.right = true;
    }

    if edges.up && body.position.y - half.y < bounds.min.y {
        body.position.y = bounds.min.y + half.y;
        if body.velocity.y < 0.0 {
            body.velocity.y = -body.velocity.y * body.bounce.y;
        }
        body.blocked.up = true;
    } else if edges.down && body.position.y + half.y > bounds.max.y {
        body.position.y = bounds.max.y - half.y;
        if body.velocity.y > 0.0 {
            body.velocity.y = -body.velocity.y * body.bounce.y;
        }
        body.blocked.down = true;
    }
}

/// Push overlapping bodies apart and bounce the moving ones
fn resolve(a: &mut Body, b: &mut Body) {
    let push = separation(a, b);

    match (a.is_static(), b.is_static()) {
        (false, true) => {
            a.position += push;
            bounce_off(a, push);
        }
        (true, false) => {
            b.position -= push;
            bounce_off(b, -push);
        }
        (false, false) => {
            a.position += push / 2.0;
            b.position -= push / 2.0;
            bounce_off(a, push);
            bounce_off(b, -push);
        }
        (true, true) => {}
    }
}

/// Reflect the velocity component heading against `push`
fn bounce_off(body: &mut Body, push: Vec2) {
    if push.x != 0.0 && body.velocity.x * push.x < 0.0 {
        body.velocity.x = -body.velocity.x * body.bounce.x;
    }
    if push.y != 0.0 && body.velocity.y * push.y < 0.0 {
        body.velocity.y = -body.velocity.y * body.bounce.y;
    }
}
