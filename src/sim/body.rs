//! Physics bodies and their geometry
//!
//! Coordinates follow the viewport: origin top-left, x right, y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a body inside its [`super::PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// How the simulation treats a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Collides but is never moved by the simulation
    Static,
    /// Integrated from its velocity every step
    Dynamic,
}

/// Collision shape, centered on the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { size: Vec2 },
    Circle { radius: f32 },
}

impl Shape {
    /// Half size of the shape's bounding box
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Rect { size } => size / 2.0,
            Shape::Circle { radius } => Vec2::splat(radius),
        }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// True if `other` lies fully inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Strict overlap (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Closest point inside the rectangle
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Per-edge flags (world-bound collision, blocked state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Edges {
    pub const NONE: Edges = Edges {
        left: false,
        right: false,
        up: false,
        down: false,
    };
    pub const ALL: Edges = Edges {
        left: true,
        right: true,
        up: true,
        down: true,
    };

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// A rigid body tracked by the physics world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub kind: BodyKind,
    /// Center position
    pub position: Vec2,
    pub shape: Shape,
    pub velocity: Vec2,
    /// Fraction of velocity kept (per axis) after a bounce
    pub bounce: Vec2,
    /// Which world edges this body is kept inside of
    pub collide_world_bounds: Edges,
    /// World edges the body touched during the last step
    pub blocked: Edges,
}

impl Body {
    pub fn new(kind: BodyKind, position: Vec2, shape: Shape) -> Self {
        Self {
            kind,
            position,
            shape,
            velocity: Vec2::ZERO,
            bounce: Vec2::ZERO,
            collide_world_bounds: Edges::NONE,
            blocked: Edges::NONE,
        }
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Bounding box at the current position
    pub fn aabb(&self) -> Rect {
        Rect::from_center(self.position, self.shape.half_extents())
    }
}

/// Exact shape overlap test
pub fn overlaps(a: &Body, b: &Body) -> bool {
    match (a.shape, b.shape) {
        (Shape::Rect { .. }, Shape::Rect { .. }) => a.aabb().intersects(&b.aabb()),
        (Shape::Circle { radius }, Shape::Rect { .. }) => {
            circle_rect_overlap(a.position, radius, &b.aabb())
        }
        (Shape::Rect { .. }, Shape::Circle { radius }) => {
            circle_rect_overlap(b.position, radius, &a.aabb())
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            let reach = ra + rb;
            a.position.distance_squared(b.position) < reach * reach
        }
    }
}

/// Closest-point test between a circle and a rectangle
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.clamp_point(center);
    center.distance_squared(closest) < radius * radius
}

/// Minimum translation that moves `a` out of `b`, along a single axis
///
/// Uses the bounding boxes, so it should only be applied once [`overlaps`]
/// has confirmed contact.
pub fn separation(a: &Body, b: &Body) -> Vec2 {
    let ra = a.aabb();
    let rb = b.aabb();

    let overlap_x = (ra.max.x - rb.min.x).min(rb.max.x - ra.min.x);
    let overlap_y = (ra.max.y - rb.min.y).min(rb.max.y - ra.min.y);
    let dir = a.position - b.position;

    if overlap_x < overlap_y {
        let sign = if dir.x < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(overlap_x * sign, 0.0)
    } else {
        let sign = if dir.y < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(0.0, overlap_y * sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f32, y: f32, r: f32) -> Body {
        Body::new(
            BodyKind::Dynamic,
            Vec2::new(x, y),
            Shape::Circle { radius: r },
        )
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(
            BodyKind::Static,
            Vec2::new(x, y),
            Shape::Rect {
                size: Vec2::new(w, h),
            },
        )
    }

    #[test]
    fn test_circle_rect_corner_gap() {
        // Bounding boxes overlap near the corner but the circle does not
        let paddle = rect(50.0, 300.0, 20.0, 100.0);
        let ball = circle(68.0, 242.0, 10.0);
        assert!(ball.aabb().intersects(&paddle.aabb()));
        assert!(!overlaps(&ball, &paddle));
    }

    #[test]
    fn test_separation_picks_shallow_axis() {
        let paddle = rect(50.0, 300.0, 20.0, 100.0);
        // Ball 2 units into the paddle's right face
        let ball = circle(68.0, 300.0, 10.0);
        assert!(overlaps(&ball, &paddle));
        let push = separation(&ball, &paddle);
        assert!((push.x - 2.0).abs() < 1e-5);
        assert_eq!(push.y, 0.0);
    }

    #[test]
    fn test_rect_contains() {
        let world = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert!(world.contains_rect(&rect(50.0, 50.0, 20.0, 100.0).aabb()));
        assert!(!world.contains_rect(&rect(50.0, 20.0, 20.0, 100.0).aabb()));
        assert_eq!(world.center(), Vec2::new(400.0, 300.0));
        assert_eq!(world.size(), Vec2::new(800.0, 600.0));
    }
}
