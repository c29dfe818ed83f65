//! 2D spatial primitives.
//!
//! [`Vec2`] and [`Rect`] are plain value types used everywhere (transforms,
//! tile references, camera views). [`Shape`] adds a process-unique
//! [`ShapeId`] on top of a rectangle or circle; collision sets track shapes by
//! that id rather than by geometry.
//!
//! All rectangle tests use closed intervals: rectangles that only share an
//! edge intersect, and a point on the border is contained.
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear blend: `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        Vec2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn floor(self) -> Vec2 {
        Vec2::new(self.x.floor(), self.y.floor())
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Zero-area rectangles are used as "nothing here" markers (empty tiles).
    pub fn is_empty(&self) -> bool {
        self.w * self.h == 0.0
    }

    /// Closed-interval overlap test.
    pub fn intersects(&self, other: &Rect) -> bool {
        other.x <= self.right()
            && self.x <= other.right()
            && other.y <= self.bottom()
            && self.y <= other.bottom()
    }

    /// Rectangle vs circle, using the circle's bounding box.
    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        self.intersects(&circle.bounds())
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a [`Shape`], unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ShapeId(u64);

impl ShapeId {
    fn next() -> Self {
        ShapeId(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Rect(Rect),
    Circle(Circle),
}

impl ShapeKind {
    fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rect(_) => "rectangle",
            ShapeKind::Circle(_) => "circle",
        }
    }
}

/// Geometry with identity.
///
/// Cloning a shape keeps its id; use [`Shape::rect`] or [`Shape::circle`] to
/// mint a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    id: ShapeId,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn rect(rect: Rect) -> Self {
        Self {
            id: ShapeId::next(),
            kind: ShapeKind::Rect(rect),
        }
    }

    pub fn circle(circle: Circle) -> Self {
        Self {
            id: ShapeId::next(),
            kind: ShapeKind::Circle(circle),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Bounding box of the shape.
    pub fn bounds(&self) -> Rect {
        match self.kind {
            ShapeKind::Rect(r) => r,
            ShapeKind::Circle(c) => c.bounds(),
        }
    }

    /// Moves the shape so its bounding box starts at `position`.
    pub fn set_position(&mut self, position: Vec2) {
        match &mut self.kind {
            ShapeKind::Rect(r) => r.set_position(position),
            ShapeKind::Circle(c) => {
                c.center = Vec2::new(position.x + c.radius, position.y + c.radius)
            }
        }
    }

    pub fn intersects(&self, other: &Shape) -> Result<bool, GeometryError> {
        match (&self.kind, &other.kind) {
            (ShapeKind::Rect(a), ShapeKind::Rect(b)) => Ok(a.intersects(b)),
            (ShapeKind::Rect(r), ShapeKind::Circle(c))
            | (ShapeKind::Circle(c), ShapeKind::Rect(r)) => Ok(r.intersects_circle(c)),
            (a, b) => Err(GeometryError::NotImplemented {
                op: "intersects",
                a: a.name(),
                b: b.name(),
            }),
        }
    }

    /// Containment of another shape. Only point containment exists (see
    /// [`Rect::contains_point`]); every shape/shape pair is unimplemented.
    pub fn contains(&self, other: &Shape) -> Result<bool, GeometryError> {
        Err(GeometryError::NotImplemented {
            op: "contains",
            a: self.kind.name(),
            b: other.kind.name(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    NotImplemented {
        op: &'static str,
        a: &'static str,
        b: &'static str,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NotImplemented { op, a, b } => {
                write!(f, "not implemented: {a}.{op}({b})")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 5.0, 5.0);
        let c = Rect::new(10.1, 0.0, 5.0, 5.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0.0, 0.0, 16.0, 16.0);
        let b = Rect::new(32.0, -16.0, 16.0, 16.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -16.0, 48.0, 32.0));
    }

    #[test]
    fn contains_point_is_closed() {
        let r = Rect::new(0.0, 0.0, 8.0, 8.0);
        assert!(r.contains_point(Vec2::new(8.0, 8.0)));
        assert!(!r.contains_point(Vec2::new(8.01, 0.0)));
    }

    #[test]
    fn shape_ids_are_unique_and_survive_moves() {
        let mut a = Shape::rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        let b = Shape::rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_ne!(a.id(), b.id());
        let id = a.id();
        a.set_position(Vec2::new(5.0, 5.0));
        assert_eq!(a.id(), id);
        assert_eq!(a.bounds().position(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn rect_circle_uses_circle_bounds() {
        let r = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let c = Shape::circle(Circle::new(Vec2::new(13.0, 5.0), 3.0));
        assert_eq!(r.intersects(&c), Ok(true));
        assert_eq!(c.intersects(&r), Ok(true));
        let far = Shape::circle(Circle::new(Vec2::new(20.0, 5.0), 3.0));
        assert_eq!(r.intersects(&far), Ok(false));
    }

    #[test]
    fn unsupported_pairs_are_errors() {
        let c1 = Shape::circle(Circle::new(Vec2::ZERO, 1.0));
        let c2 = Shape::circle(Circle::new(Vec2::ZERO, 1.0));
        assert!(matches!(
            c1.intersects(&c2),
            Err(GeometryError::NotImplemented { .. })
        ));
        let r = Shape::rect(Rect::new(0.0, 0.0, 4.0, 4.0));
        assert!(r.contains(&c1).is_err());
        assert!(r.contains(&r).is_err());
    }
}
