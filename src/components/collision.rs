//! Per-entity set of shapes currently touching this entity.
//!
//! [`Collisions::check`] reports an overlap only on the tick it starts;
//! while the other shape stays tracked, further checks return `false`.
//! [`Collisions::sweep`] forgets shapes that stopped overlapping so the next
//! overlap fires again.
use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::spatial::{GeometryError, Shape, ShapeId};

pub type ShapeIds = SmallVec<[ShapeId; 4]>;

#[derive(Component, Debug, Clone, Default)]
pub struct Collisions {
    touching: ShapeIds,
}

impl Collisions {
    pub fn contains(&self, id: ShapeId) -> bool {
        self.touching.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.touching.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touching.is_empty()
    }

    /// Tests `own` against `other`; records `other` and returns `true` only
    /// when the overlap is new.
    pub fn check(&mut self, own: &Shape, other: &Shape) -> Result<bool, GeometryError> {
        if !own.intersects(other)? {
            return Ok(false);
        }
        if self.contains(other.id()) {
            return Ok(false);
        }
        self.touching.push(other.id());
        Ok(true)
    }

    /// Drops tracked shapes that no longer intersect `own`. `lookup` resolves
    /// an id to the shape's current geometry; ids it cannot resolve are
    /// dropped too. Returns the removed ids.
    pub fn sweep<F>(&mut self, own: &Shape, lookup: F) -> Result<ShapeIds, GeometryError>
    where
        F: Fn(ShapeId) -> Option<Shape>,
    {
        let mut removed = ShapeIds::new();
        let mut kept = ShapeIds::new();
        for id in self.touching.drain(..) {
            let still = match lookup(id) {
                Some(other) => own.intersects(&other)?,
                None => false,
            };
            if still {
                kept.push(id);
            } else {
                removed.push(id);
            }
        }
        self.touching = kept;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{Rect, Vec2};

    #[test]
    fn fires_once_per_overlap_period() {
        let a = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut b = Shape::rect(Rect::new(5.0, 5.0, 10.0, 10.0));
        let mut set = Collisions::default();

        assert_eq!(set.check(&a, &b), Ok(true));
        assert_eq!(set.check(&a, &b), Ok(false));
        assert_eq!(set.sweep(&a, |_| Some(b)).map(|r| r.len()), Ok(0));
        assert_eq!(set.check(&a, &b), Ok(false));

        b.set_position(Vec2::new(50.0, 50.0));
        let removed = set.sweep(&a, |_| Some(b)).unwrap();
        assert_eq!(removed.as_slice(), &[b.id()]);
        assert!(set.is_empty());

        b.set_position(Vec2::new(10.0, 10.0));
        assert_eq!(set.check(&a, &b), Ok(true));
    }

    #[test]
    fn identity_not_geometry() {
        let a = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let twin = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut set = Collisions::default();
        assert_eq!(set.check(&a, &b), Ok(true));
        assert_eq!(set.check(&a, &twin), Ok(true));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn unresolvable_ids_are_swept() {
        let a = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Shape::rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut set = Collisions::default();
        set.check(&a, &b).unwrap();
        let removed = set.sweep(&a, |_| None).unwrap();
        assert_eq!(removed.len(), 1);
    }
}
