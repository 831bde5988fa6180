//! Axis-aligned bounding box collision
//!
//! Every collision in the game is a box/box overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Overlap test; touching edges count as overlapping
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }
}

/// Whether a point lies more than `margin` outside the `[0,w]x[0,h]` arena
#[inline]
pub fn outside_arena(point: Vec2, arena_size: Vec2, margin: f32) -> bool {
    point.x < -margin
        || point.x > arena_size.x + margin
        || point.y < -margin
        || point.y > arena_size.y + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::from_center(Vec2::new(10.0, 10.0), Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(14.0, 12.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_overlap() {
        // a spans x 0..10, b spans x 10..20
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(a.overlaps(&b));

        // corner contact also counts
        let c = Aabb::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_separated() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.01, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.overlaps(&b));

        // overlapping on x only
        let c = Aabb::new(Vec2::new(5.0, 30.0), Vec2::new(15.0, 40.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_outside_arena() {
        let arena = Vec2::new(800.0, 600.0);
        assert!(!outside_arena(Vec2::new(0.0, 600.0), arena, 0.0));
        assert!(outside_arena(Vec2::new(-0.1, 300.0), arena, 0.0));
        assert!(!outside_arena(Vec2::new(-99.0, 300.0), arena, 100.0));
        assert!(outside_arena(Vec2::new(400.0, 701.0), arena, 100.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Aabb::from_center(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::from_center(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn box_overlaps_itself(x in -500.0f32..500.0, y in -500.0f32..500.0, w in 0.0f32..100.0) {
            let a = Aabb::from_center(Vec2::new(x, y), Vec2::splat(w));
            prop_assert!(a.overlaps(&a));
        }
    }
}
