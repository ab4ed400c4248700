//! Axis-aligned bounding boxes and overlap tests
//!
//! Every interaction in the arena (player/enemy contact damage, bullet hits,
//! coin pickup) resolves through the same strict AABB overlap predicate:
//! boxes that merely share an edge do not collide.

use glam::Vec2;

/// An axis-aligned bounding box, stored as min/max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build a box of the given width/height centered on a point
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Square box centered on a point
    pub fn from_center_square(center: Vec2, side: f32) -> Self {
        Self::from_center_size(center, Vec2::splat(side))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap on both axes
    ///
    /// Two boxes intersect only when they overlap with nonzero area, so
    /// touching edges do not count as a hit.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let x_overlap = self.min.x < other.max.x && self.max.x > other.min.x;
        let y_overlap = self.min.y < other.max.y && self.max.y > other.min.y;
        x_overlap && y_overlap
    }

    /// Point containment (min-inclusive, max-exclusive)
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::from_center_square(Vec2::new(0.0, 0.0), 32.0);
        let b = Aabb::from_center_square(Vec2::new(10.0, 10.0), 32.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_disjoint_boxes_do_not_intersect() {
        let a = Aabb::from_center_square(Vec2::new(0.0, 0.0), 32.0);
        let b = Aabb::from_center_square(Vec2::new(100.0, 0.0), 32.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_edge_touching_boxes_do_not_intersect() {
        // Boxes share the x=16 edge exactly - zero overlap area
        let a = Aabb::from_center_square(Vec2::new(0.0, 0.0), 32.0);
        let b = Aabb::from_center_square(Vec2::new(32.0, 0.0), 32.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_one_axis_overlap_is_not_enough() {
        // Overlap on x only
        let a = Aabb::from_center_square(Vec2::new(0.0, 0.0), 32.0);
        let b = Aabb::from_center_square(Vec2::new(10.0, 100.0), 32.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = Aabb::from_center_square(Vec2::new(0.0, 0.0), 100.0);
        let inner = Aabb::from_center_square(Vec2::new(5.0, -5.0), 10.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_from_center_size() {
        let b = Aabb::from_center_size(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(b.min, Vec2::new(8.0, 17.0));
        assert_eq!(b.max, Vec2::new(12.0, 23.0));
        assert_eq!(b.center(), Vec2::new(10.0, 20.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
    }

    #[test]
    fn test_contains_point() {
        let b = Aabb::from_center_square(Vec2::ZERO, 10.0);
        assert!(b.contains_point(Vec2::new(0.0, 0.0)));
        assert!(b.contains_point(Vec2::new(-5.0, -5.0)));
        assert!(!b.contains_point(Vec2::new(5.0, 5.0)));
        assert!(!b.contains_point(Vec2::new(6.0, 0.0)));
    }
}
