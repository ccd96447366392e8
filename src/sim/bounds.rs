//! Axis-aligned boxes and play field bounds
//!
//! Every entity collides through its AABB. Boxes are stored by center and
//! full size so rotated sprites can report the box of their rotated rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, MIN_AIM_DISTANCE};

/// An axis-aligned box given by its center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// The whole play field
    pub fn field() -> Self {
        Self::new(
            Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        )
    }

    /// Box of a `size` rectangle rotated by `degrees` around its center
    pub fn rotated(center: Vec2, size: Vec2, degrees: f32) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
        let w = size.x * cos + size.y * sin;
        let h = size.x * sin + size.y * cos;
        Self::new(center, Vec2::new(w, h))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.size / 2.0
    }

    /// Strict intersection; boxes that only touch do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Per-axis containment in the play field: (horizontal ok, vertical ok)
pub fn check_bound(rect: &Aabb) -> (bool, bool) {
    let (min, max) = (rect.min(), rect.max());
    let horizontal = min.x >= 0.0 && max.x <= FIELD_WIDTH;
    let vertical = min.y >= 0.0 && max.y <= FIELD_HEIGHT;
    (horizontal, vertical)
}

/// True when the box lies inside the field on both axes
#[inline]
pub fn in_bounds(rect: &Aabb) -> bool {
    check_bound(rect) == (true, true)
}

/// Unit vector from the center of `from` to the center of `to`
///
/// Coincident centers have no direction; they fall back to straight down.
pub fn aim(from: &Aabb, to: &Aabb) -> Vec2 {
    let diff = to.center - from.center;
    let dist = diff.length();
    if dist < MIN_AIM_DISTANCE {
        return Vec2::Y;
    }
    diff / dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bound_inside() {
        let rect = Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(20.0, 20.0));
        assert_eq!(check_bound(&rect), (true, true));
        assert!(in_bounds(&rect));
    }

    #[test]
    fn test_check_bound_per_axis() {
        let left = Aabb::new(Vec2::new(5.0, 100.0), Vec2::new(20.0, 20.0));
        assert_eq!(check_bound(&left), (false, true));

        let bottom = Aabb::new(Vec2::new(100.0, FIELD_HEIGHT - 5.0), Vec2::new(20.0, 20.0));
        assert_eq!(check_bound(&bottom), (true, false));

        let corner = Aabb::new(Vec2::new(FIELD_WIDTH, 0.0), Vec2::new(20.0, 20.0));
        assert_eq!(check_bound(&corner), (false, false));
    }

    #[test]
    fn test_check_bound_edges_are_inside() {
        // Flush against the field edge still counts as inside
        let rect = Aabb::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(in_bounds(&rect));
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let inside = Aabb::new(Vec2::new(9.0, 9.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_rotated_box() {
        let flat = Aabb::rotated(Vec2::ZERO, Vec2::new(40.0, 10.0), 0.0);
        assert!((flat.size - Vec2::new(40.0, 10.0)).length() < 1e-4);

        let upright = Aabb::rotated(Vec2::ZERO, Vec2::new(40.0, 10.0), 90.0);
        assert!((upright.size - Vec2::new(10.0, 40.0)).length() < 1e-3);

        let diagonal = Aabb::rotated(Vec2::ZERO, Vec2::new(10.0, 10.0), 45.0);
        let expected = 10.0 * std::f32::consts::SQRT_2;
        assert!((diagonal.size.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_aim_is_unit() {
        let from = Aabb::new(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let to = Aabb::new(Vec2::new(30.0, 40.0), Vec2::splat(50.0));
        let dir = aim(&from, &to);
        assert!((dir - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_aim_coincident_centers_falls_back_down() {
        let a = Aabb::new(Vec2::new(200.0, 200.0), Vec2::splat(10.0));
        let dir = aim(&a, &a);
        assert_eq!(dir, Vec2::Y);
        assert!(dir.is_finite());
    }
}
