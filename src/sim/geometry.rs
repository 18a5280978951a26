//! Axis-aligned rectangles and circle overlap tests
//!
//! Playfield coordinates: origin at the top-left, +y points down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Standard AABB overlap test; touching edges do not count
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Two circles overlap when their centers are closer than the sum of radii
#[inline]
pub fn circles_overlap(a_center: Vec2, a_radius: f32, b_center: Vec2, b_radius: f32) -> bool {
    a_center.distance(b_center) < a_radius + b_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(aabb_overlap(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(aabb_overlap(&a, &Rect::new(2.0, 2.0, 2.0, 2.0)));
        assert!(!aabb_overlap(&a, &Rect::new(20.0, 0.0, 5.0, 5.0)));
        assert!(!aabb_overlap(&a, &Rect::new(0.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!aabb_overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!aabb_overlap(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(8.0, 8.0), 5.0));
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(150.0, 250.0, 30.0, 30.0);
        assert_eq!(r.center(), Vec2::new(165.0, 265.0));
        assert_eq!(r.right(), 180.0);
        assert_eq!(r.bottom(), 280.0);
    }
}
