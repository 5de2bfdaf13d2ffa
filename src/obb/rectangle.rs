//! Minimum-area enclosing rectangle by rotating calipers.
//!
//! The minimum-area rectangle enclosing a convex polygon has one side flush
//! with a polygon edge, so only `hull.len()` orientations are tried.

use crate::float_types::Real;
use crate::hull::Hull2D;
use nalgebra::Point2;

/// An enclosing rectangle, measured in a frame rotated by `angle`.
///
/// A point `(a, b)` maps to `(cos·a + sin·b, −sin·a + cos·b)` in that frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub angle: Real,
    pub min_x: Real,
    pub max_x: Real,
    pub min_y: Real,
    pub max_y: Real,
}

impl Rectangle {
    pub fn width(&self) -> Real {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> Real {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> Real {
        self.width() * self.height()
    }

    /// Axis-aligned extents of `points` after rotating them by `-angle`.
    pub fn measure(points: &[Point2<Real>], angle: Real) -> Rectangle {
        let (sin, cos) = angle.sin_cos();
        let mut rect = Rectangle {
            angle,
            min_x: Real::INFINITY,
            max_x: Real::NEG_INFINITY,
            min_y: Real::INFINITY,
            max_y: Real::NEG_INFINITY,
        };
        for p in points {
            let x = cos * p.x + sin * p.y;
            let y = -sin * p.x + cos * p.y;
            rect.min_x = rect.min_x.min(x);
            rect.max_x = rect.max_x.max(x);
            rect.min_y = rect.min_y.min(y);
            rect.max_y = rect.max_y.max(y);
        }
        rect
    }
}

/// Smallest-area rectangle around `points` with a side parallel to an edge of `hull`.
///
/// `hull` must be the convex hull of `points`. Returns `None` when the hull
/// has fewer than two points. Ties keep the earliest edge.
pub fn min_area_rectangle(hull: &Hull2D, points: &[Point2<Real>]) -> Option<Rectangle> {
    if hull.len() < 2 {
        return None;
    }

    let mut best: Option<Rectangle> = None;
    for (p_i, p_j) in hull.edges() {
        let angle = (p_j.y - p_i.y).atan2(p_j.x - p_i.x);
        let rect = Rectangle::measure(points, angle);
        if best.is_none_or(|b| rect.area() < b.area()) {
            best = Some(rect);
        }
    }
    best
}
