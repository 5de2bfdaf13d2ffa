//! Planar convex hull by Andrew's monotone chain.

use crate::float_types::Real;
use geo::{Coord, LineString, Polygon as GeoPolygon};
use nalgebra::Point2;
use std::cmp::Ordering;

/// Convex polygon boundary, counter-clockwise, start point not repeated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hull2D {
    pub points: Vec<Point2<Real>>,
}

impl Hull2D {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Edges `(p_i, p_{i+1})`, wrapping back to the first point.
    pub fn edges(&self) -> impl Iterator<Item = (Point2<Real>, Point2<Real>)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// The hull as a `geo` polygon, for area and containment queries.
    pub fn to_geo(&self) -> GeoPolygon<Real> {
        let coords: Vec<Coord<Real>> = self
            .points
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        GeoPolygon::new(LineString::new(coords), Vec::new())
    }
}

/// z-component of `(a - o) × (b - o)`; positive for a left turn.
#[inline]
pub fn cross(o: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>) -> Real {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn lexicographic(a: &Point2<Real>, b: &Point2<Real>) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Indices into `points` of the convex hull boundary, counter-clockwise.
///
/// Exact duplicate points are collapsed; collinear boundary points are
/// excluded. With one or zero distinct points the (deduplicated) input is
/// returned unchanged.
pub fn convex_hull_2d_indices(points: &[Point2<Real>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| lexicographic(&points[a], &points[b]));
    order.dedup_by(|a, b| points[*a] == points[*b]);

    if order.len() <= 1 {
        return order;
    }

    let turns_left = |chain: &[usize], next: usize| {
        let k = chain.len();
        cross(&points[chain[k - 2]], &points[chain[k - 1]], &points[next]) > 0.0
    };

    let mut lower: Vec<usize> = Vec::with_capacity(order.len());
    for &idx in &order {
        while lower.len() >= 2 && !turns_left(&lower, idx) {
            lower.pop();
        }
        lower.push(idx);
    }

    let mut upper: Vec<usize> = Vec::with_capacity(order.len());
    for &idx in order.iter().rev() {
        while upper.len() >= 2 && !turns_left(&upper, idx) {
            upper.pop();
        }
        upper.push(idx);
    }

    // last point of each chain is the first of the other
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Convex hull of a planar point set (see [`convex_hull_2d_indices`]).
pub fn convex_hull_2d(points: &[Point2<Real>]) -> Hull2D {
    Hull2D {
        points: convex_hull_2d_indices(points)
            .into_iter()
            .map(|i| points[i])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_with_interior_and_edge_points() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 0.0), // collinear on the bottom edge
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 0.5), // interior
            Point2::new(1.0, 1.0), // duplicate
        ];
        let hull = convex_hull_2d(&pts);
        assert_eq!(
            hull.points,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn single_point_is_returned_unchanged() {
        let pts = [Point2::new(2.0, 3.0), Point2::new(2.0, 3.0)];
        assert_eq!(convex_hull_2d(&pts).points, vec![Point2::new(2.0, 3.0)]);
        assert!(convex_hull_2d(&[]).is_empty());
    }

    #[test]
    fn collinear_points_keep_endpoints() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(1.0, 1.0),
        ];
        let hull = convex_hull_2d(&pts);
        assert_eq!(hull.points, vec![Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)]);
    }
}
