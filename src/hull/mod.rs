//! Convex hulls: planar, spatial, and world-space hull extraction for objects.

pub mod extract;
pub mod hull2d;
pub mod hull3d;

pub use extract::{HullFace, WorldHull, world_hull};
pub use hull2d::{Hull2D, convex_hull_2d};
pub use hull3d::{ConvexHull3, HullPolygon, convex_hull_3d};
