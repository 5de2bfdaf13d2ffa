//! Test support library
//! Fixtures and float helpers shared by the integration tests.
#![allow(dead_code)]

use hullbox::{
    float_types::Real,
    mesh::{Mesh, ObjectId, SceneObject},
    Transform,
};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// The eight corners of the unit cube `[0, 1]^3`.
pub fn unit_cube_points() -> Vec<Point3<Real>> {
    let mut points = Vec::with_capacity(8);
    for x in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                points.push(Point3::new(x, y, z));
            }
        }
    }
    points
}

/// A single planar quad, which has no volume.
pub fn flat_quad() -> Mesh {
    Mesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3]],
    )
}

/// Volume of the axis-aligned bounding box of `points`.
pub fn aabb_volume(points: &[Point3<Real>]) -> Real {
    let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
    let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
    for p in points {
        mins = mins.inf(p);
        maxs = maxs.sup(p);
    }
    let d: Vector3<Real> = maxs - mins;
    d.x * d.y * d.z
}

pub fn object(id: u64, name: &str, mesh: Mesh) -> SceneObject {
    SceneObject::new(ObjectId(id), name, mesh, Transform::identity())
}
