//! World-space hull records for a mesh object.

use super::hull3d::convex_hull_3d;
use crate::config::Tolerances;
use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::mesh::{Mesh, Transform};
use nalgebra::{Point3, Unit, Vector3};

/// One hull face in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct HullFace {
    /// Outward unit normal.
    pub normal: Unit<Vector3<Real>>,
    /// Face polygon, counter-clockwise about `normal`.
    pub vertices: Vec<Point3<Real>>,
}

/// The convex hull of an object, expressed in world space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldHull {
    /// Hull boundary vertices.
    pub points: Vec<Point3<Real>>,
    pub faces: Vec<HullFace>,
}

/// Build the convex hull of `mesh` in its local space and carry the result
/// into world space through `transform`.
///
/// Normals go through the transform's normal matrix and are renormalized.
/// Under a rigid transform the normal matrix equals the linear part, so this
/// is the same as rotating the local normal. The two differ only under
/// non-uniform scale or shear.
pub fn world_hull(
    mesh: &Mesh,
    transform: &Transform,
    tolerances: &Tolerances,
) -> Result<WorldHull, GeometryError> {
    mesh.validate()?;
    let hull = convex_hull_3d(&mesh.vertices, tolerances)?;

    let points = hull
        .points
        .iter()
        .map(|p| transform.transform_point(p))
        .collect();

    let faces = hull
        .faces
        .iter()
        .map(|face| {
            let normal = transform
                .transform_normal(&face.normal)
                .ok_or(GeometryError::SingularTransform)?;
            let vertices = face
                .vertices
                .iter()
                .map(|&i| transform.transform_point(&hull.points[i]))
                .collect();
            Ok(HullFace { normal, vertices })
        })
        .collect::<Result<Vec<_>, GeometryError>>()?;

    Ok(WorldHull { points, faces })
}
