//! Spatial convex hull with outward polygon faces.
//!
//! Triangulation is delegated to `chull`; this module adds what the box search
//! needs on top of it: near-duplicate removal, an explicit degeneracy check,
//! consistent outward orientation, and merging of coplanar triangles into a
//! single polygon so each supporting plane yields exactly one face normal.

use super::hull2d::convex_hull_2d_indices;
use crate::config::Tolerances;
use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use crate::mesh::point_cloud_aabb;
use chull::ConvexHullWrapper;
use hashbrown::HashMap;
use nalgebra::{Point2, Point3, Unit, Vector3};
use tracing::debug;

/// A planar face of a [`ConvexHull3`].
#[derive(Clone, Debug, PartialEq)]
pub struct HullPolygon {
    /// Outward unit normal.
    pub normal: Unit<Vector3<Real>>,
    /// Signed distance of the supporting plane from the origin along `normal`.
    pub offset: Real,
    /// Indices into [`ConvexHull3::points`], counter-clockwise about `normal`.
    pub vertices: Vec<usize>,
}

/// Convex hull of a 3D point set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexHull3 {
    /// Input points lying on the hull boundary.
    pub points: Vec<Point3<Real>>,
    pub faces: Vec<HullPolygon>,
}

impl ConvexHull3 {
    pub fn face_points(&self, face: &HullPolygon) -> Vec<Point3<Real>> {
        face.vertices.iter().map(|&i| self.points[i]).collect()
    }

    pub fn centroid(&self) -> Point3<Real> {
        centroid(&self.points)
    }

    /// Enclosed volume, by summing tetrahedra against the centroid.
    pub fn volume(&self) -> Real {
        let c = self.centroid();
        let mut volume = 0.0;
        for face in &self.faces {
            let pts = self.face_points(face);
            for k in 1..pts.len().saturating_sub(1) {
                volume += (pts[0] - c).dot(&(pts[k] - c).cross(&(pts[k + 1] - c))) / 6.0;
            }
        }
        volume
    }
}

fn centroid(points: &[Point3<Real>]) -> Point3<Real> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as Real)
}

/// Length of the bounding-box diagonal, floored at 1 so tolerances stay
/// absolute for small models.
fn extent_scale(points: &[Point3<Real>]) -> Real {
    point_cloud_aabb(points).map_or(1.0, |aabb| aabb.extents().norm().max(1.0))
}

/// Drop points within `merge` of an earlier point (grid-quantized).
fn dedup_points(points: &[Point3<Real>], merge: Real) -> Vec<Point3<Real>> {
    let cell = merge.max(Real::EPSILON);
    let mut seen: HashMap<(i64, i64, i64), ()> = HashMap::with_capacity(points.len());
    let mut unique = Vec::with_capacity(points.len());
    for p in points {
        let key = (
            (p.x / cell).round() as i64,
            (p.y / cell).round() as i64,
            (p.z / cell).round() as i64,
        );
        if seen.insert(key, ()).is_none() {
            unique.push(*p);
        }
    }
    unique
}

/// Confirm the set spans 3D: find a non-degenerate tetrahedron.
fn check_independence(points: &[Point3<Real>], eps: Real) -> Result<(), GeometryError> {
    let degenerate = |reason: &str| GeometryError::DegenerateInput {
        reason: reason.to_string(),
        distinct: points.len(),
    };

    if points.len() < 4 {
        return Err(degenerate("need at least 4 distinct points"));
    }

    let p0 = points[0];
    let (p1, d1) = points
        .iter()
        .map(|p| (*p, (p - p0).norm()))
        .fold((p0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });
    if d1 <= eps {
        return Err(degenerate("all points coincide"));
    }

    let axis = (p1 - p0) / d1;
    let (p2, d2) = points
        .iter()
        .map(|p| {
            let r = p - p0;
            (*p, (r - axis * r.dot(&axis)).norm())
        })
        .fold((p0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });
    if d2 <= eps {
        return Err(degenerate("all points are collinear"));
    }

    let normal = (p1 - p0).cross(&(p2 - p0)).normalize();
    let d3 = points
        .iter()
        .map(|p| (p - p0).dot(&normal).abs())
        .fold(0.0, Real::max);
    if d3 <= eps {
        return Err(degenerate("all points are coplanar"));
    }
    Ok(())
}

/// Orthonormal `(u, v)` spanning the plane with normal `n`, with `u × v = n`.
pub fn plane_basis(n: &Unit<Vector3<Real>>) -> (Vector3<Real>, Vector3<Real>) {
    let helper = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = n.cross(&helper).normalize();
    let v = n.cross(&u);
    (u, v)
}

struct PlaneGroup {
    normal: Unit<Vector3<Real>>,
    offset: Real,
    vertices: Vec<usize>,
}

/// Convex hull of `points`.
///
/// Requires at least four affinely independent points; otherwise returns
/// [`GeometryError::DegenerateInput`] and nothing else.
pub fn convex_hull_3d(
    points: &[Point3<Real>],
    tolerances: &Tolerances,
) -> Result<ConvexHull3, GeometryError> {
    let scale = extent_scale(points);
    let unique = dedup_points(points, tolerances.point_merge() * scale);
    check_independence(&unique, tolerances.coplanar() * scale)?;

    let points_for_hull: Vec<Vec<Real>> = unique.iter().map(|p| vec![p.x, p.y, p.z]).collect();
    let hull = ConvexHullWrapper::try_new(&points_for_hull, None)
        .map_err(|e| GeometryError::Hull(format!("{e:?}")))?;
    let (verts, indices) = hull.vertices_indices();
    let verts: Vec<Point3<Real>> = verts
        .iter()
        .map(|v| Point3::new(v[0], v[1], v[2]))
        .collect();
    let center = centroid(&verts);

    let angular = tolerances.coplanar();
    let distance = tolerances.coplanar() * scale;
    let mut groups: Vec<PlaneGroup> = Vec::new();

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (verts[tri[0]], verts[tri[1]], verts[tri[2]]);
        let raw = (b - a).cross(&(c - a));
        let Some(mut normal) = Unit::try_new(raw, EPSILON * EPSILON) else {
            continue;
        };
        if normal.dot(&(a - center)) < 0.0 {
            normal = -normal;
        }
        let offset = normal.dot(&a.coords);

        let group = groups.iter_mut().find(|g| {
            g.normal.dot(&*normal) > 1.0 - angular && (g.offset - offset).abs() <= distance
        });
        match group {
            Some(g) => {
                for &i in tri {
                    if !g.vertices.contains(&i) {
                        g.vertices.push(i);
                    }
                }
            },
            None => groups.push(PlaneGroup {
                normal,
                offset,
                vertices: tri.to_vec(),
            }),
        }
    }

    // keep only vertices that bound a face, in their original order
    let mut remap: Vec<Option<usize>> = vec![None; verts.len()];
    let mut used: Vec<usize> = groups.iter().flat_map(|g| g.vertices.iter().copied()).collect();
    used.sort_unstable();
    used.dedup();
    let mut hull_points = Vec::with_capacity(used.len());
    for &i in &used {
        remap[i] = Some(hull_points.len());
        hull_points.push(verts[i]);
    }

    let mut faces = Vec::with_capacity(groups.len());
    for group in groups {
        let (u, v) = plane_basis(&group.normal);
        let projected: Vec<Point2<Real>> = group
            .vertices
            .iter()
            .map(|&i| {
                let p = verts[i].coords;
                Point2::new(p.dot(&u), p.dot(&v))
            })
            .collect();
        let ring: Vec<usize> = convex_hull_2d_indices(&projected)
            .into_iter()
            .filter_map(|k| remap[group.vertices[k]])
            .collect();
        if ring.len() < 3 {
            continue;
        }
        faces.push(HullPolygon {
            normal: group.normal,
            offset: group.offset,
            vertices: ring,
        });
    }

    debug!(
        input = points.len(),
        distinct = unique.len(),
        hull_points = hull_points.len(),
        faces = faces.len(),
        "convex hull built"
    );

    if faces.len() < 4 {
        return Err(GeometryError::DegenerateInput {
            reason: format!("hull has only {} faces", faces.len()),
            distinct: unique.len(),
        });
    }

    Ok(ConvexHull3 {
        points: hull_points,
        faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_merges_near_points() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1e-12, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        assert_eq!(dedup_points(&pts, 1e-9).len(), 2);
    }

    #[test]
    fn independence_reports_reason() {
        let square = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        match check_independence(&square, 1e-9) {
            Err(GeometryError::DegenerateInput { reason, distinct }) => {
                assert!(reason.contains("coplanar"));
                assert_eq!(distinct, 4);
            },
            other => panic!("expected degenerate input, got {other:?}"),
        }
    }

    #[test]
    fn plane_basis_is_right_handed() {
        let n = Unit::new_normalize(Vector3::new(0.3, -0.2, 0.9));
        let (u, v) = plane_basis(&n);
        assert!((u.cross(&v) - n.into_inner()).norm() < 1e-12);
        assert!(u.dot(&*n).abs() < 1e-12);
    }
}
