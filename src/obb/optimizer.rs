//! Minimum-volume box search over hull face directions.

use super::BoxCandidate;
use super::rectangle::min_area_rectangle;
use crate::config::Tolerances;
use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::hull::{HullFace, convex_hull_2d};
use nalgebra::{Point2, Point3, Unit, Vector3};
use tracing::debug;

/// Bookkeeping of one search, for diagnostics and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FitReport {
    /// Hull faces offered to the search.
    pub faces: usize,
    /// Directions for which the rectangle search actually ran.
    pub evaluated_directions: usize,
    /// Faces skipped because their normal repeats an earlier direction.
    pub duplicate_directions: usize,
    /// Faces skipped because no tangent frame could be built.
    pub degenerate_faces: usize,
    /// Rectangle orientations measured across all directions.
    pub orientations_tested: usize,
}

/// Winning candidate plus the origin its coordinates are relative to.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxFit {
    pub candidate: BoxCandidate,
    /// World point subtracted from every hull point before projection.
    pub origin: Point3<Real>,
    pub report: FitReport,
}

/// Search the orientation of the smallest box around `points`.
///
/// Every hull face contributes its normal as a candidate box axis; the two
/// remaining axes come from the minimum-area rectangle of the points
/// projected onto the face plane. Coordinates are taken relative to `origin`
/// (normally the object's world position) to keep the projections well
/// conditioned. Directions already seen (`|dot| > duplicate_normal_dot`) are
/// skipped, and so are faces whose first edge collapses when projected onto
/// the plane. Ties keep the first candidate found.
pub fn fit_min_volume_box(
    points: &[Point3<Real>],
    faces: &[HullFace],
    origin: &Point3<Real>,
    tolerances: &Tolerances,
) -> Result<BoxFit, GeometryError> {
    let centered: Vec<Vector3<Real>> = points.iter().map(|p| p - origin).collect();
    let duplicate_dot = tolerances.duplicate_normal_dot();
    let tangent_floor = tolerances.degenerate_tangent();

    let mut report = FitReport {
        faces: faces.len(),
        ..FitReport::default()
    };
    let mut candidate_normals: Vec<Unit<Vector3<Real>>> = Vec::new();
    let mut best: Option<BoxCandidate> = None;

    for face in faces {
        let n = face.normal;
        if candidate_normals
            .iter()
            .any(|cn| cn.dot(&*n).abs() > duplicate_dot)
        {
            report.duplicate_directions += 1;
            continue;
        }
        // the direction counts as seen even if this face turns out degenerate
        candidate_normals.push(n);

        let [v0, v1, ..] = face.vertices.as_slice() else {
            report.degenerate_faces += 1;
            continue;
        };
        let edge = v1 - v0;
        let tangent = edge - n.into_inner() * edge.dot(&*n);
        if tangent.norm() < tangent_floor {
            report.degenerate_faces += 1;
            continue;
        }
        let u = tangent.normalize();
        let v = n.cross(&u).normalize();

        let mut projected = Vec::with_capacity(centered.len());
        let mut min_z = Real::INFINITY;
        let mut max_z = Real::NEG_INFINITY;
        for p in &centered {
            projected.push(Point2::new(p.dot(&u), p.dot(&v)));
            let c = p.dot(&*n);
            min_z = min_z.min(c);
            max_z = max_z.max(c);
        }
        let depth = max_z - min_z;

        let hull = convex_hull_2d(&projected);
        let Some(rect) = min_area_rectangle(&hull, &projected) else {
            report.degenerate_faces += 1;
            continue;
        };
        report.evaluated_directions += 1;
        report.orientations_tested += hull.len();

        let volume = rect.area() * depth;
        debug!(
            normal = ?n.into_inner(),
            angle = rect.angle,
            volume,
            "candidate direction evaluated"
        );

        if best.as_ref().is_none_or(|b| volume < b.volume) {
            best = Some(BoxCandidate {
                u,
                v,
                n: n.into_inner(),
                angle: rect.angle,
                min_x: rect.min_x,
                max_x: rect.max_x,
                min_y: rect.min_y,
                max_y: rect.max_y,
                min_z,
                max_z,
                volume,
            });
        }
    }

    let candidate = best.ok_or(GeometryError::NoFittingBox {
        directions: candidate_normals.len(),
    })?;

    Ok(BoxFit {
        candidate,
        origin: *origin,
        report,
    })
}
