//! Minimum-volume oriented bounding boxes for collision meshes.
//!
//! The pipeline is
//!
//! ```text
//! Mesh + Transform
//!   └─ hull::world_hull            world-space hull points and faces
//!       └─ optimizer::fit_min_volume_box
//!            per face direction: tangent frame → 2D hull → rectangle search
//!           └─ reconstruct::reconstruct_box
//!                8 local-space corners + BOX_FACES
//! ```
//!
//! [`fit_collision_box`] runs all of it.

use crate::config::FitOptions;
use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::hull::world_hull;
use crate::mesh::{Mesh, Transform};
use crate::triangulated::Triangulated3D;
use nalgebra::{Point3, Unit, Vector3};

pub mod optimizer;
pub mod rectangle;
pub mod reconstruct;

pub use optimizer::{BoxFit, FitReport, fit_min_volume_box};
pub use rectangle::{Rectangle, min_area_rectangle};
pub use reconstruct::reconstruct_box;

/// Quad faces of a box whose corners are enumerated x-outer, y-middle,
/// z-inner with the negative offset first (corner index `4x + 2y + z`).
pub const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 3, 2],
    [4, 6, 7, 5],
    [0, 2, 6, 4],
    [1, 5, 7, 3],
    [0, 4, 5, 1],
    [2, 3, 7, 6],
];

/// One orientation tried by the box search.
///
/// `u`, `v`, `n` form a right-handed orthonormal frame with `n` a hull face
/// normal. The extents are measured along the frame rotated by `angle`
/// about `n` (see [`BoxCandidate::axes`]), relative to the fit origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxCandidate {
    pub u: Vector3<Real>,
    pub v: Vector3<Real>,
    pub n: Vector3<Real>,
    pub angle: Real,
    pub min_x: Real,
    pub max_x: Real,
    pub min_y: Real,
    pub max_y: Real,
    pub min_z: Real,
    pub max_z: Real,
    pub volume: Real,
}

impl BoxCandidate {
    /// Final box axes: `u` and `v` rotated by `angle` within their plane, then `n`.
    pub fn axes(&self) -> [Vector3<Real>; 3] {
        let (sin, cos) = self.angle.sin_cos();
        [
            self.u * cos + self.v * sin,
            -self.u * sin + self.v * cos,
            self.n,
        ]
    }

    /// Box center in candidate coordinates.
    pub fn center(&self) -> Point3<Real> {
        Point3::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    pub fn half_extents(&self) -> Vector3<Real> {
        Vector3::new(
            (self.max_x - self.min_x) / 2.0,
            (self.max_y - self.min_y) / 2.0,
            (self.max_z - self.min_z) / 2.0,
        )
    }

    /// Box center in world space for a fit taken relative to `origin`.
    pub fn world_center(&self, origin: &Point3<Real>) -> Point3<Real> {
        let [a, b, n] = self.axes();
        let c = self.center();
        origin + a * c.x + b * c.y + n * c.z
    }
}

/// Final collision box, expressed in the local space of its owner.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionBox {
    /// Corners in the owner's local space, ordered for [`BOX_FACES`].
    pub corners: [Point3<Real>; 8],
    pub faces: [[usize; 4]; 6],
    /// The owner's world transform, unchanged.
    pub transform: Transform,
    pub volume: Real,
    /// World-space center.
    pub center: Point3<Real>,
    /// World-space box axes after frame correction.
    pub axes: [Unit<Vector3<Real>>; 3],
    pub half_extents: Vector3<Real>,
    pub report: FitReport,
}

impl CollisionBox {
    pub fn world_corners(&self) -> [Point3<Real>; 8] {
        self.corners.map(|p| self.transform.transform_point(&p))
    }

    /// Mean of the corners in world space.
    pub fn world_centroid(&self) -> Point3<Real> {
        let sum = self
            .world_corners()
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / 8.0)
    }

    /// The box as a local-space mesh, ready for a scene host.
    pub fn to_mesh(&self) -> Mesh {
        Mesh::from_parts(
            self.corners.to_vec(),
            self.faces.iter().map(|f| f.to_vec()).collect(),
        )
    }
}

impl Triangulated3D for CollisionBox {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Point3<Real>; 3]),
    {
        for [a, b, c, d] in self.faces {
            f([self.corners[a], self.corners[b], self.corners[c]]);
            f([self.corners[a], self.corners[c], self.corners[d]]);
        }
    }
}

/// Fit the minimum-volume box around `mesh` placed by `transform`.
pub fn fit_collision_box(
    mesh: &Mesh,
    transform: &Transform,
    options: &FitOptions,
) -> Result<CollisionBox, GeometryError> {
    let hull = world_hull(mesh, transform, &options.tolerances)?;
    let fit = fit_min_volume_box(
        &hull.points,
        &hull.faces,
        &transform.origin(),
        &options.tolerances,
    )?;
    reconstruct_box(&fit, transform, options.frame_correction)
}
