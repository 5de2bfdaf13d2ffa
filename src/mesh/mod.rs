//! Indexed `Mesh` input type and scene object identity.

use crate::errors::GeometryError;
use crate::float_types::{
    Real,
    parry3d::bounding_volume::Aabb,
};
use crate::triangulated::Triangulated3D;
use nalgebra::Point3;
use std::fmt;

pub mod shapes;
pub mod transform;

pub use transform::Transform;

/// Polygonal mesh in object-local space.
///
/// Faces are index lists into `vertices`, counter-clockwise when seen from
/// outside. The kernel only reads meshes.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Point3<Real>>,
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    pub const fn new() -> Self {
        Mesh {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Build a Mesh from a vertex list and face index lists
    pub fn from_parts(vertices: Vec<Point3<Real>>, faces: Vec<Vec<usize>>) -> Self {
        Mesh { vertices, faces }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check the structural rules the kernel relies on: at least one vertex,
    /// finite coordinates, faces with three or more in-range indices.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.is_empty() {
            return Err(GeometryError::InvalidMesh("mesh has no vertices".into()));
        }
        if let Some(bad) = self
            .vertices
            .iter()
            .find(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(GeometryError::InvalidCoordinate(*bad));
        }
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(GeometryError::InvalidMesh(format!(
                    "face {face_idx} has {} indices, need at least 3",
                    face.len()
                )));
            }
            if let Some(&idx) = face.iter().find(|&&idx| idx >= self.vertices.len()) {
                return Err(GeometryError::InvalidMesh(format!(
                    "face {face_idx} index {idx} is out of range (vertices.len = {})",
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }

    /// Returns an [`Aabb`] containing every vertex, computed from the current
    /// vertices. An empty mesh gives a degenerate box at the origin.
    pub fn bounding_box(&self) -> Aabb {
        point_cloud_aabb(&self.vertices)
            .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()))
    }

    /// Apply `transform` to every vertex, returning a new mesh with the same faces.
    pub fn transformed(&self, transform: &Transform) -> Mesh {
        Mesh::from_parts(
            self.vertices
                .iter()
                .map(|p| transform.transform_point(p))
                .collect(),
            self.faces.clone(),
        )
    }

    /// Concatenate several meshes into one, re-basing face indices.
    pub fn merge<'a>(parts: impl IntoIterator<Item = &'a Mesh>) -> Mesh {
        let mut merged = Mesh::new();
        for part in parts {
            let base = merged.vertices.len();
            merged.vertices.extend_from_slice(&part.vertices);
            merged
                .faces
                .extend(part.faces.iter().map(|f| f.iter().map(|i| i + base).collect()));
        }
        merged
    }
}

impl Triangulated3D for Mesh {
    /// Fan-triangulates each face. Faces with an out-of-range index are skipped.
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Point3<Real>; 3]),
    {
        for face in &self.faces {
            let Some(corners) = face
                .iter()
                .map(|&i| self.vertices.get(i).copied())
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            for k in 1..corners.len().saturating_sub(1) {
                f([corners[0], corners[k], corners[k + 1]]);
            }
        }
    }
}

/// Smallest axis-aligned box around `points`, or `None` for an empty slice.
pub fn point_cloud_aabb(points: &[Point3<Real>]) -> Option<Aabb> {
    let (first, rest) = points.split_first()?;
    let (mins, maxs) = rest
        .iter()
        .fold((*first, *first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
    Some(Aabb::new(mins, maxs))
}

/// Opaque identity of an object owned by the host scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mesh object as the host scene presents it to the kernel.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub mesh: Mesh,
    pub transform: Transform,
}

impl SceneObject {
    pub fn new(id: ObjectId, name: impl Into<String>, mesh: Mesh, transform: Transform) -> Self {
        SceneObject {
            id,
            name: name.into(),
            mesh,
            transform,
        }
    }
}
