use crate::mesh::Mesh;
use crate::obb::CollisionBox;
use crate::triangulated::Triangulated3D;
use nalgebra::Vector3;
use std::fmt::Write as _;

/// Convert a triangulated shape to an **ASCII STL** string with the given `name`.
///
/// Facet normals are recomputed from each triangle's winding.
///
/// ```rust
/// # use hullbox::mesh::Mesh;
/// let mesh = Mesh::cube(1.0);
/// let text = mesh.to_stl_ascii("my_solid");
/// assert!(text.starts_with("solid my_solid"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");

    shape.visit_triangles(|tri| {
        let n = (tri[1] - tri[0])
            .cross(&(tri[2] - tri[0]))
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros);
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for p in &tri {
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
}

impl CollisionBox {
    /// Local-space box as ASCII STL.
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
}
