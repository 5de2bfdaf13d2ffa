//! Minimal Wavefront OBJ exchange.
//!
//! Only geometry is read: `v` positions and `f` faces (`i`, `i/t`, `i//n`,
//! `i/t/n`, negative indices counted from the end). `o` and `g` records
//! split the file into parts, which is how decomposition tools emit one
//! convex hull per object. Everything else is ignored.

use super::IoError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use nalgebra::Point3;
use std::fmt::Write as _;
use std::path::Path;

/// Serialize `mesh` as OBJ text, optionally under an `o <name>` record.
pub fn to_obj(mesh: &Mesh, name: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("# hullbox\n");
    if let Some(name) = name {
        let _ = writeln!(out, "o {name}");
    }
    for p in &mesh.vertices {
        let _ = writeln!(out, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z);
    }
    for face in &mesh.faces {
        out.push('f');
        for idx in face {
            let _ = write!(out, " {}", idx + 1);
        }
        out.push('\n');
    }
    out
}

pub fn write_obj(path: impl AsRef<Path>, mesh: &Mesh, name: Option<&str>) -> Result<(), IoError> {
    std::fs::write(path, to_obj(mesh, name))?;
    Ok(())
}

/// Parse OBJ text into one mesh per `o`/`g` group.
///
/// Vertex indices in OBJ are global to the file; each returned part gets its
/// own compact vertex list. Groups without faces are dropped.
pub fn parse_obj_parts(text: &str) -> Result<Vec<Mesh>, IoError> {
    let mut positions: Vec<Point3<Real>> = Vec::new();
    // faces per part, as global zero-based indices
    let mut parts: Vec<Vec<Vec<usize>>> = vec![Vec::new()];

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };
        let malformed = |msg: String| IoError::MalformedInput {
            line: line_no + 1,
            msg,
        };

        match tag {
            "v" => {
                let coords: Vec<Real> = tokens
                    .take(3)
                    .map(|t| t.parse::<Real>())
                    .collect::<Result<_, _>>()?;
                let &[x, y, z] = coords.as_slice() else {
                    return Err(malformed("vertex needs three coordinates".into()));
                };
                positions.push(Point3::new(x, y, z));
            },
            "f" => {
                let mut face = Vec::new();
                for token in tokens {
                    let index_text = token.split('/').next().unwrap_or("");
                    let index: i64 = index_text.parse()?;
                    let resolved = match index {
                        i if i > 0 => i - 1,
                        i if i < 0 => positions.len() as i64 + i,
                        _ => return Err(malformed("face index 0 is invalid".into())),
                    };
                    if resolved < 0 || resolved as usize >= positions.len() {
                        return Err(malformed(format!(
                            "face index {index} does not refer to a vertex defined so far"
                        )));
                    }
                    face.push(resolved as usize);
                }
                if face.len() < 3 {
                    return Err(malformed("face needs at least three vertices".into()));
                }
                if let Some(current) = parts.last_mut() {
                    current.push(face);
                }
            },
            "o" | "g" => {
                if parts.last().is_some_and(|p| !p.is_empty()) {
                    parts.push(Vec::new());
                }
            },
            _ => {},
        }
    }

    Ok(parts
        .into_iter()
        .filter(|faces| !faces.is_empty())
        .map(|faces| compact(&positions, faces))
        .collect())
}

/// Parse OBJ text into a single mesh, ignoring grouping.
pub fn parse_obj(text: &str) -> Result<Mesh, IoError> {
    let parts = parse_obj_parts(text)?;
    Ok(Mesh::merge(parts.iter()))
}

pub fn read_obj(path: impl AsRef<Path>) -> Result<Mesh, IoError> {
    parse_obj(&std::fs::read_to_string(path)?)
}

pub fn read_obj_parts(path: impl AsRef<Path>) -> Result<Vec<Mesh>, IoError> {
    parse_obj_parts(&std::fs::read_to_string(path)?)
}

fn compact(positions: &[Point3<Real>], faces: Vec<Vec<usize>>) -> Mesh {
    let mut remap: hashbrown::HashMap<usize, usize> = hashbrown::HashMap::new();
    let mut vertices = Vec::new();
    let faces = faces
        .into_iter()
        .map(|face| {
            face.into_iter()
                .map(|global| {
                    *remap.entry(global).or_insert_with(|| {
                        vertices.push(positions[global]);
                        vertices.len() - 1
                    })
                })
                .collect()
        })
        .collect();
    Mesh::from_parts(vertices, faces)
}

impl Mesh {
    pub fn to_obj(&self, name: Option<&str>) -> String {
        self::to_obj(self, name)
    }
}
