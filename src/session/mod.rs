//! Batch collision generation against a host scene.
//!
//! A [`CollisionSession`] owns the preferences, the typed links between
//! source objects and their collision objects, and the diagnostics of the
//! objects that failed. The host scene is reached only through
//! [`SceneHost`].

use crate::config::Preferences;
use crate::decompose::ConvexDecomposer;
use crate::errors::{DecompositionError, SessionError};
use crate::io::obj::{read_obj_parts, write_obj};
use crate::mesh::{Mesh, ObjectId, SceneObject, Transform};
use crate::obb::fit_collision_box;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub mod registry;

pub use registry::{CollisionKind, CollisionLinks, CollisionRegistry};

/// A mesh object the session asks the host to add to its scene.
#[derive(Clone, Debug)]
pub struct MeshObjectRequest {
    pub name: String,
    /// Geometry in the local space of `transform`.
    pub mesh: Mesh,
    pub transform: Transform,
    pub source: ObjectId,
    pub kind: CollisionKind,
}

/// The part of a host application the session writes to.
pub trait SceneHost {
    /// Add a mesh object and return its identity.
    fn create_mesh_object(&mut self, request: MeshObjectRequest) -> Result<ObjectId, SessionError>;
}

/// Why one object produced no collision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub object: ObjectId,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct CollisionSession {
    prefs: Preferences,
    registry: CollisionRegistry,
    diagnostics: Vec<Diagnostic>,
}

impl CollisionSession {
    pub fn new(prefs: Preferences) -> Self {
        CollisionSession {
            prefs,
            registry: CollisionRegistry::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn registry(&self) -> &CollisionRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the diagnostics collected so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Fit a minimum-volume box around `object` and add it to the host as
    /// `<name>_collision`.
    pub fn create_obb(
        &mut self,
        host: &mut dyn SceneHost,
        object: &SceneObject,
    ) -> Result<ObjectId, SessionError> {
        if self.registry.is_collision_output(object.id) {
            return Err(SessionError::AlreadyCollision(object.id));
        }
        let fitted = fit_collision_box(&object.mesh, &object.transform, &self.prefs.fit)?;
        let request = MeshObjectRequest {
            name: collision_name(&object.name),
            mesh: fitted.to_mesh(),
            transform: object.transform,
            source: object.id,
            kind: CollisionKind::Obb,
        };
        let created = host.create_mesh_object(request)?;
        self.registry.link(object.id, created, CollisionKind::Obb);
        info!(
            object = %object.name,
            volume = fitted.volume,
            directions = fitted.report.evaluated_directions,
            "created collision box"
        );
        Ok(created)
    }

    /// [`create_obb`](Self::create_obb) for every object; failures become
    /// diagnostics and the batch continues.
    pub fn create_obbs(&mut self, host: &mut dyn SceneHost, objects: &[SceneObject]) -> Vec<ObjectId> {
        let mut created = Vec::new();
        for object in objects {
            match self.create_obb(host, object) {
                Ok(id) => created.push(id),
                Err(e) => self.record(object, &e),
            }
        }
        created
    }

    /// Decompose `object` with `decomposer` and add the merged convex parts to
    /// the host as `<name>_collision`.
    pub fn decompose_object(
        &mut self,
        host: &mut dyn SceneHost,
        decomposer: &dyn ConvexDecomposer,
        object: &SceneObject,
    ) -> Result<ObjectId, SessionError> {
        if self.registry.is_collision_output(object.id) {
            return Err(SessionError::AlreadyCollision(object.id));
        }
        object.mesh.validate()?;

        let temp_dir = &self.prefs.temp_dir;
        std::fs::create_dir_all(temp_dir).map_err(DecompositionError::from)?;
        let mut stem = sanitize_file_stem(&object.name);
        if stem.is_empty() {
            stem = format!("object_{}", object.id.0);
        }
        let files = ExchangeFiles::new(temp_dir, &stem);
        files.clear().map_err(DecompositionError::from)?;

        write_obj(&files.input, &object.mesh, Some(&stem))?;
        decomposer.decompose(&files.input, &files.output, &self.prefs.decomposition)?;
        if !files.output.is_file() {
            return Err(DecompositionError::EmptyResult(files.output.clone()).into());
        }
        let parts = read_obj_parts(&files.output)?;
        if parts.is_empty() {
            return Err(DecompositionError::EmptyResult(files.output.clone()).into());
        }
        debug!(object = %object.name, parts = parts.len(), "read convex parts");

        let request = MeshObjectRequest {
            name: collision_name(&object.name),
            mesh: Mesh::merge(parts.iter()),
            transform: object.transform,
            source: object.id,
            kind: CollisionKind::Decomposition,
        };
        let created = host.create_mesh_object(request)?;
        self.registry
            .link(object.id, created, CollisionKind::Decomposition);
        info!(object = %object.name, parts = parts.len(), "created decomposed collision");
        Ok(created)
    }

    /// [`decompose_object`](Self::decompose_object) for every object;
    /// failures become diagnostics and the batch continues.
    pub fn create_collisions(
        &mut self,
        host: &mut dyn SceneHost,
        decomposer: &dyn ConvexDecomposer,
        objects: &[SceneObject],
    ) -> Vec<ObjectId> {
        let mut created = Vec::new();
        for object in objects {
            match self.decompose_object(host, decomposer, object) {
                Ok(id) => created.push(id),
                Err(e) => self.record(object, &e),
            }
        }
        created
    }

    fn record(&mut self, object: &SceneObject, error: &SessionError) {
        warn!(object = %object.name, id = %object.id, "skipped: {error}");
        self.diagnostics.push(Diagnostic {
            object: object.id,
            name: object.name.clone(),
            message: error.to_string(),
        });
    }
}

/// Host-visible name of the collision object made for `name`.
pub fn collision_name(name: &str) -> String {
    format!("{name}_collision")
}

/// Keep ASCII letters and digits, space, `.` and `_`; drop trailing whitespace.
pub fn sanitize_file_stem(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_'))
        .collect();
    kept.trim_end().to_string()
}

/// Intermediate files of one decomposition, removed on drop.
struct ExchangeFiles {
    input: PathBuf,
    output: PathBuf,
    leftovers: [PathBuf; 2],
}

impl ExchangeFiles {
    fn new(dir: &Path, stem: &str) -> Self {
        ExchangeFiles {
            input: dir.join(format!("{stem}.obj")),
            output: dir.join(format!("{stem}_out.obj")),
            leftovers: [
                dir.join(format!("{stem}.mtl")),
                dir.join(format!("{stem}_out.mtl")),
            ],
        }
    }

    fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.input, &self.output].into_iter().chain(&self.leftovers)
    }

    /// Remove files left by an earlier run so the tool's output is always fresh.
    fn clear(&self) -> std::io::Result<()> {
        self.paths().try_for_each(|path| remove_if_present(path))
    }
}

fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl Drop for ExchangeFiles {
    fn drop(&mut self) {
        for path in self.paths() {
            if let Err(e) = remove_if_present(path) {
                warn!(path = %path.display(), "could not remove temporary file: {e}");
            }
        }
    }
}
