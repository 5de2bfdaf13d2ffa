//! Error types for hull construction, box fitting, decomposition and configuration.

use crate::float_types::Real;
use crate::mesh::ObjectId;
use nalgebra::Point3;
use std::path::PathBuf;
use std::time::Duration;

/// Failures of the geometry kernel.
///
/// Degenerate candidate faces inside the box search are skipped and never
/// surface here; these variants describe a whole invocation failing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (InvalidMesh) The input mesh breaks a structural rule
    #[error("(InvalidMesh) {0}")]
    InvalidMesh(String),
    /// (InvalidCoordinate) A vertex has a NaN or infinite component
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// (DegenerateInput) Fewer than 4 affinely independent points
    #[error("(DegenerateInput) {reason} ({distinct} distinct points)")]
    DegenerateInput { reason: String, distinct: usize },
    /// (NoFittingBox) Every candidate direction was degenerate
    #[error("(NoFittingBox) no fitting box found after {directions} candidate directions")]
    NoFittingBox { directions: usize },
    /// (SingularTransform) The world transform cannot be inverted
    #[error("(SingularTransform) the object transform is not invertible")]
    SingularTransform,
    /// (Hull) The triangulation backend rejected the point set
    #[error("(Hull) convex hull computation failed: {0}")]
    Hull(String),
}

/// Failures at the external convex-decomposition boundary.
#[derive(Debug, thiserror::Error)]
pub enum DecompositionError {
    #[error("decomposition executable not configured or missing: {0}")]
    ExecutableMissing(PathBuf),
    #[error("could not launch {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decomposition timed out after {0:?}")]
    Timeout(Duration),
    #[error("decomposition exited with {0}")]
    NonZeroExit(String),
    #[error("decomposition produced no convex parts in {0}")]
    EmptyResult(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Exchange(#[from] crate::io::IoError),
}

/// Failures while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: String,
        min: String,
        max: String,
    },
}

/// Per-object failure inside a collision session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("object {0} is already a collision output")]
    AlreadyCollision(ObjectId),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Decomposition(#[from] DecompositionError),
    #[error(transparent)]
    Exchange(#[from] crate::io::IoError),
    #[error("scene host rejected the object: {0}")]
    Host(String),
}
