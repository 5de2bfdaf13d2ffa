//! Tolerances, fitting options and decomposition settings.
//!
//! Everything here is plain data passed into the pipeline explicitly; nothing
//! is stored in process-wide state. A [`Preferences`] file groups the values a
//! user normally keeps between runs:
//!
//! ```toml
//! coacd_path = "/opt/coacd/bin/coacd"
//! temp_dir = "/tmp/hullbox"
//!
//! [decomposition]
//! search_iterations = 500
//! max_hull_count = 32
//!
//! [fit]
//! frame_correction = "preserve"
//!
//! [fit.tolerances]
//! duplicate_normal_dot = 0.9995
//! ```

use crate::errors::ConfigError;
use crate::float_types::{Real, real};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Numerical robustness heuristics used by the hull builder and box search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Two face normals with `|dot| >` this value are the same candidate direction.
    pub duplicate_normal_dot: f64,
    /// A projected tangent shorter than this marks the face as degenerate.
    pub degenerate_tangent: f64,
    /// Points closer than this (relative to the cloud extent) are merged.
    pub point_merge: f64,
    /// Angular and offset tolerance for merging coplanar hull triangles.
    pub coplanar: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            duplicate_normal_dot: 0.999,
            degenerate_tangent: 1e-6,
            point_merge: 1e-9,
            coplanar: 1e-6,
        }
    }
}

impl Tolerances {
    pub const fn duplicate_normal_dot(&self) -> Real {
        real(self.duplicate_normal_dot)
    }

    pub const fn degenerate_tangent(&self) -> Real {
        real(self.degenerate_tangent)
    }

    pub const fn point_merge(&self) -> Real {
        real(self.point_merge)
    }

    pub const fn coplanar(&self) -> Real {
        real(self.coplanar)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("tolerances.duplicate_normal_dot", self.duplicate_normal_dot, 0.0, 1.0)?;
        check_range("tolerances.degenerate_tangent", self.degenerate_tangent, 0.0, 1.0)?;
        check_range("tolerances.point_merge", self.point_merge, 0.0, 1.0)?;
        check_range("tolerances.coplanar", self.coplanar, 0.0, 1.0)?;
        Ok(())
    }
}

/// How the reconstructed box is oriented relative to its owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameCorrection {
    /// Remove the residual rotation between the fitted frame and the object's
    /// own world orientation; the box keeps its center and extents and ends
    /// up aligned with the object's local axes.
    #[default]
    AlignToObject,
    /// Keep the fitted orientation.
    Preserve,
}

/// Options for a single box fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub tolerances: Tolerances,
    pub frame_correction: FrameCorrection,
}

impl FitOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tolerances.validate()
    }
}

/// Parameters forwarded to the external convex-decomposition tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionOptions {
    /// Concavity threshold (`-t`).
    pub threshold: f64,
    /// Detail level of the pre-processed mesh (`-pr`).
    pub preprocess_resolution: u32,
    /// Lower bound of the pre-processing resolution (`-mn`).
    pub min_preprocess_resolution: u32,
    /// Number of search iterations in MCTS (`-mi`).
    pub search_iterations: u32,
    /// Maximum search depth in MCTS (`-md`).
    pub search_depth: u32,
    /// Maximum number of convex hulls in the result (`-c`).
    pub max_hull_count: u32,
    /// Maximum vertex count of each hull (`--max-ch-vertex`).
    pub max_hull_vertex_count: u32,
    /// Enable hull decimation (`-d`).
    pub decimate: bool,
    /// Wall-clock limit for one tool invocation.
    pub timeout_secs: u64,
}

impl Default for DecompositionOptions {
    fn default() -> Self {
        Self {
            threshold: 0.03,
            preprocess_resolution: 80,
            min_preprocess_resolution: 30,
            search_iterations: 300,
            search_depth: 4,
            max_hull_count: 16,
            max_hull_vertex_count: 128,
            decimate: true,
            timeout_secs: 600,
        }
    }
}

impl DecompositionOptions {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("decomposition.threshold", self.threshold, 0.01, 1.0)?;
        check_range("decomposition.preprocess_resolution", self.preprocess_resolution, 20, 100)?;
        check_range(
            "decomposition.min_preprocess_resolution",
            self.min_preprocess_resolution,
            1,
            self.preprocess_resolution,
        )?;
        check_range("decomposition.search_iterations", self.search_iterations, 60, 2000)?;
        check_range("decomposition.search_depth", self.search_depth, 2, 6)?;
        check_range("decomposition.max_hull_count", self.max_hull_count, 1, 2048)?;
        check_range("decomposition.max_hull_vertex_count", self.max_hull_vertex_count, 4, 4096)?;
        check_range("decomposition.timeout_secs", self.timeout_secs, 1, 86_400)?;
        Ok(())
    }
}

/// User preferences persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Path of the CoACD executable, if installed.
    pub coacd_path: Option<PathBuf>,
    /// Directory for intermediate exchange files.
    pub temp_dir: PathBuf,
    pub decomposition: DecompositionOptions,
    pub fit: FitOptions,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            coacd_path: None,
            temp_dir: std::env::temp_dir().join("hullbox"),
            decomposition: DecompositionOptions::default(),
            fit: FitOptions::default(),
        }
    }
}

impl Preferences {
    /// Parse and validate preferences from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let prefs: Preferences = toml::from_str(text)?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Read and validate a preferences file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.decomposition.validate()?;
        self.fit.validate()
    }
}

fn check_range<T: PartialOrd + Display>(
    name: &'static str,
    value: T,
    min: T,
    max: T,
) -> Result<(), ConfigError> {
    // written this way so NaN is rejected
    if !(value >= min && value <= max) {
        return Err(ConfigError::OutOfRange {
            name,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}
