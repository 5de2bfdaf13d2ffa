//! CoACD command-line driver.

use super::{ConvexDecomposer, run_with_timeout};
use crate::config::{DecompositionOptions, Preferences};
use crate::errors::DecompositionError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::info;

/// Runs the CoACD executable as a blocking child process.
#[derive(Clone, Debug)]
pub struct CoacdProcess {
    executable: PathBuf,
}

impl CoacdProcess {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        CoacdProcess {
            executable: executable.into(),
        }
    }

    /// The executable configured in `prefs`.
    pub fn from_preferences(prefs: &Preferences) -> Result<Self, DecompositionError> {
        match &prefs.coacd_path {
            Some(path) if path.is_file() => Ok(Self::new(path)),
            Some(path) => Err(DecompositionError::ExecutableMissing(path.clone())),
            None => Err(DecompositionError::ExecutableMissing(PathBuf::new())),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// The full command line for one decomposition, without launching it.
    pub fn command(&self, input: &Path, output: &Path, options: &DecompositionOptions) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output)
            .arg("-t")
            .arg(options.threshold.to_string())
            .arg("-pr")
            .arg(options.preprocess_resolution.to_string())
            .arg("-mi")
            .arg(options.search_iterations.to_string())
            .arg("-md")
            .arg(options.search_depth.to_string())
            .arg("-c")
            .arg(options.max_hull_count.to_string())
            .arg("-mn")
            .arg(options.min_preprocess_resolution.to_string());
        if options.decimate {
            command.arg("-d");
        }
        command
            .arg("--max-ch-vertex")
            .arg(options.max_hull_vertex_count.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl ConvexDecomposer for CoacdProcess {
    fn decompose(
        &self,
        input: &Path,
        output: &Path,
        options: &DecompositionOptions,
    ) -> Result<(), DecompositionError> {
        if self.executable.as_os_str().is_empty() {
            return Err(DecompositionError::ExecutableMissing(self.executable.clone()));
        }
        info!(
            input = %input.display(),
            output = %output.display(),
            "running CoACD"
        );
        run_with_timeout(self.command(input, output, options), options.timeout())?;
        if !output.exists() {
            return Err(DecompositionError::EmptyResult(output.to_path_buf()));
        }
        Ok(())
    }
}
