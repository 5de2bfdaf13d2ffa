//! Boundary to an external convex-decomposition tool.
//!
//! The kernel does not decompose meshes itself. A [`ConvexDecomposer`] reads
//! a mesh file, writes the convex parts to another file, and reports
//! success or failure; the session reads the parts back.

use crate::config::DecompositionOptions;
use crate::errors::DecompositionError;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

pub mod coacd;

pub use coacd::CoacdProcess;

/// Something that turns `input` into a file of convex parts at `output`.
pub trait ConvexDecomposer {
    fn decompose(
        &self,
        input: &Path,
        output: &Path,
        options: &DecompositionOptions,
    ) -> Result<(), DecompositionError>;
}

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Run `command` to completion, killing it once `timeout` has elapsed.
///
/// A non-zero exit maps to [`DecompositionError::NonZeroExit`], an expired
/// deadline to [`DecompositionError::Timeout`].
pub fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<ExitStatus, DecompositionError> {
    let program = Path::new(command.get_program()).to_path_buf();
    let mut child = command.spawn().map_err(|source| DecompositionError::Spawn {
        path: program.clone(),
        source,
    })?;
    debug!(program = %program.display(), pid = child.id(), "decomposition started");

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            if status.success() {
                return Ok(status);
            }
            return Err(DecompositionError::NonZeroExit(status.to_string()));
        }
        if Instant::now() >= deadline {
            // the child may exit between try_wait and kill
            let _ = child.kill();
            let _ = child.wait();
            return Err(DecompositionError::Timeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
