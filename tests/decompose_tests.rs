use hullbox::{
    config::{DecompositionOptions, Preferences},
    decompose::{CoacdProcess, ConvexDecomposer, run_with_timeout},
    errors::DecompositionError,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[test]
fn coacd_command_line() {
    let coacd = CoacdProcess::new("/opt/coacd/coacd");
    let command = coacd.command(
        Path::new("in.obj"),
        Path::new("in_out.obj"),
        &DecompositionOptions::default(),
    );
    assert_eq!(command.get_program(), "/opt/coacd/coacd");
    let args: Vec<String> = command
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        args,
        [
            "-i", "in.obj", "-o", "in_out.obj", "-t", "0.03", "-pr", "80", "-mi", "300", "-md",
            "4", "-c", "16", "-mn", "30", "-d", "--max-ch-vertex", "128",
        ]
    );

    let no_decimation = DecompositionOptions {
        decimate: false,
        ..DecompositionOptions::default()
    };
    let command = coacd.command(Path::new("a.obj"), Path::new("b.obj"), &no_decimation);
    assert!(command.get_args().all(|a| a != "-d"));
}

#[test]
fn missing_executable_is_reported() {
    assert!(matches!(
        CoacdProcess::from_preferences(&Preferences::default()),
        Err(DecompositionError::ExecutableMissing(_))
    ));

    let dir = tempfile::tempdir().expect("tempdir");
    let prefs = Preferences {
        coacd_path: Some(dir.path().join("coacd")),
        ..Preferences::default()
    };
    assert!(matches!(
        CoacdProcess::from_preferences(&prefs),
        Err(DecompositionError::ExecutableMissing(path)) if path == dir.path().join("coacd")
    ));

    let unset = CoacdProcess::new(PathBuf::new());
    assert!(matches!(
        unset.decompose(Path::new("a.obj"), Path::new("b.obj"), &DecompositionOptions::default()),
        Err(DecompositionError::ExecutableMissing(_))
    ));
}

#[test]
fn unlaunchable_program_is_a_spawn_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let command = std::process::Command::new(dir.path().join("does-not-exist"));
    assert!(matches!(
        run_with_timeout(command, Duration::from_secs(1)),
        Err(DecompositionError::Spawn { .. })
    ));
}

#[cfg(unix)]
mod process {
    use super::*;
    use std::process::Command;

    fn sh(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.arg("-c").arg(script);
        command
    }

    #[test]
    fn successful_exit() {
        let status = run_with_timeout(sh("exit 0"), Duration::from_secs(10)).expect("run");
        assert!(status.success());
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        match run_with_timeout(sh("exit 3"), Duration::from_secs(10)) {
            Err(DecompositionError::NonZeroExit(status)) => assert!(status.contains('3')),
            other => panic!("expected non-zero exit, got {other:?}"),
        }
    }

    #[test]
    fn slow_process_is_killed_at_the_deadline() {
        let started = Instant::now();
        let result = run_with_timeout(sh("sleep 5"), Duration::from_millis(200));
        assert!(matches!(result, Err(DecompositionError::Timeout(_))));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn tool_without_output_is_an_empty_result() {
        let dir = tempfile::tempdir().expect("tempdir");
        // `true` accepts and ignores the CoACD arguments
        let coacd = CoacdProcess::new("true");
        let output = dir.path().join("out.obj");
        assert!(matches!(
            coacd.decompose(&dir.path().join("in.obj"), &output, &DecompositionOptions::default()),
            Err(DecompositionError::EmptyResult(path)) if path == output
        ));
    }
}
