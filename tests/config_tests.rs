use hullbox::{
    config::{DecompositionOptions, FrameCorrection, Preferences, Tolerances},
    errors::ConfigError,
};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn defaults_match_the_tool_defaults() {
    let prefs = Preferences::default();
    assert!(prefs.coacd_path.is_none());
    assert_eq!(prefs.fit.frame_correction, FrameCorrection::AlignToObject);
    assert_eq!(prefs.fit.tolerances, Tolerances::default());
    assert_eq!(prefs.fit.tolerances.duplicate_normal_dot, 0.999);
    assert_eq!(prefs.fit.tolerances.degenerate_tangent, 1e-6);

    let d = &prefs.decomposition;
    assert_eq!(d.threshold, 0.03);
    assert_eq!(d.preprocess_resolution, 80);
    assert_eq!(d.search_iterations, 300);
    assert_eq!(d.search_depth, 4);
    assert_eq!(d.max_hull_count, 16);
    assert_eq!(d.max_hull_vertex_count, 128);
    assert!(d.decimate);
    assert_eq!(d.timeout(), Duration::from_secs(600));
    assert!(prefs.validate().is_ok());
}

#[test]
fn partial_toml_keeps_defaults() {
    let prefs = Preferences::from_toml_str(
        r#"
coacd_path = "/opt/coacd/bin/coacd"

[decomposition]
search_iterations = 500
max_hull_count = 32

[fit]
frame_correction = "preserve"

[fit.tolerances]
duplicate_normal_dot = 0.9995
"#,
    )
    .expect("parse");

    assert_eq!(prefs.coacd_path, Some(PathBuf::from("/opt/coacd/bin/coacd")));
    assert_eq!(prefs.decomposition.search_iterations, 500);
    assert_eq!(prefs.decomposition.max_hull_count, 32);
    assert_eq!(prefs.decomposition.search_depth, 4);
    assert_eq!(prefs.fit.frame_correction, FrameCorrection::Preserve);
    assert_eq!(prefs.fit.tolerances.duplicate_normal_dot, 0.9995);
    assert_eq!(prefs.fit.tolerances.coplanar, 1e-6);
}

#[test]
fn out_of_range_values_are_rejected() {
    match Preferences::from_toml_str("[decomposition]\nsearch_depth = 9\n") {
        Err(ConfigError::OutOfRange { name, value, .. }) => {
            assert_eq!(name, "decomposition.search_depth");
            assert_eq!(value, "9");
        },
        other => panic!("expected range error, got {other:?}"),
    }

    let options = DecompositionOptions {
        min_preprocess_resolution: 90,
        ..DecompositionOptions::default()
    };
    assert!(matches!(
        options.validate(),
        Err(ConfigError::OutOfRange { name: "decomposition.min_preprocess_resolution", .. })
    ));

    let tolerances = Tolerances {
        duplicate_normal_dot: f64::NAN,
        ..Tolerances::default()
    };
    assert!(tolerances.validate().is_err());
}

#[test]
fn unknown_variant_is_a_parse_error() {
    assert!(matches!(
        Preferences::from_toml_str("[fit]\nframe_correction = \"sideways\"\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn load_reads_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hullbox.toml");
    std::fs::write(&path, "[decomposition]\nthreshold = 0.05\n").expect("write");
    let prefs = Preferences::load(&path).expect("load");
    assert_eq!(prefs.decomposition.threshold, 0.05);

    assert!(matches!(
        Preferences::load(dir.path().join("missing.toml")),
        Err(ConfigError::Io(_))
    ));
}
