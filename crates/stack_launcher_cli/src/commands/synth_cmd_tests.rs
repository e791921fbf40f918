use super::*;
use crate::config::AppConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn launch_args(dir: &Path, overrides: &[(&str, &str)]) -> LaunchArgs {
    let mut config = AppConfig::default();
    config.templates.directory = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../templates");
    config.context.files = Vec::new();
    config.output.directory = dir.join("configured-out");
    let path = dir.join("launcher.toml");
    config.save(&path).expect("Failed to save settings");

    LaunchArgs {
        config: Some(path.display().to_string()),
        overrides: overrides
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ..LaunchArgs::default()
    }
}

const RELEASE: &[(&str, &str)] = &[
    ("hosted:id", "platform"),
    ("hosted:account", "123456789012"),
    ("hosted:region", "us-west-2"),
];

#[test]
fn test_synthesize_writes_to_configured_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let args = SynthArgs {
        launch: launch_args(temp_dir.path(), RELEASE),
        out: None,
    };

    let receipt = synthesize(&args).unwrap();

    let expected = temp_dir
        .path()
        .join("configured-out")
        .join("platform-eks.plan.json");
    assert_eq!(receipt.location, expected.display().to_string());
    assert!(expected.exists());
    assert_eq!(receipt.unit_count, 5);
}

#[test]
fn test_synthesize_honours_out_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let out = temp_dir.path().join("override");
    let args = SynthArgs {
        launch: launch_args(temp_dir.path(), RELEASE),
        out: Some(out.clone()),
    };

    synthesize(&args).unwrap();

    assert!(out.join("platform-eks.plan.json").exists());
    assert!(!temp_dir.path().join("configured-out").exists());
}

#[test]
fn test_failed_resolution_writes_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut launch = launch_args(temp_dir.path(), RELEASE);
    launch
        .overrides
        .push(("synthesizer:custom".to_string(), "true".to_string()));
    let args = SynthArgs { launch, out: None };

    let result = synthesize(&args);

    assert!(result.is_err());
    let out = temp_dir.path().join("configured-out");
    assert!(!out.exists() || fs::read_dir(&out).unwrap().next().is_none());
}
