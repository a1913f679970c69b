//! Layered settings resolution tests
//!
//! Exercises the builtin -> repo file -> CLI precedence chain end to end,
//! including provenance capture.

use std::fs;

use packlane::config::SettingsOrigin;
use packlane::EffectiveSettings;
use serde_json::json;
use tempfile::TempDir;

fn write_settings(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("packlane.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_repo_file_overrides_builtin() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"
        output_path = "dist"

        [lint]
        enabled = true
        "#,
    );

    let effective = EffectiveSettings::build(Some(&path), None).unwrap();

    assert_eq!(effective.settings["output_path"], "dist");
    assert_eq!(effective.settings["lint"]["enabled"], true);
    // keys the file leaves out keep builtin values
    assert_eq!(effective.settings["public_path"], "/build");
    assert_eq!(effective.settings["lint"]["lint_vue"], false);
}

#[test]
fn test_cli_overrides_repo_file() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "output_path = \"dist\"");

    let effective =
        EffectiveSettings::build(Some(&path), Some(json!({"output_path": "out"}))).unwrap();

    assert_eq!(effective.settings["output_path"], "out");
}

#[test]
fn test_provenance_records_all_layers() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "output_path = \"dist\"");

    let effective =
        EffectiveSettings::build(Some(&path), Some(json!({"output_path": "out"}))).unwrap();

    let origins: Vec<_> = effective.sources.iter().map(|s| s.origin.clone()).collect();
    assert_eq!(
        origins,
        vec![SettingsOrigin::Builtin, SettingsOrigin::Repo, SettingsOrigin::Cli]
    );

    let repo_source = &effective.sources[1];
    assert_eq!(repo_source.path.as_deref(), Some(path.to_str().unwrap()));
    // sha256 hex of the raw file bytes
    assert_eq!(repo_source.digest.as_ref().unwrap().len(), 64);
}

#[test]
fn test_typed_settings_from_merged_layers() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"
        [clean]
        enabled = true
        patterns = ["**/*.js"]
        "#,
    );

    let effective = EffectiveSettings::build(Some(&path), None).unwrap();
    let settings = effective.to_build_settings().unwrap();

    assert!(settings.clean.enabled);
    assert_eq!(settings.clean.patterns, vec!["**/*.js"]);
    assert_eq!(settings.output_path, "public/build");
}

#[test]
fn test_malformed_repo_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "output_path = ");

    assert!(EffectiveSettings::build(Some(&path), None).is_err());
}

#[test]
fn test_settings_digest_tracks_content() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "output_path = \"dist\"");
    let first = EffectiveSettings::build(Some(&path), None).unwrap();

    let other_dir = TempDir::new().unwrap();
    let other_path = write_settings(&other_dir, "output_path = \"out\"");
    let second = EffectiveSettings::build(Some(&other_path), None).unwrap();

    assert_ne!(first.settings_digest, second.settings_digest);

    // identical content in a different file digests identically
    let same_dir = TempDir::new().unwrap();
    let same_path = write_settings(&same_dir, "output_path = \"dist\"");
    let third = EffectiveSettings::build(Some(&same_path), None).unwrap();
    assert_eq!(first.settings_digest, third.settings_digest);
}
