//! End-to-end generation tests
//!
//! A fixture project goes in, a bundler configuration object comes out.

use std::fs;
use std::path::Path;

use packlane::config::{BuildConfig, BuildSettings, Environment, RuntimeContext};
use packlane::{generate, OverrideOutcome, OverrideSpec};
use serde_json::json;
use tempfile::TempDir;

fn lintable_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, version) in [("eslint", "6.8.0"), ("eslint-loader", "3.0.4")] {
        let package_dir = dir.path().join("node_modules").join(name);
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(
            package_dir.join("package.json"),
            format!(r#"{{"name": "{}", "version": "{}"}}"#, name, version),
        )
        .unwrap();
    }
    fs::write(dir.path().join(".eslintrc.js"), "module.exports = {};\n").unwrap();
    dir
}

fn ctx(root: &Path, environment: Environment) -> RuntimeContext {
    RuntimeContext::new(root, environment)
}

#[test]
fn test_minimal_config_has_manifest_and_output() {
    let dir = TempDir::new().unwrap();
    let build = BuildConfig::new();

    let config = generate(&ctx(dir.path(), Environment::Dev), &build).unwrap();

    assert_eq!(config["module"]["rules"].as_array().unwrap().len(), 0);

    let plugins = config["plugins"].as_array().unwrap();
    assert_eq!(plugins.len(), 1);
    assert_eq!(plugins[0]["name"], "manifest");

    assert_eq!(config["output"]["publicPath"], "/build");
    assert_eq!(config["output"]["filename"], "[name].js");
}

#[test]
fn test_production_filename_template() {
    let dir = TempDir::new().unwrap();
    let build = BuildConfig::new();

    let config = generate(&ctx(dir.path(), Environment::Production), &build).unwrap();
    assert_eq!(config["output"]["filename"], "[name].[contenthash:8].js");
}

#[test]
fn test_lint_rule_is_emitted_when_enabled() {
    let project = lintable_project();
    let mut build = BuildConfig::new();
    build.enable_eslint().lint_vue_files(true);

    let config = generate(&ctx(project.path(), Environment::Dev), &build).unwrap();

    let rules = config["module"]["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0]["test"], r"\.(jsx?|vue)$");
    assert_eq!(rules[0]["loader"], "eslint-loader");
    assert_eq!(rules[0]["enforce"], "pre");
    assert_eq!(rules[0]["options"], json!({"cache": true, "emitWarning": true}));
}

#[test]
fn test_plugins_are_ordered_by_priority() {
    let project = lintable_project();
    let mut build = BuildConfig::new();
    build.cleanup_output_before_build();

    let config = generate(&ctx(project.path(), Environment::Dev), &build).unwrap();

    let plugins = config["plugins"].as_array().unwrap();
    let names: Vec<_> = plugins.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["manifest", "clean-output"]);
}

#[test]
fn test_output_path_is_joined_to_project_root() {
    let dir = TempDir::new().unwrap();
    let mut build = BuildConfig::new();
    build.set_output_path("dist/assets");

    let config = generate(&ctx(dir.path(), Environment::Dev), &build).unwrap();

    let path = config["output"]["path"].as_str().unwrap();
    assert!(path.starts_with(dir.path().to_str().unwrap()));
    assert!(path.ends_with("dist/assets"));
}

#[test]
fn test_overrides_reach_the_generated_config() {
    let project = lintable_project();
    let mut build = BuildConfig::new();
    build
        .enable_eslint()
        .configure_eslint_options(OverrideSpec::callback(|options| {
            options["emitWarning"] = json!(false);
            OverrideOutcome::UseDefaults
        }))
        .cleanup_output_before_build()
        .configure_clean_options(OverrideSpec::callback(|_| {
            OverrideOutcome::Replace(json!({"verbose": true}))
        }));

    let config = generate(&ctx(project.path(), Environment::Dev), &build).unwrap();

    let rules = config["module"]["rules"].as_array().unwrap();
    assert_eq!(rules[0]["options"]["emitWarning"], false);

    let plugins = config["plugins"].as_array().unwrap();
    let clean = plugins
        .iter()
        .find(|p| p["name"] == "clean-output")
        .unwrap();
    assert_eq!(clean["options"], json!({"verbose": true}));
}

#[test]
fn test_generation_fails_without_lint_packages() {
    let dir = TempDir::new().unwrap();
    let mut build = BuildConfig::new();
    build.enable_eslint();

    assert!(generate(&ctx(dir.path(), Environment::Dev), &build).is_err());
}

#[test]
fn test_settings_round_trip_through_generation() {
    let project = lintable_project();
    let settings: BuildSettings = serde_json::from_value(json!({
        "output_path": "dist",
        "public_path": "/assets",
        "filename": "[name].js",
        "production_filename": "[name].[contenthash:8].js",
        "lint": {"enabled": false, "lint_vue": false},
        "clean": {"enabled": true, "patterns": ["**/*"]}
    }))
    .unwrap();
    let build = BuildConfig::from_settings(settings);

    let config = generate(&ctx(project.path(), Environment::Dev), &build).unwrap();

    assert_eq!(config["output"]["publicPath"], "/assets");
    let plugins = config["plugins"].as_array().unwrap();
    let manifest = plugins.iter().find(|p| p["name"] == "manifest").unwrap();
    assert_eq!(manifest["options"]["basePath"], "assets");
}
