//! Feature preconditions for loader and plugin adapters.
//!
//! Each facade feature leans on npm packages the host project must have
//! installed. Adapters call [`ensure_feature`] before building options so a
//! missing dependency fails with an actionable message instead of a broken
//! bundler run.

use std::fs;
use std::path::Path;

use regex_lite::Regex;
use serde_json::Value;

/// An npm package a feature requires, with its minimum supported version.
#[derive(Debug, Clone, Copy)]
pub struct PackageRequirement {
    pub name: &'static str,
    pub min_major: u32,
    pub min_minor: u32,
}

/// A facade feature and the packages it needs.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub name: &'static str,
    pub description: &'static str,
    pub packages: &'static [PackageRequirement],
}

/// Registry of features the facade can enable.
const FEATURES: &[Feature] = &[Feature {
    name: "eslint",
    description: "lint source files as a pre-step of the build",
    packages: &[
        PackageRequirement {
            name: "eslint",
            min_major: 6,
            min_minor: 0,
        },
        PackageRequirement {
            name: "eslint-loader",
            min_major: 3,
            min_minor: 0,
        },
    ],
}];

/// Error types for feature preconditions
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    #[error(
        "the {} feature ({}) requires packages that are not installed: {}. Try: {}",
        .feature,
        .description,
        .missing.join(", "),
        .command
    )]
    MissingPackages {
        feature: &'static str,
        description: &'static str,
        missing: Vec<String>,
        command: String,
    },

    #[error(
        "package {name} is too old for the {feature} feature: installed {installed}, minimum supported {required}. Try: {command}"
    )]
    PackageTooOld {
        feature: &'static str,
        name: &'static str,
        installed: String,
        required: String,
        command: String,
    },

    #[error("failed to probe package {name}: {reason}")]
    Probe { name: String, reason: String },
}

/// Check that every package a feature needs is installed and recent enough.
pub fn ensure_feature(project_root: &Path, feature_name: &str) -> Result<(), FeatureError> {
    let feature = FEATURES
        .iter()
        .find(|f| f.name == feature_name)
        .ok_or_else(|| FeatureError::UnknownFeature(feature_name.to_string()))?;

    // Missing packages are collected so one error names them all;
    // a version mismatch fails immediately.
    let mut missing = Vec::new();
    for requirement in feature.packages {
        match installed_version(project_root, requirement.name)? {
            None => missing.push(requirement.name.to_string()),
            Some((major, minor)) => {
                if (major, minor) < (requirement.min_major, requirement.min_minor) {
                    return Err(FeatureError::PackageTooOld {
                        feature: feature.name,
                        name: requirement.name,
                        installed: format!("{}.{}", major, minor),
                        required: format!("{}.{}", requirement.min_major, requirement.min_minor),
                        command: install_command(feature),
                    });
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(FeatureError::MissingPackages {
            feature: feature.name,
            description: feature.description,
            missing,
            command: install_command(feature),
        });
    }

    Ok(())
}

/// Read the installed version of a package from
/// `node_modules/<name>/package.json`. Returns None when not installed.
fn installed_version(
    project_root: &Path,
    package: &str,
) -> Result<Option<(u32, u32)>, FeatureError> {
    let manifest = project_root
        .join("node_modules")
        .join(package)
        .join("package.json");
    if !manifest.is_file() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&manifest).map_err(|e| FeatureError::Probe {
        name: package.to_string(),
        reason: e.to_string(),
    })?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| FeatureError::Probe {
        name: package.to_string(),
        reason: e.to_string(),
    })?;

    let version = value
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| FeatureError::Probe {
            name: package.to_string(),
            reason: "package.json has no version field".to_string(),
        })?;

    match parse_version(version) {
        Some(parsed) => Ok(Some(parsed)),
        None => Err(FeatureError::Probe {
            name: package.to_string(),
            reason: format!("unparseable version {:?}", version),
        }),
    }
}

/// Extract the leading major.minor pair from a semver-ish string
/// ("6.8.0", "v7.0", "3.0.0-beta.1").
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let re = Regex::new(r"^v?(\d+)\.(\d+)").unwrap();
    let captures = re.captures(version.trim())?;
    let major = captures.get(1)?.as_str().parse().ok()?;
    let minor = captures.get(2)?.as_str().parse().ok()?;
    Some((major, minor))
}

/// The install command suggested in error messages.
fn install_command(feature: &Feature) -> String {
    let packages: Vec<&str> = feature.packages.iter().map(|p| p.name).collect();
    format!("npm install {} --save-dev", packages.join(" "))
}
