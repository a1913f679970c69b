//! ESLint loader adapter.
//!
//! Builds the options object and the file-match rule for the lint loader.
//! The host project must have the lint packages installed and an ESLint
//! configuration in place before options are built.

use std::fs;
use std::path::{Path, PathBuf};

use regex_lite::Regex;
use serde_json::{json, Value};

use crate::config::{BuildConfig, RuntimeContext};
use crate::features::{self, FeatureError};
use packlane_overrides::{apply_options_callback, OverrideError};

/// Filenames that count as an ESLint configuration at the project root.
const CONFIG_CANDIDATES: &[&str] = &[
    ".eslintrc.js",
    ".eslintrc.cjs",
    ".eslintrc.yaml",
    ".eslintrc.yml",
    ".eslintrc.json",
    ".eslintrc",
];

/// Error types for the ESLint adapter
#[derive(Debug, thiserror::Error)]
pub enum EslintError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(
        "no ESLint configuration found in {}.\n\n\
         Run `./node_modules/.bin/eslint --init`, or create a .eslintrc.js file at the root of your project:\n\n\
         \x20   module.exports = {{\n\
         \x20       parser: 'babel-eslint',\n\
         \x20       extends: ['eslint:recommended'],\n\
         \x20   }};",
        .root.display()
    )]
    MissingLintConfig { root: PathBuf },

    #[error(transparent)]
    Override(#[from] OverrideError),

    #[error("failed to read {path}: {reason}")]
    Probe { path: String, reason: String },
}

/// Build the final options object for the lint loader.
pub fn loader_options(ctx: &RuntimeContext, build: &BuildConfig) -> Result<Value, EslintError> {
    features::ensure_feature(&ctx.project_root, "eslint")?;

    if !has_lint_configuration(&ctx.project_root)? {
        return Err(EslintError::MissingLintConfig {
            root: ctx.project_root.clone(),
        });
    }

    let defaults = json!({
        "cache": true,
        "emitWarning": true
    });

    Ok(apply_options_callback(defaults, build.eslint_options.as_ref())?)
}

/// The file-match regex for the lint rule.
///
/// Starts from `jsx?` and appends `vue` when .vue linting is enabled.
pub fn file_test(build: &BuildConfig) -> Regex {
    let mut extensions = vec!["jsx?"];
    if build.settings.lint.lint_vue {
        extensions.push("vue");
    }

    Regex::new(&format!(r"\.({})$", extensions.join("|"))).unwrap()
}

/// Whether the project carries an ESLint configuration: one of the config
/// filenames at the root, or an `eslintConfig` key in package.json.
fn has_lint_configuration(project_root: &Path) -> Result<bool, EslintError> {
    for candidate in CONFIG_CANDIDATES {
        if project_root.join(candidate).is_file() {
            return Ok(true);
        }
    }

    let package_json = project_root.join("package.json");
    if package_json.is_file() {
        let contents = fs::read_to_string(&package_json).map_err(|e| EslintError::Probe {
            path: package_json.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
        let value: Value = serde_json::from_str(&contents).map_err(|e| EslintError::Probe {
            path: package_json.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;

        if value.get("eslintConfig").map_or(false, Value::is_object) {
            return Ok(true);
        }
    }

    Ok(false)
}
