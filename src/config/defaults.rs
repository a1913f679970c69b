//! Built-in facade defaults (layer 1).
//!
//! `BuildSettings` is both the builtin-defaults layer and the typed shape
//! the merged settings deserialize into.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Lint feature settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintSettings {
    /// Run the lint loader as a pre-step of the build (default: false)
    pub enabled: bool,

    /// Also lint .vue single-file components (default: false)
    pub lint_vue: bool,
}

/// Output-cleanup feature settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanSettings {
    /// Clean the output directory before each build (default: false)
    pub enabled: bool,

    /// Glob patterns selecting what to remove (default: ["**/*"])
    pub patterns: Vec<String>,
}

/// Resolved facade settings.
///
/// `Default` carries the built-in values every other layer overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Output directory, relative to the project root (default: "public/build")
    pub output_path: String,

    /// Public URL prefix the bundler serves assets under (default: "/build")
    pub public_path: String,

    /// Emitted filename template for dev builds (default: "[name].js")
    pub filename: String,

    /// Emitted filename template for production builds
    /// (default: "[name].[contenthash:8].js")
    pub production_filename: String,

    /// Lint feature
    pub lint: LintSettings,

    /// Output cleanup feature
    pub clean: CleanSettings,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output_path: "public/build".to_string(),
            public_path: "/build".to_string(),
            filename: "[name].js".to_string(),
            production_filename: "[name].[contenthash:8].js".to_string(),
            lint: LintSettings {
                enabled: false,
                lint_vue: false,
            },
            clean: CleanSettings {
                enabled: false,
                patterns: vec!["**/*".to_string()],
            },
        }
    }
}

impl BuildSettings {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        json!({
            "output_path": self.output_path,
            "public_path": self.public_path,
            "filename": self.filename,
            "production_filename": self.production_filename,
            "lint": {
                "enabled": self.lint.enabled,
                "lint_vue": self.lint.lint_vue
            },
            "clean": {
                "enabled": self.clean.enabled,
                "patterns": self.clean.patterns
            }
        })
    }
}
