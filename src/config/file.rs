//! Repo settings file (packlane.toml, layer 2).
//!
//! Every key is optional; omitted keys fall through to the built-in defaults
//! during the layer merge, so serialization skips anything unset.

use std::fs;
use std::path::Path;

use globset::Glob;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error types for settings operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(String),

    #[error("failed to parse settings file: {0}")]
    Parse(String),

    #[error("invalid settings: {0}")]
    Validation(String),
}

/// `[lint]` section of packlane.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintFileSection {
    /// Run the lint loader as a pre-step of the build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Also lint .vue single-file components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lint_vue: Option<bool>,
}

/// `[clean]` section of packlane.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanFileSection {
    /// Clean the output directory before each build
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Glob patterns selecting what to remove
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
}

/// Typed view of packlane.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    /// Output directory, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    /// Public URL prefix the bundler serves assets under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Emitted filename template for dev builds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Emitted filename template for production builds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_filename: Option<String>,

    /// Lint feature settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint: Option<LintFileSection>,

    /// Output cleanup settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean: Option<CleanFileSection>,
}

impl SettingsFile {
    /// Load and parse settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_str(&contents)
    }

    /// Parse settings from a TOML string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    /// Validate the settings present in the file
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref output_path) = self.output_path {
            if output_path.is_empty() {
                return Err(ConfigError::Validation(
                    "output_path must not be empty".to_string(),
                ));
            }
        }

        if let Some(ref public_path) = self.public_path {
            if !public_path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "public_path must start with '/', got {:?}",
                    public_path
                )));
            }
        }

        if let Some(ref clean) = self.clean {
            if let Some(ref patterns) = clean.patterns {
                if patterns.is_empty() {
                    return Err(ConfigError::Validation(
                        "clean.patterns must name at least one pattern".to_string(),
                    ));
                }
                for pattern in patterns {
                    // A leading '!' negates the pattern downstream; the glob
                    // itself still has to parse.
                    let bare = pattern.strip_prefix('!').unwrap_or(pattern);
                    Glob::new(bare).map_err(|e| {
                        ConfigError::Validation(format!(
                            "invalid clean pattern {:?}: {}",
                            pattern, e
                        ))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Convert to a JSON Value carrying only the keys the file set
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
