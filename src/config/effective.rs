//! Effective settings with full provenance.
//!
//! Captures the merged settings plus information about where each layer
//! came from, so a generated configuration can always be traced back to
//! the files and flags that produced it.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::defaults::BuildSettings;
use super::file::{ConfigError, SettingsFile};
use super::merge::merge_layers;

/// Schema version for effective settings
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "packlane/effective_settings@1";

/// Origin of a settings layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SettingsOrigin {
    Builtin,
    Repo,
    Cli,
}

impl SettingsOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsOrigin::Builtin => "builtin",
            SettingsOrigin::Repo => "repo",
            SettingsOrigin::Cli => "cli",
        }
    }
}

/// A contributing settings layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSource {
    /// Origin of this layer
    pub origin: SettingsOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Merged settings with full provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveSettings {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When these settings were computed
    pub created_at: DateTime<Utc>,

    /// Unique id of this settings resolution
    pub generation_id: String,

    /// The merged settings object
    pub settings: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<SettingsSource>,

    /// SHA-256 over the canonical (RFC 8785) form of `settings`
    pub settings_digest: String,
}

impl EffectiveSettings {
    /// Build effective settings from layers.
    ///
    /// A missing repo settings file is not an error; the layer is skipped
    /// and the builtin defaults apply.
    pub fn build(
        repo_settings_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        layers.push(BuildSettings::default().to_value());
        sources.push(SettingsSource {
            origin: SettingsOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layer 2: Repo settings file
        if let Some(path) = repo_settings_path {
            if path.exists() {
                let (value, digest) = Self::load_settings_file(path)?;
                layers.push(value);
                sources.push(SettingsSource {
                    origin: SettingsOrigin::Repo,
                    path: Some(path.to_string_lossy().to_string()),
                    digest: Some(digest),
                });
            }
        }

        // Layer 3: CLI overrides
        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(SettingsSource {
                origin: SettingsOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let settings = merge_layers(layers);

        // The merged object must deserialize into the typed shape; this is
        // the validation gate for CLI layers that bypassed SettingsFile.
        let _: BuildSettings = serde_json::from_value(settings.clone())
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        let settings_digest = Self::canonical_digest(&settings)?;

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            generation_id: Uuid::new_v4().to_string(),
            settings,
            sources,
            settings_digest,
        })
    }

    /// Deserialize the merged settings into the typed shape
    pub fn to_build_settings(&self) -> Result<BuildSettings, ConfigError> {
        serde_json::from_value(self.settings.clone())
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// Load a settings file as a merge layer, returning the value and the
    /// digest of the raw bytes
    fn load_settings_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::Parse(format!("invalid UTF-8: {}", e)))?;
        let file = SettingsFile::from_str(&contents)?;

        Ok((file.to_value()?, digest))
    }

    /// SHA-256 hex digest of the canonical JSON form of the settings
    fn canonical_digest(settings: &Value) -> Result<String, ConfigError> {
        let jcs_bytes = serde_json_canonicalizer::to_vec(settings)
            .map_err(|e| ConfigError::Validation(format!("canonicalization failed: {}", e)))?;

        let mut hasher = Sha256::new();
        hasher.update(&jcs_bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}
