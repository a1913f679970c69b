//! Output-cleanup plugin adapter.
//!
//! When output cleanup is enabled the generated configuration gets a
//! clean-output plugin entry. The asset manifest always survives a clean;
//! other tooling reads it between builds.

use globset::Glob;
use serde_json::{json, Value};

use crate::config::BuildConfig;
use crate::plugins::{priority, PluginEntry};
use packlane_overrides::{apply_options_callback, OverrideError};

/// Negation appended after the user patterns.
const MANIFEST_GUARD: &str = "!manifest.json";

/// Error types for the cleanup adapter
#[derive(Debug, thiserror::Error)]
pub enum CleanPluginError {
    #[error("invalid cleanup pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error(transparent)]
    Override(#[from] OverrideError),
}

/// Append the clean-output plugin entry when cleanup is enabled.
pub fn add_clean_plugin(
    entries: &mut Vec<PluginEntry>,
    build: &BuildConfig,
) -> Result<(), CleanPluginError> {
    if !build.settings.clean.enabled {
        return Ok(());
    }

    let mut patterns: Vec<Value> = Vec::new();
    for pattern in &build.settings.clean.patterns {
        // A leading '!' negates the pattern downstream; the glob itself
        // still has to parse.
        let bare = pattern.strip_prefix('!').unwrap_or(pattern);
        Glob::new(bare).map_err(|e| CleanPluginError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        patterns.push(Value::String(pattern.clone()));
    }
    patterns.push(Value::String(MANIFEST_GUARD.to_string()));

    let defaults = json!({
        "cleanOnceBeforeBuildPatterns": patterns,
        "dry": false,
        "verbose": false
    });

    let options = apply_options_callback(defaults, build.clean_options.as_ref())?;

    entries.push(PluginEntry {
        name: "clean-output".to_string(),
        options,
        priority: priority::CLEAN,
    });

    Ok(())
}
