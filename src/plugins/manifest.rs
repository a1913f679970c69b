//! Asset-manifest plugin adapter.
//!
//! Every build emits manifest.json, mapping source asset names to their
//! emitted (possibly hashed) filenames.

use serde_json::json;

use crate::config::BuildConfig;
use crate::plugins::{priority, PluginEntry};
use packlane_overrides::{apply_options_callback, OverrideError};

/// Append the manifest plugin entry.
pub fn add_manifest_plugin(
    entries: &mut Vec<PluginEntry>,
    build: &BuildConfig,
) -> Result<(), OverrideError> {
    // Manifest keys are prefixed with the public path, minus its leading
    // slash, so they match how templates reference the assets.
    let base_path = build.settings.public_path.trim_start_matches('/');

    let defaults = json!({
        "fileName": "manifest.json",
        "basePath": base_path,
        "writeToFileEmit": true
    });

    let options = apply_options_callback(defaults, build.manifest_options.as_ref())?;

    entries.push(PluginEntry {
        name: "manifest".to_string(),
        options,
        priority: priority::MANIFEST,
    });

    Ok(())
}
