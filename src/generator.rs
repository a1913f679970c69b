//! Bundler configuration assembly.
//!
//! Walks a populated `BuildConfig` and produces the configuration object the
//! bundler consumes: module rules, plugin entries, and the output section.

use serde_json::{json, Value};

use crate::config::{BuildConfig, Environment, RuntimeContext};
use crate::loaders::eslint::{self, EslintError};
use crate::plugins::clean::CleanPluginError;
use crate::plugins::{clean, manifest, PluginEntry};
use packlane_overrides::OverrideError;

/// Error types for configuration generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Eslint(#[from] EslintError),

    #[error(transparent)]
    CleanPlugin(#[from] CleanPluginError),

    #[error(transparent)]
    Override(#[from] OverrideError),
}

/// Generate the bundler configuration for the given context and settings.
pub fn generate(ctx: &RuntimeContext, build: &BuildConfig) -> Result<Value, GeneratorError> {
    let mut rules = Vec::new();
    if build.settings.lint.enabled {
        rules.push(eslint_rule(ctx, build)?);
    }

    let mut entries: Vec<PluginEntry> = Vec::new();
    manifest::add_manifest_plugin(&mut entries, build)?;
    clean::add_clean_plugin(&mut entries, build)?;
    entries.sort_by(|a, b| b.priority.cmp(&a.priority));

    let plugins: Vec<Value> = entries
        .iter()
        .map(|entry| {
            json!({
                "name": entry.name,
                "options": entry.options
            })
        })
        .collect();

    Ok(json!({
        "module": { "rules": rules },
        "plugins": plugins,
        "output": output_section(ctx, build)
    }))
}

/// The lint rule, enforced before other loaders run.
fn eslint_rule(ctx: &RuntimeContext, build: &BuildConfig) -> Result<Value, EslintError> {
    let options = eslint::loader_options(ctx, build)?;
    let test = eslint::file_test(build);

    Ok(json!({
        "test": test.as_str(),
        "loader": "eslint-loader",
        "exclude": "node_modules",
        "enforce": "pre",
        "options": options
    }))
}

fn output_section(ctx: &RuntimeContext, build: &BuildConfig) -> Value {
    let filename = match ctx.environment {
        Environment::Dev => &build.settings.filename,
        Environment::Production => &build.settings.production_filename,
    };

    json!({
        "path": ctx.project_root.join(&build.settings.output_path).to_string_lossy(),
        "publicPath": build.settings.public_path,
        "filename": filename
    })
}
