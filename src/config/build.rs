//! User-facing build configuration.
//!
//! `BuildConfig` is the object the fluent API populates before the generator
//! turns it into a bundler configuration; it pairs the resolved settings
//! with the override slots only the Rust API can fill.

use std::path::PathBuf;

use packlane_overrides::OverrideSpec;

use super::defaults::BuildSettings;

/// Build environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Production,
}

impl Environment {
    /// Parse a CLI-style environment name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dev" => Some(Environment::Dev),
            "production" => Some(Environment::Production),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Production => "production",
        }
    }
}

/// Where a configuration build runs.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    /// Root of the host JavaScript project (where package.json lives)
    pub project_root: PathBuf,

    /// Target environment
    pub environment: Environment,
}

impl RuntimeContext {
    pub fn new(project_root: impl Into<PathBuf>, environment: Environment) -> Self {
        Self {
            project_root: project_root.into(),
            environment,
        }
    }
}

/// Mutable facade configuration populated through the fluent API.
pub struct BuildConfig {
    /// Resolved settings (builtin defaults unless built from layers)
    pub settings: BuildSettings,

    /// Override slot for the lint loader options
    pub eslint_options: Option<OverrideSpec>,

    /// Override slot for the cleanup plugin options
    pub clean_options: Option<OverrideSpec>,

    /// Override slot for the manifest plugin options
    pub manifest_options: Option<OverrideSpec>,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::from_settings(BuildSettings::default())
    }

    pub fn from_settings(settings: BuildSettings) -> Self {
        Self {
            settings,
            eslint_options: None,
            clean_options: None,
            manifest_options: None,
        }
    }

    /// Run the lint loader as a pre-step of the build.
    pub fn enable_eslint(&mut self) -> &mut Self {
        self.settings.lint.enabled = true;
        self
    }

    /// Also lint .vue single-file components.
    pub fn lint_vue_files(&mut self, lint_vue: bool) -> &mut Self {
        self.settings.lint.lint_vue = lint_vue;
        self
    }

    /// Register an override for the lint loader options.
    pub fn configure_eslint_options(&mut self, spec: OverrideSpec) -> &mut Self {
        self.eslint_options = Some(spec);
        self
    }

    /// Clean the output directory before each build.
    pub fn cleanup_output_before_build(&mut self) -> &mut Self {
        self.settings.clean.enabled = true;
        self
    }

    /// Restrict cleanup to the given glob patterns.
    pub fn cleanup_patterns(&mut self, patterns: Vec<String>) -> &mut Self {
        self.settings.clean.patterns = patterns;
        self
    }

    /// Register an override for the cleanup plugin options.
    pub fn configure_clean_options(&mut self, spec: OverrideSpec) -> &mut Self {
        self.clean_options = Some(spec);
        self
    }

    /// Register an override for the manifest plugin options.
    pub fn configure_manifest_options(&mut self, spec: OverrideSpec) -> &mut Self {
        self.manifest_options = Some(spec);
        self
    }

    /// Set the output directory, relative to the project root.
    pub fn set_output_path(&mut self, output_path: impl Into<String>) -> &mut Self {
        self.settings.output_path = output_path.into();
        self
    }

    /// Set the public URL prefix assets are served under.
    pub fn set_public_path(&mut self, public_path: impl Into<String>) -> &mut Self {
        self.settings.public_path = public_path.into();
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_configuration() {
        let mut config = BuildConfig::new();
        config
            .enable_eslint()
            .lint_vue_files(true)
            .cleanup_output_before_build()
            .cleanup_patterns(vec!["**/*.js".to_string()]);

        assert!(config.settings.lint.enabled);
        assert!(config.settings.lint.lint_vue);
        assert!(config.settings.clean.enabled);
        assert_eq!(config.settings.clean.patterns, vec!["**/*.js"]);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("dev"), Some(Environment::Dev));
        assert_eq!(Environment::parse("production"), Some(Environment::Production));
        assert_eq!(Environment::parse("staging"), None);
    }
}
