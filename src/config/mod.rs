//! Facade settings.
//!
//! Settings resolve through a 3-layer merge:
//! 1. Built-in defaults
//! 2. Repo settings file (packlane.toml)
//! 3. CLI flags

mod build;
mod defaults;
mod effective;
mod file;
mod merge;

pub use build::{BuildConfig, Environment, RuntimeContext};
pub use defaults::{BuildSettings, CleanSettings, LintSettings};
pub use effective::{EffectiveSettings, SettingsOrigin, SettingsSource};
pub use file::{CleanFileSection, ConfigError, LintFileSection, SettingsFile};
pub use merge::{deep_merge, merge_layers};
