//! packlane - configuration-generation facade for JavaScript bundler builds.
//!
//! packlane translates a small set of user-facing settings ("lint my code",
//! "clean the output directory before building") into the option objects and
//! plugin entries a JavaScript bundler expects. Adapters validate
//! preconditions, merge user overrides into default option objects, and hand
//! the result to the generated configuration.

pub mod config;
pub mod features;
pub mod generator;
pub mod loaders;
pub mod plugins;

pub use config::{
    BuildConfig, BuildSettings, ConfigError, EffectiveSettings, Environment, RuntimeContext,
    SettingsFile,
};
pub use generator::{generate, GeneratorError};
pub use packlane_overrides::{
    apply_options_callback, OverrideCallback, OverrideError, OverrideOutcome, OverrideSpec,
};
