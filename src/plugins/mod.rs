//! Plugin entries contributed to the generated bundler configuration.

pub mod clean;
pub mod manifest;

use serde_json::Value;

/// Relative placement of plugin entries in the generated configuration.
/// Entries are emitted in descending priority; ties keep registration order.
pub mod priority {
    pub const MANIFEST: i32 = 20;
    pub const CLEAN: i32 = 10;
}

/// A plugin the generated configuration instantiates downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginEntry {
    /// Downstream plugin identifier
    pub name: String,

    /// Final options object for the plugin
    pub options: Value,

    /// Facade-internal ordering; not part of the emitted configuration
    pub priority: i32,
}
