//! Settings layer merge.
//!
//! Merge discipline across layers:
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars and null: override (last wins)

use serde_json::map::Entry;
use serde_json::Value;

/// Merge `overlay` into `base` in place.
///
/// Objects merge recursively by key; arrays, scalars, and null from the
/// overlay replace whatever the base held under the same key.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.entry(key) {
                    Entry::Occupied(mut occupied) => {
                        deep_merge(occupied.get_mut(), overlay_value);
                    }
                    Entry::Vacant(vacant) => {
                        vacant.insert(overlay_value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Merge settings layers in order; the first is the base, the last has the
/// highest precedence.
pub fn merge_layers(layers: Vec<Value>) -> Value {
    let mut merged = Value::Null;
    for layer in layers {
        deep_merge(&mut merged, layer);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let mut base = json!({"output_path": "public/build"});
        deep_merge(&mut base, json!({"output_path": "dist"}));
        assert_eq!(base["output_path"], "dist");
    }

    #[test]
    fn test_object_deep_merge() {
        let mut base = json!({
            "lint": {
                "enabled": false,
                "lint_vue": false
            }
        });
        deep_merge(&mut base, json!({"lint": {"enabled": true}}));

        // enabled overridden, sibling key preserved
        assert_eq!(base["lint"]["enabled"], true);
        assert_eq!(base["lint"]["lint_vue"], false);
    }

    #[test]
    fn test_array_replace() {
        let mut base = json!({"clean": {"patterns": ["**/*"]}});
        deep_merge(&mut base, json!({"clean": {"patterns": ["**/*.js", "**/*.css"]}}));

        let patterns = base["clean"]["patterns"].as_array().unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0], "**/*.js");
    }

    #[test]
    fn test_add_new_key() {
        let mut base = json!({"output_path": "public/build"});
        deep_merge(&mut base, json!({"public_path": "/build"}));

        assert_eq!(base["output_path"], "public/build");
        assert_eq!(base["public_path"], "/build");
    }

    #[test]
    fn test_null_override() {
        let mut base = json!({"filename": "[name].js"});
        deep_merge(&mut base, json!({"filename": null}));
        assert!(base["filename"].is_null());
    }

    #[test]
    fn test_merge_layers_precedence() {
        let builtin = json!({
            "output_path": "public/build",
            "lint": {"enabled": false}
        });
        let repo = json!({
            "output_path": "dist",
            "lint": {"enabled": true}
        });
        let cli = json!({
            "output_path": "out"
        });

        let merged = merge_layers(vec![builtin, repo, cli]);

        // CLI wins for output_path, repo wins for lint.enabled
        assert_eq!(merged["output_path"], "out");
        assert_eq!(merged["lint"]["enabled"], true);
    }
}
