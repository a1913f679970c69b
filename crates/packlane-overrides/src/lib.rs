//! Defaults-plus-override resolution for bundler options objects.
//!
//! Every adapter in the facade builds a defaults object for the tool it
//! configures (a lint loader, a cleanup plugin) and lets the user customize
//! it through a registered override. The resolution rules live here so all
//! adapters agree on them: an override may mutate the defaults in place,
//! or hand back a replacement object that is used instead.

use std::fmt;

use serde_json::Value;

/// What an override callback decided to do with the defaults it was given.
#[derive(Debug)]
pub enum OverrideOutcome {
    /// Keep the defaults object, including any in-place mutation the
    /// callback performed.
    UseDefaults,
    /// Discard the defaults object entirely and use this value instead,
    /// even if the callback also mutated the defaults.
    Replace(Value),
}

/// A boxed override callback.
///
/// The callback receives mutable access to the defaults object and reports
/// whether the (possibly mutated) defaults or a replacement should be used.
pub type OverrideCallback = Box<dyn Fn(&mut Value) -> OverrideOutcome + Send + Sync>;

/// A user-supplied override occupying an adapter's callback slot.
///
/// Slots are duck-typed at the edges of the facade: embedders that accept
/// overrides from dynamic sources can register any value, so the invocable
/// check happens when the slot is applied, not when it is filled.
pub enum OverrideSpec {
    /// An invocable override.
    Callback(OverrideCallback),
    /// A non-invocable value. Applying it always fails with
    /// [`OverrideError::InvalidArgumentKind`].
    Value(Value),
}

impl OverrideSpec {
    /// Wrap a closure as an invocable override.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&mut Value) -> OverrideOutcome + Send + Sync + 'static,
    {
        OverrideSpec::Callback(Box::new(f))
    }

    /// Wrap a raw value handed over by a dynamic embedder.
    pub fn raw(value: Value) -> Self {
        OverrideSpec::Value(value)
    }
}

impl fmt::Debug for OverrideSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideSpec::Callback(_) => f.write_str("OverrideSpec::Callback(..)"),
            OverrideSpec::Value(v) => f.debug_tuple("OverrideSpec::Value").field(v).finish(),
        }
    }
}

/// Errors from override resolution.
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("options override must be a callback, found a {found} value")]
    InvalidArgumentKind { found: &'static str },
}

/// Resolve a defaults object against an optional user override.
///
/// - No override registered: returns `defaults` untouched.
/// - `Callback`: invoked exactly once with mutable access to `defaults`.
///   [`OverrideOutcome::UseDefaults`] keeps the (possibly mutated) defaults;
///   [`OverrideOutcome::Replace`] discards them in favor of the returned
///   object, including any mutation made before returning.
/// - `Value`: rejected with [`OverrideError::InvalidArgumentKind`].
///
/// No defensive copy is made. Callers that need the original defaults after
/// resolution must clone before calling. Panics raised inside the callback
/// are not caught here and unwind to the caller.
pub fn apply_options_callback(
    mut defaults: Value,
    spec: Option<&OverrideSpec>,
) -> Result<Value, OverrideError> {
    match spec {
        None => Ok(defaults),
        Some(OverrideSpec::Callback(callback)) => match callback(&mut defaults) {
            OverrideOutcome::UseDefaults => Ok(defaults),
            OverrideOutcome::Replace(replacement) => Ok(replacement),
        },
        Some(OverrideSpec::Value(value)) => Err(OverrideError::InvalidArgumentKind {
            found: json_kind(value),
        }),
    }
}

/// Human name of a JSON value's kind, for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
