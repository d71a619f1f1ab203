//! Template interpolation for injected context.
//!
//! Supports `{{ $name }}` placeholders; anything without a value is left as-is.

use std::collections::BTreeMap;

/// Values available for template interpolation, keyed by placeholder name.
///
/// A `BTreeMap` keeps substitution order stable so rendering is deterministic
/// even when one value contains another placeholder.
pub type Values = BTreeMap<String, String>;

/// Interpolate a template string with the given values.
///
/// Missing values are left as-is in the template.
///
/// # Examples
///
/// ```
/// use spur::template::{Values, interpolate};
///
/// let mut values = Values::new();
/// values.insert("validation".to_string(), "cargo test".to_string());
///
/// let result = interpolate("Run `{{ $validation }}` before finishing.", &values);
/// assert_eq!(result, "Run `cargo test` before finishing.");
/// ```
pub fn interpolate(template: &str, values: &Values) -> String {
    let mut result = template.to_string();

    for (key, value) in values {
        let pattern = format!("{{{{ ${key} }}}}");
        result = result.replace(&pattern, value);
    }

    result
}

/// Convenience for the common single-value case.
pub fn interpolate_one(template: &str, key: &str, value: &str) -> String {
    let values = Values::from([(key.to_string(), value.to_string())]);
    interpolate(template, &values)
}
