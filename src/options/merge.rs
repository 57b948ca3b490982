//! Recursive default/override merge for option trees.

use toml::{Table, Value};

/// Layer `overrides` on top of `defaults`.
///
/// Nested tables merge key by key; any other override value replaces the
/// default outright. Keys unknown to `defaults` pass through unchanged.
#[must_use]
pub fn merge(defaults: &Table, overrides: &Table) -> Table {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        let next = match (merged.get(key), value) {
            (Some(Value::Table(base)), Value::Table(layer)) => Value::Table(merge(base, layer)),
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}
