//! Side-by-side comparison of two event detail payloads.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::models::EventDetail;

/// One row of a comparison column: a field name, this side's value (if
/// present), and whether it disagrees with the other side.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffLine {
    pub name: String,
    pub value: Option<Value>,
    pub differs: bool,
}

/// Rows for rendering `source` next to `comparison`, sorted by field
/// name. Fields absent or null on both sides are dropped; a field absent
/// or null on one side shows up as a differing row with no value.
pub fn diff_lines(source: &EventDetail, comparison: &EventDetail) -> Vec<DiffLine> {
    let names: BTreeSet<&String> = source
        .fields
        .keys()
        .chain(comparison.fields.keys())
        .collect();

    names
        .into_iter()
        .filter_map(|name| {
            let value = present(source.fields.get(name));
            let other = present(comparison.fields.get(name));

            match (value, other) {
                (None, None) => None,
                (value, other) => Some(DiffLine {
                    name: name.clone(),
                    differs: value != other,
                    value: value.cloned(),
                }),
            }
        })
        .collect()
}

/// JSON null is treated the same as a missing field.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// A display string for one side of a row; missing values render as
/// `undefined`.
pub fn render_value(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}
