//! Merge object-like array elements into one representative synthetic object.
//!
//! The synthetic object is re-fed through the normal object-inference path,
//! so arrays of objects at any nesting depth are handled uniformly.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::error::Diagnostic;
use crate::infer::{classify, ValueKind};

/// Merge `elements` into a single object:
/// the key set is the first-seen-order union over all elements; each key
/// gets one representative value when exactly one non-null value kind was
/// observed for it, and null otherwise (no evidence, or ambiguous evidence
/// with a diagnostic; per-field union types are out of scope).
pub fn merge_elements(
    elements: &[&Map<String, Value>],
    detect_dates: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Map<String, Value> {
    let mut buckets: IndexMap<&str, Vec<&Value>> = IndexMap::new();
    for element in elements {
        for (key, value) in element.iter() {
            buckets.entry(key.as_str()).or_default().push(value);
        }
    }

    let mut merged = Map::new();
    for (key, values) in buckets {
        let kinds: BTreeSet<ValueKind> =
            values.iter().filter_map(|v| classify(v, detect_dates)).collect();

        let mut it = kinds.into_iter();
        match (it.next(), it.next()) {
            // never seen non-null: type stays unresolved
            (None, _) => {
                merged.insert(key.to_string(), Value::Null);
            }
            // one kind: first-seen representative drives further inference
            (Some(kind), None) => {
                let representative = values
                    .iter()
                    .find(|v| classify(v, detect_dates) == Some(kind))
                    .copied()
                    .cloned()
                    .unwrap_or(Value::Null);
                merged.insert(key.to_string(), representative);
            }
            (Some(first), Some(second)) => {
                let mut kinds = vec![first.name(), second.name()];
                kinds.extend(it.map(|k| k.name()));
                tracing::warn!(key, kinds = ?kinds, "ambiguous element type in merged array");
                diagnostics.push(Diagnostic::AmbiguousField { key: key.to_string(), kinds });
                merged.insert(key.to_string(), Value::Null);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn objects(values: &[Value]) -> Vec<&Map<String, Value>> {
        values.iter().map(|v| v.as_object().unwrap()).collect()
    }

    #[test]
    fn key_set_is_the_union_in_first_seen_order() {
        let elements = [json!({"id": 1}), json!({"id": 2, "extra": "x"}), json!({"last": true})];
        let mut diagnostics = Vec::new();
        let merged = merge_elements(&objects(&elements), false, &mut diagnostics);

        let keys: Vec<&String> = merged.keys().collect();
        assert_eq!(keys, ["id", "extra", "last"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn single_kind_picks_the_first_seen_representative() {
        let elements = [json!({"id": null}), json!({"id": 7}), json!({"id": 9})];
        let mut diagnostics = Vec::new();
        let merged = merge_elements(&objects(&elements), false, &mut diagnostics);
        assert_eq!(merged["id"], json!(7));
    }

    #[test]
    fn all_null_stays_null() {
        let elements = [json!({"note": null}), json!({"note": null})];
        let mut diagnostics = Vec::new();
        let merged = merge_elements(&objects(&elements), false, &mut diagnostics);
        assert_eq!(merged["note"], Value::Null);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn conflicting_kinds_null_the_field_and_diagnose() {
        let elements = [json!({"price": 10}), json!({"price": "cheap"})];
        let mut diagnostics = Vec::new();
        let merged = merge_elements(&objects(&elements), false, &mut diagnostics);

        assert_eq!(merged["price"], Value::Null);
        assert_eq!(
            diagnostics,
            [Diagnostic::AmbiguousField { key: "price".into(), kinds: vec!["int", "string"] }]
        );
    }

    #[test]
    fn false_and_zero_still_count_as_evidence() {
        // only nulls are filtered, not falsy values
        let elements = [json!({"flag": false, "count": 0}), json!({"flag": null, "count": null})];
        let mut diagnostics = Vec::new();
        let merged = merge_elements(&objects(&elements), false, &mut diagnostics);
        assert_eq!(merged["flag"], json!(false));
        assert_eq!(merged["count"], json!(0));
    }

    #[test]
    fn date_strings_and_plain_strings_conflict_only_when_dates_are_on() {
        let elements = [json!({"when": "2024-01-05"}), json!({"when": "later"})];

        let mut diagnostics = Vec::new();
        let merged = merge_elements(&objects(&elements), false, &mut diagnostics);
        assert_eq!(merged["when"], json!("2024-01-05"));
        assert!(diagnostics.is_empty());

        let mut diagnostics = Vec::new();
        let merged = merge_elements(&objects(&elements), true, &mut diagnostics);
        assert_eq!(merged["when"], Value::Null);
        assert_eq!(diagnostics.len(), 1);
    }
}
