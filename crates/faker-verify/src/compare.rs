//! Structural comparison of generated values.

use faker_core::{FakeValue, Record, SchemaCatalog};
use std::collections::HashMap;

/// Placeholder shown for a value present on one side only.
pub const ABSENT: &str = "<absent>";

/// Result of comparing two values.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareResult {
    /// Values match.
    Match,
    /// Values diverge at `path`.
    Mismatch {
        path: String,
        expected: String,
        actual: String,
    },
    /// Value expected at `path` is missing.
    Missing { path: String },
}

impl CompareResult {
    /// Check if the comparison found no difference.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// Path of the first difference, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Match => None,
            Self::Mismatch { path, .. } | Self::Missing { path } => Some(path),
        }
    }
}

/// Compare two records field by field, in schema order.
pub fn compare_records(
    expected: &Record,
    actual: &Record,
    catalog: &SchemaCatalog,
) -> CompareResult {
    compare_record_at(expected, actual, catalog, "$")
}

/// Compare two values recursively.
///
/// Sequences compare element-wise in order; mappings compare by key,
/// regardless of entry order. The first difference wins.
pub fn compare_values(
    expected: &FakeValue,
    actual: &FakeValue,
    catalog: &SchemaCatalog,
) -> CompareResult {
    compare_at(expected, actual, catalog, "$")
}

fn compare_at(
    expected: &FakeValue,
    actual: &FakeValue,
    catalog: &SchemaCatalog,
    path: &str,
) -> CompareResult {
    match (expected, actual) {
        (FakeValue::Record(e), FakeValue::Record(a)) => compare_record_at(e, a, catalog, path),

        (FakeValue::Sequence(e), FakeValue::Sequence(a)) => {
            for (i, (ev, av)) in e.iter().zip(a.iter()).enumerate() {
                let result = compare_at(ev, av, catalog, &format!("{path}[{i}]"));
                if !result.is_match() {
                    return result;
                }
            }
            match e.len().cmp(&a.len()) {
                std::cmp::Ordering::Greater => CompareResult::Missing {
                    path: format!("{path}[{}]", a.len()),
                },
                std::cmp::Ordering::Less => CompareResult::Mismatch {
                    path: format!("{path}[{}]", e.len()),
                    expected: ABSENT.to_string(),
                    actual: a[e.len()].to_string(),
                },
                std::cmp::Ordering::Equal => CompareResult::Match,
            }
        }

        (FakeValue::Mapping(e), FakeValue::Mapping(a)) => compare_mappings(e, a, catalog, path),

        (e, a) if e == a => CompareResult::Match,

        (e, a) => CompareResult::Mismatch {
            path: path.to_string(),
            expected: describe(e, a),
            actual: describe(a, e),
        },
    }
}

fn compare_record_at(
    expected: &Record,
    actual: &Record,
    catalog: &SchemaCatalog,
    path: &str,
) -> CompareResult {
    if expected.schema != actual.schema {
        return CompareResult::Mismatch {
            path: path.to_string(),
            expected: format!("record<{}>", expected.schema),
            actual: format!("record<{}>", actual.schema),
        };
    }

    let order: Vec<&str> = match catalog.get_record(&expected.schema) {
        Some(schema) => schema.field_names(),
        None => {
            let mut names: Vec<&str> = expected.fields.keys().map(String::as_str).collect();
            names.sort_unstable();
            names
        }
    };

    for name in &order {
        let field_path = format!("{path}.{name}");
        let result = match (expected.fields.get(*name), actual.fields.get(*name)) {
            (Some(e), Some(a)) => compare_at(e, a, catalog, &field_path),
            (Some(_), None) => CompareResult::Missing { path: field_path },
            (None, Some(a)) => CompareResult::Mismatch {
                path: field_path,
                expected: ABSENT.to_string(),
                actual: a.to_string(),
            },
            (None, None) => CompareResult::Match,
        };
        if !result.is_match() {
            return result;
        }
    }

    let mut extra: Vec<&String> = actual
        .fields
        .keys()
        .filter(|name| !order.contains(&name.as_str()))
        .collect();
    extra.sort();
    match extra.first() {
        Some(name) => CompareResult::Mismatch {
            path: format!("{path}.{name}"),
            expected: ABSENT.to_string(),
            actual: actual.fields[name.as_str()].to_string(),
        },
        None => CompareResult::Match,
    }
}

fn compare_mappings(
    expected: &[(FakeValue, FakeValue)],
    actual: &[(FakeValue, FakeValue)],
    catalog: &SchemaCatalog,
    path: &str,
) -> CompareResult {
    let actual_by_key: HashMap<String, &(FakeValue, FakeValue)> =
        actual.iter().map(|entry| (key_label(&entry.0), entry)).collect();

    for (key, value) in expected {
        let label = key_label(key);
        let entry_path = format!("{path}[\"{label}\"]");
        let Some((actual_key, actual_value)) = actual_by_key.get(&label) else {
            return CompareResult::Missing { path: entry_path };
        };
        if key != actual_key {
            return CompareResult::Mismatch {
                path: entry_path,
                expected: describe(key, actual_key),
                actual: describe(actual_key, key),
            };
        }
        let result = compare_at(value, actual_value, catalog, &entry_path);
        if !result.is_match() {
            return result;
        }
    }

    let expected_keys: Vec<String> = expected.iter().map(|(k, _)| key_label(k)).collect();
    let mut extra: Vec<&(FakeValue, FakeValue)> = actual
        .iter()
        .filter(|(k, _)| !expected_keys.contains(&key_label(k)))
        .collect();
    extra.sort_by_key(|(k, _)| key_label(k));
    match extra.first() {
        Some((key, value)) => CompareResult::Mismatch {
            path: format!("{path}[\"{}\"]", key_label(key)),
            expected: ABSENT.to_string(),
            actual: value.to_string(),
        },
        None => CompareResult::Match,
    }
}

fn key_label(key: &FakeValue) -> String {
    key.key_string().unwrap_or_else(|| key.to_string())
}

/// Render a value, with its kind when the other side has a different kind.
fn describe(value: &FakeValue, other: &FakeValue) -> String {
    if value.kind() == other.kind() {
        value.to_string()
    } else {
        format!("{} {}", value.kind(), value)
    }
}
