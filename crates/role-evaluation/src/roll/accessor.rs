use serde_json::{Map, Value};
use std::fmt;

/// Ordered key segments locating a value inside a roll document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath<'a>(&'a [&'a str]);

impl<'a> FieldPath<'a> {
    pub const ROOT: FieldPath<'static> = FieldPath(&[]);

    pub const fn new(segments: &'a [&'a str]) -> Self {
        Self(segments)
    }

    pub const fn segments(&self) -> &'a [&'a str] {
        self.0
    }

    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> From<&'a [&'a str]> for FieldPath<'a> {
    fn from(segments: &'a [&'a str]) -> Self {
        Self(segments)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for FieldPath<'a> {
    fn from(segments: &'a [&'a str; N]) -> Self {
        Self(segments.as_slice())
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        f.write_str(&self.0.join("."))
    }
}

/// Walks `path` through nested objects. Missing keys, non-object
/// intermediates and explicit `null` all resolve to `None`.
pub fn resolve<'v>(record: &'v Value, path: FieldPath<'_>) -> Option<&'v Value> {
    let mut current = record;
    for segment in path.segments() {
        current = current.as_object()?.get(*segment)?;
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Reads a scalar at `path` as display text, or `default` when absent.
///
/// Strings are returned verbatim (an empty string counts as present), numbers
/// and booleans use their JSON spelling. Objects and arrays are not scalars
/// and yield `default`.
pub fn get(record: &Value, path: FieldPath<'_>, default: &str) -> String {
    resolve(record, path)
        .and_then(scalar_text)
        .unwrap_or_else(|| default.to_string())
}

/// Display text of a scalar; `None` for null, objects and arrays.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn get_or_empty(record: &Value, path: FieldPath<'_>) -> String {
    get(record, path, "")
}

/// Returns the list at `path`, or `default` unless the value is literally an
/// array.
pub fn get_array<'v>(record: &'v Value, path: FieldPath<'_>, default: &'v [Value]) -> &'v [Value] {
    match resolve(record, path) {
        Some(Value::Array(items)) => items.as_slice(),
        _ => default,
    }
}

/// Cardinality-agnostic view over a field that the roll schema emits either
/// as a single object or as a list of objects.
#[derive(Debug, Clone, Copy)]
pub enum Repeated<'v> {
    Absent,
    Single(&'v Map<String, Value>),
    Many(&'v [Value]),
    Scalar(&'v Value),
}

impl<'v> Repeated<'v> {
    fn classify(value: Option<&'v Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Object(map)) => Self::Single(map),
            Some(Value::Array(items)) => Self::Many(items.as_slice()),
            Some(other) => Self::Scalar(other),
        }
    }

    pub fn at(record: &'v Value, path: FieldPath<'_>) -> Self {
        Self::classify(resolve(record, path))
    }

    /// Object entries in document order; non-object list members are skipped.
    pub fn objects(&self) -> Vec<&'v Map<String, Value>> {
        match *self {
            Self::Single(map) => vec![map],
            Self::Many(items) => items.iter().filter_map(Value::as_object).collect(),
            Self::Absent | Self::Scalar(_) => Vec::new(),
        }
    }
}

/// JSON kind name used in diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "RLUEx": {
                "RL0201": {
                    "RL0201x": { "RL0201Ax": "VILLE DE KIRKLAND", "RL0201Bx": "" },
                    "RL0201U": "1"
                },
                "RL0402A": 1516700,
                "RL0303A": null,
                "RL0504": { "RL0504x": [ { "RL0504Ax": "F-2.1" } ] }
            }
        })
    }

    #[test]
    fn get_walks_nested_objects() {
        let record = sample();
        let path = FieldPath::new(&["RLUEx", "RL0201", "RL0201x", "RL0201Ax"]);
        assert_eq!(get(&record, path, ""), "VILLE DE KIRKLAND");
    }

    #[test]
    fn empty_string_counts_as_present() {
        let record = sample();
        let path = FieldPath::new(&["RLUEx", "RL0201", "RL0201x", "RL0201Bx"]);
        assert_eq!(get(&record, path, "fallback"), "");
    }

    #[test]
    fn null_and_missing_resolve_to_default() {
        let record = sample();
        assert_eq!(get(&record, FieldPath::new(&["RLUEx", "RL0303A"]), "-"), "-");
        assert_eq!(get(&record, FieldPath::new(&["RLUEx", "RL9999"]), "-"), "-");
        assert_eq!(
            get(&record, FieldPath::new(&["RLUEx", "RL0402A", "deeper"]), "-"),
            "-"
        );
    }

    #[test]
    fn numbers_are_rendered_as_text() {
        let record = sample();
        assert_eq!(get_or_empty(&record, FieldPath::new(&["RLUEx", "RL0402A"])), "1516700");
    }

    #[test]
    fn objects_are_not_scalars() {
        let record = sample();
        assert_eq!(get(&record, FieldPath::new(&["RLUEx", "RL0201"]), "-"), "-");
    }

    #[test]
    fn get_array_requires_a_literal_list() {
        let record = sample();
        let list = get_array(&record, FieldPath::new(&["RLUEx", "RL0504", "RL0504x"]), &[]);
        assert_eq!(list.len(), 1);

        let not_list = get_array(&record, FieldPath::new(&["RLUEx", "RL0201", "RL0201x"]), &[]);
        assert!(not_list.is_empty());
    }

    #[test]
    fn repeated_wraps_objects_and_lists() {
        let record = sample();
        let single = Repeated::at(&record, FieldPath::new(&["RLUEx", "RL0201", "RL0201x"]));
        assert_eq!(single.objects().len(), 1);

        let many = Repeated::at(&record, FieldPath::new(&["RLUEx", "RL0504", "RL0504x"]));
        assert_eq!(
            many.objects().first().and_then(|entry| entry.get("RL0504Ax")),
            Some(&json!("F-2.1"))
        );

        let scalar = Repeated::at(&record, FieldPath::new(&["RLUEx", "RL0402A"]));
        assert!(matches!(scalar, Repeated::Scalar(_)));
        assert!(scalar.objects().is_empty());
    }

    #[test]
    fn field_path_displays_dotted() {
        let path = FieldPath::new(&["RLUEx", "RL0101"]);
        assert_eq!(path.to_string(), "RLUEx.RL0101");
        assert_eq!(FieldPath::ROOT.to_string(), "$");
    }

    proptest! {
        #[test]
        fn absent_paths_return_the_default(
            segments in proptest::collection::vec("[A-Z]{2}[0-9]{4}q", 1..4),
            default in "\\PC{0,12}",
        ) {
            let record = sample();
            let borrowed: Vec<&str> = segments.iter().map(String::as_str).collect();
            prop_assert_eq!(get(&record, FieldPath::new(&borrowed), &default), default);
        }
    }
}
