//! Tagged scalar values held by the preference document.

use std::fmt;

use serde_json::Value as JsonValue;

/// Scalar kind discriminator. The kind of a key is fixed by its first write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKind {
    Float,
    Int,
    Str,
}

impl fmt::Display for PrefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefKind::Float => write!(f, "float"),
            PrefKind::Int => write!(f, "int"),
            PrefKind::Str => write!(f, "string"),
        }
    }
}

/// A single preference value: one scalar tagged with its kind.
///
/// The tag exists in memory only. On disk the document is a bare JSON
/// object, so a number without a fractional component always reads back as
/// an [`PrefValue::Int`].
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    Float(f64),
    Int(i64),
    Str(String),
}

impl PrefValue {
    pub fn kind(&self) -> PrefKind {
        match self {
            PrefValue::Float(_) => PrefKind::Float,
            PrefValue::Int(_) => PrefKind::Int,
            PrefValue::Str(_) => PrefKind::Str,
        }
    }

    /// Converts a raw JSON value into a tagged scalar. Non-scalar values
    /// (objects, arrays, booleans, null) have no representation and map to
    /// `None`.
    pub fn from_json(value: &JsonValue) -> Option<PrefValue> {
        match value {
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(PrefValue::Int(i))
                } else {
                    n.as_f64().map(PrefValue::Float)
                }
            }
            JsonValue::String(s) => Some(PrefValue::Str(s.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            PrefValue::Float(v) => JsonValue::from(*v),
            PrefValue::Int(v) => JsonValue::from(*v),
            PrefValue::Str(v) => JsonValue::from(v.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_with_fraction_reads_as_float() {
        assert_eq!(PrefValue::from_json(&json!(3.5)), Some(PrefValue::Float(3.5)));
    }

    #[test]
    fn test_number_without_fraction_reads_as_int() {
        assert_eq!(PrefValue::from_json(&json!(3)), Some(PrefValue::Int(3)));
    }

    #[test]
    fn test_string_reads_as_str() {
        assert_eq!(
            PrefValue::from_json(&json!("hello")),
            Some(PrefValue::Str("hello".to_string()))
        );
    }

    #[test]
    fn test_non_scalars_are_rejected() {
        assert_eq!(PrefValue::from_json(&json!(null)), None);
        assert_eq!(PrefValue::from_json(&json!(true)), None);
        assert_eq!(PrefValue::from_json(&json!([1, 2])), None);
        assert_eq!(PrefValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_json_round_trip_preserves_kind() {
        for value in [
            PrefValue::Float(0.8),
            PrefValue::Int(42),
            PrefValue::Str("x".to_string()),
        ] {
            let round_tripped = PrefValue::from_json(&value.to_json()).expect("scalar");
            assert_eq!(round_tripped.kind(), value.kind());
            assert_eq!(round_tripped, value);
        }
    }
}
