//! Shared helpers for wire-format conversion.
//!
//! This module defines the record-kind discriminator and the permissive
//! field accessors used by all domain models: absent or null wire keys
//! become `None`, while present enum strings must parse exactly.

use serde_json::Value;

use crate::error::WrenchError;

/// The kind of record a domain object represents.
///
/// Replaces string bookkeeping on the objects themselves; update dispatch
/// matches on this enum and the wire export never contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// An inventory item (stocked unit or service line).
    Inventory,
    /// A repair/service checkin ticket.
    CheckinTicket,
}

impl RecordKind {
    /// Human-readable kind name, used in fault messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Inventory => "inventory item",
            RecordKind::CheckinTicket => "checkin ticket",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Folds a wire token into the canonical member-name form: trimmed,
/// uppercased, spaces replaced with underscores.
pub(crate) fn enum_token(input: &str) -> String {
    input.trim().to_uppercase().replace(' ', "_")
}

/// Reads an optional enum field.
///
/// Absent, null, and empty-string values are treated as "not set" (the
/// service omits or blanks unset taxonomy fields). Any other present value
/// must be a string that parses, else the conversion fails with a
/// validation fault naming the offending input.
pub(crate) fn parse_enum_field<T>(
    data: &Value,
    key: &str,
    family: &'static str,
    parse: impl FnOnce(&str) -> Result<T, WrenchError>,
) -> Result<Option<T>, WrenchError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => parse(s).map(Some),
        Some(other) => Err(WrenchError::invalid_enum(other.to_string(), family)),
    }
}

/// Reads an optional string field.
pub(crate) fn get_str(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Reads an optional boolean field.
pub(crate) fn get_bool(data: &Value, key: &str) -> Option<bool> {
    data.get(key).and_then(Value::as_bool)
}

/// Reads an optional integer field.
pub(crate) fn get_i64(data: &Value, key: &str) -> Option<i64> {
    data.get(key).and_then(Value::as_i64)
}

/// Reads an optional float field.
pub(crate) fn get_f64(data: &Value, key: &str) -> Option<f64> {
    data.get(key).and_then(Value::as_f64)
}

/// Reads an optional field as a raw JSON value, mapping null to `None`.
pub(crate) fn get_value(data: &Value, key: &str) -> Option<Value> {
    data.get(key).filter(|v| !v.is_null()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_token_folds_case_and_spaces() {
        assert_eq!(enum_token("Special Order"), "SPECIAL_ORDER");
        assert_eq!(enum_token("  screen protector "), "SCREEN_PROTECTOR");
        assert_eq!(enum_token("NEW"), "NEW");
    }

    #[test]
    fn test_parse_enum_field_absent_null_and_empty() {
        let data = json!({"present": null, "blank": ""});
        let parse = |s: &str| -> Result<String, WrenchError> { Ok(s.to_string()) };

        assert!(parse_enum_field(&data, "missing", "condition", parse)
            .unwrap()
            .is_none());
        assert!(parse_enum_field(&data, "present", "condition", parse)
            .unwrap()
            .is_none());
        assert!(parse_enum_field(&data, "blank", "condition", parse)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_parse_enum_field_rejects_non_string() {
        let data = json!({"condition": 7});
        let err = parse_enum_field(&data, "condition", "condition", |s| {
            Ok::<_, WrenchError>(s.to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("condition"));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_get_helpers_map_null_to_none() {
        let data = json!({"a": null, "b": "x", "c": true, "d": 3, "e": 1.5});
        assert_eq!(get_str(&data, "a"), None);
        assert_eq!(get_str(&data, "b"), Some("x".to_string()));
        assert_eq!(get_bool(&data, "c"), Some(true));
        assert_eq!(get_i64(&data, "d"), Some(3));
        assert_eq!(get_f64(&data, "e"), Some(1.5));
        assert_eq!(get_value(&data, "a"), None);
        assert_eq!(get_value(&data, "d"), Some(json!(3)));
    }
}
