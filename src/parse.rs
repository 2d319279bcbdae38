//! Parse the input document with JSON-path context in error messages.

use serde_json::Value;

use crate::error::GenerateError;

/// Parse one JSON document and check that its root is an object or array.
/// Malformed input reports the JSON path to the offending token.
pub fn parse_document(src: &str) -> Result<Value, GenerateError> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return Err(GenerateError::EmptyInput);
    }

    let de = &mut serde_json::Deserializer::from_str(trimmed);
    let value: Value = match serde_path_to_error::deserialize(de) {
        Ok(v) => v,
        Err(err) => {
            let path = err.path().to_string();
            return Err(GenerateError::MalformedJson {
                path,
                message: err.into_inner().to_string(),
            });
        }
    };

    match &value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(GenerateError::UnsupportedRoot { found: kind_name(other) }),
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
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

    #[test]
    fn accepts_objects_and_arrays() {
        assert!(parse_document(r#"{"a": 1}"#).is_ok());
        assert!(parse_document("[1, 2]").is_ok());
        assert!(parse_document("  \n {}\n").is_ok());
    }

    #[test]
    fn rejects_scalar_roots() {
        let err = parse_document("42").unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedRoot { found: "number" }));
        let err = parse_document(r#""hello""#).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedRoot { found: "string" }));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse_document("   "), Err(GenerateError::EmptyInput)));
    }

    #[test]
    fn malformed_json_carries_the_path() {
        let err = parse_document(r#"{"a": {"b": [1, oops]}}"#).unwrap_err();
        match err {
            GenerateError::MalformedJson { path, .. } => assert!(path.contains("a.b")),
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }
}
