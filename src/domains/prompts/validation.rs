//! Parameter validation shared by all prompt builders.
//!
//! Validation runs in two steps: a presence check over the top-level fields a
//! prompt type cannot do without, then typed deserialization into the
//! builder's params struct. Both report `VALIDATION_FAILED`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::error::PromptError;

/// Expected JSON kind of a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Array,
    Object,
    /// A non-blank string.
    String,
}

impl FieldKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::String => value.as_str().is_some_and(|s| !s.trim().is_empty()),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Array => "an array",
            Self::Object => "an object",
            Self::String => "a non-empty string",
        }
    }
}

/// A top-level field a prompt type requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl RequiredField {
    pub const fn array(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Array,
        }
    }

    pub const fn object(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Object,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
        }
    }
}

/// Check that `params` is an object carrying every required field.
///
/// Returns the params unchanged on success.
pub fn validate_required<'a>(
    params: &'a Value,
    fields: &[RequiredField],
) -> Result<&'a Value, PromptError> {
    let object = params
        .as_object()
        .ok_or_else(|| PromptError::validation("params", "must be a JSON object"))?;

    for field in fields {
        match object.get(field.name) {
            None | Some(Value::Null) => {
                warn!(field = field.name, "Required prompt parameter missing");
                return Err(PromptError::validation(field.name, "is required"));
            }
            Some(value) if !field.kind.matches(value) => {
                warn!(field = field.name, "Prompt parameter has the wrong type");
                return Err(PromptError::validation(
                    field.name,
                    format!("must be {}", field.kind.describe()),
                ));
            }
            Some(_) => {}
        }
    }

    Ok(params)
}

/// Deserialize validated params into a builder's typed params struct.
pub fn parse_params<T: DeserializeOwned>(params: &Value) -> Result<T, PromptError> {
    T::deserialize(params).map_err(|e| {
        warn!(error = %e, "Prompt parameters failed schema validation");
        PromptError::validation("params", e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use serde::Deserialize;
    use serde_json::json;

    const FIELDS: &[RequiredField] = &[
        RequiredField::array("challenges"),
        RequiredField::object("user"),
        RequiredField::string("userResponse"),
    ];

    #[test]
    fn test_valid_params_pass_unchanged() {
        let params = json!({"challenges": [], "user": {}, "userResponse": "x", "extra": 1});
        let validated = validate_required(&params, FIELDS).unwrap();
        assert_eq!(validated, &params);
    }

    #[test]
    fn test_missing_or_null_field() {
        let err = validate_required(&json!({"user": {}, "userResponse": "x"}), FIELDS).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(err.to_string().contains("challenges"));

        let err = validate_required(
            &json!({"challenges": null, "user": {}, "userResponse": "x"}),
            FIELDS,
        )
        .unwrap_err();
        assert!(err.to_string().contains("is required"));
    }

    #[test]
    fn test_wrong_kind() {
        let err = validate_required(
            &json!({"challenges": {}, "user": {}, "userResponse": "x"}),
            FIELDS,
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be an array"));

        let err = validate_required(
            &json!({"challenges": [], "user": {}, "userResponse": "   "}),
            FIELDS,
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-empty string"));
    }

    #[test]
    fn test_non_object_params() {
        let err = validate_required(&json!([1, 2]), FIELDS).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_parse_params_reports_validation() {
        #[derive(Debug, Deserialize)]
        struct Params {
            #[allow(dead_code)]
            count: u32,
        }

        let err = parse_params::<Params>(&json!({"count": "three"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }
}
