//! Field-level validation for untrusted ad payloads
//!
//! Every field is checked before a payload is rejected, so a client gets the
//! whole list of problems in one response.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Titles must be strictly longer than this many characters.
pub const TITLE_MIN_EXCLUSIVE: usize = 5;

/// Column width of `ads.title`.
pub const TITLE_MAX_LEN: usize = 50;

/// Column width of `ads.description`.
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// Location used for errors that concern the body as a whole.
pub const ROOT_FIELD: &str = "__root__";

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent
    Missing { field: &'static str },

    /// Required field sent as an explicit `null`
    Null { field: &'static str },

    /// Field present but not a JSON string
    NotAString { field: &'static str },

    /// Title does not exceed the minimum length
    TooShort { field: &'static str },

    /// Field exceeds the column width
    TooLong { field: &'static str, max: usize },

    /// Body parsed, but is not a JSON object
    NotAnObject,

    /// Body could not be parsed as JSON at all
    MalformedBody { reason: String },
}

impl ValidationError {
    /// Name of the offending field, or `__root__` for body-level errors.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Null { field }
            | Self::NotAString { field }
            | Self::TooShort { field }
            | Self::TooLong { field, .. } => field,
            Self::NotAnObject | Self::MalformedBody { .. } => ROOT_FIELD,
        }
    }

    /// Machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "value_error.missing",
            Self::Null { .. } => "type_error.none.not_allowed",
            Self::NotAString { .. } => "type_error.str",
            Self::TooShort { .. } => "value_error",
            Self::TooLong { .. } => "value_error.any_str.max_length",
            Self::NotAnObject => "type_error.dict",
            Self::MalformedBody { .. } => "value_error.jsondecode",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { .. } => write!(f, "field required"),
            Self::Null { .. } => write!(f, "none is not an allowed value"),
            Self::NotAString { .. } => write!(f, "str type expected"),
            Self::TooShort { field } => write!(f, "{} is too short", field),
            Self::TooLong { max, .. } => {
                write!(f, "ensure this value has at most {} characters", max)
            }
            Self::NotAnObject => write!(f, "value is not a valid dict"),
            Self::MalformedBody { reason } => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationError", 3)?;
        s.serialize_field("loc", &[self.field()])?;
        s.serialize_field("msg", &self.to_string())?;
        s.serialize_field("type", self.kind())?;
        s.end()
    }
}

/// Every failure found in one payload, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Names of the fields that failed, in order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(ValidationError::field).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field(), err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check the title length rule and the column width.
pub fn check_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len <= TITLE_MIN_EXCLUSIVE {
        return Err(ValidationError::TooShort { field: "title" });
    }
    check_max_len("title", title, TITLE_MAX_LEN)
}

/// Check a value against a maximum length in characters.
pub fn check_max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Reads string fields out of a JSON object, accumulating errors as it goes.
pub(crate) struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(body: &'a Value) -> Result<Self, ValidationErrors> {
        match body {
            Value::Object(map) => Ok(Self {
                map,
                errors: ValidationErrors::new(),
            }),
            _ => Err(ValidationError::NotAnObject.into()),
        }
    }

    /// A field that must be present, non-null, and a string.
    pub(crate) fn required(&mut self, field: &'static str) -> Option<String> {
        match self.map.get(field) {
            None => {
                self.errors.push(ValidationError::Missing { field });
                None
            }
            Some(Value::Null) => {
                self.errors.push(ValidationError::Null { field });
                None
            }
            Some(value) => self.string(field, value),
        }
    }

    /// A field that may be absent; null counts as absent.
    pub(crate) fn optional(&mut self, field: &'static str) -> Option<String> {
        match self.map.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.string(field, value),
        }
    }

    /// Apply a rule to a value that was read successfully.
    pub(crate) fn check(
        &mut self,
        value: Option<String>,
        rule: impl FnOnce(&str) -> Result<(), ValidationError>,
    ) -> Option<String> {
        let value = value?;
        match rule(&value) {
            Ok(()) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn string(&mut self, field: &'static str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.errors.push(ValidationError::NotAString { field });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "description",
            max: 200,
        };
        assert_eq!(
            err.to_string(),
            "ensure this value has at most 200 characters"
        );
        assert_eq!(
            ValidationError::TooShort { field: "title" }.to_string(),
            "title is too short"
        );
    }

    #[test]
    fn title_boundary() {
        assert!(check_title("hello").is_err());
        assert!(check_title("hello!").is_ok());
        assert!(check_title(&"t".repeat(50)).is_ok());
        assert!(matches!(
            check_title(&"t".repeat(51)),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
    }

    #[test]
    fn title_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert!(check_title("ééééé").is_err());
        assert!(check_title("éééééé").is_ok());
    }

    #[test]
    fn serializes_as_field_error_entry() {
        let err = ValidationError::Missing { field: "owner" };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"loc": ["owner"], "msg": "field required", "type": "value_error.missing"})
        );
    }

    #[test]
    fn explicit_null_differs_from_missing() {
        let body = json!({"title": null});
        let mut reader = FieldReader::new(&body).unwrap();
        assert_eq!(reader.required("title"), None);
        assert_eq!(reader.required("owner"), None);

        let errors = serde_json::to_value(reader.finish().unwrap_err()).unwrap();
        assert_eq!(errors[0]["type"], "type_error.none.not_allowed");
        assert_eq!(errors[0]["msg"], "none is not an allowed value");
        assert_eq!(errors[1]["type"], "value_error.missing");
    }

    #[test]
    fn errors_serialize_as_list() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::TooShort { field: "title" });
        errors.push(ValidationError::NotAnObject);

        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["loc"], json!(["__root__"]));
    }

    #[test]
    fn reader_rejects_non_object() {
        let body = json!(["title"]);
        let errors = FieldReader::new(&body).err().unwrap();
        assert_eq!(errors.fields(), vec![ROOT_FIELD]);
    }

    #[test]
    fn reader_treats_null_as_absent_for_optional() {
        let body = json!({"title": null, "owner": 7});
        let mut reader = FieldReader::new(&body).unwrap();
        assert_eq!(reader.optional("title"), None);
        assert_eq!(reader.optional("owner"), None);

        let errors = reader.finish().unwrap_err();
        assert_eq!(errors.iter().next(), Some(&ValidationError::NotAString { field: "owner" }));
    }
}
