//! Field-level validation failures for request bodies.
//!
//! Every offending field is collected before the request is rejected, so a
//! client sees all of its mistakes at once. The collected list travels in the
//! error payload as `details.fields`.

use std::fmt;

use serde_json::{Value, json};

use crate::domain::{Error, RecordId, TEXT_FIELD_MAX_CHARS};

use super::serializers::Mapping;

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorCode {
    /// A required field is absent.
    MissingField,
    /// The value has the wrong JSON type.
    InvalidType,
    /// A text value is empty once surrounding whitespace is trimmed.
    Blank,
    /// A text value exceeds the column limit.
    TooLong,
    /// The body is not parseable JSON.
    InvalidJson,
    /// A reference points at a record that does not exist.
    DoesNotExist,
}

impl FieldErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::Blank => "blank",
            Self::TooLong => "too_long",
            Self::InvalidJson => "invalid_json",
            Self::DoesNotExist => "does_not_exist",
        }
    }
}

impl fmt::Display for FieldErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: FieldErrorCode,
    pub message: String,
}

/// All rejected fields of one request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-entry list.
    pub fn single(
        field: impl Into<String>,
        code: FieldErrorCode,
        message: impl Into<String>,
    ) -> Self {
        let mut errors = Self::new();
        errors.push(field, code, message);
        errors
    }

    pub fn push(
        &mut self,
        field: impl Into<String>,
        code: FieldErrorCode,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            code,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Whether `field` was rejected with `code`.
    pub fn contains(&self, field: &str, code: FieldErrorCode) -> bool {
        self.errors
            .iter()
            .any(|error| error.field == field && error.code == code)
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Vec<Value> = errors
            .errors
            .iter()
            .map(|error| {
                json!({
                    "field": error.field,
                    "code": error.code.as_str(),
                    "message": error.message,
                })
            })
            .collect();
        Error::invalid_request("request body failed validation")
            .with_details(json!({ "fields": fields }))
    }
}

/// Read a required text field, recording any failure.
///
/// Surrounding whitespace is trimmed before the blank and length checks and
/// the trimmed value is returned.
pub(crate) fn required_text(
    mapping: &Mapping,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match mapping.get(field) {
        None => {
            errors.push(field, FieldErrorCode::MissingField, "this field is required");
            None
        }
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                errors.push(field, FieldErrorCode::Blank, "this field may not be blank");
                None
            } else if trimmed.chars().count() > TEXT_FIELD_MAX_CHARS {
                errors.push(
                    field,
                    FieldErrorCode::TooLong,
                    format!("ensure this field has no more than {TEXT_FIELD_MAX_CHARS} characters"),
                );
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Some(_) => {
            errors.push(field, FieldErrorCode::InvalidType, "expected a string");
            None
        }
    }
}

/// Read a required record reference, recording any failure.
pub(crate) fn required_reference(
    mapping: &Mapping,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<RecordId> {
    match mapping.get(field) {
        None => {
            errors.push(field, FieldErrorCode::MissingField, "this field is required");
            None
        }
        Some(value) => match value.as_i64() {
            Some(raw) => Some(RecordId::new(raw)),
            None => {
                errors.push(field, FieldErrorCode::InvalidType, "expected an integer identifier");
                None
            }
        },
    }
}
