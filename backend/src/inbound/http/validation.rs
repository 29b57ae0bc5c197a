//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, RoomId, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidRoomId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidRoomId => "invalid_room_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl serde::Serialize) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Require a non-blank string field.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Parse an optional user id; blank strings count as absent.
pub(crate) fn parse_optional_user_id(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<UserId>, Error> {
    let Some(raw) = value.filter(|text| !text.trim().is_empty()) else {
        return Ok(None);
    };
    UserId::new(&raw).map(Some).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid, raw.as_str())
    })
}

/// Parse an optional positive room id.
pub(crate) fn parse_optional_room_id(
    value: Option<i64>,
    field: FieldName,
) -> Result<Option<RoomId>, Error> {
    value
        .map(|raw| {
            RoomId::new(raw).map_err(|_| {
                let name = field.as_str();
                ValidationError::new(name, format!("{name} must be a positive integer"))
                    .with_value(ErrorCode::InvalidRoomId, raw)
            })
        })
        .transpose()
}

/// Parse an optional room id taken from a query string.
///
/// Blank values count as absent so clients may send every parameter.
pub(crate) fn parse_optional_room_id_text(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<RoomId>, Error> {
    let Some(raw) = value.as_deref().map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    let parsed = raw.parse::<i64>().map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a positive integer"))
            .with_value(ErrorCode::InvalidRoomId, raw)
    })?;
    parse_optional_room_id(Some(parsed), field)
}
