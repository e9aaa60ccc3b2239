//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, RegistrationValidationError, RoomValidationError,
    UsernameValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
    EmptyUsername,
    InvalidUsername,
    EmptyPassword,
    InvalidRoom,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::EmptyUsername => "empty_username",
            ErrorCode::InvalidUsername => "invalid_username",
            ErrorCode::EmptyPassword => "empty_password",
            ErrorCode::InvalidRoom => "invalid_room",
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

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a YYYY-MM-DD date"))
        .with_value(ErrorCode::InvalidDate, value)
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid_date_error(field, value))
}

pub(crate) fn parse_required_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<NaiveDate, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    parse_date(raw, field)
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            ValidationError::new("username", "username must not be empty")
                .with_code(ErrorCode::EmptyUsername)
        }
        LoginValidationError::EmptyPassword => {
            ValidationError::new("password", "password must not be empty")
                .with_code(ErrorCode::EmptyPassword)
        }
    }
}

pub(crate) fn map_username_validation_error(err: UsernameValidationError) -> Error {
    let code = match err {
        UsernameValidationError::Empty => ErrorCode::EmptyUsername,
        _ => ErrorCode::InvalidUsername,
    };
    ValidationError::new("username", err.to_string()).with_code(code)
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::Username(inner) => map_username_validation_error(inner),
        RegistrationValidationError::EmptyPassword => {
            ValidationError::new("password", "password must not be empty")
                .with_code(ErrorCode::EmptyPassword)
        }
    }
}

pub(crate) fn map_room_validation_error(err: RoomValidationError) -> Error {
    let field = match err {
        RoomValidationError::EmptyNumber | RoomValidationError::NumberTooLong { .. } => "number",
        RoomValidationError::EmptyRoomType | RoomValidationError::RoomTypeTooLong { .. } => "type",
        RoomValidationError::InvalidPrice { .. } => "pricePerNight",
        RoomValidationError::DescriptionTooLong { .. } => "description",
    };
    ValidationError::new(field, err.to_string()).with_code(ErrorCode::InvalidRoom)
}
