//! JSON request bodies accepted by the API.
//!
//! Bodies reject unknown keys. Identifiers arrive as strings and are parsed
//! here so a malformed id is reported against its field like any other
//! validation failure. Conversion never touches storage.

use std::str::FromStr;

use crate::domain::validation::FieldErrors;

pub mod companies;
pub mod contacts;
pub mod products;
pub mod quotes;

/// Parses a required identifier, recording a message for `field` on failure.
fn parse_id<T: FromStr>(value: &str, field: &str, errors: &mut FieldErrors) -> Option<T> {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, format!("{field} is required"));
        return None;
    }
    match value.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add(field, format!("{field} must be a valid id"));
            None
        }
    }
}

/// Parses an identifier carried by a patch; absent stays absent.
fn parse_optional_id<T: FromStr>(
    value: Option<&str>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<T> {
    value.and_then(|value| parse_id(value, field, errors))
}

/// Narrows a 64-bit amount, recording `message` for `field` when it does not fit.
fn narrow(value: i64, field: &str, message: &str, errors: &mut FieldErrors) -> i32 {
    i32::try_from(value).unwrap_or_else(|_| {
        errors.add(field, format!("{field} {message}"));
        0
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
