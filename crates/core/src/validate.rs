//! Validation of untrusted record input.
//!
//! Type coercion is the only normalization performed: `year` may arrive as an
//! integer, an integral float, or a numeric string. Text is stored as given.

use serde_json::{Map, Value};

use crate::book::{BookFields, BookPatch};
use crate::error::ValidationError;

/// Validate a full record body (create).
///
/// Every offending field is reported, not just the first. An `id` key and
/// unknown keys are ignored.
pub fn validate(input: &Value) -> Result<BookFields, ValidationError> {
    let mut errors = ValidationError::new();
    let Some(obj) = as_object(input, &mut errors) else {
        return Err(errors);
    };

    let title = required(obj, "title", &mut errors, text);
    let author = required(obj, "author", &mut errors, text);
    let year = required(obj, "year", &mut errors, integer);

    match (title, author, year) {
        (Some(title), Some(author), Some(year)) => errors.into_result(BookFields { title, author, year }),
        _ => Err(errors),
    }
}

/// Validate a partial record body (update).
///
/// Only fields present in the input are checked and carried into the patch.
pub fn validate_patch(input: &Value) -> Result<BookPatch, ValidationError> {
    let mut errors = ValidationError::new();
    let Some(obj) = as_object(input, &mut errors) else {
        return Err(errors);
    };

    let patch = BookPatch {
        title: optional(obj, "title", &mut errors, text),
        author: optional(obj, "author", &mut errors, text),
        year: optional(obj, "year", &mut errors, integer),
    };
    errors.into_result(patch)
}

fn as_object<'a>(input: &'a Value, errors: &mut ValidationError) -> Option<&'a Map<String, Value>> {
    match input {
        Value::Object(obj) => Some(obj),
        _ => {
            errors.push("body", "must be a JSON object");
            None
        }
    }
}

fn required<T>(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationError,
    parse: fn(&Value) -> Result<T, &'static str>,
) -> Option<T> {
    match obj.get(field) {
        None => {
            errors.push(field, "is required");
            None
        }
        Some(value) => checked(value, field, errors, parse),
    }
}

fn optional<T>(
    obj: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationError,
    parse: fn(&Value) -> Result<T, &'static str>,
) -> Option<T> {
    obj.get(field).and_then(|value| checked(value, field, errors, parse))
}

fn checked<T>(
    value: &Value,
    field: &'static str,
    errors: &mut ValidationError,
    parse: fn(&Value) -> Result<T, &'static str>,
) -> Option<T> {
    match parse(value) {
        Ok(v) => Some(v),
        Err(reason) => {
            errors.push(field, reason);
            None
        }
    }
}

fn text(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) if s.trim().is_empty() => Err("must not be empty"),
        Value::String(s) => Ok(s.clone()),
        _ => Err("must be a string"),
    }
}

fn integer(value: &Value) -> Result<i64, &'static str> {
    const NOT_INTEGER: &str = "must be an integer";
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
                _ => Err(NOT_INTEGER),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| NOT_INTEGER),
        _ => Err(NOT_INTEGER),
    }
}
