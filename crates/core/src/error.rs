//! Record-model error types.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    #[schema(value_type = String, example = "year")]
    pub field: &'static str,
    pub reason: String,
}

/// Validation failure listing all offending fields (in declaration order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("validation failed for: {}", field_list(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, reason: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationError> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

fn field_list(violations: &[FieldViolation]) -> String {
    violations.iter().map(|v| v.field).collect::<Vec<_>>().join(", ")
}
