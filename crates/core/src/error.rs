//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Domain-level validation failure.
///
/// This is the only error kind the domain layer produces. It is raised while
/// constructing value objects, never afterwards, and names both the offending
/// field and the rule it broke. Lookups, conflicts and storage failures belong
/// to the layers around the domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {field}: {rule}")]
pub struct ValidationError {
    field: &'static str,
    rule: String,
}

impl ValidationError {
    pub fn new(field: &'static str, rule: impl Into<String>) -> Self {
        Self {
            field,
            rule: rule.into(),
        }
    }

    /// Name of the field that failed validation (e.g. `"name"`).
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Human-readable description of the violated rule.
    pub fn rule(&self) -> &str {
        &self.rule
    }
}
