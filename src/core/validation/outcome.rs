//! Result values produced by the executor

use serde::{Deserialize, Serialize};

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of running a rule set against one payload
///
/// `Invalid` always carries at least one failure, in rule declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<ValidationFailure>),
}

impl ValidationOutcome {
    /// Build an outcome from collected failures
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        if failures.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(failures)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Failures carried by the outcome (empty when valid)
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            ValidationOutcome::Valid => &[],
            ValidationOutcome::Invalid(failures) => failures,
        }
    }

    /// Fields that failed, in declaration order, without duplicates
    pub fn failed_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for failure in self.failures() {
            if !fields.contains(&failure.field.as_str()) {
                fields.push(&failure.field);
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_failures_is_valid() {
        let outcome = ValidationOutcome::from_failures(vec![]);
        assert!(outcome.is_valid());
        assert!(outcome.failures().is_empty());
    }

    #[test]
    fn test_failed_fields_deduplicates_in_order() {
        let outcome = ValidationOutcome::from_failures(vec![
            ValidationFailure::new("city", "required"),
            ValidationFailure::new("state", "required"),
            ValidationFailure::new("city", "too long"),
        ]);
        assert!(!outcome.is_valid());
        assert_eq!(outcome.failed_fields(), vec!["city", "state"]);
        assert_eq!(outcome.failures().len(), 3);
    }
}
