//! Field rule primitives
//!
//! A [`FieldRule`] pairs a payload key with one [`RuleKind`] and the message
//! reported when the rule is violated. The set of kinds is closed: every rule
//! set in the application is expressed with these variants and evaluated by
//! [`FieldRule::check`].

use super::ValidationFailure;
use crate::core::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidateEmail;

/// JSON shape a `TypeCheck` rule expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// `true`/`false`, or one of the strings `"true"`, `"false"`, `"1"`, `"0"`
    Boolean,
    /// Any JSON number, or a string that parses as a finite number
    Number,
    /// A JSON string
    String,
}

impl ValueType {
    /// Whether `value` is assignable or coercible to this type
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueType::Boolean => match value {
                Value::Bool(_) => true,
                Value::String(s) => matches!(s.as_str(), "true" | "false" | "1" | "0"),
                _ => false,
            },
            ValueType::Number => match value {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
                _ => false,
            },
            ValueType::String => value.is_string(),
        }
    }
}

/// Read a value accepted by `ValueType::Boolean` as a bool
pub fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Kind of check a rule performs
///
/// `Trim` is a normalization rather than a check: the executor applies it to
/// the payload before any rule is evaluated, and it never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// Field must be present, non-null and, for strings, non-blank
    Required,
    /// Evaluate `rule` only when the field is present and non-null
    Optional { rule: Box<RuleKind> },
    /// Field, when present, must be assignable to `expected`
    TypeCheck { expected: ValueType },
    /// String field, when present, must be one of `values`
    OneOf { values: Vec<String> },
    /// String field, when present, must have a character count within bounds
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
    },
    /// String field, when present, must match `pattern`
    Matches { pattern: String },
    /// String field, when present, must be a valid email address
    Email,
    /// Trim surrounding whitespace from a string field
    Trim,
}

impl RuleKind {
    /// Shorthand for `Optional { rule }`
    pub fn optional(rule: RuleKind) -> Self {
        RuleKind::Optional {
            rule: Box::new(rule),
        }
    }

    /// Whether this rule waives the presence requirement
    pub fn is_optional(&self) -> bool {
        matches!(self, RuleKind::Optional { .. })
    }

    /// Whether this rule normalizes rather than checks
    pub fn is_transform(&self) -> bool {
        match self {
            RuleKind::Trim => true,
            RuleKind::Optional { rule } => rule.is_transform(),
            _ => false,
        }
    }

    fn pattern(&self) -> Option<&str> {
        match self {
            RuleKind::Matches { pattern } => Some(pattern),
            RuleKind::Optional { rule } => rule.pattern(),
            _ => None,
        }
    }
}

/// One declared rule for one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: String,
    kind: RuleKind,
    message: String,
    compiled: Option<Regex>,
}

impl FieldRule {
    /// Build a rule, compiling its pattern if it has one
    pub fn new(
        field: impl Into<String>,
        kind: RuleKind,
        message: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(ConfigError::InvalidRule {
                field,
                message: "field name must not be empty".to_string(),
            });
        }

        let compiled = match kind.pattern() {
            Some(pattern) => Some(Regex::new(pattern).map_err(|e| ConfigError::InvalidRule {
                field: field.clone(),
                message: format!("invalid pattern '{}': {}", pattern, e),
            })?),
            None => None,
        };

        Ok(Self {
            field,
            kind,
            message: message.into(),
            compiled,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_optional(&self) -> bool {
        self.kind.is_optional()
    }

    /// Check the rule against its field in `payload`
    ///
    /// Non-object payloads are treated as having no fields. Transform rules
    /// always pass.
    pub fn check(&self, payload: &Value) -> Result<(), ValidationFailure> {
        let value = payload.get(&self.field);
        if self.satisfied(&self.kind, value) {
            Ok(())
        } else {
            Err(ValidationFailure::new(&self.field, &self.message))
        }
    }

    fn satisfied(&self, kind: &RuleKind, value: Option<&Value>) -> bool {
        match kind {
            RuleKind::Required => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            },
            RuleKind::Optional { rule } => match value {
                None | Some(Value::Null) => true,
                Some(_) => self.satisfied(rule, value),
            },
            RuleKind::TypeCheck { expected } => match value {
                None | Some(Value::Null) => true,
                Some(v) => expected.accepts(v),
            },
            RuleKind::OneOf { values } => match value.and_then(Value::as_str) {
                Some(s) => values.iter().any(|allowed| allowed == s),
                None => true,
            },
            RuleKind::Length { min, max } => match value.and_then(Value::as_str) {
                Some(s) => {
                    let len = s.chars().count();
                    min.is_none_or(|min| len >= min) && max.is_none_or(|max| len <= max)
                }
                None => true,
            },
            RuleKind::Matches { .. } => match (value.and_then(Value::as_str), &self.compiled) {
                (Some(s), Some(re)) => re.is_match(s),
                _ => true,
            },
            RuleKind::Email => match value.and_then(Value::as_str) {
                Some(s) => s.validate_email(),
                None => true,
            },
            RuleKind::Trim => true,
        }
    }
}
