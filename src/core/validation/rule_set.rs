//! Rule set composition
//!
//! A [`RuleSet`] is the ordered list of rules guarding one API operation.
//! It is assembled once with [`RuleSetBuilder`] and only read afterwards.

use super::rules::{FieldRule, RuleKind, ValueType};
use crate::core::error::ConfigError;

/// Ordered, immutable rules for one operation
#[derive(Debug, Clone)]
pub struct RuleSet {
    operation: String,
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// Start declaring the rules of `operation`
    pub fn builder(operation: impl Into<String>) -> RuleSetBuilder {
        RuleSetBuilder {
            operation: operation.into(),
            declared: Vec::new(),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Field names mentioned by the rule set, in first-declaration order
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !fields.contains(&rule.field()) {
                fields.push(rule.field());
            }
        }
        fields
    }

    /// Rules that normalize the payload
    pub(crate) fn transforms(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter().filter(|r| r.kind().is_transform())
    }

    /// Rules that can fail
    pub(crate) fn checks(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter().filter(|r| !r.kind().is_transform())
    }
}

/// Fluent declaration of a [`RuleSet`]
///
/// # Example
///
/// ```rust,ignore
/// let rules = RuleSet::builder("wishlist.add")
///     .trim("productId")
///     .required("productId", "Product is required")
///     .optional("note", RuleKind::Length { min: None, max: Some(200) }, "Note is too long")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct RuleSetBuilder {
    operation: String,
    declared: Vec<(String, RuleKind, String)>,
}

impl RuleSetBuilder {
    /// Declare an arbitrary rule
    pub fn rule(
        mut self,
        field: impl Into<String>,
        kind: RuleKind,
        message: impl Into<String>,
    ) -> Self {
        self.declared.push((field.into(), kind, message.into()));
        self
    }

    /// Trim the field before evaluation
    pub fn trim(self, field: impl Into<String>) -> Self {
        self.rule(field, RuleKind::Trim, "")
    }

    /// Field must be present and non-blank
    pub fn required(self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.rule(field, RuleKind::Required, message)
    }

    /// Field, when present, must be assignable to `expected`
    pub fn type_check(
        self,
        field: impl Into<String>,
        expected: ValueType,
        message: impl Into<String>,
    ) -> Self {
        self.rule(field, RuleKind::TypeCheck { expected }, message)
    }

    /// Apply `rule` only when the field is present and non-null
    pub fn optional(
        self,
        field: impl Into<String>,
        rule: RuleKind,
        message: impl Into<String>,
    ) -> Self {
        self.rule(field, RuleKind::optional(rule), message)
    }

    /// Compile the declared rules
    pub fn build(self) -> Result<RuleSet, ConfigError> {
        if self.operation.trim().is_empty() {
            return Err(ConfigError::InvalidRuleSet {
                operation: self.operation,
                message: "operation name must not be empty".to_string(),
            });
        }

        let rules = self
            .declared
            .into_iter()
            .map(|(field, kind, message)| FieldRule::new(field, kind, message))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleSet {
            operation: self.operation,
            rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_declaration_order() {
        let rules = RuleSet::builder("profile.update")
            .trim("name")
            .required("name", "Name is required")
            .type_check("age", ValueType::Number, "Age must be a number")
            .build()
            .unwrap();

        assert_eq!(rules.operation(), "profile.update");
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.fields(), vec!["name", "age"]);
        assert_eq!(rules.transforms().count(), 1);
        assert_eq!(rules.checks().count(), 2);
    }

    #[test]
    fn test_empty_operation_rejected() {
        let err = RuleSet::builder(" ").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRuleSet { .. }));
    }

    #[test]
    fn test_invalid_rule_aborts_build() {
        let result = RuleSet::builder("sku.check")
            .rule(
                "sku",
                RuleKind::Matches {
                    pattern: "[".to_string(),
                },
                "bad",
            )
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidRule { .. })));
    }

    #[test]
    fn test_optional_trim_counts_as_transform() {
        let rules = RuleSet::builder("x")
            .optional("name", RuleKind::Trim, "")
            .build()
            .unwrap();
        assert_eq!(rules.transforms().count(), 1);
        assert!(rules.rules()[0].is_optional());
    }
}
