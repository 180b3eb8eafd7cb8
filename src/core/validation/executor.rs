//! Rule set execution
//!
//! Runs every rule of a [`RuleSet`] against one request payload and collects
//! all failures. The only side effect is normalization of the payload the
//! caller hands in, which is request-local.

use super::filters;
use super::outcome::{ValidationFailure, ValidationOutcome};
use super::rule_set::RuleSet;
use super::rules::{FieldRule, RuleKind};
use serde_json::Value;

/// Apply the rule set's transforms to `payload` in place
pub fn normalize(rule_set: &RuleSet, payload: &mut Value) {
    for rule in rule_set.transforms() {
        filters::apply(payload, rule.field(), filters::trim);
    }
}

/// Normalize `payload`, then evaluate every check of `rule_set` against it
///
/// Failures are accumulated in declaration order. A field that fails
/// `Required` reports only that failure; its other rules are not evaluated.
pub fn execute(rule_set: &RuleSet, payload: &mut Value) -> ValidationOutcome {
    normalize(rule_set, payload);

    let missing: Vec<&str> = rule_set
        .checks()
        .filter(|rule| is_required(rule) && rule.check(payload).is_err())
        .map(FieldRule::field)
        .collect();

    let failures: Vec<ValidationFailure> = rule_set
        .checks()
        .filter(|rule| is_required(rule) || !missing.contains(&rule.field()))
        .filter_map(|rule| rule.check(payload).err())
        .collect();

    let outcome = ValidationOutcome::from_failures(failures);
    tracing::trace!(
        operation = %rule_set.operation(),
        failures = outcome.failures().len(),
        "rule set executed"
    );
    outcome
}

fn is_required(rule: &FieldRule) -> bool {
    matches!(rule.kind(), RuleKind::Required)
}

/// Owned variant of [`execute`] returning the normalized payload
pub fn validate(rule_set: &RuleSet, mut payload: Value) -> (Value, ValidationOutcome) {
    let outcome = execute(rule_set, &mut payload);
    (payload, outcome)
}
