//! Operation binding and rule set lookup

use super::rule_set::RuleSet;
use crate::core::error::ConfigError;
use std::collections::HashMap;
use std::sync::Arc;

/// A named API operation guarded by a fixed rule set
///
/// Implementors are marker types used with the
/// [`Validated`](super::extractor::Validated) extractor. The rule set is
/// built on first use and shared by every request afterwards.
///
/// ```rust,ignore
/// pub struct AddWishlistItem;
///
/// impl Operation for AddWishlistItem {
///     const NAME: &'static str = "wishlist.add";
///
///     fn rule_set() -> &'static RuleSet {
///         static RULES: OnceLock<RuleSet> = OnceLock::new();
///         RULES.get_or_init(wishlist_add_rules)
///     }
/// }
/// ```
pub trait Operation: Send + Sync + 'static {
    const NAME: &'static str;

    fn rule_set() -> &'static RuleSet;
}

/// An operation whose rule set is looked up in the [`RuleSetRegistry`]
///
/// Used with [`ValidatedBy`](super::extractor::ValidatedBy) for rule sets
/// declared in configuration rather than compiled in.
pub trait ConfiguredOperation: Send + Sync + 'static {
    const NAME: &'static str;
}

/// Rule sets by operation name
///
/// Filled at startup, read-only once the server is running.
#[derive(Debug, Clone, Default)]
pub struct RuleSetRegistry {
    rule_sets: HashMap<String, Arc<RuleSet>>,
}

impl RuleSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rule set of a compiled-in operation
    pub fn register_operation<O: Operation>(&mut self) {
        self.insert(O::rule_set().clone());
    }

    /// Insert or replace a rule set, returning the previous one
    pub fn insert(&mut self, rule_set: RuleSet) -> Option<Arc<RuleSet>> {
        let operation = rule_set.operation().to_string();
        tracing::debug!(operation = %operation, fields = ?rule_set.fields(), "rule set registered");
        let previous = self.rule_sets.insert(operation.clone(), Arc::new(rule_set));
        if previous.is_some() {
            tracing::debug!(operation = %operation, "rule set replaced");
        }
        previous
    }

    /// Insert a rule set, failing if the operation is already registered
    pub fn try_insert(&mut self, rule_set: RuleSet) -> Result<(), ConfigError> {
        if self.rule_sets.contains_key(rule_set.operation()) {
            return Err(ConfigError::DuplicateOperation {
                operation: rule_set.operation().to_string(),
            });
        }
        self.insert(rule_set);
        Ok(())
    }

    pub fn get(&self, operation: &str) -> Option<Arc<RuleSet>> {
        self.rule_sets.get(operation).cloned()
    }

    /// Registered operation names, sorted
    pub fn operations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rule_sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }
}
