//! Validation pipeline
//!
//! Declarative rule sets checked at the API boundary:
//!
//! 1. [`rules`]: the closed set of field rule primitives
//! 2. [`rule_set`]: ordered, immutable rule sets built once per operation
//! 3. [`executor`]: runs a rule set, accumulating every failure
//! 4. [`extractor`]: reports the outcome and plugs it into axum
//!
//! Rule sets hold no per-request state, so one instance serves concurrent
//! requests without locking.

pub mod executor;
pub mod extractor;
pub mod filters;
pub mod outcome;
pub mod registry;
pub mod rule_set;
pub mod rules;

pub use executor::{execute, validate};
pub use extractor::{Validated, ValidatedBy, check, report};
pub use outcome::{ValidationFailure, ValidationOutcome};
pub use registry::{ConfiguredOperation, Operation, RuleSetRegistry};
pub use rule_set::{RuleSet, RuleSetBuilder};
pub use rules::{FieldRule, RuleKind, ValueType, as_boolean};
