//! Configuration loading and management
//!
//! Rule sets beyond the built-in address operations are declared as data:
//!
//! ```yaml
//! server:
//!   bind_address: "0.0.0.0:8080"
//!   log_filter: "storefront=debug,info"
//! rule_sets:
//!   - operation: product.create
//!     fields:
//!       - field: name
//!         rules: [ { kind: trim }, { kind: required } ]
//!         message: Product name is required
//! ```

use crate::core::error::ConfigError;
use crate::core::validation::{RuleKind, RuleSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Listener and logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            log_filter: default_log_filter(),
        }
    }
}

/// Rules declared for one field; `message` is reported by each of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub field: String,
    pub rules: Vec<RuleKind>,
    #[serde(default)]
    pub message: String,
}

/// Declaration of one operation's rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    pub operation: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl RuleSetConfig {
    /// Compile the declaration into an immutable rule set
    pub fn to_rule_set(&self) -> Result<RuleSet, ConfigError> {
        let mut builder = RuleSet::builder(self.operation.clone());
        for field in &self.fields {
            if field.rules.is_empty() {
                return Err(ConfigError::InvalidRule {
                    field: field.field.clone(),
                    message: format!("no rules declared in operation '{}'", self.operation),
                });
            }
            for kind in &field.rules {
                builder = builder.rule(field.field.clone(), kind.clone(), field.message.clone());
            }
        }
        builder.build()
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: Option<ServerSettings>,

    #[serde(default)]
    pub rule_sets: Vec<RuleSetConfig>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                file: Some(path.to_string()),
                message,
            },
            other => other,
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check_duplicates()?;
        Ok(config)
    }

    /// Server settings, falling back to defaults
    pub fn server_settings(&self) -> ServerSettings {
        self.server.clone().unwrap_or_default()
    }

    /// Compile every declared rule set
    pub fn rule_sets(&self) -> Result<Vec<RuleSet>, ConfigError> {
        self.check_duplicates()?;
        self.rule_sets.iter().map(RuleSetConfig::to_rule_set).collect()
    }

    fn check_duplicates(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for rule_set in &self.rule_sets {
            if !seen.insert(rule_set.operation.as_str()) {
                return Err(ConfigError::DuplicateOperation {
                    operation: rule_set.operation.clone(),
                });
            }
        }
        Ok(())
    }

    /// Merge several configurations
    ///
    /// A rule set from a later config replaces the one with the same operation
    /// from an earlier config, keeping the earlier position. Server settings
    /// come from the last config that has them.
    pub fn merge(configs: Vec<AppConfig>) -> Self {
        let mut merged = AppConfig::default();
        for config in configs {
            if config.server.is_some() {
                merged.server = config.server;
            }
            for rule_set in config.rule_sets {
                match merged
                    .rule_sets
                    .iter_mut()
                    .find(|existing| existing.operation == rule_set.operation)
                {
                    Some(existing) => *existing = rule_set,
                    None => merged.rule_sets.push(rule_set),
                }
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{ValueType, validate};
    use serde_json::json;

    const PRODUCT_YAML: &str = r#"
rule_sets:
  - operation: product.create
    fields:
      - field: name
        rules:
          - kind: trim
          - kind: required
        message: Product name is required
      - field: price
        rules:
          - kind: required
          - kind: type_check
            expected: number
        message: Price must be a number
      - field: status
        rules:
          - kind: optional
            rule:
              kind: one_of
              values: [draft, published]
        message: Unknown status
"#;

    #[test]
    fn test_defaults_without_server_section() {
        let config = AppConfig::from_yaml_str(PRODUCT_YAML).unwrap();
        assert!(config.server.is_none());
        assert_eq!(config.server_settings(), ServerSettings::default());
        assert_eq!(config.server_settings().bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_rule_sets_compile_from_yaml() {
        let config = AppConfig::from_yaml_str(PRODUCT_YAML).unwrap();
        let rule_sets = config.rule_sets().unwrap();
        assert_eq!(rule_sets.len(), 1);

        let product = &rule_sets[0];
        assert_eq!(product.operation(), "product.create");
        assert_eq!(product.fields(), vec!["name", "price", "status"]);
        assert_eq!(
            product.rules()[3].kind(),
            &RuleKind::TypeCheck {
                expected: ValueType::Number
            }
        );

        let (_, outcome) = validate(
            product,
            json!({"name": " ", "price": "12.5", "status": "gone"}),
        );
        assert_eq!(outcome.failed_fields(), vec!["name", "status"]);
    }

    #[test]
    fn test_duplicate_operation_rejected() {
        let yaml = r#"
rule_sets:
  - operation: user.create
  - operation: user.create
"#;
        let err = AppConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateOperation { .. }));
    }

    #[test]
    fn test_field_without_rules_rejected() {
        let yaml = r#"
rule_sets:
  - operation: user.create
    fields:
      - field: email
        rules: []
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert!(matches!(
            config.rule_sets(),
            Err(ConfigError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_unknown_rule_kind_is_parse_error() {
        let yaml = r#"
rule_sets:
  - operation: user.create
    fields:
      - field: email
        rules: [ { kind: telepathy } ]
"#;
        assert!(matches!(
            AppConfig::from_yaml_str(yaml),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_yaml_serialization_roundtrip() {
        let config = AppConfig::from_yaml_str(PRODUCT_YAML).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_merge_replaces_by_operation() {
        let first = AppConfig::from_yaml_str(PRODUCT_YAML).unwrap();
        let second = AppConfig::from_yaml_str(
            r#"
server:
  bind_address: "0.0.0.0:8080"
rule_sets:
  - operation: product.create
    fields:
      - field: sku
        rules: [ { kind: required } ]
        message: SKU is required
  - operation: wishlist.add
"#,
        )
        .unwrap();

        let merged = AppConfig::merge(vec![first, second, AppConfig::default()]);
        assert_eq!(merged.rule_sets.len(), 2);
        assert_eq!(merged.rule_sets[0].operation, "product.create");
        assert_eq!(merged.rule_sets[0].fields[0].field, "sku");
        assert_eq!(merged.server_settings().bind_address, "0.0.0.0:8080");
        assert_eq!(merged.server_settings().log_filter, "info");
    }
}
