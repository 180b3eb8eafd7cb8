//! # Storefront API
//!
//! Request validation and error reporting for the storefront HTTP API.
//!
//! Every mutating endpoint declares a rule set; the rule set runs before the
//! handler and either forwards a normalized payload or answers with a single
//! `400 VALIDATION_ERROR` listing every failed field.
//!
//! ## Features
//!
//! - **Declarative Rule Sets**: ordered, immutable rules per operation
//! - **Accumulated Failures**: all problems reported at once, in declaration order
//! - **Normalization**: string fields are trimmed before checks and before handlers
//! - **Stable Wire Format**: `{"error", "code", "details": [{"field", "message"}]}`
//! - **Configuration-Based**: extra operations declared in YAML
//! - **Address Book**: the reference integration, over an in-memory store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//!
//! let rules = RuleSet::builder("wishlist.add")
//!     .trim("productId")
//!     .required("productId", "Product is required")
//!     .build()?;
//!
//! let (payload, outcome) = validate(&rules, json!({ "productId": "  " }));
//! assert!(!outcome.is_valid());
//!
//! ServerBuilder::new()
//!     .with_store(InMemoryAddressStore::new())
//!     .serve(Some("127.0.0.1:3000"))
//!     .await?;
//! ```

pub mod addresses;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Validation ===
    pub use crate::core::validation::{
        ConfiguredOperation, FieldRule, Operation, RuleKind, RuleSet, RuleSetBuilder,
        RuleSetRegistry, Validated, ValidatedBy, ValidationFailure, ValidationOutcome, ValueType,
        check, execute, report, validate,
    };

    // === Errors ===
    pub use crate::core::error::{
        AddressError, ConfigError, ErrorResponse, RequestError, StorageError, StorefrontError,
        ValidationError,
    };

    // === Address book ===
    pub use crate::addresses::{Address, AddressState, CreateAddress, UpdateAddress};
    pub use crate::core::service::AddressStore;
    pub use crate::storage::InMemoryAddressStore;

    // === Config ===
    pub use crate::config::{AppConfig, FieldConfig, RuleSetConfig, ServerSettings};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        routing::{delete, get, patch, post, put},
    };
}
