//! Handlers that are not tied to a resource

use crate::core::error::{RequestError, StorefrontError};
use crate::core::validation::{RuleSetRegistry, check};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Clone)]
pub struct ValidationState {
    pub registry: Arc<RuleSetRegistry>,
}

/// POST /validate/{operation}
///
/// Lets clients check a form against the server's rules before submitting it.
/// Answers 204 when the payload would be accepted.
pub async fn validate_operation(
    State(state): State<ValidationState>,
    Path(operation): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, StorefrontError> {
    let rule_set = state
        .registry
        .get(&operation)
        .ok_or(RequestError::UnknownOperation { operation })?;

    let Json(payload) = body.map_err(|e| RequestError::InvalidJson {
        message: e.body_text(),
    })?;

    check(&rule_set, payload)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
