//! Error reporting and axum integration
//!
//! [`report`] turns a [`ValidationOutcome`] into either "go on" or the single
//! terminal error, and [`Validated`] wires that decision into axum so an
//! invalid request never reaches its handler. [`ValidatedBy`] does the same
//! for operations whose rule set is declared in configuration.

use super::executor;
use super::outcome::ValidationOutcome;
use super::registry::{ConfiguredOperation, Operation, RuleSetRegistry};
use super::rule_set::RuleSet;
use crate::core::error::{RequestError, StorefrontError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Convert an outcome into the request's disposition
///
/// `Ok(())` forwards the request unchanged; `Err` carries every failure and
/// is rendered as the 400 `VALIDATION_ERROR` body.
pub fn report(outcome: ValidationOutcome) -> Result<(), StorefrontError> {
    match outcome {
        ValidationOutcome::Valid => Ok(()),
        ValidationOutcome::Invalid(failures) => {
            Err(StorefrontError::Validation(ValidationError::Failed(failures)))
        }
    }
}

/// Run `rule_set` on `payload` and report the outcome
///
/// Returns the normalized payload when the request may proceed.
pub fn check(rule_set: &RuleSet, payload: Value) -> Result<Value, StorefrontError> {
    let (payload, outcome) = executor::validate(rule_set, payload);
    if let ValidationOutcome::Invalid(failures) = &outcome {
        tracing::debug!(
            operation = %rule_set.operation(),
            failures = failures.len(),
            fields = ?outcome.failed_fields(),
            "request rejected by validation"
        );
    }
    report(outcome)?;
    Ok(payload)
}

/// Axum extractor that validates and normalizes a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_address(
///     State(state): State<AddressState>,
///     Validated(payload, _): Validated<CreateAddress>,
/// ) -> Result<impl IntoResponse, StorefrontError> {
///     // payload is already trimmed and validated
/// }
/// ```
pub struct Validated<O>(pub Value, pub PhantomData<O>);

impl<O> Validated<O> {
    /// Wrap an already validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, PhantomData)
    }

    /// Get the normalized payload
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl<O> std::ops::Deref for Validated<O> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

async fn json_body<S>(req: Request, state: &S) -> Result<Value, Response>
where
    S: Send + Sync,
{
    let Json(payload) = Json::<Value>::from_request(req, state)
        .await
        .map_err(|e| {
            StorefrontError::from(RequestError::InvalidJson {
                message: e.body_text(),
            })
            .into_response()
        })?;
    Ok(payload)
}

impl<S, O> FromRequest<S> for Validated<O>
where
    S: Send + Sync,
    O: Operation,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let payload = json_body(req, state).await?;

        check(O::rule_set(), payload)
            .map(Validated::new)
            .map_err(IntoResponse::into_response)
    }
}

/// Axum extractor that validates a JSON body against a registered rule set
///
/// The rule set is looked up by `O::NAME` in the [`RuleSetRegistry`] the
/// server installs as a request extension, so operations declared in YAML
/// can guard handlers passed to
/// [`with_custom_routes`](crate::server::ServerBuilder::with_custom_routes).
///
/// ```rust,ignore
/// pub struct CreateProduct;
///
/// impl ConfiguredOperation for CreateProduct {
///     const NAME: &'static str = "product.create";
/// }
///
/// async fn create_product(ValidatedBy(product, _): ValidatedBy<CreateProduct>) { }
/// ```
pub struct ValidatedBy<O>(pub Value, pub PhantomData<O>);

impl<O> ValidatedBy<O> {
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl<S, O> FromRequest<S> for ValidatedBy<O>
where
    S: Send + Sync,
    O: ConfiguredOperation,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let rule_set = req
            .extensions()
            .get::<Arc<RuleSetRegistry>>()
            .and_then(|registry| registry.get(O::NAME))
            .ok_or_else(|| {
                StorefrontError::Internal(format!(
                    "no rule set registered for operation '{}'",
                    O::NAME
                ))
                .into_response()
            })?;

        let payload = json_body(req, state).await?;

        check(&rule_set, payload)
            .map(|payload| ValidatedBy(payload, PhantomData))
            .map_err(IntoResponse::into_response)
    }
}
