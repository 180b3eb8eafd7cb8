//! Router builder utilities

use super::handlers::{ValidationState, health_check, validate_operation};
use crate::addresses::AddressState;
use crate::addresses::handlers::{
    create_address, delete_address, get_address, list_addresses, update_address,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the address book routes
///
/// - GET /addresses - List addresses
/// - POST /addresses - Create an address
/// - GET /addresses/{id} - Get one address
/// - PUT|PATCH /addresses/{id} - Update an address
/// - DELETE /addresses/{id} - Delete an address
pub fn build_address_routes(state: AddressState) -> Router {
    Router::new()
        .route("/addresses", get(list_addresses).post(create_address))
        .route(
            "/addresses/{id}",
            get(get_address)
                .put(update_address)
                .patch(update_address)
                .delete(delete_address),
        )
        .with_state(state)
}

/// Build the dry-run validation route
///
/// - POST /validate/{operation} - Run a registered rule set without side effects
pub fn build_validation_routes(state: ValidationState) -> Router {
    Router::new()
        .route("/validate/{operation}", post(validate_operation))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
