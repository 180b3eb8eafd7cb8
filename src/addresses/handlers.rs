//! HTTP handlers for the address book
//!
//! Create and update bodies go through [`Validated`], so these handlers only
//! ever see trimmed payloads that passed their rule set.

use super::model::{Address, AddressPatch, NewAddress};
use super::rules::{CreateAddress, UpdateAddress};
use crate::core::AddressStore;
use crate::core::error::{AddressError, RequestError, StorefrontError};
use crate::core::validation::Validated;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

/// State shared by the address handlers
#[derive(Clone)]
pub struct AddressState {
    pub store: Arc<dyn AddressStore>,
}

fn parse_id(raw: &str) -> Result<Uuid, StorefrontError> {
    Uuid::parse_str(raw).map_err(|_| RequestError::InvalidId { id: raw.to_string() }.into())
}

async fn find(store: &dyn AddressStore, id: Uuid) -> Result<Address, StorefrontError> {
    store
        .get(&id)
        .await?
        .ok_or_else(|| AddressError::NotFound { id }.into())
}

/// GET /addresses
pub async fn list_addresses(
    State(state): State<AddressState>,
) -> Result<Json<Vec<Address>>, StorefrontError> {
    Ok(Json(state.store.list().await?))
}

/// GET /addresses/{id}
pub async fn get_address(
    State(state): State<AddressState>,
    Path(id): Path<String>,
) -> Result<Json<Address>, StorefrontError> {
    let id = parse_id(&id)?;
    Ok(Json(find(state.store.as_ref(), id).await?))
}

/// POST /addresses
///
/// The first address in the book becomes the default even when the request
/// does not ask for it.
pub async fn create_address(
    State(state): State<AddressState>,
    Validated(payload, _): Validated<CreateAddress>,
) -> Result<impl IntoResponse, StorefrontError> {
    let draft = NewAddress::from_validated(payload)?;
    let is_first = state.store.list().await?.is_empty();
    let is_default = draft.wants_default() || is_first;

    let address = state.store.create(draft.into_address(is_default)).await?;
    if address.is_default {
        state.store.clear_default_except(&address.id).await?;
    }

    tracing::info!(address_id = %address.id, is_default = address.is_default, "address created");
    Ok((StatusCode::CREATED, Json(address)))
}

/// PUT|PATCH /addresses/{id}
pub async fn update_address(
    State(state): State<AddressState>,
    Path(id): Path<String>,
    Validated(payload, _): Validated<UpdateAddress>,
) -> Result<Json<Address>, StorefrontError> {
    let id = parse_id(&id)?;
    let patch = AddressPatch::from_validated(payload)?;
    let mut address = find(state.store.as_ref(), id).await?;

    patch.apply(&mut address);
    let address = state
        .store
        .update(address)
        .await?
        .ok_or(AddressError::NotFound { id })?;
    if address.is_default {
        state.store.clear_default_except(&address.id).await?;
    }

    tracing::info!(address_id = %address.id, "address updated");
    Ok(Json(address))
}

/// DELETE /addresses/{id}
pub async fn delete_address(
    State(state): State<AddressState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StorefrontError> {
    let id = parse_id(&id)?;
    if !state.store.delete(&id).await? {
        return Err(AddressError::NotFound { id }.into());
    }

    tracing::info!(address_id = %id, "address deleted");
    Ok(StatusCode::NO_CONTENT)
}
