//! Service traits for address persistence

use crate::addresses::Address;
use crate::core::error::StorageError;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage for the address book
///
/// Handlers only talk to this trait, so the in-memory store used in tests and
/// demos can be swapped for a database-backed one.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// Store a new address
    async fn create(&self, address: Address) -> Result<Address, StorageError>;

    /// Get an address by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Address>, StorageError>;

    /// List all addresses, oldest first
    async fn list(&self) -> Result<Vec<Address>, StorageError>;

    /// Replace a stored address, returning `None` if it does not exist
    async fn update(&self, address: Address) -> Result<Option<Address>, StorageError>;

    /// Delete an address, returning whether it existed
    async fn delete(&self, id: &Uuid) -> Result<bool, StorageError>;

    /// Clear the default flag on every address except `keep`
    async fn clear_default_except(&self, keep: &Uuid) -> Result<(), StorageError>;
}
