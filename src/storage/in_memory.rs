//! In-memory implementation of AddressStore for testing and development

use crate::addresses::Address;
use crate::core::AddressStore;
use crate::core::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

const STORE: &str = "in-memory addresses";

/// In-memory address store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryAddressStore {
    addresses: Arc<RwLock<HashMap<Uuid, Address>>>,
}

impl InMemoryAddressStore {
    /// Create a new in-memory address store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Address>>, StorageError> {
        self.addresses.read().map_err(|_| StorageError::LockPoisoned {
            store: STORE,
            kind: "read",
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Address>>, StorageError> {
        self.addresses.write().map_err(|_| StorageError::LockPoisoned {
            store: STORE,
            kind: "write",
        })
    }
}

#[async_trait]
impl AddressStore for InMemoryAddressStore {
    async fn create(&self, address: Address) -> Result<Address, StorageError> {
        self.write()?.insert(address.id, address.clone());
        Ok(address)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Address>, StorageError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Address>, StorageError> {
        let mut addresses: Vec<Address> = self.read()?.values().cloned().collect();
        addresses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(addresses)
    }

    async fn update(&self, address: Address) -> Result<Option<Address>, StorageError> {
        let mut addresses = self.write()?;
        match addresses.get_mut(&address.id) {
            Some(slot) => {
                *slot = address.clone();
                Ok(Some(address))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, StorageError> {
        Ok(self.write()?.remove(id).is_some())
    }

    async fn clear_default_except(&self, keep: &Uuid) -> Result<(), StorageError> {
        for address in self.write()?.values_mut() {
            if &address.id != keep {
                address.is_default = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn address(city: &str, is_default: bool) -> Address {
        let now = Utc::now();
        Address {
            id: Uuid::new_v4(),
            full_name: "Test User".to_string(),
            phone_number: "555-0100".to_string(),
            address_line1: "1 Main St".to_string(),
            city: city.to_string(),
            state: "CA".to_string(),
            postal_code: "94000".to_string(),
            country: "US".to_string(),
            is_default,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryAddressStore::new();
        let created = store.create(address("Oakland", false)).await.unwrap();

        let found = store.get(&created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert!(store.get(&Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_creation() {
        let store = InMemoryAddressStore::new();
        let first = store.create(address("A", false)).await.unwrap();
        let mut later = address("B", false);
        later.created_at = first.created_at + chrono::TimeDelta::seconds(1);
        store.create(later).await.unwrap();

        let cities: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.city)
            .collect();
        assert_eq!(cities, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = InMemoryAddressStore::new();
        assert!(store.update(address("X", false)).await.unwrap().is_none());

        let mut stored = store.create(address("X", false)).await.unwrap();
        stored.city = "Y".to_string();
        let updated = store.update(stored.clone()).await.unwrap();
        assert_eq!(updated.unwrap().city, "Y");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryAddressStore::new();
        let stored = store.create(address("Z", false)).await.unwrap();
        assert!(store.delete(&stored.id).await.unwrap());
        assert!(!store.delete(&stored.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_default_except() {
        let store = InMemoryAddressStore::new();
        let a = store.create(address("A", true)).await.unwrap();
        let b = store.create(address("B", true)).await.unwrap();

        store.clear_default_except(&b.id).await.unwrap();

        assert!(!store.get(&a.id).await.unwrap().unwrap().is_default);
        assert!(store.get(&b.id).await.unwrap().unwrap().is_default);
    }
}
