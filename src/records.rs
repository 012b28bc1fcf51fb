//! Domain record contracts for the data-access collaborator
//!
//! The engine never performs its own data fetches: the caller resolves the
//! store, franchise, pet, and order records a request needs and exposes them
//! through the [`RecordStore`] seam. [`InMemoryRecordStore`] is the standard
//! implementation for callers that pre-load records, and for tests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator joining the two parts of a store's natural key
pub const STORE_KEY_SEPARATOR: char = '#';

/// A store, keyed by the composite `id#location` code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    /// Store identifier (first half of the natural key)
    pub id: String,

    /// Store location (second half of the natural key)
    pub location: String,

    /// Code of the owning franchise, if the store belongs to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_code: Option<String>,
}

impl StoreRecord {
    /// Composite natural key, e.g. `store-001#main`
    pub fn code(&self) -> String {
        format!("{}{}{}", self.id, STORE_KEY_SEPARATOR, self.location)
    }
}

/// A franchise owning zero or more stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseRecord {
    /// Franchise code
    pub code: String,

    /// Display name
    pub name: String,
}

/// A pet listed by a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRecord {
    /// Pet identifier
    pub id: String,

    /// Composite code of the listing store
    pub store_code: String,
}

/// An order placed against a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order number
    pub order_number: String,

    /// Composite code of the store the order was placed against
    pub store_code: String,

    /// Subject id of the ordering principal
    pub owner_sub: String,
}

/// Lookup seam over pre-resolved domain records
///
/// All lookups return `Option`; a missing record is a resolution gap, not an
/// error, and the entity builder fails closed on it.
pub trait RecordStore: Send + Sync {
    /// Look up a store by composite code
    fn store(&self, code: &str) -> Option<StoreRecord>;

    /// Look up a franchise by code
    fn franchise(&self, code: &str) -> Option<FranchiseRecord>;

    /// All stores owned by a franchise
    fn franchise_stores(&self, code: &str) -> Vec<StoreRecord>;

    /// Look up a pet within a store
    fn pet(&self, store_code: &str, pet_id: &str) -> Option<PetRecord>;

    /// Look up an order within a store
    fn order(&self, store_code: &str, order_number: &str) -> Option<OrderRecord>;
}

/// In-memory record store backed by hash maps
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    stores: HashMap<String, StoreRecord>,
    franchises: HashMap<String, FranchiseRecord>,
    pets: HashMap<(String, String), PetRecord>,
    orders: HashMap<(String, String), OrderRecord>,
}

impl InMemoryRecordStore {
    /// Create an empty record store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a store record
    pub fn with_store(mut self, store: StoreRecord) -> Self {
        self.stores.insert(store.code(), store);
        self
    }

    /// Add a franchise record
    pub fn with_franchise(mut self, franchise: FranchiseRecord) -> Self {
        self.franchises.insert(franchise.code.clone(), franchise);
        self
    }

    /// Add a pet record
    pub fn with_pet(mut self, pet: PetRecord) -> Self {
        self.pets.insert((pet.store_code.clone(), pet.id.clone()), pet);
        self
    }

    /// Add an order record
    pub fn with_order(mut self, order: OrderRecord) -> Self {
        self.orders
            .insert((order.store_code.clone(), order.order_number.clone()), order);
        self
    }
}

impl RecordStore for InMemoryRecordStore {
    fn store(&self, code: &str) -> Option<StoreRecord> {
        self.stores.get(code).cloned()
    }

    fn franchise(&self, code: &str) -> Option<FranchiseRecord> {
        self.franchises.get(code).cloned()
    }

    fn franchise_stores(&self, code: &str) -> Vec<StoreRecord> {
        let mut owned: Vec<StoreRecord> = self
            .stores
            .values()
            .filter(|store| store.franchise_code.as_deref() == Some(code))
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.code().cmp(&b.code()));
        owned
    }

    fn pet(&self, store_code: &str, pet_id: &str) -> Option<PetRecord> {
        self.pets
            .get(&(store_code.to_string(), pet_id.to_string()))
            .cloned()
    }

    fn order(&self, store_code: &str, order_number: &str) -> Option<OrderRecord> {
        self.orders
            .get(&(store_code.to_string(), order_number.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store(id: &str, location: &str, franchise: Option<&str>) -> StoreRecord {
        StoreRecord {
            id: id.to_string(),
            location: location.to_string(),
            franchise_code: franchise.map(String::from),
        }
    }

    #[test]
    fn test_store_composite_code() {
        let store = sample_store("store-001", "main", None);
        assert_eq!(store.code(), "store-001#main");
    }

    #[test]
    fn test_store_lookup_by_code() {
        let records = InMemoryRecordStore::new()
            .with_store(sample_store("store-001", "main", None));

        assert!(records.store("store-001#main").is_some());
        assert!(records.store("store-001#east").is_none());
    }

    #[test]
    fn test_franchise_stores_filters_by_ownership() {
        let records = InMemoryRecordStore::new()
            .with_store(sample_store("store-001", "main", Some("fr-1")))
            .with_store(sample_store("store-002", "east", Some("fr-1")))
            .with_store(sample_store("store-003", "west", Some("fr-2")))
            .with_store(sample_store("store-004", "main", None));

        let owned = records.franchise_stores("fr-1");
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|s| s.franchise_code.as_deref() == Some("fr-1")));
    }

    #[test]
    fn test_pet_and_order_lookup() {
        let records = InMemoryRecordStore::new()
            .with_pet(PetRecord {
                id: "pet-9".to_string(),
                store_code: "store-001#main".to_string(),
            })
            .with_order(OrderRecord {
                order_number: "order-42".to_string(),
                store_code: "store-001#main".to_string(),
                owner_sub: "user-123".to_string(),
            });

        assert!(records.pet("store-001#main", "pet-9").is_some());
        assert!(records.pet("store-002#main", "pet-9").is_none());
        assert_eq!(
            records.order("store-001#main", "order-42").unwrap().owner_sub,
            "user-123"
        );
    }
}
