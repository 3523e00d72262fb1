//! Store abstraction for the ordering backend.
//!
//! Handlers depend on the [`DataStore`] trait rather than a concrete
//! backend, so tests can inject a fresh [`InMemoryDataStore`] per case and a
//! future persistent backend slots in behind the same interface.

use async_trait::async_trait;
use thiserror::Error;

use ordering_shared_types::{Dish, Order};

pub mod in_memory;

pub use in_memory::InMemoryDataStore;

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not complete the operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence interface for dishes and orders.
///
/// Listing returns records in insertion order. `put_*` upserts by id: a
/// record with an unknown id is appended, a known id is overwritten in
/// place.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_dishes(&self) -> StoreResult<Vec<Dish>>;

    async fn get_dish(&self, id: &str) -> StoreResult<Option<Dish>>;

    async fn put_dish(&self, dish: Dish) -> StoreResult<()>;

    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    async fn get_order(&self, id: &str) -> StoreResult<Option<Order>>;

    async fn put_order(&self, order: Order) -> StoreResult<()>;

    /// Remove an order by id. Returns `true` if a record was removed.
    async fn delete_order(&self, id: &str) -> StoreResult<bool>;
}
