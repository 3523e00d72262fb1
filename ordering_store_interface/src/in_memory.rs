//! In-memory store backend.
//!
//! The sole persistence layer for this demo: two `Vec`s behind `RwLock`s,
//! living for the lifetime of the process. Insertion order is preserved so
//! list responses come back in the order records were created.

use tokio::sync::RwLock;

use ordering_shared_types::{Dish, Order};

use crate::{DataStore, StoreResult};

/// In-memory [`DataStore`] implementation.
#[derive(Debug, Default)]
pub struct InMemoryDataStore {
    dishes: RwLock<Vec<Dish>>,
    orders: RwLock<Vec<Order>>,
}

impl InMemoryDataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records, for tests and demos.
    pub fn with_data(dishes: Vec<Dish>, orders: Vec<Order>) -> Self {
        Self {
            dishes: RwLock::new(dishes),
            orders: RwLock::new(orders),
        }
    }
}

#[async_trait::async_trait]
impl DataStore for InMemoryDataStore {
    async fn list_dishes(&self) -> StoreResult<Vec<Dish>> {
        Ok(self.dishes.read().await.clone())
    }

    async fn get_dish(&self, id: &str) -> StoreResult<Option<Dish>> {
        Ok(self
            .dishes
            .read()
            .await
            .iter()
            .find(|dish| dish.id == id)
            .cloned())
    }

    async fn put_dish(&self, dish: Dish) -> StoreResult<()> {
        let mut dishes = self.dishes.write().await;
        match dishes.iter_mut().find(|existing| existing.id == dish.id) {
            Some(existing) => *existing = dish,
            None => dishes.push(dish),
        }
        Ok(())
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn get_order(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .find(|order| order.id == id)
            .cloned())
    }

    async fn put_order(&self, order: Order) -> StoreResult<()> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|existing| existing.id == order.id) {
            Some(existing) => *existing = order,
            None => orders.push(order),
        }
        Ok(())
    }

    async fn delete_order(&self, id: &str) -> StoreResult<bool> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|order| order.id != id);
        Ok(orders.len() < before)
    }
}
