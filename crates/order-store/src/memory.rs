use std::collections::HashMap;
use std::sync::Arc;

use application::{OrderRepository, RepositoryError};
use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use tokio::sync::RwLock;

/// In-memory order repository.
///
/// Stores orders in a process-local map keyed by order id. Clones share the
/// same map, and the map lives exactly as long as the last handle: nothing
/// survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Returns true if no orders are stored.
    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }

    /// Removes all stored orders.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        self.orders
            .write()
            .await
            .insert(order.id().clone(), order.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        self.orders.write().await.remove(id);
        Ok(())
    }
}
