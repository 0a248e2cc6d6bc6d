//! Storage port for orders.

use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::Order;

use crate::error::RepositoryError;

/// Core trait for order storage.
///
/// The use-case layer depends only on this trait; adapters in the
/// infrastructure layer implement it. Orders handed out by `get_by_id` are
/// owned copies: a mutation only becomes visible to other callers once it
/// has been passed back through `save`.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores the order under its id, fully replacing any previous entry.
    async fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Retrieves an order by id.
    ///
    /// Returns None if no order is stored under that id.
    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Removes the order stored under the id.
    ///
    /// Deleting an id that is not stored does nothing.
    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<R: OrderRepository + ?Sized> OrderRepository for Arc<R> {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        (**self).save(order).await
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        (**self).get_by_id(id).await
    }

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }
}
