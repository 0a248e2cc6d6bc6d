//! Order service implementing the order use cases.

use common::OrderId;
use domain::{Order, OrderError, OrderItem};
use tokio::sync::Mutex;

use crate::error::ServiceError;
use crate::repository::OrderRepository;

/// Service for managing orders.
///
/// Orchestrates the `Order` aggregate through the [`OrderRepository`] port
/// and contains no storage or transport logic. Every read-mutate-write
/// sequence runs under one service-wide lock, so concurrent callers sharing
/// the service cannot lose each other's updates.
pub struct OrderService<R: OrderRepository> {
    repository: R,
    write_lock: Mutex<()>,
}

impl<R: OrderRepository> OrderService<R> {
    /// Creates a new order service on top of the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Creates a new open order with the given items and persists it.
    ///
    /// Fails with [`ServiceError::OrderAlreadyExists`] when the id is taken;
    /// the stored order is left untouched in that case. An order whose total
    /// overflows is rejected before anything is saved.
    #[tracing::instrument(skip(self, items), fields(item_count = items.len()))]
    pub async fn create_order(
        &self,
        items: Vec<OrderItem>,
        order_id: OrderId,
    ) -> Result<Order, ServiceError> {
        let _guard = self.write_lock.lock().await;

        if self.repository.get_by_id(&order_id).await?.is_some() {
            tracing::warn!(%order_id, "order id already in use");
            return Err(ServiceError::OrderAlreadyExists(order_id));
        }

        let order = Order::new(order_id, items);
        let total = order.total()?;
        self.repository.save(&order).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id(), %total, "order created");

        Ok(order)
    }

    /// Cancels an order.
    ///
    /// Returns false if the order doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &OrderId) -> Result<bool, ServiceError> {
        let found = self
            .mutate(order_id, |order| {
                order.cancel();
                Ok(())
            })
            .await?;

        if found {
            metrics::counter!("orders_canceled_total").increment(1);
            tracing::info!(%order_id, "order canceled");
        }
        Ok(found)
    }

    /// Completes an order.
    ///
    /// Returns false if the order doesn't exist; a canceled order yields
    /// [`ServiceError::Order`].
    #[tracing::instrument(skip(self))]
    pub async fn complete_order(&self, order_id: &OrderId) -> Result<bool, ServiceError> {
        let found = self.mutate(order_id, Order::complete).await?;

        if found {
            metrics::counter!("orders_completed_total").increment(1);
            tracing::info!(%order_id, "order completed");
        }
        Ok(found)
    }

    /// Loads an order by ID.
    ///
    /// Returns None if the order doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Option<Order>, ServiceError> {
        Ok(self.repository.get_by_id(order_id).await?)
    }

    /// Loads the order, applies `change`, and saves it back, all under the write lock.
    async fn mutate<F>(&self, order_id: &OrderId, change: F) -> Result<bool, ServiceError>
    where
        F: FnOnce(&mut Order) -> Result<(), OrderError>,
    {
        let _guard = self.write_lock.lock().await;

        let Some(mut order) = self.repository.get_by_id(order_id).await? else {
            tracing::debug!(%order_id, "order not found");
            return Ok(false);
        };

        change(&mut order)?;
        self.repository.save(&order).await?;
        Ok(true)
    }
}
