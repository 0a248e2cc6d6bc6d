//! Order aggregate implementation.

use common::OrderId;
use serde::{Deserialize, Serialize};

use super::{Money, OrderError, OrderItem, OrderStatus};

/// Order aggregate root.
///
/// Holds the order identity, its line items in insertion order, and its
/// status. Items are fixed at construction; the only mutations are the
/// status transitions [`Order::cancel`] and [`Order::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    id: OrderId,

    /// Line items, in the order they were supplied.
    items: Vec<OrderItem>,

    /// Current status of the order.
    #[serde(default)]
    status: OrderStatus,
}

impl Order {
    /// Creates a new open order with the given items.
    pub fn new(id: OrderId, items: Vec<OrderItem>) -> Self {
        Self {
            id,
            items,
            status: OrderStatus::Open,
        }
    }
}

// Query methods
impl Order {
    /// Returns the order ID.
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the line items.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns true while the order is open.
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Returns the sum of all line totals, at full precision.
    ///
    /// Fails with [`OrderError::TotalOutOfRange`] if a line total or the
    /// running sum overflows the decimal range.
    pub fn total(&self) -> Result<Money, OrderError> {
        self.items
            .iter()
            .try_fold(Money::zero(), |acc, item| {
                item.line_total().and_then(|line| acc.checked_add(line))
            })
            .ok_or(OrderError::TotalOutOfRange)
    }
}

// Status transitions
impl Order {
    /// Cancels the order.
    ///
    /// Accepted from every status; canceling a canceled order is a no-op.
    pub fn cancel(&mut self) {
        if self.status != OrderStatus::Canceled {
            self.status = OrderStatus::Canceled;
        }
    }

    /// Completes the order.
    ///
    /// Only an open order can be completed. Completing a completed order is
    /// a no-op, and a canceled order can never be completed.
    pub fn complete(&mut self) -> Result<(), OrderError> {
        if !self.status.can_complete() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "complete",
            });
        }

        self.status = OrderStatus::Completed;
        Ok(())
    }
}
