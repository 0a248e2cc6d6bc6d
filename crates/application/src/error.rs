//! Application error types.

use common::OrderId;
use domain::OrderError;
use thiserror::Error;

/// Errors reported by a storage adapter behind the repository port.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored order could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur while running a use case.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An order with the requested id is already stored.
    #[error("Order already exists: {0}")]
    OrderAlreadyExists(OrderId),

    /// The order aggregate rejected the operation.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// The repository failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
