//! Application layer for the order-management system.
//!
//! This crate provides the use cases and the port they depend on:
//! - `OrderRepository` trait, the storage port implemented by adapters
//! - `OrderService`, which orchestrates the `Order` aggregate through the port

pub mod error;
pub mod repository;
pub mod service;

pub use error::{RepositoryError, ServiceError};
pub use repository::OrderRepository;
pub use service::OrderService;
