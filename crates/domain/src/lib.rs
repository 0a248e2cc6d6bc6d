//! Domain layer for the order-management system.
//!
//! This crate holds the pure business model and knows nothing about storage
//! or transport:
//! - `Order` aggregate root with its status state machine
//! - `OrderItem` and `Money` value objects

pub mod order;

pub use common::OrderId;
pub use order::{Money, Order, OrderError, OrderItem, OrderStatus};
