//! Shared identity types used across the order-management layers.

pub mod types;

pub use types::OrderId;
