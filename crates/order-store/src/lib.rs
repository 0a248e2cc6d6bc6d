//! Storage adapters for the order repository port.
//!
//! - `InMemoryOrderRepository`: process-local map, the default adapter
//! - `PostgresOrderRepository`: one JSONB document row per order

pub mod memory;
pub mod postgres;

pub use application::{OrderRepository, RepositoryError};
pub use memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;
