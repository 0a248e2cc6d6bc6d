//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Status transitions:
/// ```text
/// Open ──────┬──► Completed
///            │        │
///            └────────┴──► Canceled ──► Canceled (no-op)
/// ```
///
/// Canceling is always accepted and is idempotent. Completing is only legal
/// from `Open`; completing a completed order is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order has been placed and is still live.
    #[default]
    Open,

    /// Order was canceled (terminal state).
    Canceled,

    /// Order has been fulfilled.
    Completed,
}

impl OrderStatus {
    /// Returns true if the order can be completed from this status.
    pub fn can_complete(&self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::Completed)
    }

    /// Returns the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
