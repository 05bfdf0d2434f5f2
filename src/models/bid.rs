//! Bid records.
//!
//! A bid is a buy-side order. The client only observes its status and may
//! ask the server to cancel it while it is still pending.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Lifecycle status of a bid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    #[default]
    Pending,
    Paired,
    Failed,
    Completed,
    Cancelled,
    /// Any value the server sends that we do not know about.
    #[serde(other)]
    Unknown,
}

impl BidStatus {
    /// Statuses an administrator can filter by, in display order.
    pub const FILTERS: [BidStatus; 5] = [
        Self::Pending,
        Self::Paired,
        Self::Failed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the wire / URL segment for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paired => "paired",
            Self::Failed => "failed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    /// Returns a human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paired => "Paired",
            Self::Failed => "Failed",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    /// The filter after this one, wrapping around.
    pub fn next_filter(self) -> Self {
        cycle(&Self::FILTERS, self, 1)
    }

    /// The filter before this one, wrapping around.
    pub fn previous_filter(self) -> Self {
        cycle(&Self::FILTERS, self, Self::FILTERS.len() - 1)
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Steps `by` positions through `all`, starting from `current`.
///
/// A value not in `all` starts from the first entry.
pub(crate) fn cycle<T: Copy + PartialEq>(all: &[T], current: T, by: usize) -> T {
    let index = all.iter().position(|s| *s == current).unwrap_or(0);
    all[(index + by) % all.len()]
}

/// A single bid as listed by `bids/{status}` and `bid-details/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bid {
    pub id: u64,
    pub amount: Decimal,
    #[serde(default)]
    pub amount_to_pair: Option<Decimal>,
    #[serde(default)]
    pub trx: Option<String>,
    pub status: BidStatus,
    #[serde(default)]
    pub plan_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Bid {
    /// Whether the server would accept a cancellation for this bid.
    pub fn is_cancellable(&self) -> bool {
        self.status == BidStatus::Pending
    }
}
