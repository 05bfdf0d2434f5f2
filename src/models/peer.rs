//! Peer pairing records.
//!
//! A peer is the match between one bid and one ask together with its
//! payment-settlement progress. Transitions are driven by administrator
//! actions on the server; the client never mutates a peer locally.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::bid::cycle;

/// Settlement status of a peer pairing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerStatus {
    #[default]
    AwaitingPayment,
    PaymentSubmitted,
    PaymentConfirmed,
    PaymentDeclined,
    /// Rendered with a neutral badge.
    #[serde(other)]
    Unknown,
}

impl PeerStatus {
    /// Statuses an administrator can filter by, in display order.
    pub const FILTERS: [PeerStatus; 4] = [
        Self::AwaitingPayment,
        Self::PaymentSubmitted,
        Self::PaymentConfirmed,
        Self::PaymentDeclined,
    ];

    /// Returns the wire / URL segment for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingPayment => "awaiting_payment",
            Self::PaymentSubmitted => "payment_submitted",
            Self::PaymentConfirmed => "payment_confirmed",
            Self::PaymentDeclined => "payment_declined",
            Self::Unknown => "unknown",
        }
    }

    /// Returns a human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::AwaitingPayment => "Awaiting Payment",
            Self::PaymentSubmitted => "Payment Submitted",
            Self::PaymentConfirmed => "Payment Confirmed",
            Self::PaymentDeclined => "Payment Declined",
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

impl fmt::Display for PeerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user on one side of a pairing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PeerUser {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PeerUser {
    /// Username for display, `"N/A"` when blank.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or("N/A")
    }
}

/// Summary of the bid or ask nested inside a peer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderSummary {
    pub id: u64,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub trx: Option<String>,
}

/// A pairing between a bid and an ask.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Peer {
    pub id: u64,
    #[serde(default)]
    pub reference: String,
    pub status: PeerStatus,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub pair_amount: Decimal,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub confirmed_at: Option<String>,
    #[serde(default)]
    pub hash_tag: Option<String>,
    #[serde(default)]
    pub bid_user: Option<PeerUser>,
    #[serde(default)]
    pub ask_user: Option<PeerUser>,
    #[serde(default)]
    pub bid: Option<OrderSummary>,
    #[serde(default)]
    pub ask: Option<OrderSummary>,
}

impl Peer {
    /// Display name of the bidding user.
    pub fn bidder_name(&self) -> &str {
        self.bid_user.as_ref().map_or("N/A", PeerUser::display_name)
    }

    /// Display name of the asking user.
    pub fn asker_name(&self) -> &str {
        self.ask_user.as_ref().map_or("N/A", PeerUser::display_name)
    }
}
