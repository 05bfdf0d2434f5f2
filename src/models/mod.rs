//! Typed records for the admin REST API.
//!
//! Every response is parsed once at the network boundary into these types.
//! Status fields are closed enums with an explicit `Unknown` fallback so an
//! unexpected server value never fails a whole page.

pub mod bid;
pub mod peer;
pub mod stats;

use serde::{Deserialize, Serialize};

pub use bid::{Bid, BidStatus};
pub use peer::{OrderSummary, Peer, PeerStatus, PeerUser};
pub use stats::AdminStats;

/// The `{ success, message, data }` envelope wrapping every response.
///
/// Some endpoints omit `success`; only an explicit `false` marks an
/// application-level refusal.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Returns the payload unless the server refused the request.
    ///
    /// `success: false` and a missing `data` both yield `None`; callers
    /// treat that as an empty result rather than a failure.
    pub fn into_data(self) -> Option<T> {
        if self.success == Some(false) {
            return None;
        }
        self.data
    }
}

/// Result of a mutation endpoint (`cancel-bid`, `approve-payment`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionOutcome {
    /// The server message, or `fallback` when none (or a blank one) was sent.
    pub fn message_or(&self, fallback: &str) -> String {
        match self.message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// One page of a paginated listing.
///
/// `current_page` and `last_page` are normalized on deserialization so that
/// `1 <= current_page <= last_page` always holds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawPage<T>")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
}

impl<T> Page<T> {
    /// A single empty page, used when a fetch degrades.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            current_page: 1,
            last_page: 1,
            next_page_url: None,
            prev_page_url: None,
        }
    }

    /// Whether a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Whether a page before this one exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Wire form of [`Page`] before the bounds are normalized.
#[derive(Deserialize)]
struct RawPage<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    current_page: Option<u32>,
    #[serde(default)]
    last_page: Option<u32>,
    #[serde(default)]
    next_page_url: Option<String>,
    #[serde(default)]
    prev_page_url: Option<String>,
}

impl<T> From<RawPage<T>> for Page<T> {
    fn from(raw: RawPage<T>) -> Self {
        let last_page = raw.last_page.unwrap_or(1).max(1);
        let current_page = raw.current_page.unwrap_or(1).clamp(1, last_page);
        Self {
            data: raw.data,
            current_page,
            last_page,
            next_page_url: raw.next_page_url.filter(|u| !u.is_empty()),
            prev_page_url: raw.prev_page_url.filter(|u| !u.is_empty()),
        }
    }
}

/// Body of `POST approve-payment/{peer_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PaymentDecision {
    /// Serialized as `{ "status": "approved" }`.
    Approved,
    /// Serialized as `{ "status": "declined", "reason": "..." }`.
    Declined { reason: String },
}
