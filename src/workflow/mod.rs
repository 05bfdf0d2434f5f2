//! Status workflow controllers.
//!
//! Controllers own the list/detail view state of each screen and decide
//! which network work happens. They never perform I/O: every operation
//! returns an [`Effect`] describing the request, the runtime executes it,
//! and the result is fed back through an `apply_*` method.
//!
//! List fetches carry a [`Ticket`]; only the most recently issued ticket's
//! response is applied, so a slow reply for a stale filter or page can
//! never overwrite a newer one.

pub mod bids;
pub mod peers;
pub mod stats;

use std::time::{Duration, Instant};

use crate::api::PageSource;
use crate::models::{BidStatus, PaymentDecision};

pub use bids::{BidDetailView, BidListController};
pub use peers::{PeerAction, PeerDetail, PeerStatusController, Step};
pub use stats::{AdminContext, Metric};

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Generation number attached to a list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues tickets and remembers the latest one.
#[derive(Debug, Default)]
pub(crate) struct TicketCounter {
    latest: u64,
}

impl TicketCounter {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// Network work requested by a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `GET bids/{status}?page={page}`.
    FetchBids {
        ticket: Ticket,
        status: BidStatus,
        page: u32,
    },
    /// `GET bid-details/{id}`.
    FetchBidDetail { id: u64 },
    /// `GET cancel-bid/{id}`.
    CancelBid { id: u64 },
    /// `GET peers/{status}` or a pagination link.
    FetchPeers { ticket: Ticket, source: PageSource },
    /// One of the peer detail actions.
    PeerMutation {
        peer_id: u64,
        action: PeerAction,
        command: PeerCommand,
    },
}

/// The request behind a [`PeerAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerCommand {
    /// `POST approve-payment/{peer_id}`.
    Decide(PaymentDecision),
    /// `GET unpair-peering/{peer_id}`.
    Unpair,
    /// `GET user-status-update/{user_id}/blocked`.
    Block { user_id: u64 },
}

/// A destructive action waiting for the administrator's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub prompt: String,
    pub target: Confirmable,
}

/// What a [`Confirmation`] will trigger once accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmable {
    CancelBid {
        id: u64,
    },
    Peer {
        peer_id: u64,
        action: PeerAction,
        reason: Option<String>,
    },
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient feedback shown after an action.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: Instant,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    /// Whether the notice has been visible longer than [`NOTICE_TTL`].
    pub fn is_expired(&self) -> bool {
        self.raised_at.elapsed() > NOTICE_TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let mut counter = TicketCounter::default();
        let first = counter.issue();
        assert!(counter.is_current(first));

        let second = counter.issue();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn fresh_notice_is_not_expired() {
        let notice = Notice::error("boom");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(!notice.is_expired());
    }
}
