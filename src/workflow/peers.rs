//! Peer pairing list and the payment-settlement actions on a single peer.
//!
//! The detail view's action region is a small state machine:
//! `idle -> awaiting response -> idle`. While one action is awaiting the
//! server every action on that detail is refused, so a second click can
//! never race the first.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{Confirmable, Confirmation, Effect, Notice, PeerCommand, Ticket, TicketCounter};
use crate::Result;
use crate::api::PageSource;
use crate::models::{ActionOutcome, PaymentDecision, Page, Peer, PeerStatus};

/// Notice when a rejection is submitted without a reason.
pub const REASON_REQUIRED: &str = "Please provide a reason for rejection.";

/// Administrator actions available on a peer detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerAction {
    Approve,
    Reject,
    Unpair,
    BlockBidder,
    BlockAsker,
}

impl PeerAction {
    /// Button label when idle.
    pub fn label(self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Unpair => "Unpair",
            Self::BlockBidder => "Block Bidder",
            Self::BlockAsker => "Block Asker",
        }
    }

    /// Button label while the request is in flight.
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::Approve => "Approving...",
            Self::Reject => "Rejecting...",
            Self::Unpair => "Unpairing...",
            Self::BlockBidder | Self::BlockAsker => "Blocking...",
        }
    }

    /// Confirmation prompt.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Approve => "Approve this payment?",
            Self::Reject => "Reject this payment?",
            Self::Unpair => "Are you sure you want to unpair this peer?",
            Self::BlockBidder => "Block the bidder of this peer?",
            Self::BlockAsker => "Block the asker of this peer?",
        }
    }

    /// Notice text when the server accepts without a message.
    fn accepted(self) -> &'static str {
        match self {
            Self::Approve => "Payment approved",
            Self::Reject => "Payment rejected",
            Self::Unpair => "Peer unpaired",
            Self::BlockBidder => "Bidder blocked",
            Self::BlockAsker => "Asker blocked",
        }
    }

    /// Notice text when the action fails without a server message.
    pub fn failed(self) -> &'static str {
        match self {
            Self::Approve => "Failed to approve payment",
            Self::Reject => "Failed to reject payment",
            Self::Unpair => "Failed to unpair peer",
            Self::BlockBidder => "Failed to block bidder",
            Self::BlockAsker => "Failed to block asker",
        }
    }
}

/// What the UI should do after an action is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Show the confirmation prompt.
    Confirm(Confirmation),
    /// Open the rejection reason modal.
    AskReason,
    /// Show a validation notice; nothing was sent.
    Invalid(String),
}

/// Detail view bound to one already-loaded peer.
#[derive(Debug, Clone)]
pub struct PeerDetail {
    peer: Peer,
    in_flight: Option<PeerAction>,
    reason_open: bool,
}

impl PeerDetail {
    pub fn peer(&self) -> &Peer {
        &self.peer
    }

    /// The action awaiting the server, if any.
    pub fn in_flight(&self) -> Option<PeerAction> {
        self.in_flight
    }

    /// Whether the rejection reason modal is open.
    pub fn is_reason_open(&self) -> bool {
        self.reason_open
    }

    /// Whether `action` can be triggered right now.
    pub fn is_enabled(&self, action: PeerAction) -> bool {
        self.in_flight.is_none() && self.command(action, None).is_some()
    }

    /// The request behind `action`; `None` if its target user is unknown.
    fn command(&self, action: PeerAction, reason: Option<String>) -> Option<PeerCommand> {
        match action {
            PeerAction::Approve => Some(PeerCommand::Decide(PaymentDecision::Approved)),
            PeerAction::Reject => Some(PeerCommand::Decide(PaymentDecision::Declined {
                reason: reason.unwrap_or_default(),
            })),
            PeerAction::Unpair => Some(PeerCommand::Unpair),
            PeerAction::BlockBidder => self
                .peer
                .bid_user
                .as_ref()
                .map(|u| PeerCommand::Block { user_id: u.id }),
            PeerAction::BlockAsker => self
                .peer
                .ask_user
                .as_ref()
                .map(|u| PeerCommand::Block { user_id: u.id }),
        }
    }

    fn confirmation(&self, action: PeerAction, reason: Option<String>) -> Confirmation {
        Confirmation {
            prompt: action.prompt().to_string(),
            target: Confirmable::Peer {
                peer_id: self.peer.id,
                action,
                reason,
            },
        }
    }
}

/// State of the peer listing and its open detail.
#[derive(Debug)]
pub struct PeerStatusController {
    filter: PeerStatus,
    page: Page<Peer>,
    /// Source of the page currently displayed.
    source: PageSource,
    /// Source of the request the latest ticket was issued for.
    pending_source: Option<PageSource>,
    loading: bool,
    tickets: TicketCounter,
    detail: Option<PeerDetail>,
    /// Actions awaiting the server, by peer id; survives closing the detail.
    busy: BTreeMap<u64, PeerAction>,
}

impl PeerStatusController {
    /// Creates a controller on the default `awaiting_payment` filter.
    pub fn new() -> Self {
        Self {
            filter: PeerStatus::AwaitingPayment,
            page: Page::empty(),
            source: PageSource::First(PeerStatus::AwaitingPayment),
            pending_source: None,
            loading: false,
            tickets: TicketCounter::default(),
            detail: None,
            busy: BTreeMap::new(),
        }
    }

    /// Initial fetch when the screen mounts.
    pub fn mount(&mut self) -> Effect {
        self.fetch(PageSource::First(self.filter))
    }

    pub fn filter(&self) -> PeerStatus {
        self.filter
    }

    pub fn page(&self) -> &Page<Peer> {
        &self.page
    }

    pub fn records(&self) -> &[Peer] {
        &self.page.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn detail(&self) -> Option<&PeerDetail> {
        self.detail.as_ref()
    }

    /// Switches the status filter; always starts at its first page.
    pub fn select_filter(&mut self, status: PeerStatus) -> Effect {
        self.filter = status;
        self.fetch(PageSource::First(status))
    }

    /// Whether the "next" control is enabled.
    pub fn has_next(&self) -> bool {
        !self.loading && self.page.has_next() && self.page.next_page_url.is_some()
    }

    /// Whether the "previous" control is enabled.
    pub fn has_previous(&self) -> bool {
        !self.loading && self.page.has_previous() && self.page.prev_page_url.is_some()
    }

    /// Follows the server's `next_page_url` verbatim.
    pub fn next_page(&mut self) -> Option<Effect> {
        if !self.has_next() {
            return None;
        }
        let link = self.page.next_page_url.clone()?;
        Some(self.fetch(PageSource::Link(link)))
    }

    /// Follows the server's `prev_page_url` verbatim.
    pub fn previous_page(&mut self) -> Option<Effect> {
        if !self.has_previous() {
            return None;
        }
        let link = self.page.prev_page_url.clone()?;
        Some(self.fetch(PageSource::Link(link)))
    }

    /// Reloads the latest requested page, or the displayed one if none is pending.
    pub fn refresh(&mut self) -> Effect {
        let source = self
            .pending_source
            .clone()
            .unwrap_or_else(|| self.source.clone());
        self.fetch(source)
    }

    fn fetch(&mut self, source: PageSource) -> Effect {
        self.loading = true;
        self.pending_source = Some(source.clone());
        Effect::FetchPeers {
            ticket: self.tickets.issue(),
            source,
        }
    }

    /// Applies a fetched page. Returns `false` if the response was stale.
    ///
    /// A failed fetch degrades to an empty page; the error is only logged.
    pub fn apply_page(&mut self, ticket: Ticket, result: Result<Page<Peer>>) -> bool {
        if !self.tickets.is_current(ticket) {
            debug!(?ticket, "discarding stale peer page");
            return false;
        }
        self.loading = false;
        if let Some(source) = self.pending_source.take() {
            self.source = source;
        }
        self.page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!(filter = %self.filter, error = %e, "failed to fetch peers");
                Page::empty()
            }
        };
        true
    }

    /// Opens the detail of the listed peer at `index`, reusing the loaded record.
    pub fn open_detail(&mut self, index: usize) -> bool {
        let Some(peer) = self.page.data.get(index) else {
            return false;
        };
        self.detail = Some(PeerDetail {
            peer: peer.clone(),
            in_flight: self.busy.get(&peer.id).copied(),
            reason_open: false,
        });
        true
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Closes only the rejection reason modal.
    pub fn close_reason(&mut self) {
        if let Some(detail) = self.detail.as_mut() {
            detail.reason_open = false;
        }
    }

    /// Starts `action` on the open detail.
    ///
    /// Returns `None` when no detail is open or the action is disabled.
    pub fn request_action(&mut self, action: PeerAction) -> Option<Step> {
        let detail = self.detail.as_mut()?;
        if !detail.is_enabled(action) {
            return None;
        }
        if action == PeerAction::Reject {
            detail.reason_open = true;
            return Some(Step::AskReason);
        }
        Some(Step::Confirm(detail.confirmation(action, None)))
    }

    /// Validates the rejection reason and asks for confirmation.
    ///
    /// An empty or whitespace-only reason yields [`Step::Invalid`] and no
    /// request is ever built from it.
    pub fn submit_rejection(&mut self, reason: &str) -> Option<Step> {
        let detail = self.detail.as_ref()?;
        if !detail.reason_open || !detail.is_enabled(PeerAction::Reject) {
            return None;
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Some(Step::Invalid(REASON_REQUIRED.to_string()));
        }
        Some(Step::Confirm(
            detail.confirmation(PeerAction::Reject, Some(reason.to_string())),
        ))
    }

    /// Issues a confirmed action and marks it in flight.
    pub fn confirm_action(
        &mut self,
        peer_id: u64,
        action: PeerAction,
        reason: Option<String>,
    ) -> Option<Effect> {
        let detail = self.detail.as_mut().filter(|d| d.peer.id == peer_id)?;
        if detail.in_flight.is_some() {
            return None;
        }
        if action == PeerAction::Reject && reason.as_deref().is_none_or(|r| r.trim().is_empty()) {
            return None;
        }
        let command = detail.command(action, reason)?;
        detail.in_flight = Some(action);
        self.busy.insert(peer_id, action);
        Some(Effect::PeerMutation {
            peer_id,
            action,
            command,
        })
    }

    /// Applies the result of a peer action.
    ///
    /// On success the modals close and the latest requested page is re-fetched.
    /// On failure the detail stays open and the list is left as it was.
    pub fn apply_action(
        &mut self,
        peer_id: u64,
        action: PeerAction,
        result: Result<ActionOutcome>,
    ) -> (Notice, Option<Effect>) {
        self.busy.remove(&peer_id);
        let detail = self.detail.as_mut().filter(|d| d.peer.id == peer_id);
        if let Some(detail) = detail {
            detail.in_flight = None;
        }
        match result {
            Ok(outcome) if outcome.success => {
                if self.detail.as_ref().is_some_and(|d| d.peer.id == peer_id) {
                    self.detail = None;
                }
                (
                    Notice::success(outcome.message_or(action.accepted())),
                    Some(self.refresh()),
                )
            }
            Ok(outcome) => (Notice::error(outcome.message_or(action.failed())), None),
            Err(e) => {
                warn!(peer_id, ?action, error = %e, "peer action failed");
                (Notice::error(action.failed()), None)
            }
        }
    }
}

impl Default for PeerStatusController {
    fn default() -> Self {
        Self::new()
    }
}
