//! Bid list, filter and cancellation workflow.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::{Confirmable, Confirmation, Effect, Notice, Ticket, TicketCounter};
use crate::Result;
use crate::models::{ActionOutcome, Bid, BidStatus, Page};

/// Prompt shown before a bid is cancelled.
pub const CANCEL_PROMPT: &str = "Are you sure you want to cancel this bid?";

/// Notice when the server refuses a cancellation without a message.
pub const CANCEL_REFUSED: &str = "Failed to cancel bid";

/// Notice when the cancellation request itself fails.
pub const CANCEL_FAILED: &str = "Failed to cancel the bid.";

/// State of the bid listing: filter, current page and in-flight cancels.
#[derive(Debug)]
pub struct BidListController {
    filter: BidStatus,
    page: Page<Bid>,
    /// Page number of the latest request for `filter`.
    requested_page: u32,
    loading: bool,
    tickets: TicketCounter,
    cancelling: BTreeSet<u64>,
}

impl BidListController {
    /// Creates a controller on the default `pending` filter.
    pub fn new() -> Self {
        Self {
            filter: BidStatus::Pending,
            page: Page::empty(),
            requested_page: 1,
            loading: false,
            tickets: TicketCounter::default(),
            cancelling: BTreeSet::new(),
        }
    }

    /// Initial fetch when the screen mounts.
    pub fn mount(&mut self) -> Effect {
        self.fetch(1)
    }

    pub fn filter(&self) -> BidStatus {
        self.filter
    }

    pub fn page(&self) -> &Page<Bid> {
        &self.page
    }

    pub fn records(&self) -> &[Bid] {
        &self.page.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switches the status filter and requests its first page.
    pub fn select_filter(&mut self, status: BidStatus) -> Effect {
        self.filter = status;
        self.fetch(1)
    }

    /// Whether the "next" control is enabled.
    pub fn has_next(&self) -> bool {
        !self.loading && self.page.has_next()
    }

    /// Whether the "previous" control is enabled.
    pub fn has_previous(&self) -> bool {
        !self.loading && self.page.has_previous()
    }

    pub fn next_page(&mut self) -> Option<Effect> {
        self.has_next()
            .then(|| self.fetch(self.page.current_page + 1))
    }

    pub fn previous_page(&mut self) -> Option<Effect> {
        self.has_previous()
            .then(|| self.fetch(self.page.current_page - 1))
    }

    /// Jumps to `page`, keeping the filter. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: u32) -> Option<Effect> {
        if self.loading || page < 1 || page > self.page.last_page {
            return None;
        }
        Some(self.fetch(page))
    }

    /// Reloads the latest requested filter and page.
    pub fn refresh(&mut self) -> Effect {
        self.fetch(self.requested_page)
    }

    fn fetch(&mut self, page: u32) -> Effect {
        self.loading = true;
        self.requested_page = page;
        Effect::FetchBids {
            ticket: self.tickets.issue(),
            status: self.filter,
            page,
        }
    }

    /// Applies a fetched page. Returns `false` if the response was stale.
    ///
    /// A failed fetch degrades to an empty page; the error is only logged.
    pub fn apply_page(&mut self, ticket: Ticket, result: Result<Page<Bid>>) -> bool {
        if !self.tickets.is_current(ticket) {
            debug!(?ticket, "discarding stale bid page");
            return false;
        }
        self.loading = false;
        self.page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!(filter = %self.filter, error = %e, "failed to fetch bids");
                Page::empty()
            }
        };
        true
    }

    /// Whether a cancellation for `id` is waiting on the server.
    pub fn is_cancelling(&self, id: u64) -> bool {
        self.cancelling.contains(&id)
    }

    /// Whether the cancel control is offered for `bid`.
    pub fn can_cancel(&self, bid: &Bid) -> bool {
        bid.is_cancellable() && !self.is_cancelling(bid.id)
    }

    /// Asks for confirmation before cancelling bid `id`.
    ///
    /// Returns `None` if the bid is not listed or cannot be cancelled.
    pub fn request_cancel(&self, id: u64) -> Option<Confirmation> {
        let bid = self.records().iter().find(|b| b.id == id)?;
        self.can_cancel(bid).then(|| Confirmation {
            prompt: CANCEL_PROMPT.to_string(),
            target: Confirmable::CancelBid { id },
        })
    }

    /// Issues the cancellation once confirmed and marks `id` in flight.
    pub fn confirm_cancel(&mut self, id: u64) -> Option<Effect> {
        let bid = self.records().iter().find(|b| b.id == id)?;
        if !self.can_cancel(bid) {
            return None;
        }
        self.cancelling.insert(id);
        Some(Effect::CancelBid { id })
    }

    /// Applies a cancellation result.
    ///
    /// Any server answer re-fetches the latest requested filter and page; a transport
    /// failure leaves the list untouched.
    pub fn apply_cancel(
        &mut self,
        id: u64,
        result: Result<ActionOutcome>,
    ) -> (Notice, Option<Effect>) {
        self.cancelling.remove(&id);
        match result {
            Ok(outcome) if outcome.success => (
                Notice::success(outcome.message_or("Bid cancelled")),
                Some(self.refresh()),
            ),
            Ok(outcome) => (
                Notice::error(outcome.message_or(CANCEL_REFUSED)),
                Some(self.refresh()),
            ),
            Err(e) => {
                warn!(id, error = %e, "error cancelling bid");
                (Notice::error(CANCEL_FAILED), None)
            }
        }
    }
}

impl Default for BidListController {
    fn default() -> Self {
        Self::new()
    }
}

/// Detail view of a single bid, fetched by id.
#[derive(Debug, Clone, PartialEq)]
pub enum BidDetailView {
    Loading { id: u64 },
    Loaded(Bid),
    NotFound { id: u64 },
}

impl BidDetailView {
    /// Opens the detail of bid `id` and requests it.
    pub fn open(id: u64) -> (Self, Effect) {
        (Self::Loading { id }, Effect::FetchBidDetail { id })
    }

    /// The id this view is bound to.
    pub fn id(&self) -> u64 {
        match self {
            Self::Loading { id } | Self::NotFound { id } => *id,
            Self::Loaded(bid) => bid.id,
        }
    }

    /// Applies a fetched bid. Responses for another id are ignored.
    pub fn apply(&mut self, id: u64, result: Result<Option<Bid>>) {
        if self.id() != id {
            debug!(id, "discarding bid detail for a closed view");
            return;
        }
        *self = match result {
            Ok(Some(bid)) => Self::Loaded(bid),
            Ok(None) => Self::NotFound { id },
            Err(e) => {
                warn!(id, error = %e, "failed to fetch bid");
                Self::NotFound { id }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::PeerdeskError;
    use crate::workflow::NoticeKind;

    fn bid(id: u64, status: BidStatus) -> Bid {
        Bid {
            id,
            amount: dec!(100),
            amount_to_pair: None,
            trx: Some(format!("TX-{id}")),
            status,
            plan_id: Some(1),
            created_at: None,
        }
    }

    fn page(data: Vec<Bid>, current_page: u32, last_page: u32) -> Page<Bid> {
        Page {
            data,
            current_page,
            last_page,
            next_page_url: None,
            prev_page_url: None,
        }
    }

    fn ticket_of(effect: &Effect) -> Ticket {
        match effect {
            Effect::FetchBids { ticket, .. } => *ticket,
            other => panic!("expected FetchBids, got {other:?}"),
        }
    }

    fn loaded(data: Vec<Bid>, current: u32, last: u32) -> BidListController {
        let mut controller = BidListController::new();
        let effect = controller.mount();
        assert!(controller.apply_page(ticket_of(&effect), Ok(page(data, current, last))));
        controller
    }

    fn transport_error() -> PeerdeskError {
        PeerdeskError::Io("connection reset".to_string())
    }

    #[test]
    fn every_filter_requests_its_first_page_once() {
        let mut controller = loaded(vec![], 3, 5);
        for status in BidStatus::FILTERS {
            let effect = controller.select_filter(status);
            match effect {
                Effect::FetchBids {
                    status: requested,
                    page,
                    ..
                } => {
                    assert_eq!(requested, status);
                    assert_eq!(page, 1);
                }
                other => panic!("unexpected effect {other:?}"),
            }
            assert!(controller.apply_page(
                ticket_of(&effect),
                Ok(page(vec![bid(1, status)], 1, 1))
            ));
            assert_eq!(controller.records()[0].status, status);
        }
    }

    #[test]
    fn page_change_keeps_filter() {
        let mut controller = loaded(vec![], 1, 3);
        let effect = controller.select_filter(BidStatus::Completed);
        controller.apply_page(ticket_of(&effect), Ok(page(vec![], 1, 3)));

        match controller.next_page() {
            Some(Effect::FetchBids { status, page, .. }) => {
                assert_eq!(status, BidStatus::Completed);
                assert_eq!(page, 2);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn navigation_stays_within_bounds() {
        let mut controller = loaded(vec![], 1, 2);
        assert!(!controller.has_previous());
        assert!(controller.previous_page().is_none());
        assert!(controller.go_to_page(0).is_none());
        assert!(controller.go_to_page(3).is_none());
        assert!(controller.has_next());

        let effect = controller.next_page().unwrap();
        controller.apply_page(ticket_of(&effect), Ok(page(vec![], 2, 2)));
        assert!(!controller.has_next());
        assert!(controller.next_page().is_none());
        assert!(controller.has_previous());
    }

    #[test]
    fn navigation_disabled_while_loading() {
        let mut controller = loaded(vec![], 1, 4);
        controller.next_page().unwrap();
        assert!(controller.is_loading());
        assert!(controller.next_page().is_none());
        assert!(controller.go_to_page(3).is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut controller = BidListController::new();
        let pending = controller.mount();
        let paired = controller.select_filter(BidStatus::Paired);

        // The newer request resolves first.
        assert!(controller.apply_page(
            ticket_of(&paired),
            Ok(page(vec![bid(2, BidStatus::Paired)], 1, 1))
        ));
        assert!(!controller.apply_page(
            ticket_of(&pending),
            Ok(page(vec![bid(1, BidStatus::Pending)], 1, 1))
        ));

        assert_eq!(controller.filter(), BidStatus::Paired);
        assert_eq!(controller.records()[0].id, 2);
        assert!(!controller.is_loading());
    }

    #[test]
    fn failed_fetch_degrades_to_empty_page() {
        let mut controller = loaded(vec![bid(1, BidStatus::Pending)], 2, 3);
        let effect = controller.refresh();
        assert!(controller.apply_page(ticket_of(&effect), Err(transport_error())));
        assert!(controller.records().is_empty());
        assert_eq!(controller.page().current_page, 1);
        assert!(!controller.is_loading());
    }

    #[test]
    fn cancel_offered_only_for_pending() {
        let controller = loaded(
            vec![bid(1, BidStatus::Pending), bid(2, BidStatus::Cancelled)],
            1,
            1,
        );
        let offered: Vec<bool> = controller
            .records()
            .iter()
            .map(|b| controller.can_cancel(b))
            .collect();
        assert_eq!(offered, [true, false]);
        assert!(controller.request_cancel(2).is_none());
        assert!(controller.request_cancel(99).is_none());

        let confirmation = controller.request_cancel(1).unwrap();
        assert_eq!(confirmation.prompt, CANCEL_PROMPT);
        assert_eq!(confirmation.target, Confirmable::CancelBid { id: 1 });
    }

    #[test]
    fn concurrent_cancels_are_tracked_per_bid() {
        let mut controller = loaded(
            vec![bid(1, BidStatus::Pending), bid(2, BidStatus::Pending)],
            1,
            1,
        );
        assert_eq!(controller.confirm_cancel(1), Some(Effect::CancelBid { id: 1 }));
        assert!(controller.is_cancelling(1));
        assert!(controller.confirm_cancel(1).is_none());

        assert_eq!(controller.confirm_cancel(2), Some(Effect::CancelBid { id: 2 }));
        assert!(controller.is_cancelling(2));
    }

    #[test]
    fn successful_cancel_refetches_current_page() {
        let mut controller = loaded(vec![], 1, 3);
        let effect = controller.go_to_page(2).unwrap();
        controller.apply_page(
            ticket_of(&effect),
            Ok(page(vec![bid(5, BidStatus::Pending)], 2, 3)),
        );
        controller.confirm_cancel(5).unwrap();

        let outcome = ActionOutcome {
            success: true,
            message: Some("Bid cancelled successfully".to_string()),
        };
        let (notice, effect) = controller.apply_cancel(5, Ok(outcome));
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "Bid cancelled successfully");
        assert!(!controller.is_cancelling(5));
        match effect {
            Some(Effect::FetchBids { status, page, .. }) => {
                assert_eq!(status, BidStatus::Pending);
                assert_eq!(page, 2);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn cancel_result_after_filter_switch_refetches_new_first_page() {
        let mut controller = loaded(vec![bid(1, BidStatus::Pending)], 3, 5);
        controller.confirm_cancel(1).unwrap();
        let paired = controller.select_filter(BidStatus::Paired);

        let (_, refetch) = controller.apply_cancel(
            1,
            Ok(ActionOutcome {
                success: true,
                message: None,
            }),
        );
        let refetch = refetch.unwrap();
        match refetch {
            Effect::FetchBids { status, page, .. } => {
                assert_eq!(status, BidStatus::Paired);
                assert_eq!(page, 1);
            }
            ref other => panic!("unexpected effect {other:?}"),
        }

        assert!(!controller.apply_page(ticket_of(&paired), Ok(page(vec![], 1, 1))));
        assert!(controller.apply_page(
            ticket_of(&refetch),
            Ok(page(vec![bid(2, BidStatus::Paired)], 1, 1))
        ));
        assert_eq!(controller.records()[0].status, BidStatus::Paired);
    }

    #[test]
    fn refused_cancel_uses_fallback_message() {
        let mut controller = loaded(vec![bid(1, BidStatus::Pending)], 1, 1);
        controller.confirm_cancel(1).unwrap();
        let (notice, effect) = controller.apply_cancel(1, Ok(ActionOutcome::default()));
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, CANCEL_REFUSED);
        assert!(effect.is_some());
    }

    #[test]
    fn transport_failure_on_cancel_does_not_refetch() {
        let mut controller = loaded(vec![bid(1, BidStatus::Pending)], 1, 1);
        controller.confirm_cancel(1).unwrap();
        let (notice, effect) = controller.apply_cancel(1, Err(transport_error()));
        assert_eq!(notice.message, CANCEL_FAILED);
        assert!(effect.is_none());
        assert!(controller.can_cancel(&controller.records()[0]));
    }

    #[test]
    fn detail_view_lifecycle() {
        let (mut view, effect) = BidDetailView::open(7);
        assert_eq!(effect, Effect::FetchBidDetail { id: 7 });
        assert_eq!(view, BidDetailView::Loading { id: 7 });

        view.apply(8, Ok(Some(bid(8, BidStatus::Paired))));
        assert_eq!(view, BidDetailView::Loading { id: 7 });

        view.apply(7, Ok(Some(bid(7, BidStatus::Completed))));
        assert!(matches!(view, BidDetailView::Loaded(ref b) if b.id == 7));

        let (mut view, _) = BidDetailView::open(9);
        view.apply(9, Err(transport_error()));
        assert_eq!(view, BidDetailView::NotFound { id: 9 });
    }
}
