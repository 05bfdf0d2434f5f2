//! Application state for the TUI.

use crate::models::Bid;
use crate::workflow::{
    AdminContext, BidDetailView, BidListController, Confirmation, Effect, Notice,
    PeerStatusController, Step,
};

use super::input::TextInput;

/// Central application state container.
pub struct App {
    // -- Tab State --
    /// List of available tabs.
    pub tabs: Vec<Tab>,
    /// Index of the currently active tab.
    pub active_tab: usize,

    // -- Screen State --
    /// Statistics snapshot loaded at startup.
    pub context: AdminContext,
    /// Bid listing.
    pub bids: BidListController,
    /// Peer listing and open peer detail.
    pub peers: PeerStatusController,
    /// Open bid detail, if any.
    pub bid_detail: Option<BidDetailView>,

    // -- UI State --
    /// Selected card on the bids tab.
    pub bid_cursor: usize,
    /// Selected row on the peers tab.
    pub peer_cursor: usize,
    /// Current input mode.
    pub mode: Mode,
    /// Pending confirmation prompt.
    pub confirmation: Option<Confirmation>,
    /// Rejection reason being typed.
    pub reason_input: TextInput,
    /// Notice to display (clears after timeout).
    pub notice: Option<Notice>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App around the startup statistics context.
    pub fn new(context: AdminContext) -> Self {
        Self {
            tabs: vec![Tab::Overview, Tab::Bids, Tab::Peers],
            active_tab: 0,

            context,
            bids: BidListController::new(),
            peers: PeerStatusController::new(),
            bid_detail: None,

            bid_cursor: 0,
            peer_cursor: 0,
            mode: Mode::Normal,
            confirmation: None,
            reason_input: TextInput::new(),
            notice: None,

            should_quit: false,
        }
    }

    /// Initial fetches for both listings.
    pub fn mount(&mut self) -> Vec<Effect> {
        vec![self.bids.mount(), self.peers.mount()]
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        self.active_tab = self
            .active_tab
            .checked_sub(1)
            .unwrap_or(self.tabs.len() - 1);
    }

    /// Whether the active tab is waiting for a list.
    pub fn is_loading(&self) -> bool {
        match self.current_tab() {
            Tab::Overview => false,
            Tab::Bids => self.bids.is_loading(),
            Tab::Peers => self.peers.is_loading(),
        }
    }

    pub fn selected_bid(&self) -> Option<&Bid> {
        self.bids.records().get(self.bid_cursor)
    }

    /// Keeps both cursors inside their lists.
    pub fn clamp_cursors(&mut self) {
        self.bid_cursor = self
            .bid_cursor
            .min(self.bids.records().len().saturating_sub(1));
        self.peer_cursor = self
            .peer_cursor
            .min(self.peers.records().len().saturating_sub(1));
    }

    /// Sets a notice to display.
    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Clears the notice once it has expired.
    pub fn clear_stale_notice(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    /// Handles the outcome of a peer action request.
    pub fn apply_step(&mut self, step: Step) {
        match step {
            Step::Confirm(confirmation) => {
                self.confirmation = Some(confirmation);
                self.mode = Mode::Confirm;
            }
            Step::AskReason => {
                self.reason_input.clear();
                self.mode = Mode::Insert;
            }
            Step::Invalid(message) => self.show_notice(Notice::error(message)),
        }
    }

    /// Whether the rejection reason modal is showing.
    pub fn is_reason_open(&self) -> bool {
        self.peers.detail().is_some_and(|d| d.is_reason_open())
    }

    /// Returns to the mode implied by the open modals.
    pub fn settle_mode(&mut self) {
        if self.confirmation.is_some() {
            self.mode = Mode::Confirm;
        } else if self.is_reason_open() {
            self.mode = Mode::Insert;
        } else {
            self.mode = Mode::Normal;
        }
    }
}

/// Tab types in the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Platform statistics.
    Overview,
    /// Bids by status.
    Bids,
    /// Peer pairings by payment status.
    Peers,
}

impl Tab {
    /// Returns the display title for the tab.
    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Bids => "Bids",
            Tab::Peers => "Peers",
        }
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing the rejection reason.
    Insert,
    /// Answering a confirmation prompt.
    Confirm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_wrap_both_ways() {
        let mut app = App::new(AdminContext::default());
        assert_eq!(app.current_tab(), Tab::Overview);
        app.previous_tab();
        assert_eq!(app.current_tab(), Tab::Peers);
        app.next_tab();
        app.next_tab();
        assert_eq!(app.current_tab(), Tab::Bids);
    }

    #[test]
    fn mount_fetches_both_lists() {
        let mut app = App::new(AdminContext::default());
        let effects = app.mount();
        assert!(matches!(effects[0], Effect::FetchBids { page: 1, .. }));
        assert!(matches!(effects[1], Effect::FetchPeers { .. }));
    }

    #[test]
    fn invalid_step_raises_error_notice() {
        let mut app = App::new(AdminContext::default());
        app.apply_step(Step::Invalid("nope".into()));
        assert_eq!(app.notice.as_ref().map(|n| n.message.as_str()), Some("nope"));
        assert_eq!(app.mode, Mode::Normal);
    }
}
