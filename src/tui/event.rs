//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::Result;
use crate::models::{ActionOutcome, Bid, Page, Peer};
use crate::workflow::{BidDetailView, Confirmable, Effect, PeerAction, Ticket};

use super::app::{App, Mode, Tab};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// A page of bids arrived.
    BidsLoaded {
        ticket: Ticket,
        result: Result<Page<Bid>>,
    },
    /// A bid detail arrived.
    BidDetailLoaded { id: u64, result: Result<Option<Bid>> },
    /// Cancellation response.
    BidCancelled {
        id: u64,
        result: Result<ActionOutcome>,
    },
    /// A page of peers arrived.
    PeersLoaded {
        ticket: Ticket,
        result: Result<Page<Peer>>,
    },
    /// Response to a peer detail action.
    PeerActionDone {
        peer_id: u64,
        action: PeerAction,
        result: Result<ActionOutcome>,
    },

    /// Request to quit the application.
    Quit,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
///
/// Returns the network work the runtime must perform, if any.
pub fn update(app: &mut App, message: Message) -> Option<Effect> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::BidsLoaded { ticket, result } => {
            if app.bids.apply_page(ticket, result) {
                app.bid_cursor = 0;
            }
            None
        }
        Message::BidDetailLoaded { id, result } => {
            if let Some(detail) = app.bid_detail.as_mut() {
                detail.apply(id, result);
            }
            None
        }
        Message::BidCancelled { id, result } => {
            let (notice, effect) = app.bids.apply_cancel(id, result);
            app.show_notice(notice);
            effect
        }
        Message::PeersLoaded { ticket, result } => {
            if app.peers.apply_page(ticket, result) {
                app.clamp_cursors();
            }
            None
        }
        Message::PeerActionDone {
            peer_id,
            action,
            result,
        } => {
            let (notice, effect) = app.peers.apply_action(peer_id, action, result);
            app.show_notice(notice);
            app.settle_mode();
            effect
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Effect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_notice();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    let quit = match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => key.modifiers.is_empty() && app.mode == Mode::Normal,
        _ => false,
    };
    if quit {
        app.should_quit = true;
        return None;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Confirm => handle_confirm_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Effect> {
    match key.code {
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
            None
        }
        KeyCode::BackTab => {
            app.previous_tab();
            None
        }
        _ => match app.current_tab() {
            Tab::Overview => None,
            Tab::Bids => handle_bids_tab_keys(app, key),
            Tab::Peers => handle_peers_tab_keys(app, key),
        },
    }
}

/// Handles keys for the Bids tab.
fn handle_bids_tab_keys(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if app.bid_detail.is_some() {
        if key.code == KeyCode::Esc {
            app.bid_detail = None;
        }
        return None;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.bid_cursor + 1 < app.bids.records().len() {
                app.bid_cursor += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.bid_cursor = app.bid_cursor.saturating_sub(1);
            None
        }
        KeyCode::Char('h') | KeyCode::Char('[') | KeyCode::Left => app.bids.previous_page(),
        KeyCode::Char('l') | KeyCode::Char(']') | KeyCode::Right => app.bids.next_page(),
        KeyCode::Char('g') | KeyCode::Home => app.bids.go_to_page(1),
        KeyCode::Char('G') | KeyCode::End => {
            let last = app.bids.page().last_page;
            app.bids.go_to_page(last)
        }
        KeyCode::Char('f') => {
            let status = app.bids.filter().next_filter();
            Some(app.bids.select_filter(status))
        }
        KeyCode::Char('F') => {
            let status = app.bids.filter().previous_filter();
            Some(app.bids.select_filter(status))
        }
        KeyCode::Char('r') => Some(app.bids.refresh()),
        KeyCode::Enter => {
            let id = app.selected_bid()?.id;
            let (view, effect) = BidDetailView::open(id);
            app.bid_detail = Some(view);
            Some(effect)
        }
        KeyCode::Char('c') => {
            let id = app.selected_bid()?.id;
            if let Some(confirmation) = app.bids.request_cancel(id) {
                app.confirmation = Some(confirmation);
                app.mode = Mode::Confirm;
            }
            None
        }
        _ => None,
    }
}

/// Handles keys for the Peers tab.
fn handle_peers_tab_keys(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if app.peers.detail().is_some() {
        let action = match key.code {
            KeyCode::Esc => {
                app.peers.close_detail();
                return None;
            }
            KeyCode::Char('a') => PeerAction::Approve,
            KeyCode::Char('x') => PeerAction::Reject,
            KeyCode::Char('u') => PeerAction::Unpair,
            KeyCode::Char('b') => PeerAction::BlockBidder,
            KeyCode::Char('B') => PeerAction::BlockAsker,
            _ => return None,
        };
        if let Some(step) = app.peers.request_action(action) {
            app.apply_step(step);
        }
        return None;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.peer_cursor + 1 < app.peers.records().len() {
                app.peer_cursor += 1;
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.peer_cursor = app.peer_cursor.saturating_sub(1);
            None
        }
        KeyCode::Char('h') | KeyCode::Char('[') | KeyCode::Left => app.peers.previous_page(),
        KeyCode::Char('l') | KeyCode::Char(']') | KeyCode::Right => app.peers.next_page(),
        KeyCode::Char('f') => {
            let status = app.peers.filter().next_filter();
            app.peer_cursor = 0;
            Some(app.peers.select_filter(status))
        }
        KeyCode::Char('F') => {
            let status = app.peers.filter().previous_filter();
            app.peer_cursor = 0;
            Some(app.peers.select_filter(status))
        }
        KeyCode::Char('r') => Some(app.peers.refresh()),
        KeyCode::Enter => {
            app.peers.open_detail(app.peer_cursor);
            None
        }
        _ => None,
    }
}

/// Handles keys while the rejection reason modal is open.
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Effect> {
    match key.code {
        KeyCode::Esc => {
            app.peers.close_reason();
            app.reason_input.clear();
            app.settle_mode();
        }
        KeyCode::Enter => {
            if let Some(step) = app.peers.submit_rejection(app.reason_input.as_str()) {
                app.apply_step(step);
            }
        }
        KeyCode::Char(c) => app.reason_input.insert(c),
        KeyCode::Backspace => app.reason_input.backspace(),
        KeyCode::Delete => app.reason_input.delete(),
        KeyCode::Left => app.reason_input.move_left(),
        KeyCode::Right => app.reason_input.move_right(),
        KeyCode::Home => app.reason_input.move_home(),
        KeyCode::End => app.reason_input.move_end(),
        _ => {}
    }
    None
}

/// Handles keys in confirm mode.
fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> Option<Effect> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let confirmation = app.confirmation.take()?;
            let effect = match confirmation.target {
                Confirmable::CancelBid { id } => app.bids.confirm_cancel(id),
                Confirmable::Peer {
                    peer_id,
                    action,
                    reason,
                } => app.peers.confirm_action(peer_id, action, reason),
            };
            app.settle_mode();
            effect
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.confirmation = None;
            app.settle_mode();
            None
        }
        _ => None,
    }
}
