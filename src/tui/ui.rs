//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::app::{App, Mode, Tab};
use super::components::{modal, status_bar, tab_bar};
use super::tabs::{bids, overview, peers};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Min(5),    // Tab content
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    tab_bar::render(frame, layout[0], app);
    status_bar::render(frame, layout[1], app);

    match app.current_tab() {
        Tab::Overview => overview::render(frame, layout[2], app),
        Tab::Bids => bids::render(frame, layout[2], app),
        Tab::Peers => peers::render(frame, layout[2], app),
    }

    render_keybindings(frame, layout[3], app);

    if let Some(confirmation) = &app.confirmation {
        modal::render_confirmation(frame, confirmation);
    }
}

/// Renders the keybindings help line.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = match (app.mode, app.current_tab()) {
        (Mode::Insert, _) => "[Enter]submit reason [Esc]cancel",
        (Mode::Confirm, _) => "[y]yes [n]no",
        (Mode::Normal, Tab::Overview) => "[Tab]switch tab [q]quit",
        (Mode::Normal, Tab::Bids) if app.bid_detail.is_some() => "[Esc]close [q]quit",
        (Mode::Normal, Tab::Bids) => {
            "[j/k]select [h/l]page [g/G]first/last [f/F]filter [r]refresh [Enter]details [c]cancel bid [q]quit"
        }
        (Mode::Normal, Tab::Peers) if app.peers.detail().is_some() => {
            "[a]approve [x]reject [u]unpair [b]block bidder [B]block asker [Esc]close"
        }
        (Mode::Normal, Tab::Peers) => {
            "[j/k]select [h/l]page [f/F]filter [r]refresh [Enter]details [q]quit"
        }
    };

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
