//! Peers tab: payment-status filter, peer table, detail and reason dialogs.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::{filter_line, or_dash, pagination_line};
use crate::models::{Peer, PeerStatus, PeerUser};
use crate::tui::app::{App, Mode};
use crate::tui::components::{badge::badge, modal};
use crate::workflow::{PeerAction, PeerDetail};

/// Single row shown when the page is empty.
pub const EMPTY_TEXT: &str = "No data found.";

const ACTION_KEYS: [(PeerAction, &str); 5] = [
    (PeerAction::Approve, "a"),
    (PeerAction::Reject, "x"),
    (PeerAction::Unpair, "u"),
    (PeerAction::BlockBidder, "b"),
    (PeerAction::BlockAsker, "B"),
];

/// Renders the Peers tab.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter strip
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    let filters = filter_line(&PeerStatus::FILTERS, app.peers.filter(), PeerStatus::label);
    frame.render_widget(Paragraph::new(filters), layout[0]);

    render_table(frame, layout[1], app);

    let page = app.peers.page();
    let footer = pagination_line(
        page.current_page,
        page.last_page,
        app.peers.has_previous(),
        app.peers.has_next(),
    );
    frame.render_widget(Paragraph::new(footer), layout[2]);

    if let Some(detail) = app.peers.detail() {
        render_detail(frame, detail);
        if detail.is_reason_open() {
            render_reason(frame, app, detail);
        }
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(["Reference", "Bidder", "Asker", "Amount", "Status", "Due"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if app.peers.records().is_empty() {
        vec![Row::new([Cell::from(EMPTY_TEXT)]).style(Style::default().fg(Color::DarkGray))]
    } else {
        app.peers.records().iter().map(row).collect()
    };

    let widths = [
        Constraint::Length(14),
        Constraint::Min(12),
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(20),
        Constraint::Length(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" {} ", app.peers.filter().label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .row_highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));

    let selected = (!app.peers.records().is_empty()).then_some(app.peer_cursor);
    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

fn row(peer: &Peer) -> Row<'_> {
    Row::new([
        Cell::from(peer.reference.as_str()),
        Cell::from(peer.bidder_name()),
        Cell::from(peer.asker_name()),
        Cell::from(format!("{} USDT", peer.pair_amount)),
        Cell::from(Line::from(badge(peer.status.label(), peer.status.as_str()))),
        Cell::from(or_dash(peer.due_at.as_deref())),
    ])
}

fn user_lines<'a>(role: &'static str, user: Option<&'a PeerUser>) -> Vec<Line<'a>> {
    let label = Span::styled(format!("{role:<10}"), Style::default().fg(Color::DarkGray));
    match user {
        Some(user) => vec![
            Line::from(vec![label, Span::raw(user.display_name())]),
            Line::from(vec![
                Span::raw(" ".repeat(10)),
                Span::styled(
                    format!(
                        "{}  {}",
                        or_dash(user.email.as_deref()),
                        or_dash(user.phone.as_deref())
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ],
        None => vec![Line::from(vec![label, Span::raw("N/A")])],
    }
}

fn render_detail(frame: &mut Frame, detail: &PeerDetail) {
    let peer = detail.peer();
    let area = modal::centered(frame.area(), 84, 17);
    let inner = modal::frame_dialog(frame, area, &format!("Peer {}", peer.reference), Color::Cyan);

    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<10}"), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{:<10}", "Status"), Style::default().fg(Color::DarkGray)),
            badge(peer.status.label(), peer.status.as_str()),
            Span::raw(format!("  {}", or_dash(peer.payment_status.as_deref()))),
        ]),
        field("Amount", format!("{} USDT", peer.pair_amount)),
        field("Due", or_dash(peer.due_at.as_deref()).to_string()),
        field("Paid", or_dash(peer.paid_at.as_deref()).to_string()),
        field("Confirmed", or_dash(peer.confirmed_at.as_deref()).to_string()),
        field("Hash", or_dash(peer.hash_tag.as_deref()).to_string()),
    ];
    lines.extend(user_lines("Bidder", peer.bid_user.as_ref()));
    lines.extend(user_lines("Asker", peer.ask_user.as_ref()));
    lines.push(Line::from(""));
    lines.push(action_line(detail));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Action buttons; only the pending action shows its busy label.
fn action_line(detail: &PeerDetail) -> Line<'static> {
    let mut spans = Vec::with_capacity(ACTION_KEYS.len() * 2);
    for (action, key) in ACTION_KEYS {
        let span = if detail.in_flight() == Some(action) {
            Span::styled(
                format!(" {} ", action.busy_label()),
                Style::default().fg(Color::Yellow),
            )
        } else if detail.is_enabled(action) {
            Span::styled(
                format!(" [{key}] {} ", action.label()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!(" [{key}] {} ", action.label()),
                Style::default().fg(Color::DarkGray),
            )
        };
        spans.push(span);
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_reason(frame: &mut Frame, app: &App, detail: &PeerDetail) {
    let area = modal::centered(frame.area(), 60, 6);
    let inner = modal::frame_dialog(frame, area, "Reject Payment", Color::Red);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new("Reason for rejection:"), rows[0]);

    let prompt = "> ";
    frame.render_widget(
        Paragraph::new(format!("{prompt}{}", app.reason_input.as_str())),
        rows[1],
    );

    let footer = if detail.in_flight() == Some(PeerAction::Reject) {
        Span::styled(
            PeerAction::Reject.busy_label(),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(
            "[Enter] Submit  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), rows[2]);

    if app.mode == Mode::Insert && app.confirmation.is_none() {
        let x = rows[1].x + prompt.len() as u16 + app.reason_input.cursor_column();
        frame.set_cursor_position((x.min(rows[1].right().saturating_sub(1)), rows[1].y));
    }
}
