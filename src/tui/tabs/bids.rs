//! Bids tab: status filter, bid cards and the bid detail dialog.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{filter_line, or_dash, pagination_line};
use crate::models::{Bid, BidStatus};
use crate::tui::app::App;
use crate::tui::components::{badge::badge, modal};
use crate::workflow::BidDetailView;

/// Shown in place of the cards when the page is empty.
pub const EMPTY_TEXT: &str = "No bids found for the selected status.";

/// Renders the Bids tab.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter strip
            Constraint::Min(3),    // Cards
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    let filters = filter_line(&BidStatus::FILTERS, app.bids.filter(), BidStatus::label);
    frame.render_widget(Paragraph::new(filters), layout[0]);

    render_cards(frame, layout[1], app);

    let page = app.bids.page();
    let footer = pagination_line(
        page.current_page,
        page.last_page,
        app.bids.has_previous(),
        app.bids.has_next(),
    );
    frame.render_widget(Paragraph::new(footer), layout[2]);

    if let Some(detail) = &app.bid_detail {
        render_detail(frame, detail);
    }
}

fn render_cards(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} Bids ", app.bids.filter().label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.bids.records().is_empty() {
        let text = if app.bids.is_loading() {
            "Loading..."
        } else {
            EMPTY_TEXT
        };
        let para = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let items: Vec<ListItem> = app
        .bids
        .records()
        .iter()
        .map(|bid| ListItem::new(card(app, bid)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
        .highlight_symbol("▌");
    let mut state = ListState::default().with_selected(Some(app.bid_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Three-line card for one bid.
fn card<'a>(app: &App, bid: &'a Bid) -> Vec<Line<'a>> {
    let header = Line::from(vec![
        Span::styled(
            format!("#{} ", bid.id),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} USDT ", bid.amount),
            Style::default().fg(Color::White),
        ),
        badge(bid.status.label(), bid.status.as_str()),
    ]);

    let to_pair = bid
        .amount_to_pair
        .map_or_else(|| "-".to_string(), |a| a.to_string());
    let details = Line::from(vec![
        Span::styled("  To pair: ", Style::default().fg(Color::DarkGray)),
        Span::raw(to_pair),
        Span::styled("  TRX: ", Style::default().fg(Color::DarkGray)),
        Span::raw(or_dash(bid.trx.as_deref())),
        Span::styled("  Created: ", Style::default().fg(Color::DarkGray)),
        Span::raw(or_dash(bid.created_at.as_deref())),
    ]);

    let control = if app.bids.is_cancelling(bid.id) {
        Line::from(Span::styled(
            "  Cancelling...",
            Style::default().fg(Color::Yellow),
        ))
    } else if app.bids.can_cancel(bid) {
        Line::from(Span::styled("  [c] Cancel", Style::default().fg(Color::Red)))
    } else {
        Line::from("")
    };

    vec![header, details, control]
}

fn render_detail(frame: &mut Frame, detail: &BidDetailView) {
    let area = modal::centered(frame.area(), 56, 10);
    let inner = modal::frame_dialog(
        frame,
        area,
        &format!("Bid #{}", detail.id()),
        Color::Cyan,
    );

    let lines = match detail {
        BidDetailView::Loading { .. } => vec![Line::from("Loading...")],
        BidDetailView::NotFound { .. } => vec![Line::from(Span::styled(
            "Bid not found.",
            Style::default().fg(Color::Red),
        ))],
        BidDetailView::Loaded(bid) => {
            let field = |name: &'static str, value: String| {
                Line::from(vec![
                    Span::styled(format!("{name:<15}"), Style::default().fg(Color::DarkGray)),
                    Span::raw(value),
                ])
            };
            vec![
                field("Amount", format!("{} USDT", bid.amount)),
                field(
                    "Amount to pair",
                    bid.amount_to_pair
                        .map_or_else(|| "-".to_string(), |a| format!("{a} USDT")),
                ),
                field("TRX", or_dash(bid.trx.as_deref()).to_string()),
                Line::from(vec![
                    Span::styled(format!("{:<15}", "Status"), Style::default().fg(Color::DarkGray)),
                    badge(bid.status.label(), bid.status.as_str()),
                ]),
                field(
                    "Plan",
                    bid.plan_id.map_or_else(|| "-".to_string(), |p| p.to_string()),
                ),
                field("Created", or_dash(bid.created_at.as_deref()).to_string()),
            ]
        }
    };
    frame.render_widget(Paragraph::new(lines), inner);
}
