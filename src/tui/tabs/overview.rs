//! Overview tab: platform statistics.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{BarChart, Block, Borders, Gauge, Paragraph},
};

use crate::tui::app::App;
use crate::workflow::Metric;

/// Renders the Overview tab.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Metric cards
            Constraint::Min(8),    // Activity chart
            Constraint::Length(3), // Volume split
        ])
        .split(area);

    render_metrics(frame, layout[0], &app.context.metrics());
    render_activity(frame, layout[1], app);
    render_distribution(frame, layout[2], app);
}

/// Two rows of four metric cards.
fn render_metrics(frame: &mut Frame, area: Rect, metrics: &[Metric]) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(4)])
        .split(area);

    for (row, chunk) in rows.iter().zip(metrics.chunks(4)) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(*row);
        for (cell, metric) in cells.iter().zip(chunk) {
            let block = Block::default()
                .title(format!(" {} ", metric.label))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            let value = Paragraph::new(Line::from(metric.value.as_str()))
                .style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .block(block);
            frame.render_widget(value, *cell);
        }
    }
}

/// Bar chart of users and orders.
fn render_activity(frame: &mut Frame, area: Rect, app: &App) {
    let bars = app.context.activity_bars();
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Activity ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .data(&bars[..])
        .bar_width(9)
        .bar_gap(3)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

/// Gauge of bid volume against ask volume.
fn render_distribution(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Bid / Ask Volume ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(ratio) = app.context.distribution() else {
        let para = Paragraph::new("No volume yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    };

    let bids = (ratio * 100.0).round();
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Red))
        .ratio(ratio)
        .label(format!("Bids {bids:.0}% / Asks {:.0}%", 100.0 - bids));
    frame.render_widget(gauge, area);
}
