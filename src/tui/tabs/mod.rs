//! Per-tab layouts.

pub mod bids;
pub mod overview;
pub mod peers;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Filter strip: every label, the active one highlighted.
pub(crate) fn filter_line<T: Copy + PartialEq>(
    all: &[T],
    active: T,
    label: impl Fn(T) -> &'static str,
) -> Line<'static> {
    let mut spans = vec![Span::styled(" Status: ", Style::default().fg(Color::DarkGray))];
    for &status in all {
        let style = if status == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", label(status)), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Pagination footer with arrows greyed out at the bounds.
pub(crate) fn pagination_line(current: u32, last: u32, has_prev: bool, has_next: bool) -> Line<'static> {
    let arrow = |enabled: bool, text: &'static str| {
        let color = if enabled { Color::Cyan } else { Color::DarkGray };
        Span::styled(text, Style::default().fg(color))
    };
    Line::from(vec![
        arrow(has_prev, " ◀ [h] "),
        Span::raw(format!("Page {current} of {last}")),
        arrow(has_next, " [l] ▶ "),
    ])
}

/// `Some` text or a dash.
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}
