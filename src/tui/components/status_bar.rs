//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Tab};
use crate::workflow::NoticeKind;

/// Renders the status bar: filter, page, loading state and current notice.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let context = match app.current_tab() {
        Tab::Overview => match app.context.snapshot() {
            Some(_) => " Statistics loaded ".to_string(),
            None => " Statistics unavailable ".to_string(),
        },
        Tab::Bids => format!(
            " {} │ Page {} of {} ",
            app.bids.filter().label(),
            app.bids.page().current_page,
            app.bids.page().last_page
        ),
        Tab::Peers => format!(
            " {} │ Page {} of {} ",
            app.peers.filter().label(),
            app.peers.page().current_page,
            app.peers.page().last_page
        ),
    };

    let loading = if app.is_loading() {
        Span::styled(" Loading... ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("")
    };

    let notice = match &app.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            };
            Span::styled(format!(" {} ", notice.message), Style::default().fg(color))
        }
        None => Span::raw(""),
    };

    let line = Line::from(vec![
        Span::styled(context, Style::default().fg(Color::White)),
        Span::raw("│"),
        loading,
        notice,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
