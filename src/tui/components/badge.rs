//! Coloured status badges.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Badge colour for a wire status value.
pub fn status_color(status: &str) -> Color {
    match status {
        "pending" => Color::Yellow,
        "completed" | "payment_confirmed" => Color::Green,
        "cancelled" | "payment_declined" => Color::Red,
        "payment_submitted" => Color::Blue,
        _ => Color::Gray,
    }
}

/// A reversed badge showing `label`, coloured by `status`.
pub fn badge(label: &str, status: &str) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default()
            .fg(Color::Black)
            .bg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}
