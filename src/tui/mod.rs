//! Terminal User Interface for the admin dashboard.
//!
//! Provides a Ratatui-based TUI over the statistics overview, the bid
//! listing and the peer settlement workflow.

pub mod app;
pub mod components;
pub mod dispatch;
pub mod event;
pub mod input;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use dispatch::dispatch;
pub use event::{Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
