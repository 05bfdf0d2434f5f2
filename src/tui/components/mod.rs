//! Widgets shared by every tab.

pub mod badge;
pub mod modal;
pub mod status_bar;
pub mod tab_bar;
