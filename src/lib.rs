//! Administrator dashboard for a peer-to-peer bid/ask settlement platform.
//!
//! Provides typed models and an async client for the admin REST API, pure
//! workflow controllers for bids and peer pairings, and a terminal UI that
//! drives them.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod tls;
pub mod tui;
pub mod workflow;

pub use error::{PeerdeskError, Result};
