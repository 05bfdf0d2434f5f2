//! Read-only view over the administrator statistics snapshot.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::AdminStats;

/// One labelled figure on the overview tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

impl Metric {
    fn count(label: &'static str, value: u64) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }

    fn usdt(label: &'static str, value: Decimal) -> Self {
        Self {
            label,
            value: format!("{} USDT", value.normalize()),
        }
    }
}

/// Shared administrator context. Initialized once, never mutated after.
#[derive(Debug, Clone, Default)]
pub struct AdminContext {
    snapshot: Option<Arc<AdminStats>>,
}

impl AdminContext {
    /// Wraps the snapshot fetched at startup; `None` when the fetch failed.
    pub fn initialize(snapshot: Option<AdminStats>) -> Self {
        Self {
            snapshot: snapshot.map(Arc::new),
        }
    }

    pub fn snapshot(&self) -> Option<&AdminStats> {
        self.snapshot.as_deref()
    }

    fn stats(&self) -> AdminStats {
        self.snapshot().cloned().unwrap_or_default()
    }

    /// The eight overview figures, zero-valued when no snapshot is loaded.
    pub fn metrics(&self) -> [Metric; 8] {
        let s = self.stats();
        [
            Metric::count("Total Users", s.users),
            Metric::count("Active Users", s.active_users),
            Metric::count("Total Bids", s.bids),
            Metric::count("Total Asks", s.asks),
            Metric::count("Successful Bids", s.success_bids),
            Metric::count("Successful Asks", s.success_asks),
            Metric::usdt("Sum of Bids (USDT)", s.sum_bids),
            Metric::usdt("Sum of Asks (USDT)", s.sum_asks),
        ]
    }

    /// Bars for the activity chart: users, active users, bids, asks.
    pub fn activity_bars(&self) -> [(&'static str, u64); 4] {
        let s = self.stats();
        [
            ("Users", s.users),
            ("Active", s.active_users),
            ("Bids", s.bids),
            ("Asks", s.asks),
        ]
    }

    /// Share of bid volume in total bid plus ask volume, in `0.0..=1.0`.
    ///
    /// `None` when both sums are zero.
    pub fn distribution(&self) -> Option<f64> {
        let s = self.stats();
        let total = s.sum_bids + s.sum_asks;
        if total <= Decimal::ZERO {
            return None;
        }
        let ratio = (s.sum_bids / total).to_f64()?;
        Some(ratio.clamp(0.0, 1.0))
    }
}
