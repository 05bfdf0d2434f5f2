//! Administrator statistics snapshot.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Aggregate platform counters shown on the overview tab.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdminStats {
    pub users: u64,
    pub active_users: u64,
    pub bids: u64,
    pub asks: u64,
    pub success_bids: u64,
    pub success_asks: u64,
    pub sum_bids: Decimal,
    pub sum_asks: Decimal,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn missing_counters_default_to_zero() {
        let stats: AdminStats =
            serde_json::from_str(r#"{"users": 10, "sum_bids": "1200.5"}"#).unwrap();
        assert_eq!(stats.users, 10);
        assert_eq!(stats.active_users, 0);
        assert_eq!(stats.sum_bids, dec!(1200.5));
        assert_eq!(stats.sum_asks, Decimal::ZERO);
    }
}
