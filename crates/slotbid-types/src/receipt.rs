//! Outcome types returned by the auction engine, plus the persisted
//! settlement marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proof that a bid was admitted and its funds escrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidReceipt {
    pub bid_id: String,
    pub slot_id: String,
    pub username: String,
    pub amount: i64,
    /// The slot's winning amount before this bid displaced it.
    pub previous_highest: i64,
    /// The bidder's available balance after the debit.
    pub balance_after: i64,
}

/// One refund issued to a non-winning bidder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub bid_id: String,
    pub username: String,
    pub amount: i64,
}

/// Result of paying out a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutReport {
    pub slot_id: String,
    pub winning_amount: i64,
    /// Refunds in slot bid-log order.
    pub refunds: Vec<Refund>,
}

impl PayoutReport {
    /// Sum of all refunded amounts, saturating at the `i64` bounds.
    #[must_use]
    pub fn total_refunded(&self) -> i64 {
        self.refunds
            .iter()
            .fold(0i64, |total, r| total.saturating_add(r.amount))
    }
}

/// Marker written under `_settled_<slotId>` when payouts are recorded.
/// Its presence means the slot's losing bids have already been refunded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRecord {
    pub slot_id: String,
    pub highest_bid_amount: i64,
    pub refunds: Vec<Refund>,
    pub settled_at: DateTime<Utc>,
}

impl SettlementRecord {
    #[must_use]
    pub fn from_report(report: &PayoutReport, settled_at: DateTime<Utc>) -> Self {
        Self {
            slot_id: report.slot_id.clone(),
            highest_bid_amount: report.winning_amount,
            refunds: report.refunds.clone(),
            settled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_refunded_sums_amounts() {
        let report = PayoutReport {
            slot_id: "s1".into(),
            winning_amount: 80,
            refunds: vec![
                Refund {
                    bid_id: "b1".into(),
                    username: "alice".into(),
                    amount: 50,
                },
                Refund {
                    bid_id: "b2".into(),
                    username: "carol".into(),
                    amount: 60,
                },
            ],
        };
        assert_eq!(report.total_refunded(), 110);
    }

    #[test]
    fn total_refunded_saturates() {
        let refund = |bid_id: &str, amount| Refund {
            bid_id: bid_id.into(),
            username: "alice".into(),
            amount,
        };
        let mut report = PayoutReport {
            slot_id: "s1".into(),
            winning_amount: i64::MAX,
            refunds: vec![refund("b1", i64::MAX), refund("b2", i64::MAX)],
        };
        assert_eq!(report.total_refunded(), i64::MAX);

        report.refunds = vec![refund("b1", i64::MIN), refund("b2", -1)];
        assert_eq!(report.total_refunded(), i64::MIN);
    }

    #[test]
    fn settlement_record_serde_roundtrip() {
        let report = PayoutReport {
            slot_id: "s1".into(),
            winning_amount: 80,
            refunds: Vec::new(),
        };
        let record = SettlementRecord::from_report(&report, Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""slotId":"s1""#));
        let back: SettlementRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
