//! Slot records: auctionable time windows on a device.
//!
//! Invariant: `highest_bid_amount` equals the largest `amount` among the
//! accepted bids in `bids`, or zero when none has been accepted.

use serde::{Deserialize, Serialize};

use crate::{Bid, bid::bid_log};

/// An auctionable, time-bound resource allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    /// Start of the validity window (unix seconds).
    pub start_time: i64,
    /// End of the validity window (unix seconds).
    pub end_time: i64,
    /// Snapshots of every accepted bid, in acceptance order.
    #[serde(deserialize_with = "bid_log")]
    pub bids: Vec<Bid>,
    /// Instant after which bids close (unix seconds).
    pub bid_deadline: i64,
    /// Non-owning reference to the device offering this slot.
    pub device_id: String,
    /// Current winning amount.
    pub highest_bid_amount: i64,
}

impl Slot {
    #[must_use]
    pub fn new(id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            device_id: device_id.into(),
            ..Self::default()
        }
    }

    /// Whether `amount` would displace the current winner. Ties do not.
    #[must_use]
    pub fn outbids(&self, amount: i64) -> bool {
        amount > self.highest_bid_amount
    }

    /// Append an accepted bid and make it the winner.
    pub fn record_bid(&mut self, bid: Bid) {
        self.highest_bid_amount = bid.amount;
        self.bids.push(bid);
    }

    /// Bids strictly below the winning amount. These are refunded on payout;
    /// the winner and anything tied with it are not.
    pub fn losing_bids(&self) -> impl Iterator<Item = &Bid> + '_ {
        self.bids
            .iter()
            .filter(|b| b.amount < self.highest_bid_amount)
    }

    /// Largest amount among the logged bids, or zero.
    #[must_use]
    pub fn max_logged_amount(&self) -> i64 {
        self.bids.iter().map(|b| b.amount).max().unwrap_or(0)
    }

    /// Whether bidding is still open at `now` (unix seconds).
    #[must_use]
    pub fn accepts_bids_at(&self, now: i64) -> bool {
        now <= self.bid_deadline
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Slot {
    pub fn dummy(id: &str) -> Self {
        Self {
            start_time: 1_700_000_000,
            end_time: 1_700_003_600,
            bid_deadline: 1_699_999_000,
            ..Self::new(id, "dev1")
        }
    }
}
