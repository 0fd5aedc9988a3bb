//! Account records and balance arithmetic.
//!
//! An account's `balance` is its *available* funds. Escrowed funds are not
//! tracked separately: placing a bid debits the balance immediately, and a
//! payout credits losing bids back.

use serde::{Deserialize, Serialize};

use crate::{Bid, Result, SlotbidError, bid::bid_log};

/// A bidder, keyed by `username`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(rename = "hash")]
    pub password_hash: String,
    pub salt: String,
    pub username: String,
    /// Available funds in integer currency units. Never negative at rest.
    pub balance: i64,
    /// Snapshots of every bid this account placed, oldest first.
    #[serde(deserialize_with = "bid_log")]
    pub bids: Vec<Bid>,
}

impl Account {
    #[must_use]
    pub fn new(username: impl Into<String>, balance: i64) -> Self {
        Self {
            username: username.into(),
            balance,
            ..Self::default()
        }
    }

    /// Whether the available balance covers `amount` in full.
    #[must_use]
    pub fn can_cover(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Move `amount` out of the available balance (escrow).
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if balance < amount; the balance is
    /// unchanged in that case.
    pub fn debit(&mut self, amount: i64) -> Result<()> {
        if !self.can_cover(amount) {
            return Err(SlotbidError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Return `amount` to the available balance (refund).
    ///
    /// # Errors
    /// Returns `Internal` on arithmetic overflow.
    pub fn credit(&mut self, amount: i64) -> Result<()> {
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            SlotbidError::Internal(format!(
                "balance overflow crediting {amount} to {}",
                self.username
            ))
        })?;
        Ok(())
    }

    /// Append a bid snapshot to this account's log.
    pub fn log_bid(&mut self, bid: Bid) {
        self.bids.push(bid);
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Account {
    pub fn dummy(username: &str, balance: i64) -> Self {
        Self {
            password_hash: format!("hash-of-{username}"),
            salt: "pepper".to_string(),
            ..Self::new(username, balance)
        }
    }
}
