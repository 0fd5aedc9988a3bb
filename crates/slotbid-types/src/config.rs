//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::{Result, SlotbidError};

/// What `payout_bid` remembers about a slot it has paid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMode {
    /// Nothing is recorded. Every payout refunds every currently losing bid
    /// again, so repeated payouts credit the same bidders repeatedly.
    #[default]
    Recompute,
    /// A settlement marker is written. A second payout fails with
    /// `SlotAlreadySettled`, and new bids on the slot are rejected.
    MarkOnSettle,
}

impl std::fmt::Display for SettlementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recompute => write!(f, "RECOMPUTE"),
            Self::MarkOnSettle => write!(f, "MARK_ON_SETTLE"),
        }
    }
}

/// How a multi-write operation reaches the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Writes are issued one by one. A failure leaves the earlier writes
    /// durable and is reported as `PartialWrite`.
    #[default]
    Direct,
    /// The full write plan is journaled first and can be replayed by
    /// recovery after a mid-sequence failure.
    Journaled,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "DIRECT"),
            Self::Journaled => write!(f, "JOURNALED"),
        }
    }
}

/// Configuration for an auction engine instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Settlement bookkeeping for `payout_bid`.
    pub settlement: SettlementMode,
    /// Write path for `place_bid` / `payout_bid`.
    pub write_mode: WriteMode,
    /// Reject bids placed after the slot's `bidDeadline`.
    /// Off by default: slots historically store the deadline without
    /// enforcing it.
    pub enforce_bid_deadline: bool,
}

impl EngineConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `Configuration` if the document is not valid config JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SlotbidError::Configuration(e.to_string()))
    }

    #[must_use]
    pub fn with_settlement(mut self, settlement: SettlementMode) -> Self {
        self.settlement = settlement;
        self
    }

    #[must_use]
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    #[must_use]
    pub fn with_deadline_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_bid_deadline = enforce;
        self
    }
}
