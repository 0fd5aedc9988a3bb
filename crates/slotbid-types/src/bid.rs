//! Bid records.
//!
//! A bid is immutable once stored. Copies of it are appended to the owning
//! slot's and account's bid logs; those copies are historical snapshots,
//! never live references back to the canonical record.

use serde::{Deserialize, Deserializer, Serialize};

/// An account's offer of funds for a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bid {
    /// Ledger key of the bid, also appended to the bid index.
    pub id: String,
    /// The slot this bid competes for.
    pub slot_id: String,
    /// Offered amount in integer currency units.
    pub amount: i64,
    /// Opaque payload, e.g. a sealed proposal.
    pub content: String,
    /// The account that placed the bid.
    pub username: String,
}

impl Bid {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        slot_id: impl Into<String>,
        username: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            id: id.into(),
            slot_id: slot_id.into(),
            amount,
            content: String::new(),
            username: username.into(),
        }
    }

    /// Attach an opaque content payload.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Deserialize a bid log, accepting `null` as an empty log.
///
/// Producers that serialize an empty list as `null` are common; the log is
/// an audit trail, so both spellings mean "no bids yet".
pub(crate) fn bid_log<'de, D>(deserializer: D) -> std::result::Result<Vec<Bid>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Bid>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Bid {
    pub fn dummy(id: &str, slot_id: &str, username: &str, amount: i64) -> Self {
        Self::new(id, slot_id, username, amount).with_content(format!("proposal for {slot_id}"))
    }
}
