//! Record kinds and identifiers.
//!
//! Entity identifiers (usernames, slot / bid / device ids) are plain strings
//! chosen by the caller; they double as ledger keys. Journal intents use
//! UUIDv7 for time-ordered sorting.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{SlotbidError, constants};

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// The four top-level record kinds stored in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum RecordKind {
    Account,
    Slot,
    Bid,
    Device,
}

impl RecordKind {
    /// All kinds, in index declaration order.
    pub const ALL: [Self; 4] = [Self::Account, Self::Slot, Self::Bid, Self::Device];

    /// The ledger key of this kind's identifier index.
    #[must_use]
    pub fn index_key(self) -> &'static str {
        match self {
            Self::Account => constants::ACCOUNT_INDEX_KEY,
            Self::Slot => constants::SLOT_INDEX_KEY,
            Self::Bid => constants::BID_INDEX_KEY,
            Self::Device => constants::DEVICE_INDEX_KEY,
        }
    }

    /// Lowercase singular name, used as the prefix for generated ids.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Slot => "slot",
            Self::Bid => "bid",
            Self::Device => "device",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "Account"),
            Self::Slot => write!(f, "Slot"),
            Self::Bid => write!(f, "Bid"),
            Self::Device => write!(f, "Device"),
        }
    }
}

/// Reject identifiers that are empty or collide with system keys.
///
/// # Errors
/// Returns [`SlotbidError::InvalidIdentifier`].
pub fn check_identifier(id: &str) -> crate::Result<()> {
    if id.is_empty() {
        return Err(SlotbidError::InvalidIdentifier {
            id: id.to_string(),
            reason: "identifier is empty".into(),
        });
    }
    if id.starts_with(constants::RESERVED_KEY_PREFIX) {
        return Err(SlotbidError::InvalidIdentifier {
            id: id.to_string(),
            reason: format!(
                "prefix {:?} is reserved for system keys",
                constants::RESERVED_KEY_PREFIX
            ),
        });
    }
    Ok(())
}

/// Ledger key of the settlement marker for a slot.
#[must_use]
pub fn settlement_key(slot_id: &str) -> String {
    format!("{}{slot_id}", constants::SETTLEMENT_KEY_PREFIX)
}

// ---------------------------------------------------------------------------
// IntentId
// ---------------------------------------------------------------------------

/// Unique identifier for a journaled write intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct IntentId(pub Uuid);

impl IntentId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for IntentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "intent:{}", self.0)
    }
}
