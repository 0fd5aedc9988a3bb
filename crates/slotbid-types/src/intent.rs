//! Write intents for the journal.
//!
//! The ledger has no multi-key transaction. A multi-write operation is
//! instead recorded as an [`Intent`] before its first write: the complete
//! list of puts it is about to issue, each with a SHA-256 digest of the
//! value. Every put is a whole-value overwrite, so replaying an intent is
//! idempotent and a crash between writes can be rolled forward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::IntentId;

/// A single planned put.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedWrite {
    pub key: String,
    /// Encoded record (JSON text).
    pub value: String,
    /// Hex SHA-256 of `value`.
    pub digest: String,
}

impl PlannedWrite {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let digest = digest_hex(value.as_bytes());
        Self {
            key: key.into(),
            value,
            digest,
        }
    }

    /// Whether `value` still matches the digest taken when planned.
    #[must_use]
    pub fn is_intact(&self) -> bool {
        digest_hex(self.value.as_bytes()) == self.digest
    }
}

/// A pending multi-write operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    /// Name of the engine operation, e.g. `place_bid`.
    pub operation: String,
    pub created_at: DateTime<Utc>,
    pub writes: Vec<PlannedWrite>,
}

impl Intent {
    #[must_use]
    pub fn new(operation: impl Into<String>, writes: Vec<PlannedWrite>) -> Self {
        Self {
            id: IntentId::new(),
            operation: operation.into(),
            created_at: Utc::now(),
            writes,
        }
    }
}

fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"slotbid:write:v1:");
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
