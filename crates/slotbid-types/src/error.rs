//! Error types for the slotbid auction engine.
//!
//! All errors use the `SB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Record / identifier errors
//! - 2xx: Auction validation errors
//! - 3xx: Storage and journal errors
//! - 4xx: Command errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::RecordKind;

/// Coarse classification of a [`SlotbidError`], used by callers that only
/// care about *why* an operation failed, not the precise variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A key was absent from the ledger.
    NotFound,
    /// Stored bytes did not match the expected record shape.
    Decode,
    /// The ledger medium failed, or a multi-write operation stopped mid-way.
    Storage,
    /// A business rule rejected the operation.
    Validation,
    /// The command could not be parsed or routed.
    Command,
    /// Anything else.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Decode => write!(f, "DECODE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Command => write!(f, "COMMAND"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Central error enum for all slotbid operations.
#[derive(Debug, Error)]
pub enum SlotbidError {
    // =================================================================
    // Record Errors (1xx)
    // =================================================================
    /// No record is stored under this key.
    #[error("SB_ERR_100: {kind} not found: {key}")]
    NotFound { kind: RecordKind, key: String },

    /// The stored bytes could not be decoded as the expected record.
    #[error("SB_ERR_101: Failed to decode {kind} at {key}: {reason}")]
    Decode {
        kind: RecordKind,
        key: String,
        reason: String,
    },

    /// The identifier is already registered in its index.
    #[error("SB_ERR_102: Duplicate {kind} id: {id}")]
    DuplicateId { kind: RecordKind, id: String },

    /// The identifier is empty or uses the reserved key prefix.
    #[error("SB_ERR_103: Invalid identifier {id:?}: {reason}")]
    InvalidIdentifier { id: String, reason: String },

    /// The settlement marker stored for a slot could not be decoded.
    #[error("SB_ERR_104: Failed to decode settlement marker for slot {slot_id}: {reason}")]
    SettlementDecode { slot_id: String, reason: String },

    // =================================================================
    // Auction Errors (2xx)
    // =================================================================
    /// The account a bid references does not exist.
    #[error("SB_ERR_200: Account not found: {0}")]
    AccountNotFound(String),

    /// The slot a bid (or payout) references does not exist.
    #[error("SB_ERR_201: Slot not found: {0}")]
    SlotNotFound(String),

    /// The account cannot cover the full bid amount.
    #[error("SB_ERR_202: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: i64, available: i64 },

    /// The bid does not strictly exceed the slot's current highest bid.
    #[error("SB_ERR_203: Bid too low: {amount} does not exceed highest bid {highest}")]
    BidTooLow { amount: i64, highest: i64 },

    /// Bid amounts must be strictly positive.
    #[error("SB_ERR_204: Bid amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// The slot's bid deadline has passed.
    #[error("SB_ERR_205: Bidding closed for slot {slot_id} at {deadline}")]
    BiddingClosed { slot_id: String, deadline: i64 },

    /// The slot has already been paid out (settlement marker present).
    #[error("SB_ERR_206: Slot already settled: {0}")]
    SlotAlreadySettled(String),

    // =================================================================
    // Storage Errors (3xx)
    // =================================================================
    /// The ledger medium failed on a get or put.
    #[error("SB_ERR_300: Storage error at {key}: {reason}")]
    Storage { key: String, reason: String },

    /// A multi-write operation failed after some writes became durable.
    /// The first `committed` of `total` planned writes are in the ledger.
    #[error(
        "SB_ERR_301: {operation} partially applied: {committed}/{total} writes committed, \
         failed at {failed_key}: {reason}"
    )]
    PartialWrite {
        operation: String,
        committed: usize,
        total: usize,
        failed_key: String,
        reason: String,
    },

    /// A journaled intent failed its integrity check during recovery.
    #[error("SB_ERR_302: Journal corrupt: {reason}")]
    JournalCorrupt { reason: String },

    // =================================================================
    // Command Errors (4xx)
    // =================================================================
    /// No handler is registered for this command name.
    #[error("SB_ERR_400: Unknown command: {0}")]
    UnknownCommand(String),

    /// Wrong number of positional arguments.
    #[error("SB_ERR_401: {command} expects {expected} argument(s), got {got}")]
    InvalidArguments {
        command: String,
        expected: usize,
        got: usize,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SB_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization of an outgoing value failed.
    #[error("SB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("SB_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (config file, stdin/stdout).
    #[error("SB_ERR_903: I/O error: {0}")]
    Io(String),
}

impl SlotbidError {
    /// Map this error onto the coarse failure taxonomy.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Decode { .. } | Self::SettlementDecode { .. } | Self::JournalCorrupt { .. } => {
                ErrorCategory::Decode
            }
            Self::Storage { .. } | Self::PartialWrite { .. } | Self::Io(_) => {
                ErrorCategory::Storage
            }
            Self::DuplicateId { .. }
            | Self::InvalidIdentifier { .. }
            | Self::AccountNotFound(_)
            | Self::SlotNotFound(_)
            | Self::InsufficientBalance { .. }
            | Self::BidTooLow { .. }
            | Self::NonPositiveAmount(_)
            | Self::BiddingClosed { .. }
            | Self::SlotAlreadySettled(_) => ErrorCategory::Validation,
            Self::UnknownCommand(_) | Self::InvalidArguments { .. } => ErrorCategory::Command,
            Self::Internal(_) | Self::Serialization(_) | Self::Configuration(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// The `SB_ERR_xxx` code at the front of the display string.
    #[must_use]
    pub fn code(&self) -> String {
        let msg = self.to_string();
        msg.split(':').next().unwrap_or_default().to_string()
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SlotbidError>;

impl From<std::io::Error> for SlotbidError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
