//! System-wide constants for the slotbid auction engine.

/// Ledger key holding the account index.
pub const ACCOUNT_INDEX_KEY: &str = "_accounts";

/// Ledger key holding the slot index.
pub const SLOT_INDEX_KEY: &str = "_slots";

/// Ledger key holding the bid index.
pub const BID_INDEX_KEY: &str = "_bids";

/// Ledger key holding the device index.
pub const DEVICE_INDEX_KEY: &str = "_devices";

/// Prefix reserved for system keys. Entity identifiers may not start with it.
pub const RESERVED_KEY_PREFIX: &str = "_";

/// Ledger key holding pending write intents.
pub const JOURNAL_KEY: &str = "_journal";

/// Prefix of the per-slot settlement marker key (`_settled_<slotId>`).
pub const SETTLEMENT_KEY_PREFIX: &str = "_settled_";

/// Environment variable naming a JSON engine config file.
pub const CONFIG_ENV_VAR: &str = "SLOTBID_CONFIG";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "slotbid";
