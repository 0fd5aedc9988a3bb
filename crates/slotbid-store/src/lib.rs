//! # slotbid-store
//!
//! **Record Store Adapter**: everything between the auction engine and the
//! keyed-storage collaborator.
//!
//! ## Architecture
//!
//! 1. **Ledger**: the get/put collaborator trait, plus [`MemoryLedger`]
//! 2. **Codec**: JSON encoding of the four record kinds
//! 3. **Index**: append-only identifier lists used for enumeration
//! 4. **Repository**: typed get/put/register/list over a ledger
//! 5. **Plan / Journal**: ordered multi-key writes, optionally journaled, and
//!    a read-only view with pending intents applied
//!
//! ```text
//! Engine → Repository → codec → Ledger
//!        → WritePlan  → (journal) → Ledger
//! ```

pub mod codec;
pub mod index;
pub mod journal;
pub mod ledger;
pub mod plan;
pub mod repository;

pub use codec::Record;
pub use index::IndexAppend;
pub use journal::JournalView;
pub use ledger::{Ledger, LedgerError, LedgerResult, MemoryLedger};
pub use plan::WritePlan;
pub use repository::Repository;
