//! # slotbid-types
//!
//! Shared types, errors, and configuration for the **slotbid** auction engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Records**: [`Account`], [`Slot`], [`Bid`], [`Device`]
//! - **Identifiers**: [`RecordKind`], [`IntentId`], [`check_identifier`]
//! - **Outcomes**: [`BidReceipt`], [`PayoutReport`], [`Refund`], [`SettlementRecord`]
//! - **Journal**: [`Intent`], [`PlannedWrite`]
//! - **Configuration**: [`EngineConfig`], [`SettlementMode`], [`WriteMode`]
//! - **Errors**: [`SlotbidError`] with `SB_ERR_` prefix codes
//! - **Constants**: fixed ledger keys and defaults

pub mod account;
pub mod bid;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod ids;
pub mod intent;
pub mod receipt;
pub mod slot;

// Re-export all primary types at crate root for ergonomic imports:
//   use slotbid_types::{Account, Slot, Bid, ...};

pub use account::*;
pub use bid::Bid;
pub use config::*;
pub use device::*;
pub use error::*;
pub use ids::*;
pub use intent::*;
pub use receipt::*;
pub use slot::*;

// Constants are accessed via `slotbid_types::constants::FOO`
// (not re-exported to avoid name collisions).
