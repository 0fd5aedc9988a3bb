//! # slotbid-engine
//!
//! Escrow auction engine for device advertising slots.
//!
//! - [`AuctionEngine::place_bid`]: admit a bid, debit the bidder, make it
//!   the slot's winner
//! - [`AuctionEngine::payout_bid`]: refund every losing bid on a slot
//! - `add_*` / `get_*`: register and read accounts, slots, devices, bids
//!
//! ## Bid Lifecycle
//!
//! ```text
//! place_bid ──▶ ESCROWED (balance debited, slot winner)
//!                  │
//!                  │ outbid by a higher bid
//!                  ▼
//!               LOSING (still escrowed)
//!                  │
//!                  │ payout_bid
//!                  ▼
//!               REFUNDED (balance credited)
//! ```
//!
//! The winning bid's funds are never returned by this engine.
//!
//! Every multi-write operation is planned in full before its first write.
//! In [`WriteMode::Journaled`](slotbid_types::WriteMode) the plan is
//! journaled first and rolled forward on the next operation if the ledger
//! failed midway.

pub mod catalog;
pub mod engine;
pub mod payout;
pub mod placement;

pub use engine::AuctionEngine;
pub use payout::PAYOUT_BID;
pub use placement::PLACE_BID;
