//! Dispatch of parsed commands onto an [`AuctionEngine`].
//!
//! Payload arguments are record JSON. Every response is JSON text:
//!
//! | Command | Response |
//! |---|---|
//! | `add_*` | the id the record was stored under, as a string |
//! | `place_bid` | `BidReceipt` |
//! | `payout_bid` | `PayoutReport` |
//! | `get_*` | the record |
//! | `get_all_*` | array of records in index order |
//! | `get_settlement` | `SettlementRecord` or `null` |
//! | `recover` | number of replayed operations |

use serde::Serialize;
use slotbid_engine::AuctionEngine;
use slotbid_store::{Ledger, Record, codec};
use slotbid_types::{Bid, EngineConfig, Result};
use tracing::debug;

use crate::command::Command;

/// Routes commands by name to the auction engine.
#[derive(Debug)]
pub struct CommandRouter<L> {
    engine: AuctionEngine<L>,
}

impl<L: Ledger> CommandRouter<L> {
    pub fn new(ledger: L, config: EngineConfig) -> Self {
        Self {
            engine: AuctionEngine::new(ledger, config),
        }
    }

    pub fn engine(&self) -> &AuctionEngine<L> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AuctionEngine<L> {
        &mut self.engine
    }

    /// Parse and run a command by name.
    ///
    /// # Errors
    /// Command errors from parsing, `Decode` for a malformed payload, and
    /// whatever the engine operation returns.
    pub fn dispatch(&mut self, name: &str, args: &[String]) -> Result<Vec<u8>> {
        let command = Command::parse(name, args)?;
        self.execute(command)
    }

    /// Run an already parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Vec<u8>> {
        debug!(command = %command, "Dispatching");
        match command {
            Command::AddAccount { username, payload } => {
                let account = payload_record(&username, &payload)?;
                respond(&self.engine.add_account(&username, &account)?)
            }
            Command::AddSlot { id, payload } => {
                let slot = payload_record(&id, &payload)?;
                respond(&self.engine.add_slot(&id, &slot)?)
            }
            Command::AddDevice { id, payload } => {
                let device = payload_record(&id, &payload)?;
                respond(&self.engine.add_device(&id, &device)?)
            }
            Command::PlaceBid { id, payload } => {
                let mut bid: Bid = payload_record(&id, &payload)?;
                if bid.id.is_empty() {
                    bid.id = id;
                }
                respond(&self.engine.place_bid(bid)?)
            }
            Command::PayoutBid { slot_id } => respond(&self.engine.payout_bid(&slot_id)?),
            Command::GetAccount { username } => respond(&self.engine.get_account(&username)?),
            Command::GetSlot { slot_id } => respond(&self.engine.get_slot(&slot_id)?),
            Command::GetDevice { device_id } => respond(&self.engine.get_device(&device_id)?),
            Command::GetAllSlots => respond(&self.engine.get_all_slots()?),
            Command::GetAllBids => respond(&self.engine.get_all_bids()?),
            Command::GetSettlement { slot_id } => respond(&self.engine.settlement(&slot_id)?),
            Command::Recover => respond(&self.engine.recover()?),
        }
    }
}

/// Decode a command payload. Decode errors name the command's id argument.
fn payload_record<T: Record>(id: &str, payload: &str) -> Result<T> {
    codec::decode_record(id, payload.as_bytes())
}

fn respond<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(codec::encode(value)?.into_bytes())
}
