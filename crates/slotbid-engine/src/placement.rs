//! Bid placement: admission checks and escrow.
//!
//! ## Admission (checked in order, no effect before any rejection)
//!
//! 1. the bidder's account exists
//! 2. the slot exists
//! 3. the slot is not settled (`MarkOnSettle` only) and, when enforced,
//!    its bid deadline has not passed
//! 4. the account balance covers the full amount
//! 5. the amount strictly exceeds the slot's highest bid
//! 6. the amount is positive and the bid id is not held by any record of
//!    any kind
//!
//! ## Effects (one write plan, in order)
//!
//! ```text
//! _bids index ← + bid.id
//! bid.id      ← bid
//! slot        ← bids + bid, highest = amount
//! account     ← balance - amount, bids + bid
//! ```
//!
//! Funds leave the available balance the moment the bid is accepted, even
//! if it is outbid later. Losing bids are only returned by a payout.

use chrono::{DateTime, Utc};
use slotbid_store::{Ledger, WritePlan, index};
use slotbid_types::{Bid, BidReceipt, RecordKind, Result, SettlementMode, SlotbidError};
use tracing::{info, warn};

use crate::engine::AuctionEngine;

/// Operation name recorded in write plans and journal intents.
pub const PLACE_BID: &str = "place_bid";

impl<L: Ledger> AuctionEngine<L> {
    /// Admit a bid and escrow its amount from the bidder's balance.
    ///
    /// # Errors
    /// - `AccountNotFound`, `SlotNotFound` for missing references
    /// - `SlotAlreadySettled`, `BiddingClosed` when the slot is closed
    /// - `InsufficientBalance`, `BidTooLow`, `NonPositiveAmount`, `DuplicateId`
    /// - `PartialWrite` if the ledger failed after some writes landed
    pub fn place_bid(&mut self, bid: Bid) -> Result<BidReceipt> {
        self.place_bid_at(bid, Utc::now())
    }

    /// [`place_bid`](Self::place_bid) with an explicit clock reading, used
    /// for the bid deadline check.
    pub fn place_bid_at(&mut self, bid: Bid, now: DateTime<Utc>) -> Result<BidReceipt> {
        self.settle_journal()?;
        match self.try_place_bid(&bid, now) {
            Ok(receipt) => {
                info!(
                    bid = %receipt.bid_id,
                    slot = %receipt.slot_id,
                    user = %receipt.username,
                    amount = receipt.amount,
                    previous_highest = receipt.previous_highest,
                    balance_after = receipt.balance_after,
                    "Bid accepted"
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!(
                    bid = %bid.id,
                    slot = %bid.slot_id,
                    user = %bid.username,
                    amount = bid.amount,
                    error = %e,
                    "Bid not placed"
                );
                Err(e)
            }
        }
    }

    fn try_place_bid(&mut self, bid: &Bid, now: DateTime<Utc>) -> Result<BidReceipt> {
        let mut account = self.load_account(&bid.username)?;
        let mut slot = self.load_slot(&bid.slot_id)?;

        if self.config.settlement == SettlementMode::MarkOnSettle
            && self.is_settled(&bid.slot_id)?
        {
            return Err(SlotbidError::SlotAlreadySettled(bid.slot_id.clone()));
        }
        if self.config.enforce_bid_deadline && !slot.accepts_bids_at(now.timestamp()) {
            return Err(SlotbidError::BiddingClosed {
                slot_id: bid.slot_id.clone(),
                deadline: slot.bid_deadline,
            });
        }
        if !account.can_cover(bid.amount) {
            return Err(SlotbidError::InsufficientBalance {
                needed: bid.amount,
                available: account.balance,
            });
        }
        if !slot.outbids(bid.amount) {
            return Err(SlotbidError::BidTooLow {
                amount: bid.amount,
                highest: slot.highest_bid_amount,
            });
        }
        if bid.amount <= 0 {
            return Err(SlotbidError::NonPositiveAmount(bid.amount));
        }
        let append = index::plan_append(self.repo.ledger(), RecordKind::Bid, &bid.id, false)?;

        let previous_highest = slot.highest_bid_amount;
        account.debit(bid.amount)?;
        slot.record_bid(bid.clone());
        account.log_bid(bid.clone());

        let mut plan = WritePlan::new(PLACE_BID);
        plan.push_index(&append)?;
        plan.push_record(&append.final_id, bid)?;
        plan.push_record(&bid.slot_id, &slot)?;
        plan.push_record(&bid.username, &account)?;
        self.commit(plan)?;

        Ok(BidReceipt {
            bid_id: append.final_id,
            slot_id: bid.slot_id.clone(),
            username: bid.username.clone(),
            amount: bid.amount,
            previous_highest,
            balance_after: account.balance,
        })
    }
}
