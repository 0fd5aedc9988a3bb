//! Payout: return escrowed funds of every losing bid on a slot.
//!
//! A bid loses when its amount is strictly below the slot's highest bid.
//! The winning bid (and any logged bid tying the highest, which placement
//! never produces) keeps its funds.
//!
//! All refund targets are loaded before anything is written, so a missing
//! account fails the whole payout with no effect. Several refunds to the
//! same account land in one account write.
//!
//! In `Recompute` mode nothing records that a payout happened; calling it
//! twice refunds twice. `MarkOnSettle` writes a settlement record as the
//! last write of the plan and refuses any later payout or bid on the slot.

use std::collections::HashMap;

use chrono::Utc;
use slotbid_store::{Ledger, WritePlan};
use slotbid_types::{
    Account, PayoutReport, Refund, Result, SettlementMode, SettlementRecord, SlotbidError,
    settlement_key,
};
use tracing::{debug, info, warn};

use crate::engine::AuctionEngine;

/// Operation name recorded in write plans and journal intents.
pub const PAYOUT_BID: &str = "payout_bid";

impl<L: Ledger> AuctionEngine<L> {
    /// Refund every losing bid on `slot_id`.
    ///
    /// # Errors
    /// - `SlotNotFound` if the slot does not exist
    /// - `AccountNotFound` if a losing bidder's account is gone
    /// - `SlotAlreadySettled` on a repeat payout under `MarkOnSettle`
    /// - `PartialWrite` if the ledger failed after some writes landed
    pub fn payout_bid(&mut self, slot_id: &str) -> Result<PayoutReport> {
        self.settle_journal()?;
        match self.try_payout(slot_id) {
            Ok(report) => {
                info!(
                    slot = %report.slot_id,
                    winning_amount = report.winning_amount,
                    refunds = report.refunds.len(),
                    total_refunded = report.total_refunded(),
                    settlement = %self.config.settlement,
                    "Slot paid out"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(slot = %slot_id, error = %e, "Payout failed");
                Err(e)
            }
        }
    }

    fn try_payout(&mut self, slot_id: &str) -> Result<PayoutReport> {
        let slot = self.load_slot(slot_id)?;
        let marking = self.config.settlement == SettlementMode::MarkOnSettle;
        if marking && self.is_settled(slot_id)? {
            return Err(SlotbidError::SlotAlreadySettled(slot_id.to_string()));
        }

        // Credited accounts keyed by the username they were loaded under,
        // in order of first refund.
        let mut credited: Vec<(String, Account)> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();
        let mut refunds = Vec::new();

        for bid in slot.losing_bids() {
            let idx = match position.get(&bid.username) {
                Some(&idx) => idx,
                None => {
                    let account = self.load_account(&bid.username)?;
                    credited.push((bid.username.clone(), account));
                    position.insert(bid.username.clone(), credited.len() - 1);
                    credited.len() - 1
                }
            };
            credited[idx].1.credit(bid.amount)?;
            debug!(slot = %slot_id, bid = %bid.id, user = %bid.username, amount = bid.amount, "Refund planned");
            refunds.push(Refund {
                bid_id: bid.id.clone(),
                username: bid.username.clone(),
                amount: bid.amount,
            });
        }

        let report = PayoutReport {
            slot_id: slot_id.to_string(),
            winning_amount: slot.highest_bid_amount,
            refunds,
        };

        let mut plan = WritePlan::new(PAYOUT_BID);
        for (username, account) in &credited {
            plan.push_record(username, account)?;
        }
        if marking {
            let record = SettlementRecord::from_report(&report, Utc::now());
            plan.push_value(&settlement_key(slot_id), &record)?;
        }
        if !plan.is_empty() {
            self.commit(plan)?;
        }
        Ok(report)
    }
}
