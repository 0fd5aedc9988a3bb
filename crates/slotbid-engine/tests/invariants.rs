//! Randomized bid streams checked against the escrow invariants.
//!
//! After every operation, for every slot and account:
//!
//! 1. `highestBidAmount` equals the largest logged bid (or the initial value
//!    when nothing was logged)
//! 2. no balance is negative
//! 3. funds are conserved: balances plus escrowed-and-unrefunded amounts
//!    equal the initial total

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotbid_engine::AuctionEngine;
use slotbid_store::MemoryLedger;
use slotbid_types::*;

const USERS: [&str; 4] = ["alice", "bob", "carol", "dave"];
const SLOTS: [&str; 3] = ["s1", "s2", "s3"];
const INITIAL_BALANCE: i64 = 500;

fn check(engine: &AuctionEngine<MemoryLedger>, escrowed: &HashMap<String, i64>) {
    let mut total = 0;
    for user in USERS {
        let balance = engine.get_account(user).unwrap().balance;
        assert!(balance >= 0, "{user} went negative: {balance}");
        total += balance;
    }
    for slot in engine.get_all_slots().unwrap() {
        if !slot.bids.is_empty() {
            assert_eq!(slot.highest_bid_amount, slot.max_logged_amount());
        }
    }
    let held: i64 = escrowed.values().sum();
    assert_eq!(total + held, INITIAL_BALANCE * USERS.len() as i64);
}

fn run(seed: u64, config: EngineConfig) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = AuctionEngine::new(MemoryLedger::new(), config);
    for user in USERS {
        engine
            .add_account(user, &Account::dummy(user, INITIAL_BALANCE))
            .unwrap();
    }
    for slot in SLOTS {
        engine.add_slot(slot, &Slot::dummy(slot)).unwrap();
    }

    // Funds debited and not yet refunded, per slot.
    let mut escrowed: HashMap<String, i64> = HashMap::new();
    let mut next_bid = 0;

    for _ in 0..300 {
        let slot_id = SLOTS[rng.gen_range(0..SLOTS.len())];
        if rng.gen_range(0..10) == 0 {
            let before = engine.get_slot(slot_id).unwrap();
            match engine.payout_bid(slot_id) {
                Ok(report) => {
                    let held = escrowed.entry(slot_id.to_string()).or_default();
                    *held -= report.total_refunded();
                    assert_eq!(report.winning_amount, before.highest_bid_amount);
                }
                Err(SlotbidError::SlotAlreadySettled(_)) => {}
                Err(e) => panic!("unexpected payout failure: {e}"),
            }
        } else {
            let user = USERS[rng.gen_range(0..USERS.len())];
            let amount = rng.gen_range(-5..120);
            next_bid += 1;
            let bid = Bid::dummy(&format!("b{next_bid}"), slot_id, user, amount);
            match engine.place_bid(bid) {
                Ok(receipt) => {
                    assert!(receipt.amount > receipt.previous_highest);
                    assert!(receipt.balance_after >= 0);
                    *escrowed.entry(slot_id.to_string()).or_default() += amount;
                }
                Err(
                    SlotbidError::BidTooLow { .. }
                    | SlotbidError::InsufficientBalance { .. }
                    | SlotbidError::NonPositiveAmount(_)
                    | SlotbidError::SlotAlreadySettled(_),
                ) => {}
                Err(e) => panic!("unexpected bid failure: {e}"),
            }
        }
        check(&engine, &escrowed);
    }
}

#[test]
fn invariants_hold_in_recompute_mode() {
    for seed in [1, 7, 42] {
        run(seed, EngineConfig::default());
    }
}

#[test]
fn invariants_hold_when_marking_settlements() {
    for seed in [3, 11, 99] {
        let config = EngineConfig::default().with_settlement(SettlementMode::MarkOnSettle);
        run(seed, config);
    }
}

#[test]
fn invariants_hold_with_journaled_writes() {
    let config = EngineConfig::default().with_write_mode(WriteMode::Journaled);
    run(5, config);
}
