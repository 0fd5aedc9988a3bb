//! Record CRUD: registering and reading accounts, slots, devices and bids.
//!
//! `add_*` takes the id the record is stored under separately from the
//! record itself. An empty id asks for a generated one (`account3`,
//! `slot1`, ...). Ids are unique across all four kinds, since every record
//! lives in the same key space. The stored value is always the canonical
//! encoding of the record, whatever shape the caller's payload had.
//!
//! Reads go through [`AuctionEngine::view`], so in journaled mode they see
//! interrupted operations as already rolled forward.

use slotbid_store::{Ledger, Record};
use slotbid_types::{Account, Bid, Device, Result, Slot};
use tracing::info;

use crate::engine::AuctionEngine;

impl<L: Ledger> AuctionEngine<L> {
    /// Register an account under `username`. Returns the id it was stored under.
    ///
    /// # Errors
    /// `DuplicateId` if any record of any kind holds the id,
    /// `InvalidIdentifier`, or `Storage`.
    pub fn add_account(&mut self, username: &str, account: &Account) -> Result<String> {
        self.add(username, account)
    }

    /// Register a slot under `slot_id`. Returns the id it was stored under.
    ///
    /// # Errors
    /// `DuplicateId` if any record of any kind holds the id,
    /// `InvalidIdentifier`, or `Storage`.
    pub fn add_slot(&mut self, slot_id: &str, slot: &Slot) -> Result<String> {
        self.add(slot_id, slot)
    }

    /// Register a device under `device_id`. Returns the id it was stored under.
    ///
    /// # Errors
    /// `DuplicateId` if any record of any kind holds the id,
    /// `InvalidIdentifier`, or `Storage`.
    pub fn add_device(&mut self, device_id: &str, device: &Device) -> Result<String> {
        self.add(device_id, device)
    }

    fn add<T: Record>(&mut self, id: &str, record: &T) -> Result<String> {
        self.settle_journal()?;
        let kind = T::KIND;
        let generate = id.is_empty();
        let candidate = if generate { kind.name() } else { id };
        let final_id = self.repo.register(candidate, record, generate)?;
        info!(kind = %kind, id = %final_id, generated = generate, "Record added");
        Ok(final_id)
    }

    /// # Errors
    /// `NotFound` if no account is stored under `username`.
    pub fn get_account(&self, username: &str) -> Result<Account> {
        self.view()?.get(username)
    }

    /// # Errors
    /// `NotFound` if no slot is stored under `slot_id`.
    pub fn get_slot(&self, slot_id: &str) -> Result<Slot> {
        self.view()?.get(slot_id)
    }

    /// # Errors
    /// `NotFound` if no device is stored under `device_id`.
    pub fn get_device(&self, device_id: &str) -> Result<Device> {
        self.view()?.get(device_id)
    }

    /// # Errors
    /// `NotFound` if no bid is stored under `bid_id`.
    pub fn get_bid(&self, bid_id: &str) -> Result<Bid> {
        self.view()?.get(bid_id)
    }

    /// Every registered slot, in registration order.
    pub fn get_all_slots(&self) -> Result<Vec<Slot>> {
        self.view()?.list()
    }

    /// Every placed bid, in placement order.
    pub fn get_all_bids(&self) -> Result<Vec<Bid>> {
        self.view()?.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotbid_store::MemoryLedger;
    use slotbid_types::{EngineConfig, RecordKind, SlotbidError, WriteMode};

    #[test]
    fn empty_id_generates_one() {
        let mut engine = AuctionEngine::with_defaults(MemoryLedger::new());
        let first = engine.add_device("", &Device::dummy("d")).unwrap();
        let second = engine.add_device("", &Device::dummy("d")).unwrap();
        assert_eq!(first, "device1");
        assert_eq!(second, "device2");
        assert_eq!(engine.get_device("device2").unwrap().device_id, "d");
    }

    #[test]
    fn get_missing_is_not_found() {
        let engine = AuctionEngine::with_defaults(MemoryLedger::new());
        assert!(matches!(
            engine.get_slot("s9").unwrap_err(),
            SlotbidError::NotFound {
                kind: RecordKind::Slot,
                ..
            }
        ));
    }

    #[test]
    fn listings_follow_registration_order() {
        let mut engine = AuctionEngine::with_defaults(MemoryLedger::new());
        for id in ["s2", "s1", "s3"] {
            engine.add_slot(id, &Slot::dummy(id)).unwrap();
        }
        let ids: Vec<String> = engine
            .get_all_slots()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["s2", "s1", "s3"]);
        assert!(engine.get_all_bids().unwrap().is_empty());
    }

    #[test]
    fn reserved_id_rejected() {
        let mut engine = AuctionEngine::with_defaults(MemoryLedger::new());
        let err = engine
            .add_account("_journal", &Account::dummy("x", 1))
            .unwrap_err();
        assert!(matches!(err, SlotbidError::InvalidIdentifier { .. }));
    }

    #[test]
    fn id_of_another_kind_cannot_be_reused() {
        let mut engine = AuctionEngine::with_defaults(MemoryLedger::new());
        engine.add_account("alice", &Account::dummy("alice", 100)).unwrap();
        engine.add_slot("s1", &Slot::dummy("s1")).unwrap();
        engine.place_bid(Bid::dummy("b1", "s1", "alice", 50)).unwrap();

        let err = engine
            .add_account("s1", &Account::dummy("s1", 10))
            .unwrap_err();
        assert!(matches!(
            err,
            SlotbidError::DuplicateId { kind: RecordKind::Slot, .. }
        ));
        let slot = engine.get_slot("s1").unwrap();
        assert_eq!(slot.highest_bid_amount, 50);
        assert_eq!(slot.bids.len(), 1);

        let err = engine
            .add_device("alice", &Device::dummy("alice"))
            .unwrap_err();
        assert!(matches!(
            err,
            SlotbidError::DuplicateId { kind: RecordKind::Account, .. }
        ));
        assert_eq!(engine.get_account("alice").unwrap().balance, 50);

        let err = engine.add_slot("b1", &Slot::dummy("b1")).unwrap_err();
        assert!(matches!(
            err,
            SlotbidError::DuplicateId { kind: RecordKind::Bid, .. }
        ));
        assert_eq!(engine.get_all_slots().unwrap().len(), 1);
    }

    #[test]
    fn reads_see_interrupted_operation_rolled_forward() {
        let config = EngineConfig::default().with_write_mode(WriteMode::Journaled);
        let mut engine = AuctionEngine::new(MemoryLedger::new(), config);
        engine.add_account("alice", &Account::dummy("alice", 100)).unwrap();
        engine.add_slot("s1", &Slot::dummy("s1")).unwrap();

        engine.ledger_mut().fail_writes_to("alice");
        engine
            .place_bid(Bid::dummy("b1", "s1", "alice", 40))
            .unwrap_err();
        engine.ledger_mut().clear_faults();
        let puts = engine.ledger().put_count();

        assert_eq!(engine.get_slot("s1").unwrap().highest_bid_amount, 40);
        assert_eq!(engine.get_account("alice").unwrap().balance, 60);
        assert_eq!(engine.get_bid("b1").unwrap().amount, 40);
        assert_eq!(engine.get_all_bids().unwrap().len(), 1);
        assert_eq!(engine.ledger().put_count(), puts);

        assert_eq!(engine.recover().unwrap(), 1);
        assert_eq!(engine.get_account("alice").unwrap().balance, 60);
    }
}
