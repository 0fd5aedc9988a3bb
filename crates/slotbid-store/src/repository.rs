//! Typed access to records over a [`Ledger`].
//!
//! `get` on a key that was never written is a distinct `NotFound` outcome,
//! never an empty record.

use serde::de::DeserializeOwned;
use slotbid_types::{RecordKind, Result, SlotbidError};
use tracing::debug;

use crate::codec::{self, Record};
use crate::index;
use crate::ledger::{Ledger, LedgerError};

/// Convert a ledger failure into the engine error space.
pub(crate) fn storage_error(err: LedgerError) -> SlotbidError {
    match err {
        LedgerError::Storage { key, reason } => SlotbidError::Storage { key, reason },
        LedgerError::NotFound(key) => SlotbidError::Storage {
            reason: format!("key {key} vanished mid-operation"),
            key,
        },
    }
}

/// Entity repository: typed get/put of the four record kinds plus
/// identifier registration and enumeration.
#[derive(Debug)]
pub struct Repository<L> {
    ledger: L,
}

impl<L: Ledger> Repository<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    /// Raw bytes under `key`, `None` if absent.
    pub fn read_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.ledger.get(key) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(LedgerError::NotFound(_)) => Ok(None),
            Err(e) => Err(storage_error(e)),
        }
    }

    /// Write raw bytes under `key`.
    pub fn write_raw(&mut self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.ledger.put(key, bytes).map_err(storage_error)?;
        debug!(key, "Ledger write");
        Ok(())
    }

    /// Read and decode a value of `kind`, `None` if absent.
    pub fn find_as<T: DeserializeOwned>(&self, kind: RecordKind, key: &str) -> Result<Option<T>> {
        self.read_raw(key)?
            .map(|bytes| codec::decode(kind, key, &bytes))
            .transpose()
    }

    /// Read a record, `None` if absent.
    pub fn find<T: Record>(&self, key: &str) -> Result<Option<T>> {
        self.find_as(T::KIND, key)
    }

    /// Read a record.
    ///
    /// # Errors
    /// `NotFound` if absent, `Decode` if malformed, `Storage` on ledger failure.
    pub fn get<T: Record>(&self, key: &str) -> Result<T> {
        self.find(key)?.ok_or_else(|| SlotbidError::NotFound {
            kind: T::KIND,
            key: key.to_string(),
        })
    }

    /// Encode and write a record under `key`.
    pub fn put<T: Record>(&mut self, key: &str, value: &T) -> Result<()> {
        let text = codec::encode(value)?;
        self.write_raw(key, text.into_bytes())
    }

    /// Identifiers of a kind, in registration order.
    pub fn ids(&self, kind: RecordKind) -> Result<Vec<String>> {
        index::read_index(&self.ledger, kind)
    }

    /// Register `id` in the kind's index, then store the record under the
    /// final id. Returns the final id.
    ///
    /// Two independent writes: if the record write fails, the id stays
    /// indexed without a record behind it.
    pub fn register<T: Record>(&mut self, id: &str, value: &T, auto_generate: bool) -> Result<String> {
        let final_id = index::append_id(&mut self.ledger, T::KIND, id, auto_generate)?;
        self.put(&final_id, value)?;
        Ok(final_id)
    }

    /// Every record of a kind, in index order.
    ///
    /// # Errors
    /// Fails if any indexed record is missing or cannot be decoded.
    pub fn list<T: Record>(&self) -> Result<Vec<T>> {
        self.ids(T::KIND)?
            .iter()
            .map(|id| self.get(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use slotbid_types::{Account, Bid, Device, Slot};

    fn repo() -> Repository<MemoryLedger> {
        Repository::new(MemoryLedger::new())
    }

    #[test]
    fn get_never_written_is_not_found() {
        let repo = repo();
        let err = repo.get::<Account>("ghost").unwrap_err();
        assert!(matches!(
            err,
            SlotbidError::NotFound { kind: RecordKind::Account, ref key } if key == "ghost"
        ));
        assert!(repo.find::<Account>("ghost").unwrap().is_none());
    }

    #[test]
    fn put_then_get_roundtrip() {
        let mut repo = repo();
        let account = Account::dummy("alice", 100);
        repo.put("alice", &account).unwrap();
        assert_eq!(repo.get::<Account>("alice").unwrap(), account);
    }

    #[test]
    fn register_indexes_and_stores() {
        let mut repo = repo();
        let id = repo.register("s1", &Slot::dummy("s1"), false).unwrap();
        assert_eq!(id, "s1");
        assert_eq!(repo.ids(RecordKind::Slot).unwrap(), vec!["s1"]);
        assert_eq!(repo.get::<Slot>("s1").unwrap().id, "s1");
    }

    #[test]
    fn register_auto_generates() {
        let mut repo = repo();
        let id = repo.register("device", &Device::dummy("d"), true).unwrap();
        assert_eq!(id, "device1");
        assert!(repo.find::<Device>("device1").unwrap().is_some());
    }

    #[test]
    fn register_duplicate_leaves_record_untouched() {
        let mut repo = repo();
        repo.register("alice", &Account::dummy("alice", 100), false)
            .unwrap();
        let err = repo
            .register("alice", &Account::dummy("alice", 9999), false)
            .unwrap_err();
        assert!(matches!(err, SlotbidError::DuplicateId { .. }));
        assert_eq!(repo.get::<Account>("alice").unwrap().balance, 100);
    }

    #[test]
    fn list_follows_index_order() {
        let mut repo = repo();
        for (id, amount) in [("b2", 20), ("b1", 10), ("b3", 30)] {
            repo.register(id, &Bid::dummy(id, "s1", "alice", amount), false)
                .unwrap();
        }
        let amounts: Vec<i64> = repo.list::<Bid>().unwrap().iter().map(|b| b.amount).collect();
        assert_eq!(amounts, vec![20, 10, 30]);
    }

    #[test]
    fn list_empty_without_index() {
        assert!(repo().list::<Slot>().unwrap().is_empty());
    }

    #[test]
    fn list_fails_on_undecodable_entry() {
        let mut repo = repo();
        repo.register("s1", &Slot::dummy("s1"), false).unwrap();
        repo.ledger_mut().insert_raw("s1", "garbage");
        let err = repo.list::<Slot>().unwrap_err();
        assert!(matches!(err, SlotbidError::Decode { .. }));
    }

    #[test]
    fn read_failure_surfaces_as_storage() {
        let mut repo = repo();
        repo.put("alice", &Account::dummy("alice", 1)).unwrap();
        repo.ledger_mut().fail_reads_of("alice");
        let err = repo.get::<Account>("alice").unwrap_err();
        assert!(matches!(err, SlotbidError::Storage { .. }));
    }
}
