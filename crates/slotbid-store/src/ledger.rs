//! The keyed-storage collaborator.
//!
//! A [`Ledger`] is the only persistence primitive: whole-value get and put
//! by string key. Each put is durable on its own; there is no transaction,
//! no compare-and-swap, and no scan.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

/// Failure reported by a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Nothing is stored under the key.
    #[error("key not found: {0}")]
    NotFound(String),
    /// The medium failed.
    #[error("storage failure at {key}: {reason}")]
    Storage { key: String, reason: String },
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Keyed byte storage.
pub trait Ledger {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> LedgerResult<Vec<u8>>;

    /// Overwrite the value stored under `key`.
    fn put(&mut self, key: &str, value: Vec<u8>) -> LedgerResult<()>;
}

impl<L: Ledger + ?Sized> Ledger for &mut L {
    fn get(&self, key: &str) -> LedgerResult<Vec<u8>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        (**self).put(key, value)
    }
}

impl<L: Ledger + ?Sized> Ledger for Box<L> {
    fn get(&self, key: &str) -> LedgerResult<Vec<u8>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        (**self).put(key, value)
    }
}

// ---------------------------------------------------------------------------
// MemoryLedger
// ---------------------------------------------------------------------------

/// In-memory ledger with fault injection for exercising partial writes.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: BTreeMap<String, Vec<u8>>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
    /// Remaining successful puts before every put fails.
    write_budget: Option<usize>,
    puts: usize,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read of `key` fail with a storage error.
    pub fn fail_reads_of(&mut self, key: &str) {
        self.failing_reads.insert(key.to_string());
    }

    /// Make every write to `key` fail with a storage error.
    pub fn fail_writes_to(&mut self, key: &str) {
        self.failing_writes.insert(key.to_string());
    }

    /// Allow `n` more successful puts, then fail every put.
    pub fn fail_writes_after(&mut self, n: usize) {
        self.write_budget = Some(n);
    }

    /// Remove all injected faults.
    pub fn clear_faults(&mut self) {
        self.failing_reads.clear();
        self.failing_writes.clear();
        self.write_budget = None;
    }

    /// Raw bytes under `key`, bypassing fault injection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Store raw bytes, bypassing fault injection and the put counter.
    pub fn insert_raw(&mut self, key: &str, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of successful puts so far.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.puts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, key: &str) -> LedgerResult<Vec<u8>> {
        if self.failing_reads.contains(key) {
            return Err(LedgerError::Storage {
                key: key.to_string(),
                reason: "injected read failure".into(),
            });
        }
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(key.to_string()))
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> LedgerResult<()> {
        if self.failing_writes.contains(key) || self.write_budget == Some(0) {
            return Err(LedgerError::Storage {
                key: key.to_string(),
                reason: "injected write failure".into(),
            });
        }
        if let Some(budget) = self.write_budget.as_mut() {
            *budget -= 1;
        }
        self.entries.insert(key.to_string(), value);
        self.puts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_is_not_found() {
        let ledger = MemoryLedger::new();
        assert_eq!(
            ledger.get("nope").unwrap_err(),
            LedgerError::NotFound("nope".into())
        );
    }

    #[test]
    fn put_then_get() {
        let mut ledger = MemoryLedger::new();
        ledger.put("k", b"v".to_vec()).unwrap();
        assert_eq!(ledger.get("k").unwrap(), b"v");
        assert_eq!(ledger.put_count(), 1);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn put_overwrites() {
        let mut ledger = MemoryLedger::new();
        ledger.put("k", b"one".to_vec()).unwrap();
        ledger.put("k", b"two".to_vec()).unwrap();
        assert_eq!(ledger.get("k").unwrap(), b"two");
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn injected_faults() {
        let mut ledger = MemoryLedger::new();
        ledger.insert_raw("a", "1");
        ledger.fail_reads_of("a");
        ledger.fail_writes_to("b");
        assert!(matches!(ledger.get("a"), Err(LedgerError::Storage { .. })));
        assert!(matches!(
            ledger.put("b", Vec::new()),
            Err(LedgerError::Storage { .. })
        ));
        ledger.clear_faults();
        assert_eq!(ledger.get("a").unwrap(), b"1");
        ledger.put("b", Vec::new()).unwrap();
    }

    #[test]
    fn write_budget_runs_out() {
        let mut ledger = MemoryLedger::new();
        ledger.fail_writes_after(2);
        ledger.put("a", Vec::new()).unwrap();
        ledger.put("b", Vec::new()).unwrap();
        assert!(ledger.put("c", Vec::new()).is_err());
        assert!(ledger.raw("c").is_none());
        assert_eq!(ledger.put_count(), 2);
    }

    #[test]
    fn mutable_reference_is_a_ledger() {
        fn store(mut ledger: impl Ledger) {
            ledger.put("x", b"y".to_vec()).unwrap();
        }
        let mut ledger = MemoryLedger::new();
        store(&mut ledger);
        assert_eq!(ledger.raw("x"), Some(&b"y"[..]));
    }
}
