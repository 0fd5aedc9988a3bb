//! Write-ahead intent journal.
//!
//! A journaled operation stores its whole [`WritePlan`] under the
//! `_journal` key before issuing any data write, and removes it once all
//! writes landed. If a data write fails, the intent stays behind and
//! [`recover`] rolls it forward later by re-issuing every write (each is a
//! full-value overwrite, so re-issuing is idempotent).
//!
//! Recovery must run before any new operation reads state; otherwise a
//! replay could overwrite newer values with the intent's older ones.
//! Read-only callers that cannot recover use a [`JournalView`], which
//! serves the rolled-forward values without writing them.

use std::collections::BTreeMap;

use slotbid_types::{Intent, Result, SlotbidError, constants};
use tracing::{info, warn};

use crate::codec;
use crate::ledger::{Ledger, LedgerError, LedgerResult};
use crate::plan::{WritePlan, apply_writes};
use crate::repository::storage_error;

/// Intents that were started but never cleared.
pub fn pending<L: Ledger + ?Sized>(ledger: &L) -> Result<Vec<Intent>> {
    match ledger.get(constants::JOURNAL_KEY) {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| SlotbidError::JournalCorrupt {
            reason: e.to_string(),
        }),
        Err(LedgerError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(storage_error(e)),
    }
}

fn verify(intents: &[Intent]) -> Result<()> {
    for intent in intents {
        if let Some(bad) = intent.writes.iter().find(|w| !w.is_intact()) {
            return Err(SlotbidError::JournalCorrupt {
                reason: format!("{} write to {} fails its digest", intent.id, bad.key),
            });
        }
    }
    Ok(())
}

fn write_journal<L: Ledger + ?Sized>(ledger: &mut L, intents: &[Intent]) -> Result<()> {
    ledger
        .put(constants::JOURNAL_KEY, codec::encode(intents)?.into_bytes())
        .map_err(storage_error)
}

/// Journal the plan, issue its writes, then clear it from the journal.
///
/// # Errors
/// - `Storage` if the intent itself cannot be journaled (nothing applied)
/// - `PartialWrite` if a data write fails (intent left for [`recover`])
pub fn apply_journaled<L: Ledger + ?Sized>(ledger: &mut L, plan: WritePlan) -> Result<()> {
    let intent = plan.into_intent();
    let mut intents = pending(ledger)?;
    intents.push(intent.clone());
    write_journal(ledger, &intents)?;

    apply_writes(ledger, &intent.operation, &intent.writes)?;

    intents.retain(|i| i.id != intent.id);
    if let Err(e) = write_journal(ledger, &intents) {
        // Every write landed; a leftover intent only replays identical values.
        warn!(intent = %intent.id, error = %e, "Failed to clear journaled intent");
    }
    Ok(())
}

/// Replay and clear every pending intent. Returns how many were replayed.
///
/// # Errors
/// `JournalCorrupt` if any intent fails its digest check; in that case no
/// write of any intent is issued.
pub fn recover<L: Ledger + ?Sized>(ledger: &mut L) -> Result<usize> {
    let intents = pending(ledger)?;
    if intents.is_empty() {
        return Ok(0);
    }

    verify(&intents)?;
    for intent in &intents {
        warn!(
            intent = %intent.id,
            operation = %intent.operation,
            writes = intent.writes.len(),
            "Replaying interrupted operation"
        );
        apply_writes(ledger, &intent.operation, &intent.writes)?;
    }
    write_journal(ledger, &[])?;

    info!(replayed = intents.len(), "Journal recovery complete");
    Ok(intents.len())
}

/// A ledger as it will look once every pending intent is rolled forward.
///
/// Reads of a key some intent writes return that intent's value (the last
/// one, when several do); everything else reads through. Writes are refused.
#[derive(Debug)]
pub struct JournalView<'a, L: ?Sized> {
    ledger: &'a L,
    pending: BTreeMap<String, Vec<u8>>,
}

impl<'a, L: Ledger + ?Sized> JournalView<'a, L> {
    /// Overlay every pending intent of `ledger`.
    ///
    /// # Errors
    /// `JournalCorrupt` under the same conditions as [`recover`].
    pub fn new(ledger: &'a L) -> Result<Self> {
        let intents = pending(ledger)?;
        verify(&intents)?;
        let overlay = intents
            .into_iter()
            .flat_map(|intent| intent.writes)
            .map(|w| (w.key, w.value.into_bytes()))
            .collect();
        Ok(Self {
            ledger,
            pending: overlay,
        })
    }

    /// A view that reads straight through, for ledgers written without a
    /// journal.
    #[must_use]
    pub fn passthrough(ledger: &'a L) -> Self {
        Self {
            ledger,
            pending: BTreeMap::new(),
        }
    }

    /// Number of keys served from the journal instead of the ledger.
    #[must_use]
    pub fn overlaid(&self) -> usize {
        self.pending.len()
    }
}

impl<L: Ledger + ?Sized> Ledger for JournalView<'_, L> {
    fn get(&self, key: &str) -> LedgerResult<Vec<u8>> {
        match self.pending.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.ledger.get(key),
        }
    }

    fn put(&mut self, key: &str, _value: Vec<u8>) -> LedgerResult<()> {
        Err(LedgerError::Storage {
            key: key.to_string(),
            reason: "journal view is read-only".to_string(),
        })
    }
}
