//! Append-only identifier indexes, one per record kind.
//!
//! An index is a JSON array of ids stored under a fixed key (`_accounts`,
//! `_slots`, `_bids`, `_devices`). It is the only way to enumerate a kind.
//! Appending is a read-modify-write of the whole array with no isolation;
//! two writers racing on the same kind lose one append (the record itself
//! still exists under its key, it just can't be enumerated).
//!
//! Every id appears at most once across all four indexes, and never names a
//! key that already holds a value: an explicit id that is taken is rejected,
//! and generated ids skip suffixes that are taken.

use slotbid_types::{RecordKind, Result, SlotbidError, check_identifier};
use tracing::debug;

use crate::codec;
use crate::ledger::{Ledger, LedgerError};
use crate::repository::storage_error;

/// The outcome of planning an append: the id to register and the full
/// index contents to write back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexAppend {
    pub kind: RecordKind,
    pub final_id: String,
    pub entries: Vec<String>,
}

impl IndexAppend {
    /// Ledger key the index is written under.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.kind.index_key()
    }

    /// Encoded index value.
    pub fn encode(&self) -> Result<String> {
        codec::encode(&self.entries)
    }
}

/// Read a kind's index. A missing index is an empty one.
pub fn read_index<L: Ledger + ?Sized>(ledger: &L, kind: RecordKind) -> Result<Vec<String>> {
    let key = kind.index_key();
    match ledger.get(key) {
        Ok(bytes) => codec::decode(kind, key, &bytes),
        Err(LedgerError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(storage_error(e)),
    }
}

/// The kind already holding `id` in the shared key space, if any.
///
/// All kinds live under one key space, so an id listed in any index is
/// taken for every kind. A key that holds a value without being indexed is
/// taken as well and is reported against `requested`.
pub fn holder_of<L: Ledger + ?Sized>(
    ledger: &L,
    id: &str,
    requested: RecordKind,
) -> Result<Option<RecordKind>> {
    for kind in RecordKind::ALL {
        if read_index(ledger, kind)?.iter().any(|e| e == id) {
            return Ok(Some(kind));
        }
    }
    match ledger.get(id) {
        Ok(_) => Ok(Some(requested)),
        Err(LedgerError::NotFound(_)) => Ok(None),
        Err(e) => Err(storage_error(e)),
    }
}

/// Decide the id to register and the resulting index, without writing.
///
/// With `auto_generate` false the id is `candidate` itself. With it true the
/// id is `candidate` followed by `len + 1`, bumped further while taken by
/// any kind.
///
/// # Errors
/// - `InvalidIdentifier` if the resulting id is empty or reserved
/// - `DuplicateId` if an explicit id is already held by any kind, naming
///   the holder
pub fn plan_append<L: Ledger + ?Sized>(
    ledger: &L,
    kind: RecordKind,
    candidate: &str,
    auto_generate: bool,
) -> Result<IndexAppend> {
    let mut entries = read_index(ledger, kind)?;
    let final_id = if auto_generate {
        check_identifier(&format!("{candidate}0"))?;
        let mut n = entries.len() + 1;
        loop {
            let id = format!("{candidate}{n}");
            if !entries.contains(&id) && holder_of(ledger, &id, kind)?.is_none() {
                break id;
            }
            n += 1;
        }
    } else {
        check_identifier(candidate)?;
        if let Some(holder) = holder_of(ledger, candidate, kind)? {
            return Err(SlotbidError::DuplicateId {
                kind: holder,
                id: candidate.to_string(),
            });
        }
        candidate.to_string()
    };

    entries.push(final_id.clone());
    Ok(IndexAppend {
        kind,
        final_id,
        entries,
    })
}

/// Register an id in a kind's index and return it.
///
/// # Errors
/// Storage errors from the read or the write, plus everything
/// [`plan_append`] rejects.
pub fn append_id<L: Ledger + ?Sized>(
    ledger: &mut L,
    kind: RecordKind,
    candidate: &str,
    auto_generate: bool,
) -> Result<String> {
    let append = plan_append(ledger, kind, candidate, auto_generate)?;
    ledger
        .put(append.key(), append.encode()?.into_bytes())
        .map_err(storage_error)?;
    debug!(
        index = append.key(),
        id = %append.final_id,
        len = append.entries.len(),
        "Index appended"
    );
    Ok(append.final_id)
}
