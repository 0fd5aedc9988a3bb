//! Write plans: the ordered puts of one multi-write operation, built
//! entirely before the first of them is issued.

use serde::Serialize;
use slotbid_types::{Intent, PlannedWrite, Result, SlotbidError};
use tracing::{debug, warn};

use crate::codec::{self, Record};
use crate::index::IndexAppend;
use crate::ledger::Ledger;

/// Ordered puts for a named operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePlan {
    operation: String,
    writes: Vec<PlannedWrite>,
}

impl WritePlan {
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            writes: Vec::new(),
        }
    }

    /// Queue a record write.
    pub fn push_record<T: Record>(&mut self, key: &str, record: &T) -> Result<()> {
        self.push_value(key, record)
    }

    /// Queue an index write-back.
    pub fn push_index(&mut self, append: &IndexAppend) -> Result<()> {
        self.writes
            .push(PlannedWrite::new(append.key(), append.encode()?));
        Ok(())
    }

    /// Queue any serializable value.
    pub fn push_value<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        self.writes.push(PlannedWrite::new(key, codec::encode(value)?));
        Ok(())
    }

    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[must_use]
    pub fn writes(&self) -> &[PlannedWrite] {
        &self.writes
    }

    /// Keys in write order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.writes.iter().map(|w| w.key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Wrap the plan in a journal intent.
    #[must_use]
    pub fn into_intent(self) -> Intent {
        Intent::new(self.operation, self.writes)
    }
}

/// Issue `writes` in order.
///
/// # Errors
/// Returns `PartialWrite` naming how many writes committed before the
/// failing one. Earlier writes stay durable.
pub(crate) fn apply_writes<L: Ledger + ?Sized>(
    ledger: &mut L,
    operation: &str,
    writes: &[PlannedWrite],
) -> Result<()> {
    for (committed, write) in writes.iter().enumerate() {
        if let Err(e) = ledger.put(&write.key, write.value.clone().into_bytes()) {
            warn!(
                operation,
                committed,
                total = writes.len(),
                key = %write.key,
                error = %e,
                "Write sequence interrupted"
            );
            return Err(SlotbidError::PartialWrite {
                operation: operation.to_string(),
                committed,
                total: writes.len(),
                failed_key: write.key.clone(),
                reason: e.to_string(),
            });
        }
        debug!(operation, key = %write.key, "Ledger write");
    }
    Ok(())
}

/// Issue a plan's writes directly, without journaling.
pub fn apply_direct<L: Ledger + ?Sized>(ledger: &mut L, plan: &WritePlan) -> Result<()> {
    apply_writes(ledger, &plan.operation, &plan.writes)
}
