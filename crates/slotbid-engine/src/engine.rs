//! The auction engine handle.
//!
//! One engine owns one ledger handle. Every operation takes `&mut self`, so
//! calls through the same engine are strictly sequential. Nothing guards
//! against a second process writing the same keys: the ledger is
//! last-writer-wins, and so is the engine.

use slotbid_store::{JournalView, Ledger, Repository, WritePlan, codec, journal, plan};
use slotbid_types::{
    Account, EngineConfig, Result, SettlementRecord, Slot, SlotbidError, WriteMode,
    check_identifier, settlement_key,
};

/// Escrow and settlement over a keyed ledger.
#[derive(Debug)]
pub struct AuctionEngine<L> {
    pub(crate) repo: Repository<L>,
    pub(crate) config: EngineConfig,
}

impl<L: Ledger> AuctionEngine<L> {
    /// Create an engine over `ledger`.
    pub fn new(ledger: L, config: EngineConfig) -> Self {
        Self {
            repo: Repository::new(ledger),
            config,
        }
    }

    /// Create an engine with [`EngineConfig::default`].
    pub fn with_defaults(ledger: L) -> Self {
        Self::new(ledger, EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &Repository<L> {
        &self.repo
    }

    pub fn ledger(&self) -> &L {
        self.repo.ledger()
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        self.repo.ledger_mut()
    }

    pub fn into_ledger(self) -> L {
        self.repo.into_ledger()
    }

    /// Roll forward any journaled operation that was interrupted.
    /// Returns the number of operations replayed.
    pub fn recover(&mut self) -> Result<usize> {
        journal::recover(self.repo.ledger_mut())
    }

    /// The settlement marker for a slot, if one was written.
    ///
    /// # Errors
    /// `SettlementDecode` if the stored marker is malformed.
    pub fn settlement(&self, slot_id: &str) -> Result<Option<SettlementRecord>> {
        self.view()?
            .read_raw(&settlement_key(slot_id))?
            .map(|bytes| codec::decode_settlement(slot_id, &bytes))
            .transpose()
    }

    /// State as the next operation will see it. In journaled mode every
    /// pending intent is applied in memory, so reads never observe an
    /// interrupted operation half done.
    pub(crate) fn view(&self) -> Result<Repository<JournalView<'_, L>>> {
        let view = match self.config.write_mode {
            WriteMode::Direct => JournalView::passthrough(self.repo.ledger()),
            WriteMode::Journaled => JournalView::new(self.repo.ledger())?,
        };
        Ok(Repository::new(view))
    }

    pub(crate) fn is_settled(&self, slot_id: &str) -> Result<bool> {
        Ok(self.repo.read_raw(&settlement_key(slot_id))?.is_some())
    }

    /// In journaled mode, finish any interrupted operation before reading
    /// state for a new one.
    pub(crate) fn settle_journal(&mut self) -> Result<()> {
        if self.config.write_mode == WriteMode::Journaled {
            self.recover()?;
        }
        Ok(())
    }

    /// Issue a write plan according to the configured write mode.
    pub(crate) fn commit(&mut self, writes: WritePlan) -> Result<()> {
        match self.config.write_mode {
            WriteMode::Direct => plan::apply_direct(self.repo.ledger_mut(), &writes),
            WriteMode::Journaled => journal::apply_journaled(self.repo.ledger_mut(), writes),
        }
    }

    /// Load the account a bid or refund refers to.
    pub(crate) fn load_account(&self, username: &str) -> Result<Account> {
        if check_identifier(username).is_err() {
            return Err(SlotbidError::AccountNotFound(username.to_string()));
        }
        self.repo
            .find(username)?
            .ok_or_else(|| SlotbidError::AccountNotFound(username.to_string()))
    }

    /// Load the slot a bid or payout refers to.
    pub(crate) fn load_slot(&self, slot_id: &str) -> Result<Slot> {
        if check_identifier(slot_id).is_err() {
            return Err(SlotbidError::SlotNotFound(slot_id.to_string()));
        }
        self.repo
            .find(slot_id)?
            .ok_or_else(|| SlotbidError::SlotNotFound(slot_id.to_string()))
    }
}
