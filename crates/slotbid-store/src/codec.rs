//! JSON encoding of records and identifier indexes.

use serde::{Serialize, de::DeserializeOwned};
use slotbid_types::{
    Account, Bid, Device, RecordKind, Result, SettlementRecord, Slot, SlotbidError,
};

/// A top-level record stored under its own key.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: RecordKind;
}

impl Record for Account {
    const KIND: RecordKind = RecordKind::Account;
}

impl Record for Slot {
    const KIND: RecordKind = RecordKind::Slot;
}

impl Record for Bid {
    const KIND: RecordKind = RecordKind::Bid;
}

impl Record for Device {
    const KIND: RecordKind = RecordKind::Device;
}

/// Encode a value as compact JSON text.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| SlotbidError::Serialization(e.to_string()))
}

/// Decode bytes read from `key` as a value of `kind`.
pub fn decode<T: DeserializeOwned>(kind: RecordKind, key: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SlotbidError::Decode {
        kind,
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a record payload, e.g. one supplied to an `add_*` command.
pub fn decode_record<T: Record>(key: &str, bytes: &[u8]) -> Result<T> {
    decode(T::KIND, key, bytes)
}

/// Decode the settlement marker stored for `slot_id`.
pub fn decode_settlement(slot_id: &str, bytes: &[u8]) -> Result<SettlementRecord> {
    serde_json::from_slice(bytes).map_err(|e| SlotbidError::SettlementDecode {
        slot_id: slot_id.to_string(),
        reason: e.to_string(),
    })
}
