//! Records as they appear on the ledger: field names, leniency toward
//! sparse payloads, and canonical re-encoding.

use slotbid_store::{Ledger, MemoryLedger, Repository, codec};
use slotbid_types::*;

#[test]
fn sparse_slot_payload_takes_zero_values() {
    let slot: Slot = codec::decode_record("s1", br#"{"id":"s1","bids":null}"#).unwrap();
    assert!(slot.bids.is_empty());
    assert_eq!(slot.highest_bid_amount, 0);
    assert_eq!(
        codec::encode(&slot).unwrap(),
        r#"{"id":"s1","startTime":0,"endTime":0,"bids":[],"bidDeadline":0,"deviceId":"","highestBidAmount":0}"#
    );
}

#[test]
fn account_uses_hash_on_the_wire() {
    let bytes = br#"{"hash":"h1","salt":"s1","username":"alice","balance":40,"bids":[]}"#;
    let account: Account = codec::decode_record("alice", bytes).unwrap();
    assert_eq!(account.password_hash, "h1");
    assert_eq!(codec::encode(&account).unwrap().as_bytes(), bytes);
}

#[test]
fn device_fields_are_opaque_strings() {
    let bytes = br#"{"deviceId":"d1","hash":"","salt":"","balance":"","size":"55in","lat":"1.5","long":"-3"}"#;
    let device: Device = codec::decode_record("d1", bytes).unwrap();
    assert_eq!(device.size, "55in");
    assert_eq!(codec::encode(&device).unwrap().as_bytes(), bytes);
}

#[test]
fn unknown_fields_are_dropped_on_store() {
    let mut repo = Repository::new(MemoryLedger::new());
    let bid: Bid = codec::decode_record(
        "b1",
        br#"{"id":"b1","slotId":"s1","amount":5,"username":"u","signature":"zz"}"#,
    )
    .unwrap();
    repo.register("b1", &bid, false).unwrap();

    let stored = repo.ledger().get("b1").unwrap();
    assert_eq!(
        stored,
        br#"{"id":"b1","slotId":"s1","amount":5,"content":"","username":"u"}"#.to_vec()
    );
    assert_eq!(repo.ledger().get("_bids").unwrap(), br#"["b1"]"#.to_vec());
}

#[test]
fn embedded_bid_logs_round_trip() {
    let mut slot = Slot::dummy("s1");
    slot.record_bid(Bid::dummy("b1", "s1", "alice", 10));
    slot.record_bid(Bid::dummy("b2", "s1", "bob", 20));

    let mut repo = Repository::new(MemoryLedger::new());
    repo.put("s1", &slot).unwrap();
    let back: Slot = repo.get("s1").unwrap();
    assert_eq!(back, slot);
    assert_eq!(back.max_logged_amount(), 20);
}
