//! Command names and their positional arguments.

use std::fmt;

use slotbid_types::{Result, SlotbidError};

/// A parsed command, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddAccount { username: String, payload: String },
    AddSlot { id: String, payload: String },
    AddDevice { id: String, payload: String },
    PlaceBid { id: String, payload: String },
    PayoutBid { slot_id: String },
    GetAccount { username: String },
    GetSlot { slot_id: String },
    GetDevice { device_id: String },
    GetAllSlots,
    GetAllBids,
    GetSettlement { slot_id: String },
    Recover,
}

impl Command {
    /// Every command name the router accepts.
    pub const NAMES: [&'static str; 12] = [
        "add_account",
        "add_slot",
        "add_device",
        "place_bid",
        "payout_bid",
        "get_account",
        "get_slot",
        "get_device",
        "get_all_slots",
        "get_all_bids",
        "get_settlement",
        "recover",
    ];

    /// Parse a command name and its positional arguments.
    ///
    /// # Errors
    /// - `UnknownCommand` for a name not in [`Command::NAMES`]
    /// - `InvalidArguments` when the argument count is wrong
    pub fn parse(name: &str, args: &[String]) -> Result<Self> {
        let expected = match name {
            "add_account" | "add_slot" | "add_device" | "place_bid" => 2,
            "payout_bid" | "get_account" | "get_slot" | "get_device" | "get_settlement" => 1,
            "get_all_slots" | "get_all_bids" | "recover" => 0,
            other => return Err(SlotbidError::UnknownCommand(other.to_string())),
        };
        if args.len() != expected {
            return Err(SlotbidError::InvalidArguments {
                command: name.to_string(),
                expected,
                got: args.len(),
            });
        }

        let arg = |i: usize| args[i].clone();
        Ok(match name {
            "add_account" => Self::AddAccount {
                username: arg(0),
                payload: arg(1),
            },
            "add_slot" => Self::AddSlot {
                id: arg(0),
                payload: arg(1),
            },
            "add_device" => Self::AddDevice {
                id: arg(0),
                payload: arg(1),
            },
            "place_bid" => Self::PlaceBid {
                id: arg(0),
                payload: arg(1),
            },
            "payout_bid" => Self::PayoutBid { slot_id: arg(0) },
            "get_account" => Self::GetAccount { username: arg(0) },
            "get_slot" => Self::GetSlot { slot_id: arg(0) },
            "get_device" => Self::GetDevice { device_id: arg(0) },
            "get_settlement" => Self::GetSettlement { slot_id: arg(0) },
            "get_all_slots" => Self::GetAllSlots,
            "get_all_bids" => Self::GetAllBids,
            _ => Self::Recover,
        })
    }

    /// The command's wire name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddAccount { .. } => "add_account",
            Self::AddSlot { .. } => "add_slot",
            Self::AddDevice { .. } => "add_device",
            Self::PlaceBid { .. } => "place_bid",
            Self::PayoutBid { .. } => "payout_bid",
            Self::GetAccount { .. } => "get_account",
            Self::GetSlot { .. } => "get_slot",
            Self::GetDevice { .. } => "get_device",
            Self::GetAllSlots => "get_all_slots",
            Self::GetAllBids => "get_all_bids",
            Self::GetSettlement { .. } => "get_settlement",
            Self::Recover => "recover",
        }
    }

    /// Whether the command may write to the ledger.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::AddAccount { .. }
                | Self::AddSlot { .. }
                | Self::AddDevice { .. }
                | Self::PlaceBid { .. }
                | Self::PayoutBid { .. }
                | Self::Recover
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn every_name_parses_and_round_trips() {
        for name in Command::NAMES {
            let arity = match name {
                "add_account" | "add_slot" | "add_device" | "place_bid" => 2,
                "get_all_slots" | "get_all_bids" | "recover" => 0,
                _ => 1,
            };
            let cmd = Command::parse(name, &vec!["x".to_string(); arity]).unwrap();
            assert_eq!(cmd.name(), name);
        }
    }

    #[test]
    fn positional_arguments_land_in_fields() {
        let cmd = Command::parse("add_slot", &args(&["s1", "{}"])).unwrap();
        assert_eq!(
            cmd,
            Command::AddSlot {
                id: "s1".into(),
                payload: "{}".into()
            }
        );
        assert!(cmd.is_write());
        assert!(!Command::GetAllBids.is_write());
    }

    #[test]
    fn unknown_command() {
        let err = Command::parse("delete_slot", &[]).unwrap_err();
        assert!(matches!(err, SlotbidError::UnknownCommand(ref n) if n == "delete_slot"));
    }

    #[test]
    fn wrong_arity() {
        let err = Command::parse("payout_bid", &[]).unwrap_err();
        assert!(matches!(
            err,
            SlotbidError::InvalidArguments {
                expected: 1,
                got: 0,
                ..
            }
        ));
        let err = Command::parse("get_all_bids", &args(&["extra"])).unwrap_err();
        assert_eq!(err.code(), "SB_ERR_401");
    }
}
