//! JSON-lines request handling: one request object in, one response object
//! out.
//!
//! ```text
//! → {"command":"payout_bid","args":["s1"]}
//! ← {"ok":{"slotId":"s1","winningAmount":80,"refunds":[...]}}
//! ← {"error":"SB_ERR_201: Slot not found: s1","code":"SB_ERR_201"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slotbid_store::Ledger;
use slotbid_types::{Result, SlotbidError};
use tracing::warn;

use crate::router::CommandRouter;

/// One request line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Ok { ok: Value },
    Error { error: String, code: String },
}

impl Response {
    pub fn from_error(err: &SlotbidError) -> Self {
        Self::Error {
            error: err.to_string(),
            code: err.code(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Run one request line against the router.
pub fn handle_line<L: Ledger>(router: &mut CommandRouter<L>, line: &str) -> Response {
    match run(router, line) {
        Ok(value) => Response::Ok { ok: value },
        Err(e) => {
            warn!(error = %e, code = %e.code(), "Command failed");
            Response::from_error(&e)
        }
    }
}

fn run<L: Ledger>(router: &mut CommandRouter<L>, line: &str) -> Result<Value> {
    let request: Request = serde_json::from_str(line)
        .map_err(|e| SlotbidError::Serialization(format!("bad request line: {e}")))?;
    let bytes = router.dispatch(&request.command, &request.args)?;
    serde_json::from_slice(&bytes).map_err(|e| SlotbidError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotbid_store::MemoryLedger;
    use slotbid_types::EngineConfig;

    #[test]
    fn unparseable_line_is_an_error_response() {
        let mut router = CommandRouter::new(MemoryLedger::new(), EngineConfig::default());
        let response = handle_line(&mut router, "{not json");
        match response {
            Response::Error { code, .. } => assert_eq!(code, "SB_ERR_901"),
            Response::Ok { .. } => panic!("expected an error"),
        }
    }

    #[test]
    fn missing_args_default_to_empty() {
        let mut router = CommandRouter::new(MemoryLedger::new(), EngineConfig::default());
        let response = handle_line(&mut router, r#"{"command":"get_all_bids"}"#);
        assert_eq!(
            response,
            Response::Ok {
                ok: serde_json::json!([])
            }
        );
    }

    #[test]
    fn responses_serialize_flat() {
        let ok = Response::Ok {
            ok: serde_json::json!("s1"),
        };
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"ok":"s1"}"#);
        let err = Response::from_error(&SlotbidError::SlotNotFound("s1".into()));
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"error":"SB_ERR_201: Slot not found: s1","code":"SB_ERR_201"}"#
        );
    }
}
