//! `slotbid`: run auction commands read as JSON lines from stdin against an
//! in-memory ledger, one JSON response line per request on stdout.
//!
//! Environment:
//! - `SLOTBID_CONFIG`: path to an engine config JSON file
//! - `RUST_LOG`: log filter (default `info`), logs go to stderr
//! - `SLOTBID_LOG_JSON=1`: JSON log lines

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use slotbid_router::{CommandRouter, Response, handle_line};
use slotbid_store::MemoryLedger;
use slotbid_types::{EngineConfig, Result, SlotbidError, constants};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if std::env::var("SLOTBID_LOG_JSON").is_ok_and(|v| v == "1") {
        fmt.json().init();
    } else {
        fmt.init();
    }
}

fn load_config() -> Result<EngineConfig> {
    match std::env::var(constants::CONFIG_ENV_VAR) {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| SlotbidError::Configuration(format!("{path}: {e}")))?;
            EngineConfig::from_json(&text)
        }
        Err(_) => Ok(EngineConfig::default()),
    }
}

fn serve(config: EngineConfig) -> Result<()> {
    let mut router = CommandRouter::new(MemoryLedger::new(), config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&mut router, &line);
        let text = serde_json::to_string(&response).unwrap_or_else(|e| {
            let fallback = Response::from_error(&SlotbidError::Serialization(e.to_string()));
            serde_json::to_string(&fallback).unwrap_or_default()
        });
        writeln!(stdout, "{text}")?;
        stdout.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(
        version = constants::VERSION,
        settlement = %config.settlement,
        write_mode = %config.write_mode,
        enforce_bid_deadline = config.enforce_bid_deadline,
        "{} ready",
        constants::ENGINE_NAME
    );

    match serve(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "I/O failure");
            ExitCode::FAILURE
        }
    }
}
