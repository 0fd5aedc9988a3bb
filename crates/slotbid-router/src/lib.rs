//! # slotbid-router
//!
//! Thin command surface over the auction engine.
//!
//! - [`Command`]: command names and positional arguments
//! - [`CommandRouter`]: dispatch by name, JSON responses
//! - [`session`]: JSON-lines request/response framing used by the
//!   `slotbid` binary

pub mod command;
pub mod router;
pub mod session;

pub use command::Command;
pub use router::CommandRouter;
pub use session::{Request, Response, handle_line};
