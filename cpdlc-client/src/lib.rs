#![deny(missing_debug_implementations)]

//! # CPDLC connection client and message-thread tracker.
//!
//! Two layers on top of [`cpdlc_codec`]:
//!
//! - [`client::Client`] maintains the server link: resolve, connect, TLS,
//!   LOGON, the send/receive loop, keepalive, teardown. One background
//!   worker thread per client.
//! - [`msglist::MsgList`] groups messages into request/response threads,
//!   computes per-thread status, and enforces response timeouts.
//!
//! A typical aircraft-side setup:
//!
//! ```no_run
//! use cpdlc_client::{client::Client, msglist::MsgList};
//!
//! let client = Client::new(false);
//! client.set_host("cpdlc.example.com");
//! let list = MsgList::new(&client);
//! client.logon("SECRET123", "N12345", Some("KZOA"));
//! ```

pub mod client;
pub mod clock;
pub mod msglist;
mod worker;

pub use client::{Client, LogonStatus, MessageLink, MsgStatus, MsgToken};
pub use msglist::{MsgList, MsgThrId, MsgThrStatus};
