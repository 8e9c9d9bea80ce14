#![deny(missing_debug_implementations)]

//! Data structures for Controller–Pilot Data Link Communications (CPDLC).
//!
//! This crate provides the message model shared by the wire codec and the
//! connection client: the argument value types with their canonical text
//! forms, the static uplink/downlink template catalog, and the owning
//! [`message::Message`] container.
//!
//! No I/O happens here. Serialization to and from the wire lives in
//! `cpdlc-codec`.

pub mod arg;
pub mod catalog;
pub mod core;
pub mod error;
pub mod message;
pub mod pdc;
pub mod position;
pub mod posreport;
pub mod route;
