#![deny(missing_debug_implementations)]

//! # Wire codec for CPDLC messages.
//!
//! A CPDLC wire message is a single `\n`-terminated line of `KEY=VALUE/`
//! tokens. [`MessageCodec`] turns [`cpdlc_types::message::Message`] values
//! into such lines and back:
//!
//! ```
//! use cpdlc_codec::{decode::MessageDecodeError, MessageCodec};
//!
//! let (rest, msg) =
//!     MessageCodec::decode(b"PKT=CPDLC/FROM=N12345/TO=KZOA/MIN=7/DATA=DM6 FL350\n<rest>")
//!         .unwrap();
//! assert_eq!(rest, b"<rest>");
//! assert_eq!(msg.min(), Some(7));
//! assert_eq!(msg.display_text(), "REQUEST FL350");
//!
//! // Decoding is incremental: a partial frame just asks for more bytes.
//! assert_eq!(
//!     MessageCodec::decode(b"PKT=CPDLC/FROM=N1"),
//!     Err(MessageDecodeError::Incomplete),
//! );
//! ```
//!
//! Note that the codec is strict in what it accepts from the wire: unknown
//! message types, argument arity mismatches and malformed argument forms
//! all fail the frame, because a peer speaking garbage cannot be trusted
//! to have framed the rest of its stream correctly either. Unknown
//! `KEY=` tokens, on the other hand, are skipped for forward
//! compatibility.

pub mod arinc622;
pub mod codec;
pub mod escape;

pub use codec::{decode, encode, MessageCodec};
pub use cpdlc_types as types;

#[cfg(test)]
mod testing;
