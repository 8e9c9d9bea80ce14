//! # Decoding of messages.
//!
//! The decoder is incremental: [`decode`] takes whatever bytes have been
//! received so far and either returns a message plus the unconsumed rest,
//! or [`MessageDecodeError::Incomplete`] when no newline-terminated frame
//! is buffered yet.
//!
//! A malformed frame is unrecoverable. Once a peer has sent garbage there
//! is no way to trust its framing again, so the connection client drops
//! the link on [`MessageDecodeError::Failed`].

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{map_res, opt},
    IResult,
};
use thiserror::Error;

use cpdlc_types::{
    arg::Arg,
    catalog::{self, MsgDir},
    core::CallSign,
    message::{Message, PacketType, Segment},
};

use crate::escape::unescape;

/// Frames longer than this (including the newline) are refused.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

/// Error during message decoding.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum MessageDecodeError {
    /// More data is needed.
    #[error("More data is needed")]
    Incomplete,

    /// No frame boundary within [`MAX_FRAME_LEN`] bytes.
    #[error("Frame exceeds maximum length")]
    FrameTooLong,

    /// Decoding failed.
    #[error("Decoding failed")]
    Failed,
}

/// Attempts to decode one message from `input`.
///
/// On success, returns the remaining (unconsumed) bytes and the message.
pub fn decode(input: &[u8]) -> Result<(&[u8], Message), MessageDecodeError> {
    match input.iter().position(|&b| b == b'\n') {
        Some(at) if at < MAX_FRAME_LEN => {
            let msg = decode_line(&input[..at]).map_err(|reason| {
                log::debug!("dropping malformed frame: {}", reason);
                MessageDecodeError::Failed
            })?;
            Ok((&input[at + 1..], msg))
        }
        Some(_) => Err(MessageDecodeError::FrameTooLong),
        None if input.len() >= MAX_FRAME_LEN => Err(MessageDecodeError::FrameTooLong),
        None => Err(MessageDecodeError::Incomplete),
    }
}

fn decode_line(line: &[u8]) -> Result<Message, &'static str> {
    let line = std::str::from_utf8(line).map_err(|_| "frame is not valid UTF-8")?;

    // Unwrap an ARINC 622 envelope if one is present.
    let (payload, imi) = if line.starts_with('/') {
        let (payload, imi) = crate::arinc622::unwrap(line).map_err(|_| "bad ARINC 622 frame")?;
        (payload, Some(imi))
    } else {
        (line, None)
    };

    let mut tokens = payload.split('/').filter(|token| !token.is_empty());

    let pkt = tokens
        .next()
        .and_then(|token| token.strip_prefix("PKT="))
        .ok_or("PKT token missing or not first")?;
    let pkt_type = match pkt {
        "CPDLC" => PacketType::Cpdlc,
        "PING" => PacketType::Ping,
        "PONG" => PacketType::Pong,
        _ => return Err("unknown packet type"),
    };

    let mut msg = Message::new(pkt_type);
    if let Some(imi) = imi {
        msg.fmt_arinc622 = true;
        msg.set_imi(imi);
    }

    for token in tokens {
        match token.split_once('=') {
            Some(("FROM", value)) => {
                if msg.from_id().is_some() {
                    return Err("duplicate FROM");
                }
                let from = unescape(value).map_err(|_| "bad FROM escape")?;
                msg.set_from(CallSign::try_from(from).map_err(|_| "bad FROM value")?);
            }
            Some(("TO", value)) => {
                if msg.to_id().is_some() {
                    return Err("duplicate TO");
                }
                let to = unescape(value).map_err(|_| "bad TO escape")?;
                msg.set_to(CallSign::try_from(to).map_err(|_| "bad TO value")?);
            }
            Some(("MIN", value)) => {
                if msg.min().is_some() {
                    return Err("duplicate MIN");
                }
                msg.set_min(value.parse::<u32>().map_err(|_| "bad MIN value")?);
            }
            Some(("MRN", value)) => {
                if msg.mrn().is_some() {
                    return Err("duplicate MRN");
                }
                msg.set_mrn(value.parse::<u32>().map_err(|_| "bad MRN value")?);
            }
            Some(("LOGON", value)) => {
                let data = unescape(value).map_err(|_| "bad LOGON escape")?;
                msg.set_logon_data(&data);
            }
            Some(("OPT", value)) => {
                let (name, opt_value) = match value.split_once('=') {
                    Some((name, val)) => (name, Some(val)),
                    None => (value, None),
                };
                let name = unescape(name).map_err(|_| "bad OPT escape")?;
                let opt_value = match opt_value {
                    Some(val) => Some(unescape(val).map_err(|_| "bad OPT escape")?),
                    None => None,
                };
                msg.add_option(&name, opt_value.as_deref());
            }
            Some(("DATA", value)) => {
                let seg = decode_seg(value)?;
                msg.add_seg(seg).map_err(|_| "too many segments")?;
            }
            Some(_) => {
                // Unknown keyed token; skipped for forward compatibility.
            }
            None if token == "LOGOFF" => msg.set_logoff(true),
            None => {
                // Unknown flag token; skipped for forward compatibility.
            }
        }
    }

    Ok(msg)
}

fn seg_head(input: &str) -> IResult<&str, (MsgDir, u8, Option<char>)> {
    let (input, dir) = alt((tag("UM"), tag("DM")))(input)?;
    let dir = match dir {
        "UM" => MsgDir::Uplink,
        _ => MsgDir::Downlink,
    };
    let (input, ty) = map_res(digit1, str::parse::<u8>)(input)?;
    let (input, subtype) = opt(nom::character::complete::one_of("bcdefghi"))(input)?;
    Ok((input, (dir, ty, subtype)))
}

fn decode_seg(value: &str) -> Result<Segment, &'static str> {
    let (mut rest, (dir, ty, subtype)) =
        seg_head(value).map_err(|_| "bad segment type code")?;
    // Arguments are separated from the type code by a space; anything
    // glued to the code is a malformed code.
    if !rest.is_empty() && !rest.starts_with(' ') {
        return Err("bad segment type code");
    }
    let template = catalog::lookup(dir, ty, subtype).ok_or("unknown message type")?;

    let mut args = Vec::with_capacity(template.args.len());
    for &arg_type in template.args {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return Err("missing argument");
        }
        let token = if arg_type.is_trailing() {
            std::mem::take(&mut rest)
        } else {
            let (token, after) = match rest.split_once(' ') {
                Some((token, after)) => (token, after),
                None => (rest, ""),
            };
            rest = after;
            token
        };
        let text = unescape(token).map_err(|_| "bad argument escape")?;
        let arg = Arg::parse_as(arg_type, &text).map_err(|_| "bad argument value")?;
        args.push(arg);
    }
    if !rest.trim_start_matches(' ').is_empty() {
        return Err("excess argument data");
    }

    Segment::new(template, args).map_err(|_| "argument signature mismatch")
}
