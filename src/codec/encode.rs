//! # Encoding of messages.
//!
//! The encoder is one-shot: [`encode`] produces the complete wire frame,
//! newline included. Messages with the ARINC 622 output format enabled are
//! wrapped in the envelope from [`crate::arinc622`] first.
//!
//! Note that CPDLC traces are plain ASCII by construction: every byte that
//! could collide with the `KEY=VALUE/` grammar is percent-escaped before
//! it reaches the line.

use std::fmt::Write;

use cpdlc_types::{
    arg::Arg,
    message::{Imi, Message, Segment},
};

use crate::escape::{escape_text, escape_token};

fn encode_arg(arg: &Arg, out: &mut String) {
    let text = arg.to_string();
    out.push(' ');
    if arg.arg_type().is_trailing() {
        out.push_str(&escape_text(&text));
    } else {
        out.push_str(&escape_token(&text));
    }
}

fn encode_seg(seg: &Segment, out: &mut String) {
    let template = seg.template();
    write!(out, "/DATA={}{}", template.dir.prefix(), template.ty).unwrap();
    if let Some(subtype) = template.subtype {
        out.push(subtype);
    }
    for arg in seg.args() {
        encode_arg(arg, out);
    }
}

/// Encodes the logical line, without envelope or newline.
pub(crate) fn encode_line(msg: &Message) -> String {
    let mut out = String::with_capacity(64);

    write!(out, "PKT={}", msg.pkt_type().token()).unwrap();
    if let Some(from) = msg.from_id() {
        write!(out, "/FROM={}", escape_token(from.as_str())).unwrap();
    }
    if let Some(to) = msg.to_id() {
        write!(out, "/TO={}", escape_token(to.as_str())).unwrap();
    }
    if let Some(min) = msg.min() {
        write!(out, "/MIN={}", min).unwrap();
    }
    if let Some(mrn) = msg.mrn() {
        write!(out, "/MRN={}", mrn).unwrap();
    }
    if let Some(logon_data) = msg.logon_data() {
        write!(out, "/LOGON={}", escape_token(logon_data)).unwrap();
    }
    if msg.is_logoff() {
        out.push_str("/LOGOFF");
    }
    for opt in msg.options() {
        match &opt.value {
            Some(value) => write!(
                out,
                "/OPT={}={}",
                escape_token(&opt.name),
                escape_token(value)
            )
            .unwrap(),
            None => write!(out, "/OPT={}", escape_token(&opt.name)).unwrap(),
        }
    }
    for seg in msg.segs() {
        encode_seg(seg, &mut out);
    }

    out
}

/// Encodes a message into its complete wire frame.
pub fn encode(msg: &Message) -> Vec<u8> {
    let line = encode_line(msg);
    let mut framed = if msg.fmt_arinc622 {
        let imi = msg.imi().unwrap_or(Imi::AtcComm);
        let from = msg.from_id().map(|cs| cs.as_str()).unwrap_or("");
        let to = msg.to_id().map(|cs| cs.as_str()).unwrap_or("");
        crate::arinc622::wrap(&line, imi, from, to)
    } else {
        line
    };
    framed.push('\n');
    framed.into_bytes()
}
