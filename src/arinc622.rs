//! ARINC 622 envelope framing.
//!
//! When a message has its ARINC 622 output format enabled, the encoder
//! wraps the logical line in an ACARS-compatible application frame:
//!
//! ```text
//! /<to>.<IMI>.<from> <payload><CRC>
//! ```
//!
//! `<IMI>` is the imbedded message identifier (CR1/CC1/AT1/DR1) and
//! `<CRC>` is the CRC-16/CCITT of everything between the leading `/` and
//! the CRC itself, as four uppercase hex digits. The envelope is
//! transparent to the message model: the decoder strips it, checks the
//! CRC, and hands the payload to the ordinary line decoder.

use cpdlc_types::message::Imi;
use thiserror::Error;

/// CRC-16/CCITT-FALSE: polynomial 0x1021, initial value 0xFFFF.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xffff;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum EnvelopeError {
    #[error("Not an ARINC 622 frame")]
    NotAFrame,
    #[error("Malformed envelope header")]
    BadHeader,
    #[error("Unknown imbedded message identifier")]
    BadImi,
    #[error("CRC mismatch")]
    BadCrc,
}

/// Wraps an encoded line (without trailing newline) in an envelope.
pub fn wrap(payload: &str, imi: Imi, from: &str, to: &str) -> String {
    let body = format!("/{}.{}.{} {}", to, imi.token(), from, payload);
    let crc = crc16(&body.as_bytes()[1..]);
    format!("{}{:04X}", body, crc)
}

/// Strips an envelope, returning the payload and the IMI.
pub fn unwrap(line: &str) -> Result<(&str, Imi), EnvelopeError> {
    let body = line.strip_prefix('/').ok_or(EnvelopeError::NotAFrame)?;
    if body.len() < 4 || !body.is_ascii() {
        return Err(EnvelopeError::BadHeader);
    }
    let (content, crc_hex) = body.split_at(body.len() - 4);
    let crc = u16::from_str_radix(crc_hex, 16).map_err(|_| EnvelopeError::BadCrc)?;
    if crc != crc16(content.as_bytes()) {
        return Err(EnvelopeError::BadCrc);
    }

    let (header, payload) = content.split_once(' ').ok_or(EnvelopeError::BadHeader)?;
    let mut fields = header.split('.');
    let (_to, imi, _from) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(to), Some(imi), Some(from), None) => (to, imi, from),
        _ => return Err(EnvelopeError::BadHeader),
    };
    let imi = Imi::from_token(imi).ok_or(EnvelopeError::BadImi)?;

    Ok((payload, imi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc16_known_answer() {
        // CRC-16/CCITT-FALSE of "123456789".
        assert_eq!(crc16(b"123456789"), 0x29b1);
        assert_eq!(crc16(b""), 0xffff);
    }

    #[test]
    fn test_wrap_unwrap() {
        let payload = "PKT=CPDLC/FROM=N12345/TO=KZOA/MIN=1/DATA=DM6 FL350";
        let framed = wrap(payload, Imi::AtcComm, "N12345", "KZOA");
        assert!(framed.starts_with("/KZOA.AT1.N12345 "));
        let (unwrapped, imi) = unwrap(&framed).unwrap();
        assert_eq!(unwrapped, payload);
        assert_eq!(imi, Imi::AtcComm);
    }

    #[test]
    fn test_unwrap_detects_corruption() {
        let framed = wrap("PKT=PING", Imi::ConnRequest, "N1", "KZOA");
        let mut corrupted = framed.clone();
        // Flip one payload byte; the CRC must catch it.
        let at = framed.find("PING").unwrap();
        corrupted.replace_range(at..at + 1, "Q");
        assert_eq!(unwrap(&corrupted), Err(EnvelopeError::BadCrc));
    }

    #[test]
    fn test_unwrap_rejects_junk() {
        assert_eq!(unwrap("PKT=PING"), Err(EnvelopeError::NotAFrame));
        assert_eq!(unwrap("/x"), Err(EnvelopeError::BadHeader));
    }
}
