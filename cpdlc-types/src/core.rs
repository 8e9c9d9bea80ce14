//! Core identifier types.
//!
//! Small validated scalars used across the message model: callsigns and
//! facility identifiers, transponder codes, ATIS letters, persons-on-board
//! counts.

use std::{fmt, str::FromStr};

use crate::error::ValidationError;

/// Is `byte` acceptable inside a callsign or fix identifier?
///
/// Identifiers travel as single wire tokens, so the separator bytes of the
/// wire grammar (`/`, `=`, `%`, space) and anything non-printable are
/// rejected at construction time.
pub fn is_ident_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte == b'.'
}

fn verify_ident(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty());
    }
    if value.len() > max {
        return Err(ValidationError::too_long(max));
    }
    if let Some(at) = value.bytes().position(|b| !is_ident_char(b)) {
        return Err(ValidationError::invalid_byte(value.as_bytes()[at], at));
    }
    Ok(())
}

/// An aircraft callsign or ground facility identifier (1–16 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallSign(String);

impl CallSign {
    pub const MAX_LEN: usize = 16;

    pub fn verify(value: &str) -> Result<(), ValidationError> {
        verify_ident(value, Self::MAX_LEN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for CallSign {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::verify(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for CallSign {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::verify(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for CallSign {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A four-letter ICAO facility designator, e.g. `KZOA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IcaoId([u8; 4]);

impl IcaoId {
    pub fn verify(value: &str) -> Result<(), ValidationError> {
        if value.len() != 4 {
            return Err(ValidationError::malformed("ICAO identifier"));
        }
        if let Some(at) = value.bytes().position(|b| !b.is_ascii_uppercase()) {
            return Err(ValidationError::invalid_byte(value.as_bytes()[at], at));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        // Construction guarantees ASCII.
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl TryFrom<&str> for IcaoId {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::verify(value)?;
        let mut id = [0u8; 4];
        id.copy_from_slice(value.as_bytes());
        Ok(Self(id))
    }
}

impl FromStr for IcaoId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for IcaoId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transponder code: four octal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Squawk(u16);

impl Squawk {
    /// Accepts the numeric value, e.g. `0o2000`.
    pub fn new(code: u16) -> Result<Self, ValidationError> {
        if code > 0o7777 {
            return Err(ValidationError::out_of_range("squawk code"));
        }
        Ok(Self(code))
    }

    pub fn code(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Squawk {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl FromStr for Squawk {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 {
            return Err(ValidationError::malformed("squawk code"));
        }
        let code =
            u16::from_str_radix(s, 8).map_err(|_| ValidationError::malformed("squawk code"))?;
        Self::new(code)
    }
}

/// A single ATIS information letter, `A`..=`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtisCode(char);

impl AtisCode {
    pub fn new(letter: char) -> Result<Self, ValidationError> {
        if !letter.is_ascii_uppercase() {
            return Err(ValidationError::malformed("ATIS code"));
        }
        Ok(Self(letter))
    }

    pub fn letter(self) -> char {
        self.0
    }
}

impl fmt::Display for AtisCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AtisCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c),
            _ => Err(ValidationError::malformed("ATIS code")),
        }
    }
}

/// Persons on board, 1–999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Persons(u16);

impl Persons {
    pub fn new(count: u16) -> Result<Self, ValidationError> {
        if count == 0 || count > 999 {
            return Err(ValidationError::out_of_range("persons on board"));
        }
        Ok(Self(count))
    }

    pub fn count(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Persons {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Persons {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s
            .parse::<u16>()
            .map_err(|_| ValidationError::malformed("persons on board"))?;
        Self::new(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callsign() {
        assert!(CallSign::try_from("N12345").is_ok());
        assert!(CallSign::try_from("KZOA").is_ok());
        assert!(CallSign::try_from("").is_err());
        assert!(CallSign::try_from("WAY-TOO-LONG-CALLSIGN").is_err());
        assert!(CallSign::try_from("A B").is_err());
        assert!(CallSign::try_from("A/B").is_err());
    }

    #[test]
    fn test_squawk() {
        let sq = Squawk::new(0o2000).unwrap();
        assert_eq!(sq.to_string(), "2000");
        assert_eq!("2000".parse::<Squawk>().unwrap(), sq);
        assert!("8000".parse::<Squawk>().is_err());
        assert!("200".parse::<Squawk>().is_err());
        assert!("20000".parse::<Squawk>().is_err());
    }

    #[test]
    fn test_icao_id() {
        assert_eq!("KZAK".parse::<IcaoId>().unwrap().as_str(), "KZAK");
        assert!("KZA".parse::<IcaoId>().is_err());
        assert!("kzak".parse::<IcaoId>().is_err());
    }

    #[test]
    fn test_atis_persons() {
        assert_eq!("C".parse::<AtisCode>().unwrap().letter(), 'C');
        assert!("c".parse::<AtisCode>().is_err());
        assert!("CC".parse::<AtisCode>().is_err());
        assert_eq!("250".parse::<Persons>().unwrap().count(), 250);
        assert!("0".parse::<Persons>().is_err());
        assert!("1000".parse::<Persons>().is_err());
    }
}
