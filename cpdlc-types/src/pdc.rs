//! The pre-departure clearance argument (UM73).
//!
//! Rendered as a space-separated record occupying the tail of its
//! segment:
//!
//! ```text
//! <acf_id> [TYPE <acf_type>] DEP HHMMZ RTE <route...> [ALT <alt>]
//! FREQ <mhz> SQUAWK <code> REV <n>
//! ```

use std::{fmt, str::FromStr};

use crate::{
    arg::{fmt_frequency, parse_frequency, Altitude, Time},
    core::{is_ident_char, Squawk},
    error::ValidationError,
    route::Route,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Pdc {
    pub acf_id: String,
    pub acf_type: Option<String>,
    pub time_dep: Time,
    pub route: Route,
    pub alt_restr: Option<Altitude>,
    /// Departure frequency, MHz.
    pub freq: f64,
    pub squawk: Squawk,
    pub revision: u32,
}

impl Pdc {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        acf_id: &str,
        acf_type: Option<&str>,
        time_dep: Time,
        route: Route,
        alt_restr: Option<Altitude>,
        freq: f64,
        squawk: Squawk,
        revision: u32,
    ) -> Result<Self, ValidationError> {
        verify_acf_ident(acf_id)?;
        if let Some(ty) = acf_type {
            verify_acf_ident(ty)?;
        }
        if time_dep.is_now() {
            return Err(ValidationError::malformed("departure time"));
        }
        Ok(Self {
            acf_id: acf_id.to_owned(),
            acf_type: acf_type.map(str::to_owned),
            time_dep,
            route,
            alt_restr,
            freq,
            squawk,
            revision,
        })
    }
}

fn verify_acf_ident(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty());
    }
    if value.len() > 8 {
        return Err(ValidationError::too_long(8));
    }
    if let Some(at) = value.bytes().position(|b| !is_ident_char(b)) {
        return Err(ValidationError::invalid_byte(value.as_bytes()[at], at));
    }
    Ok(())
}

fn fmt_hhmmz(time: Time) -> String {
    format!("{:02}{:02}Z", time.hrs.max(0), time.mins.max(0))
}

fn parse_hhmmz(s: &str) -> Result<Time, ValidationError> {
    let malformed = || ValidationError::malformed("departure time");
    let digits = s.strip_suffix('Z').ok_or_else(malformed)?;
    if digits.len() != 4 {
        return Err(malformed());
    }
    let hrs = digits[..2].parse::<u8>().map_err(|_| malformed())?;
    let mins = digits[2..].parse::<u8>().map_err(|_| malformed())?;
    Time::new(hrs, mins)
}

impl fmt::Display for Pdc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.acf_id)?;
        if let Some(ty) = &self.acf_type {
            write!(f, " TYPE {}", ty)?;
        }
        write!(f, " DEP {} RTE {}", fmt_hhmmz(self.time_dep), self.route)?;
        if let Some(alt) = &self.alt_restr {
            write!(f, " ALT {}", alt)?;
        }
        write!(
            f,
            " FREQ {} SQUAWK {} REV {}",
            fmt_frequency(self.freq),
            self.squawk,
            self.revision
        )
    }
}

impl FromStr for Pdc {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("pre-departure clearance");
        let mut tokens = s.split_whitespace().peekable();

        let acf_id = tokens.next().ok_or_else(malformed)?.to_owned();
        let acf_type = if tokens.peek() == Some(&"TYPE") {
            tokens.next();
            Some(tokens.next().ok_or_else(malformed)?.to_owned())
        } else {
            None
        };

        if tokens.next() != Some("DEP") {
            return Err(malformed());
        }
        let time_dep = parse_hhmmz(tokens.next().ok_or_else(malformed)?)?;

        if tokens.next() != Some("RTE") {
            return Err(malformed());
        }
        let mut route_tokens = Vec::new();
        while let Some(&token) = tokens.peek() {
            if token == "ALT" || token == "FREQ" {
                break;
            }
            route_tokens.push(tokens.next().unwrap());
        }
        let route = route_tokens.join(" ").parse::<Route>()?;

        let alt_restr = if tokens.peek() == Some(&"ALT") {
            tokens.next();
            Some(tokens.next().ok_or_else(malformed)?.parse::<Altitude>()?)
        } else {
            None
        };

        if tokens.next() != Some("FREQ") {
            return Err(malformed());
        }
        let freq = parse_frequency(tokens.next().ok_or_else(malformed)?)?;

        if tokens.next() != Some("SQUAWK") {
            return Err(malformed());
        }
        let squawk = tokens.next().ok_or_else(malformed)?.parse::<Squawk>()?;

        if tokens.next() != Some("REV") {
            return Err(malformed());
        }
        let revision = tokens
            .next()
            .ok_or_else(malformed)?
            .parse::<u32>()
            .map_err(|_| malformed())?;
        if tokens.next().is_some() {
            return Err(malformed());
        }

        Pdc::new(
            &acf_id,
            acf_type.as_deref(),
            time_dep,
            route,
            alt_restr,
            freq,
            squawk,
            revision,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdc_roundtrip() {
        let text = "N12345 TYPE B738 DEP 1430Z RTE KSFO OFFSH9 SXC KLAX \
                    ALT FL190 FREQ 121.650 SQUAWK 2045 REV 1";
        let pdc = text.parse::<Pdc>().unwrap();
        assert_eq!(pdc.to_string(), text);
        assert_eq!(pdc.acf_type.as_deref(), Some("B738"));
        assert_eq!(pdc.alt_restr, Some(Altitude::flight_level(190)));
    }

    #[test]
    fn test_pdc_minimal_roundtrip() {
        let text = "N12345 DEP 1430Z RTE KSFO KLAX FREQ 121.650 SQUAWK 2045 REV 2";
        let pdc = text.parse::<Pdc>().unwrap();
        assert_eq!(pdc.to_string(), text);
        assert!(pdc.acf_type.is_none());
        assert!(pdc.alt_restr.is_none());
    }

    #[test]
    fn test_pdc_malformed() {
        assert!("N12345 RTE KSFO".parse::<Pdc>().is_err());
        assert!("N12345 DEP 1430Z RTE FREQ 121.650 SQUAWK 2045 REV 2"
            .parse::<Pdc>()
            .is_err());
    }
}
