//! The DM48 position report argument.
//!
//! A position report is a space-separated concatenation of sub-fields in a
//! fixed order:
//!
//! ```text
//! HHMMZ <pos> <alt> [CRZ CLB|CLB|DES <alt>] <spd> [OFFSET Ldist|Rdist]
//! [PREV <name> HHMMZ <alt> <spd>] [NEXT <name> HHMMZ] [NEXT+1 <name>]
//! [DEST <name> ETA HHMMZ] [WIND dddsssKT] [OAT ±tt]
//! ```

use std::{fmt, str::FromStr};

use crate::{
    arg::{Altitude, DistanceOffset, Speed, Time},
    error::ValidationError,
    position::Position,
};

/// Climb state at report time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertMode {
    /// `CRZ CLB <alt>` - cruise climbing to.
    CruiseClimb(Altitude),
    /// `CLB <alt>` - climbing to.
    Climb(Altitude),
    /// `DES <alt>` - descending to.
    Descend(Altitude),
}

/// `PREV <name> HHMMZ <alt> <spd>`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrevFix {
    pub name: String,
    pub time: Time,
    pub alt: Altitude,
    pub spd: Speed,
}

/// `NEXT <name> HHMMZ`.
#[derive(Debug, Clone, PartialEq)]
pub struct NextFix {
    pub name: String,
    pub eta: Time,
}

/// `DEST <name> ETA HHMMZ`.
#[derive(Debug, Clone, PartialEq)]
pub struct DestEta {
    pub name: String,
    pub eta: Time,
}

/// `WIND dddsssKT`, e.g. `270045KT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wind {
    /// Degrees, 1-360.
    pub dir: u16,
    /// Knots.
    pub spd: u16,
}

impl Wind {
    pub fn new(dir: u16, spd: u16) -> Result<Self, ValidationError> {
        if dir == 0 || dir > 360 || spd > 999 {
            return Err(ValidationError::out_of_range("wind"));
        }
        Ok(Self { dir, spd })
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:03}{:03}KT", self.dir, self.spd)
    }
}

impl FromStr for Wind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("wind");
        let digits = s.strip_suffix("KT").ok_or_else(malformed)?;
        if digits.len() != 6 {
            return Err(malformed());
        }
        let dir = digits[..3].parse::<u16>().map_err(|_| malformed())?;
        let spd = digits[3..].parse::<u16>().map_err(|_| malformed())?;
        Wind::new(dir, spd)
    }
}

fn fmt_hhmmz(time: Time) -> String {
    format!("{:02}{:02}Z", time.hrs.max(0), time.mins.max(0))
}

fn parse_hhmmz(s: &str) -> Result<Time, ValidationError> {
    let malformed = || ValidationError::malformed("report time");
    let digits = s.strip_suffix('Z').ok_or_else(malformed)?;
    if digits.len() != 4 {
        return Err(malformed());
    }
    let hrs = digits[..2].parse::<u8>().map_err(|_| malformed())?;
    let mins = digits[2..].parse::<u8>().map_err(|_| malformed())?;
    Time::new(hrs, mins)
}

/// A complete position report.
#[derive(Debug, Clone, PartialEq)]
pub struct PosReport {
    pub time: Time,
    pub pos: Position,
    pub alt: Altitude,
    pub vert: Option<VertMode>,
    pub spd: Speed,
    pub offset: Option<DistanceOffset>,
    pub prev: Option<PrevFix>,
    pub next: Option<NextFix>,
    pub next_next: Option<String>,
    pub dest: Option<DestEta>,
    pub wind: Option<Wind>,
    /// Outside air temperature, degrees Celsius.
    pub oat: Option<i16>,
}

impl PosReport {
    /// A report with only the required fields; optional fields default to
    /// absent and can be filled in afterwards.
    pub fn new(time: Time, pos: Position, alt: Altitude, spd: Speed) -> Self {
        Self {
            time,
            pos,
            alt,
            vert: None,
            spd,
            offset: None,
            prev: None,
            next: None,
            next_next: None,
            dest: None,
            wind: None,
            oat: None,
        }
    }
}

impl fmt::Display for PosReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", fmt_hhmmz(self.time), self.pos, self.alt)?;
        match &self.vert {
            Some(VertMode::CruiseClimb(alt)) => write!(f, " CRZ CLB {}", alt)?,
            Some(VertMode::Climb(alt)) => write!(f, " CLB {}", alt)?,
            Some(VertMode::Descend(alt)) => write!(f, " DES {}", alt)?,
            None => {}
        }
        write!(f, " {}", self.spd)?;
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {}", offset)?;
        }
        if let Some(prev) = &self.prev {
            write!(
                f,
                " PREV {} {} {} {}",
                prev.name,
                fmt_hhmmz(prev.time),
                prev.alt,
                prev.spd
            )?;
        }
        if let Some(next) = &self.next {
            write!(f, " NEXT {} {}", next.name, fmt_hhmmz(next.eta))?;
        }
        if let Some(name) = &self.next_next {
            write!(f, " NEXT+1 {}", name)?;
        }
        if let Some(dest) = &self.dest {
            write!(f, " DEST {} ETA {}", dest.name, fmt_hhmmz(dest.eta))?;
        }
        if let Some(wind) = &self.wind {
            write!(f, " WIND {}", wind)?;
        }
        if let Some(oat) = self.oat {
            write!(f, " OAT {:+}", oat)?;
        }
        Ok(())
    }
}

impl FromStr for PosReport {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("position report");
        let mut tokens = s.split_whitespace().peekable();
        fn next_tok<'a>(
            tokens: &mut std::iter::Peekable<std::str::SplitWhitespace<'a>>,
        ) -> Result<&'a str, ValidationError> {
            tokens
                .next()
                .ok_or_else(|| ValidationError::malformed("position report"))
        }

        let time = parse_hhmmz(next_tok(&mut tokens)?)?;
        let pos = next_tok(&mut tokens)?.parse::<Position>()?;
        let alt = next_tok(&mut tokens)?.parse::<Altitude>()?;

        let vert = match tokens.peek().copied() {
            Some("CRZ") => {
                tokens.next();
                if tokens.next() != Some("CLB") {
                    return Err(malformed());
                }
                Some(VertMode::CruiseClimb(next_tok(&mut tokens)?.parse()?))
            }
            Some("CLB") => {
                tokens.next();
                Some(VertMode::Climb(next_tok(&mut tokens)?.parse()?))
            }
            Some("DES") => {
                tokens.next();
                Some(VertMode::Descend(next_tok(&mut tokens)?.parse()?))
            }
            _ => None,
        };

        let spd = next_tok(&mut tokens)?.parse::<Speed>()?;
        let mut report = PosReport::new(time, pos, alt, spd);
        report.vert = vert;

        while let Some(keyword) = tokens.next() {
            match keyword {
                "OFFSET" => {
                    report.offset = Some(next_tok(&mut tokens)?.parse()?);
                }
                "PREV" => {
                    let name = next_tok(&mut tokens)?.to_owned();
                    let time = parse_hhmmz(next_tok(&mut tokens)?)?;
                    let alt = next_tok(&mut tokens)?.parse()?;
                    let spd = next_tok(&mut tokens)?.parse()?;
                    report.prev = Some(PrevFix {
                        name,
                        time,
                        alt,
                        spd,
                    });
                }
                "NEXT" => {
                    let name = next_tok(&mut tokens)?.to_owned();
                    let eta = parse_hhmmz(next_tok(&mut tokens)?)?;
                    report.next = Some(NextFix { name, eta });
                }
                "NEXT+1" => {
                    report.next_next = Some(next_tok(&mut tokens)?.to_owned());
                }
                "DEST" => {
                    let name = next_tok(&mut tokens)?.to_owned();
                    if tokens.next() != Some("ETA") {
                        return Err(malformed());
                    }
                    let eta = parse_hhmmz(next_tok(&mut tokens)?)?;
                    report.dest = Some(DestEta { name, eta });
                }
                "WIND" => {
                    report.wind = Some(next_tok(&mut tokens)?.parse()?);
                }
                "OAT" => {
                    let oat = next_tok(&mut tokens)?
                        .parse::<i16>()
                        .map_err(|_| malformed())?;
                    if !(-99..=99).contains(&oat) {
                        return Err(ValidationError::out_of_range("temperature"));
                    }
                    report.oat = Some(oat);
                }
                _ => return Err(malformed()),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_report_roundtrip() {
        let text = "1820Z ALCOA FL350 M820";
        let report = text.parse::<PosReport>().unwrap();
        assert_eq!(report.to_string(), text);
        assert!(report.vert.is_none());
        assert!(report.wind.is_none());
    }

    #[test]
    fn test_full_report_roundtrip() {
        let text = "1820Z ALCOA FL330 CLB FL350 M820 OFFSET L5.0 \
                    PREV BEBOP 1805Z FL310 M805 NEXT SKUNK 1835Z NEXT+1 HADLY \
                    DEST KSFO ETA 1950Z WIND 270045KT OAT -42";
        let report = text.parse::<PosReport>().unwrap();
        assert_eq!(report.to_string(), text);
        assert_eq!(report.vert, Some(VertMode::Climb(Altitude::flight_level(350))));
        assert_eq!(report.wind, Some(Wind::new(270, 45).unwrap()));
        assert_eq!(report.oat, Some(-42));
    }

    #[test]
    fn test_crz_clb_form() {
        let text = "0100Z OTTTO FL350 CRZ CLB FL390 M840";
        let report = text.parse::<PosReport>().unwrap();
        assert_eq!(report.to_string(), text);
        assert!(matches!(report.vert, Some(VertMode::CruiseClimb(_))));
    }

    #[test]
    fn test_malformed_reports() {
        assert!("".parse::<PosReport>().is_err());
        assert!("1820Z ALCOA".parse::<PosReport>().is_err());
        assert!("1820Z ALCOA FL350 M820 BOGUS 1".parse::<PosReport>().is_err());
        assert!("2520Z ALCOA FL350 M820".parse::<PosReport>().is_err());
    }
}
