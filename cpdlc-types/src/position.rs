//! Position arguments.
//!
//! A position travels as a single wire token and can be a published fix, a
//! navaid, an ICAO airport, a compact latitude/longitude, or a
//! place/bearing/distance.

use std::{fmt, str::FromStr};

use crate::{core::is_ident_char, error::ValidationError};

/// A latitude/longitude pair.
///
/// The canonical text form is the compact `Nddmm.mmEdddmm.mm` notation
/// (hemisphere letter, degrees, decimal minutes). Minutes carry two decimal
/// places, so positions constructed from parsed text round-trip exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    /// Degrees north, negative south.
    pub lat: f64,
    /// Degrees east, negative west.
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::out_of_range("latitude/longitude"));
        }
        Ok(Self { lat, lon })
    }

    /// Builds a lat/lon from whole degrees and decimal minutes, the
    /// granularity of the wire form.
    pub fn from_deg_min(
        north: bool,
        lat_deg: u8,
        lat_min: f64,
        east: bool,
        lon_deg: u8,
        lon_min: f64,
    ) -> Result<Self, ValidationError> {
        if lat_deg > 90 || lon_deg > 180 || !(0.0..60.0).contains(&lat_min)
            || !(0.0..60.0).contains(&lon_min)
        {
            return Err(ValidationError::out_of_range("latitude/longitude"));
        }
        let lat = (f64::from(lat_deg) + lat_min / 60.0) * if north { 1.0 } else { -1.0 };
        let lon = (f64::from(lon_deg) + lon_min / 60.0) * if east { 1.0 } else { -1.0 };
        Self::new(lat, lon)
    }
}

fn split_deg_min(value: f64) -> (u32, f64) {
    let abs = value.abs();
    let deg = abs.trunc() as u32;
    (deg, (abs - abs.trunc()) * 60.0)
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (lat_deg, lat_min) = split_deg_min(self.lat);
        let (lon_deg, lon_min) = split_deg_min(self.lon);
        write!(
            f,
            "{}{:02}{:05.2}{}{:03}{:05.2}",
            if self.lat >= 0.0 { 'N' } else { 'S' },
            lat_deg,
            lat_min,
            if self.lon >= 0.0 { 'E' } else { 'W' },
            lon_deg,
            lon_min,
        )
    }
}

fn parse_deg_min(s: &str, deg_digits: usize) -> Result<(u8, f64), ValidationError> {
    let malformed = || ValidationError::malformed("latitude/longitude");
    if s.len() < deg_digits + 2 || !s.is_char_boundary(deg_digits) {
        return Err(malformed());
    }
    let (deg, min) = s.split_at(deg_digits);
    let deg = deg.parse::<u8>().map_err(|_| malformed())?;
    let min = min.parse::<f64>().map_err(|_| malformed())?;
    Ok((deg, min))
}

impl FromStr for LatLon {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("latitude/longitude");
        if !s.is_ascii() {
            return Err(malformed());
        }
        let north = match s.as_bytes().first() {
            Some(b'N') => true,
            Some(b'S') => false,
            _ => return Err(malformed()),
        };
        let rest = &s[1..];
        let lon_at = rest.find(['E', 'W']).ok_or_else(malformed)?;
        let east = rest.as_bytes()[lon_at] == b'E';
        let (lat_deg, lat_min) = parse_deg_min(&rest[..lon_at], 2)?;
        let (lon_deg, lon_min) = parse_deg_min(&rest[lon_at + 1..], 3)?;
        Self::from_deg_min(north, lat_deg, lat_min, east, lon_deg, lon_min)
    }
}

/// Place/bearing/distance: `FIX/bbb/dd.d`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pbd {
    pub fixname: String,
    /// Magnetic bearing from the fix, degrees 1–360.
    pub degrees: u16,
    pub dist_nm: f64,
}

impl Pbd {
    pub fn new(fixname: &str, degrees: u16, dist_nm: f64) -> Result<Self, ValidationError> {
        verify_fixname(fixname)?;
        if degrees == 0 || degrees > 360 {
            return Err(ValidationError::out_of_range("bearing"));
        }
        if !(0.0..=999.9).contains(&dist_nm) {
            return Err(ValidationError::out_of_range("distance"));
        }
        Ok(Self {
            fixname: fixname.to_owned(),
            degrees,
            dist_nm,
        })
    }
}

impl fmt::Display for Pbd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{:03}/{:.1}", self.fixname, self.degrees, self.dist_nm)
    }
}

impl FromStr for Pbd {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("place/bearing/distance");
        let mut parts = s.split('/');
        let (fix, brg, dist) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(f), Some(b), Some(d), None) => (f, b, d),
            _ => return Err(malformed()),
        };
        let degrees = brg.parse::<u16>().map_err(|_| malformed())?;
        let dist_nm = dist.parse::<f64>().map_err(|_| malformed())?;
        Pbd::new(fix, degrees, dist_nm)
    }
}

fn verify_fixname(value: &str) -> Result<(), ValidationError> {
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

/// A position argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    /// A published waypoint (5-letter fixes and anything unclassifiable).
    Fixname(String),
    /// A 1–3 letter navaid identifier.
    Navaid(String),
    /// A 4-letter ICAO airport.
    Airport(String),
    LatLon(LatLon),
    Pbd(Pbd),
}

impl Position {
    /// Classifies a bare identifier the way the decoder does: four letters
    /// is an airport, one to three letters a navaid, anything else a fix.
    pub fn from_ident(ident: &str) -> Result<Self, ValidationError> {
        verify_fixname(ident)?;
        let alpha = ident.bytes().all(|b| b.is_ascii_uppercase());
        Ok(match ident.len() {
            4 if alpha => Position::Airport(ident.to_owned()),
            1..=3 if alpha => Position::Navaid(ident.to_owned()),
            _ => Position::Fixname(ident.to_owned()),
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Position::Fixname(name) | Position::Navaid(name) | Position::Airport(name) => {
                f.write_str(name)
            }
            Position::LatLon(ll) => ll.fmt(f),
            Position::Pbd(pbd) => pbd.fmt(f),
        }
    }
}

impl FromStr for Position {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ValidationError::empty());
        }
        if s.contains('/') {
            return Ok(Position::Pbd(s.parse()?));
        }
        if (s.starts_with('N') || s.starts_with('S'))
            && s.len() >= 10
            && s.as_bytes()[1].is_ascii_digit()
        {
            if let Ok(ll) = s.parse::<LatLon>() {
                return Ok(Position::LatLon(ll));
            }
        }
        Position::from_ident(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lon_roundtrip() {
        let ll = LatLon::from_deg_min(true, 37, 36.5, false, 122, 23.1).unwrap();
        assert_eq!(ll.to_string(), "N3736.50W12223.10");
        assert_eq!("N3736.50W12223.10".parse::<LatLon>().unwrap(), ll);

        let ll = LatLon::from_deg_min(false, 9, 2.25, true, 3, 0.0).unwrap();
        assert_eq!(ll.to_string(), "S0902.25E00300.00");
        assert_eq!(ll.to_string().parse::<LatLon>().unwrap(), ll);
    }

    #[test]
    fn test_lat_lon_malformed() {
        assert!("3736.50W12223.10".parse::<LatLon>().is_err());
        assert!("N3736.50".parse::<LatLon>().is_err());
        assert!("NXX36.50W12223.10".parse::<LatLon>().is_err());
    }

    #[test]
    fn test_pbd_roundtrip() {
        let pbd = Pbd::new("SFO", 123, 10.5).unwrap();
        assert_eq!(pbd.to_string(), "SFO/123/10.5");
        assert_eq!("SFO/123/10.5".parse::<Pbd>().unwrap(), pbd);
        assert!("SFO/361/10.5".parse::<Pbd>().is_err());
        assert!("SFO/123".parse::<Pbd>().is_err());
    }

    #[test]
    fn test_position_classification() {
        assert!(matches!(
            "ALCOA".parse::<Position>().unwrap(),
            Position::Fixname(_)
        ));
        assert!(matches!(
            "KSFO".parse::<Position>().unwrap(),
            Position::Airport(_)
        ));
        assert!(matches!(
            "OAK".parse::<Position>().unwrap(),
            Position::Navaid(_)
        ));
        assert!(matches!(
            "N3736.50W12223.10".parse::<Position>().unwrap(),
            Position::LatLon(_)
        ));
        assert!(matches!(
            "SFO/123/10.5".parse::<Position>().unwrap(),
            Position::Pbd(_)
        ));
    }

    #[test]
    fn test_position_display_matches_parse() {
        for text in ["ALCOA", "KSFO", "OAK", "N3736.50W12223.10", "SFO/123/10.5"] {
            let pos = text.parse::<Position>().unwrap();
            assert_eq!(pos.to_string(), text);
        }
    }
}
