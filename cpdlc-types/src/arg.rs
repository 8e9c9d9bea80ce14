//! Argument value model.
//!
//! One variant per CPDLC argument type. Every value knows its canonical
//! printable form via `Display`, and parses back from that form via
//! `FromStr`; the wire codec uses both directions.

use std::{fmt, str::FromStr};

use crate::{
    core::{is_ident_char, AtisCode, IcaoId, Persons, Squawk},
    error::ValidationError,
    pdc::Pdc,
    position::Position,
    posreport::PosReport,
    route::Route,
};

/// An altitude: flight level (`FL350`), raw feet (`4000`), with an optional
/// metric marker (`FL110M`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Altitude {
    /// Flight level? If so, the printable form is `alt / 100`.
    pub fl: bool,
    /// Metric altitude, marked with a trailing `M`.
    pub met: bool,
    /// Feet.
    pub alt: i32,
}

impl Altitude {
    pub fn feet(alt: i32) -> Self {
        Self {
            fl: false,
            met: false,
            alt,
        }
    }

    pub fn flight_level(fl: i32) -> Self {
        Self {
            fl: true,
            met: false,
            alt: fl * 100,
        }
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.fl {
            write!(f, "FL{}", self.alt / 100)?;
        } else {
            write!(f, "{}", self.alt)?;
        }
        if self.met {
            write!(f, "M")?;
        }
        Ok(())
    }
}

impl FromStr for Altitude {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("altitude");
        let (s, met) = match s.strip_suffix('M') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if let Some(fl) = s.strip_prefix("FL") {
            let fl = fl.parse::<i32>().map_err(|_| malformed())?;
            if !(0..=999).contains(&fl) {
                return Err(ValidationError::out_of_range("flight level"));
            }
            Ok(Self {
                fl: true,
                met,
                alt: fl * 100,
            })
        } else {
            let alt = s.parse::<i32>().map_err(|_| malformed())?;
            if !(-2000..=100_000).contains(&alt) {
                return Err(ValidationError::out_of_range("altitude"));
            }
            Ok(Self {
                fl: false,
                met,
                alt,
            })
        }
    }
}

/// A speed: Mach in thousandths (`M820`) or knots (`450`), with optional
/// true-airspeed (`T`) or ground-speed (`G`) markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Speed {
    pub mach: bool,
    /// True airspeed marker. Meaningless for Mach.
    pub tru: bool,
    /// Ground speed marker. Mutually exclusive with `tru`.
    pub gnd: bool,
    /// Knots, or 1/1000ths of Mach.
    pub spd: u32,
}

impl Speed {
    pub fn knots(spd: u32) -> Self {
        Self {
            mach: false,
            tru: false,
            gnd: false,
            spd,
        }
    }

    pub fn mach(thousandths: u32) -> Self {
        Self {
            mach: true,
            tru: false,
            gnd: false,
            spd: thousandths,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.mach {
            write!(f, "M{:03}", self.spd)
        } else {
            write!(f, "{}", self.spd)?;
            if self.tru {
                write!(f, "T")?;
            } else if self.gnd {
                write!(f, "G")?;
            }
            Ok(())
        }
    }
}

impl FromStr for Speed {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("speed");
        if let Some(mach) = s.strip_prefix('M') {
            let spd = mach.parse::<u32>().map_err(|_| malformed())?;
            if spd >= 10_000 {
                return Err(ValidationError::out_of_range("mach number"));
            }
            return Ok(Speed::mach(spd));
        }
        let (s, tru, gnd) = match s.strip_suffix('T') {
            Some(rest) => (rest, true, false),
            None => match s.strip_suffix('G') {
                Some(rest) => (rest, false, true),
                None => (s, false, false),
            },
        };
        let spd = s.parse::<u32>().map_err(|_| malformed())?;
        if spd > 2000 {
            return Err(ValidationError::out_of_range("speed"));
        }
        Ok(Self {
            mach: false,
            tru,
            gnd,
            spd,
        })
    }
}

/// A time of day, `HH:MM`, or the `NOW` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    /// Negative hours mean `NOW`.
    pub hrs: i8,
    pub mins: i8,
}

impl Time {
    pub const NOW: Time = Time { hrs: -1, mins: -1 };

    pub fn new(hrs: u8, mins: u8) -> Result<Self, ValidationError> {
        if hrs > 23 || mins > 59 {
            return Err(ValidationError::out_of_range("time"));
        }
        Ok(Self {
            hrs: hrs as i8,
            mins: mins as i8,
        })
    }

    pub fn is_now(self) -> bool {
        self.hrs < 0
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_now() {
            f.write_str("NOW")
        } else {
            write!(f, "{:02}:{:02}", self.hrs, self.mins)
        }
    }
}

impl FromStr for Time {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "NOW" {
            return Ok(Time::NOW);
        }
        let malformed = || ValidationError::malformed("time");
        let (h, m) = s.split_once(':').ok_or_else(malformed)?;
        let hrs = h.parse::<u8>().map_err(|_| malformed())?;
        let mins = m.parse::<u8>().map_err(|_| malformed())?;
        Time::new(hrs, mins)
    }
}

/// A duration in whole minutes, at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeDur(u32);

impl TimeDur {
    pub fn new(mins: u32) -> Result<Self, ValidationError> {
        if mins == 0 {
            return Err(ValidationError::out_of_range("duration"));
        }
        Ok(Self(mins))
    }

    pub fn mins(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TimeDur {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TimeDur {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mins = s
            .parse::<u32>()
            .map_err(|_| ValidationError::malformed("duration"))?;
        Self::new(mins)
    }
}

/// A turn or offset direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Either,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    fn token(self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Either => "EITHER",
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "L" => Direction::Left,
            "R" => Direction::Right,
            "EITHER" => Direction::Either,
            "N" => Direction::North,
            "S" => Direction::South,
            "E" => Direction::East,
            "W" => Direction::West,
            "NE" => Direction::NorthEast,
            "NW" => Direction::NorthWest,
            "SE" => Direction::SouthEast,
            "SW" => Direction::SouthWest,
            _ => return Err(ValidationError::malformed("direction")),
        })
    }
}

/// A lateral offset from route: direction letter plus nautical miles,
/// `L12.5` / `R3.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceOffset {
    /// `Left` or `Right` only.
    pub dir: Direction,
    pub dist_nm: f64,
}

impl DistanceOffset {
    pub fn new(dir: Direction, dist_nm: f64) -> Result<Self, ValidationError> {
        if !matches!(dir, Direction::Left | Direction::Right) {
            return Err(ValidationError::malformed("offset direction"));
        }
        if !(0.0..=999.9).contains(&dist_nm) {
            return Err(ValidationError::out_of_range("offset distance"));
        }
        Ok(Self { dir, dist_nm })
    }
}

impl fmt::Display for DistanceOffset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{:.1}", self.dir, self.dist_nm)
    }
}

impl FromStr for DistanceOffset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("distance offset");
        let dir = match s.as_bytes().first() {
            Some(b'L') => Direction::Left,
            Some(b'R') => Direction::Right,
            _ => return Err(malformed()),
        };
        let dist_nm = s[1..].parse::<f64>().map_err(|_| malformed())?;
        Self::new(dir, dist_nm)
    }
}

/// The literal `TO` / `FROM` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToFrom {
    To,
    From,
}

impl fmt::Display for ToFrom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ToFrom::To => "TO",
            ToFrom::From => "FROM",
        })
    }
}

impl FromStr for ToFrom {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TO" => Ok(ToFrom::To),
            "FROM" => Ok(ToFrom::From),
            _ => Err(ValidationError::malformed("to/from")),
        }
    }
}

/// A terminal procedure: `SID:OFFSH9.SXC`, `STAR:BDEGA3`, `APPCH:I28R`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Procedure {
    pub kind: ProcKind,
    pub name: String,
    pub trans: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcKind {
    Sid,
    Star,
    Appch,
}

impl ProcKind {
    fn token(self) -> &'static str {
        match self {
            ProcKind::Sid => "SID",
            ProcKind::Star => "STAR",
            ProcKind::Appch => "APPCH",
        }
    }
}

impl Procedure {
    pub fn new(kind: ProcKind, name: &str, trans: Option<&str>) -> Result<Self, ValidationError> {
        verify_short_ident(name)?;
        if let Some(trans) = trans {
            verify_short_ident(trans)?;
        }
        Ok(Self {
            kind,
            name: name.to_owned(),
            trans: trans.map(str::to_owned),
        })
    }
}

fn verify_short_ident(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty());
    }
    if value.len() > 8 {
        return Err(ValidationError::too_long(8));
    }
    if let Some(at) = value
        .bytes()
        .position(|b| !b.is_ascii_alphanumeric())
    {
        return Err(ValidationError::invalid_byte(value.as_bytes()[at], at));
    }
    Ok(())
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.kind.token(), self.name)?;
        if let Some(trans) = &self.trans {
            write!(f, ".{}", trans)?;
        }
        Ok(())
    }
}

impl FromStr for Procedure {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("procedure");
        let (kind, rest) = s.split_once(':').ok_or_else(malformed)?;
        let kind = match kind {
            "SID" => ProcKind::Sid,
            "STAR" => ProcKind::Star,
            "APPCH" => ProcKind::Appch,
            _ => return Err(malformed()),
        };
        match rest.split_once('.') {
            Some((name, trans)) => Procedure::new(kind, name, Some(trans)),
            None => Procedure::new(kind, rest, None),
        }
    }
}

/// The function suffix of an ATC facility name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityFunction {
    Center,
    Approach,
    Tower,
    Final,
    Ground,
    ClearanceDelivery,
    Departure,
    Control,
}

impl FacilityFunction {
    fn token(self) -> &'static str {
        match self {
            FacilityFunction::Center => "CTR",
            FacilityFunction::Approach => "APP",
            FacilityFunction::Tower => "TWR",
            FacilityFunction::Final => "FIN",
            FacilityFunction::Ground => "GND",
            FacilityFunction::ClearanceDelivery => "CLD",
            FacilityFunction::Departure => "DEP",
            FacilityFunction::Control => "CTL",
        }
    }
}

impl fmt::Display for FacilityFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for FacilityFunction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CTR" => FacilityFunction::Center,
            "APP" => FacilityFunction::Approach,
            "TWR" => FacilityFunction::Tower,
            "FIN" => FacilityFunction::Final,
            "GND" => FacilityFunction::Ground,
            "CLD" => FacilityFunction::ClearanceDelivery,
            "DEP" => FacilityFunction::Departure,
            "CTL" => FacilityFunction::Control,
            _ => return Err(ValidationError::malformed("facility function")),
        })
    }
}

/// An ATC facility: `KZOA:CTR` or `OAKLAND CENTER:CTR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IcaoName {
    pub facility: Facility,
    pub func: FacilityFunction,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Facility {
    Id(IcaoId),
    /// A plain-language facility name, up to 24 bytes, may contain spaces.
    Name(String),
}

impl IcaoName {
    pub fn from_id(id: IcaoId, func: FacilityFunction) -> Self {
        Self {
            facility: Facility::Id(id),
            func,
        }
    }

    pub fn from_name(name: &str, func: FacilityFunction) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::empty());
        }
        if name.len() > 24 {
            return Err(ValidationError::too_long(24));
        }
        if let Some(at) = name
            .bytes()
            .position(|b| !(is_ident_char(b) || b == b' '))
        {
            return Err(ValidationError::invalid_byte(name.as_bytes()[at], at));
        }
        Ok(Self {
            facility: Facility::Name(name.to_owned()),
            func,
        })
    }
}

impl fmt::Display for IcaoName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.facility {
            Facility::Id(id) => write!(f, "{}:{}", id, self.func),
            Facility::Name(name) => write!(f, "{}:{}", name, self.func),
        }
    }
}

impl FromStr for IcaoName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("facility name");
        let (fac, func) = s.rsplit_once(':').ok_or_else(malformed)?;
        let func = func.parse::<FacilityFunction>()?;
        if let Ok(id) = fac.parse::<IcaoId>() {
            Ok(IcaoName::from_id(id, func))
        } else {
            IcaoName::from_name(fac, func)
        }
    }
}

/// A heading or track: integer degrees plus `T` (true) or `M` (magnetic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Degrees {
    pub deg: u16,
    pub tru: bool,
}

impl Degrees {
    pub fn new(deg: u16, tru: bool) -> Result<Self, ValidationError> {
        if deg > 360 {
            return Err(ValidationError::out_of_range("degrees"));
        }
        Ok(Self { deg, tru })
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:03}{}", self.deg, if self.tru { 'T' } else { 'M' })
    }
}

impl FromStr for Degrees {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("degrees");
        let (digits, tru) = match s.strip_suffix('T') {
            Some(rest) => (rest, true),
            None => (s.strip_suffix('M').ok_or_else(malformed)?, false),
        };
        let deg = digits.parse::<u16>().map_err(|_| malformed())?;
        Degrees::new(deg, tru)
    }
}

/// An altimeter setting: `Q1013` (hectopascal) or `A29.92` (inches).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baro {
    pub hpa: bool,
    pub val: f64,
}

impl Baro {
    pub fn hpa(val: f64) -> Self {
        Self { hpa: true, val }
    }

    pub fn in_hg(val: f64) -> Self {
        Self { hpa: false, val }
    }
}

impl fmt::Display for Baro {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.hpa {
            write!(f, "Q{:.0}", self.val)
        } else {
            write!(f, "A{:.2}", self.val)
        }
    }
}

impl FromStr for Baro {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("altimeter");
        if !s.is_ascii() {
            return Err(malformed());
        }
        let (unit, rest) = s.split_at(s.len().min(1));
        let val = rest.parse::<f64>().map_err(|_| malformed())?;
        match unit {
            "Q" if (800.0..=1200.0).contains(&val) => Ok(Baro::hpa(val)),
            "A" if (20.0..=35.0).contains(&val) => Ok(Baro::in_hg(val)),
            _ => Err(malformed()),
        }
    }
}

/// Error information carried by DM62 / UM159.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrInfo {
    AppError,
    DupMin,
    UnrecognizedMrn,
    EndSvcWithPendingMsgs,
    EndSvcWithNoResp,
    InsufficientMsgStorage,
    NoAvailableMin,
    CommandedTermination,
    InsufficientData,
    UnexpectedData,
    InvalidData,
}

impl ErrInfo {
    fn token(self) -> &'static str {
        match self {
            ErrInfo::AppError => "APP_ERROR",
            ErrInfo::DupMin => "DUP_MIN",
            ErrInfo::UnrecognizedMrn => "UNRECOG_MRN",
            ErrInfo::EndSvcWithPendingMsgs => "END_SVC_PDG_MSGS",
            ErrInfo::EndSvcWithNoResp => "END_SVC_NO_RESP",
            ErrInfo::InsufficientMsgStorage => "INSUFF_STORAGE",
            ErrInfo::NoAvailableMin => "NO_AVBL_MIN",
            ErrInfo::CommandedTermination => "COMMANDED_TERM",
            ErrInfo::InsufficientData => "INSUFF_DATA",
            ErrInfo::UnexpectedData => "UNEXPCT_DATA",
            ErrInfo::InvalidData => "INVAL_DATA",
        }
    }
}

impl fmt::Display for ErrInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ErrInfo {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "APP_ERROR" => ErrInfo::AppError,
            "DUP_MIN" => ErrInfo::DupMin,
            "UNRECOG_MRN" => ErrInfo::UnrecognizedMrn,
            "END_SVC_PDG_MSGS" => ErrInfo::EndSvcWithPendingMsgs,
            "END_SVC_NO_RESP" => ErrInfo::EndSvcWithNoResp,
            "INSUFF_STORAGE" => ErrInfo::InsufficientMsgStorage,
            "NO_AVBL_MIN" => ErrInfo::NoAvailableMin,
            "COMMANDED_TERM" => ErrInfo::CommandedTermination,
            "INSUFF_DATA" => ErrInfo::InsufficientData,
            "UNEXPCT_DATA" => ErrInfo::UnexpectedData,
            "INVAL_DATA" => ErrInfo::InvalidData,
            _ => return Err(ValidationError::malformed("error information")),
        })
    }
}

/// The TP4 label of UM163.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tp4Label {
    LabelA,
    LabelB,
}

impl fmt::Display for Tp4Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Tp4Label::LabelA => "LABEL_A",
            Tp4Label::LabelB => "LABEL_B",
        })
    }
}

impl FromStr for Tp4Label {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LABEL_A" => Ok(Tp4Label::LabelA),
            "LABEL_B" => Ok(Tp4Label::LabelB),
            _ => Err(ValidationError::malformed("TP4 label")),
        }
    }
}

/// A holding pattern leg: by time (`T2`, minutes) or distance (`D10.5`, NM).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldLeg {
    Time(f64),
    Dist(f64),
}

impl fmt::Display for HoldLeg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HoldLeg::Time(mins) => write!(f, "T{}", mins),
            HoldLeg::Dist(nm) => write!(f, "D{}", nm),
        }
    }
}

impl FromStr for HoldLeg {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::malformed("hold leg");
        let kind = *s.as_bytes().first().ok_or_else(malformed)?;
        let val = s[1..].parse::<f64>().map_err(|_| malformed())?;
        match kind {
            b'T' if (0.1..=9.9).contains(&val) => Ok(HoldLeg::Time(val)),
            b'D' if (0.1..=99.9).contains(&val) => Ok(HoldLeg::Dist(val)),
            _ => Err(malformed()),
        }
    }
}

/// Formats a frequency in MHz with three fractional digits, or four when
/// the value needs them (HF channels like `8.9135`).
pub fn fmt_frequency(freq: f64) -> String {
    let tenths_of_khz = (freq * 10_000.0).round() as i64;
    if tenths_of_khz % 10 == 0 {
        format!("{:.3}", freq)
    } else {
        format!("{:.4}", freq)
    }
}

pub(crate) fn parse_frequency(s: &str) -> Result<f64, ValidationError> {
    let malformed = || ValidationError::malformed("frequency");
    if !s.contains('.') {
        return Err(malformed());
    }
    let freq = s.parse::<f64>().map_err(|_| malformed())?;
    if !(0.1..=1000.0).contains(&freq) {
        return Err(ValidationError::out_of_range("frequency"));
    }
    Ok(freq)
}

/// Discriminant-only mirror of [`Arg`], used by the template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    Altitude,
    Speed,
    Time,
    TimeDur,
    Position,
    Direction,
    Distance,
    DistanceOffset,
    Vvi,
    ToFrom,
    Route,
    Procedure,
    Squawk,
    IcaoId,
    IcaoName,
    Frequency,
    Degrees,
    Baro,
    Freetext,
    Persons,
    PosReport,
    Pdc,
    Tp4Table,
    ErrInfo,
    Version,
    AtisCode,
    LegType,
}

impl ArgType {
    /// Does a value of this type consume the rest of its `DATA=` segment?
    ///
    /// Such arguments keep literal spaces on the wire and must be the last
    /// argument of any template that uses them.
    pub fn is_trailing(self) -> bool {
        matches!(
            self,
            ArgType::Freetext | ArgType::Route | ArgType::PosReport | ArgType::Pdc
        )
    }

    /// The bracketed placeholder used in template display text.
    pub fn placeholder(self) -> &'static str {
        match self {
            ArgType::Altitude => "[altitude]",
            ArgType::Speed => "[speed]",
            ArgType::Time => "[time]",
            ArgType::TimeDur => "[duration]",
            ArgType::Position => "[position]",
            ArgType::Direction => "[direction]",
            ArgType::Distance => "[distance]",
            ArgType::DistanceOffset => "[distance offset]",
            ArgType::Vvi => "[vertical rate]",
            ArgType::ToFrom => "[to/from]",
            ArgType::Route => "[route]",
            ArgType::Procedure => "[procedure]",
            ArgType::Squawk => "[squawk]",
            ArgType::IcaoId => "[icao id]",
            ArgType::IcaoName => "[icao name]",
            ArgType::Frequency => "[frequency]",
            ArgType::Degrees => "[degrees]",
            ArgType::Baro => "[altimeter]",
            ArgType::Freetext => "[freetext]",
            ArgType::Persons => "[persons]",
            ArgType::PosReport => "[position report]",
            ArgType::Pdc => "[pdc]",
            ArgType::Tp4Table => "[tp4]",
            ArgType::ErrInfo => "[error information]",
            ArgType::Version => "[version]",
            ArgType::AtisCode => "[atis code]",
            ArgType::LegType => "[leg type]",
        }
    }
}

/// A concrete argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Altitude(Altitude),
    Speed(Speed),
    Time(Time),
    TimeDur(TimeDur),
    Position(Position),
    Direction(Direction),
    /// Nautical miles.
    Distance(f64),
    DistanceOffset(DistanceOffset),
    /// Feet per minute.
    Vvi(i32),
    ToFrom(ToFrom),
    Route(Box<Route>),
    Procedure(Procedure),
    Squawk(Squawk),
    IcaoId(IcaoId),
    IcaoName(IcaoName),
    /// MHz.
    Frequency(f64),
    Degrees(Degrees),
    Baro(Baro),
    Freetext(String),
    Persons(Persons),
    PosReport(Box<PosReport>),
    Pdc(Box<Pdc>),
    Tp4Table(Tp4Label),
    ErrInfo(ErrInfo),
    Version(u32),
    AtisCode(AtisCode),
    LegType(HoldLeg),
}

impl Arg {
    pub fn arg_type(&self) -> ArgType {
        match self {
            Arg::Altitude(_) => ArgType::Altitude,
            Arg::Speed(_) => ArgType::Speed,
            Arg::Time(_) => ArgType::Time,
            Arg::TimeDur(_) => ArgType::TimeDur,
            Arg::Position(_) => ArgType::Position,
            Arg::Direction(_) => ArgType::Direction,
            Arg::Distance(_) => ArgType::Distance,
            Arg::DistanceOffset(_) => ArgType::DistanceOffset,
            Arg::Vvi(_) => ArgType::Vvi,
            Arg::ToFrom(_) => ArgType::ToFrom,
            Arg::Route(_) => ArgType::Route,
            Arg::Procedure(_) => ArgType::Procedure,
            Arg::Squawk(_) => ArgType::Squawk,
            Arg::IcaoId(_) => ArgType::IcaoId,
            Arg::IcaoName(_) => ArgType::IcaoName,
            Arg::Frequency(_) => ArgType::Frequency,
            Arg::Degrees(_) => ArgType::Degrees,
            Arg::Baro(_) => ArgType::Baro,
            Arg::Freetext(_) => ArgType::Freetext,
            Arg::Persons(_) => ArgType::Persons,
            Arg::PosReport(_) => ArgType::PosReport,
            Arg::Pdc(_) => ArgType::Pdc,
            Arg::Tp4Table(_) => ArgType::Tp4Table,
            Arg::ErrInfo(_) => ArgType::ErrInfo,
            Arg::Version(_) => ArgType::Version,
            Arg::AtisCode(_) => ArgType::AtisCode,
            Arg::LegType(_) => ArgType::LegType,
        }
    }

    /// Parses the canonical text form of an argument of the given type.
    pub fn parse_as(ty: ArgType, text: &str) -> Result<Arg, ValidationError> {
        Ok(match ty {
            ArgType::Altitude => Arg::Altitude(text.parse()?),
            ArgType::Speed => Arg::Speed(text.parse()?),
            ArgType::Time => Arg::Time(text.parse()?),
            ArgType::TimeDur => Arg::TimeDur(text.parse()?),
            ArgType::Position => Arg::Position(text.parse()?),
            ArgType::Direction => Arg::Direction(text.parse()?),
            ArgType::Distance => {
                let nm = text
                    .parse::<f64>()
                    .map_err(|_| ValidationError::malformed("distance"))?;
                if !(0.0..=9999.9).contains(&nm) {
                    return Err(ValidationError::out_of_range("distance"));
                }
                Arg::Distance(nm)
            }
            ArgType::DistanceOffset => Arg::DistanceOffset(text.parse()?),
            ArgType::Vvi => Arg::Vvi(
                text.parse::<i32>()
                    .map_err(|_| ValidationError::malformed("vertical rate"))?,
            ),
            ArgType::ToFrom => Arg::ToFrom(text.parse()?),
            ArgType::Route => Arg::Route(Box::new(text.parse()?)),
            ArgType::Procedure => Arg::Procedure(text.parse()?),
            ArgType::Squawk => Arg::Squawk(text.parse()?),
            ArgType::IcaoId => Arg::IcaoId(text.parse()?),
            ArgType::IcaoName => Arg::IcaoName(text.parse()?),
            ArgType::Frequency => Arg::Frequency(parse_frequency(text)?),
            ArgType::Degrees => Arg::Degrees(text.parse()?),
            ArgType::Baro => Arg::Baro(text.parse()?),
            ArgType::Freetext => Arg::Freetext(text.to_owned()),
            ArgType::Persons => Arg::Persons(text.parse()?),
            ArgType::PosReport => Arg::PosReport(Box::new(text.parse()?)),
            ArgType::Pdc => Arg::Pdc(Box::new(text.parse()?)),
            ArgType::Tp4Table => Arg::Tp4Table(text.parse()?),
            ArgType::ErrInfo => Arg::ErrInfo(text.parse()?),
            ArgType::Version => Arg::Version(
                text.parse::<u32>()
                    .map_err(|_| ValidationError::malformed("version"))?,
            ),
            ArgType::AtisCode => Arg::AtisCode(text.parse()?),
            ArgType::LegType => Arg::LegType(text.parse()?),
        })
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arg::Altitude(v) => v.fmt(f),
            Arg::Speed(v) => v.fmt(f),
            Arg::Time(v) => v.fmt(f),
            Arg::TimeDur(v) => v.fmt(f),
            Arg::Position(v) => v.fmt(f),
            Arg::Direction(v) => v.fmt(f),
            Arg::Distance(nm) => write!(f, "{:.1}", nm),
            Arg::DistanceOffset(v) => v.fmt(f),
            Arg::Vvi(fpm) => write!(f, "{}", fpm),
            Arg::ToFrom(v) => v.fmt(f),
            Arg::Route(v) => v.fmt(f),
            Arg::Procedure(v) => v.fmt(f),
            Arg::Squawk(v) => v.fmt(f),
            Arg::IcaoId(v) => v.fmt(f),
            Arg::IcaoName(v) => v.fmt(f),
            Arg::Frequency(mhz) => f.write_str(&fmt_frequency(*mhz)),
            Arg::Degrees(v) => v.fmt(f),
            Arg::Baro(v) => v.fmt(f),
            Arg::Freetext(text) => f.write_str(text),
            Arg::Persons(v) => v.fmt(f),
            Arg::PosReport(v) => v.fmt(f),
            Arg::Pdc(v) => v.fmt(f),
            Arg::Tp4Table(v) => v.fmt(f),
            Arg::ErrInfo(v) => v.fmt(f),
            Arg::Version(v) => write!(f, "{}", v),
            Arg::AtisCode(v) => v.fmt(f),
            Arg::LegType(v) => v.fmt(f),
        }
    }
}
