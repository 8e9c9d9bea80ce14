//! The static message template catalog.
//!
//! One entry per defined uplink (UM) and downlink (DM) message. The
//! catalog is the single source of truth for argument signatures, expected
//! response categories, display text patterns, and per-segment response
//! timeouts. Adding a message is a table edit here, never a parser change.
//!
//! Codes marked unused by the protocol (UM178, DM55-DM61, DM69) have no
//! entry and are therefore refused by both encoder and decoder.

use std::fmt;

use crate::arg::ArgType;

/// Message direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsgDir {
    /// ATC to aircraft (UM).
    Uplink,
    /// Aircraft to ATC (DM).
    Downlink,
}

impl MsgDir {
    pub fn prefix(self) -> &'static str {
        match self {
            MsgDir::Uplink => "UM",
            MsgDir::Downlink => "DM",
        }
    }
}

/// The response category a message expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RespType {
    /// Wilco / Unable.
    WilcoUnable,
    /// Affirm / Negative.
    AffirmNegative,
    /// Roger.
    Roger,
    /// Operational response.
    Operational,
    /// Response required.
    Required,
    /// Response not required.
    NotRequired,
}

/// Immutable metadata for one message shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsgTemplate {
    pub dir: MsgDir,
    pub ty: u8,
    /// Only the DM67 family carries a subtype letter (`b`..=`i`).
    pub subtype: Option<char>,
    /// Display text with one bracketed placeholder per argument, in order.
    pub text: &'static str,
    pub args: &'static [ArgType],
    pub resp: RespType,
    /// Response timeout in seconds; 0 means no timeout.
    pub timeout: u32,
}

impl MsgTemplate {
    pub fn is_dl(&self) -> bool {
        self.dir == MsgDir::Downlink
    }

    /// Does this message expect any response at all?
    pub fn requires_resp(&self) -> bool {
        !matches!(self.resp, RespType::NotRequired | RespType::Operational)
    }
}

impl fmt::Display for MsgTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.dir.prefix(), self.ty)?;
        if let Some(sub) = self.subtype {
            write!(f, "{}", sub)?;
        }
        Ok(())
    }
}

const WU: RespType = RespType::WilcoUnable;
const AN: RespType = RespType::AffirmNegative;
const R: RespType = RespType::Roger;
const NE: RespType = RespType::Operational;
const Y: RespType = RespType::Required;
const N: RespType = RespType::NotRequired;

const ALT: ArgType = ArgType::Altitude;
const SPD: ArgType = ArgType::Speed;
const TIME: ArgType = ArgType::Time;
const POS: ArgType = ArgType::Position;
const DIR: ArgType = ArgType::Direction;
const DIST: ArgType = ArgType::Distance;
const DOFF: ArgType = ArgType::DistanceOffset;
const VVI: ArgType = ArgType::Vvi;
const TOFROM: ArgType = ArgType::ToFrom;
const ROUTE: ArgType = ArgType::Route;
const PROC: ArgType = ArgType::Procedure;
const SQK: ArgType = ArgType::Squawk;
const ID: ArgType = ArgType::IcaoId;
const NAME: ArgType = ArgType::IcaoName;
const FREQ: ArgType = ArgType::Frequency;
const DEG: ArgType = ArgType::Degrees;
const BARO: ArgType = ArgType::Baro;
const TEXT: ArgType = ArgType::Freetext;
const POSREP: ArgType = ArgType::PosReport;
const PDC: ArgType = ArgType::Pdc;
const TP4: ArgType = ArgType::Tp4Table;
const ERR: ArgType = ArgType::ErrInfo;
const VER: ArgType = ArgType::Version;
const ATIS: ArgType = ArgType::AtisCode;
const LEG: ArgType = ArgType::LegType;

/// The downlink request family times out after this many seconds without a
/// reply; the thread tracker then auto-sends a DM62 APP_ERROR.
pub const REQUEST_TIMEOUT: u32 = 100;

const fn ul(ty: u8, text: &'static str, args: &'static [ArgType], resp: RespType) -> MsgTemplate {
    MsgTemplate {
        dir: MsgDir::Uplink,
        ty,
        subtype: None,
        text,
        args,
        resp,
        timeout: 0,
    }
}

const fn dl(
    ty: u8,
    text: &'static str,
    args: &'static [ArgType],
    resp: RespType,
    timeout: u32,
) -> MsgTemplate {
    MsgTemplate {
        dir: MsgDir::Downlink,
        ty,
        subtype: None,
        text,
        args,
        resp,
        timeout,
    }
}

const fn dl67(
    subtype: char,
    text: &'static str,
    args: &'static [ArgType],
    resp: RespType,
    timeout: u32,
) -> MsgTemplate {
    MsgTemplate {
        dir: MsgDir::Downlink,
        ty: 67,
        subtype: Some(subtype),
        text,
        args,
        resp,
        timeout,
    }
}

#[rustfmt::skip]
static UL_TEMPLATES: &[MsgTemplate] = &[
    ul(0, "UNABLE", &[], N),
    ul(1, "STANDBY", &[], N),
    ul(2, "REQUEST DEFERRED", &[], N),
    ul(3, "ROGER", &[], N),
    ul(4, "AFFIRM", &[], N),
    ul(5, "NEGATIVE", &[], N),
    ul(6, "EXPECT [altitude]", &[ALT], R),
    ul(7, "EXPECT CLIMB AT [time]", &[TIME], R),
    ul(8, "EXPECT CLIMB AT [position]", &[POS], R),
    ul(9, "EXPECT DESCENT AT [time]", &[TIME], R),
    ul(10, "EXPECT DESCENT AT [position]", &[POS], R),
    ul(11, "EXPECT CRUISE CLIMB AT [time]", &[TIME], R),
    ul(12, "EXPECT CRUISE CLIMB AT [position]", &[POS], R),
    ul(13, "AT [time] EXPECT CLIMB TO [altitude]", &[TIME, ALT], R),
    ul(14, "AT [position] EXPECT CLIMB TO [altitude]", &[POS, ALT], R),
    ul(15, "AT [time] EXPECT DESCENT TO [altitude]", &[TIME, ALT], R),
    ul(16, "AT [position] EXPECT DESCENT TO [altitude]", &[POS, ALT], R),
    ul(17, "AT [time] EXPECT CRUISE CLIMB TO [altitude]", &[TIME, ALT], R),
    ul(18, "AT [position] EXPECT CRUISE CLIMB TO [altitude]", &[POS, ALT], R),
    ul(19, "MAINTAIN [altitude]", &[ALT], WU),
    ul(20, "CLIMB TO AND MAINTAIN [altitude]", &[ALT], WU),
    ul(21, "AT [time] CLIMB TO AND MAINTAIN [altitude]", &[TIME, ALT], WU),
    ul(22, "AT [position] CLIMB TO AND MAINTAIN [altitude]", &[POS, ALT], WU),
    ul(23, "DESCEND TO AND MAINTAIN [altitude]", &[ALT], WU),
    ul(24, "AT [time] DESCEND TO AND MAINTAIN [altitude]", &[TIME, ALT], WU),
    ul(25, "AT [position] DESCEND TO AND MAINTAIN [altitude]", &[POS, ALT], WU),
    ul(26, "CLIMB TO REACH [altitude] BY [time]", &[ALT, TIME], WU),
    ul(27, "CLIMB TO REACH [altitude] BY [position]", &[ALT, POS], WU),
    ul(28, "DESCEND TO REACH [altitude] BY [time]", &[ALT, TIME], WU),
    ul(29, "DESCEND TO REACH [altitude] BY [position]", &[ALT, POS], WU),
    ul(30, "MAINTAIN BLOCK [altitude] TO [altitude]", &[ALT, ALT], WU),
    ul(31, "CLIMB TO AND MAINTAIN BLOCK [altitude] TO [altitude]", &[ALT, ALT], WU),
    ul(32, "DESCEND TO AND MAINTAIN BLOCK [altitude] TO [altitude]", &[ALT, ALT], WU),
    ul(33, "CRUISE [altitude]", &[ALT], WU),
    ul(34, "CRUISE CLIMB TO [altitude]", &[ALT], WU),
    ul(35, "CRUISE CLIMB ABOVE [altitude]", &[ALT], WU),
    ul(36, "EXPEDITE CLIMB TO [altitude]", &[ALT], WU),
    ul(37, "EXPEDITE DESCENT TO [altitude]", &[ALT], WU),
    ul(38, "IMMEDIATELY CLIMB TO [altitude]", &[ALT], WU),
    ul(39, "IMMEDIATELY DESCEND TO [altitude]", &[ALT], WU),
    ul(40, "IMMEDIATELY STOP CLIMB AT [altitude]", &[ALT], WU),
    ul(41, "IMMEDIATELY STOP DESCENT AT [altitude]", &[ALT], WU),
    ul(42, "EXPECT TO CROSS [position] AT [altitude]", &[POS, ALT], R),
    ul(43, "EXPECT TO CROSS [position] AT OR ABOVE [altitude]", &[POS, ALT], R),
    ul(44, "EXPECT TO CROSS [position] AT OR BELOW [altitude]", &[POS, ALT], R),
    ul(45, "EXPECT TO CROSS [position] AT AND MAINTAIN [altitude]", &[POS, ALT], R),
    ul(46, "CROSS [position] AT [altitude]", &[POS, ALT], WU),
    ul(47, "CROSS [position] AT OR ABOVE [altitude]", &[POS, ALT], WU),
    ul(48, "CROSS [position] AT OR BELOW [altitude]", &[POS, ALT], WU),
    ul(49, "CROSS [position] AT AND MAINTAIN [altitude]", &[POS, ALT], WU),
    ul(50, "CROSS [position] BETWEEN [altitude] AND [altitude]", &[POS, ALT, ALT], WU),
    ul(51, "CROSS [position] AT [time]", &[POS, TIME], WU),
    ul(52, "CROSS [position] AT OR BEFORE [time]", &[POS, TIME], WU),
    ul(53, "CROSS [position] AT OR AFTER [time]", &[POS, TIME], WU),
    ul(54, "CROSS [position] BETWEEN [time] AND [time]", &[POS, TIME, TIME], WU),
    ul(55, "CROSS [position] AT [speed]", &[POS, SPD], WU),
    ul(56, "CROSS [position] AT OR LESS THAN [speed]", &[POS, SPD], WU),
    ul(57, "CROSS [position] AT OR GREATER THAN [speed]", &[POS, SPD], WU),
    ul(58, "CROSS [position] AT [time] AT [altitude]", &[POS, TIME, ALT], WU),
    ul(59, "CROSS [position] AT OR BEFORE [time] AT [altitude]", &[POS, TIME, ALT], WU),
    ul(60, "CROSS [position] AT OR AFTER [time] AT [altitude]", &[POS, TIME, ALT], WU),
    ul(61, "CROSS [position] AT AND MAINTAIN [altitude] AT [speed]", &[POS, ALT, SPD], WU),
    ul(62, "AT [time] CROSS [position] AT AND MAINTAIN [altitude]", &[TIME, POS, ALT], WU),
    ul(63, "AT [time] CROSS [position] AT AND MAINTAIN [altitude] AT [speed]", &[TIME, POS, ALT, SPD], WU),
    ul(64, "OFFSET [distance offset] OF ROUTE", &[DOFF], WU),
    ul(65, "AT [position] OFFSET [distance offset] OF ROUTE", &[POS, DOFF], WU),
    ul(66, "AT [time] OFFSET [distance offset] OF ROUTE", &[TIME, DOFF], WU),
    ul(67, "PROCEED BACK ON ROUTE", &[], WU),
    ul(68, "REJOIN ROUTE BY [position]", &[POS], WU),
    ul(69, "REJOIN ROUTE BY [time]", &[TIME], WU),
    ul(70, "EXPECT BACK ON ROUTE BY [position]", &[POS], R),
    ul(71, "EXPECT BACK ON ROUTE BY [time]", &[TIME], R),
    ul(72, "RESUME OWN NAVIGATION", &[], WU),
    ul(73, "PRE-DEPARTURE CLEARANCE [pdc]", &[PDC], WU),
    ul(74, "PROCEED DIRECT TO [position]", &[POS], WU),
    ul(75, "WHEN ABLE PROCEED DIRECT TO [position]", &[POS], WU),
    ul(76, "AT [time] PROCEED DIRECT TO [position]", &[TIME, POS], WU),
    ul(77, "AT [position] PROCEED DIRECT TO [position]", &[POS, POS], WU),
    ul(78, "AT [altitude] PROCEED DIRECT TO [position]", &[ALT, POS], WU),
    ul(79, "CLEARED TO [position] VIA [route]", &[POS, ROUTE], WU),
    ul(80, "CLEARED [route]", &[ROUTE], WU),
    ul(81, "CLEARED [procedure]", &[PROC], WU),
    ul(82, "CLEARED TO DEVIATE UP TO [distance offset] OF ROUTE", &[DOFF], WU),
    ul(83, "AT [position] CLEARED [route]", &[POS, ROUTE], WU),
    ul(84, "AT [position] CLEARED [procedure]", &[POS, PROC], WU),
    ul(85, "EXPECT [route]", &[ROUTE], R),
    ul(86, "AT [position] EXPECT [route]", &[POS, ROUTE], R),
    ul(87, "EXPECT DIRECT TO [position]", &[POS], R),
    ul(88, "AT [position] EXPECT DIRECT TO [position]", &[POS, POS], R),
    ul(89, "AT [time] EXPECT DIRECT TO [position]", &[TIME, POS], R),
    ul(90, "AT [altitude] EXPECT DIRECT TO [position]", &[ALT, POS], R),
    ul(91, "HOLD AT [position] MAINTAIN [altitude] INBOUND TRACK [degrees] [direction] TURNS LEG TIME [leg type]", &[POS, ALT, DEG, DIR, LEG], WU),
    ul(92, "HOLD AT [position] AS PUBLISHED MAINTAIN [altitude]", &[POS, ALT], WU),
    ul(93, "EXPECT FURTHER CLEARANCE AT [time]", &[TIME], R),
    ul(94, "TURN [direction] HEADING [degrees]", &[DIR, DEG], WU),
    ul(95, "TURN [direction] GROUND TRACK [degrees]", &[DIR, DEG], WU),
    ul(96, "CONTINUE PRESENT HEADING", &[], WU),
    ul(97, "AT [position] FLY HEADING [degrees]", &[POS, DEG], WU),
    ul(98, "IMMEDIATELY TURN [direction] HEADING [degrees]", &[DIR, DEG], WU),
    ul(99, "EXPECT [procedure]", &[PROC], R),
    ul(100, "AT [time] EXPECT [speed]", &[TIME, SPD], R),
    ul(101, "AT [position] EXPECT [speed]", &[POS, SPD], R),
    ul(102, "AT [altitude] EXPECT [speed]", &[ALT, SPD], R),
    ul(103, "AT [time] EXPECT [speed] TO [speed]", &[TIME, SPD, SPD], R),
    ul(104, "AT [position] EXPECT [speed] TO [speed]", &[POS, SPD, SPD], R),
    ul(105, "AT [altitude] EXPECT [speed] TO [speed]", &[ALT, SPD, SPD], R),
    ul(106, "MAINTAIN [speed]", &[SPD], WU),
    ul(107, "MAINTAIN PRESENT SPEED", &[], WU),
    ul(108, "MAINTAIN [speed] OR GREATER", &[SPD], WU),
    ul(109, "MAINTAIN [speed] OR LESS", &[SPD], WU),
    ul(110, "MAINTAIN [speed] TO [speed]", &[SPD, SPD], WU),
    ul(111, "INCREASE SPEED TO [speed]", &[SPD], WU),
    ul(112, "INCREASE SPEED TO [speed] OR GREATER", &[SPD], WU),
    ul(113, "REDUCE SPEED TO [speed]", &[SPD], WU),
    ul(114, "REDUCE SPEED TO [speed] OR LESS", &[SPD], WU),
    ul(115, "DO NOT EXCEED [speed]", &[SPD], WU),
    ul(116, "RESUME NORMAL SPEED", &[], WU),
    ul(117, "CONTACT [icao name] [frequency]", &[NAME, FREQ], WU),
    ul(118, "AT [position] CONTACT [icao name] [frequency]", &[POS, NAME, FREQ], WU),
    ul(119, "AT [time] CONTACT [icao name] [frequency]", &[TIME, NAME, FREQ], WU),
    ul(120, "MONITOR [icao name] [frequency]", &[NAME, FREQ], WU),
    ul(121, "AT [position] MONITOR [icao name] [frequency]", &[POS, NAME, FREQ], WU),
    ul(122, "AT [time] MONITOR [icao name] [frequency]", &[TIME, NAME, FREQ], WU),
    ul(123, "SQUAWK [squawk]", &[SQK], WU),
    ul(124, "STOP SQUAWK", &[], WU),
    ul(125, "SQUAWK ALTITUDE", &[], WU),
    ul(126, "STOP ALTITUDE SQUAWK", &[], WU),
    ul(127, "REPORT BACK ON ROUTE", &[], WU),
    ul(128, "REPORT LEAVING [altitude]", &[ALT], WU),
    ul(129, "REPORT LEVEL [altitude]", &[ALT], WU),
    ul(130, "REPORT PASSING [position]", &[POS], WU),
    ul(131, "REPORT REMAINING FUEL AND SOULS ON BOARD", &[], NE),
    ul(132, "CONFIRM POSITION", &[], NE),
    ul(133, "CONFIRM ALTITUDE", &[], NE),
    ul(134, "CONFIRM SPEED", &[], NE),
    ul(135, "CONFIRM ASSIGNED ALTITUDE", &[], NE),
    ul(136, "CONFIRM ASSIGNED SPEED", &[], NE),
    ul(137, "CONFIRM ASSIGNED ROUTE", &[], NE),
    ul(138, "CONFIRM TIME OVER REPORTED WAYPOINT", &[], NE),
    ul(139, "CONFIRM REPORTED WAYPOINT", &[], NE),
    ul(140, "CONFIRM NEXT WAYPOINT", &[], NE),
    ul(141, "CONFIRM NEXT WAYPOINT ETA", &[], NE),
    ul(142, "CONFIRM ENSUING WAYPOINT", &[], NE),
    ul(143, "CONFIRM REQUEST", &[], NE),
    ul(144, "CONFIRM SQUAWK", &[], NE),
    ul(145, "CONFIRM HEADING", &[], NE),
    ul(146, "CONFIRM GROUND TRACK", &[], NE),
    ul(147, "REQUEST POSITION REPORT", &[], NE),
    ul(148, "WHEN CAN YOU ACCEPT [altitude]", &[ALT], Y),
    ul(149, "CAN YOU ACCEPT [altitude] AT [position]", &[ALT, POS], AN),
    ul(150, "CAN YOU ACCEPT [altitude] AT [time]", &[ALT, TIME], AN),
    ul(151, "WHEN CAN YOU ACCEPT [speed]", &[SPD], Y),
    ul(152, "WHEN CAN YOU ACCEPT [distance offset] OFFSET", &[DOFF], Y),
    ul(153, "ALTIMETER [altimeter]", &[BARO], R),
    ul(154, "RADAR SERVICE TERMINATED", &[], R),
    ul(155, "RADAR CONTACT [position]", &[POS], R),
    ul(156, "RADAR CONTACT LOST", &[], R),
    ul(157, "CHECK STUCK MICROPHONE", &[], N),
    ul(158, "ATIS [atis code]", &[ATIS], R),
    ul(159, "ERROR [error information]", &[ERR], N),
    ul(160, "NEXT DATA AUTHORITY [icao id]", &[ID], N),
    ul(161, "END SERVICE", &[], N),
    ul(162, "SERVICE UNAVAILABLE", &[], N),
    ul(163, "FACILITY [icao id] [tp4]", &[ID, TP4], N),
    ul(164, "WHEN READY", &[], N),
    ul(165, "THEN", &[], N),
    ul(166, "DUE TO TRAFFIC", &[], N),
    ul(167, "DUE TO AIRSPACE RESTRICTION", &[], N),
    ul(168, "DISREGARD", &[], R),
    ul(169, "[freetext]", &[TEXT], R),
    ul(170, "[freetext]", &[TEXT], R),
    ul(171, "CLIMB AT [vertical rate] MINIMUM", &[VVI], WU),
    ul(172, "CLIMB AT [vertical rate] MAXIMUM", &[VVI], WU),
    ul(173, "DESCEND AT [vertical rate] MINIMUM", &[VVI], WU),
    ul(174, "DESCEND AT [vertical rate] MAXIMUM", &[VVI], WU),
    ul(175, "REPORT REACHING [altitude]", &[ALT], WU),
    ul(176, "MAINTAIN OWN SEPARATION AND VMC", &[], WU),
    ul(177, "AT PILOTS DISCRETION", &[], N),
    ul(179, "SQUAWK IDENT", &[], WU),
    ul(180, "REPORT REACHING BLOCK [altitude] TO [altitude]", &[ALT, ALT], WU),
    ul(181, "REPORT DISTANCE [to/from] [position]", &[TOFROM, POS], NE),
    ul(182, "CONFIRM ATIS CODE", &[], NE),
];

#[rustfmt::skip]
static DL_TEMPLATES: &[MsgTemplate] = &[
    dl(0, "WILCO", &[], N, 0),
    dl(1, "UNABLE", &[], N, 0),
    dl(2, "STANDBY", &[], N, 0),
    dl(3, "ROGER", &[], N, 0),
    dl(4, "AFFIRM", &[], N, 0),
    dl(5, "NEGATIVE", &[], N, 0),
    dl(6, "REQUEST [altitude]", &[ALT], Y, REQUEST_TIMEOUT),
    dl(7, "REQUEST BLOCK [altitude] TO [altitude]", &[ALT, ALT], Y, REQUEST_TIMEOUT),
    dl(8, "REQUEST CRUISE CLIMB TO [altitude]", &[ALT], Y, REQUEST_TIMEOUT),
    dl(9, "REQUEST CLIMB TO [altitude]", &[ALT], Y, REQUEST_TIMEOUT),
    dl(10, "REQUEST DESCENT TO [altitude]", &[ALT], Y, REQUEST_TIMEOUT),
    dl(11, "AT [position] REQUEST CLIMB TO [altitude]", &[POS, ALT], Y, REQUEST_TIMEOUT),
    dl(12, "AT [position] REQUEST DESCENT TO [altitude]", &[POS, ALT], Y, REQUEST_TIMEOUT),
    dl(13, "AT [time] REQUEST CLIMB TO [altitude]", &[TIME, ALT], Y, REQUEST_TIMEOUT),
    dl(14, "AT [time] REQUEST DESCENT TO [altitude]", &[TIME, ALT], Y, REQUEST_TIMEOUT),
    dl(15, "REQUEST OFFSET [distance offset] OF ROUTE", &[DOFF], Y, REQUEST_TIMEOUT),
    dl(16, "AT [position] REQUEST OFFSET [distance offset] OF ROUTE", &[POS, DOFF], Y, REQUEST_TIMEOUT),
    dl(17, "AT [time] REQUEST OFFSET [distance offset] OF ROUTE", &[TIME, DOFF], Y, REQUEST_TIMEOUT),
    dl(18, "REQUEST [speed]", &[SPD], Y, REQUEST_TIMEOUT),
    dl(19, "REQUEST [speed] TO [speed]", &[SPD, SPD], Y, REQUEST_TIMEOUT),
    dl(20, "REQUEST VOICE CONTACT", &[], Y, REQUEST_TIMEOUT),
    dl(21, "REQUEST VOICE CONTACT ON [frequency]", &[FREQ], Y, REQUEST_TIMEOUT),
    dl(22, "REQUEST DIRECT TO [position]", &[POS], Y, REQUEST_TIMEOUT),
    dl(23, "REQUEST [procedure]", &[PROC], Y, REQUEST_TIMEOUT),
    dl(24, "REQUEST [route]", &[ROUTE], Y, REQUEST_TIMEOUT),
    dl(25, "REQUEST PRE-DEPARTURE CLEARANCE", &[], Y, REQUEST_TIMEOUT),
    dl(26, "REQUEST WEATHER DEVIATION TO [position] VIA [route]", &[POS, ROUTE], Y, REQUEST_TIMEOUT),
    dl(27, "REQUEST WEATHER DEVIATION UP TO [distance offset] OF ROUTE", &[DOFF], Y, REQUEST_TIMEOUT),
    dl(28, "LEAVING [altitude]", &[ALT], N, 0),
    dl(29, "CLIMBING TO [altitude]", &[ALT], N, 0),
    dl(30, "DESCENDING TO [altitude]", &[ALT], N, 0),
    dl(31, "PASSING [position]", &[POS], N, 0),
    dl(32, "PRESENT ALTITUDE [altitude]", &[ALT], N, 0),
    dl(33, "PRESENT POSITION [position]", &[POS], N, 0),
    dl(34, "PRESENT SPEED [speed]", &[SPD], N, 0),
    dl(35, "PRESENT HEADING [degrees]", &[DEG], N, 0),
    dl(36, "PRESENT GROUND TRACK [degrees]", &[DEG], N, 0),
    dl(37, "LEVEL [altitude]", &[ALT], N, 0),
    dl(38, "ASSIGNED ALTITUDE [altitude]", &[ALT], N, 0),
    dl(39, "ASSIGNED SPEED [speed]", &[SPD], N, 0),
    dl(40, "ASSIGNED ROUTE [route]", &[ROUTE], N, 0),
    dl(41, "BACK ON ROUTE", &[], N, 0),
    dl(42, "NEXT WAYPOINT [position]", &[POS], N, 0),
    dl(43, "NEXT WAYPOINT ETA [time]", &[TIME], N, 0),
    dl(44, "ENSUING WAYPOINT [position]", &[POS], N, 0),
    dl(45, "REPORTED WAYPOINT [position]", &[POS], N, 0),
    dl(46, "REPORTED WAYPOINT [time]", &[TIME], N, 0),
    dl(47, "SQUAWKING [squawk]", &[SQK], N, 0),
    dl(48, "POSITION REPORT [position report]", &[POSREP], N, 0),
    dl(49, "WHEN CAN WE EXPECT [speed]", &[SPD], Y, REQUEST_TIMEOUT),
    dl(50, "WHEN CAN WE EXPECT [speed] TO [speed]", &[SPD, SPD], Y, REQUEST_TIMEOUT),
    dl(51, "WHEN CAN WE EXPECT BACK ON ROUTE", &[], Y, REQUEST_TIMEOUT),
    dl(52, "WHEN CAN WE EXPECT LOWER ALTITUDE", &[], Y, REQUEST_TIMEOUT),
    dl(53, "WHEN CAN WE EXPECT HIGHER ALTITUDE", &[], Y, REQUEST_TIMEOUT),
    dl(54, "WHEN CAN WE EXPECT CRUISE CLIMB TO [altitude]", &[ALT], Y, REQUEST_TIMEOUT),
    dl(62, "ERROR [error information]", &[ERR], N, 0),
    dl(63, "NOT CURRENT DATA AUTHORITY", &[], N, 0),
    dl(64, "CURRENT DATA AUTHORITY [icao id]", &[ID], N, 0),
    dl(65, "DUE TO WEATHER", &[], N, 0),
    dl(66, "DUE TO AIRCRAFT PERFORMANCE", &[], N, 0),
    dl(67, "[freetext]", &[TEXT], N, 0),
    dl67('b', "WE CAN ACCEPT [altitude] AT [time]", &[ALT, TIME], N, 0),
    dl67('c', "WE CAN ACCEPT [speed] AT [time]", &[SPD, TIME], N, 0),
    dl67('d', "WE CAN ACCEPT [distance offset] AT [time]", &[DOFF, TIME], N, 0),
    dl67('e', "WE CANNOT ACCEPT [altitude]", &[ALT], N, 0),
    dl67('f', "WE CANNOT ACCEPT [speed]", &[SPD], N, 0),
    dl67('g', "WE CANNOT ACCEPT [distance offset]", &[DOFF], N, 0),
    dl67('h', "WHEN CAN WE EXPECT CLIMB TO [altitude]", &[ALT], Y, REQUEST_TIMEOUT),
    dl67('i', "WHEN CAN WE EXPECT DESCENT TO [altitude]", &[ALT], Y, REQUEST_TIMEOUT),
    dl(68, "[freetext]", &[TEXT], Y, 0),
    dl(70, "REQUEST HEADING [degrees]", &[DEG], Y, REQUEST_TIMEOUT),
    dl(71, "REQUEST GROUND TRACK [degrees]", &[DEG], Y, REQUEST_TIMEOUT),
    dl(72, "REACHING [altitude]", &[ALT], N, 0),
    dl(73, "VERSION [version]", &[VER], N, 0),
    dl(74, "MAINTAIN OWN SEPARATION AND VMC", &[], N, 0),
    dl(75, "AT PILOTS DISCRETION", &[], N, 0),
    dl(76, "REACHING BLOCK [altitude] TO [altitude]", &[ALT, ALT], N, 0),
    dl(77, "ASSIGNED BLOCK [altitude] TO [altitude]", &[ALT, ALT], N, 0),
    dl(78, "AT [time] [distance] [to/from] [position]", &[TIME, DIST, TOFROM, POS], N, 0),
    dl(79, "ATIS [atis code]", &[ATIS], N, 0),
    dl(80, "DEVIATING [distance offset] OF ROUTE", &[DOFF], N, 0),
];

/// All uplink templates, in type order.
pub fn uplink_templates() -> &'static [MsgTemplate] {
    UL_TEMPLATES
}

/// All downlink templates, in type order (DM67 subtypes follow DM67).
pub fn downlink_templates() -> &'static [MsgTemplate] {
    DL_TEMPLATES
}

/// Looks up a template by `(direction, type, subtype)`. Unknown triples
/// return `None` and must be refused by callers.
pub fn lookup(dir: MsgDir, ty: u8, subtype: Option<char>) -> Option<&'static MsgTemplate> {
    let table = match dir {
        MsgDir::Uplink => UL_TEMPLATES,
        MsgDir::Downlink => DL_TEMPLATES,
    };
    table
        .iter()
        .find(|tmpl| tmpl.ty == ty && tmpl.subtype == subtype)
}
