//! The owning message container.
//!
//! A [`Message`] is a header (packet type, from/to, MIN/MRN, logon data,
//! options) plus an ordered list of up to [`MAX_MSG_SEGS`] segments. A
//! message with zero segments is legal: LOGON, logoff, PING/PONG and
//! options-only packets carry none.

use std::fmt;

use crate::{
    arg::Arg,
    catalog::{MsgDir, MsgTemplate},
    core::CallSign,
    error::ValidationError,
};

/// The maximum number of segments a message may carry.
pub const MAX_MSG_SEGS: usize = 8;

/// Wire packet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    Cpdlc,
    Ping,
    Pong,
}

impl PacketType {
    pub fn token(self) -> &'static str {
        match self {
            PacketType::Cpdlc => "CPDLC",
            PacketType::Ping => "PING",
            PacketType::Pong => "PONG",
        }
    }
}

/// ARINC 622 imbedded message identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Imi {
    /// CR1 - connection request.
    ConnRequest,
    /// CC1 - connection confirm.
    ConnConfirm,
    /// AT1 - ATC communication.
    AtcComm,
    /// DR1 - disconnect.
    Disconnect,
}

impl Imi {
    pub fn token(self) -> &'static str {
        match self {
            Imi::ConnRequest => "CR1",
            Imi::ConnConfirm => "CC1",
            Imi::AtcComm => "AT1",
            Imi::Disconnect => "DR1",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "CR1" => Imi::ConnRequest,
            "CC1" => Imi::ConnConfirm,
            "AT1" => Imi::AtcComm,
            "DR1" => Imi::Disconnect,
            _ => return None,
        })
    }
}

/// An `OPT=<name>[=<val>]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgOption {
    pub name: String,
    pub value: Option<String>,
}

/// One message segment: a template pointer plus its argument values.
///
/// Invariant: `args[i].arg_type() == template.args[i]` for all `i`. The
/// constructor enforces it; [`Segment::set_arg`] re-checks on mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    template: &'static MsgTemplate,
    args: Vec<Arg>,
}

impl Segment {
    pub fn new(template: &'static MsgTemplate, args: Vec<Arg>) -> Result<Self, ValidationError> {
        if args.len() != template.args.len() {
            return Err(ValidationError::malformed("argument count"));
        }
        for (arg, expected) in args.iter().zip(template.args) {
            if arg.arg_type() != *expected {
                return Err(ValidationError::malformed("argument type"));
            }
        }
        Ok(Self { template, args })
    }

    pub fn template(&self) -> &'static MsgTemplate {
        self.template
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn arg(&self, i: usize) -> Option<&Arg> {
        self.args.get(i)
    }

    /// Replaces the `i`-th argument. The new value's variant must match the
    /// template signature.
    pub fn set_arg(&mut self, i: usize, arg: Arg) -> Result<(), ValidationError> {
        let expected = self
            .template
            .args
            .get(i)
            .ok_or_else(|| ValidationError::malformed("argument index"))?;
        if arg.arg_type() != *expected {
            return Err(ValidationError::malformed("argument type"));
        }
        self.args[i] = arg;
        Ok(())
    }

    /// Renders the segment for display by substituting each bracketed
    /// placeholder in the template text with the canonical argument form.
    pub fn display_text(&self) -> String {
        let mut out = String::with_capacity(self.template.text.len());
        let mut rest = self.template.text;
        for arg in &self.args {
            match (rest.find('['), rest.find(']')) {
                (Some(open), Some(close)) if open < close => {
                    out.push_str(&rest[..open]);
                    out.push_str(&arg.to_string());
                    rest = &rest[close + 1..];
                }
                _ => break,
            }
        }
        out.push_str(rest);
        out
    }
}

/// An owning CPDLC message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pkt_type: PacketType,
    from: Option<CallSign>,
    to: Option<CallSign>,
    min: Option<u32>,
    mrn: Option<u32>,
    logon_data: Option<String>,
    logoff: bool,
    imi: Option<Imi>,
    options: Vec<MsgOption>,
    segs: Vec<Segment>,
    /// Plain-text output enabled (the default wire form).
    pub fmt_plain: bool,
    /// ARINC 622 envelope output enabled.
    pub fmt_arinc622: bool,
}

impl Message {
    pub fn new(pkt_type: PacketType) -> Self {
        Self {
            pkt_type,
            from: None,
            to: None,
            min: None,
            mrn: None,
            logon_data: None,
            logoff: false,
            imi: None,
            options: Vec::new(),
            segs: Vec::new(),
            fmt_plain: true,
            fmt_arinc622: false,
        }
    }

    pub fn pkt_type(&self) -> PacketType {
        self.pkt_type
    }

    pub fn set_from(&mut self, from: CallSign) {
        self.from = Some(from);
    }

    pub fn from_id(&self) -> Option<&CallSign> {
        self.from.as_ref()
    }

    pub fn set_to(&mut self, to: CallSign) {
        self.to = Some(to);
    }

    pub fn to_id(&self) -> Option<&CallSign> {
        self.to.as_ref()
    }

    pub fn set_min(&mut self, min: u32) {
        self.min = Some(min);
    }

    pub fn min(&self) -> Option<u32> {
        self.min
    }

    pub fn set_mrn(&mut self, mrn: u32) {
        self.mrn = Some(mrn);
    }

    pub fn mrn(&self) -> Option<u32> {
        self.mrn
    }

    pub fn set_logon_data(&mut self, data: &str) {
        self.logon_data = Some(data.to_owned());
    }

    pub fn logon_data(&self) -> Option<&str> {
        self.logon_data.as_deref()
    }

    pub fn is_logon(&self) -> bool {
        self.logon_data.is_some()
    }

    pub fn set_logoff(&mut self, logoff: bool) {
        self.logoff = logoff;
    }

    pub fn is_logoff(&self) -> bool {
        self.logoff
    }

    pub fn set_imi(&mut self, imi: Imi) {
        self.imi = Some(imi);
    }

    pub fn imi(&self) -> Option<Imi> {
        self.imi
    }

    pub fn add_option(&mut self, name: &str, value: Option<&str>) {
        self.options.push(MsgOption {
            name: name.to_owned(),
            value: value.map(str::to_owned),
        });
    }

    pub fn options(&self) -> &[MsgOption] {
        &self.options
    }

    pub fn find_option(&self, name: &str) -> Option<&MsgOption> {
        self.options.iter().find(|opt| opt.name == name)
    }

    /// Appends a segment and returns its index.
    pub fn add_seg(&mut self, seg: Segment) -> Result<usize, ValidationError> {
        if self.segs.len() >= MAX_MSG_SEGS {
            return Err(ValidationError::too_long(MAX_MSG_SEGS));
        }
        self.segs.push(seg);
        Ok(self.segs.len() - 1)
    }

    pub fn segs(&self) -> &[Segment] {
        &self.segs
    }

    pub fn seg(&self, i: usize) -> Option<&Segment> {
        self.segs.get(i)
    }

    pub fn seg_mut(&mut self, i: usize) -> Option<&mut Segment> {
        self.segs.get_mut(i)
    }

    /// The direction of the message, taken from its first segment. `None`
    /// for segment-less packets.
    pub fn dir(&self) -> Option<MsgDir> {
        self.segs.first().map(|seg| seg.template().dir)
    }

    /// Does any segment match the given uplink/downlink type?
    pub fn has_seg_type(&self, dir: MsgDir, ty: u8) -> bool {
        self.segs
            .iter()
            .any(|seg| seg.template().dir == dir && seg.template().ty == ty)
    }

    /// Renders the whole message for display, one segment after another.
    pub fn display_text(&self) -> String {
        self.segs
            .iter()
            .map(Segment::display_text)
            .collect::<Vec<_>>()
            .join(". ")
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        arg::{Altitude, Arg, Time},
        catalog::{lookup, MsgDir},
    };

    fn seg(dir: MsgDir, ty: u8, args: Vec<Arg>) -> Segment {
        Segment::new(lookup(dir, ty, None).unwrap(), args).unwrap()
    }

    #[test]
    fn test_segment_arg_validation() {
        let tmpl = lookup(MsgDir::Uplink, 19, None).unwrap();
        assert!(Segment::new(tmpl, vec![]).is_err());
        assert!(Segment::new(tmpl, vec![Arg::Time(Time::NOW)]).is_err());
        let mut seg =
            Segment::new(tmpl, vec![Arg::Altitude(Altitude::flight_level(350))]).unwrap();
        assert!(seg.set_arg(0, Arg::Time(Time::NOW)).is_err());
        assert!(seg.set_arg(1, Arg::Altitude(Altitude::feet(4000))).is_err());
        assert!(seg
            .set_arg(0, Arg::Altitude(Altitude::flight_level(370)))
            .is_ok());
    }

    #[test]
    fn test_display_text() {
        let seg = seg(
            MsgDir::Uplink,
            20,
            vec![Arg::Altitude(Altitude::flight_level(350))],
        );
        assert_eq!(seg.display_text(), "CLIMB TO AND MAINTAIN FL350");
    }

    #[test]
    fn test_message_display_joins_segments() {
        let mut msg = Message::new(PacketType::Cpdlc);
        msg.add_seg(seg(MsgDir::Uplink, 1, vec![])).unwrap();
        msg.add_seg(seg(
            MsgDir::Uplink,
            6,
            vec![Arg::Altitude(Altitude::flight_level(390))],
        ))
        .unwrap();
        assert_eq!(msg.display_text(), "STANDBY. EXPECT FL390");
        assert_eq!(msg.dir(), Some(MsgDir::Uplink));
    }

    #[test]
    fn test_seg_limit() {
        let mut msg = Message::new(PacketType::Cpdlc);
        for _ in 0..MAX_MSG_SEGS {
            msg.add_seg(seg(MsgDir::Uplink, 3, vec![])).unwrap();
        }
        assert!(msg.add_seg(seg(MsgDir::Uplink, 3, vec![])).is_err());
    }

    #[test]
    fn test_header_fields() {
        let mut msg = Message::new(PacketType::Cpdlc);
        msg.set_from(CallSign::try_from("N12345").unwrap());
        msg.set_to(CallSign::try_from("KZOA").unwrap());
        msg.set_min(7);
        msg.set_mrn(3);
        msg.set_logon_data("SECRET");
        msg.add_option("ARINC622", None);
        assert_eq!(msg.from_id().unwrap().as_str(), "N12345");
        assert_eq!(msg.min(), Some(7));
        assert!(msg.is_logon());
        assert!(msg.find_option("ARINC622").is_some());
        assert!(msg.find_option("PLAIN").is_none());
    }
}
