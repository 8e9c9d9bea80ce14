//! # (De)serialization of messages.
//!
//! [`MessageCodec`] is the single entry point: [`MessageCodec::encode`]
//! produces the exact bytes of one wire frame, and
//! [`MessageCodec::decode`] incrementally consumes frames from a receive
//! buffer.

pub mod decode;
pub mod encode;

use cpdlc_types::message::Message;

use crate::codec::decode::MessageDecodeError;

/// Codec for CPDLC wire messages.
#[derive(Debug)]
pub struct MessageCodec;

impl MessageCodec {
    /// Encodes `msg` into its complete wire frame, newline included.
    pub fn encode(msg: &Message) -> Vec<u8> {
        encode::encode(msg)
    }

    /// Attempts to decode one message, returning the unconsumed rest.
    pub fn decode(input: &[u8]) -> Result<(&[u8], Message), MessageDecodeError> {
        decode::decode(input)
    }
}

#[cfg(test)]
mod tests {
    use cpdlc_types::{
        arg::{
            Altitude, Arg, Baro, Degrees, Direction, DistanceOffset, ErrInfo, FacilityFunction,
            HoldLeg, IcaoName, Procedure, ProcKind, Speed, Time, ToFrom, Tp4Label,
        },
        catalog::{lookup, MsgDir},
        core::{AtisCode, CallSign, Squawk},
        message::{Imi, Message, PacketType, Segment},
        pdc::Pdc,
        position::Position,
        posreport::PosReport,
        route::Route,
    };

    use super::*;
    use crate::testing::{kat_decode, kat_inverse};

    fn msg_with_seg(dir: MsgDir, ty: u8, subtype: Option<char>, args: Vec<Arg>) -> Message {
        let mut msg = Message::new(PacketType::Cpdlc);
        msg.set_from(CallSign::try_from("N12345").unwrap());
        msg.set_to(CallSign::try_from("KZOA").unwrap());
        msg.set_min(7);
        msg.add_seg(Segment::new(lookup(dir, ty, subtype).unwrap(), args).unwrap())
            .unwrap();
        msg
    }

    #[test]
    fn test_kat_inverse_basic() {
        let mut reply = msg_with_seg(MsgDir::Uplink, 19, None, vec![Arg::Altitude(
            Altitude::flight_level(350),
        )]);
        reply.set_mrn(3);

        kat_inverse(&[
            (
                b"PKT=CPDLC/FROM=N12345/TO=KZOA/MIN=7/DATA=DM6 FL350\n".as_ref(),
                b"".as_ref(),
                msg_with_seg(MsgDir::Downlink, 6, None, vec![Arg::Altitude(
                    Altitude::flight_level(350),
                )]),
            ),
            (
                b"PKT=CPDLC/FROM=N12345/TO=KZOA/MIN=7/MRN=3/DATA=UM19 FL350\n???",
                b"???",
                reply,
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_logon_and_options() {
        let mut logon = Message::new(PacketType::Cpdlc);
        logon.set_from(CallSign::try_from("N12345").unwrap());
        logon.set_to(CallSign::try_from("KZOA").unwrap());
        logon.set_logon_data("SECRET123");
        logon.add_option("PLAIN", None);
        logon.add_option("ARINC622", None);

        let mut logoff = Message::new(PacketType::Cpdlc);
        logoff.set_from(CallSign::try_from("N12345").unwrap());
        logoff.set_logoff(true);

        kat_inverse(&[
            (
                b"PKT=CPDLC/FROM=N12345/TO=KZOA/LOGON=SECRET123/OPT=PLAIN/OPT=ARINC622\n"
                    .as_ref(),
                b"".as_ref(),
                logon,
            ),
            (b"PKT=CPDLC/FROM=N12345/LOGOFF\n", b"", logoff),
            (b"PKT=PING\n", b"", Message::new(PacketType::Ping)),
            (b"PKT=PONG\n", b"", Message::new(PacketType::Pong)),
        ]);
    }

    #[test]
    fn test_kat_inverse_every_argument_shape() {
        let cases: Vec<Message> = vec![
            // Multi-segment with standby + expect.
            {
                let mut msg = msg_with_seg(MsgDir::Uplink, 1, None, vec![]);
                msg.add_seg(
                    Segment::new(
                        lookup(MsgDir::Uplink, 6, None).unwrap(),
                        vec![Arg::Altitude(Altitude::flight_level(390))],
                    )
                    .unwrap(),
                )
                .unwrap();
                msg
            },
            msg_with_seg(MsgDir::Uplink, 55, None, vec![
                Arg::Position("ALCOA".parse::<Position>().unwrap()),
                Arg::Speed(Speed::mach(820)),
            ]),
            msg_with_seg(MsgDir::Uplink, 64, None, vec![Arg::DistanceOffset(
                DistanceOffset::new(Direction::Left, 12.5).unwrap(),
            )]),
            msg_with_seg(MsgDir::Uplink, 79, None, vec![
                Arg::Position("KLAX".parse::<Position>().unwrap()),
                Arg::Route(Box::new(
                    "KSFO OFFSH9 SXC N3322.50W11845.20 SXC/240/25.0 KLAX"
                        .parse::<Route>()
                        .unwrap(),
                )),
            ]),
            msg_with_seg(MsgDir::Uplink, 81, None, vec![Arg::Procedure(
                Procedure::new(ProcKind::Sid, "OFFSH9", Some("SXC")).unwrap(),
            )]),
            msg_with_seg(MsgDir::Uplink, 91, None, vec![
                Arg::Position("ALCOA".parse::<Position>().unwrap()),
                Arg::Altitude(Altitude::flight_level(310)),
                Arg::Degrees(Degrees::new(270, false).unwrap()),
                Arg::Direction(Direction::Right),
                Arg::LegType(HoldLeg::Time(2.0)),
            ]),
            msg_with_seg(MsgDir::Uplink, 117, None, vec![
                Arg::IcaoName(IcaoName::from_name("OAKLAND CENTER", FacilityFunction::Center)
                    .unwrap()),
                Arg::Frequency(121.5),
            ]),
            msg_with_seg(MsgDir::Uplink, 123, None, vec![Arg::Squawk(
                Squawk::new(0o2045).unwrap(),
            )]),
            msg_with_seg(MsgDir::Uplink, 153, None, vec![Arg::Baro(Baro::in_hg(29.92))]),
            msg_with_seg(MsgDir::Uplink, 158, None, vec![Arg::AtisCode(
                AtisCode::new('C').unwrap(),
            )]),
            msg_with_seg(MsgDir::Uplink, 160, None, vec![Arg::IcaoId(
                "KZAK".parse().unwrap(),
            )]),
            msg_with_seg(MsgDir::Uplink, 163, None, vec![
                Arg::IcaoId("KZOA".parse().unwrap()),
                Arg::Tp4Table(Tp4Label::LabelA),
            ]),
            msg_with_seg(MsgDir::Uplink, 169, None, vec![Arg::Freetext(
                "REPORT 10 MILES, THEN CONTACT ON 121.5".to_owned(),
            )]),
            msg_with_seg(MsgDir::Uplink, 171, None, vec![Arg::Vvi(1500)]),
            msg_with_seg(MsgDir::Uplink, 181, None, vec![
                Arg::ToFrom(ToFrom::From),
                Arg::Position("OAK".parse::<Position>().unwrap()),
            ]),
            msg_with_seg(MsgDir::Downlink, 13, None, vec![
                Arg::Time(Time::new(14, 30).unwrap()),
                Arg::Altitude(Altitude::flight_level(370)),
            ]),
            msg_with_seg(MsgDir::Downlink, 62, None, vec![Arg::ErrInfo(ErrInfo::AppError)]),
            msg_with_seg(MsgDir::Downlink, 67, Some('h'), vec![Arg::Altitude(
                Altitude::flight_level(390),
            )]),
            msg_with_seg(MsgDir::Downlink, 73, None, vec![Arg::Version(1)]),
            msg_with_seg(MsgDir::Downlink, 78, None, vec![
                Arg::Time(Time::new(18, 20).unwrap()),
                Arg::Distance(42.0),
                Arg::ToFrom(ToFrom::To),
                Arg::Position("ALCOA".parse::<Position>().unwrap()),
            ]),
            msg_with_seg(MsgDir::Downlink, 48, None, vec![Arg::PosReport(Box::new(
                "1820Z ALCOA FL330 CLB FL350 M820 NEXT SKUNK 1835Z DEST KSFO ETA 1950Z \
                 WIND 270045KT OAT -42"
                    .parse::<PosReport>()
                    .unwrap(),
            ))]),
            msg_with_seg(MsgDir::Uplink, 73, None, vec![Arg::Pdc(Box::new(
                "N12345 TYPE B738 DEP 1430Z RTE KSFO OFFSH9 SXC KLAX ALT FL190 \
                 FREQ 121.650 SQUAWK 2045 REV 1"
                    .parse::<Pdc>()
                    .unwrap(),
            ))]),
        ];

        for msg in cases {
            let frame = MessageCodec::encode(&msg);
            let (rest, decoded) = MessageCodec::decode(&frame)
                .unwrap_or_else(|err| panic!("{:?} on {:?}", err, String::from_utf8_lossy(&frame)));
            assert!(rest.is_empty());
            assert_eq!(decoded, msg, "frame {:?}", String::from_utf8_lossy(&frame));
        }
    }

    #[test]
    fn test_arinc622_roundtrip() {
        let mut msg = msg_with_seg(MsgDir::Downlink, 73, None, vec![Arg::Version(1)]);
        msg.fmt_arinc622 = true;
        msg.set_imi(Imi::ConnConfirm);

        let frame = MessageCodec::encode(&msg);
        assert!(frame.starts_with(b"/KZOA.CC1.N12345 PKT=CPDLC"));
        let (rest, decoded) = MessageCodec::decode(&frame).unwrap();
        assert!(rest.is_empty());
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_decode_incomplete() {
        for partial in [
            b"".as_ref(),
            b"P",
            b"PKT=CPDLC",
            b"PKT=CPDLC/FROM=N12345/DATA=DM6 FL350",
        ] {
            assert_eq!(
                MessageCodec::decode(partial),
                Err(decode::MessageDecodeError::Incomplete)
            );
        }
    }

    #[test]
    fn test_decode_failed() {
        let malformed: &[&[u8]] = &[
            // PKT missing or not first.
            b"FROM=N12345/PKT=CPDLC\n",
            b"PKT=WAT\n",
            // Unknown or unused type codes.
            b"PKT=CPDLC/DATA=UM200 FL350\n",
            b"PKT=CPDLC/DATA=UM178\n",
            b"PKT=CPDLC/DATA=DM55\n",
            b"PKT=CPDLC/DATA=DM67a HELLO\n",
            // Arity and argument-form mismatches.
            b"PKT=CPDLC/DATA=DM6\n",
            b"PKT=CPDLC/DATA=DM6 FL350 FL360\n",
            b"PKT=CPDLC/DATA=DM6 HELLO\n",
            b"PKT=CPDLC/DATA=UM19 12AB\n",
            // Duplicate header tokens.
            b"PKT=CPDLC/MIN=1/MIN=2\n",
            b"PKT=CPDLC/FROM=A/FROM=B\n",
            // Bad escapes.
            b"PKT=CPDLC/FROM=N%zz345\n",
        ];
        for frame in malformed {
            assert_eq!(
                MessageCodec::decode(frame),
                Err(decode::MessageDecodeError::Failed),
                "frame {:?}",
                String::from_utf8_lossy(frame)
            );
        }
    }

    #[test]
    fn test_decode_ignores_unknown_tokens() {
        kat_decode(
            b"PKT=CPDLC/XFUTURE=1/FROM=N12345/WAT/DATA=DM3\n",
            b"",
            |msg| {
                assert_eq!(msg.from_id().unwrap().as_str(), "N12345");
                assert_eq!(msg.segs().len(), 1);
                assert_eq!(msg.segs()[0].template().ty, 3);
            },
        );
    }

    #[test]
    fn test_decode_eight_segments_max() {
        let mut frame = b"PKT=CPDLC/FROM=N12345".to_vec();
        for _ in 0..8 {
            frame.extend_from_slice(b"/DATA=DM3");
        }
        let mut overflow = frame.clone();
        frame.push(b'\n');
        let (_, msg) = MessageCodec::decode(&frame).unwrap();
        assert_eq!(msg.segs().len(), 8);

        overflow.extend_from_slice(b"/DATA=DM3\n");
        assert_eq!(
            MessageCodec::decode(&overflow),
            Err(decode::MessageDecodeError::Failed)
        );
    }

    #[test]
    fn test_decode_frame_too_long() {
        let frame = vec![b'A'; decode::MAX_FRAME_LEN + 1];
        assert_eq!(
            MessageCodec::decode(&frame),
            Err(decode::MessageDecodeError::FrameTooLong)
        );
    }

    #[test]
    fn test_escaped_fields_roundtrip() {
        // Freetext with every byte class the escape cares about.
        let msg = msg_with_seg(MsgDir::Downlink, 67, None, vec![Arg::Freetext(
            "A/B=C%D, AND. SOME SPACES".to_owned(),
        )]);
        let frame = MessageCodec::encode(&msg);
        let (_, decoded) = MessageCodec::decode(&frame).unwrap();
        assert_eq!(decoded, msg);
    }
}
