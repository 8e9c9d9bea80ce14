use cpdlc_codec::MessageCodec;
use cpdlc_types::{
    arg::{Altitude, Arg, Speed, Time},
    catalog::{lookup, MsgDir},
    core::CallSign,
    message::{Message, PacketType, Segment},
    position::Position,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn representative_message() -> Message {
    let mut msg = Message::new(PacketType::Cpdlc);
    msg.set_from(CallSign::try_from("N12345").unwrap());
    msg.set_to(CallSign::try_from("KZOA").unwrap());
    msg.set_min(42);
    msg.set_mrn(17);
    msg.add_seg(
        Segment::new(
            lookup(MsgDir::Uplink, 63, None).unwrap(),
            vec![
                Arg::Time(Time::new(14, 30).unwrap()),
                Arg::Position("ALCOA".parse::<Position>().unwrap()),
                Arg::Altitude(Altitude::flight_level(350)),
                Arg::Speed(Speed::mach(820)),
            ],
        )
        .unwrap(),
    )
    .unwrap();
    msg
}

fn serialize_message(c: &mut Criterion) {
    let msg = representative_message();

    c.bench_function("serialize_message", |b| {
        b.iter(|| {
            let frame = MessageCodec::encode(black_box(&msg));
            black_box(frame);
        })
    });
}

fn parse_message(c: &mut Criterion) {
    let frame = MessageCodec::encode(&representative_message());

    c.bench_function("parse_message", |b| {
        b.iter(|| {
            let out = MessageCodec::decode(black_box(&frame)).unwrap();
            black_box(out);
        })
    });
}

criterion_group!(benches, serialize_message, parse_message);
criterion_main!(benches);
