//! Known-answer test helpers.

use cpdlc_types::message::Message;

use crate::MessageCodec;

/// For each `(input, expected_remainder, expected_message)` triple:
/// decode, compare, re-encode, and decode again. The re-encoded frame must
/// equal the consumed part of the input byte for byte.
pub(crate) fn kat_inverse(tests: &[(&[u8], &[u8], Message)]) {
    for (no, (input, expected_remainder, expected)) in tests.iter().enumerate() {
        println!("# {no}");

        let (got_remainder, got) = MessageCodec::decode(input).expect("first decoding failed");
        assert_eq!(expected, &got);
        assert_eq!(expected_remainder, &got_remainder);

        let got_frame = MessageCodec::encode(&got);
        assert_eq!(
            got_frame.as_slice(),
            &input[..input.len() - expected_remainder.len()],
            "re-encoded frame differs"
        );

        let (got_remainder, got_again) =
            MessageCodec::decode(&got_frame).expect("second decoding failed");
        assert_eq!(got, got_again);
        assert!(got_remainder.is_empty());
    }
}

/// Decodes `input`, asserts the remainder, and hands the message to
/// `check`.
pub(crate) fn kat_decode(input: &[u8], expected_remainder: &[u8], check: impl Fn(&Message)) {
    let (got_remainder, got) = MessageCodec::decode(input).expect("decoding failed");
    assert_eq!(expected_remainder, got_remainder);
    check(&got);
}
