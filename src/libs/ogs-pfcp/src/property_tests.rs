//! Property-Based Tests for the PFCP codecs
//!
//! Header and body encode/decode round-trips, header length selection and
//! the 24-bit sequence number bound.

use bytes::{BufMut, Bytes, BytesMut};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

use crate::header::{header_len, PfcpHeader, PFCP_MAX_SEQUENCE_NUMBER};
use crate::ie::{decode_body, encode_body, FieldSpec, Schema, Structure, Value, ValueKind};
use crate::message::PfcpMessage;
use crate::types::RecoveryTimeStamp;

static INNER: Schema = Schema {
    name: "Inner",
    fields: &[
        FieldSpec::required("Id", 1, ValueKind::U16),
        FieldSpec::optional("Name", 2, ValueKind::Str),
        FieldSpec::repeated("Flags", 3, ValueKind::U8),
    ],
};

static OUTER: Schema = Schema {
    name: "Outer",
    fields: &[
        FieldSpec::required("A", 10, ValueKind::U32),
        FieldSpec::optional("B", 11, ValueKind::I64),
        FieldSpec::optional("C", 12, ValueKind::Bytes),
        FieldSpec::repeated("D", 13, ValueKind::U16),
        FieldSpec::repeated("E", 14, ValueKind::Struct(&INNER)),
        FieldSpec::optional("F", 15, ValueKind::Struct(&INNER)),
        FieldSpec::optional("G", 16, ValueKind::I8),
    ],
};

fn inner_strategy() -> impl Strategy<Value = Structure> {
    (any::<u16>(), option::of(".{0,8}"), vec(any::<u8>(), 0..4)).prop_map(|(id, name, flags)| {
        let mut s = Structure::new().with(1, id);
        if let Some(name) = name {
            s.set(2, Value::Str(name));
        }
        s.set_all(3, flags.into_iter().map(Value::U8).collect());
        s
    })
}

fn outer_strategy() -> impl Strategy<Value = Structure> {
    (
        any::<u32>(),
        option::of(any::<i64>()),
        option::of(vec(any::<u8>(), 0..32)),
        vec(any::<u16>(), 0..5),
        vec(inner_strategy(), 0..3),
        option::of(inner_strategy()),
        option::of(any::<i8>()),
    )
        .prop_map(|(a, b, c, d, e, f, g)| {
            let mut s = Structure::new().with(10, a);
            if let Some(b) = b {
                s.set(11, Value::I64(b));
            }
            if let Some(c) = c {
                s.set(12, Bytes::from(c));
            }
            s.set_all(13, d.into_iter().map(Value::U16).collect());
            s.set_all(14, e.into_iter().map(Value::Struct).collect());
            if let Some(f) = f {
                s.set(15, f);
            }
            if let Some(g) = g {
                s.set(16, Value::I8(g));
            }
            s
        })
}

fn header_strategy() -> impl Strategy<Value = PfcpHeader> {
    (
        0u8..8,
        any::<u8>(),
        any::<u16>(),
        option::of(any::<u64>()),
        0..=PFCP_MAX_SEQUENCE_NUMBER,
        option::of(0u8..16),
    )
        .prop_map(|(version, message_type, length, seid, sequence_number, priority)| PfcpHeader {
            version,
            message_type,
            length,
            seid,
            sequence_number,
            priority,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_header_round_trip(header in header_strategy()) {
        let mut buf = BytesMut::new();
        header.encode(&mut buf).unwrap();
        prop_assert_eq!(buf.len(), header.encoded_len());

        let mut bytes = buf.freeze();
        let decoded = PfcpHeader::decode(&mut bytes).unwrap();
        prop_assert_eq!(decoded, header);
        prop_assert!(bytes.is_empty());
    }

    #[test]
    fn prop_header_len_by_type(node in 1u8..=15, session in 50u8..=57) {
        prop_assert_eq!(header_len(node), 8);
        prop_assert_eq!(header_len(session), 16);
    }

    #[test]
    fn prop_sequence_number_bound(sequence_number in (PFCP_MAX_SEQUENCE_NUMBER + 1)..=u32::MAX) {
        let mut header = PfcpHeader::decode(&mut Bytes::from_static(&[0x20, 1, 0, 4, 0, 0, 1, 0])).unwrap();
        header.sequence_number = sequence_number;
        let mut buf = BytesMut::new();
        prop_assert!(header.encode(&mut buf).is_err());
    }

    #[test]
    fn prop_body_round_trip(body in outer_strategy()) {
        let mut buf = BytesMut::new();
        encode_body(&body, &OUTER, &mut buf).unwrap();
        let decoded = decode_body(buf.freeze(), &OUTER).unwrap();
        prop_assert_eq!(decoded, body);
    }

    #[test]
    fn prop_duplicate_singular_tag_last_wins(first in any::<u32>(), second in any::<u32>()) {
        let mut buf = BytesMut::new();
        for value in [first, second] {
            buf.put_u16(10);
            buf.put_u16(4);
            buf.put_u32(value);
        }
        let decoded = decode_body(buf.freeze(), &OUTER).unwrap();
        prop_assert_eq!(decoded.get_u32(10), Some(second));
    }

    #[test]
    fn prop_heartbeat_round_trip(
        recovery in any::<u32>(),
        sequence_number in 0..=PFCP_MAX_SEQUENCE_NUMBER,
    ) {
        let mut msg = PfcpMessage::heartbeat_request(sequence_number, RecoveryTimeStamp(recovery));
        let bytes = msg.encode().unwrap();
        let decoded = PfcpMessage::decode(bytes).unwrap();
        prop_assert_eq!(decoded, msg);
    }
}
