//! Schema-driven IE encoder and decoder

use bytes::{BufMut, Bytes, BytesMut};

use super::schema::{Cardinality, FieldSpec, Schema, ValueKind};
use super::value::{FieldValue, Structure, Value};
use super::{FragmentSet, IeHeader};
use crate::error::{PfcpError, PfcpResult};

/// Decode a message body (a bare run of IEs) against `schema`
///
/// Fields are filled in schema order. Tags the schema does not declare
/// are dropped. When a singular field's tag occurs more than once, the
/// last occurrence wins.
pub fn decode_body(buf: Bytes, schema: &'static Schema) -> PfcpResult<Structure> {
    let fragments = FragmentSet::parse(buf)?;
    decode_fields(&fragments, schema)
}

/// Encode `body` as a bare run of IEs, with no enclosing IE header
pub fn encode_body(body: &Structure, schema: &'static Schema, buf: &mut BytesMut) -> PfcpResult<()> {
    for field in schema.fields {
        let tag = field_tag(schema, field)?;
        let Some(content) = body.field(tag) else {
            continue;
        };

        match (field.cardinality, content) {
            (Cardinality::Repeated, FieldValue::Repeated(values)) => {
                for value in values {
                    encode_ie(tag, value, schema, field, buf)?;
                }
            }
            (Cardinality::Required | Cardinality::Optional, FieldValue::Single(value)) => {
                encode_ie(tag, value, schema, field, buf)?;
            }
            _ => {
                return Err(PfcpError::ValueKindMismatch {
                    schema: schema.name,
                    field: field.name,
                })
            }
        }
    }
    Ok(())
}

fn field_tag(schema: &'static Schema, field: &'static FieldSpec) -> PfcpResult<u16> {
    field.tag.ok_or(PfcpError::MissingTag {
        schema: schema.name,
        field: field.name,
    })
}

fn decode_fields(fragments: &FragmentSet, schema: &'static Schema) -> PfcpResult<Structure> {
    let mut structure = Structure::new();

    for field in schema.fields {
        let tag = field_tag(schema, field)?;
        let spans = fragments.get(tag);
        if spans.is_empty() {
            continue;
        }

        if field.cardinality.is_repeated() {
            let values = spans
                .iter()
                .map(|span| decode_value(tag, &field.kind, span.clone()))
                .collect::<PfcpResult<Vec<_>>>()?;
            structure.insert_field(tag, FieldValue::Repeated(values));
        } else {
            let mut last = None;
            for span in spans {
                last = Some(decode_value(tag, &field.kind, span.clone())?);
            }
            if let Some(value) = last {
                structure.insert_field(tag, FieldValue::Single(value));
            }
        }
    }

    Ok(structure)
}

fn decode_value(tag: u16, kind: &ValueKind, data: Bytes) -> PfcpResult<Value> {
    if let Some(width) = kind.fixed_width() {
        if data.len() != width {
            return Err(PfcpError::InvalidIeLength {
                tag,
                expected: width,
                actual: data.len(),
            });
        }
    }

    let d = &data[..];
    let value = match kind {
        ValueKind::I8 => Value::I8(d[0] as i8),
        ValueKind::U8 => Value::U8(d[0]),
        ValueKind::I16 => Value::I16(i16::from_be_bytes([d[0], d[1]])),
        ValueKind::U16 => Value::U16(u16::from_be_bytes([d[0], d[1]])),
        ValueKind::I32 => Value::I32(i32::from_be_bytes([d[0], d[1], d[2], d[3]])),
        ValueKind::U32 => Value::U32(u32::from_be_bytes([d[0], d[1], d[2], d[3]])),
        ValueKind::I64 => Value::I64(i64::from_be_bytes([
            d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7],
        ])),
        ValueKind::U64 => Value::U64(u64::from_be_bytes([
            d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7],
        ])),
        ValueKind::Bytes => Value::Bytes(data),
        ValueKind::Str => {
            let text = std::str::from_utf8(d).map_err(|_| PfcpError::InvalidText { tag })?;
            Value::Str(text.to_owned())
        }
        ValueKind::Struct(schema) => Value::Struct(decode_body(data, *schema)?),
    };
    Ok(value)
}

fn encode_ie(
    tag: u16,
    value: &Value,
    schema: &'static Schema,
    field: &'static FieldSpec,
    buf: &mut BytesMut,
) -> PfcpResult<()> {
    if !value.matches(&field.kind) {
        return Err(PfcpError::ValueKindMismatch {
            schema: schema.name,
            field: field.name,
        });
    }

    // Length is patched once the value is written
    let start = buf.len();
    IeHeader::new(tag, 0).encode(buf);

    match (value, &field.kind) {
        (Value::I8(v), _) => buf.put_i8(*v),
        (Value::U8(v), _) => buf.put_u8(*v),
        (Value::I16(v), _) => buf.put_i16(*v),
        (Value::U16(v), _) => buf.put_u16(*v),
        (Value::I32(v), _) => buf.put_i32(*v),
        (Value::U32(v), _) => buf.put_u32(*v),
        (Value::I64(v), _) => buf.put_i64(*v),
        (Value::U64(v), _) => buf.put_u64(*v),
        (Value::Bytes(v), _) => buf.put_slice(v),
        (Value::Str(v), _) => buf.put_slice(v.as_bytes()),
        (Value::Struct(inner), ValueKind::Struct(inner_schema)) => {
            encode_body(inner, *inner_schema, buf)?;
        }
        (Value::Struct(_), _) => {
            return Err(PfcpError::ValueKindMismatch {
                schema: schema.name,
                field: field.name,
            })
        }
    }

    let length = buf.len() - start - IeHeader::LEN;
    let length = u16::try_from(length).map_err(|_| PfcpError::IeTooLong { tag, length })?;
    buf[start + 2..start + IeHeader::LEN].copy_from_slice(&length.to_be_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    static LEAF: Schema = Schema {
        name: "Leaf",
        fields: &[
            FieldSpec::required("Id", 1, ValueKind::U16),
            FieldSpec::optional("Label", 2, ValueKind::Str),
        ],
    };

    static MIXED: Schema = Schema {
        name: "Mixed",
        fields: &[
            FieldSpec::required("Cause", 19, ValueKind::U8),
            FieldSpec::optional("Offset", 7, ValueKind::I32),
            FieldSpec::optional("Blob", 8, ValueKind::Bytes),
            FieldSpec::repeated("Ids", 81, ValueKind::U32),
            FieldSpec::repeated("Leaves", 3, ValueKind::Struct(&LEAF)),
            FieldSpec::optional("Single Leaf", 4, ValueKind::Struct(&LEAF)),
        ],
    };

    static UNTAGGED: Schema = Schema {
        name: "Untagged",
        fields: &[FieldSpec {
            name: "Nameless",
            tag: None,
            cardinality: Cardinality::Optional,
            kind: ValueKind::U8,
        }],
    };

    fn encode(body: &Structure, schema: &'static Schema) -> Bytes {
        let mut buf = BytesMut::new();
        encode_body(body, schema, &mut buf).unwrap();
        buf.freeze()
    }

    fn leaf(id: u16) -> Structure {
        Structure::new().with(1, id)
    }

    #[test]
    fn test_top_level_has_no_wrapper() {
        let body = Structure::new().with(19, 1u8);
        assert_eq!(&encode(&body, &MIXED)[..], &[0x00, 0x13, 0x00, 0x01, 0x01]);
    }

    #[test]
    fn test_nested_struct_wrapped_in_its_tag() {
        let body = Structure::new().with(4, leaf(0x0102).with(2, "ab"));
        let bytes = encode(&body, &MIXED);
        assert_eq!(
            &bytes[..],
            &[
                0x00, 0x04, 0x00, 0x0C, // Single Leaf, 12 bytes
                0x00, 0x01, 0x00, 0x02, 0x01, 0x02, // Id
                0x00, 0x02, 0x00, 0x02, b'a', b'b', // Label
            ]
        );
        assert_eq!(decode_body(bytes, &MIXED).unwrap(), body);
    }

    #[test]
    fn test_repeated_field_emits_one_ie_per_element() {
        let body = Structure::new()
            .with_item(81, 7u32)
            .with_item(81, 9u32);
        let bytes = encode(&body, &MIXED);
        assert_eq!(
            &bytes[..],
            &[0, 81, 0, 4, 0, 0, 0, 7, 0, 81, 0, 4, 0, 0, 0, 9]
        );
    }

    #[test]
    fn test_roundtrip_mixed() {
        let body = Structure::new()
            .with(19, 64u8)
            .with(7, Value::I32(-5))
            .with(8, Bytes::from_static(b"\x00\xff"))
            .with_item(81, 1u32)
            .with_item(81, 2u32)
            .with_item(3, leaf(10))
            .with_item(3, leaf(11).with(2, "x"));

        let bytes = encode(&body, &MIXED);
        assert_eq!(decode_body(bytes, &MIXED).unwrap(), body);
    }

    #[test]
    fn test_decode_preserves_order_within_tag() {
        // Ids interleaved with Cause on the wire
        let wire = Bytes::from_static(&[
            0, 81, 0, 4, 0, 0, 0, 3, //
            0, 19, 0, 1, 1, //
            0, 81, 0, 4, 0, 0, 0, 1, //
            0, 81, 0, 4, 0, 0, 0, 2,
        ]);
        let body = decode_body(wire, &MIXED).unwrap();
        let ids: Vec<_> = body.get_all(81).iter().filter_map(Value::as_u32).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(body.get_u8(19), Some(1));
    }

    #[test]
    fn test_duplicate_singular_tag_last_wins() {
        let wire = Bytes::from_static(&[0, 19, 0, 1, 1, 0, 19, 0, 1, 64]);
        let body = decode_body(wire, &MIXED).unwrap();
        assert_eq!(body.get_u8(19), Some(64));
    }

    #[test]
    fn test_unknown_tag_ignored() {
        let wire = Bytes::from_static(&[0, 200, 0, 2, 9, 9, 0, 19, 0, 1, 1]);
        let body = decode_body(wire, &MIXED).unwrap();
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_integer_width_enforced() {
        let wire = Bytes::from_static(&[0, 19, 0, 2, 0, 1]);
        assert!(matches!(
            decode_body(wire, &MIXED),
            Err(PfcpError::InvalidIeLength { tag: 19, expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_truncated_ie() {
        let wire = Bytes::from_static(&[0, 19, 0, 4, 1]);
        assert!(matches!(
            decode_body(wire, &MIXED),
            Err(PfcpError::TruncatedIe { .. })
        ));
    }

    #[test]
    fn test_invalid_text() {
        let wire = Bytes::from_static(&[0, 4, 0, 5, 0, 2, 0, 1, 0xff]);
        assert!(matches!(
            decode_body(wire, &MIXED),
            Err(PfcpError::InvalidText { tag: 2 })
        ));
    }

    #[test]
    fn test_missing_tag_is_schema_error() {
        let err = decode_body(Bytes::new(), &UNTAGGED).unwrap_err();
        assert!(err.is_schema_error());

        let mut buf = BytesMut::new();
        let err = encode_body(&Structure::new(), &UNTAGGED, &mut buf).unwrap_err();
        assert!(matches!(err, PfcpError::MissingTag { field: "Nameless", .. }));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut buf = BytesMut::new();
        let body = Structure::new().with(19, 1u32);
        assert!(matches!(
            encode_body(&body, &MIXED, &mut buf),
            Err(PfcpError::ValueKindMismatch { field: "Cause", .. })
        ));

        let body = Structure::new().with(81, 1u32);
        assert!(matches!(
            encode_body(&body, &MIXED, &mut buf),
            Err(PfcpError::ValueKindMismatch { field: "Ids", .. })
        ));
    }

    #[test]
    fn test_ie_too_long() {
        let mut buf = BytesMut::new();
        let body = Structure::new().with(8, Bytes::from(vec![0u8; 70_000]));
        assert!(matches!(
            encode_body(&body, &MIXED, &mut buf),
            Err(PfcpError::IeTooLong { tag: 8, length: 70_000 })
        ));
    }
}
