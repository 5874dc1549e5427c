//! Integration tests for the tlv8 codec.
//!
//! These tests verify complete round-trips through the public API: building
//! entry trees, encoding them, and decoding them back with and without
//! expected-type schemas.

use tlv8::{
    decode, deep_decode, encode, encode_with_separator, format_string, DataType, Entry, EntryList,
    EnumDescriptor, Schema, TlvError, Value,
};

/// Encodes a list and decodes it back with the given schema, asserting that
/// the result matches the original.
fn roundtrip(list: &EntryList, schema: &Schema) {
    let bytes = encode(list).expect("encode must succeed");
    let decoded = decode(&bytes, Some(schema), false).expect("decode must succeed");
    assert_eq!(&decoded, list);
}

#[test]
fn test_roundtrip_scalars() {
    let list = EntryList::from(vec![
        Entry::new(1, b"\x01\x02\x03"),
        Entry::new(2, -12345),
        Entry::new(3, 0xDEAD_BEEFu64),
        Entry::new(4, 3.141f32),
        Entry::new(5, "hello world"),
    ]);
    let schema = Schema::new()
        .field(1, DataType::Bytes)
        .field(2, DataType::Integer)
        .field(3, DataType::UnsignedInteger)
        .field(4, DataType::Float)
        .field(5, DataType::String);
    roundtrip(&list, &schema);
}

#[test]
fn test_roundtrip_pairing_payload() {
    // Accessory pairing identifier plus a nested endpoint description, the
    // shape this codec is typically used for.
    let list = EntryList::from(vec![
        Entry::new(1, b"W\x1ah\xac)\x04C\xfd\x84\xb36\t\xd1\x1bO\x83"),
        Entry::new(
            3,
            vec![Entry::new(1, 0u64), Entry::new(2, "192.168.178.222")],
        ),
    ]);
    let schema = Schema::new().field(1, DataType::Bytes).field(
        3,
        Schema::new()
            .field(1, DataType::UnsignedInteger)
            .field(2, DataType::String),
    );

    let encoded = encode(&list).expect("encode must succeed");
    let decoded = decode(&encoded, Some(&schema), false).expect("decode must succeed");
    assert_eq!(decoded, list);

    // Re-encoding the decoded tree must reproduce the original bytes.
    let encoded_again = encode(&decoded).expect("re-encode must succeed");
    assert_eq!(encoded_again, encoded);
}

static METHOD: EnumDescriptor = EnumDescriptor::new("Method", &[("Bar", 1), ("Baz", 2)]);

#[test]
fn test_roundtrip_with_enumeration() {
    let list = EntryList::from(vec![
        Entry::new(1, b"W\x1ah\xac)\x04C\xfd\x84\xb36\t\xd1\x1bO\x83"),
        Entry::new(3, vec![Entry::new(1, 1u64), Entry::new(2, "192.168.178.222")]),
    ]);
    let schema = Schema::new().field(1, DataType::Bytes).field(
        3,
        Schema::new().field(1, &METHOD).field(2, DataType::String),
    );

    let encoded = encode(&list).expect("encode must succeed");
    let decoded = decode(&encoded, Some(&schema), false).expect("decode must succeed");
    assert_eq!(decoded, list);

    // The decoded member carries its symbolic name.
    let Value::List(nested) = &decoded[1].data else {
        panic!("expected nested list");
    };
    let Value::Enum(member) = &nested[0].data else {
        panic!("expected enum member");
    };
    assert_eq!(member.member, "Bar");

    // Enum members re-encode to the same bytes as the plain integer.
    let encoded_again = encode(&decoded).expect("re-encode must succeed");
    assert_eq!(encoded_again, encoded);
}

#[test]
fn test_roundtrip_fragmented_value() {
    let blob: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
    let list = EntryList::from(vec![Entry::new(9, blob.clone()), Entry::new(10, "tail")]);
    let schema = Schema::new()
        .field(9, DataType::Bytes)
        .field(10, DataType::String);

    let bytes = encode(&list).expect("encode must succeed");
    // 1000 bytes = 3 full fragments + 235 remainder, each with a 2-byte header.
    assert_eq!(bytes.len(), (2 + 255) * 3 + (2 + 235) + (2 + 4));
    roundtrip(&list, &schema);
}

#[test]
fn test_roundtrip_adjacent_same_type_entries() {
    let list = EntryList::from(vec![Entry::new(2, 0), Entry::new(2, 1)]);
    let schema = Schema::new().field(2, DataType::Integer);

    let bytes = encode(&list).expect("encode must succeed");
    assert_eq!(bytes, b"\x02\x01\x00\xff\x00\x02\x01\x01");

    // The separator is filtered out by the schema, leaving the two logical
    // entries.
    let decoded = decode(&bytes, Some(&schema), false).expect("decode must succeed");
    assert_eq!(decoded, list);
}

#[test]
fn test_roundtrip_zero_length_value() {
    let list = EntryList::from(vec![Entry::new(6, b"")]);
    let schema = Schema::new().field(6, DataType::Bytes);
    roundtrip(&list, &schema);
}

#[test]
fn test_roundtrip_length_overridden_integer() {
    // The width override forces an 8-byte frame; equality ignores the
    // override, so the round-trip still matches.
    let list = EntryList::from(vec![Entry::with_length(1, 1, DataType::Integer, 8)]);
    let schema = Schema::new().field(1, DataType::Integer);

    let bytes = encode(&list).expect("encode must succeed");
    assert_eq!(bytes, b"\x01\x08\x01\x00\x00\x00\x00\x00\x00\x00");
    roundtrip(&list, &schema);
}

#[test]
fn test_integer_width_selection_on_the_wire() {
    let bytes = encode(&EntryList::from(vec![Entry::new(1, 16384)])).unwrap();
    assert_eq!(bytes, b"\x01\x02\x00\x40");

    let bytes = encode(&EntryList::from(vec![Entry::new(1, 4611686018427387904i64)])).unwrap();
    assert_eq!(bytes, b"\x01\x08\x00\x00\x00\x00\x00\x00\x00\x40");
}

#[test]
fn test_schema_absent_decode_keeps_raw_bytes() {
    let list = EntryList::from(vec![Entry::new(1, 16384), Entry::new(2, "hi")]);
    let bytes = encode(&list).unwrap();

    let decoded = decode(&bytes, None, false).unwrap();
    assert_eq!(
        decoded,
        EntryList::from(vec![Entry::new(1, &[0x00, 0x40]), Entry::new(2, b"hi")])
    );
}

#[test]
fn test_strict_mode_rejects_missing_separator() {
    let input = b"\x01\x01\x02\x01\x01\x02";
    assert_eq!(
        decode(input, None, true),
        Err(TlvError::MissingSeparator(1))
    );
    assert_eq!(decode(input, None, false).unwrap().len(), 2);
}

#[test]
fn test_separator_collision_is_reported() {
    let list = EntryList::from(vec![Entry::new(7, "a"), Entry::new(7, "b")]);
    assert_eq!(
        encode_with_separator(&list, 7),
        Err(TlvError::SeparatorCollision(7))
    );
}

#[test]
fn test_deep_decode_recovers_nested_structure() {
    let list = EntryList::from(vec![
        Entry::new(1, vec![Entry::new(3, b"\x01\x02"), Entry::new(4, b"\x03")]),
        Entry::new(2, 1u64),
    ]);
    let bytes = encode(&list).unwrap();

    let decoded = deep_decode(&bytes, false).unwrap();
    // The nested value frames as TLV and is recursed into; the 1-byte
    // integer value cannot frame and stays raw.
    assert_eq!(
        decoded,
        EntryList::from(vec![
            Entry::new(
                1,
                vec![Entry::new(3, b"\x01\x02"), Entry::new(4, b"\x03")]
            ),
            Entry::new(2, b"\x01"),
        ])
    );
}

#[test]
fn test_format_string_of_decoded_tree() {
    let schema = Schema::new()
        .field(1, DataType::Float)
        .field(
            2,
            Schema::new()
                .field(3, DataType::String)
                .field(4, DataType::String),
        )
        .field(3, DataType::Integer);
    let decoded = decode(
        b"\x01\x04\x25\x06\x49\x40\x02\x0e\x03\x05hello\x04\x05world\x03\x01\x02",
        Some(&schema),
        false,
    )
    .unwrap();

    let expected = "\
[
  <1, 3.141>,
  <2, [
    <3, hello>,
    <4, world>,
  ]>,
  <3, 2>,
]";
    assert_eq!(format_string(&decoded, 0), expected);
}

#[test]
fn test_lookup_helpers_on_decoded_list() {
    let list = EntryList::from(vec![
        Entry::new(2, b"\x23"),
        Entry::new(2, b"\x42"),
        Entry::new(5, "x"),
    ]);
    let bytes = encode(&list).unwrap();
    let decoded = decode(&bytes, None, false).unwrap();

    assert_eq!(decoded.by_id(2).len(), 2);
    assert_eq!(decoded.first_by_id(5), Some(&decoded[3]));
    assert!(decoded.assert_has(5, "endpoint missing").is_ok());
    assert_eq!(
        decoded.assert_has(9, "endpoint missing"),
        Err(TlvError::MissingEntry {
            type_id: 9,
            message: "endpoint missing".to_string(),
        })
    );
}
