//! Parsing TLV8 byte streams back into entry lists.
//!
//! Decoding is a two-pass design:
//!
//! 1. **Framing and reassembly** – scan the buffer record by record,
//!    merging continuation fragments (same type id after an exact positive
//!    multiple of 255 accumulated bytes) into one logical entry.
//! 2. **Schema coercion** – if the caller supplied an expected-type
//!    [`Schema`], reinterpret each entry's raw bytes as the scheduled type,
//!    recursing into nested structures. Entries absent from the schema are
//!    dropped.

use tracing::{debug, trace, warn};

use crate::codec::{TlvError, MAX_FRAGMENT_LEN};
use crate::model::{DataType, Entry, EntryList, EnumValue, Value};
use crate::schema::{Schema, SchemaNode};

// ── Public API ────────────────────────────────────────────────────────────────

/// Decodes a byte buffer into an [`EntryList`].
///
/// Without a schema every value stays raw bytes and every parsed record
/// (including separators) surfaces as an entry. With a schema, values are
/// coerced to the expected types and entries with unknown type ids are
/// silently dropped.
///
/// In strict mode, adjacent records sharing a type id without a fragment
/// boundary between them are rejected instead of being split into two
/// entries.
///
/// # Errors
///
/// Returns [`TlvError`] on truncated or overrunning records, missing
/// separators in strict mode, and any schema coercion failure.
///
/// # Examples
///
/// ```rust
/// use tlv8::{decode, DataType, Entry, EntryList, Schema};
///
/// let schema = Schema::new().field(2, DataType::Integer);
/// let decoded = decode(b"\x02\x01\x23\x03\x01\x42", Some(&schema), false).unwrap();
/// assert_eq!(decoded, EntryList::from(vec![Entry::new(2, 0x23)]));
/// ```
pub fn decode(
    data: &[u8],
    expected: Option<&Schema>,
    strict_mode: bool,
) -> Result<EntryList, TlvError> {
    let records = parse_records(data, strict_mode)?;
    match expected {
        None => Ok(records.into_iter().map(raw_entry).collect()),
        Some(schema) => apply_schema(records, schema, strict_mode),
    }
}

/// Schema-free decode that attempts to sub-parse every value as nested TLV8.
///
/// Each non-empty value is recursively decoded; when the sub-parse succeeds
/// the value becomes a nested list, otherwise it stays raw bytes. No type
/// coercion beyond nesting is performed.
///
/// # Errors
///
/// Returns [`TlvError`] if the top-level buffer itself is malformed; nested
/// sub-parse failures are not errors, they leave the value raw.
pub fn deep_decode(data: &[u8], strict_mode: bool) -> Result<EntryList, TlvError> {
    let records = parse_records(data, strict_mode)?;
    let mut result = EntryList::new();
    for record in records {
        if !record.value.is_empty() {
            if let Ok(nested) = deep_decode(&record.value, strict_mode) {
                result.push(Entry::typed(record.type_id, nested, DataType::Tlv8));
                continue;
            }
        }
        result.push(raw_entry(record));
    }
    Ok(result)
}

// ── Pass 1: framing and fragment reassembly ───────────────────────────────────

/// One reassembled logical record before type coercion.
struct RawRecord {
    type_id: u8,
    value: Vec<u8>,
}

fn raw_entry(record: RawRecord) -> Entry {
    Entry::typed(record.type_id, record.value, DataType::Bytes)
}

fn parse_records(data: &[u8], strict_mode: bool) -> Result<Vec<RawRecord>, TlvError> {
    let mut records: Vec<RawRecord> = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        if rest.len() < 2 {
            return Err(TlvError::TruncatedRecord {
                available: rest.len(),
            });
        }
        let type_id = rest[0];
        let length = rest[1] as usize;
        let available = rest.len() - 2;
        if length > available {
            return Err(TlvError::LengthOverrun {
                declared: length,
                available,
            });
        }
        let value = &rest[2..2 + length];
        trace!(type_id, length, "parsed record");

        match records.last_mut() {
            Some(prev) if prev.type_id == type_id => {
                if !prev.value.is_empty() && prev.value.len() % MAX_FRAGMENT_LEN == 0 {
                    // Continuation fragment of the previous value.
                    debug!(
                        type_id,
                        total = prev.value.len() + length,
                        "reassembled continuation fragment"
                    );
                    prev.value.extend_from_slice(value);
                } else if strict_mode {
                    return Err(TlvError::MissingSeparator(type_id));
                } else {
                    // Ambiguous without a separator; treat as a second entry.
                    warn!(type_id, "repeated type id without separator, starting new entry");
                    records.push(RawRecord {
                        type_id,
                        value: value.to_vec(),
                    });
                }
            }
            _ => records.push(RawRecord {
                type_id,
                value: value.to_vec(),
            }),
        }
        rest = &rest[2 + length..];
    }
    Ok(records)
}

// ── Pass 2: schema-driven coercion ────────────────────────────────────────────

fn apply_schema(
    records: Vec<RawRecord>,
    schema: &Schema,
    strict_mode: bool,
) -> Result<EntryList, TlvError> {
    let mut result = EntryList::new();
    for record in records {
        let Some(field) = schema.get(record.type_id) else {
            debug!(type_id = record.type_id, "dropping entry absent from schema");
            continue;
        };
        let type_id = record.type_id;
        let (data, data_type) = coerce(record.value, &field.node, strict_mode)?;
        let mut entry = Entry::typed(type_id, data, data_type);
        entry.name = field.name;
        result.push(entry);
    }
    Ok(result)
}

fn coerce(
    raw: Vec<u8>,
    node: &SchemaNode,
    strict_mode: bool,
) -> Result<(Value, DataType), TlvError> {
    match node {
        SchemaNode::Scalar(DataType::Integer) => {
            Ok((Value::Integer(read_signed(&raw)?), DataType::Integer))
        }
        SchemaNode::Scalar(DataType::UnsignedInteger) => Ok((
            Value::UnsignedInteger(read_unsigned(&raw)?),
            DataType::UnsignedInteger,
        )),
        SchemaNode::Scalar(DataType::Float) => {
            Ok((Value::Float(read_float(&raw)?), DataType::Float))
        }
        SchemaNode::Scalar(DataType::String) => {
            let s = std::str::from_utf8(&raw)?.to_owned();
            Ok((Value::String(s), DataType::String))
        }
        SchemaNode::Scalar(DataType::Tlv8) => {
            // No sub-schema: recurse blindly, leaving nested values raw.
            let nested = decode(&raw, None, strict_mode)?;
            Ok((Value::List(nested), DataType::Tlv8))
        }
        SchemaNode::Scalar(DataType::Bytes | DataType::Autodetect) => {
            Ok((Value::Bytes(raw), DataType::Bytes))
        }
        SchemaNode::Enumeration(descriptor) => {
            let value = read_unsigned(&raw)?;
            match descriptor.member(value) {
                Some(member) => Ok((
                    Value::Enum(EnumValue {
                        enumeration: descriptor.name(),
                        member,
                        value,
                    }),
                    DataType::UnsignedInteger,
                )),
                None => Err(TlvError::UnknownEnumMember {
                    enumeration: descriptor.name(),
                    value,
                }),
            }
        }
        SchemaNode::Nested(sub_schema) => {
            let nested = decode(&raw, Some(sub_schema), strict_mode)?;
            Ok((Value::List(nested), DataType::Tlv8))
        }
    }
}

// ── Scalar readers ────────────────────────────────────────────────────────────

fn read_signed(raw: &[u8]) -> Result<i64, TlvError> {
    match raw.len() {
        1 => Ok(i64::from(raw[0] as i8)),
        2 => Ok(i64::from(i16::from_le_bytes([raw[0], raw[1]]))),
        4 => Ok(i64::from(i32::from_le_bytes([
            raw[0], raw[1], raw[2], raw[3],
        ]))),
        8 => Ok(i64::from_le_bytes([
            raw[0], raw[1], raw[2], raw[3], raw[4], raw[5], raw[6], raw[7],
        ])),
        n => Err(TlvError::UnknownIntegerLength(n)),
    }
}

fn read_unsigned(raw: &[u8]) -> Result<u64, TlvError> {
    match raw.len() {
        1 => Ok(u64::from(raw[0])),
        2 => Ok(u64::from(u16::from_le_bytes([raw[0], raw[1]]))),
        4 => Ok(u64::from(u32::from_le_bytes([
            raw[0], raw[1], raw[2], raw[3],
        ]))),
        8 => Ok(u64::from_le_bytes([
            raw[0], raw[1], raw[2], raw[3], raw[4], raw[5], raw[6], raw[7],
        ])),
        n => Err(TlvError::UnknownIntegerLength(n)),
    }
}

fn read_float(raw: &[u8]) -> Result<f32, TlvError> {
    if raw.len() != 4 {
        return Err(TlvError::BadFloatLength(raw.len()));
    }
    Ok(f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
