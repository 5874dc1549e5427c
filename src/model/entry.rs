//! A single typed TLV8 entry and the sum type of its permitted leaf values.

use std::fmt;

use serde::Serialize;

use crate::model::EntryList;

// ── Data types ────────────────────────────────────────────────────────────────

/// The kinds of data a TLV8 entry can carry on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    /// Raw, uninterpreted bytes.
    Bytes,
    /// A nested TLV8 structure.
    Tlv8,
    /// Signed little-endian integer of 1, 2, 4 or 8 bytes.
    Integer,
    /// Unsigned little-endian integer of 1, 2, 4 or 8 bytes.
    UnsignedInteger,
    /// 32-bit little-endian IEEE 754 float.
    Float,
    /// UTF-8 string.
    String,
    /// Pick the data type from the value's runtime kind. Only meaningful
    /// during encoding; never the final type of a decoded entry.
    Autodetect,
}

// ── Values ────────────────────────────────────────────────────────────────────

/// A decoded member of a closed enumeration.
///
/// Carries both the raw integer read from the wire and the matched symbolic
/// member, so callers can pattern-match by name without losing the value.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnumValue {
    /// Name of the enumeration this member belongs to.
    pub enumeration: &'static str,
    /// Symbolic name of the matched member.
    pub member: &'static str,
    /// The raw integer value.
    pub value: u64,
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.enumeration, self.member)
    }
}

/// The value of a single entry: either a leaf scalar, raw bytes, or a nested
/// entry list.
#[derive(Debug, Clone, Serialize)]
pub enum Value {
    Bytes(Vec<u8>),
    Integer(i64),
    UnsignedInteger(u64),
    Float(f32),
    String(String),
    List(EntryList),
    Enum(EnumValue),
}

impl PartialEq for Value {
    /// Same-variant comparison, with one relaxation: `Integer`,
    /// `UnsignedInteger` and `Enum` compare by numeric value across variants,
    /// since the wire format does not distinguish them.
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Bytes(a), Bytes(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (UnsignedInteger(a), UnsignedInteger(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Enum(a), Enum(b)) => a.enumeration == b.enumeration && a.value == b.value,
            (Integer(a), UnsignedInteger(b)) | (UnsignedInteger(b), Integer(a)) => {
                *a >= 0 && *a as u64 == *b
            }
            (Enum(e), UnsignedInteger(v)) | (UnsignedInteger(v), Enum(e)) => e.value == *v,
            (Enum(e), Integer(v)) | (Integer(v), Enum(e)) => *v >= 0 && e.value == *v as u64,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bytes(bytes) => {
                write!(f, "0x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Value::Integer(v) => write!(f, "{v}"),
            Value::UnsignedInteger(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, entry) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{entry}")?;
                }
                write!(f, "]")
            }
            Value::Enum(v) => write!(f, "{v}"),
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(v: &[u8; N]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UnsignedInteger(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UnsignedInteger(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<EntryList> for Value {
    fn from(v: EntryList) -> Self {
        Value::List(v)
    }
}

impl From<Vec<Entry>> for Value {
    fn from(v: Vec<Entry>) -> Self {
        Value::List(EntryList::from(v))
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

// ── Entries ───────────────────────────────────────────────────────────────────

/// One logical TLV8 record after any fragmentation has been resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// The 8-bit type id of this entry.
    pub type_id: u8,
    /// The carried value: raw bytes, a decoded scalar, or a nested list.
    pub data: Value,
    /// How the value is interpreted on the wire.
    pub data_type: DataType,
    /// Optional explicit encoded width for integer values, to force a wider
    /// encoding than the value strictly needs. Must be 1, 2, 4 or 8.
    pub length: Option<usize>,
    /// Symbolic field name attached by a schema key during decoding. Ignored
    /// by equality.
    pub name: Option<&'static str>,
}

impl Entry {
    /// Creates an entry whose data type is detected from the value kind at
    /// encode time.
    pub fn new(type_id: u8, data: impl Into<Value>) -> Self {
        Self::typed(type_id, data, DataType::Autodetect)
    }

    /// Creates an entry with an explicit data type.
    pub fn typed(type_id: u8, data: impl Into<Value>, data_type: DataType) -> Self {
        Entry {
            type_id,
            data: data.into(),
            data_type,
            length: None,
            name: None,
        }
    }

    /// Creates an entry with an explicit data type and encoded width.
    ///
    /// The width override is only consulted for integer data types.
    pub fn with_length(
        type_id: u8,
        data: impl Into<Value>,
        data_type: DataType,
        length: usize,
    ) -> Self {
        Entry {
            type_id,
            data: data.into(),
            data_type,
            length: Some(length),
            name: None,
        }
    }
}

impl PartialEq for Entry {
    /// Entries are equal iff their type ids and values are equal. If either
    /// side is typed as a float, values compare with a relative tolerance of
    /// 1e-6 instead of bit-exactly, which models rounding through the 32-bit
    /// wire representation.
    fn eq(&self, other: &Self) -> bool {
        if self.type_id != other.type_id {
            return false;
        }
        if self.data_type == DataType::Float || other.data_type == DataType::Float {
            if let (Value::Float(a), Value::Float(b)) = (&self.data, &other.data) {
                return approx_eq(*a, *b);
            }
        }
        self.data == other.data
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.type_id, self.data)
    }
}

fn approx_eq(a: f32, b: f32) -> bool {
    let (a, b) = (f64::from(a), f64::from(b));
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
