//! Serializing entry lists into TLV8 byte streams.

use tracing::trace;

use crate::codec::{TlvError, DEFAULT_SEPARATOR_TYPE_ID, MAX_FRAGMENT_LEN};
use crate::model::{DataType, Entry, EntryList, Value};

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes an entry list into a byte stream with the default separator type
/// id (0xFF).
///
/// # Errors
///
/// Returns [`TlvError`] if any entry fails to encode, or if the separator id
/// collides with a repeated adjacent type id.
///
/// # Examples
///
/// ```rust
/// use tlv8::{encode, Entry, EntryList};
///
/// let list = EntryList::from(vec![Entry::new(1, 23), Entry::new(2, 2345)]);
/// assert_eq!(encode(&list).unwrap(), b"\x01\x01\x17\x02\x02\x29\x09");
/// ```
pub fn encode(entries: &EntryList) -> Result<Vec<u8>, TlvError> {
    encode_with_separator(entries, DEFAULT_SEPARATOR_TYPE_ID)
}

/// Encodes an entry list, inserting a zero-length record of
/// `separator_type_id` between adjacent entries that share a type id.
///
/// # Errors
///
/// Returns [`TlvError::SeparatorCollision`] if a separator would be needed
/// between entries whose type id equals `separator_type_id`, and propagates
/// any per-entry encoding failure.
pub fn encode_with_separator(
    entries: &EntryList,
    separator_type_id: u8,
) -> Result<Vec<u8>, TlvError> {
    let mut result = Vec::new();
    let mut last_type_id: Option<u8> = None;
    for entry in entries {
        if last_type_id == Some(entry.type_id) {
            if entry.type_id == separator_type_id {
                return Err(TlvError::SeparatorCollision(separator_type_id));
            }
            result.push(separator_type_id);
            result.push(0x00);
        }
        result.extend_from_slice(&entry.encode()?);
        last_type_id = Some(entry.type_id);
    }
    trace!(entries = entries.len(), bytes = result.len(), "encoded entry list");
    Ok(result)
}

impl Entry {
    /// Encodes this entry, including its type id(s) and length-prefixed
    /// value, splitting values longer than 255 bytes into fragments.
    ///
    /// # Errors
    ///
    /// Returns [`TlvError`] if the value cannot be represented as the entry's
    /// data type, or if an explicit length override is unsupported or too
    /// narrow.
    pub fn encode(&self) -> Result<Vec<u8>, TlvError> {
        let payload = self.payload_bytes()?;

        let mut result =
            Vec::with_capacity(2 + payload.len() + 2 * (payload.len() / MAX_FRAGMENT_LEN));
        result.push(self.type_id);
        if payload.is_empty() {
            result.push(0x00);
            return Ok(result);
        }
        for (i, chunk) in payload.chunks(MAX_FRAGMENT_LEN).enumerate() {
            if i > 0 {
                result.push(self.type_id);
            }
            result.push(chunk.len() as u8);
            result.extend_from_slice(chunk);
        }
        // Fragmentation must terminate with a record shorter than 255 bytes,
        // so an exact multiple gets an explicit zero-length tail record.
        if payload.len() % MAX_FRAGMENT_LEN == 0 {
            result.push(self.type_id);
            result.push(0x00);
        }
        Ok(result)
    }

    /// Renders the value bytes without framing.
    fn payload_bytes(&self) -> Result<Vec<u8>, TlvError> {
        let data_type = match self.data_type {
            DataType::Autodetect => autodetect(&self.data),
            explicit => explicit,
        };
        match (data_type, &self.data) {
            (DataType::Bytes, Value::Bytes(bytes)) => Ok(bytes.clone()),
            (DataType::Tlv8, Value::List(list)) => encode(list),
            (DataType::Integer, value) => {
                let v = signed_value(value, data_type)?;
                encode_signed(v, self.length)
            }
            (DataType::UnsignedInteger, value) => {
                let v = unsigned_value(value, data_type)?;
                encode_unsigned(v, self.length)
            }
            (DataType::Float, Value::Float(v)) => Ok(v.to_le_bytes().to_vec()),
            (DataType::String, Value::String(s)) => Ok(s.as_bytes().to_vec()),
            (data_type, value) => Err(TlvError::Unencodable {
                data_type,
                value: value.to_string(),
            }),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Maps a value's runtime kind to its natural wire data type.
fn autodetect(value: &Value) -> DataType {
    match value {
        Value::Bytes(_) => DataType::Bytes,
        Value::Integer(_) => DataType::Integer,
        Value::UnsignedInteger(_) | Value::Enum(_) => DataType::UnsignedInteger,
        Value::Float(_) => DataType::Float,
        Value::String(_) => DataType::String,
        Value::List(_) => DataType::Tlv8,
    }
}

fn signed_value(value: &Value, data_type: DataType) -> Result<i64, TlvError> {
    match value {
        Value::Integer(v) => Ok(*v),
        Value::UnsignedInteger(v) => i64::try_from(*v).map_err(|_| TlvError::WidthOverflow {
            value: v.to_string(),
            width: 8,
        }),
        Value::Enum(e) => i64::try_from(e.value).map_err(|_| TlvError::WidthOverflow {
            value: e.value.to_string(),
            width: 8,
        }),
        other => Err(TlvError::Unencodable {
            data_type,
            value: other.to_string(),
        }),
    }
}

fn unsigned_value(value: &Value, data_type: DataType) -> Result<u64, TlvError> {
    match value {
        Value::UnsignedInteger(v) => Ok(*v),
        Value::Enum(e) => Ok(e.value),
        Value::Integer(v) => u64::try_from(*v).map_err(|_| TlvError::WidthOverflow {
            value: v.to_string(),
            width: 8,
        }),
        other => Err(TlvError::Unencodable {
            data_type,
            value: other.to_string(),
        }),
    }
}

fn check_override(length: Option<usize>) -> Result<Option<usize>, TlvError> {
    match length {
        None => Ok(None),
        Some(w @ (1 | 2 | 4 | 8)) => Ok(Some(w)),
        Some(w) => Err(TlvError::BadLengthOverride(w)),
    }
}

/// Encodes a signed integer as the narrowest of 1/2/4/8 little-endian bytes
/// that losslessly holds it, unless an explicit width override is given.
fn encode_signed(v: i64, length: Option<usize>) -> Result<Vec<u8>, TlvError> {
    let width = match check_override(length)? {
        Some(w) => w,
        None if i8::try_from(v).is_ok() => 1,
        None if i16::try_from(v).is_ok() => 2,
        None if i32::try_from(v).is_ok() => 4,
        None => 8,
    };
    let fits = match width {
        1 => i8::try_from(v).is_ok(),
        2 => i16::try_from(v).is_ok(),
        4 => i32::try_from(v).is_ok(),
        _ => true,
    };
    if !fits {
        return Err(TlvError::WidthOverflow {
            value: v.to_string(),
            width,
        });
    }
    Ok(v.to_le_bytes()[..width].to_vec())
}

fn encode_unsigned(v: u64, length: Option<usize>) -> Result<Vec<u8>, TlvError> {
    let width = match check_override(length)? {
        Some(w) => w,
        None if u8::try_from(v).is_ok() => 1,
        None if u16::try_from(v).is_ok() => 2,
        None if u32::try_from(v).is_ok() => 4,
        None => 8,
    };
    let fits = match width {
        1 => u8::try_from(v).is_ok(),
        2 => u16::try_from(v).is_ok(),
        4 => u32::try_from(v).is_ok(),
        _ => true,
    };
    if !fits {
        return Err(TlvError::WidthOverflow {
            value: v.to_string(),
            width,
        });
    }
    Ok(v.to_le_bytes()[..width].to_vec())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
