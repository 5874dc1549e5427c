//! The TLV8 wire codec.
//!
//! Wire format:
//! ```text
//! record := type_id:u8 length:u8 value:u8[length]
//! stream := record*
//! ```
//! All multi-byte integers are little-endian.
//!
//! Two framing rules sit on top of the plain record stream:
//!
//! - **Fragmentation** – a logical value longer than [`MAX_FRAGMENT_LEN`]
//!   bytes is split into consecutive records of length 255 sharing the same
//!   type id, terminated by one record of length < 255 (possibly 0).
//!
//! - **Separators** – two logically distinct adjacent records sharing a type
//!   id are separated by a zero-length record of a sentinel id
//!   ([`DEFAULT_SEPARATOR_TYPE_ID`] unless overridden), so the decoder does
//!   not mistake them for fragments of one value.

use thiserror::Error;

use crate::model::DataType;

pub mod decode;
pub mod encode;

pub use decode::{decode, deep_decode};
pub use encode::{encode, encode_with_separator};

// ── Protocol constants ────────────────────────────────────────────────────────

/// Sentinel type id of the zero-length separator record inserted between
/// adjacent entries of the same type.
pub const DEFAULT_SEPARATOR_TYPE_ID: u8 = 0xFF;

/// Maximum value length of a single record; longer values are fragmented.
pub const MAX_FRAGMENT_LEN: usize = 255;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors that can occur while encoding or decoding TLV8 data.
#[derive(Debug, Error, PartialEq)]
pub enum TlvError {
    /// Fewer than the 2 header bytes remain at the start of a record.
    #[error("truncated record: {available} byte(s) remaining, record header needs 2")]
    TruncatedRecord { available: usize },

    /// A record header declares more value bytes than the buffer holds.
    #[error("declared length {declared} exceeds remaining {available} byte(s)")]
    LengthOverrun { declared: usize, available: usize },

    /// Strict mode: two adjacent records share a type id without an exact
    /// 255-byte fragment boundary between them.
    #[error("missing separator before repeated type id {0}")]
    MissingSeparator(u8),

    /// The separator type id collides with a repeated adjacent type id in the
    /// list being encoded.
    #[error("separator type id {0} occurs within the entry list")]
    SeparatorCollision(u8),

    /// An integer field has a byte length other than 1, 2, 4 or 8.
    #[error("integer of unknown length: {0}")]
    UnknownIntegerLength(usize),

    /// A float field is not exactly 4 bytes long.
    #[error("float value must be exactly 4 bytes, got {0}")]
    BadFloatLength(usize),

    /// A string field holds bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in string value: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A decoded integer has no matching member in the expected enumeration.
    #[error("no member of {enumeration} has value {value}")]
    UnknownEnumMember {
        enumeration: &'static str,
        value: u64,
    },

    /// An explicit length override is too narrow for the value.
    #[error("value {value} does not fit in {width} byte(s)")]
    WidthOverflow { value: String, width: usize },

    /// An explicit length override is not a supported integer width.
    #[error("length override must be 1, 2, 4 or 8, got {0}")]
    BadLengthOverride(usize),

    /// The entry's value kind cannot be encoded as its data type.
    #[error("value {value} cannot be encoded as {data_type:?}")]
    Unencodable { data_type: DataType, value: String },

    /// [`crate::EntryList::assert_has`] found no entry with the required id.
    #[error("required entry {type_id} missing: {message}")]
    MissingEntry { type_id: u8, message: String },
}
