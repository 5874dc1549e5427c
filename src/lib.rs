//! # tlv8
//!
//! Codec for the 8-bit Type-Length-Value (TLV8) binary encoding used by
//! device-pairing and control protocols. It converts between an in-memory
//! hierarchical list of typed entries and a linear byte sequence, handling
//! nested sub-structures, per-field type interpretation, and transparent
//! reassembly of values longer than the 255-byte single-record limit.
//!
//! This crate is a pure library: no I/O, no transport, no persisted state.
//! All operations are synchronous functions over caller-owned buffers.
//!
//! # Wire format
//!
//! ```text
//! record := type_id:u8 length:u8 value:u8[length]
//! stream := record*
//! ```
//!
//! A logical value longer than 255 bytes is split into consecutive records of
//! length 255 sharing the same type id, terminated by a record of length
//! < 255. Two logically distinct adjacent records sharing a type id are
//! separated by a zero-length record of a sentinel separator id (0xFF by
//! default), so the decoder can tell them apart from fragments of one value.
//!
//! # Modules
//!
//! - **`model`** – The entry tree: [`Entry`], [`EntryList`], the [`Value`]
//!   sum type of permitted leaf kinds, and the [`DataType`] enumeration.
//!
//! - **`schema`** – Caller-supplied expected-type descriptions used by the
//!   decoder to reinterpret raw byte values: scalar types, closed
//!   enumerations, and recursively nested sub-schemas.
//!
//! - **`codec`** – The encoder and the two-pass decoder, together with the
//!   protocol constants and [`TlvError`].
//!
//! - **`format`** – Indented human-readable dumps for diagnostics.
//!
//! # Example
//!
//! ```rust
//! use tlv8::{decode, encode, DataType, Entry, EntryList, Schema};
//!
//! let list = EntryList::from(vec![
//!     Entry::new(1, "living room"),
//!     Entry::new(2, vec![Entry::new(1, 42), Entry::new(2, "lamp")]),
//! ]);
//! let bytes = encode(&list).unwrap();
//!
//! let schema = Schema::new()
//!     .field(1, DataType::String)
//!     .field(2, Schema::new()
//!         .field(1, DataType::Integer)
//!         .field(2, DataType::String));
//! let decoded = decode(&bytes, Some(&schema), false).unwrap();
//! assert_eq!(decoded, list);
//! ```

pub mod codec;
pub mod format;
pub mod model;
pub mod schema;

// Re-export the most-used items at the crate root so callers can write
// `tlv8::decode` instead of `tlv8::codec::decode::decode`.
pub use codec::{
    decode, deep_decode, encode, encode_with_separator, TlvError, DEFAULT_SEPARATOR_TYPE_ID,
    MAX_FRAGMENT_LEN,
};
pub use format::format_string;
pub use model::{DataType, Entry, EntryList, EnumValue, Value};
pub use schema::{EnumDescriptor, Schema, SchemaField, SchemaNode};
