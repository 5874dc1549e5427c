//! The in-memory TLV8 data model.
//!
//! This module contains pure data types with no codec logic: the typed entry
//! tree the encoder consumes and the decoder produces. Encoding and decoding
//! live in [`crate::codec`]; formatting lives in [`crate::format`].

pub mod entry;
pub mod list;

pub use entry::{DataType, Entry, EnumValue, Value};
pub use list::EntryList;
