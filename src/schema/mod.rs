//! Caller-supplied expected-type schemas for decoding.
//!
//! The wire format carries no type information beyond the 8-bit type id, so
//! the decoder needs a description of how to reinterpret each field's raw
//! bytes. A [`Schema`] maps type ids to [`SchemaNode`]s:
//!
//! - [`SchemaNode::Scalar`] – decode the value as one [`DataType`].
//! - [`SchemaNode::Enumeration`] – decode as an unsigned integer and match it
//!   against a closed member set.
//! - [`SchemaNode::Nested`] – the value is itself a TLV8 structure, decoded
//!   recursively with a sub-schema.
//!
//! Schemas are not part of the wire format; they only drive the second decode
//! pass.

use std::collections::BTreeMap;

use crate::model::DataType;

// ── Enumerations ──────────────────────────────────────────────────────────────

/// A closed set of named integer members, usable in a schema wherever a
/// scalar [`DataType`] is.
///
/// Descriptors are `const`-constructible so protocol definitions can keep
/// them in statics:
///
/// ```rust
/// use tlv8::EnumDescriptor;
///
/// static PAIRING_METHOD: EnumDescriptor = EnumDescriptor::new(
///     "PairingMethod",
///     &[("PairSetup", 0), ("PairVerify", 1), ("AddPairing", 3)],
/// );
/// assert_eq!(PAIRING_METHOD.member(1), Some("PairVerify"));
/// ```
#[derive(Debug)]
pub struct EnumDescriptor {
    name: &'static str,
    members: &'static [(&'static str, u64)],
}

impl EnumDescriptor {
    pub const fn new(name: &'static str, members: &'static [(&'static str, u64)]) -> Self {
        EnumDescriptor { name, members }
    }

    /// Name of the enumeration, used in diagnostics and error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up the member name for a raw value.
    pub fn member(&self, value: u64) -> Option<&'static str> {
        self.members
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(name, _)| *name)
    }

    /// Reverse lookup: the raw value of a named member.
    pub fn value_of(&self, member: &str) -> Option<u64> {
        self.members
            .iter()
            .find(|(name, _)| *name == member)
            .map(|(_, v)| *v)
    }
}

// ── Schema nodes ──────────────────────────────────────────────────────────────

/// How one field's raw bytes are reinterpreted during decoding.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// Decode the value as the given scalar data type.
    Scalar(DataType),
    /// Decode the value as an unsigned integer and match it against the
    /// enumeration's members.
    Enumeration(&'static EnumDescriptor),
    /// The value is a nested TLV8 structure described by a sub-schema.
    Nested(Schema),
}

impl From<DataType> for SchemaNode {
    fn from(data_type: DataType) -> Self {
        SchemaNode::Scalar(data_type)
    }
}

impl From<&'static EnumDescriptor> for SchemaNode {
    fn from(descriptor: &'static EnumDescriptor) -> Self {
        SchemaNode::Enumeration(descriptor)
    }
}

impl From<Schema> for SchemaNode {
    fn from(schema: Schema) -> Self {
        SchemaNode::Nested(schema)
    }
}

/// One field of a [`Schema`]: the node plus an optional symbolic name that is
/// attached to decoded entries.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: Option<&'static str>,
    pub node: SchemaNode,
}

// ── Schemas ───────────────────────────────────────────────────────────────────

/// A mapping from type ids to expected field types.
///
/// Built with a consuming builder:
///
/// ```rust
/// use tlv8::{DataType, Schema};
///
/// let schema = Schema::new()
///     .field(1, DataType::Bytes)
///     .field(3, Schema::new()
///         .field(1, DataType::UnsignedInteger)
///         .named_field(2, "Address", DataType::String));
/// assert!(schema.get(3).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<u8, SchemaField>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field keyed by a plain type id.
    pub fn field(self, type_id: u8, node: impl Into<SchemaNode>) -> Self {
        self.insert(type_id, None, node.into())
    }

    /// Adds a field keyed by a type id with a symbolic name. Decoded entries
    /// for this field carry the name for pattern matching and diagnostics.
    pub fn named_field(
        self,
        type_id: u8,
        name: &'static str,
        node: impl Into<SchemaNode>,
    ) -> Self {
        self.insert(type_id, Some(name), node.into())
    }

    fn insert(mut self, type_id: u8, name: Option<&'static str>, node: SchemaNode) -> Self {
        self.fields.insert(type_id, SchemaField { name, node });
        self
    }

    /// Looks up the field description for a type id.
    pub fn get(&self, type_id: u8) -> Option<&SchemaField> {
        self.fields.get(&type_id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
