//! An ordered, type-checked sequence of TLV8 entries.

use std::ops::Index;
use std::slice;

use serde::Serialize;

use crate::codec::TlvError;
use crate::model::Entry;

/// An ordered sequence of [`Entry`] values.
///
/// Insertion order is the wire order and is semantically significant:
/// re-encoding a list reproduces the original byte order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, keeping wire order.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Entry> {
        self.entries.iter_mut()
    }

    /// Returns a new list holding clones of all entries with the given type
    /// id, possibly empty.
    pub fn by_id(&self, type_id: u8) -> EntryList {
        self.entries
            .iter()
            .filter(|entry| entry.type_id == type_id)
            .cloned()
            .collect()
    }

    /// Returns the first entry with the given type id, if any.
    pub fn first_by_id(&self, type_id: u8) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.type_id == type_id)
    }

    /// Fails with the given message if no entry with the given type id is
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`TlvError::MissingEntry`] carrying `type_id` and `message`.
    pub fn assert_has(&self, type_id: u8, message: &str) -> Result<(), TlvError> {
        if self.first_by_id(type_id).is_some() {
            Ok(())
        } else {
            Err(TlvError::MissingEntry {
                type_id,
                message: message.to_string(),
            })
        }
    }

    /// Encodes this list with the default separator type id.
    ///
    /// Convenience for [`crate::codec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`TlvError`] if any entry fails to encode.
    pub fn encode(&self) -> Result<Vec<u8>, TlvError> {
        crate::codec::encode(self)
    }
}

impl From<Vec<Entry>> for EntryList {
    fn from(entries: Vec<Entry>) -> Self {
        EntryList { entries }
    }
}

impl FromIterator<Entry> for EntryList {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        EntryList {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<Entry> for EntryList {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl Index<usize> for EntryList {
    type Output = Entry;

    fn index(&self, index: usize) -> &Entry {
        &self.entries[index]
    }
}

impl IntoIterator for EntryList {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a mut EntryList {
    type Item = &'a mut Entry;
    type IntoIter = slice::IterMut<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter_mut()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
