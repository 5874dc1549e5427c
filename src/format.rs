//! Human-readable dumps of entry trees.
//!
//! Diagnostics only; the rendering is not part of the wire format and must
//! not be used for round-tripping.

use crate::model::{Entry, EntryList, Value};

/// Formats an entry list as an indented multi-line string, recursing into
/// nested lists.
///
/// ```rust
/// use tlv8::{format_string, Entry, EntryList};
///
/// let list = EntryList::from(vec![
///     Entry::new(1, 1),
///     Entry::new(2, vec![Entry::new(4, 4), Entry::new(5, 5)]),
///     Entry::new(3, 3),
/// ]);
/// assert_eq!(
///     format_string(&list, 0),
///     "[\n  <1, 1>,\n  <2, [\n    <4, 4>,\n    <5, 5>,\n  ]>,\n  <3, 3>,\n]"
/// );
/// ```
pub fn format_string(entries: &EntryList, indent: usize) -> String {
    let mut result = String::from("[\n");
    for entry in entries {
        result.push_str(&" ".repeat(indent + 2));
        result.push_str(&entry.format_string(indent + 2));
        result.push('\n');
    }
    result.push_str(&" ".repeat(indent));
    result.push(']');
    result
}

impl Entry {
    /// Renders this entry as `<type_id, value>,` with nested lists indented
    /// one level deeper.
    pub fn format_string(&self, indent: usize) -> String {
        let mut result = format!("<{}, ", self.type_id);
        match &self.data {
            Value::List(list) => result.push_str(&format_string(list, indent)),
            other => result.push_str(&other.to_string()),
        }
        result.push_str(">,");
        result
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_list_rendering() {
        let list = EntryList::from(vec![Entry::new(1, 1), Entry::new(3, 3)]);
        assert_eq!(format_string(&list, 0), "[\n  <1, 1>,\n  <3, 3>,\n]");
    }

    #[test]
    fn test_nested_list_rendering_increases_indent() {
        let list = EntryList::from(vec![
            Entry::new(1, 1),
            Entry::new(2, vec![Entry::new(4, 4), Entry::new(5, 5)]),
            Entry::new(3, 3),
        ]);
        let expected = "\
[
  <1, 1>,
  <2, [
    <4, 4>,
    <5, 5>,
  ]>,
  <3, 3>,
]";
        assert_eq!(format_string(&list, 0), expected);
    }

    #[test]
    fn test_empty_list_rendering() {
        assert_eq!(format_string(&EntryList::new(), 0), "[\n]");
    }

    #[test]
    fn test_caller_indent_offsets_the_brackets() {
        let list = EntryList::from(vec![Entry::new(1, "x")]);
        assert_eq!(format_string(&list, 4), "[\n      <1, x>,\n    ]");
    }
}
