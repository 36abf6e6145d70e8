//! Ordered, case-insensitive, multi-valued header storage.
//!
//! [`HeaderCollection`] is the single header representation used on both the
//! request and the response side. It differs from a plain map in two ways
//! that the wire format cares about:
//!
//! - lookups are case-insensitive (names are normalized through
//!   [`http::HeaderName`], which lowercases on construction)
//! - iteration yields names in first-insertion order, and the values of a
//!   repeated name in append order, so responses are emitted exactly as the
//!   handler described them

use http::{HeaderName, HeaderValue};

/// An ordered, case-insensitive mapping from header name to one or more values.
#[derive(Debug, Default, Clone)]
pub struct HeaderCollection {
    entries: Vec<(HeaderName, Vec<HeaderValue>)>,
}

impl HeaderCollection {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a value for `name`, preserving insertion order.
    ///
    /// The first occurrence of a name fixes its position; later values for
    /// the same name (any case) are appended to that entry.
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Returns all values stored for `name`, matched case-insensitively.
    ///
    /// Returns an empty slice when the name is absent.
    pub fn get_all(&self, name: impl AsRef<str>) -> &[HeaderValue] {
        let name = name.as_ref();
        self.entries
            .iter()
            .find(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// Returns the first value stored for `name`, matched case-insensitively.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&HeaderValue> {
        self.get_all(name).first()
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        !self.get_all(name).is_empty()
    }

    /// Iterates `(name, value)` pairs: names in insertion order, repeated
    /// values of a name grouped together in append order.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().flat_map(|(name, values)| values.iter().map(move |value| (name, value)))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
