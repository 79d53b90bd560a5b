// The MIT License (MIT)

// Copyright (c) 2014 Y. T. CHUNG

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! In-memory INI document: ordered sections holding ordered key/value pairs

use ordered_multimap::{
    list_ordered_multimap::{Entry, Iter},
    ListOrderedMultimap,
};

/// Internal storage of a section's name, `None` is the general section
pub type SectionKey = Option<String>;

/// Key/value pairs of one section
///
/// Every key is stored once. Setting an existing key replaces its value and
/// keeps the key at its original position.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Section {
    data: ListOrderedMultimap<String, String>,
}

impl Section {
    /// Create an empty section
    pub fn new() -> Section {
        Default::default()
    }

    /// Get the number of keys
    pub fn len(&self) -> usize {
        self.data.keys_len()
    }

    /// Check if the section has no keys
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get an iterator of the key/value pairs in insertion order
    pub fn iter(&self) -> PropertyIter<'_> {
        PropertyIter {
            inner: self.data.iter(),
        }
    }

    /// Insert (key, value), replacing any existing value of the key
    pub fn insert<K, V>(&mut self, k: K, v: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let k = k.into();
        match self.data.get_mut(&k) {
            Some(slot) => Some(std::mem::replace(slot, v.into())),
            None => {
                self.data.append(k, v.into());
                None
            }
        }
    }

    /// Get the value of the key
    pub fn get<S: AsRef<str>>(&self, s: S) -> Option<&str> {
        self.data.get(s.as_ref()).map(|v| v.as_str())
    }
}

pub struct PropertyIter<'a> {
    inner: Iter<'a, String, String>,
}

impl<'a> Iterator for PropertyIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Section {
    type IntoIter = PropertyIter<'a>;
    type Item = (&'a str, &'a str);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An INI document
///
/// Sections keep the order they were first seen in. A section name that shows
/// up twice in a file is merged into its first occurrence, so every name maps
/// to exactly one [`Section`].
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) sections: ListOrderedMultimap<SectionKey, Section>,
}

impl Document {
    /// Create a document holding only the empty general section
    pub fn new() -> Document {
        Default::default()
    }

    /// Get a section, `None` is the general section
    pub fn section<S>(&self, name: Option<S>) -> Option<&Section>
    where
        S: Into<String>,
    {
        self.sections.get(&name.map(Into::into))
    }

    /// Get the section, creating an empty one at the end if it does not exist
    pub fn section_or_insert<S>(&mut self, name: Option<S>) -> &mut Section
    where
        S: Into<String>,
    {
        match self.sections.entry(name.map(Into::into)) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(Section::new()),
        }
    }

    /// Set key/value in a section, creating the section if needed
    ///
    /// Returns the value the key held before, if any.
    pub fn set_to<S, K, V>(&mut self, section: Option<S>, key: K, value: V) -> Option<String>
    where
        S: Into<String>,
        K: Into<String>,
        V: Into<String>,
    {
        self.section_or_insert(section).insert(key, value)
    }

    /// Get a value from a section
    ///
    /// ```
    /// use inictl::Document;
    /// let doc = Document::load_from_str("[db]\nhost = localhost\n").unwrap();
    /// assert_eq!(doc.get_from(Some("db"), "host"), Some("localhost"));
    /// ```
    pub fn get_from<'a, S>(&'a self, section: Option<S>, key: &str) -> Option<&'a str>
    where
        S: Into<String>,
    {
        self.section(section).and_then(|prop| prop.get(key))
    }

    /// Iterate over section names, `None` is the general section
    pub fn sections(&self) -> impl Iterator<Item = Option<&str>> {
        self.sections.keys().map(|s| s.as_deref())
    }

    /// Total sections count, including the general section
    pub fn len(&self) -> usize {
        self.sections.keys_len()
    }

    /// Check if the document contains no section
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over sections in order
    pub fn iter(&self) -> SectionIter<'_> {
        SectionIter {
            inner: self.sections.iter(),
        }
    }
}

impl Default for Document {
    /// The general section always exists, so it can be read without a lookup failure.
    fn default() -> Self {
        let mut result = Document {
            sections: Default::default(),
        };

        result.sections.insert(None, Default::default());

        result
    }
}

/// Iterator for traversing sections
pub struct SectionIter<'a> {
    inner: Iter<'a, SectionKey, Section>,
}

impl<'a> Iterator for SectionIter<'a> {
    type Item = (Option<&'a str>, &'a Section);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_deref(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Document {
    type IntoIter = SectionIter<'a>;
    type Item = (Option<&'a str>, &'a Section);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ------------------------------------------------------------------------------
