use std::collections::HashMap;

use crate::value::TagValue;

/// The tags of one page, keyed by tag name.
///
/// Names are unique: when a page carries the same tag twice, the later
/// entry replaces the earlier one and keeps the earlier position.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTags {
    /// Zero-based position of the page in the document
    pub index: usize,

    tags: Vec<(String, TagValue)>,

    /// Position of each name in `tags`
    positions: HashMap<String, usize>,
}

impl PageTags {
    /// Build a page from tags in file order.
    pub fn new(index: usize, tags: impl IntoIterator<Item = (String, TagValue)>) -> Self {
        let mut page = PageTags {
            index,
            tags: Vec::new(),
            positions: HashMap::new(),
        };
        for (name, value) in tags {
            page.insert(name, value);
        }
        page
    }

    /// Insert or replace a tag.
    pub fn insert(&mut self, name: impl Into<String>, value: TagValue) {
        let name = name.into();
        match self.positions.get(&name) {
            Some(&position) => self.tags[position].1 = value,
            None => {
                self.positions.insert(name.clone(), self.tags.len());
                self.tags.push((name, value));
            }
        }
    }

    /// Look up a tag by name.
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.positions
            .get(name)
            .map(|&position| &self.tags[position].1)
    }

    /// Number of tags on this page.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether this page has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.tags.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Tags sorted by name (byte-wise), independent of file order.
    pub fn sorted(&self) -> Vec<(&str, &TagValue)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}
