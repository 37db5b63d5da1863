//! Tags attached to a layer

use indexmap::IndexSet;
use strata_id::TagId;

/// Ordered, duplicate-free set of tag ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: IndexSet<TagId>,
}

impl TagList {
    /// Create from ids; duplicates are dropped
    #[must_use]
    pub fn new(tags: impl IntoIterator<Item = TagId>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn has(&self, tag: &TagId) -> bool {
        self.tags.contains(tag)
    }

    /// Add a tag; returns `false` if it was already present
    pub fn add(&mut self, tag: TagId) -> bool {
        self.tags.insert(tag)
    }

    /// Remove a tag; returns `false` if it was absent
    pub fn remove(&mut self, tag: &TagId) -> bool {
        self.tags.shift_remove(tag)
    }

    /// Ids in attach order
    #[must_use]
    pub fn ids(&self) -> Vec<TagId> {
        self.tags.iter().copied().collect()
    }

    /// Number of tags
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<TagId> for TagList {
    fn from_iter<I: IntoIterator<Item = TagId>>(iter: I) -> Self {
        Self::new(iter)
    }
}
