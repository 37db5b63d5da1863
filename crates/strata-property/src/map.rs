//! Property catalog
//!
//! [`PropertyMap`] is the id-indexed store layers and infoboxes are
//! validated against. Insertion order is kept so that catalogs produced by
//! recursive initialization list properties in the order they were created.

use crate::Property;
use indexmap::IndexMap;
use strata_id::PropertyId;

/// Id-indexed property catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: IndexMap<PropertyId, Property>,
}

impl PropertyMap {
    /// Create an empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, replacing any entry with the same id
    pub fn add(&mut self, property: Property) {
        self.entries.insert(property.id(), property);
    }

    /// Builder-style [`add`](Self::add)
    #[inline]
    #[must_use]
    pub fn with(mut self, property: Property) -> Self {
        self.add(property);
        self
    }

    /// Lookup a property
    #[inline]
    #[must_use]
    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.entries.get(id)
    }

    /// Mutable lookup
    #[inline]
    pub fn get_mut(&mut self, id: &PropertyId) -> Option<&mut Property> {
        self.entries.get_mut(id)
    }

    /// Check whether the catalog holds `id`
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &PropertyId) -> bool {
        self.entries.contains_key(id)
    }

    /// Remove a property
    pub fn remove(&mut self, id: &PropertyId) -> Option<Property> {
        self.entries.shift_remove(id)
    }

    /// Union of two catalogs; entries of `other` win on conflicting ids
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Ids in insertion order
    #[must_use]
    pub fn keys(&self) -> Vec<PropertyId> {
        self.entries.keys().copied().collect()
    }

    /// Iterate over properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.values()
    }

    /// Number of properties
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Property> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut map = Self::new();
        for p in iter {
            map.add(p);
        }
        map
    }
}

impl IntoIterator for PropertyMap {
    type Item = Property;
    type IntoIter = indexmap::map::IntoValues<PropertyId, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}
