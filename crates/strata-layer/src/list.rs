//! Layer collections
//!
//! - [`List`]: ordered layers as returned by a loader
//! - [`ItemList`] / [`GroupList`]: variant-specific views
//! - [`Map`]: id-indexed layers, iterated in id order

use crate::{Group, IdList, Item, Layer, LayerCommon};
use std::collections::BTreeMap;
use strata_id::{DatasetId, DatasetSchemaId, LayerId};

/// Ordered list of layers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    layers: Vec<Layer>,
}

impl List {
    /// Create an empty list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a layer by id
    #[must_use]
    pub fn find(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == *id)
    }

    /// Find a layer by id, mutably
    pub fn find_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == *id)
    }

    /// Last layer
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Layer> {
        self.layers.last()
    }

    /// Layers whose ids are in `ids`, in `ids` order; unknown ids are skipped
    #[must_use]
    pub fn pick(&self, ids: &IdList) -> Self {
        ids.iter().filter_map(|id| self.find(&id).cloned()).collect()
    }

    /// Copy of this list without the layers in `ids`
    #[must_use]
    pub fn remove(&self, ids: &[LayerId]) -> Self {
        self.layers
            .iter()
            .filter(|l| !ids.contains(&l.id()))
            .cloned()
            .collect()
    }

    /// Layer ids in list order
    #[must_use]
    pub fn ids(&self) -> IdList {
        self.layers.iter().map(LayerCommon::id).collect()
    }

    /// Index the layers by id
    #[must_use]
    pub fn to_map(&self) -> Map {
        self.layers.iter().cloned().collect()
    }

    /// Items only, in list order
    #[must_use]
    pub fn items(&self) -> ItemList {
        self.layers.iter().filter_map(Layer::as_item).cloned().collect()
    }

    /// Groups only, in list order
    #[must_use]
    pub fn groups(&self) -> GroupList {
        self.layers.iter().filter_map(Layer::as_group).cloned().collect()
    }

    /// Split into groups and items
    #[must_use]
    pub fn separate(&self) -> (GroupList, ItemList) {
        (self.groups(), self.items())
    }

    /// Append a layer
    pub fn push(&mut self, layer: impl Into<Layer>) {
        self.layers.push(layer.into());
    }

    /// Iterate the layers
    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Number of layers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the list is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Borrow as a slice
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Layer] {
        &self.layers
    }
}

impl FromIterator<Layer> for List {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Layer>> for List {
    fn from(layers: Vec<Layer>) -> Self {
        Self { layers }
    }
}

impl IntoIterator for List {
    type Item = Layer;
    type IntoIter = std::vec::IntoIter<Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

/// Ordered list of items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList(Vec<Item>);

impl ItemList {
    /// First item linked to `dataset`
    #[must_use]
    pub fn find_by_dataset(&self, dataset: &DatasetId) -> Option<&Item> {
        self.0.iter().find(|i| i.linked_dataset() == Some(*dataset))
    }

    /// Last item
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Item> {
        self.0.last()
    }

    /// Iterate the items
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.0.iter()
    }

    /// Number of items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Item> for ItemList {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ItemList {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Ordered list of groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupList(Vec<Group>);

impl GroupList {
    /// First group linked to `schema`
    #[must_use]
    pub fn find_by_dataset_schema(&self, schema: &DatasetSchemaId) -> Option<&Group> {
        self.0.iter().find(|g| g.linked_dataset_schema() == Some(*schema))
    }

    /// Last group
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Group> {
        self.0.last()
    }

    /// Iterate the groups
    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.0.iter()
    }

    /// Number of groups
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Group> for GroupList {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for GroupList {
    type Item = Group;
    type IntoIter = std::vec::IntoIter<Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Layers indexed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Map {
    layers: BTreeMap<LayerId, Layer>,
}

impl Map {
    /// Create an empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding a single layer
    #[must_use]
    pub fn from_layer(layer: impl Into<Layer>) -> Self {
        let mut map = Self::new();
        map.add(layer);
        map
    }

    /// Insert or replace a layer
    pub fn add(&mut self, layer: impl Into<Layer>) {
        let layer = layer.into();
        self.layers.insert(layer.id(), layer);
    }

    /// Builder-style [`add`](Self::add)
    #[must_use]
    pub fn with(mut self, layer: impl Into<Layer>) -> Self {
        self.add(layer);
        self
    }

    /// Layer by id
    #[inline]
    #[must_use]
    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// Layer by id, mutably
    #[inline]
    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id)
    }

    /// Item by id; `None` if absent or a group
    #[must_use]
    pub fn item(&self, id: &LayerId) -> Option<&Item> {
        self.layer(id).and_then(Layer::as_item)
    }

    /// Group by id; `None` if absent or an item
    #[must_use]
    pub fn group(&self, id: &LayerId) -> Option<&Group> {
        self.layer(id).and_then(Layer::as_group)
    }

    /// Item by id, mutably
    pub fn item_mut(&mut self, id: &LayerId) -> Option<&mut Item> {
        self.layer_mut(id).and_then(Layer::as_item_mut)
    }

    /// Group by id, mutably
    pub fn group_mut(&mut self, id: &LayerId) -> Option<&mut Group> {
        self.layer_mut(id).and_then(Layer::as_group_mut)
    }

    /// Layers whose ids are in `ids`, in `ids` order; unknown ids are skipped
    #[must_use]
    pub fn pick(&self, ids: &IdList) -> List {
        ids.iter().filter_map(|id| self.layer(&id).cloned()).collect()
    }

    /// Absorb `other`; its layers replace ours on id collision
    pub fn merge(&mut self, other: Self) {
        self.layers.extend(other.layers);
    }

    /// Remove a layer
    pub fn remove(&mut self, id: &LayerId) -> Option<Layer> {
        self.layers.remove(id)
    }

    /// Whether a layer is present
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &LayerId) -> bool {
        self.layers.contains_key(id)
    }

    /// Sorted ids
    #[must_use]
    pub fn keys(&self) -> Vec<LayerId> {
        self.layers.keys().copied().collect()
    }

    /// Layers ordered by id
    #[must_use]
    pub fn list(&self) -> List {
        self.layers.values().cloned().collect()
    }

    /// Iterate layers in id order
    pub fn iter(&self) -> impl Iterator<Item = (&LayerId, &Layer)> {
        self.layers.iter()
    }

    /// Number of layers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the map is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl FromIterator<Layer> for Map {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().map(|l| (l.id(), l)).collect(),
        }
    }
}

impl IntoIterator for Map {
    type Item = (LayerId, Layer);
    type IntoIter = std::collections::btree_map::IntoIter<LayerId, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}
