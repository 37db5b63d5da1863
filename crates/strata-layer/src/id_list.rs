//! Ordered set of child layer ids
//!
//! [`IdList`] keeps a `Vec` for order and a `HashSet` for O(1) membership.
//! Every mutation touches both containers, so `has_layer` always agrees
//! with the ordered sequence.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strata_id::LayerId;

/// Ordered, duplicate-free list of layer ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LayerId>", into = "Vec<LayerId>")]
pub struct IdList {
    layers: Vec<LayerId>,
    index: HashSet<LayerId>,
}

impl IdList {
    /// Create from ids; later duplicates are dropped
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = LayerId>) -> Self {
        let mut list = Self::default();
        list.append_layers(ids);
        list
    }

    /// Copy of the ids in order
    #[inline]
    #[must_use]
    pub fn layers(&self) -> Vec<LayerId> {
        self.layers.clone()
    }

    /// Borrow the ids in order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[LayerId] {
        &self.layers
    }

    /// Iterate over ids in order
    pub fn iter(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.iter().copied()
    }

    /// O(1) membership test
    #[inline]
    #[must_use]
    pub fn has_layer(&self, id: &LayerId) -> bool {
        self.index.contains(id)
    }

    /// Id at `index`
    #[inline]
    #[must_use]
    pub fn layer_at(&self, index: usize) -> Option<LayerId> {
        self.layers.get(index).copied()
    }

    /// Position of `id`
    #[must_use]
    pub fn find_layer_index(&self, id: &LayerId) -> Option<usize> {
        if !self.has_layer(id) {
            return None;
        }
        self.layers.iter().position(|l| l == id)
    }

    /// Number of ids
    #[inline]
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Insert `id` at `index`; `None` or an out-of-range index appends
    ///
    /// No-op if `id` is already present.
    pub fn add_layer(&mut self, id: LayerId, index: Option<usize>) {
        if !self.index.insert(id) {
            return;
        }
        match index {
            Some(i) if i < self.layers.len() => self.layers.insert(i, id),
            _ => self.layers.push(id),
        }
        debug_assert!(self.is_consistent());
    }

    /// Append ids, skipping ones already present
    pub fn append_layers(&mut self, ids: impl IntoIterator<Item = LayerId>) {
        for id in ids {
            self.add_layer(id, None);
        }
    }

    /// Add `id` if absent, otherwise move it to `index`
    pub fn add_or_move_layer(&mut self, id: LayerId, index: Option<usize>) {
        if self.has_layer(&id) {
            self.move_layer(&id, index.unwrap_or(usize::MAX));
        } else {
            self.add_layer(id, index);
        }
    }

    /// Move `id` to `to_index`, clamped to the last position
    ///
    /// No-op if `id` is absent.
    pub fn move_layer(&mut self, id: &LayerId, to_index: usize) {
        if let Some(from) = self.find_layer_index(id) {
            self.move_layer_at(from, to_index);
        }
    }

    /// Move the id at `from_index` to `to_index`, clamped to the last position
    ///
    /// No-op if `from_index` is out of range or equals the clamped target.
    pub fn move_layer_at(&mut self, from_index: usize, to_index: usize) {
        let len = self.layers.len();
        if from_index >= len {
            return;
        }
        let to_index = to_index.min(len - 1);
        if from_index == to_index {
            return;
        }
        let id = self.layers.remove(from_index);
        self.layers.insert(to_index, id);
        debug_assert!(self.is_consistent());
    }

    /// Remove `id`; returns whether it was present
    pub fn remove_layer(&mut self, id: &LayerId) -> bool {
        if !self.index.remove(id) {
            return false;
        }
        if let Some(pos) = self.layers.iter().position(|l| l == id) {
            self.layers.remove(pos);
        }
        debug_assert!(self.is_consistent());
        true
    }

    /// Remove several ids; returns how many were present
    pub fn remove_layers(&mut self, ids: &[LayerId]) -> usize {
        ids.iter().filter(|id| self.remove_layer(id)).count()
    }

    /// Remove the id at `index`
    pub fn remove_layer_at(&mut self, index: usize) -> Option<LayerId> {
        if index >= self.layers.len() {
            return None;
        }
        let id = self.layers.remove(index);
        self.index.remove(&id);
        debug_assert!(self.is_consistent());
        Some(id)
    }

    /// Remove every id
    pub fn clear(&mut self) {
        self.layers.clear();
        self.index.clear();
    }

    /// Append every id of `other` not already present, keeping order
    pub fn merge(&mut self, other: &Self) {
        self.append_layers(other.iter());
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.layers.len() == self.index.len() && self.layers.iter().all(|l| self.index.contains(l))
    }
}

impl From<Vec<LayerId>> for IdList {
    fn from(ids: Vec<LayerId>) -> Self {
        Self::new(ids)
    }
}

impl From<IdList> for Vec<LayerId> {
    fn from(list: IdList) -> Self {
        list.layers
    }
}

impl FromIterator<LayerId> for IdList {
    fn from_iter<I: IntoIterator<Item = LayerId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a IdList {
    type Item = &'a LayerId;
    type IntoIter = std::slice::Iter<'a, LayerId>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
