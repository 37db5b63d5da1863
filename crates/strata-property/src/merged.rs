//! Merge descriptors
//!
//! [`MergedMetadata`] names the property objects that together produce the
//! effective values of a merged layer: the layer's own property, the
//! property of its parent group, and the dataset the values may be linked to.

use serde::{Deserialize, Serialize};
use strata_id::{DatasetId, PropertyId};

/// Three-way property descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedMetadata {
    /// Property owned by the merged layer or field itself
    pub original: Option<PropertyId>,
    /// Property inherited from the parent group
    pub parent: Option<PropertyId>,
    /// Dataset linked to the merged layer
    pub linked_dataset: Option<DatasetId>,
}

impl MergedMetadata {
    /// Create a descriptor
    #[inline]
    #[must_use]
    pub fn new(
        original: Option<PropertyId>,
        parent: Option<PropertyId>,
        linked_dataset: Option<DatasetId>,
    ) -> Self {
        Self {
            original,
            parent,
            linked_dataset,
        }
    }

    /// Referenced property ids, original first
    #[must_use]
    pub fn properties(&self) -> Vec<PropertyId> {
        let mut ids = Vec::with_capacity(2);
        ids.extend(self.original);
        if let Some(parent) = self.parent {
            if self.original != Some(parent) {
                ids.push(parent);
            }
        }
        ids
    }

    /// Whether no property is referenced at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.original.is_none() && self.parent.is_none()
    }
}
