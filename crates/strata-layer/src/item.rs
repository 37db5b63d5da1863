//! Item layers

use crate::builder::forward_base_setters;
use crate::{LayerBase, LayerBuilder, LayerCommon, LayerError};
use strata_id::DatasetId;

/// Leaf layer, optionally bound to a dataset record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    base: LayerBase,
    linked_dataset: Option<DatasetId>,
}

impl Item {
    /// Start building an item
    #[inline]
    #[must_use]
    pub fn builder() -> ItemBuilder {
        LayerBuilder::new().item()
    }

    /// Linked dataset
    #[inline]
    #[must_use]
    pub fn linked_dataset(&self) -> Option<DatasetId> {
        self.linked_dataset
    }

    /// Whether a dataset is linked
    #[inline]
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.linked_dataset.is_some()
    }

    /// Link a dataset
    pub fn link(&mut self, dataset: DatasetId) {
        self.linked_dataset = Some(dataset);
    }

    /// Remove the dataset link
    pub fn unlink(&mut self) {
        self.linked_dataset = None;
    }
}

impl LayerCommon for Item {
    fn base(&self) -> &LayerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LayerBase {
        &mut self.base
    }
}

/// Builder for [`Item`]
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    base: LayerBuilder,
    linked_dataset: Option<DatasetId>,
}

impl ItemBuilder {
    pub(crate) fn from_base(base: LayerBuilder) -> Self {
        Self {
            base,
            linked_dataset: None,
        }
    }

    forward_base_setters!();

    /// Linked dataset
    #[inline]
    #[must_use]
    pub fn linked_dataset(mut self, dataset: Option<DatasetId>) -> Self {
        self.linked_dataset = dataset;
        self
    }

    /// Build the item
    ///
    /// # Errors
    /// Missing id or scene.
    pub fn build(self) -> Result<Item, LayerError> {
        Ok(Item {
            base: self.base.build_base()?,
            linked_dataset: self.linked_dataset,
        })
    }

    /// Build the item, panicking on failure
    ///
    /// # Panics
    /// Panics if [`build`](Self::build) fails.
    #[must_use]
    pub fn must_build(self) -> Item {
        match self.build() {
            Ok(i) => i,
            Err(e) => panic!("item build failed: {e}"),
        }
    }
}
