//! Recursive merge of a loaded layer tree
//!
//! [`merge`](crate::merge) projects one layer under its parent. The
//! [`Merger`] applies it to a whole subtree: every child is merged against
//! the group that contains it, so a group's property acts as the fallback
//! for all of its direct children.

use crate::{merge, Group, Layer, LayerCommon, LayerConfig, LayerError, Loader, Merged};
use futures::future::{BoxFuture, FutureExt};
use indexmap::IndexSet;
use strata_id::{LayerId, PropertyId};
use tracing::trace;

/// A merged subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedLayer {
    /// Merged group and its merged children
    Group {
        /// The group's own projection
        merged: Merged,
        /// Children in group order
        children: Vec<MergedLayer>,
    },
    /// Merged item
    Item {
        /// The item's projection
        merged: Merged,
    },
}

impl MergedLayer {
    /// Projection of this node
    #[must_use]
    pub fn merged(&self) -> &Merged {
        match self {
            Self::Group { merged, .. } | Self::Item { merged } => merged,
        }
    }

    /// Merged children; empty for items
    #[must_use]
    pub fn children(&self) -> &[MergedLayer] {
        match self {
            Self::Group { children, .. } => children,
            Self::Item { .. } => &[],
        }
    }

    /// Every property referenced in the subtree, deduplicated, parents first
    #[must_use]
    pub fn properties(&self) -> Vec<PropertyId> {
        let mut ids = IndexSet::new();
        self.collect_properties(&mut ids);
        ids.into_iter().collect()
    }

    fn collect_properties(&self, ids: &mut IndexSet<PropertyId>) {
        ids.extend(self.merged().properties());
        for child in self.children() {
            child.collect_properties(ids);
        }
    }
}

/// Merges layer subtrees loaded through a [`Loader`]
#[derive(Debug, Clone)]
pub struct Merger<L> {
    loader: L,
    config: LayerConfig,
}

impl<L: Loader> Merger<L> {
    /// Merger with default configuration
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self::with_config(loader, LayerConfig::default())
    }

    /// Merger with explicit configuration
    #[must_use]
    pub fn with_config(loader: L, config: LayerConfig) -> Self {
        Self { loader, config }
    }

    /// Merge `layer` under `parent`, then its children under it
    ///
    /// Returns `None` when the layer cannot be merged with `parent`.
    ///
    /// # Errors
    /// Loader failures and [`LayerError::DepthExceeded`].
    pub async fn merge_layer(&self, layer: &Layer, parent: Option<&Group>) -> Result<Option<MergedLayer>, LayerError> {
        self.merge_at(layer, parent, 0).await
    }

    /// Load `id` and merge it under `parent`
    ///
    /// # Errors
    /// See [`merge_layer`](Self::merge_layer).
    pub async fn merge_layer_from_id(
        &self,
        id: LayerId,
        parent: Option<&Group>,
    ) -> Result<Option<MergedLayer>, LayerError> {
        let loaded = self.loader.load(&[id]).await?;
        match loaded.into_iter().next().flatten() {
            Some(layer) => self.merge_at(&layer, parent, 0).await,
            None => Ok(None),
        }
    }

    fn merge_at<'a>(
        &'a self,
        layer: &'a Layer,
        parent: Option<&'a Group>,
        depth: usize,
    ) -> BoxFuture<'a, Result<Option<MergedLayer>, LayerError>> {
        async move {
            if depth > self.config.max_depth {
                return Err(LayerError::DepthExceeded(self.config.max_depth));
            }
            let Some(merged) = merge(Some(layer), parent) else {
                return Ok(None);
            };
            trace!(layer = %layer.id(), depth, "merged layer");

            let Layer::Group(group) = layer else {
                return Ok(Some(MergedLayer::Item { merged }));
            };

            let loaded = self.loader.load(&group.layers().layers()).await?;
            let mut children = Vec::with_capacity(loaded.len());
            for child in loaded.into_iter().flatten() {
                if let Some(merged_child) = self.merge_at(&child, Some(group), depth + 1).await? {
                    children.push(merged_child);
                }
            }
            Ok(Some(MergedLayer::Group { merged, children }))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdList, Item, Map};
    use pretty_assertions::assert_eq;
    use strata_id::SceneId;
    use strata_property::MergedMetadata;

    #[tokio::test]
    async fn children_merge_against_their_group() {
        let scene = SceneId::new();
        let (gp, ip) = (PropertyId::new(), PropertyId::new());
        let item = Item::builder().new_id().scene(scene).property(Some(ip)).must_build();
        let group = Group::builder()
            .new_id()
            .scene(scene)
            .property(Some(gp))
            .layers(IdList::new([item.id(), LayerId::new()]))
            .must_build();
        let map = Map::new().with(item.clone()).with(group.clone());

        let merged = Merger::new(map)
            .merge_layer_from_id(group.id(), None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(merged.merged().original(), group.id());
        assert_eq!(merged.children().len(), 1);
        let child = merged.children()[0].merged();
        assert_eq!(child.parent(), Some(group.id()));
        assert_eq!(child.property(), &MergedMetadata::new(Some(ip), Some(gp), None));
        assert_eq!(merged.properties(), vec![gp, ip]);
    }

    #[tokio::test]
    async fn unknown_id_merges_to_none() {
        let merged = Merger::new(Map::new())
            .merge_layer_from_id(LayerId::new(), None)
            .await
            .unwrap();
        assert!(merged.is_none());
    }

    #[tokio::test]
    async fn cross_scene_parent_merges_to_none() {
        let item: Layer = Item::builder().new_id().scene(SceneId::new()).must_build().into();
        let parent = Group::builder().new_id().scene(SceneId::new()).must_build();
        let merged = Merger::new(Map::new()).merge_layer(&item, Some(&parent)).await.unwrap();
        assert!(merged.is_none());
    }
}
