//! Plugin uninstall over a layer tree

use crate::{walk, IdList, Layer, LayerCommon, LayerConfig, LayerError, List, Loader, WalkStep};
use indexmap::IndexMap;
use strata_id::{LayerId, PluginId, PropertyId};
use tracing::{debug, info};

/// Tree-wide operations rooted at a single layer
#[derive(Debug, Clone)]
pub struct Processor<L> {
    root: LayerId,
    loader: L,
    config: LayerConfig,
}

/// Outcome of [`Processor::uninstall_plugin`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallPluginResult {
    /// Surviving layers that changed and must be saved
    pub modified_layers: List,
    /// Layers that must be deleted
    pub removed_layers: IdList,
    /// Properties that must be deleted
    pub removed_properties: Vec<PropertyId>,
}

impl<L: Loader> Processor<L> {
    /// Processor over the tree under `root`
    #[must_use]
    pub fn new(root: LayerId, loader: L) -> Self {
        Self::with_config(root, loader, LayerConfig::default())
    }

    /// Processor with explicit configuration
    #[must_use]
    pub fn with_config(root: LayerId, loader: L, config: LayerConfig) -> Self {
        Self { root, loader, config }
    }

    /// Root of the processed tree
    #[inline]
    #[must_use]
    pub fn root(&self) -> LayerId {
        self.root
    }

    /// Remove everything `plugin` contributes to the tree
    ///
    /// Layers bound to the plugin are detached from their parent and
    /// removed together with their whole subtree. Other layers lose the
    /// infobox fields the plugin renders. Nothing is persisted; the result
    /// lists what the caller has to save and delete.
    ///
    /// # Errors
    /// Loader failures and [`LayerError::DepthExceeded`]. Layers loaded
    /// before the failure are not rolled back.
    pub async fn uninstall_plugin(&self, plugin: &PluginId) -> Result<UninstallPluginResult, LayerError> {
        debug!(root = %self.root, plugin = %plugin, "uninstalling plugin");

        let mut modified: IndexMap<LayerId, Layer> = IndexMap::new();
        let mut removed_layers = IdList::default();
        let mut removed_properties = Vec::new();

        walk(&self.loader, &[self.root], self.config.max_depth, |layer, parents| {
            let parent = parents.last_mut();
            let parent_removed = parent.as_ref().is_some_and(|p| removed_layers.has_layer(&p.id()));

            if !parent_removed {
                if layer.plugin() != Some(plugin) {
                    let stripped = layer.remove_infobox_fields_by_plugin(plugin);
                    if !stripped.is_empty() {
                        removed_properties.extend(stripped);
                        modified.insert(layer.id(), layer.clone());
                    }
                    return Ok(WalkStep::Continue);
                }

                if let Some(parent) = parent {
                    parent.remove_layer(&layer.id());
                    modified.insert(parent.id(), Layer::Group(parent.clone()));
                }
            }

            removed_layers.add_layer(layer.id(), None);
            removed_properties.extend(layer.properties());
            modified.shift_remove(&layer.id());
            Ok(WalkStep::Continue)
        })
        .await?;

        info!(
            plugin = %plugin,
            modified = modified.len(),
            removed_layers = removed_layers.layer_count(),
            removed_properties = removed_properties.len(),
            "plugin uninstalled from layer tree"
        );

        Ok(UninstallPluginResult {
            modified_layers: modified.into_values().collect(),
            removed_layers,
            removed_properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, Infobox, InfoboxField, Item, LoadError, Map};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use strata_id::{PluginExtensionId, SceneId};

    fn plugin(name: &str) -> PluginId {
        name.parse().unwrap()
    }

    fn ext() -> PluginExtensionId {
        "ext".parse().unwrap()
    }

    fn field(plugin: &PluginId) -> InfoboxField {
        InfoboxField::builder()
            .new_id()
            .plugin(plugin.clone())
            .extension(ext())
            .property(PropertyId::new())
            .must_build()
    }

    #[tokio::test]
    async fn untouched_tree_yields_empty_result() {
        let scene = SceneId::new();
        let item = Item::builder().new_id().scene(scene).must_build();
        let root = Group::builder()
            .new_id()
            .scene(scene)
            .layers(IdList::new([item.id()]))
            .must_build();
        let map = Map::new().with(item).with(root.clone());

        let result = Processor::new(root.id(), map)
            .uninstall_plugin(&plugin("absent"))
            .await
            .unwrap();

        assert_eq!(result, UninstallPluginResult::default());
    }

    #[tokio::test]
    async fn removed_group_takes_its_subtree() {
        let scene = SceneId::new();
        let p = plugin("doomed");
        let leaf = Item::builder()
            .new_id()
            .scene(scene)
            .property(Some(PropertyId::new()))
            .must_build();
        let doomed = Group::builder()
            .new_id()
            .scene(scene)
            .plugin(Some(p.clone()))
            .extension(Some(ext()))
            .property(Some(PropertyId::new()))
            .layers(IdList::new([leaf.id()]))
            .must_build();
        let root = Group::builder()
            .new_id()
            .scene(scene)
            .layers(IdList::new([doomed.id()]))
            .must_build();
        let map = Map::new().with(leaf.clone()).with(doomed.clone()).with(root.clone());

        let result = Processor::new(root.id(), map).uninstall_plugin(&p).await.unwrap();

        assert_eq!(result.removed_layers.layers(), vec![doomed.id(), leaf.id()]);
        assert_eq!(
            result.removed_properties,
            vec![doomed.property().unwrap(), leaf.property().unwrap()]
        );
        assert_eq!(result.modified_layers.ids().layers(), vec![root.id()]);
        let root_after = result.modified_layers.find(&root.id()).and_then(Layer::as_group).unwrap();
        assert!(root_after.layers().is_empty());
    }

    #[tokio::test]
    async fn removing_the_root_has_no_parent_to_modify() {
        let scene = SceneId::new();
        let p = plugin("doomed");
        let root = Item::builder()
            .new_id()
            .scene(scene)
            .plugin(Some(p.clone()))
            .extension(Some(ext()))
            .infobox(Some(Infobox::new([field(&p)], PropertyId::new())))
            .must_build();
        let map = Map::from_layer(root.clone());

        let result = Processor::new(root.id(), map).uninstall_plugin(&p).await.unwrap();

        assert!(result.modified_layers.is_empty());
        assert_eq!(result.removed_layers.layers(), vec![root.id()]);
        assert_eq!(result.removed_properties, root.properties());
    }

    struct FailingLoader;

    #[async_trait]
    impl Loader for FailingLoader {
        async fn load(&self, _: &[LayerId]) -> Result<Vec<Option<Layer>>, LoadError> {
            Err(anyhow::anyhow!("storage offline").into())
        }
    }

    #[tokio::test]
    async fn loader_failure_propagates() {
        let err = Processor::new(LayerId::new(), FailingLoader)
            .uninstall_plugin(&plugin("any"))
            .await
            .unwrap_err();
        assert!(matches!(err, LayerError::Load(_)));
        assert!(err.to_string().contains("storage offline"));
    }
}
