//! Merged layer projections
//!
//! A [`Merged`] is the effective view of a layer under its parent group:
//! identity and display state come from the layer, property values are
//! looked up original-first, then parent, then linked dataset. Merged
//! values are read-only snapshots.

use crate::{Group, Infobox, Layer, LayerCommon, TagList};
use indexmap::IndexSet;
use strata_id::{DatasetId, InfoboxFieldId, LayerId, PluginExtensionId, PluginId, PropertyId, SceneId};
use strata_property::MergedMetadata;

/// Effective view of a layer under an optional parent group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    original: LayerId,
    parent: Option<LayerId>,
    scene: SceneId,
    name: String,
    visible: bool,
    plugin: Option<PluginId>,
    extension: Option<PluginExtensionId>,
    property: MergedMetadata,
    infobox: Option<MergedInfobox>,
    tags: TagList,
}

/// Effective view of an infobox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedInfobox {
    property: MergedMetadata,
    fields: Vec<MergedInfoboxField>,
}

/// Effective view of an infobox field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedInfoboxField {
    id: InfoboxFieldId,
    plugin: PluginId,
    extension: PluginExtensionId,
    property: MergedMetadata,
}

/// Merge `original` with its `parent` group
///
/// Returns `None` without an original, or when the parent belongs to a
/// different scene.
#[must_use]
pub fn merge(original: Option<&Layer>, parent: Option<&Group>) -> Option<Merged> {
    let original = original?;
    if parent.is_some_and(|p| p.scene() != original.scene()) {
        return None;
    }

    let linked = original.linked_dataset();
    Some(Merged {
        original: original.id(),
        parent: parent.map(LayerCommon::id),
        scene: original.scene(),
        name: original.name().to_owned(),
        visible: original.is_visible(),
        plugin: original.plugin().cloned(),
        extension: original.extension().cloned(),
        property: MergedMetadata::new(original.property(), parent.and_then(LayerCommon::property), linked),
        infobox: merge_infobox(original.infobox(), parent.and_then(LayerCommon::infobox), linked),
        tags: merge_tags(original.tags(), parent.map(LayerCommon::tags)),
    })
}

/// Merge two infoboxes
///
/// Fields come from `original` when it has any, else from `parent`; they
/// are never combined. Only the infobox property is merged across both.
#[must_use]
pub fn merge_infobox(
    original: Option<&Infobox>,
    parent: Option<&Infobox>,
    linked_dataset: Option<DatasetId>,
) -> Option<MergedInfobox> {
    if original.is_none() && parent.is_none() {
        return None;
    }

    let source = match original {
        Some(o) if !o.is_empty() => o.fields(),
        _ => parent.map(Infobox::fields).unwrap_or_default(),
    };

    let fields = source
        .iter()
        .map(|f| MergedInfoboxField {
            id: f.id(),
            plugin: f.plugin().clone(),
            extension: f.extension().clone(),
            property: MergedMetadata::new(Some(f.property()), None, linked_dataset),
        })
        .collect();

    Some(MergedInfobox {
        property: MergedMetadata::new(
            original.map(Infobox::property),
            parent.map(Infobox::property),
            linked_dataset,
        ),
        fields,
    })
}

fn merge_tags(original: &TagList, parent: Option<&TagList>) -> TagList {
    let mut tags = original.clone();
    for tag in parent.map(TagList::ids).unwrap_or_default() {
        tags.add(tag);
    }
    tags
}

impl Merged {
    /// Merged layer id
    #[inline]
    #[must_use]
    pub fn original(&self) -> LayerId {
        self.original
    }

    /// Parent group id
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<LayerId> {
        self.parent
    }

    /// Owning scene
    #[inline]
    #[must_use]
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Display name of the original
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Visibility of the original
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Plugin of the original
    #[inline]
    #[must_use]
    pub fn plugin(&self) -> Option<&PluginId> {
        self.plugin.as_ref()
    }

    /// Extension of the original
    #[inline]
    #[must_use]
    pub fn extension(&self) -> Option<&PluginExtensionId> {
        self.extension.as_ref()
    }

    /// Layer property descriptor
    #[inline]
    #[must_use]
    pub fn property(&self) -> &MergedMetadata {
        &self.property
    }

    /// Merged infobox
    #[inline]
    #[must_use]
    pub fn infobox(&self) -> Option<&MergedInfobox> {
        self.infobox.as_ref()
    }

    /// Original tags followed by inherited parent tags
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    /// Every referenced property id, deduplicated in first-seen order
    ///
    /// Layer property, infobox property, then each field's property; the
    /// original side of each descriptor precedes the parent side.
    #[must_use]
    pub fn properties(&self) -> Vec<PropertyId> {
        let mut ids = IndexSet::new();
        let mut add = |m: &MergedMetadata| {
            ids.extend(m.original);
            ids.extend(m.parent);
        };

        add(&self.property);
        if let Some(infobox) = &self.infobox {
            add(&infobox.property);
            for field in &infobox.fields {
                add(&field.property);
            }
        }
        ids.into_iter().collect()
    }
}

impl MergedInfobox {
    /// Infobox property descriptor
    #[inline]
    #[must_use]
    pub fn property(&self) -> &MergedMetadata {
        &self.property
    }

    /// Merged fields
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[MergedInfoboxField] {
        &self.fields
    }
}

impl MergedInfoboxField {
    /// Field id
    #[inline]
    #[must_use]
    pub fn id(&self) -> InfoboxFieldId {
        self.id
    }

    /// Rendering plugin
    #[inline]
    #[must_use]
    pub fn plugin(&self) -> &PluginId {
        &self.plugin
    }

    /// Rendering extension
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &PluginExtensionId {
        &self.extension
    }

    /// Field property descriptor
    #[inline]
    #[must_use]
    pub fn property(&self) -> &MergedMetadata {
        &self.property
    }
}
