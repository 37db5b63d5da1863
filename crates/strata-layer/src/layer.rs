//! Closed sum over the layer variants

use crate::{Group, Item, LayerBase, LayerBuilder, LayerCommon};
use strata_id::DatasetId;

/// A node of a scene's layer tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    /// Container layer
    Group(Group),
    /// Leaf layer
    Item(Item),
}

impl Layer {
    /// Start building a layer
    #[inline]
    #[must_use]
    pub fn builder() -> LayerBuilder {
        LayerBuilder::new()
    }

    /// Whether this is a group
    #[inline]
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Whether this is an item
    #[inline]
    #[must_use]
    pub fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }

    /// Borrow as a group
    #[inline]
    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Item(_) => None,
        }
    }

    /// Borrow as an item
    #[inline]
    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(i) => Some(i),
            Self::Group(_) => None,
        }
    }

    /// Mutably borrow as a group
    #[inline]
    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Item(_) => None,
        }
    }

    /// Mutably borrow as an item
    #[inline]
    pub fn as_item_mut(&mut self) -> Option<&mut Item> {
        match self {
            Self::Item(i) => Some(i),
            Self::Group(_) => None,
        }
    }

    /// Unwrap into a group
    #[must_use]
    pub fn into_group(self) -> Option<Group> {
        match self {
            Self::Group(g) => Some(g),
            Self::Item(_) => None,
        }
    }

    /// Unwrap into an item
    #[must_use]
    pub fn into_item(self) -> Option<Item> {
        match self {
            Self::Item(i) => Some(i),
            Self::Group(_) => None,
        }
    }

    /// Dataset linked to an item; always `None` for groups
    #[must_use]
    pub fn linked_dataset(&self) -> Option<DatasetId> {
        self.as_item().and_then(Item::linked_dataset)
    }
}

impl LayerCommon for Layer {
    fn base(&self) -> &LayerBase {
        match self {
            Self::Group(g) => g.base(),
            Self::Item(i) => i.base(),
        }
    }

    fn base_mut(&mut self) -> &mut LayerBase {
        match self {
            Self::Group(g) => g.base_mut(),
            Self::Item(i) => i.base_mut(),
        }
    }
}

impl From<Group> for Layer {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<Item> for Layer {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_id::{SceneId, TagId};

    #[test]
    fn downcast_by_variant() {
        let scene = SceneId::new();
        let group: Layer = Group::builder().new_id().scene(scene).must_build().into();
        let item: Layer = Item::builder().new_id().scene(scene).must_build().into();

        assert!(group.is_group());
        assert!(group.as_item().is_none());
        assert!(item.as_item().is_some());
        assert!(item.clone().into_group().is_none());
        assert!(item.into_item().is_some());
    }

    #[test]
    fn linked_dataset_only_on_items() {
        let scene = SceneId::new();
        let ds = DatasetId::new();
        let item: Layer = Item::builder()
            .new_id()
            .scene(scene)
            .linked_dataset(Some(ds))
            .must_build()
            .into();
        let group: Layer = Group::builder().new_id().scene(scene).must_build().into();

        assert_eq!(item.linked_dataset(), Some(ds));
        assert_eq!(group.linked_dataset(), None);
    }

    #[test]
    fn common_setters_reach_the_variant() {
        let mut layer: Layer = Item::builder().new_id().scene(SceneId::new()).must_build().into();
        let tag = TagId::new();

        layer.rename("pin");
        layer.set_visible(false);
        layer.attach_tag(tag).unwrap();

        let item = layer.as_item().unwrap();
        assert_eq!(item.name(), "pin");
        assert!(!item.is_visible());
        assert!(item.tags().has(&tag));
    }
}
