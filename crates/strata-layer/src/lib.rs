//! Strata Layer Model
//!
//! The content tree of a scene. A scene's layers form a tree of
//! [`Group`]s (ordered containers) and [`Item`]s (leaves). Each layer may be
//! rendered by a plugin extension, owns a property holding its values, and
//! may carry an [`Infobox`] of plugin-rendered fields.
//!
//! # Core Concepts
//!
//! - [`IdList`]: ordered, duplicate-free child id set of a group
//! - [`Layer`]: closed sum of [`Group`] and [`Item`]; shared state via [`LayerCommon`]
//! - [`merge`]: effective view of a layer under its parent group
//! - [`Initializer`]: declarative description materialized into layers and properties
//! - [`ops::Processor`]: tree-wide edits such as plugin uninstall
//!
//! # Example
//!
//! ```rust
//! use strata_id::{PropertyId, SceneId};
//! use strata_layer::prelude::*;
//!
//! let scene = SceneId::new();
//! let item = Item::builder()
//!     .new_id()
//!     .scene(scene)
//!     .property(Some(PropertyId::new()))
//!     .must_build();
//! let group = Group::builder()
//!     .new_id()
//!     .scene(scene)
//!     .layers(IdList::new([item.id()]))
//!     .must_build();
//!
//! let merged = merge(Some(&Layer::from(item.clone())), Some(&group)).unwrap();
//! assert_eq!(merged.property().original, item.property());
//! assert_eq!(merged.parent(), Some(group.id()));
//! ```

#![warn(missing_docs)]

mod builder;

mod base;
mod config;
mod error;
mod group;
mod id_list;
mod infobox;
mod initializer;
mod item;
mod layer;
mod list;
mod loader;
mod merged;
mod tag;

pub mod merging;
pub mod ops;

pub use base::{LayerBase, LayerCommon};
pub use builder::LayerBuilder;
pub use config::{LayerConfig, DEFAULT_MAX_DEPTH};
pub use error::{InitializerError, LayerError, LoadError, ValidationError};
pub use group::{Group, GroupBuilder};
pub use id_list::IdList;
pub use infobox::{Infobox, InfoboxField, InfoboxFieldBuilder};
pub use initializer::{Initializer, InitializerInfobox, InitializerInfoboxField, InitializerResult};
pub use item::{Item, ItemBuilder};
pub use layer::Layer;
pub use list::{GroupList, ItemList, List, Map};
pub use loader::{walk, Loader, WalkStep};
pub use merged::{merge, merge_infobox, Merged, MergedInfobox, MergedInfoboxField};
pub use tag::TagList;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the layer model
    pub use crate::{
        merge, Group, IdList, Infobox, InfoboxField, Initializer, Item, Layer, LayerCommon, LayerConfig,
        LayerError, List, Loader, Map, Merged,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
