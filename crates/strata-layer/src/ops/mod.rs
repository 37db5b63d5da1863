//! Operations spanning more than one layer
//!
//! - [`Processor`]: tree-wide edits such as plugin uninstall
//! - [`LayerItem`]: item creation from a plugin extension

mod item;
mod processor;

pub use item::LayerItem;
pub use processor::{Processor, UninstallPluginResult};
