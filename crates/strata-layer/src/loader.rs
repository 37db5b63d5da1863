//! Layer loading and tree traversal
//!
//! A [`Loader`] resolves layer ids to layers, typically from storage. It
//! returns one entry per requested id, `None` for ids it does not know.
//! [`walk`] drives a loader depth-first over a layer tree, visiting every
//! parent before its children and handing the visitor the chain of
//! ancestor groups.

use crate::{Group, Layer, LayerCommon, LayerError, List, LoadError, Map};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use strata_id::LayerId;
use tracing::{debug, trace};

/// Resolves layer ids to layers
#[async_trait]
pub trait Loader: Send + Sync {
    /// Load `ids`; the result is aligned with `ids`
    ///
    /// # Errors
    /// Storage or transport failures.
    async fn load(&self, ids: &[LayerId]) -> Result<Vec<Option<Layer>>, LoadError>;
}

#[async_trait]
impl Loader for Map {
    async fn load(&self, ids: &[LayerId]) -> Result<Vec<Option<Layer>>, LoadError> {
        Ok(ids.iter().map(|id| self.layer(id).cloned()).collect())
    }
}

#[async_trait]
impl Loader for List {
    async fn load(&self, ids: &[LayerId]) -> Result<Vec<Option<Layer>>, LoadError> {
        Ok(ids.iter().map(|id| self.find(id).cloned()).collect())
    }
}

#[async_trait]
impl<T: Loader + ?Sized> Loader for std::sync::Arc<T> {
    async fn load(&self, ids: &[LayerId]) -> Result<Vec<Option<Layer>>, LoadError> {
        (**self).load(ids).await
    }
}

/// What [`walk`] does after visiting a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    /// Descend into the layer's children
    Continue,
    /// Do not descend into this layer's children
    SkipChildren,
}

/// Visit the trees under `roots` depth-first, parents before children
///
/// The visitor receives the loaded layer and its ancestor groups, nearest
/// last. Both are owned copies held by the walk: changes made to the layer
/// are seen when its children are loaded, and changes made to an ancestor
/// are seen by the ancestor's later children. Ids the loader cannot
/// resolve are skipped.
///
/// # Errors
/// The first loader or visitor error, or [`LayerError::DepthExceeded`] if
/// the tree nests deeper than `max_depth` groups.
pub async fn walk<L, F>(loader: &L, roots: &[LayerId], max_depth: usize, mut visit: F) -> Result<(), LayerError>
where
    L: Loader + ?Sized,
    F: FnMut(&mut Layer, &mut [Group]) -> Result<WalkStep, LayerError> + Send,
{
    debug!(roots = roots.len(), max_depth, "walking layer tree");
    let mut parents = Vec::new();
    walk_level(loader, roots.to_vec(), &mut parents, max_depth, &mut visit).await
}

fn walk_level<'a, L, F>(
    loader: &'a L,
    ids: Vec<LayerId>,
    parents: &'a mut Vec<Group>,
    max_depth: usize,
    visit: &'a mut F,
) -> BoxFuture<'a, Result<(), LayerError>>
where
    L: Loader + ?Sized,
    F: FnMut(&mut Layer, &mut [Group]) -> Result<WalkStep, LayerError> + Send,
{
    async move {
        if parents.len() > max_depth {
            return Err(LayerError::DepthExceeded(max_depth));
        }

        let loaded = loader.load(&ids).await?;
        for mut layer in loaded.into_iter().flatten() {
            trace!(layer = %layer.id(), depth = parents.len(), "visit");
            let step = visit(&mut layer, parents.as_mut_slice())?;

            let Layer::Group(group) = layer else { continue };
            if step == WalkStep::SkipChildren || group.layers().is_empty() {
                continue;
            }

            let children = group.layers().layers();
            parents.push(group);
            let result = walk_level(loader, children, parents, max_depth, visit).await;
            parents.pop();
            result?;
        }
        Ok(())
    }
    .boxed()
}
