//! Fetch stage: bucket ids to `(id, bound)` records

use std::fmt;

use log::trace;

use crate::render::RenderContext;
use crate::scene::{ItemFilter, ItemId, Scene, SceneError};
use crate::spatial::AABox;

/// Item identity with the bound snapshot taken at fetch time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBound {
    /// Item in the scene store
    pub id: ItemId,
    /// Bound when the item was fetched; later stages never change it
    pub bound: AABox,
}

impl ItemBound {
    /// Pair an id with its bound
    pub const fn new(id: ItemId, bound: AABox) -> Self {
        Self { id, bound }
    }
}

/// Records flowing between stages
pub type ItemBounds = Vec<ItemBound>;

/// Observer told how many items a fetch produced
pub type ProbeNumItems = Box<dyn FnMut(&RenderContext, usize)>;

/// Materialize every item of one bucket with its current bound
///
/// The output is sized exactly to the bucket and carries no ordering
/// guarantee beyond the store's own.
pub fn fetch_items(scene: &Scene, filter: ItemFilter) -> Result<ItemBounds, SceneError> {
    let ids = scene.bucket(filter)?;

    let mut out_items = Vec::with_capacity(ids.len());
    for &id in ids {
        let item = scene.item(id)?;
        out_items.push(ItemBound::new(id, item.bound()));
    }
    Ok(out_items)
}

/// Fetch job for one filter with an optional count probe
pub struct FetchItems {
    /// Bucket to read
    pub filter: ItemFilter,
    probe_num_items: Option<ProbeNumItems>,
}

impl FetchItems {
    /// Fetch a bucket with no probe
    pub const fn new(filter: ItemFilter) -> Self {
        Self {
            filter,
            probe_num_items: None,
        }
    }

    /// Report the item count after every run
    #[must_use]
    pub fn with_probe(mut self, probe: ProbeNumItems) -> Self {
        self.probe_num_items = Some(probe);
        self
    }

    /// Run the fetch, then notify the probe
    pub fn run(&mut self, scene: &Scene, render_context: &RenderContext) -> Result<ItemBounds, SceneError> {
        let out_items = fetch_items(scene, self.filter)?;
        trace!("Fetched {} items for {:?}", out_items.len(), self.filter);

        if let Some(probe) = self.probe_num_items.as_mut() {
            probe(render_context, out_items.len());
        }
        Ok(out_items)
    }
}

impl fmt::Debug for FetchItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchItems")
            .field("filter", &self.filter)
            .field("probe_num_items", &self.probe_num_items.is_some())
            .finish()
    }
}
