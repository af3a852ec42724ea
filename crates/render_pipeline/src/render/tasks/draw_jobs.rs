//! Composed per-category jobs
//!
//! Every category runs the same chain, differing only in filter,
//! statistics bucket, sort direction and budget:
//!
//! ```text
//! fetch(filter) → cull(category) → [depth sort] → scoped batch → draw(budget)
//! ```
//!
//! The batch is committed only when every draw succeeded; a failing item
//! leaves the whole category undrawn for the frame.

use crate::render::{BatchScope, DetailsCategory, RenderContext, RenderError};
use crate::render::tasks::{
    fetch_items, CullItems, DepthSortItems, DrawItems, FetchItems, Job, ProbeNumItems,
};
use crate::scene::{ItemFilter, Scene};

/// Fetch, cull, optionally sort, then draw one bucket
#[derive(Debug)]
pub struct DrawBucket {
    name: &'static str,
    fetch: FetchItems,
    cull: CullItems,
    sort: Option<DepthSortItems>,
    draw: DrawItems,
}

impl DrawBucket {
    /// Assemble a chain from its parts
    pub const fn new(
        name: &'static str,
        filter: ItemFilter,
        category: DetailsCategory,
        sort: Option<DepthSortItems>,
        max_drawn: Option<usize>,
    ) -> Self {
        Self {
            name,
            fetch: FetchItems::new(filter),
            cull: CullItems::new(category),
            sort,
            draw: DrawItems::new(max_drawn),
        }
    }

    /// Opaque shapes, nearest first
    pub const fn opaque(max_drawn: Option<usize>) -> Self {
        Self::new(
            "DrawOpaque",
            ItemFilter::opaque_shape(),
            DetailsCategory::Opaque,
            Some(DepthSortItems::new(true)),
            max_drawn,
        )
    }

    /// Translucent shapes, farthest first
    pub const fn transparent(max_drawn: Option<usize>) -> Self {
        Self::new(
            "DrawTransparent",
            ItemFilter::transparent_shape(),
            DetailsCategory::Translucent,
            Some(DepthSortItems::new(false)),
            max_drawn,
        )
    }

    /// Report the fetched item count every frame
    #[must_use]
    pub fn with_probe(mut self, probe: ProbeNumItems) -> Self {
        self.fetch = self.fetch.with_probe(probe);
        self
    }
}

impl Job for DrawBucket {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&mut self, scene: &Scene, render_context: &mut RenderContext) -> Result<usize, RenderError> {
        let in_items = self.fetch.run(scene, render_context)?;
        let culled_items = self.cull.run(render_context, &in_items);
        let sorted_items = match self.sort {
            Some(sort) => sort.run(&render_context.args, &culled_items),
            None => culled_items,
        };

        let mut scope = BatchScope::begin(&mut render_context.args);
        let drawn = self.draw.run(scene, &mut scope, &sorted_items)?;
        scope.commit();
        Ok(drawn)
    }
}

/// The light path
///
/// Reads the light bucket directly (no fetch probe), culls into the
/// `Other` statistics bucket and draws every surviving light inside its
/// own scoped batch. Lights are never budgeted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawLight;

impl Job for DrawLight {
    fn name(&self) -> &'static str {
        "DrawLight"
    }

    fn run(&mut self, scene: &Scene, render_context: &mut RenderContext) -> Result<usize, RenderError> {
        let in_items = fetch_items(scene, ItemFilter::light())?;
        let culled_items = CullItems::new(DetailsCategory::Other).run(render_context, &in_items);

        let mut scope = BatchScope::begin(&mut render_context.args);
        let drawn = DrawItems::new(None).run(scene, &mut scope, &culled_items)?;
        scope.commit();
        Ok(drawn)
    }
}
