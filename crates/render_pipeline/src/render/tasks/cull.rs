//! Cull stage: frustum and level-of-detail rejection

use log::trace;

use crate::render::{DetailsCategory, ItemDetails, RenderArgs, RenderContext};
use crate::render::tasks::{ItemBound, ItemBounds};
use crate::spatial::Containment;

/// Keep the records that should be drawn, counting into `details`
///
/// Per record, in input order:
/// 1. `considered` is incremented.
/// 2. A null bound is kept without further tests.
/// 3. A bound entirely outside the frustum is dropped (`out_of_view`).
/// 4. A bound the LOD predicate rejects is dropped (`too_small`).
/// 5. Everything else is kept, preserving relative order.
///
/// Finally `rendered` grows by the number of kept records, so it is a
/// running total across every cull of the frame.
///
/// # Panics
///
/// Panics when `args` has no view frustum.
pub fn cull_items(args: &RenderArgs, details: &mut ItemDetails, in_items: &[ItemBound]) -> ItemBounds {
    let frustum = args.view_frustum();

    let mut out_items = Vec::with_capacity(in_items.len());
    for item in in_items {
        details.considered += 1;

        if item.bound.is_null() {
            out_items.push(*item);
            continue;
        }

        if frustum.classify(&item.bound) == Containment::Outside {
            details.out_of_view += 1;
            continue;
        }

        let big_enough = args
            .should_render
            .as_ref()
            .map_or(true, |should_render| should_render(args, &item.bound));
        if big_enough {
            out_items.push(*item);
        } else {
            details.too_small += 1;
        }
    }

    details.rendered += out_items.len();
    out_items
}

/// Cull job reporting into one statistics category
#[derive(Debug, Clone, Copy)]
pub struct CullItems {
    /// Bucket the counters land in
    pub category: DetailsCategory,
}

impl CullItems {
    /// Cull into `category`
    pub const fn new(category: DetailsCategory) -> Self {
        Self { category }
    }

    /// Run the cull against the context's args and the selected bucket
    pub fn run(&self, render_context: &mut RenderContext, in_items: &[ItemBound]) -> ItemBounds {
        let RenderContext { args, details } = render_context;
        let out_items = cull_items(args, details.bucket_mut(self.category), in_items);
        trace!(
            "Culled {:?}: {} in, {} out",
            self.category,
            in_items.len(),
            out_items.len()
        );
        out_items
    }
}
