//! Draw stage: budgeted submission into the bound batch

use log::trace;

use crate::render::{RenderArgs, RenderError};
use crate::render::tasks::ItemBound;
use crate::scene::Scene;

/// Invoke each item's render capability, in order, up to `max_drawn`
///
/// `None` draws every record. `Some(n)` draws exactly `min(n, len)`
/// records and leaves the rest untouched. Statistics are not updated
/// here: "rendered" was already attributed when the records survived
/// culling.
///
/// Returns the number of items drawn. The first item error stops the
/// stage and is returned to the caller.
pub fn render_items(
    scene: &Scene,
    args: &mut RenderArgs,
    in_items: &[ItemBound],
    max_drawn: Option<usize>,
) -> Result<usize, RenderError> {
    let budget = max_drawn.map_or(in_items.len(), |max| max.min(in_items.len()));

    for item_details in &in_items[..budget] {
        let item = scene.item(item_details.id)?;
        item.render(args)?;
    }

    if budget < in_items.len() {
        trace!("Draw budget reached: {} of {} items drawn", budget, in_items.len());
    }
    Ok(budget)
}

/// Draw job with an optional budget
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawItems {
    /// Maximum submissions per run (`None` = unlimited)
    pub max_drawn: Option<usize>,
}

impl DrawItems {
    /// Draw with a budget
    pub const fn new(max_drawn: Option<usize>) -> Self {
        Self { max_drawn }
    }

    /// Run the draw against the currently bound batch
    pub fn run(&self, scene: &Scene, args: &mut RenderArgs, in_items: &[ItemBound]) -> Result<usize, RenderError> {
        render_items(scene, args, in_items, self.max_drawn)
    }
}
