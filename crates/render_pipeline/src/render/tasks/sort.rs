//! Depth-sort stage: order records by distance from the camera

use std::cmp::Ordering;

use crate::render::RenderArgs;
use crate::render::tasks::{ItemBound, ItemBounds};

/// A record with its camera distance, alive only during the sort
#[derive(Debug, Clone, Copy)]
struct ItemDepth {
    center_depth: f32,
    // Near and far depth are placeholders for box-extent aware sorting;
    // both currently equal the center depth.
    #[allow(dead_code)]
    near_depth: f32,
    #[allow(dead_code)]
    far_depth: f32,
    item: ItemBound,
}

fn front_to_back(left: &ItemDepth, right: &ItemDepth) -> Ordering {
    left.center_depth.total_cmp(&right.center_depth)
}

fn back_to_front(left: &ItemDepth, right: &ItemDepth) -> Ordering {
    right.center_depth.total_cmp(&left.center_depth)
}

/// Reorder records by the distance from the camera to each bound's center
///
/// Front-to-back keeps opaque overdraw down; back-to-front is what alpha
/// blending needs. The sort is stable, so equal distances keep input order.
/// The output is always a permutation of the input.
///
/// A null bound has no center and sorts at distance zero: first when
/// drawing front-to-back, last when drawing back-to-front.
///
/// # Panics
///
/// Panics when `args` has no view frustum.
pub fn depth_sort_items(args: &RenderArgs, front_to_back_order: bool, in_items: &[ItemBound]) -> ItemBounds {
    let frustum = args.view_frustum();

    let mut item_depths: Vec<ItemDepth> = in_items
        .iter()
        .map(|item| {
            let distance = if item.bound.is_null() {
                0.0
            } else {
                frustum.distance_to_camera(item.bound.center())
            };
            ItemDepth {
                center_depth: distance,
                near_depth: distance,
                far_depth: distance,
                item: *item,
            }
        })
        .collect();

    if front_to_back_order {
        item_depths.sort_by(front_to_back);
    } else {
        item_depths.sort_by(back_to_front);
    }

    item_depths.into_iter().map(|depth| depth.item).collect()
}

/// Depth-sort job with a fixed direction
#[derive(Debug, Clone, Copy)]
pub struct DepthSortItems {
    /// `true` = nearest first
    pub front_to_back: bool,
}

impl DepthSortItems {
    /// Sort in the given direction
    pub const fn new(front_to_back: bool) -> Self {
        Self { front_to_back }
    }

    /// Run the sort
    pub fn run(&self, args: &RenderArgs, in_items: &[ItemBound]) -> ItemBounds {
        depth_sort_items(args, self.front_to_back, in_items)
    }
}
