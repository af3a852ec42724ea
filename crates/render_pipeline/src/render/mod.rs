//! Rendering side of the pipeline
//!
//! ## Architecture
//!
//! ```text
//! Scene buckets
//!      ↓  fetch
//! ItemBounds ── cull ──→ RenderDetails (per category)
//!      ↓  depth sort
//! ItemBounds
//!      ↓  draw (budget)
//! Batch (scoped) ──→ GpuContext
//! ```
//!
//! [`RenderContext`] is the per-frame state threaded through every stage: the
//! [`RenderArgs`] (frustum, LOD predicate, GPU context, bound batch) and the
//! [`RenderDetails`] statistics.

mod args;
mod batch;
mod details;
pub mod lod;
pub mod tasks;

pub use args::{RenderArgs, RenderContext, ShouldRenderFn};
pub use batch::{Batch, BatchScope, Command, GpuContext};
pub use details::{DetailsCategory, ItemDetails, RenderDetails};

use crate::scene::SceneError;

/// Result type for pipeline operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while drawing a category
///
/// None of these abort the frame: the task driver logs the failure and
/// skips the category that produced it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Scene lookup failed (unknown bucket or stale item id)
    #[error("Scene lookup failed: {0}")]
    Scene(#[from] SceneError),

    /// An item tried to record commands with no batch bound
    #[error("No command batch is bound to the render args")]
    NoActiveBatch,

    /// An item's own render capability failed
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),
}
