//! Scene store consumed by the pipeline
//!
//! Items live in a slot-map arena addressed by [`ItemId`]. Each registered
//! [`ItemFilter`] owns a pre-classified bucket of ids, so a fetch is a plain
//! walk over one `Vec` with no per-frame filtering.

mod item;
mod item_key;
mod item_store;

pub use item::{Item, LightItem, MeshHandle, MeshItem, Renderable};
pub use item_key::{ItemFilter, ItemKey};
pub use item_store::{ItemId, Scene};

/// Scene lookup errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No bucket is registered for the filter
    #[error("No bucket registered for filter {0:?}")]
    BucketNotFound(ItemFilter),

    /// The id does not name a live item
    #[error("Item {0:?} not found")]
    ItemNotFound(ItemId),
}
