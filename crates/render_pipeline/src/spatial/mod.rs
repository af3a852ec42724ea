//! Spatial primitives used by the pipeline
//!
//! Provides the item bound (`AABox`) and the view volume (`ViewFrustum`)
//! that the cull and depth-sort stages test against.

mod aabox;
mod frustum;

pub use aabox::AABox;
pub use frustum::{Containment, Plane, ViewFrustum};
