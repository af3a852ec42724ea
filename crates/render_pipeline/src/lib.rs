//! # Render Pipeline
//!
//! Per-frame item processing for a real-time 3D renderer.
//!
//! ## Stages
//!
//! - **Fetch**: materialize the items of one bucket as `(id, bound)` records
//! - **Cull**: frustum and level-of-detail rejection with statistics
//! - **Depth Sort**: front-to-back (opaque) or back-to-front (transparent)
//! - **Draw**: budgeted submission into a scoped command batch
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use render_pipeline::prelude::*;
//!
//! let mut scene = Scene::new();
//! scene.insert(Item::new(
//!     ItemKey::empty(),
//!     MeshItem::new(MeshHandle(0), AABox::new(Vec3::new(-1.0, -1.0, -6.0), Vec3::new(1.0, 1.0, -4.0))),
//! ));
//!
//! let projection = nalgebra::Perspective3::new(16.0 / 9.0, 1.0, 0.1, 100.0);
//! let frustum = ViewFrustum::from_view_projection(Vec3::zeros(), &projection.to_homogeneous());
//!
//! let mut context = RenderContext::new(RenderArgs::new(frustum));
//! let mut task = RenderTask::from_config(&PipelineConfig::default());
//! let report = task.run_frame(&scene, &mut context);
//! assert!(report.failed.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod spatial;

/// Common imports for pipeline users
pub mod prelude {
    pub use crate::{
        config::{CategoryConfig, Config, ConfigError, LightsConfig, LodConfig, PipelineConfig},
        foundation::math::{Mat4, Vec3},
        render::{
            tasks::{
                cull_items, depth_sort_items, fetch_items, render_items, DrawBucket, DrawLight,
                FrameReport, ItemBound, ItemBounds, Job, RenderTask,
            },
            Batch, BatchScope, Command, DetailsCategory, GpuContext, ItemDetails, RenderArgs,
            RenderContext, RenderDetails, RenderError,
        },
        scene::{
            Item, ItemFilter, ItemId, ItemKey, LightItem, MeshHandle, MeshItem, Renderable, Scene,
            SceneError,
        },
        spatial::{AABox, Containment, Plane, ViewFrustum},
    };
}
