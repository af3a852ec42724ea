//! Per-frame render arguments

use std::fmt;

use crate::config::LodConfig;
use crate::render::{lod, Batch, GpuContext, RenderDetails, RenderError};
use crate::spatial::{AABox, ViewFrustum};

/// Level-of-detail acceptance test: `true` keeps the item
pub type ShouldRenderFn = Box<dyn Fn(&RenderArgs, &AABox) -> bool>;

/// Ambient state read by every stage
///
/// Only [`BatchScope`](crate::render::BatchScope) writes `batch`; stages
/// otherwise treat the args as read-only.
#[derive(Default)]
pub struct RenderArgs {
    /// Current view volume; required by cull and depth sort
    pub view_frustum: Option<ViewFrustum>,

    /// Optional LOD predicate consulted after the frustum test
    pub should_render: Option<ShouldRenderFn>,

    /// Destination of finished batches
    pub context: GpuContext,

    /// Batch currently accepting commands
    pub batch: Option<Batch>,
}

impl RenderArgs {
    /// Args for a camera, with no LOD predicate
    pub fn new(view_frustum: ViewFrustum) -> Self {
        Self {
            view_frustum: Some(view_frustum),
            ..Self::default()
        }
    }

    /// Install a LOD predicate
    #[must_use]
    pub fn with_should_render(mut self, should_render: ShouldRenderFn) -> Self {
        self.should_render = Some(should_render);
        self
    }

    /// Install or clear the LOD predicate described by `config`
    pub fn apply_lod_config(&mut self, config: &LodConfig) {
        self.should_render = lod::from_config(config);
    }

    /// The view frustum
    ///
    /// # Panics
    ///
    /// Panics when no frustum is set.
    pub fn view_frustum(&self) -> &ViewFrustum {
        self.view_frustum
            .as_ref()
            .expect("render args have no view frustum; set one before running the pipeline")
    }

    /// The batch bound by the enclosing [`BatchScope`](crate::render::BatchScope)
    pub fn batch_mut(&mut self) -> Result<&mut Batch, RenderError> {
        self.batch.as_mut().ok_or(RenderError::NoActiveBatch)
    }
}

impl fmt::Debug for RenderArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderArgs")
            .field("view_frustum", &self.view_frustum)
            .field("should_render", &self.should_render.is_some())
            .field("context", &self.context)
            .field("batch", &self.batch)
            .finish()
    }
}

/// Everything a job needs for one frame: args plus statistics
///
/// Statistics sit beside the args rather than inside them so the cull stage
/// can read the args while writing one statistics bucket.
#[derive(Debug, Default)]
pub struct RenderContext {
    /// Shared per-frame arguments
    pub args: RenderArgs,

    /// Per-category counters, reset by the frame owner
    pub details: RenderDetails,
}

impl RenderContext {
    /// Wrap args with zeroed statistics
    pub fn new(args: RenderArgs) -> Self {
        Self {
            args,
            details: RenderDetails::default(),
        }
    }

    /// Replace the camera for the next frame
    pub fn set_view_frustum(&mut self, view_frustum: ViewFrustum) {
        self.args.view_frustum = Some(view_frustum);
    }

    /// Zero the statistics; call between frames
    pub fn begin_frame(&mut self) {
        self.details.reset();
    }
}
