//! Pipeline stages and their composition
//!
//! The stage functions ([`fetch_items`], [`cull_items`], [`depth_sort_items`],
//! [`render_items`]) are usable on their own. The job types wrap them with
//! their per-category parameters, and [`RenderTask`] runs a list of jobs
//! once per frame.

mod cull;
mod draw;
mod draw_jobs;
mod fetch;
mod sort;

#[cfg(test)]
mod tests;

pub use cull::{cull_items, CullItems};
pub use draw::{render_items, DrawItems};
pub use draw_jobs::{DrawBucket, DrawLight};
pub use fetch::{fetch_items, FetchItems, ItemBound, ItemBounds, ProbeNumItems};
pub use sort::{depth_sort_items, DepthSortItems};

use log::{debug, warn};

use crate::config::PipelineConfig;
use crate::render::{DetailsCategory, RenderContext, RenderError};
use crate::scene::Scene;

/// One named unit of per-frame work
pub trait Job {
    /// Name used in logs and reports
    fn name(&self) -> &'static str;

    /// Run for the current frame, returning the number of draws submitted
    fn run(&mut self, scene: &Scene, render_context: &mut RenderContext) -> Result<usize, RenderError>;
}

/// Outcome of one [`RenderTask::run_frame`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
    /// Jobs that completed
    pub executed: usize,
    /// Draws submitted by the completed jobs
    pub draws: usize,
    /// Jobs that failed and were skipped for this frame
    pub failed: Vec<(&'static str, RenderError)>,
}

/// Ordered list of jobs run once per frame
///
/// A failing job only loses its own category for the frame: the error is
/// logged and recorded in the [`FrameReport`], and the remaining jobs still
/// run.
#[derive(Default)]
pub struct RenderTask {
    jobs: Vec<Box<dyn Job>>,
}

impl RenderTask {
    /// Create a task with no jobs
    pub fn new() -> Self {
        Self::default()
    }

    /// Opaque, transparent and light jobs as enabled by the config
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut task = Self::new();
        if config.opaque.enabled {
            task.push_job(DrawBucket::opaque(config.opaque.max_drawn));
        }
        if config.transparent.enabled {
            task.push_job(DrawBucket::transparent(config.transparent.max_drawn));
        }
        if config.lights.enabled {
            task.push_job(DrawLight);
        }
        task
    }

    /// Append a job
    pub fn push_job(&mut self, job: impl Job + 'static) {
        self.jobs.push(Box::new(job));
    }

    /// Names of the jobs in run order
    pub fn job_names(&self) -> Vec<&'static str> {
        self.jobs.iter().map(|job| job.name()).collect()
    }

    /// Run every job once
    ///
    /// Statistics in `render_context` accumulate; resetting them between
    /// frames is the caller's job.
    pub fn run_frame(&mut self, scene: &Scene, render_context: &mut RenderContext) -> FrameReport {
        let mut report = FrameReport::default();

        for job in &mut self.jobs {
            match job.run(scene, render_context) {
                Ok(draws) => {
                    report.executed += 1;
                    report.draws += draws;
                }
                Err(err) => {
                    warn!("{} skipped this frame: {}", job.name(), err);
                    report.failed.push((job.name(), err));
                }
            }
        }

        for category in DetailsCategory::ALL {
            let details = render_context.details.bucket(category);
            if details.considered > 0 {
                debug!(
                    "{:?}: considered {}, out of view {}, too small {}, rendered {}",
                    category, details.considered, details.out_of_view, details.too_small, details.rendered
                );
            }
        }
        debug!(
            "Frame done: {} jobs ok, {} failed, {} draws",
            report.executed,
            report.failed.len(),
            report.draws
        );

        report
    }
}
