//! Command batches and the scoped batch binding
//!
//! A [`Batch`] accumulates the commands of one draw job. [`BatchScope`] binds
//! a fresh batch into [`RenderArgs`] for as long as the guard lives. The
//! batch reaches the [`GpuContext`] only through [`BatchScope::commit`];
//! a scope left any other way (error return, panic) unbinds and discards it,
//! so a failed job draws nothing.

use std::ops::{Deref, DerefMut};

use log::trace;

use crate::foundation::math::{Mat4, Vec3};
use crate::render::RenderArgs;
use crate::scene::MeshHandle;

/// A single recorded graphics command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Draw a mesh instance
    DrawMesh {
        /// Geometry
        mesh: MeshHandle,
        /// Model-to-world transform
        model: Mat4,
    },
    /// Accumulate a point light
    DrawLight {
        /// World-space position
        position: Vec3,
        /// Radius of influence
        radius: f32,
        /// Linear RGB color
        color: Vec3,
    },
}

/// Ordered list of commands recorded by one job
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    commands: Vec<Command>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Recorded commands in submission order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Receiver of submitted batches
///
/// Stands in for the device queue: batches are kept in submission order
/// until the frame owner drains them.
#[derive(Debug, Default)]
pub struct GpuContext {
    submitted: Vec<Batch>,
}

impl GpuContext {
    /// Create a context with nothing submitted
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a finished batch
    pub fn submit(&mut self, batch: Batch) {
        trace!("Submitting batch with {} commands", batch.len());
        self.submitted.push(batch);
    }

    /// Batches submitted since the last drain
    pub fn submitted(&self) -> &[Batch] {
        &self.submitted
    }

    /// Drain the submitted batches
    pub fn take_submitted(&mut self) -> Vec<Batch> {
        std::mem::take(&mut self.submitted)
    }

    /// Total commands across the submitted batches
    pub fn draw_count(&self) -> usize {
        self.submitted.iter().map(Batch::len).sum()
    }
}

/// Scoped binding of a fresh batch into the render args
///
/// Dereferences to the bound [`RenderArgs`]. [`commit`](Self::commit)
/// unbinds and submits the batch. Dropping an uncommitted scope unbinds and
/// discards it.
pub struct BatchScope<'a> {
    args: &'a mut RenderArgs,
}

impl<'a> BatchScope<'a> {
    /// Bind a new batch
    ///
    /// # Panics
    ///
    /// Panics if a batch is already bound; batches do not nest.
    pub fn begin(args: &'a mut RenderArgs) -> Self {
        assert!(args.batch.is_none(), "a command batch is already bound to the render args");
        args.batch = Some(Batch::new());
        Self { args }
    }

    /// Unbind the batch and submit it
    pub fn commit(self) {
        if let Some(batch) = self.args.batch.take() {
            self.args.context.submit(batch);
        }
    }
}

impl Deref for BatchScope<'_> {
    type Target = RenderArgs;

    fn deref(&self) -> &Self::Target {
        self.args
    }
}

impl DerefMut for BatchScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.args
    }
}

impl Drop for BatchScope<'_> {
    fn drop(&mut self) {
        if let Some(batch) = self.args.batch.take() {
            trace!("Discarding uncommitted batch with {} commands", batch.len());
        }
    }
}
