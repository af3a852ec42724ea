//! Drawable items and the built-in payload kinds

use std::fmt;

use crate::foundation::math::{Mat4, Vec3};
use crate::render::{Command, RenderArgs, RenderError};
use crate::scene::ItemKey;
use crate::spatial::AABox;

/// Capability every drawable payload provides
///
/// The pipeline never looks inside a payload: it snapshots `bound()` at
/// fetch time and calls `render()` during the draw stage with the active
/// batch bound into `args`.
pub trait Renderable {
    /// World-space bound (`AABox::null()` = always visible)
    fn bound(&self) -> AABox;

    /// Record draw commands into the active batch
    fn render(&self, args: &mut RenderArgs) -> Result<(), RenderError>;
}

/// A scene entry: classification key plus payload
pub struct Item {
    key: ItemKey,
    payload: Box<dyn Renderable>,
}

impl Item {
    /// Wrap a payload with its key
    pub fn new(key: ItemKey, payload: impl Renderable + 'static) -> Self {
        Self {
            key,
            payload: Box::new(payload),
        }
    }

    /// Classification key
    pub const fn key(&self) -> ItemKey {
        self.key
    }

    /// Current bound of the payload
    pub fn bound(&self) -> AABox {
        self.payload.bound()
    }

    /// Forward to the payload's render capability
    pub fn render(&self, args: &mut RenderArgs) -> Result<(), RenderError> {
        self.payload.render(args)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.key)
            .field("bound", &self.bound())
            .finish_non_exhaustive()
    }
}

/// Opaque reference to GPU-resident geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// A mesh instance placed in the world
#[derive(Debug, Clone)]
pub struct MeshItem {
    /// Geometry to draw
    pub mesh: MeshHandle,
    /// Model-to-world transform
    pub model: Mat4,
    /// World-space bound
    pub bound: AABox,
}

impl MeshItem {
    /// Mesh placed at the center of `bound`
    pub fn new(mesh: MeshHandle, bound: AABox) -> Self {
        let model = if bound.is_null() {
            Mat4::identity()
        } else {
            Mat4::new_translation(&bound.center())
        };
        Self { mesh, model, bound }
    }

    /// Mesh with an explicit model transform
    pub const fn with_model(mesh: MeshHandle, model: Mat4, bound: AABox) -> Self {
        Self { mesh, model, bound }
    }
}

impl Renderable for MeshItem {
    fn bound(&self) -> AABox {
        self.bound
    }

    fn render(&self, args: &mut RenderArgs) -> Result<(), RenderError> {
        args.batch_mut()?.push(Command::DrawMesh {
            mesh: self.mesh,
            model: self.model,
        });
        Ok(())
    }
}

/// A point light with a finite radius of influence
#[derive(Debug, Clone, PartialEq)]
pub struct LightItem {
    /// World-space position
    pub position: Vec3,
    /// Radius of influence
    pub radius: f32,
    /// Linear RGB color
    pub color: Vec3,
}

impl LightItem {
    /// Create a point light
    pub const fn new(position: Vec3, radius: f32, color: Vec3) -> Self {
        Self {
            position,
            radius,
            color,
        }
    }
}

impl Renderable for LightItem {
    fn bound(&self) -> AABox {
        AABox::from_center_extents(self.position, Vec3::repeat(self.radius))
    }

    fn render(&self, args: &mut RenderArgs) -> Result<(), RenderError> {
        args.batch_mut()?.push(Command::DrawLight {
            position: self.position,
            radius: self.radius,
            color: self.color,
        });
        Ok(())
    }
}
