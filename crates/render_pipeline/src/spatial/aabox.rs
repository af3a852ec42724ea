//! Axis-aligned bounding box

use crate::foundation::math::Vec3;

/// Axis-Aligned Bounding Box for spatial queries
///
/// A box whose `min` exceeds its `max` on any axis is *null*: it has no
/// spatial extent and the cull stage always keeps its item (skyboxes,
/// screen-space overlays).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABox {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABox {
    /// Create a new box from min and max points
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The null box
    pub fn null() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Create a box centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// True when the box has no extent at all
    pub fn is_null(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the box
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Length of the longest edge
    pub fn largest_dimension(&self) -> f32 {
        let size = self.max - self.min;
        size.x.max(size.y).max(size.z)
    }

    /// Check if this box contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this box intersects another box
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

impl Default for AABox {
    fn default() -> Self {
        Self::null()
    }
}
