//! View frustum for visibility culling and camera distance

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::spatial::AABox;

/// Result of classifying a bound against the frustum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Entirely inside every plane
    Inside,
    /// Straddles at least one plane
    Intersects,
    /// Entirely outside at least one plane
    Outside,
}

/// Plane defined by an inward-facing unit normal and distance from origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (normalized, pointing into the frustum)
    pub normal: Vec3,
    /// Distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from normal and distance
    ///
    /// Both are rescaled so the normal has unit length.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        let length = normal.magnitude();
        Self {
            normal: normal / length,
            distance: distance / length,
        }
    }

    /// Create a plane from `ax + by + cz + d = 0` coefficients
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        Self::new(coefficients.xyz(), coefficients.w)
    }

    /// Calculate signed distance from plane to point (positive = inside)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }
}

/// Camera view volume
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrustum {
    /// Six planes (left, right, bottom, top, near, far)
    pub planes: [Plane; 6],

    /// World-space eye position, used for depth sorting and LOD
    pub camera_position: Vec3,
}

impl ViewFrustum {
    /// Create a frustum from six planes
    pub const fn new(planes: [Plane; 6], camera_position: Vec3) -> Self {
        Self {
            planes,
            camera_position,
        }
    }

    /// Extract frustum planes from a view-projection matrix
    ///
    /// Uses the Gribb-Hartmann method. The matrix must map the view volume to
    /// OpenGL clip space (`-w <= z <= w`), which is what
    /// `nalgebra::Perspective3` and `Orthographic3` produce.
    pub fn from_view_projection(camera_position: Vec3, view_projection: &Mat4) -> Self {
        let row = |i: usize| {
            Vec4::new(
                view_projection[(i, 0)],
                view_projection[(i, 1)],
                view_projection[(i, 2)],
                view_projection[(i, 3)],
            )
        };
        let (x, y, z, w) = (row(0), row(1), row(2), row(3));

        let planes = [
            Plane::from_coefficients(w + x),
            Plane::from_coefficients(w - x),
            Plane::from_coefficients(w + y),
            Plane::from_coefficients(w - y),
            Plane::from_coefficients(w + z),
            Plane::from_coefficients(w - z),
        ];

        Self::new(planes, camera_position)
    }

    /// Classify a box against all six planes
    ///
    /// Callers filter out null boxes first; a null box has no meaningful
    /// corners to test.
    pub fn classify(&self, aabox: &AABox) -> Containment {
        let mut result = Containment::Inside;

        for plane in &self.planes {
            // p-vertex: the corner furthest along the normal
            let mut p = aabox.min;
            // n-vertex: the corner furthest against the normal
            let mut n = aabox.max;
            if plane.normal.x >= 0.0 { p.x = aabox.max.x; n.x = aabox.min.x; }
            if plane.normal.y >= 0.0 { p.y = aabox.max.y; n.y = aabox.min.y; }
            if plane.normal.z >= 0.0 { p.z = aabox.max.z; n.z = aabox.min.z; }

            if plane.distance_to_point(p) < 0.0 {
                return Containment::Outside;
            }
            if plane.distance_to_point(n) < 0.0 {
                result = Containment::Intersects;
            }
        }

        result
    }

    /// Check if a box is inside or intersects the frustum
    pub fn box_in_frustum(&self, aabox: &AABox) -> bool {
        self.classify(aabox) != Containment::Outside
    }

    /// Euclidean distance from the eye to a point
    pub fn distance_to_camera(&self, point: Vec3) -> f32 {
        (point - self.camera_position).magnitude()
    }
}
