//! Level-of-detail predicates for the cull stage

use crate::config::LodConfig;
use crate::render::{RenderArgs, ShouldRenderFn};
use crate::spatial::AABox;

/// Reject items whose apparent size falls below `min_angular_size`
///
/// The apparent size is approximated as `largest_dimension / distance`
/// from the camera to the bound's center. An item whose center sits on
/// the camera always passes.
pub fn angular_size_test(min_angular_size: f32) -> ShouldRenderFn {
    Box::new(move |args: &RenderArgs, bound: &AABox| {
        let distance = args.view_frustum().distance_to_camera(bound.center());
        if distance <= f32::EPSILON {
            return true;
        }
        bound.largest_dimension() / distance >= min_angular_size
    })
}

/// Predicate described by a [`LodConfig`], if enabled
pub fn from_config(config: &LodConfig) -> Option<ShouldRenderFn> {
    config
        .enabled
        .then(|| angular_size_test(config.min_angular_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::spatial::ViewFrustum;

    fn args_at_origin() -> RenderArgs {
        let projection = nalgebra::Perspective3::new(1.0, 1.0, 0.1, 1000.0);
        RenderArgs::new(ViewFrustum::from_view_projection(Vec3::zeros(), &projection.to_homogeneous()))
    }

    #[test]
    fn test_angular_size_threshold() {
        let args = args_at_origin();
        let test = angular_size_test(0.1);

        // 1 unit at 5 units away = 0.2
        let near = AABox::from_center_extents(Vec3::new(0.0, 0.0, -5.0), Vec3::repeat(0.5));
        // 1 unit at 50 units away = 0.02
        let far = AABox::from_center_extents(Vec3::new(0.0, 0.0, -50.0), Vec3::repeat(0.5));
        let around_camera = AABox::from_center_extents(Vec3::zeros(), Vec3::repeat(0.01));

        assert!(test(&args, &near));
        assert!(!test(&args, &far));
        assert!(test(&args, &around_camera));
    }

    #[test]
    fn test_disabled_config_installs_nothing() {
        assert!(from_config(&LodConfig::default()).is_none());
        assert!(from_config(&LodConfig { enabled: true, min_angular_size: 0.01 }).is_some());
    }
}
