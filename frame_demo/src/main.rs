//! Headless frame pipeline demo
//!
//! Scatters meshes and lights around the origin, orbits a camera through
//! them and runs the item pipeline once per frame, logging what was culled
//! and drawn.
//!
//! Usage: `frame_demo [pipeline.toml|pipeline.ron]`

use std::f32::consts::TAU;

use nalgebra::{Isometry3, Perspective3, Point3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use render_pipeline::foundation::logging::{self, info, LevelFilter};
use render_pipeline::prelude::*;

// Scene settings
const SCENE_RADIUS: f32 = 60.0;
const NUM_OPAQUE: u32 = 400;
const NUM_TRANSPARENT: u32 = 60;
const NUM_LIGHTS: usize = 24;

// Camera settings
const ORBIT_RADIUS: f32 = 80.0;
const FRAME_COUNT: usize = 8;
const ASPECT: f32 = 16.0 / 9.0;
const FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

fn random_center(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-SCENE_RADIUS..SCENE_RADIUS),
        rng.gen_range(-SCENE_RADIUS * 0.25..SCENE_RADIUS * 0.25),
        rng.gen_range(-SCENE_RADIUS..SCENE_RADIUS),
    )
}

fn build_scene(rng: &mut StdRng) -> Scene {
    let mut scene = Scene::new();

    for mesh in 0..NUM_OPAQUE {
        let extents = Vec3::repeat(rng.gen_range(0.1..3.0));
        let bound = AABox::from_center_extents(random_center(rng), extents);
        scene.insert(Item::new(ItemKey::SHADOW_CASTER, MeshItem::new(MeshHandle(mesh), bound)));
    }

    for mesh in 0..NUM_TRANSPARENT {
        let extents = Vec3::repeat(rng.gen_range(0.5..2.0));
        let bound = AABox::from_center_extents(random_center(rng), extents);
        scene.insert(Item::new(ItemKey::TRANSLUCENT, MeshItem::new(MeshHandle(NUM_OPAQUE + mesh), bound)));
    }

    for _ in 0..NUM_LIGHTS {
        let color = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        let light = LightItem::new(random_center(rng), rng.gen_range(2.0..10.0), color);
        scene.insert(Item::new(ItemKey::LIGHT, light));
    }

    // Sky dome: unbounded, always drawn
    scene.insert(Item::new(ItemKey::empty(), MeshItem::new(MeshHandle(u32::MAX), AABox::null())));

    scene
}

#[allow(clippy::cast_precision_loss)]
fn camera_frustum(frame: usize) -> ViewFrustum {
    let angle = TAU * frame as f32 / FRAME_COUNT as f32;
    let eye = Point3::new(ORBIT_RADIUS * angle.cos(), 10.0, ORBIT_RADIUS * angle.sin());
    let view = Isometry3::look_at_rh(&eye, &Point3::origin(), &Vec3::y());
    let projection = Perspective3::new(ASPECT, FOV_Y, 0.1, 250.0);

    let view_projection = projection.to_homogeneous() * view.to_homogeneous();
    ViewFrustum::from_view_projection(eye.coords, &view_projection)
}

fn load_config() -> Result<PipelineConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading pipeline config from {}", path);
            PipelineConfig::load_from_file(&path)?
        }
        None => PipelineConfig {
            opaque: CategoryConfig {
                enabled: true,
                max_drawn: Some(150),
            },
            lod: LodConfig {
                enabled: true,
                min_angular_size: 0.01,
            },
            ..PipelineConfig::default()
        },
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(LevelFilter::Info);

    let config = load_config()?;
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let scene = build_scene(&mut rng);
    info!("Scene has {} items", scene.len());

    let mut task = RenderTask::from_config(&config);
    info!("Jobs: {:?}", task.job_names());

    let mut render_context = RenderContext::new(RenderArgs::new(camera_frustum(0)));
    render_context.args.apply_lod_config(&config.lod);

    for frame in 0..FRAME_COUNT {
        render_context.begin_frame();
        render_context.set_view_frustum(camera_frustum(frame));

        let report = task.run_frame(&scene, &mut render_context);
        let batches = render_context.args.context.take_submitted();

        info!(
            "Frame {}: {} draws in {} batches, {} failed jobs",
            frame,
            report.draws,
            batches.len(),
            report.failed.len()
        );
        for category in DetailsCategory::ALL {
            let details = render_context.details.bucket(category);
            if details.considered > 0 {
                info!(
                    "  {:?}: considered {}, out of view {}, too small {}, rendered {}",
                    category, details.considered, details.out_of_view, details.too_small, details.rendered
                );
            }
        }
    }

    Ok(())
}
