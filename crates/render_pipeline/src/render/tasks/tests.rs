//! Frame-level tests for the composed jobs

use crate::config::PipelineConfig;
use crate::foundation::math::Vec3;
use crate::render::tasks::{
    cull_items, depth_sort_items, fetch_items, render_items, DrawBucket, DrawLight, ItemBound, Job,
    RenderTask,
};
use crate::render::{BatchScope, Command, DetailsCategory, ItemDetails, RenderArgs, RenderContext, RenderError};
use crate::scene::{Item, ItemFilter, ItemId, ItemKey, LightItem, MeshHandle, MeshItem, Renderable, Scene};
use crate::spatial::{AABox, ViewFrustum};

/// Camera at the origin looking down -Z, 90 degree field of view
fn camera_context() -> RenderContext {
    let projection = nalgebra::Perspective3::new(1.0, std::f32::consts::FRAC_PI_2, 0.1, 100.0);
    let frustum = ViewFrustum::from_view_projection(Vec3::zeros(), &projection.to_homogeneous());
    RenderContext::new(RenderArgs::new(frustum))
}

fn mesh_at(scene: &mut Scene, key: ItemKey, mesh: u32, center: Vec3) -> ItemId {
    let bound = AABox::from_center_extents(center, Vec3::repeat(0.5));
    scene.insert(Item::new(key, MeshItem::new(MeshHandle(mesh), bound)))
}

fn ids(items: &[ItemBound]) -> Vec<ItemId> {
    items.iter().map(|item| item.id).collect()
}

fn drawn_meshes(render_context: &RenderContext) -> Vec<u32> {
    render_context
        .args
        .context
        .submitted()
        .iter()
        .flat_map(|batch| batch.commands())
        .filter_map(|command| match command {
            Command::DrawMesh { mesh, .. } => Some(mesh.0),
            Command::DrawLight { .. } => None,
        })
        .collect()
}

// Counts are conserved: 5 considered minus 2 out of view leaves 3 rendered, not 4
#[test]
fn test_opaque_cull_statistics() {
    let mut scene = Scene::new();
    mesh_at(&mut scene, ItemKey::empty(), 0, Vec3::new(0.0, 0.0, -5.0));
    mesh_at(&mut scene, ItemKey::empty(), 1, Vec3::new(0.0, 0.0, 5.0));
    mesh_at(&mut scene, ItemKey::empty(), 2, Vec3::new(0.0, 0.0, -10.0));
    mesh_at(&mut scene, ItemKey::empty(), 3, Vec3::new(80.0, 0.0, -10.0));
    scene.insert(Item::new(ItemKey::empty(), MeshItem::new(MeshHandle(4), AABox::null())));

    let mut render_context = camera_context();
    let draws = DrawBucket::opaque(None).run(&scene, &mut render_context).unwrap();

    let expected = ItemDetails {
        considered: 5,
        out_of_view: 2,
        too_small: 0,
        rendered: 3,
    };
    assert_eq!(render_context.details.bucket(DetailsCategory::Opaque), &expected);
    assert_eq!(draws, 3);
}

#[test]
fn test_depth_order_per_direction() {
    let mut scene = Scene::new();
    let at_10 = mesh_at(&mut scene, ItemKey::empty(), 10, Vec3::new(0.0, 0.0, -10.0));
    let at_5 = mesh_at(&mut scene, ItemKey::empty(), 5, Vec3::new(0.0, 0.0, -5.0));
    let at_20 = mesh_at(&mut scene, ItemKey::empty(), 20, Vec3::new(0.0, 0.0, -20.0));

    let render_context = camera_context();
    let items = fetch_items(&scene, ItemFilter::opaque_shape()).unwrap();

    assert_eq!(ids(&depth_sort_items(&render_context.args, true, &items)), vec![at_5, at_10, at_20]);
    assert_eq!(ids(&depth_sort_items(&render_context.args, false, &items)), vec![at_20, at_10, at_5]);
}

#[test]
fn test_budget_draws_nearest_items_only() {
    let mut scene = Scene::new();
    // Inserted far to near so the sort has work to do
    for depth in (1..=10u32).rev() {
        #[allow(clippy::cast_precision_loss)]
        let z = -(depth as f32) * 2.0;
        mesh_at(&mut scene, ItemKey::empty(), depth, Vec3::new(0.0, 0.0, z));
    }

    let mut render_context = camera_context();
    let draws = DrawBucket::opaque(Some(3)).run(&scene, &mut render_context).unwrap();

    assert_eq!(draws, 3);
    assert_eq!(drawn_meshes(&render_context), vec![1, 2, 3]);
    // Truncated items still count as culled in
    assert_eq!(render_context.details.bucket(DetailsCategory::Opaque).rendered, 10);
}

#[test]
fn test_transparent_draws_back_to_front() {
    let mut scene = Scene::new();
    mesh_at(&mut scene, ItemKey::TRANSLUCENT, 1, Vec3::new(0.0, 0.0, -3.0));
    mesh_at(&mut scene, ItemKey::TRANSLUCENT, 2, Vec3::new(0.0, 0.0, -9.0));
    mesh_at(&mut scene, ItemKey::TRANSLUCENT, 3, Vec3::new(0.0, 0.0, -6.0));
    mesh_at(&mut scene, ItemKey::empty(), 99, Vec3::new(0.0, 0.0, -4.0));

    let mut render_context = camera_context();
    DrawBucket::transparent(None).run(&scene, &mut render_context).unwrap();

    assert_eq!(drawn_meshes(&render_context), vec![2, 3, 1]);
    assert_eq!(render_context.details.bucket(DetailsCategory::Translucent).considered, 3);
    assert_eq!(render_context.details.bucket(DetailsCategory::Opaque).considered, 0);
}

#[test]
fn test_light_path_reports_to_other_and_unbinds() {
    let mut scene = Scene::new();
    let white = Vec3::repeat(1.0);
    scene.insert(Item::new(ItemKey::LIGHT, LightItem::new(Vec3::new(0.0, 0.0, -8.0), 2.0, white)));
    scene.insert(Item::new(ItemKey::LIGHT, LightItem::new(Vec3::new(0.0, 0.0, 30.0), 2.0, white)));
    mesh_at(&mut scene, ItemKey::empty(), 0, Vec3::new(0.0, 0.0, -5.0));

    let mut render_context = camera_context();
    let draws = DrawLight.run(&scene, &mut render_context).unwrap();

    assert_eq!(draws, 1);
    assert!(render_context.args.batch.is_none());
    let other = render_context.details.bucket(DetailsCategory::Other);
    assert_eq!((other.considered, other.out_of_view, other.rendered), (2, 1, 1));
    assert_eq!(render_context.details.bucket(DetailsCategory::Light).considered, 0);

    let submitted = render_context.args.context.submitted();
    assert_eq!(submitted.len(), 1);
    assert!(matches!(submitted[0].commands(), [Command::DrawLight { radius, .. }] if (*radius - 2.0).abs() < f32::EPSILON));
}

#[test]
fn test_failing_job_does_not_stop_the_frame() {
    struct Exploding;
    impl Job for Exploding {
        fn name(&self) -> &'static str {
            "Exploding"
        }
        fn run(&mut self, _scene: &Scene, _render_context: &mut RenderContext) -> Result<usize, RenderError> {
            Err(RenderError::RenderingFailed("device lost".into()))
        }
    }

    // No transparent bucket: that job fails its lookup
    let mut scene = Scene::empty();
    scene.register_bucket(ItemFilter::opaque_shape());
    scene.register_bucket(ItemFilter::light());
    mesh_at(&mut scene, ItemKey::empty(), 7, Vec3::new(0.0, 0.0, -5.0));

    let mut task = RenderTask::new();
    task.push_job(Exploding);
    task.push_job(DrawBucket::transparent(None));
    task.push_job(DrawBucket::opaque(None));
    task.push_job(DrawLight);

    let mut render_context = camera_context();
    let report = task.run_frame(&scene, &mut render_context);

    assert_eq!(report.executed, 2);
    assert_eq!(report.draws, 1);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0].0, "Exploding");
    assert_eq!(report.failed[1].0, "DrawTransparent");
    assert!(matches!(report.failed[1].1, RenderError::Scene(_)));
    assert_eq!(drawn_meshes(&render_context), vec![7]);
    assert!(render_context.args.batch.is_none());
}

#[test]
fn test_failing_item_leaves_category_undrawn() {
    struct Corrupt(AABox);
    impl Renderable for Corrupt {
        fn bound(&self) -> AABox {
            self.0
        }
        fn render(&self, _args: &mut RenderArgs) -> Result<(), RenderError> {
            Err(RenderError::RenderingFailed("corrupt vertex buffer".into()))
        }
    }

    let mut scene = Scene::new();
    mesh_at(&mut scene, ItemKey::empty(), 1, Vec3::new(0.0, 0.0, -2.0));
    mesh_at(&mut scene, ItemKey::empty(), 2, Vec3::new(0.0, 0.0, -3.0));
    let far = AABox::from_center_extents(Vec3::new(0.0, 0.0, -40.0), Vec3::repeat(0.5));
    scene.insert(Item::new(ItemKey::empty(), Corrupt(far)));
    scene.insert(Item::new(ItemKey::LIGHT, LightItem::new(Vec3::new(0.0, 0.0, -4.0), 1.0, Vec3::repeat(1.0))));

    let mut task = RenderTask::new();
    task.push_job(DrawBucket::opaque(None));
    task.push_job(DrawLight);

    let mut render_context = camera_context();
    let report = task.run_frame(&scene, &mut render_context);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "DrawOpaque");
    assert!(drawn_meshes(&render_context).is_empty());
    assert!(render_context.args.batch.is_none());
    // The light job still ran and committed its own batch
    assert_eq!(report.executed, 1);
    assert_eq!(render_context.args.context.submitted().len(), 1);
}

#[test]
fn test_task_from_config() {
    let mut config = PipelineConfig::default();
    assert_eq!(RenderTask::from_config(&config).job_names(), vec!["DrawOpaque", "DrawTransparent", "DrawLight"]);

    config.transparent.enabled = false;
    assert_eq!(RenderTask::from_config(&config).job_names(), vec!["DrawOpaque", "DrawLight"]);
}

#[test]
fn test_statistics_accumulate_until_reset() {
    let mut scene = Scene::new();
    mesh_at(&mut scene, ItemKey::empty(), 0, Vec3::new(0.0, 0.0, -5.0));

    let mut task = RenderTask::from_config(&PipelineConfig::default());
    let mut render_context = camera_context();

    task.run_frame(&scene, &mut render_context);
    task.run_frame(&scene, &mut render_context);
    assert_eq!(render_context.details.bucket(DetailsCategory::Opaque).rendered, 2);

    render_context.begin_frame();
    task.run_frame(&scene, &mut render_context);
    assert_eq!(render_context.details.bucket(DetailsCategory::Opaque).rendered, 1);
}

#[test]
fn test_stages_compose_by_hand() {
    let mut scene = Scene::new();
    mesh_at(&mut scene, ItemKey::empty(), 1, Vec3::new(0.0, 0.0, -7.0));
    mesh_at(&mut scene, ItemKey::empty(), 2, Vec3::new(0.0, 0.0, -2.0));
    mesh_at(&mut scene, ItemKey::empty(), 3, Vec3::new(0.0, 50.0, -2.0));

    let mut render_context = camera_context();
    let fetched = fetch_items(&scene, ItemFilter::opaque_shape()).unwrap();
    let culled = cull_items(
        &render_context.args,
        render_context.details.bucket_mut(DetailsCategory::Other),
        &fetched,
    );
    let sorted = depth_sort_items(&render_context.args, true, &culled);
    {
        let mut scope = BatchScope::begin(&mut render_context.args);
        render_items(&scene, &mut scope, &sorted, None).unwrap();
        scope.commit();
    }

    assert_eq!(drawn_meshes(&render_context), vec![2, 1]);
    assert_eq!(render_context.details.bucket(DetailsCategory::Other).out_of_view, 1);
}
