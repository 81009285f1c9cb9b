// Host-side tests for rune shape sampling and template projection.

use glam::{Vec2, Vec3};
use rune_core::camera::{ndc_to_pixels, Camera, CameraProvider};
use rune_core::shape::{canonical_rune, direction_changes, looks_like_s, RUNE_SEGMENTS};
use rune_core::template::{project_anchor, ProjectionParams, TemplateProjector, TemplateSource};
use rune_core::{GestureError, InputProfile};

const VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

fn camera() -> Camera {
    Camera::looking_at(Vec3::new(0.0, 0.0, 30.0), Vec3::ZERO, VIEWPORT)
}

fn approx(a: Vec2, b: Vec2, eps: f32) -> bool {
    a.distance(b) <= eps
}

#[test]
fn canonical_rune_has_150_vertices() {
    let rune = canonical_rune();
    assert_eq!(rune.len(), 150);
    // First vertex is the top-right start of the S.
    assert!(approx(rune[0], Vec2::new(70.0 / 150.0, -80.0 / 140.0), 1e-5));
    // Everything sits inside the unit-ish box.
    assert!(rune.iter().all(|p| p.x.abs() <= 1.0 && p.y.abs() <= 1.0));
}

#[test]
fn bezier_segments_are_connected() {
    for w in RUNE_SEGMENTS.windows(2) {
        assert_eq!(w[0].eval(1.0), w[1].eval(0.0));
    }
    assert_eq!(RUNE_SEGMENTS[0].eval(0.0), Vec2::new(220.0, 60.0));
    assert_eq!(RUNE_SEGMENTS[2].eval(1.0), Vec2::new(80.0, 220.0));
}

#[test]
fn rune_swings_left_right_twice() {
    let rune: Vec<Vec2> = canonical_rune().iter().map(|p| *p * 100.0).collect();
    assert_eq!(direction_changes(&rune, 0.01), 2);
    assert!(looks_like_s(&rune));
    let line: Vec<Vec2> = (0..20).map(|i| Vec2::new(i as f32 * 5.0, 0.0)).collect();
    assert!(!looks_like_s(&line));
}

#[test]
fn screen_anchored_template_is_anchor_plus_scaled_shape() {
    let projector = TemplateProjector::default();
    let anchor = Vec2::new(960.0, 540.0);
    let template = projector.screen_anchored(anchor, 100.0);
    assert_eq!(template.len(), projector.shape().len());
    for (t, v) in template.points().iter().zip(projector.shape()) {
        assert!(approx(*t, anchor + *v * 100.0, 1e-3));
    }
}

#[test]
fn distance_scale_is_clamped() {
    let p = ProjectionParams::default();
    assert!((p.distance_scale(30.0) - 100.0).abs() < 1e-4);
    assert!((p.distance_scale(20.0) - 150.0).abs() < 1e-3);
    assert!((p.distance_scale(5.0) - 200.0).abs() < 1e-4);
    assert!((p.distance_scale(120.0) - 50.0).abs() < 1e-4);
    assert!((p.distance_scale(0.0) - 200.0).abs() < 1e-4);
}

#[test]
fn swapped_or_nan_scale_bounds_do_not_panic() {
    let swapped = ProjectionParams {
        min_scale: 2.0,
        max_scale: 0.5,
        ..ProjectionParams::default()
    };
    assert!((swapped.distance_scale(5.0) - 200.0).abs() < 1e-4);
    assert!((swapped.distance_scale(120.0) - 50.0).abs() < 1e-4);

    let nan_min = ProjectionParams {
        min_scale: f32::NAN,
        ..ProjectionParams::default()
    };
    assert!((nan_min.distance_scale(5.0) - 200.0).abs() < 1e-4);
    assert!(nan_min.distance_scale(120.0).is_finite());
}

#[test]
fn farther_anchors_get_smaller_templates() {
    let p = ProjectionParams::default();
    let mut prev = f32::MAX;
    for d in [10.0, 15.0, 30.0, 45.0, 60.0, 90.0] {
        let s = p.distance_scale(d);
        assert!(s <= prev);
        prev = s;
    }
}

#[test]
fn anchor_in_front_projects_to_viewport_center() {
    let cam = camera();
    let projected = project_anchor(&cam, Vec3::ZERO).expect("visible");
    assert!(approx(projected.screen, VIEWPORT * 0.5, 0.5));
    assert!((projected.distance - 30.0).abs() < 1e-4);
}

#[test]
fn world_anchored_template_follows_projection() {
    let cam = camera();
    let projector = TemplateProjector::default();
    let (template, source) = projector.world_anchored(&cam, Vec3::ZERO).unwrap();
    match source {
        TemplateSource::World { anchor, scale } => {
            assert!(approx(anchor, VIEWPORT * 0.5, 0.5));
            assert!((scale - 100.0).abs() < 1e-3);
        }
        other => panic!("unexpected source {other:?}"),
    }
    let expected = VIEWPORT * 0.5 + projector.shape()[0] * 100.0;
    assert!(approx(template.points()[0], expected, 0.5));
}

#[test]
fn anchor_behind_camera_has_no_projection() {
    let cam = camera();
    assert_eq!(
        project_anchor(&cam, Vec3::new(0.0, 0.0, 40.0)),
        Err(GestureError::NoProjection)
    );
    let projector = TemplateProjector::default();
    assert!(projector.world_anchored(&cam, Vec3::new(0.0, 0.0, 40.0)).is_err());
}

#[test]
fn anchor_off_to_the_side_has_no_projection() {
    let cam = camera();
    assert_eq!(
        project_anchor(&cam, Vec3::new(500.0, 0.0, 0.0)),
        Err(GestureError::NoProjection)
    );
}

#[test]
fn unprojectable_anchor_falls_back_to_center() {
    let cam = camera();
    let projector = TemplateProjector::new(ProjectionParams::for_profile(InputProfile::Touch));
    let (template, source) =
        projector.world_anchored_or_fallback(&cam, Some(Vec3::new(0.0, 0.0, 40.0)));
    assert_eq!(
        source,
        TemplateSource::Fallback {
            anchor: VIEWPORT * 0.5,
            scale: 120.0
        }
    );
    assert_eq!(template.len(), 150);

    let (_, source) = projector.world_anchored_or_fallback(&cam, None);
    assert!(matches!(source, TemplateSource::Fallback { .. }));
}

#[test]
fn projection_is_recomputed_when_anchor_moves() {
    let cam = camera();
    let projector = TemplateProjector::default();
    let (a, _) = projector.world_anchored(&cam, Vec3::ZERO).unwrap();
    let (b, _) = projector.world_anchored(&cam, Vec3::new(2.0, 0.0, 0.0)).unwrap();
    assert!(b.points()[0].x > a.points()[0].x);
}

#[test]
fn ndc_maps_to_top_left_origin() {
    assert_eq!(ndc_to_pixels(Vec2::new(-1.0, 1.0), VIEWPORT), Vec2::ZERO);
    assert_eq!(ndc_to_pixels(Vec2::new(1.0, -1.0), VIEWPORT), VIEWPORT);
    assert_eq!(camera().viewport_center(), VIEWPORT * 0.5);
}
