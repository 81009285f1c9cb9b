// Host-side tests for the capture -> resolve cycle.

use glam::{Vec2, Vec3};
use instant::Instant;
use rune_core::constants::{popup_anchor, PICK_RADIUS_PX, POPUP_SCALE_PX, SERPENT_RUNE_HEIGHT};
use rune_core::session::{SessionParams, SessionState};
use rune_core::shape::normalized_rune;
use rune_core::template::project_anchor;
use rune_core::{
    Camera, GestureError, InputProfile, InputSource, Outcome, Resolution, RuneStone, SceneView,
    Selection, SelectionReason, Serpent, SpellSession, StartGate, StartRejected, Target,
    TemplateMode, TemplateSource,
};
use std::time::Duration;

const VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

fn traced(anchor: Vec2, scale: f32) -> Vec<Vec2> {
    let mut pts: Vec<Vec2> = normalized_rune(0.0375)
        .into_iter()
        .map(|v| anchor + v * scale)
        .collect();
    pts.truncate(80);
    pts
}

/// Camera 30 units in front of the stone's rune, looking straight at it.
fn facing(stone: &RuneStone) -> Camera {
    let anchor = stone.anchor();
    Camera::looking_at(anchor + Vec3::new(0.0, 0.0, 30.0), anchor, VIEWPORT)
}

fn draw<T: Target>(
    session: &mut SpellSession,
    points: &[Vec2],
    scene: &SceneView<'_, T>,
    t0: Instant,
) -> Result<Outcome, StartRejected> {
    session.begin(points[0], InputSource::Pointer, t0, scene)?;
    for p in &points[1..] {
        session.sample(*p, InputSource::Pointer);
    }
    Ok(session.finish(t0 + Duration::from_millis(400), scene))
}

fn resolved(outcome: Outcome) -> Resolution {
    match outcome {
        Outcome::Resolved(r) => r,
        Outcome::Rejected(e) => panic!("gesture rejected: {e}"),
    }
}

#[test]
fn popup_trace_scores_high_without_a_target() {
    let mut session = SpellSession::default();
    let scene = SceneView::<RuneStone>::screen(popup_anchor(), POPUP_SCALE_PX, VIEWPORT);
    let gesture = traced(popup_anchor(), POPUP_SCALE_PX);
    let r = resolved(draw(&mut session, &gesture, &scene, Instant::now()).unwrap());
    assert!(r.score() >= 0.95, "score {}", r.score());
    assert_eq!(r.target, None);
    assert_eq!(r.samples, 80);
    assert!(r.s_like);
    assert_eq!(
        r.template,
        TemplateSource::Screen {
            anchor: popup_anchor(),
            scale: POPUP_SCALE_PX
        }
    );
    assert_eq!(r.target_index(), Err(GestureError::NoValidTarget));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn four_samples_are_rejected() {
    let mut session = SpellSession::default();
    let scene = SceneView::<RuneStone>::screen(popup_anchor(), POPUP_SCALE_PX, VIEWPORT);
    let gesture = traced(popup_anchor(), POPUP_SCALE_PX);
    let outcome = draw(&mut session, &gesture[..4], &scene, Instant::now()).unwrap();
    assert_eq!(
        outcome,
        Outcome::Rejected(GestureError::EmptyGesture { samples: 4, min: 5 })
    );
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn start_far_from_the_popup_template_is_ignored() {
    let mut session = SpellSession::default();
    let scene = SceneView::<RuneStone>::screen(popup_anchor(), POPUP_SCALE_PX, VIEWPORT);
    assert_eq!(
        session.begin(
            Vec2::new(1500.0, 900.0),
            InputSource::Pointer,
            Instant::now(),
            &scene
        ),
        Err(StartRejected::NotNearTarget)
    );
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.capture().is_capturing());
}

#[test]
fn shifted_gesture_scores_zero() {
    let mut session = SpellSession::default();
    let scene = SceneView::<RuneStone> {
        gate: StartGate::Open,
        ..SceneView::screen(Vec2::new(960.0, 540.0), 100.0, VIEWPORT)
    };
    let gesture: Vec<Vec2> = traced(Vec2::new(1260.0, 540.0), 100.0);
    let r = resolved(draw(&mut session, &gesture, &scene, Instant::now()).unwrap());
    assert_eq!(r.score(), 0.0);
}

#[test]
fn stone_trace_resolves_against_the_stone() {
    let stones = vec![RuneStone::default()];
    let cam = facing(&stones[0]);
    let scene = SceneView::world(&cam, &stones, StartGate::NearAnchor);
    let mut session = SpellSession::default();
    let gesture = traced(VIEWPORT * 0.5, 100.0);
    let r = resolved(draw(&mut session, &gesture, &scene, Instant::now()).unwrap());
    assert!(r.score() >= 0.95, "score {}", r.score());
    let sel = r.target.expect("stone selected");
    assert_eq!(sel.index, 0);
    assert_eq!(sel.reason, SelectionReason::Explicit);
    assert!(matches!(r.template, TemplateSource::World { .. }));
}

#[test]
fn start_far_from_the_stone_is_ignored() {
    let stones = vec![RuneStone::default()];
    let cam = facing(&stones[0]);
    let scene = SceneView::world(&cam, &stones, StartGate::NearAnchor);
    let mut session = SpellSession::default();
    assert_eq!(
        session.begin(Vec2::new(20.0, 20.0), InputSource::Pointer, Instant::now(), &scene),
        Err(StartRejected::NotNearTarget)
    );
}

#[test]
fn touch_profile_widens_the_start_gate() {
    let stones = vec![RuneStone::default()];
    let cam = facing(&stones[0]);
    let scene = SceneView::world(&cam, &stones, StartGate::NearAnchor);
    let start = VIEWPORT * 0.5 + Vec2::new(250.0, 0.0);

    let mut desktop = SpellSession::default();
    assert!(desktop
        .begin(start, InputSource::Pointer, Instant::now(), &scene)
        .is_err());

    let mut touch = SpellSession::new(SessionParams::for_profile(InputProfile::Touch));
    assert!(touch
        .begin(start, InputSource::Touch(0), Instant::now(), &scene)
        .is_ok());
    assert_eq!(touch.state(), SessionState::Capturing);
    assert!(touch.owns(InputSource::Touch(0)));
}

#[test]
fn missing_camera_uses_the_centered_fallback() {
    let stones = vec![RuneStone::default()];
    let scene = SceneView {
        camera: None,
        targets: stones.as_slice(),
        mode: TemplateMode::World,
        gate: StartGate::AnyAlive,
        viewport: VIEWPORT,
    };
    let mut session = SpellSession::default();
    let gesture = traced(VIEWPORT * 0.5, 100.0);
    let r = resolved(draw(&mut session, &gesture, &scene, Instant::now()).unwrap());
    assert!(r.score() >= 0.95);
    assert_eq!(
        r.template,
        TemplateSource::Fallback {
            anchor: VIEWPORT * 0.5,
            scale: 100.0
        }
    );
    assert_eq!(r.target.map(|s| s.reason), Some(SelectionReason::Fallback));
}

#[test]
fn no_alive_target_blocks_the_start() {
    let mut stone = RuneStone::default();
    stone.retire();
    let stones = vec![stone];
    let cam = facing(&stones[0]);
    let scene = SceneView::world(&cam, &stones, StartGate::AnyAlive);
    let mut session = SpellSession::default();
    assert_eq!(
        session.begin(VIEWPORT * 0.5, InputSource::Pointer, Instant::now(), &scene),
        Err(StartRejected::NotNearTarget)
    );
}

#[test]
fn target_lost_mid_gesture_resolves_without_one() {
    let stones = vec![RuneStone::default()];
    let cam = facing(&stones[0]);
    let gesture = traced(VIEWPORT * 0.5, 100.0);
    let t0 = Instant::now();
    let mut session = SpellSession::default();
    {
        let scene = SceneView::world(&cam, &stones, StartGate::AnyAlive);
        session
            .begin(gesture[0], InputSource::Pointer, t0, &scene)
            .unwrap();
    }
    for p in &gesture[1..] {
        session.sample(*p, InputSource::Pointer);
    }

    let mut gone = stones.clone();
    gone[0].retire();
    let scene = SceneView::world(&cam, &gone, StartGate::AnyAlive);
    let r = resolved(session.finish(t0 + Duration::from_millis(300), &scene));
    assert_eq!(r.target, None);
    assert!(matches!(r.template, TemplateSource::Fallback { .. }));
    // the fallback sits where the stone was, so the trace still scores
    assert!(r.score() >= 0.95);
}

#[test]
fn live_accuracy_tracks_the_gesture_in_progress() {
    let mut session = SpellSession::default();
    let scene = SceneView::<RuneStone>::screen(popup_anchor(), POPUP_SCALE_PX, VIEWPORT);
    assert_eq!(session.live_accuracy(&scene), None);

    let gesture = traced(popup_anchor(), POPUP_SCALE_PX);
    session
        .begin(gesture[0], InputSource::Pointer, Instant::now(), &scene)
        .unwrap();
    assert_eq!(session.live_accuracy(&scene), None);
    for p in &gesture[1..20] {
        session.sample(*p, InputSource::Pointer);
    }
    let partial = session.live_accuracy(&scene).expect("live score");
    for p in &gesture[20..] {
        session.sample(*p, InputSource::Pointer);
    }
    let full = session.live_accuracy(&scene).expect("live score");
    assert!(partial < full);
    assert!(full >= 0.95);

    session.cancel(Instant::now());
    assert_eq!(session.live_accuracy(&scene), None);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn second_start_during_capture_is_rejected() {
    let mut session = SpellSession::default();
    let scene = SceneView::<RuneStone> {
        gate: StartGate::Open,
        ..SceneView::screen(Vec2::new(960.0, 540.0), 100.0, VIEWPORT)
    };
    let t0 = Instant::now();
    session
        .begin(Vec2::ZERO, InputSource::Touch(1), t0, &scene)
        .unwrap();
    assert_eq!(
        session.begin(Vec2::ONE, InputSource::Touch(2), t0, &scene),
        Err(StartRejected::AlreadyCapturing)
    );
}

/// Two serpents seen from `eye`: one under the screen center, one whose rune
/// sits near the top-right corner.
fn center_and_corner_serpents(eye: Vec3) -> Vec<Serpent> {
    let lift = Vec3::new(0.0, SERPENT_RUNE_HEIGHT, 0.0);
    let corner_rune = eye + Vec3::new(0.6, 0.33, -1.0).normalize() * 30.0;
    vec![
        Serpent::new(1, Vec3::ZERO, 0.2, 0.0),
        Serpent::new(2, corner_rune - lift, 0.2, 0.0),
    ]
}

fn stroke_from(start: Vec2) -> Vec<Vec2> {
    (0..10)
        .map(|i| start + Vec2::new(i as f32 * 4.0, i as f32 * 3.0))
        .collect()
}

#[test]
fn target_under_the_start_point_survives_a_camera_turn() {
    let eye = Vec3::new(0.0, SERPENT_RUNE_HEIGHT, 30.0);
    let serpents = center_and_corner_serpents(eye);
    let cam_start = Camera::looking_at(eye, Vec3::new(0.0, SERPENT_RUNE_HEIGHT, 0.0), VIEWPORT);
    let cam_end = Camera::looking_at(eye, Vec3::new(6.0, SERPENT_RUNE_HEIGHT, 0.0), VIEWPORT);

    let start = project_anchor(&cam_start, serpents[1].anchor())
        .expect("corner rune on screen")
        .screen;
    let moved = project_anchor(&cam_end, serpents[1].anchor())
        .expect("corner rune still on screen")
        .screen;
    // far enough that the start point no longer lies on the turned rune
    assert!(start.distance(moved) > PICK_RADIUS_PX);

    let gesture = stroke_from(start);
    let t0 = Instant::now();
    let mut session = SpellSession::default();
    {
        let scene = SceneView::world(&cam_start, &serpents, StartGate::AnyAlive);
        session
            .begin(gesture[0], InputSource::Pointer, t0, &scene)
            .unwrap();
    }
    for p in &gesture[1..] {
        session.sample(*p, InputSource::Pointer);
    }
    let scene = SceneView::world(&cam_end, &serpents, StartGate::AnyAlive);
    let r = resolved(session.finish(t0 + Duration::from_millis(300), &scene));
    assert_eq!(
        r.target,
        Some(Selection {
            index: 1,
            reason: SelectionReason::Explicit
        })
    );
    match r.template {
        TemplateSource::World { anchor, .. } => assert!(anchor.distance(moved) < 1e-2),
        other => panic!("expected a world template, got {other:?}"),
    }
}

#[test]
fn intended_target_defeated_mid_gesture_falls_back_to_the_heuristic() {
    let eye = Vec3::new(0.0, SERPENT_RUNE_HEIGHT, 30.0);
    let serpents = center_and_corner_serpents(eye);
    let cam = Camera::looking_at(eye, Vec3::new(0.0, SERPENT_RUNE_HEIGHT, 0.0), VIEWPORT);
    let start = project_anchor(&cam, serpents[1].anchor()).unwrap().screen;

    let gesture = stroke_from(start);
    let t0 = Instant::now();
    let mut session = SpellSession::default();
    {
        let scene = SceneView::world(&cam, &serpents, StartGate::AnyAlive);
        session
            .begin(gesture[0], InputSource::Pointer, t0, &scene)
            .unwrap();
    }
    for p in &gesture[1..] {
        session.sample(*p, InputSource::Pointer);
    }
    let mut after = serpents.clone();
    after[1].on_defeated();
    let scene = SceneView::world(&cam, &after, StartGate::AnyAlive);
    let r = resolved(session.finish(t0 + Duration::from_millis(300), &scene));
    assert_eq!(
        r.target,
        Some(Selection {
            index: 0,
            reason: SelectionReason::Heuristic
        })
    );
}

#[test]
fn samples_are_consumed_only_by_the_active_gesture() {
    let mut session = SpellSession::default();
    let scene = SceneView::<RuneStone> {
        gate: StartGate::Open,
        ..SceneView::screen(Vec2::new(960.0, 540.0), 100.0, VIEWPORT)
    };
    assert!(!session.sample(Vec2::ONE, InputSource::Touch(3)));

    session
        .begin(Vec2::ZERO, InputSource::Touch(3), Instant::now(), &scene)
        .unwrap();
    assert!(!session.sample(Vec2::ONE, InputSource::Touch(4)));
    assert!(!session.sample(Vec2::ONE, InputSource::Pointer));
    assert!(session.sample(Vec2::ONE, InputSource::Touch(3)));

    session.cancel(Instant::now());
    assert!(!session.sample(Vec2::ONE, InputSource::Touch(3)));
}
