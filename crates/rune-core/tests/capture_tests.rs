// Host-side tests for gesture path capture.

use glam::Vec2;
use instant::Instant;
use rune_core::capture::{CaptureState, InputSource, PathCapture};
use rune_core::{GestureError, StartRejected};
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn capture_n(cap: &mut PathCapture, n: usize, t0: Instant) -> Result<usize, GestureError> {
    cap.start(Vec2::new(0.0, 0.0), InputSource::Pointer, t0)
        .expect("start");
    for i in 1..n {
        assert!(cap.add_sample(Vec2::new(i as f32, i as f32), InputSource::Pointer));
    }
    cap.end(t0 + ms(200)).map(|p| p.len())
}

#[test]
fn five_samples_are_accepted() {
    let mut cap = PathCapture::default();
    assert_eq!(capture_n(&mut cap, 5, Instant::now()), Ok(5));
}

#[test]
fn four_samples_are_an_empty_gesture() {
    let mut cap = PathCapture::default();
    assert_eq!(
        capture_n(&mut cap, 4, Instant::now()),
        Err(GestureError::EmptyGesture { samples: 4, min: 5 })
    );
    assert_eq!(cap.state(), CaptureState::Idle);
}

#[test]
fn path_keeps_insertion_order() {
    let mut cap = PathCapture::default();
    let t0 = Instant::now();
    cap.start(Vec2::new(5.0, 5.0), InputSource::Pointer, t0).unwrap();
    let pts = [
        Vec2::new(1.0, 9.0),
        Vec2::new(9.0, 1.0),
        Vec2::new(3.0, 3.0),
        Vec2::new(7.0, 2.0),
    ];
    for p in pts {
        cap.add_sample(p, InputSource::Pointer);
    }
    let path = cap.end(t0 + ms(100)).unwrap();
    assert_eq!(path.first(), Some(Vec2::new(5.0, 5.0)));
    assert_eq!(&path.points()[1..], &pts);
}

#[test]
fn sample_without_gesture_is_dropped() {
    let mut cap = PathCapture::default();
    assert!(!cap.add_sample(Vec2::ONE, InputSource::Pointer));
    assert!(cap.samples().is_empty());
}

#[test]
fn start_while_capturing_is_rejected() {
    let mut cap = PathCapture::default();
    let t0 = Instant::now();
    cap.start(Vec2::ZERO, InputSource::Pointer, t0).unwrap();
    assert_eq!(
        cap.start(Vec2::ONE, InputSource::Pointer, t0 + ms(5)),
        Err(StartRejected::AlreadyCapturing)
    );
    assert_eq!(cap.samples().len(), 1);
}

#[test]
fn start_inside_debounce_window_is_ignored() {
    let mut cap = PathCapture::default();
    let t0 = Instant::now();
    let _ = capture_n(&mut cap, 6, t0);
    let ended = t0 + ms(200);
    assert_eq!(
        cap.start(Vec2::ZERO, InputSource::Pointer, ended + ms(10)),
        Err(StartRejected::Debounced)
    );
    assert!(cap
        .start(Vec2::ZERO, InputSource::Pointer, ended + ms(60))
        .is_ok());
}

#[test]
fn touch_gesture_ignores_other_fingers() {
    let mut cap = PathCapture::default();
    let t0 = Instant::now();
    cap.start(Vec2::ZERO, InputSource::Touch(7), t0).unwrap();
    assert!(cap.owns(InputSource::Touch(7)));
    assert!(!cap.owns(InputSource::Touch(8)));
    assert!(!cap.add_sample(Vec2::ONE, InputSource::Touch(8)));
    assert!(!cap.add_sample(Vec2::ONE, InputSource::Pointer));
    assert!(cap.add_sample(Vec2::ONE, InputSource::Touch(7)));
    assert_eq!(cap.samples().len(), 2);
    assert_eq!(
        cap.start(Vec2::ONE, InputSource::Touch(8), t0 + ms(1)),
        Err(StartRejected::AlreadyCapturing)
    );
}

#[test]
fn cancel_discards_the_path() {
    let mut cap = PathCapture::default();
    let t0 = Instant::now();
    cap.start(Vec2::ZERO, InputSource::Touch(1), t0).unwrap();
    for i in 0..10 {
        cap.add_sample(Vec2::splat(i as f32), InputSource::Touch(1));
    }
    cap.cancel(t0 + ms(100));
    assert!(!cap.is_capturing());
    assert!(cap.samples().is_empty());
    assert!(cap
        .start(Vec2::ZERO, InputSource::Pointer, t0 + ms(200))
        .is_ok());
}

#[test]
fn end_resets_for_the_next_gesture() {
    let mut cap = PathCapture::default();
    let t0 = Instant::now();
    assert_eq!(capture_n(&mut cap, 8, t0), Ok(8));
    assert!(cap.samples().is_empty());
    assert!(!cap.is_capturing());
    assert_eq!(capture_n(&mut cap, 5, t0 + ms(500)), Ok(5));
}

#[test]
fn stray_end_does_not_debounce_the_next_start() {
    let mut cap = PathCapture::default();
    let t0 = Instant::now();
    assert_eq!(
        cap.end(t0),
        Err(GestureError::EmptyGesture { samples: 0, min: 5 })
    );
    assert!(cap
        .start(Vec2::ZERO, InputSource::Pointer, t0 + ms(10))
        .is_ok());
}
