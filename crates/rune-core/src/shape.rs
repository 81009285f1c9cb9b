//! The canonical "S" rune as three cubic Bezier segments.

use crate::constants::{rune_center, rune_half_extent, RUNE_SAMPLE_STEP};
use glam::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    #[inline]
    pub fn eval(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }
}

/// Authoring coordinates: `M 220 60 C 180 60, 120 60, 120 100 C 120 140, 180 140, 180 180 C 180 220, 120 220, 80 220`.
pub const RUNE_SEGMENTS: [CubicBezier; 3] = [
    CubicBezier::new(
        Vec2::new(220.0, 60.0),
        Vec2::new(180.0, 60.0),
        Vec2::new(120.0, 60.0),
        Vec2::new(120.0, 100.0),
    ),
    CubicBezier::new(
        Vec2::new(120.0, 100.0),
        Vec2::new(120.0, 140.0),
        Vec2::new(180.0, 140.0),
        Vec2::new(180.0, 180.0),
    ),
    CubicBezier::new(
        Vec2::new(180.0, 180.0),
        Vec2::new(180.0, 220.0),
        Vec2::new(120.0, 220.0),
        Vec2::new(80.0, 220.0),
    ),
];

/// Sample every segment at `t = i * step` for `i` in `0..round(1 / step)`.
///
/// The end point of a segment is left out because it is the start point of
/// the next one, so a step of 0.02 yields exactly 150 vertices.
pub fn sample_segments(segments: &[CubicBezier], step: f32) -> Vec<Vec2> {
    let per_segment = (1.0 / step.max(1e-4)).round() as usize;
    let mut out = Vec::with_capacity(per_segment * segments.len());
    for seg in segments {
        for i in 0..per_segment {
            out.push(seg.eval(i as f32 * step));
        }
    }
    out
}

/// The rune centered on the origin with an extent of roughly [-1, 1].
pub fn normalized_rune(step: f32) -> Vec<Vec2> {
    let center = rune_center();
    let half = rune_half_extent();
    sample_segments(&RUNE_SEGMENTS, step)
        .into_iter()
        .map(|p| (p - center) / half)
        .collect()
}

pub fn canonical_rune() -> Vec<Vec2> {
    normalized_rune(RUNE_SAMPLE_STEP)
}

/// Count horizontal direction reversals, ignoring moves of at most `min_dx`.
pub fn direction_changes(path: &[Vec2], min_dx: f32) -> usize {
    let mut changes = 0;
    let mut last_dir = 0.0_f32;
    for w in path.windows(2) {
        let dx = w[1].x - w[0].x;
        if dx.abs() <= min_dx {
            continue;
        }
        let dir = dx.signum();
        if last_dir != 0.0 && dir != last_dir {
            changes += 1;
        }
        last_dir = dir;
    }
    changes
}

/// Cheap shape check: an "S" swings left-right at least twice.
pub fn looks_like_s(path: &[Vec2]) -> bool {
    path.len() >= 8 && direction_changes(path, 1.0) >= 2
}
