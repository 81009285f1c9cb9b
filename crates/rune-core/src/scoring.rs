//! Bidirectional nearest-point coverage scoring.
//!
//! `drawing_accuracy` asks whether the player stayed on the line,
//! `template_coverage` asks whether the whole rune was traced. The final
//! score is the smaller of the two, halved again when coverage falls under
//! the floor so a short precise scribble cannot pass.

use crate::constants::*;
use glam::Vec2;

/// Input hardware class; touch input gets looser tolerances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputProfile {
    #[default]
    Desktop,
    Touch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoringParams {
    pub tolerance_px: f32,
    pub coverage_floor: f32,
    pub coverage_penalty: f32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            tolerance_px: OVERLAP_TOLERANCE_PX,
            coverage_floor: COVERAGE_FLOOR,
            coverage_penalty: COVERAGE_PENALTY,
        }
    }
}

impl ScoringParams {
    /// Effective parameters for an input profile; the defaults are untouched.
    pub fn for_profile(profile: InputProfile) -> Self {
        let base = Self::default();
        match profile {
            InputProfile::Desktop => base,
            InputProfile::Touch => Self {
                tolerance_px: base.tolerance_px * TOUCH_TOLERANCE_MULTIPLIER,
                coverage_floor: TOUCH_COVERAGE_FLOOR,
                ..base
            },
        }
    }

    pub fn with_tolerance(&self, tolerance_px: f32) -> Self {
        Self {
            tolerance_px,
            ..self.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub drawing_accuracy: f32,
    pub template_coverage: f32,
    pub score: f32,
    /// True when the coverage-floor penalty was applied.
    pub penalized: bool,
}

#[inline]
fn near_any(p: Vec2, others: &[Vec2], tol_sq: f32) -> bool {
    others.iter().any(|q| p.distance_squared(*q) <= tol_sq)
}

/// Fraction of `from` points within `tolerance` of some point in `to`.
pub fn fraction_within(from: &[Vec2], to: &[Vec2], tolerance: f32) -> f32 {
    if from.is_empty() || to.is_empty() {
        return 0.0;
    }
    let tol_sq = tolerance * tolerance;
    let hits = from.iter().filter(|p| near_any(**p, to, tol_sq)).count();
    hits as f32 / from.len() as f32
}

pub fn score_paths(drawn: &[Vec2], template: &[Vec2], params: &ScoringParams) -> ScoreBreakdown {
    if drawn.is_empty() || template.is_empty() {
        return ScoreBreakdown::default();
    }
    let drawing_accuracy = fraction_within(drawn, template, params.tolerance_px);
    let template_coverage = fraction_within(template, drawn, params.tolerance_px);
    let mut score = drawing_accuracy.min(template_coverage);
    let penalized = template_coverage < params.coverage_floor;
    if penalized {
        score *= params.coverage_penalty;
    }
    ScoreBreakdown {
        drawing_accuracy,
        template_coverage,
        score: score.clamp(0.0, 1.0),
        penalized,
    }
}

/// Coarse accuracy band used for trail and readout colouring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccuracyTier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl AccuracyTier {
    pub fn from_score(score: f32) -> Self {
        if score >= TIER_EXCELLENT {
            AccuracyTier::Excellent
        } else if score >= TIER_GOOD {
            AccuracyTier::Good
        } else if score >= TIER_FAIR {
            AccuracyTier::Fair
        } else {
            AccuracyTier::Poor
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            AccuracyTier::Excellent => "#00FF00",
            AccuracyTier::Good => "#FFFF00",
            AccuracyTier::Fair => "#FF8800",
            AccuracyTier::Poor => "#FF4444",
        }
    }
}

/// Score as a whole percentage for display.
#[inline]
pub fn percent(score: f32) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}
