use glam::{Vec2, Vec3};

// Shared tuning constants for gesture capture, scoring and targeting.

// Capture
pub const MIN_GESTURE_SAMPLES: usize = 5; // fewer samples cannot describe a curve
pub const START_DEBOUNCE_MS: u64 = 50; // ignore starts this soon after the previous end

// Rune shape (raw authoring coordinates of the "S")
pub const RUNE_SAMPLE_STEP: f32 = 0.02; // curve-parameter step per Bezier segment
pub const RUNE_CENTER: [f32; 2] = [150.0, 140.0]; // subtracted before normalizing
pub const RUNE_HALF_EXTENT: [f32; 2] = [150.0, 140.0]; // divisor that maps to roughly [-1, 1]

// Scoring
pub const OVERLAP_TOLERANCE_PX: f32 = 50.0; // desktop tracing tolerance
pub const TOUCH_TOLERANCE_MULTIPLIER: f32 = 1.2; // fingers are less precise than a mouse
pub const COVERAGE_FLOOR: f32 = 0.5; // below this the score is halved
pub const TOUCH_COVERAGE_FLOOR: f32 = 0.45;
pub const COVERAGE_PENALTY: f32 = 0.5;

// Accuracy tiers used for feedback colouring
pub const TIER_EXCELLENT: f32 = 0.75;
pub const TIER_GOOD: f32 = 0.50;
pub const TIER_FAIR: f32 = 0.25;

// Template projection
pub const TEMPLATE_BASE_SCALE_PX: f32 = 100.0; // on-screen half size at the reference distance
pub const TEMPLATE_REFERENCE_DISTANCE: f32 = 30.0; // world units
pub const TEMPLATE_MIN_SCALE: f32 = 0.5;
pub const TEMPLATE_MAX_SCALE: f32 = 2.0;
pub const FALLBACK_SCALE_PX: f32 = 100.0;
pub const TOUCH_FALLBACK_SCALE_PX: f32 = 120.0; // larger default rune on phones
pub const POPUP_ANCHOR: [f32; 2] = [150.0, 140.0]; // cage popup canvas
pub const POPUP_SCALE_PX: f32 = 150.0; // reproduces the authored popup size

// Target selection
pub const PICK_RADIUS_PX: f32 = 200.0; // explicit intent radius around a projected anchor
pub const TOUCH_PICK_RADIUS_PX: f32 = 250.0;
pub const PROXIMITY_PX: f32 = 200.0; // start gate around a template or static anchor
pub const TOUCH_PROXIMITY_MULTIPLIER: f32 = 1.5;
pub const CENTER_WEIGHT: f32 = 400.0; // max points for sitting on the screen center
pub const PROXIMITY_WEIGHT: f32 = 100.0; // max points for being next to the camera
pub const FACING_WEIGHT: f32 = 50.0; // max points for being straight ahead
pub const MAX_VIEW_ANGLE_RAD: f32 = 1.2; // candidates outside this cone are ignored

// Serpent wave
pub const WAVE_SIZE: usize = 5;
pub const SPAWN_RADIUS_MIN: f32 = 20.0;
pub const SPAWN_RADIUS_MAX: f32 = 35.0;
pub const SPAWN_HEIGHT: f32 = 1.2;
pub const SERPENT_SPEED_MIN: f32 = 0.16; // world units per second
pub const SERPENT_SPEED_MAX: f32 = 0.24;
pub const SERPENT_FLOAT_BASE: f32 = 0.8;
pub const SERPENT_FLOAT_AMPLITUDE: f32 = 0.3;
pub const SERPENT_RUNE_HEIGHT: f32 = 4.5; // rune sprite above the body
pub const SERPENT_RUNE_BOB: f32 = 0.2;
pub const SERPENT_GOAL: Vec3 = Vec3::new(0.0, 0.0, 5.0); // the mentor's position
pub const SERPENT_GOAL_RADIUS: f32 = 4.0;

// Rune stone
pub const STONE_RUNE_OFFSET: Vec3 = Vec3::new(0.0, 1.0, 3.6); // rune face on the rock
pub const STONE_POSITION: Vec3 = Vec3::new(3.0, 2.0, 0.0);

// Phase policy
pub const CAGE_THRESHOLD: f32 = 0.50;
pub const TRAINING_THRESHOLD: f32 = 0.40;
pub const BATTLE_THRESHOLD: f32 = 0.40;
pub const TRAINING_SPELLS_REQUIRED: u32 = 5;

#[inline]
pub fn rune_center() -> Vec2 {
    Vec2::from_array(RUNE_CENTER)
}

#[inline]
pub fn rune_half_extent() -> Vec2 {
    Vec2::from_array(RUNE_HALF_EXTENT)
}

#[inline]
pub fn popup_anchor() -> Vec2 {
    Vec2::from_array(POPUP_ANCHOR)
}
