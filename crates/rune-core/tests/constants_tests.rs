// Host-side tests for constants and their relationships.

use rune_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn capture_constants_are_sane() {
    assert!(MIN_GESTURE_SAMPLES >= 2);
    assert!(START_DEBOUNCE_MS > 0);
    assert!(RUNE_SAMPLE_STEP > 0.0 && RUNE_SAMPLE_STEP < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn touch_is_never_stricter_than_desktop() {
    assert!(TOUCH_TOLERANCE_MULTIPLIER >= 1.0);
    assert!(TOUCH_COVERAGE_FLOOR <= COVERAGE_FLOOR);
    assert!(TOUCH_PICK_RADIUS_PX >= PICK_RADIUS_PX);
    assert!(TOUCH_PROXIMITY_MULTIPLIER >= 1.0);
    assert!(TOUCH_FALLBACK_SCALE_PX >= FALLBACK_SCALE_PX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scoring_weights_are_fractions() {
    assert!(COVERAGE_FLOOR > 0.0 && COVERAGE_FLOOR < 1.0);
    assert!(COVERAGE_PENALTY > 0.0 && COVERAGE_PENALTY < 1.0);
    // Tiers are ordered from best to worst
    assert!(TIER_EXCELLENT > TIER_GOOD && TIER_GOOD > TIER_FAIR && TIER_FAIR > 0.0);
    for t in [CAGE_THRESHOLD, TRAINING_THRESHOLD, BATTLE_THRESHOLD] {
        assert!(t > 0.0 && t <= 1.0);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn template_scale_clamp_brackets_one() {
    assert!(TEMPLATE_MIN_SCALE > 0.0);
    assert!(TEMPLATE_MIN_SCALE <= 1.0 && 1.0 <= TEMPLATE_MAX_SCALE);
    assert!(TEMPLATE_REFERENCE_DISTANCE > 0.0);
    assert!(TEMPLATE_BASE_SCALE_PX > 0.0);
    assert!(rune_half_extent().min_element() > 0.0);
    assert!(POPUP_SCALE_PX > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wave_ranges_are_ordered() {
    assert!(WAVE_SIZE > 0);
    assert!(SPAWN_RADIUS_MIN <= SPAWN_RADIUS_MAX);
    assert!(SERPENT_SPEED_MIN <= SERPENT_SPEED_MAX);
    // Serpents must spawn outside the goal radius
    assert!(SPAWN_RADIUS_MIN - SERPENT_GOAL.length() > SERPENT_GOAL_RADIUS);
    assert!(SERPENT_FLOAT_BASE - SERPENT_FLOAT_AMPLITUDE >= 0.0);
    assert!(TRAINING_SPELLS_REQUIRED > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn selection_weights_favor_screen_center() {
    assert!(CENTER_WEIGHT > PROXIMITY_WEIGHT);
    assert!(PROXIMITY_WEIGHT > FACING_WEIGHT);
    assert!(MAX_VIEW_ANGLE_RAD > 0.0 && MAX_VIEW_ANGLE_RAD < std::f32::consts::FRAC_PI_2);
}
