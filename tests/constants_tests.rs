// Host-side checks on the tuning constants and how they relate.

use sand_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn texture_constants_stay_inside_a_byte() {
    for c in SAND_BASE_RGB {
        let c = c as f32;
        assert!(c - SAND_VARIATION - GRAIN_MAX_DARKEN >= 0.0);
        assert!(c + SAND_VARIATION <= 255.0);
    }
    assert!((0.0..=1.0).contains(&GRAIN_PROBABILITY));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn particle_ranges_are_ordered() {
    assert!(PARTICLE_SPACING > 0.0);
    assert!(PARTICLE_RING_MIN < PARTICLE_RING_MAX);
    assert!(PARTICLE_DOT_MIN < PARTICLE_DOT_MAX);
    assert!(PARTICLE_ALPHA_MIN < PARTICLE_ALPHA_MAX && PARTICLE_ALPHA_MAX <= 1.0);
    for (base, jitter) in PARTICLE_BASE_RGB.iter().zip(PARTICLE_RGB_JITTER) {
        assert!(base + jitter <= 255.0);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scratch_teardown_outlasts_the_release_ramp() {
    assert!(SCRATCH_TEARDOWN_SEC > SCRATCH_RELEASE_SEC);
    assert!(SCRATCH_ATTACK_SEC > 0.0);
    assert!(SCRATCH_GAIN > 0.0 && SCRATCH_GAIN < 1.0);
    assert!(WIND_GAIN > 0.0 && WIND_GAIN < 1.0);
    assert!(WIND_ENVELOPE_PEAK <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scratch_pulse_interval_covers_the_pattern() {
    let pattern: u32 = HAPTIC_SCRATCH_PATTERN_MS.iter().sum();
    assert!(HAPTIC_SCRATCH_INTERVAL_MS >= pattern as f64);
    assert!(HAPTIC_LIGHT_MS < HAPTIC_MEDIUM_MS && HAPTIC_MEDIUM_MS < HAPTIC_HEAVY_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn dissolve_runs_about_a_second() {
    assert_eq!(CLEAR_TOTAL_FRAMES, 60);
    assert!(CLEAR_DRIFT_PX > 0.0);
    assert!(FRAME_BUDGET_MS > 0.0);
}
