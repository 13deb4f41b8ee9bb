// Tuning constants for texture, grooves, dissolve, sound and haptics.
// Distances are logical (CSS) pixels unless the name says otherwise.

// Sand texture
pub const SAND_BASE_RGB: [u8; 3] = [215, 195, 165];
pub const SAND_VARIATION: f32 = 15.0; // shared +/- offset applied to all channels
pub const GRAIN_PROBABILITY: f32 = 0.03;
pub const GRAIN_MAX_DARKEN: f32 = 20.0;

// Displaced sand particles
pub const PARTICLE_SPACING: f32 = 4.0; // one particle per this many px of motion
pub const PARTICLE_RING_MIN: f32 = 14.0;
pub const PARTICLE_RING_MAX: f32 = 26.0;
pub const PARTICLE_DOT_MIN: f32 = 1.0; // scaled by device pixel ratio
pub const PARTICLE_DOT_MAX: f32 = 2.5;
pub const PARTICLE_BASE_RGB: [f32; 3] = [160.0, 145.0, 120.0];
pub const PARTICLE_RGB_JITTER: [f32; 3] = [30.0, 25.0, 20.0];
pub const PARTICLE_ALPHA_MIN: f32 = 0.35;
pub const PARTICLE_ALPHA_MAX: f32 = 0.7;

// Dissolve animation
pub const CLEAR_TOTAL_FRAMES: u32 = 60;
pub const CLEAR_DRIFT_PX: f32 = 100.0; // physical px at the end of the ease

// Scratch loop: noise -> lowpass -> gain
pub const SCRATCH_LOOP_SEC: f32 = 0.5;
pub const SCRATCH_NOISE_AMPLITUDE: f32 = 0.5;
pub const SCRATCH_LOWPASS_HZ: f32 = 800.0;
pub const SCRATCH_LOWPASS_Q: f32 = 1.0;
pub const SCRATCH_GAIN: f32 = 0.15;
pub const SCRATCH_ATTACK_SEC: f64 = 0.05;
pub const SCRATCH_RELEASE_SEC: f64 = 0.10;
pub const SCRATCH_TEARDOWN_SEC: f64 = 0.15; // must outlast the release ramp

// Wind burst: enveloped noise -> bandpass -> gain
pub const WIND_DURATION_SEC: f32 = 1.5;
pub const WIND_ENVELOPE_PEAK: f32 = 0.3;
pub const WIND_BANDPASS_HZ: f32 = 400.0;
pub const WIND_BANDPASS_Q: f32 = 0.5;
pub const WIND_GAIN: f32 = 0.2;

// Haptics (milliseconds)
pub const HAPTIC_LIGHT_MS: u32 = 5;
pub const HAPTIC_MEDIUM_MS: u32 = 15;
pub const HAPTIC_HEAVY_MS: u32 = 30;
pub const HAPTIC_SCRATCH_PATTERN_MS: [u32; 5] = [5, 10, 5, 10, 5];
pub const HAPTIC_SCRATCH_INTERVAL_MS: f64 = 35.0;

// Frame budget used for slow-frame diagnostics
pub const FRAME_BUDGET_MS: f64 = 16.0;
