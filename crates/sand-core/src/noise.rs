//! Sample buffers for the sand sounds. Mono, `f32` in [-1, 1].

use rand::Rng;
use std::f32::consts::PI;

/// Number of frames for `seconds` of audio, never zero.
#[inline]
pub fn buffer_len(sample_rate: f32, seconds: f32) -> usize {
    let n = (sample_rate.max(0.0) * seconds.max(0.0)) as usize;
    n.max(1)
}

/// Flat, low-amplitude uniform noise for the looping scratch bed.
pub fn scratch_noise<R: Rng + ?Sized>(len: usize, amplitude: f32, rng: &mut R) -> Vec<f32> {
    (0..len)
        .map(|_| (rng.gen::<f32>() * 2.0 - 1.0) * amplitude)
        .collect()
}

/// Half-sine swell from silence to `peak` and back, `t` in [0, 1].
#[inline]
pub fn swell_envelope(t: f32, peak: f32) -> f32 {
    (t.clamp(0.0, 1.0) * PI).sin() * peak
}

/// White noise shaped by `swell_envelope`; starts at exactly zero so the
/// one-shot never clicks in.
pub fn swell_noise<R: Rng + ?Sized>(len: usize, peak: f32, rng: &mut R) -> Vec<f32> {
    let n = len.max(1) as f32;
    (0..len)
        .map(|i| {
            let env = swell_envelope(i as f32 / n, peak);
            (rng.gen::<f32>() * 2.0 - 1.0) * env
        })
        .collect()
}
