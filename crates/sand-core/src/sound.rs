//! Ambient scratch loop and one-shot wind burst.
//!
//! The engine owns the session state machine and synthesises the sample
//! buffers; an `AudioBackend` owns the actual node graph (WebAudio in the
//! browser, a recorder in tests). Every gain change is a ramp, never a jump.

use crate::constants::*;
use crate::error::SandResult;
use crate::noise;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    LowPass,
    BandPass,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub frequency_hz: f32,
    pub q: f32,
}

/// Everything a backend needs to build `source -> filter -> gain -> out`.
#[derive(Clone, Debug)]
pub struct Patch {
    pub samples: Vec<f32>,
    pub looping: bool,
    pub filter: FilterSpec,
    pub gain: f32,
    /// Absolute audio-clock time at which the source stops by itself.
    pub stop_at: Option<f64>,
}

pub trait AudioBackend {
    type Voice;

    /// Create the context on first use and resume it if suspended.
    fn wake(&mut self) -> SandResult<()>;
    fn sample_rate(&self) -> f32;
    /// Audio clock in seconds.
    fn current_time(&self) -> f64;
    fn start_voice(&mut self, patch: Patch) -> SandResult<Self::Voice>;
    /// Linear ramp from the current gain to `target`, ending at `end_time`.
    fn ramp_gain(&mut self, voice: &Self::Voice, target: f32, end_time: f64);
    /// Stop and disconnect. May fail if the node already stopped.
    fn stop_voice(&mut self, voice: Self::Voice) -> SandResult<()>;
}

#[derive(Clone, Debug)]
pub struct ScratchParams {
    pub loop_sec: f32,
    pub amplitude: f32,
    pub filter: FilterSpec,
    pub gain: f32,
    pub attack_sec: f64,
    pub release_sec: f64,
    pub teardown_sec: f64,
}

#[derive(Clone, Debug)]
pub struct WindParams {
    pub duration_sec: f32,
    pub envelope_peak: f32,
    pub filter: FilterSpec,
    pub gain: f32,
}

#[derive(Clone, Debug)]
pub struct SoundParams {
    pub scratch: ScratchParams,
    pub wind: WindParams,
}

impl Default for SoundParams {
    fn default() -> Self {
        Self {
            scratch: ScratchParams {
                loop_sec: SCRATCH_LOOP_SEC,
                amplitude: SCRATCH_NOISE_AMPLITUDE,
                filter: FilterSpec {
                    kind: FilterKind::LowPass,
                    frequency_hz: SCRATCH_LOWPASS_HZ,
                    q: SCRATCH_LOWPASS_Q,
                },
                gain: SCRATCH_GAIN,
                attack_sec: SCRATCH_ATTACK_SEC,
                release_sec: SCRATCH_RELEASE_SEC,
                teardown_sec: SCRATCH_TEARDOWN_SEC,
            },
            wind: WindParams {
                duration_sec: WIND_DURATION_SEC,
                envelope_peak: WIND_ENVELOPE_PEAK,
                filter: FilterSpec {
                    kind: FilterKind::BandPass,
                    frequency_hz: WIND_BANDPASS_HZ,
                    q: WIND_BANDPASS_Q,
                },
                gain: WIND_GAIN,
            },
        }
    }
}

/// A scratch voice fading out, torn down once the audio clock passes
/// `release_at`.
struct Fading<V> {
    voice: V,
    release_at: f64,
}

pub struct AmbientSoundEngine<A: AudioBackend> {
    backend: A,
    params: SoundParams,
    playing: Option<A::Voice>,
    fading: SmallVec<[Fading<A::Voice>; 2]>,
    warned_unavailable: bool,
}

impl<A: AudioBackend> AmbientSoundEngine<A> {
    pub fn new(backend: A, params: SoundParams) -> Self {
        Self {
            backend,
            params,
            playing: None,
            fading: SmallVec::new(),
            warned_unavailable: false,
        }
    }

    #[inline]
    pub fn backend(&self) -> &A {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut A {
        &mut self.backend
    }

    /// True while the scratch loop is audible (fading out does not count).
    #[inline]
    pub fn is_scratching(&self) -> bool {
        self.playing.is_some()
    }

    /// True while any scratch voice is alive, including release tails.
    #[inline]
    pub fn has_scratch_voice(&self) -> bool {
        self.playing.is_some() || !self.fading.is_empty()
    }

    /// Voices still ramping down.
    #[inline]
    pub fn fading_voices(&self) -> usize {
        self.fading.len()
    }

    fn wake(&mut self) -> bool {
        match self.backend.wake() {
            Ok(()) => true,
            Err(e) => {
                if !self.warned_unavailable {
                    log::warn!("[sound] disabled: {}", e);
                    self.warned_unavailable = true;
                }
                false
            }
        }
    }

    fn release_now(&mut self, voice: A::Voice) {
        if let Err(e) = self.backend.stop_voice(voice) {
            log::debug!("[sound] stop ignored: {}", e);
        }
    }

    /// Begin the looping scratch bed. No-op while already playing. A voice
    /// still fading from the previous press keeps its own ramp and is torn
    /// down later by `tick`.
    pub fn start_scratch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_scratching() || !self.wake() {
            return false;
        }
        let p = &self.params.scratch;
        let len = noise::buffer_len(self.backend.sample_rate(), p.loop_sec);
        let patch = Patch {
            samples: noise::scratch_noise(len, p.amplitude, rng),
            looping: true,
            filter: p.filter,
            gain: 0.0,
            stop_at: None,
        };
        let (target, attack) = (p.gain, p.attack_sec);
        match self.backend.start_voice(patch) {
            Ok(voice) => {
                let now = self.backend.current_time();
                self.backend.ramp_gain(&voice, target, now + attack);
                self.playing = Some(voice);
                log::debug!("[sound] scratch started ({} fading)", self.fading.len());
                true
            }
            Err(e) => {
                log::warn!("[sound] scratch failed: {}", e);
                false
            }
        }
    }

    /// Fade the scratch bed out; the voice is released by `tick` once the
    /// ramp has finished. No-op when not playing.
    pub fn stop_scratch(&mut self) -> bool {
        let Some(voice) = self.playing.take() else {
            return false;
        };
        let now = self.backend.current_time();
        let p = &self.params.scratch;
        let (release, teardown) = (p.release_sec, p.teardown_sec);
        self.backend.ramp_gain(&voice, 0.0, now + release);
        self.fading.push(Fading {
            voice,
            release_at: now + teardown,
        });
        log::debug!("[sound] scratch stopping");
        true
    }

    /// Release faded-out voices whose teardown deadline has passed.
    pub fn tick(&mut self) {
        if self.fading.is_empty() {
            return;
        }
        let now = self.backend.current_time();
        let mut i = 0;
        while i < self.fading.len() {
            if now >= self.fading[i].release_at {
                let done = self.fading.remove(i);
                self.release_now(done.voice);
            } else {
                i += 1;
            }
        }
    }

    /// Fire-and-forget wind swell. Leaves the scratch session alone.
    pub fn play_wind<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.wake() {
            return false;
        }
        let p = &self.params.wind;
        let len = noise::buffer_len(self.backend.sample_rate(), p.duration_sec);
        let now = self.backend.current_time();
        let patch = Patch {
            samples: noise::swell_noise(len, p.envelope_peak, rng),
            looping: false,
            filter: p.filter,
            gain: p.gain,
            stop_at: Some(now + p.duration_sec as f64),
        };
        match self.backend.start_voice(patch) {
            Ok(_one_shot) => true,
            Err(e) => {
                log::warn!("[sound] wind failed: {}", e);
                false
            }
        }
    }

    /// Release every live scratch voice immediately.
    pub fn shutdown(&mut self) {
        if let Some(voice) = self.playing.take() {
            self.release_now(voice);
        }
        for done in std::mem::take(&mut self.fading) {
            self.release_now(done.voice);
        }
    }
}
