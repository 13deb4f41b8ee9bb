//! `SandTable` owns one of each component and routes host events to them.
//!
//! The host (browser glue or a test) feeds pointer samples, resize
//! notifications, clear requests and one `frame()` per animation tick, then
//! presents `surface()` layers.

use crate::clear::{ClearAnimator, ClearParams, ClearStep};
use crate::constants::HAPTIC_SCRATCH_INTERVAL_MS;
use crate::error::SandResult;
use crate::haptics::{HapticPattern, HapticSink, PulseThrottle};
use crate::input::{local_point, InputRouter};
use crate::sound::{AmbientSoundEngine, AudioBackend, SoundParams};
use crate::stroke::{ClearFlag, StrokeRenderer, StrokeReport, StrokeStyle};
use crate::surface::{Surface, Viewport};
use crate::texture::TextureSynthesizer;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct SandConfig {
    pub texture: TextureSynthesizer,
    pub stroke: StrokeStyle,
    pub clear: ClearParams,
    pub sound: SoundParams,
    pub haptic_interval_ms: f64,
}

impl Default for SandConfig {
    fn default() -> Self {
        Self {
            texture: TextureSynthesizer::default(),
            stroke: StrokeStyle::default(),
            clear: ClearParams::default(),
            sound: SoundParams::default(),
            haptic_interval_ms: HAPTIC_SCRATCH_INTERVAL_MS,
        }
    }
}

/// One pointer event as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub pointer_id: i32,
    /// Client-space position in logical pixels.
    pub client: Vec2,
    /// Client-space origin of the surface's bounding box.
    pub origin: Vec2,
    pub time_ms: f64,
}

impl PointerSample {
    #[inline]
    pub fn local(&self) -> Vec2 {
        local_point(self.client, self.origin)
    }
}

pub struct SandTable<A: AudioBackend, H: HapticSink, R: Rng> {
    texture_synth: TextureSynthesizer,
    surface: Surface,
    strokes: StrokeRenderer,
    clear: ClearAnimator,
    sound: AmbientSoundEngine<A>,
    haptics: H,
    pulse: PulseThrottle,
    input: InputRouter,
    rng: R,
    clear_counter: u64,
}

impl<A: AudioBackend, H: HapticSink, R: Rng> SandTable<A, H, R> {
    pub fn new(viewport: Viewport, config: SandConfig, audio: A, haptics: H, mut rng: R) -> SandResult<Self> {
        let surface = Surface::new(viewport, &config.texture, &mut rng)?;
        let flag = ClearFlag::default();
        Ok(Self {
            texture_synth: config.texture,
            surface,
            strokes: StrokeRenderer::new(config.stroke, flag.clone()),
            clear: ClearAnimator::new(config.clear, flag),
            sound: AmbientSoundEngine::new(audio, config.sound),
            haptics,
            pulse: PulseThrottle::new(config.haptic_interval_ms),
            input: InputRouter::default(),
            rng,
            clear_counter: 0,
        })
    }

    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    #[inline]
    pub fn sound(&self) -> &AmbientSoundEngine<A> {
        &self.sound
    }

    #[inline]
    pub fn sound_mut(&mut self) -> &mut AmbientSoundEngine<A> {
        &mut self.sound
    }

    #[inline]
    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    #[inline]
    pub fn input(&self) -> &InputRouter {
        &self.input
    }

    #[inline]
    pub fn clear_animator(&self) -> &ClearAnimator {
        &self.clear
    }

    #[inline]
    pub fn strokes(&self) -> &StrokeRenderer {
        &self.strokes
    }

    #[inline]
    pub fn is_clearing(&self) -> bool {
        self.clear.is_active()
    }

    /// Viewport changed: regenerate the texture, discard the drawing and
    /// abort any dissolve. The gesture (if any) survives.
    pub fn resize(&mut self, viewport: Viewport) -> SandResult<bool> {
        let changed = self.surface.resize(viewport, &self.texture_synth, &mut self.rng)?;
        if changed {
            self.clear.reset();
        }
        Ok(changed)
    }

    pub fn pointer_down(&mut self, sample: PointerSample) -> bool {
        if !self.input.press(sample.pointer_id, sample.local(), self.clear.is_active()) {
            return false;
        }
        self.pulse.reset();
        self.sound.start_scratch(&mut self.rng);
        true
    }

    pub fn pointer_move(&mut self, sample: PointerSample) -> Option<StrokeReport> {
        let (from, to) = self.input.drag(sample.pointer_id, sample.local(), self.clear.is_active())?;
        let dpr = self.surface.viewport().dpr;
        let report = self
            .strokes
            .render_segment(&mut self.surface.drawing, dpr, from, to, &mut self.rng);
        if report.drawn && self.pulse.ready(sample.time_ms) {
            self.haptics.pulse(HapticPattern::SandScratch);
        }
        Some(report)
    }

    /// Press end. Stopping the scratch bed is idempotent.
    pub fn pointer_up(&mut self, pointer_id: i32) -> bool {
        let ended = self.input.release(pointer_id);
        if ended {
            self.sound.stop_scratch();
        }
        ended
    }

    pub fn pointer_cancel(&mut self, pointer_id: i32) -> bool {
        self.pointer_up(pointer_id)
    }

    /// Start the dissolve (the `onClear` entry point). Bumps the counter.
    pub fn request_clear(&mut self) -> bool {
        self.clear_counter += 1;
        self.clear.trigger(&self.surface.drawing)
    }

    /// Follow an externally owned, monotonically increasing clear counter.
    /// Zero and already-seen values do nothing.
    pub fn sync_clear_trigger(&mut self, counter: u64) -> bool {
        if counter == 0 || counter <= self.clear_counter {
            return false;
        }
        self.clear_counter = counter;
        self.clear.trigger(&self.surface.drawing)
    }

    #[inline]
    pub fn clear_counter(&self) -> u64 {
        self.clear_counter
    }

    /// Wind button: swell sound, heavy tap, then dissolve.
    pub fn blow_wind(&mut self) -> bool {
        self.sound.play_wind(&mut self.rng);
        self.haptics.pulse(HapticPattern::HeavyTap);
        self.request_clear()
    }

    /// One host animation frame.
    pub fn frame(&mut self) -> ClearStep {
        self.sound.tick();
        self.clear.step(&mut self.surface.drawing)
    }

    pub fn shutdown(&mut self) {
        self.input.reset();
        self.sound.shutdown();
    }
}
