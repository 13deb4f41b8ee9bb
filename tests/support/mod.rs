// Shared fakes for the host-side tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use sand_core::{
    AudioBackend, HapticPattern, HapticSink, Patch, PointerSample, SandConfig, SandError,
    SandResult, SandTable, Viewport,
};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[derive(Clone, Debug)]
pub struct StartedVoice {
    pub id: u32,
    pub patch: Patch,
    pub started_at: f64,
}

/// Audio backend that records every call instead of producing sound.
#[derive(Debug, Default)]
pub struct FakeAudio {
    pub unavailable: bool,
    pub time: f64,
    pub wakes: u32,
    pub started: Vec<StartedVoice>,
    pub live: Vec<u32>,
    pub ramps: Vec<(u32, f32, f64)>,
    pub stopped: Vec<u32>,
    pub stopped_at: Vec<(u32, f64)>,
    next_id: u32,
}

impl FakeAudio {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }

    /// End time of the last gain ramp scheduled on `voice`.
    pub fn last_ramp_end(&self, voice: u32) -> Option<f64> {
        self.ramps
            .iter()
            .rev()
            .find(|(id, _, _)| *id == voice)
            .map(|(_, _, end)| *end)
    }

    pub fn looping_live(&self) -> usize {
        self.live
            .iter()
            .filter(|id| self.started.iter().any(|s| s.id == **id && s.patch.looping))
            .count()
    }
}

impl AudioBackend for FakeAudio {
    type Voice = u32;

    fn wake(&mut self) -> SandResult<()> {
        if self.unavailable {
            return Err(SandError::AudioUnavailable("fake".into()));
        }
        self.wakes += 1;
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        8_000.0
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn start_voice(&mut self, patch: Patch) -> SandResult<u32> {
        self.next_id += 1;
        let id = self.next_id;
        // One-shots stop themselves, so only loops count as live.
        if patch.looping {
            self.live.push(id);
        }
        self.started.push(StartedVoice {
            id,
            patch,
            started_at: self.time,
        });
        Ok(id)
    }

    fn ramp_gain(&mut self, voice: &u32, target: f32, end_time: f64) {
        self.ramps.push((*voice, target, end_time));
    }

    fn stop_voice(&mut self, voice: u32) -> SandResult<()> {
        self.stopped.push(voice);
        self.stopped_at.push((voice, self.time));
        let before = self.live.len();
        self.live.retain(|id| *id != voice);
        if self.live.len() == before {
            return Err(SandError::AudioNode(format!("voice {} not playing", voice)));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pub pulses: Vec<HapticPattern>,
}

impl HapticSink for RecordingHaptics {
    fn pulse(&mut self, pattern: HapticPattern) {
        self.pulses.push(pattern);
    }
}

pub type TestTable = SandTable<FakeAudio, RecordingHaptics, StdRng>;

pub fn table(width: f32, height: f32, dpr: f32, config: SandConfig) -> TestTable {
    SandTable::new(
        Viewport::new(width, height, dpr),
        config,
        FakeAudio::default(),
        RecordingHaptics::default(),
        rng(7),
    )
    .expect("table")
}

pub fn sample(pointer_id: i32, x: f32, y: f32, time_ms: f64) -> PointerSample {
    PointerSample {
        pointer_id,
        client: glam::Vec2::new(x, y),
        origin: glam::Vec2::ZERO,
        time_ms,
    }
}
