//! Wind dissolve: the drawing fades out while drifting sideways, then the
//! layer is wiped. Stepped once per host animation frame.

use crate::constants::{CLEAR_DRIFT_PX, CLEAR_TOTAL_FRAMES};
use crate::layer::Layer;
use crate::raster;
use crate::stroke::ClearFlag;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    OutQuad,
    OutCubic,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// What `trigger` does when a dissolve is already running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetriggerPolicy {
    Ignore,
    Restart,
}

#[derive(Clone, Debug)]
pub struct ClearParams {
    pub total_frames: u32,
    pub drift_px: f32,
    pub easing: Easing,
    pub retrigger: RetriggerPolicy,
}

impl Default for ClearParams {
    fn default() -> Self {
        Self {
            total_frames: CLEAR_TOTAL_FRAMES,
            drift_px: CLEAR_DRIFT_PX,
            easing: Easing::OutCubic,
            retrigger: RetriggerPolicy::Ignore,
        }
    }
}

enum Phase {
    Idle,
    Animating { frame: u32, snapshot: Layer },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearStep {
    Idle,
    Animating { frame: u32, progress: f32 },
    Finished,
}

pub struct ClearAnimator {
    params: ClearParams,
    phase: Phase,
    flag: ClearFlag,
}

impl ClearAnimator {
    pub fn new(params: ClearParams, flag: ClearFlag) -> Self {
        let params = ClearParams {
            total_frames: params.total_frames.max(1),
            ..params
        };
        Self {
            params,
            phase: Phase::Idle,
            flag,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    #[inline]
    pub fn frame_index(&self) -> Option<u32> {
        match &self.phase {
            Phase::Animating { frame, .. } => Some(*frame),
            Phase::Idle => None,
        }
    }

    #[inline]
    pub fn total_frames(&self) -> u32 {
        self.params.total_frames
    }

    /// Start a dissolve of `layer`. Returns true when an animation was
    /// (re)started.
    pub fn trigger(&mut self, layer: &Layer) -> bool {
        if self.is_active() && self.params.retrigger == RetriggerPolicy::Ignore {
            log::debug!("[clear] already dissolving; trigger ignored");
            return false;
        }
        self.phase = Phase::Animating {
            frame: 0,
            snapshot: layer.clone(),
        };
        self.flag.set(true);
        log::info!("[clear] dissolve started ({} frames)", self.params.total_frames);
        true
    }

    /// Advance one frame, redrawing `layer` from the snapshot.
    pub fn step(&mut self, layer: &mut Layer) -> ClearStep {
        let Phase::Animating { frame, snapshot } = &mut self.phase else {
            return ClearStep::Idle;
        };
        *frame += 1;
        if *frame >= self.params.total_frames {
            layer.clear();
            self.phase = Phase::Idle;
            self.flag.set(false);
            log::info!("[clear] dissolve finished");
            return ClearStep::Finished;
        }
        let progress = *frame as f32 / self.params.total_frames as f32;
        let eased = self.params.easing.apply(progress);
        let dx = (eased * self.params.drift_px).round() as i32;
        raster::blit_faded(layer, snapshot, dx, 0, 1.0 - eased);
        ClearStep::Animating {
            frame: *frame,
            progress,
        }
    }

    /// Abort without touching the layer (geometry changed underneath us).
    pub fn reset(&mut self) {
        if self.is_active() {
            log::info!("[clear] dissolve aborted");
        }
        self.phase = Phase::Idle;
        self.flag.set(false);
    }
}
