use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticPattern {
    LightTap,
    MediumTap,
    HeavyTap,
    SandScratch,
}

impl HapticPattern {
    /// Alternating vibrate/pause durations in milliseconds.
    pub fn durations_ms(self) -> &'static [u32] {
        match self {
            Self::LightTap => &[HAPTIC_LIGHT_MS],
            Self::MediumTap => &[HAPTIC_MEDIUM_MS],
            Self::HeavyTap => &[HAPTIC_HEAVY_MS],
            Self::SandScratch => &HAPTIC_SCRATCH_PATTERN_MS,
        }
    }

    pub fn total_ms(self) -> u32 {
        self.durations_ms().iter().sum()
    }
}

pub trait HapticSink {
    fn pulse(&mut self, pattern: HapticPattern);
}

/// Sink for platforms without a vibration motor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn pulse(&mut self, _pattern: HapticPattern) {}
}

/// Rate limiter for the per-move scratch pulse so a new pattern never cuts
/// the previous one short.
#[derive(Clone, Debug)]
pub struct PulseThrottle {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl Default for PulseThrottle {
    fn default() -> Self {
        Self::new(HAPTIC_SCRATCH_INTERVAL_MS)
    }
}

impl PulseThrottle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_ms: None,
        }
    }

    /// Returns true (and records `now_ms`) when a pulse may fire.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            // Timestamps going backwards (new time origin) also re-arm.
            Some(last) if now_ms >= last && now_ms - last < self.interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
