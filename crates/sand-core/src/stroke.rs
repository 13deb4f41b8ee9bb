//! Groove compositing: several offset, shaded line passes plus a spray of
//! displaced grains at the end of each motion sample.

use crate::constants::*;
use crate::layer::{Layer, Paint};
use crate::raster;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;

/// "Clearing in progress" flag shared by the dissolve animation and the
/// stroke renderer. Single-threaded; callbacks never interleave.
#[derive(Clone, Debug, Default)]
pub struct ClearFlag(Rc<Cell<bool>>);

impl ClearFlag {
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    #[inline]
    pub(crate) fn set(&self, value: bool) {
        self.0.set(value);
    }
}

/// One line pass of the groove. Offset and width are logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroovePass {
    pub offset: Vec2,
    pub width: f32,
    pub paint: Paint,
}

impl GroovePass {
    const fn new(dx: f32, dy: f32, width: f32, paint: Paint) -> Self {
        Self {
            offset: Vec2::new(dx, dy),
            width,
            paint,
        }
    }
}

/// Back-to-front groove passes: light comes from the upper left, so shadows
/// fall down-right and highlights sit up-left of the trail.
pub const GROOVE_PASSES: [GroovePass; 5] = [
    GroovePass::new(4.0, 4.0, 26.0, Paint::new(95.0, 80.0, 65.0, 0.30)), // deep shadow
    GroovePass::new(2.0, 2.0, 22.0, Paint::new(110.0, 94.0, 78.0, 0.35)), // mid shadow
    GroovePass::new(0.0, 0.0, 20.0, Paint::new(139.0, 119.0, 101.0, 0.60)), // depression
    GroovePass::new(-1.0, -1.0, 8.0, Paint::new(180.0, 165.0, 145.0, 0.40)), // inner highlight
    GroovePass::new(-2.0, -3.0, 3.0, Paint::new(232.0, 218.0, 196.0, 0.65)), // top edge
];

#[derive(Clone, Debug)]
pub struct StrokeStyle {
    pub passes: Vec<GroovePass>,
    pub particle_spacing: f32,
    pub particle_ring: (f32, f32),
    pub particle_dot: (f32, f32),
    pub particle_rgb: [f32; 3],
    pub particle_jitter: [f32; 3],
    pub particle_alpha: (f32, f32),
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            passes: GROOVE_PASSES.to_vec(),
            particle_spacing: PARTICLE_SPACING,
            particle_ring: (PARTICLE_RING_MIN, PARTICLE_RING_MAX),
            particle_dot: (PARTICLE_DOT_MIN, PARTICLE_DOT_MAX),
            particle_rgb: PARTICLE_BASE_RGB,
            particle_jitter: PARTICLE_RGB_JITTER,
            particle_alpha: (PARTICLE_ALPHA_MIN, PARTICLE_ALPHA_MAX),
        }
    }
}

/// A displaced grain in logical coordinates; `dot` is the physical radius
/// before DPR scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub center: Vec2,
    pub dot: f32,
    pub paint: Paint,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrokeReport {
    pub drawn: bool,
    pub particles: usize,
}

#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

pub struct StrokeRenderer {
    style: StrokeStyle,
    clearing: ClearFlag,
}

impl StrokeRenderer {
    pub fn new(style: StrokeStyle, clearing: ClearFlag) -> Self {
        Self { style, clearing }
    }

    /// Particles spawned for a motion of `length` logical pixels.
    #[inline]
    pub fn particle_count(&self, length: f32) -> usize {
        if !(length.is_finite() && length > 0.0) || self.style.particle_spacing <= 0.0 {
            return 0;
        }
        (length / self.style.particle_spacing).floor() as usize
    }

    /// Scatter grains around `to`, one per `particle_spacing` px of motion.
    pub fn scatter_particles<R: Rng + ?Sized>(&self, from: Vec2, to: Vec2, rng: &mut R) -> SmallVec<[Particle; 16]> {
        let s = &self.style;
        let count = self.particle_count(from.distance(to));
        let mut out = SmallVec::with_capacity(count);
        for _ in 0..count {
            let angle = rng.gen::<f32>() * TAU;
            let radius = sample(rng, s.particle_ring);
            let center = to + Vec2::new(angle.cos(), angle.sin()) * radius;
            let dot = sample(rng, s.particle_dot);
            let mut rgb = s.particle_rgb;
            for (c, j) in rgb.iter_mut().zip(s.particle_jitter) {
                *c += rng.gen::<f32>() * j;
            }
            let alpha = sample(rng, s.particle_alpha);
            out.push(Particle {
                center,
                dot,
                paint: Paint { rgb, alpha },
            });
        }
        out
    }

    /// Composite one motion sample onto `layer`. Points are logical pixels;
    /// nothing is written while a dissolve owns the layer.
    pub fn render_segment<R: Rng + ?Sized>(
        &self,
        layer: &mut Layer,
        dpr: f32,
        from: Vec2,
        to: Vec2,
        rng: &mut R,
    ) -> StrokeReport {
        if self.clearing.is_set() {
            log::debug!("[stroke] dropped while clearing");
            return StrokeReport::default();
        }
        for pass in &self.style.passes {
            raster::stroke_segment(
                layer,
                (from + pass.offset) * dpr,
                (to + pass.offset) * dpr,
                pass.width * dpr,
                &pass.paint,
            );
        }
        let particles = self.scatter_particles(from, to, rng);
        for p in &particles {
            raster::fill_disc(layer, p.center * dpr, p.dot * dpr, &p.paint);
        }
        StrokeReport {
            drawn: true,
            particles: particles.len(),
        }
    }
}
