use crate::constants::{GRAIN_MAX_DARKEN, GRAIN_PROBABILITY, SAND_BASE_RGB, SAND_VARIATION};
use crate::error::SandResult;
use crate::layer::{Layer, Rgba8};
use rand::Rng;

/// Per-pixel sand background: a base tan with a shared random offset per
/// pixel, plus sparse darker grains.
#[derive(Clone, Debug)]
pub struct TextureSynthesizer {
    pub base_rgb: [u8; 3],
    pub variation: f32,
    pub grain_probability: f32,
    pub grain_max_darken: f32,
}

impl Default for TextureSynthesizer {
    fn default() -> Self {
        Self {
            base_rgb: SAND_BASE_RGB,
            variation: SAND_VARIATION,
            grain_probability: GRAIN_PROBABILITY,
            grain_max_darken: GRAIN_MAX_DARKEN,
        }
    }
}

impl TextureSynthesizer {
    pub fn generate<R: Rng + ?Sized>(&self, width: u32, height: u32, rng: &mut R) -> SandResult<Layer> {
        let mut layer = Layer::new(width, height)?;
        self.fill(&mut layer, rng);
        Ok(layer)
    }

    /// Overwrite every pixel of `layer` with freshly randomised sand.
    pub fn fill<R: Rng + ?Sized>(&self, layer: &mut Layer, rng: &mut R) {
        let base = self.base_rgb.map(f32::from);
        for px in layer.pixels_mut() {
            let offset = if self.variation > 0.0 {
                rng.gen_range(-self.variation..self.variation)
            } else {
                0.0
            };
            let mut rgb = base.map(|c| c + offset);
            if rng.gen::<f32>() < self.grain_probability {
                let darken = rng.gen::<f32>() * self.grain_max_darken;
                rgb = rgb.map(|c| c - darken);
            }
            let [r, g, b] = rgb.map(|c| c.round().clamp(0.0, 255.0) as u8);
            *px = Rgba8::opaque(r, g, b);
        }
    }

    /// Inclusive per-channel range every generated pixel falls in.
    pub fn channel_range(&self, channel: usize) -> (u8, u8) {
        let base = f32::from(self.base_rgb[channel]);
        let lo = (base - self.variation - self.grain_max_darken).round().clamp(0.0, 255.0);
        let hi = (base + self.variation).round().clamp(0.0, 255.0);
        (lo as u8, hi as u8)
    }
}
