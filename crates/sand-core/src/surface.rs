//! The two stacked raster layers and the viewport they are sized from.

use crate::error::SandResult;
use crate::layer::Layer;
use crate::texture::TextureSynthesizer;
use glam::Vec2;
use rand::Rng;

/// Logical viewport size in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr,
        }
    }

    /// Backing-store size: logical size times DPR, truncated like a canvas
    /// `width` attribute, never below one pixel.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width * self.dpr) as u32;
        let h = (self.height * self.dpr) as u32;
        (w.max(1), h.max(1))
    }

    #[inline]
    pub fn to_physical(&self, p: Vec2) -> Vec2 {
        p * self.dpr
    }
}

pub struct Surface {
    viewport: Viewport,
    pub texture: Layer,
    pub drawing: Layer,
}

impl Surface {
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, synth: &TextureSynthesizer, rng: &mut R) -> SandResult<Self> {
        let (w, h) = viewport.physical_size();
        let texture = synth.generate(w, h, rng)?;
        let drawing = Layer::new(w, h)?;
        log::info!(
            "[surface] created {}x{} (logical {:.0}x{:.0} @{:.2})",
            w,
            h,
            viewport.width,
            viewport.height,
            viewport.dpr
        );
        Ok(Self {
            viewport,
            texture,
            drawing,
        })
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Apply a new viewport. Both layers are reallocated together, the
    /// texture is re-randomised and the drawing is discarded. Returns false
    /// (and touches nothing) when the viewport is unchanged.
    pub fn resize<R: Rng + ?Sized>(
        &mut self,
        viewport: Viewport,
        synth: &TextureSynthesizer,
        rng: &mut R,
    ) -> SandResult<bool> {
        if viewport == self.viewport {
            return Ok(false);
        }
        let (w, h) = viewport.physical_size();
        self.texture.resize(w, h)?;
        self.drawing.resize(w, h)?;
        synth.fill(&mut self.texture, rng);
        self.viewport = viewport;
        log::info!("[surface] resized to {}x{}", w, h);
        Ok(true)
    }
}
