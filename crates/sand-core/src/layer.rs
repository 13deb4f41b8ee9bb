//! RGBA raster layers that mirror an HTML canvas backing store.
//!
//! Pixels are straight (non-premultiplied) RGBA8 in the same byte order as
//! canvas `ImageData`, so the web front end can hand `as_bytes()` (or a dirty
//! region of it) to `putImageData` without conversion.

use crate::error::{SandError, SandResult};
use bytemuck::{Pod, Zeroable};
use std::hash::Hasher;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Fill colour with channels in 0..=255 and a separate 0..=1 opacity, the
/// way a canvas `rgba(...)` style string is expressed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub rgb: [f32; 3],
    pub alpha: f32,
}

impl Paint {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        Self {
            rgb: [r, g, b],
            alpha,
        }
    }
}

/// Axis-aligned pixel rectangle, half-open on the right and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn union(&self, other: &PixelRect) -> PixelRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        PixelRect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Clip a floating-point box (min inclusive, max exclusive) to a
    /// `width x height` raster. Returns `None` when nothing is left.
    pub fn clip_bounds(min: [f32; 2], max: [f32; 2], width: u32, height: u32) -> Option<PixelRect> {
        if !(min[0].is_finite() && min[1].is_finite() && max[0].is_finite() && max[1].is_finite())
        {
            return None;
        }
        let x0 = min[0].floor().max(0.0) as u32;
        let y0 = min[1].floor().max(0.0) as u32;
        let x1 = (max[0].ceil().max(0.0) as u32).min(width);
        let y1 = (max[1].ceil().max(0.0) as u32).min(height);
        (x1 > x0 && y1 > y0).then(|| PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Layer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
    dirty: Option<PixelRect>,
}

impl Layer {
    /// Create a fully transparent layer. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> SandResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|n| *n > 0)
            .ok_or(SandError::InvalidSize { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; len],
            dirty: Some(PixelRect {
                x: 0,
                y: 0,
                width,
                height,
            }),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> PixelRect {
        PixelRect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Mutable pixel access; marks the whole layer dirty.
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        self.mark_dirty(self.bounds());
        &mut self.pixels
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba8::TRANSPARENT);
        self.mark_dirty(self.bounds());
    }

    /// Reallocate to a new size. Content is discarded.
    pub fn resize(&mut self, width: u32, height: u32) -> SandResult<()> {
        *self = Layer::new(width, height)?;
        Ok(())
    }

    /// True when no pixel has any opacity left.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|p| p.a == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    /// FNV-1a digest of the pixel bytes. Used to prove a call left the
    /// layer untouched.
    pub fn checksum(&self) -> u64 {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(self.as_bytes());
        hasher.finish()
    }

    /// Source-over composite `paint` at `coverage` (0..=1) onto one pixel.
    #[inline]
    pub(crate) fn blend(&mut self, x: u32, y: u32, paint: &Paint, coverage: f32) {
        let src_a = (paint.alpha * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        let dst = self.pixels[idx];
        let dst_a = dst.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let dst_rgb = [dst.r as f32, dst.g as f32, dst.b as f32];
        let mut out = [0u8; 3];
        for i in 0..3 {
            let c = (paint.rgb[i] * src_a + dst_rgb[i] * dst_a * (1.0 - src_a)) / out_a;
            out[i] = c.round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[idx] = Rgba8 {
            r: out[0],
            g: out[1],
            b: out[2],
            a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        };
    }

    pub fn mark_dirty(&mut self, rect: PixelRect) {
        if rect.is_empty() {
            return;
        }
        self.dirty = Some(match self.dirty {
            Some(d) => d.union(&rect),
            None => rect,
        });
    }

    #[inline]
    pub fn dirty(&self) -> Option<PixelRect> {
        self.dirty
    }

    /// Hand the accumulated dirty rectangle to the presenter and reset it.
    pub fn take_dirty(&mut self) -> Option<PixelRect> {
        self.dirty.take()
    }

    /// Copy a rectangle's RGBA bytes out row by row, ready for an
    /// `ImageData` of the same size.
    pub fn region_bytes(&self, rect: PixelRect) -> Vec<u8> {
        let x1 = rect.right().min(self.width);
        let y1 = rect.bottom().min(self.height);
        if rect.x >= x1 || rect.y >= y1 {
            return Vec::new();
        }
        let row_w = (x1 - rect.x) as usize;
        let mut out = Vec::with_capacity(row_w * (y1 - rect.y) as usize * 4);
        for y in rect.y..y1 {
            let start = y as usize * self.width as usize + rect.x as usize;
            out.extend_from_slice(bytemuck::cast_slice(&self.pixels[start..start + row_w]));
        }
        out
    }
}
