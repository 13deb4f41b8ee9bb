//! Software rasterizer for the few primitives the groove needs: round-capped
//! thick lines, filled discs, and a faded/offset copy of a whole layer.
//!
//! Coverage is a one-pixel analytic ramp on the distance to the shape, sampled
//! at pixel centres. All coordinates here are physical pixels.

use crate::layer::{Layer, Paint, PixelRect, Rgba8};
use glam::Vec2;

#[inline]
fn edge_coverage(distance: f32, radius: f32) -> f32 {
    (radius + 0.5 - distance).clamp(0.0, 1.0)
}

/// Distance from `p` to the segment `a..b`. Degenerates to point distance
/// when `a == b`.
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Horizontal extent of the points on row `yc` that lie within `reach` of
/// the segment `a..b`, or `None` when the row misses the band entirely.
fn row_span(a: Vec2, b: Vec2, reach: f32, yc: f32) -> Option<(f32, f32)> {
    let dy = b.y - a.y;
    let (t0, t1) = if dy.abs() <= f32::EPSILON {
        if (yc - a.y).abs() > reach {
            return None;
        }
        (0.0, 1.0)
    } else {
        let ta = (yc - reach - a.y) / dy;
        let tb = (yc + reach - a.y) / dy;
        (ta.min(tb).max(0.0), ta.max(tb).min(1.0))
    };
    if t0 > t1 {
        return None;
    }
    let x0 = a.x + (b.x - a.x) * t0;
    let x1 = a.x + (b.x - a.x) * t1;
    Some((x0.min(x1) - reach, x0.max(x1) + reach))
}

/// Stroke `a..b` with round caps, composited once per pixel so the pass
/// never doubles its own opacity.
pub fn stroke_segment(layer: &mut Layer, a: Vec2, b: Vec2, width: f32, paint: &Paint) -> Option<PixelRect> {
    let half = width * 0.5;
    if half <= 0.0 || paint.alpha <= 0.0 {
        return None;
    }
    let pad = half + 1.0;
    let min = a.min(b) - Vec2::splat(pad);
    let max = a.max(b) + Vec2::splat(pad);
    let rect = PixelRect::clip_bounds(min.to_array(), max.to_array(), layer.width(), layer.height())?;
    let reach = half + 0.5;
    for y in rect.y..rect.bottom() {
        let Some((lo, hi)) = row_span(a, b, reach, y as f32 + 0.5) else {
            continue;
        };
        let xs = (lo - 0.5).floor().max(rect.x as f32) as u32;
        let xe = ((hi - 0.5).ceil() + 1.0).min(rect.right() as f32);
        if xe <= xs as f32 {
            continue;
        }
        for x in xs..xe as u32 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let cov = edge_coverage(distance_to_segment(p, a, b), half);
            if cov > 0.0 {
                layer.blend(x, y, paint, cov);
            }
        }
    }
    layer.mark_dirty(rect);
    Some(rect)
}

pub fn fill_disc(layer: &mut Layer, center: Vec2, radius: f32, paint: &Paint) -> Option<PixelRect> {
    if radius <= 0.0 || paint.alpha <= 0.0 {
        return None;
    }
    let pad = Vec2::splat(radius + 1.0);
    let rect = PixelRect::clip_bounds(
        (center - pad).to_array(),
        (center + pad).to_array(),
        layer.width(),
        layer.height(),
    )?;
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let cov = edge_coverage(p.distance(center), radius);
            if cov > 0.0 {
                layer.blend(x, y, paint, cov);
            }
        }
    }
    layer.mark_dirty(rect);
    Some(rect)
}

/// Overwrite `dst` with `src` shifted by `(dx, dy)` and its alpha scaled by
/// `opacity`. Pixels shifted in from outside `src` are transparent.
pub fn blit_faded(dst: &mut Layer, src: &Layer, dx: i32, dy: i32, opacity: f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    let width = dst.width().min(src.width()) as i64;
    let height = dst.height().min(src.height()) as i64;
    let dst_w = dst.width() as usize;
    let src_w = src.width() as usize;
    let src_px = src.pixels();
    let out = dst.pixels_mut();
    out.fill(Rgba8::TRANSPARENT);
    if opacity <= 0.0 {
        return;
    }
    for y in 0..height {
        let sy = y - dy as i64;
        if sy < 0 || sy >= height {
            continue;
        }
        for x in 0..width {
            let sx = x - dx as i64;
            if sx < 0 || sx >= width {
                continue;
            }
            let s = src_px[sy as usize * src_w + sx as usize];
            if s.a == 0 {
                continue;
            }
            out[y as usize * dst_w + x as usize] = Rgba8 {
                a: (s.a as f32 * opacity).round() as u8,
                ..s
            };
        }
    }
}
