use sand_core::{Layer, Viewport};
use wasm_bindgen::Clamped;
use web_sys as web;

use crate::dom;

/// A canvas that mirrors one core layer. Only the layer's dirty rectangle is
/// uploaded each frame.
pub struct LayerCanvas {
    label: &'static str,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl LayerCanvas {
    pub fn new(label: &'static str, canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = dom::context_2d(&canvas)?;
        Ok(Self { label, canvas, ctx })
    }

    #[inline]
    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    /// Returns true when the backing store was resized (and therefore wiped).
    pub fn sync_size(&self, viewport: &Viewport) -> bool {
        dom::sync_canvas_size(&self.canvas, viewport)
    }

    /// Push the layer's pending changes to the canvas.
    pub fn present(&self, layer: &mut Layer) {
        if self.canvas.width() != layer.width() || self.canvas.height() != layer.height() {
            self.canvas.set_width(layer.width());
            self.canvas.set_height(layer.height());
            layer.mark_dirty(layer.bounds());
        }
        let Some(rect) = layer.take_dirty() else {
            return;
        };
        let bytes = layer.region_bytes(rect);
        if bytes.is_empty() {
            return;
        }
        let image = match web::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(bytes.as_slice()),
            rect.width,
            rect.height,
        ) {
            Ok(img) => img,
            Err(e) => {
                log::error!("[render] {} ImageData error: {:?}", self.label, e);
                return;
            }
        };
        if let Err(e) = self.ctx.put_image_data(&image, rect.x as f64, rect.y as f64) {
            log::error!("[render] {} putImageData error: {:?}", self.label, e);
        }
    }
}
