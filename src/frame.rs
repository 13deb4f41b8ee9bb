use crate::render::LayerCanvas;
use crate::WebTable;
use instant::Instant;
use sand_core::constants::FRAME_BUDGET_MS;
use sand_core::ClearStep;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub table: Rc<RefCell<WebTable>>,
    pub texture: LayerCanvas,
    pub drawing: LayerCanvas,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let mut table = self.table.borrow_mut();
        let step = table.frame();
        if step == ClearStep::Finished {
            log::debug!("[frame] drawing layer clear");
        }

        let viewport = table.surface().viewport();
        let surface = table.surface_mut();
        if self.texture.sync_size(&viewport) {
            let full = surface.texture.bounds();
            surface.texture.mark_dirty(full);
        }
        if self.drawing.sync_size(&viewport) {
            let full = surface.drawing.bounds();
            surface.drawing.mark_dirty(full);
        }
        self.texture.present(&mut surface.texture);
        self.drawing.present(&mut surface.drawing);
        drop(table);

        let work_ms = now.elapsed().as_secs_f64() * 1000.0;
        if work_ms > FRAME_BUDGET_MS {
            log::warn!(
                "[frame] {:.1} ms of work (dt {:.1} ms) over budget",
                work_ms,
                dt.as_secs_f64() * 1000.0
            );
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
