use crate::constants::MOUSE_POINTER_ID;
use crate::WebTable;
use glam::Vec2;
use instant::Instant;
use sand_core::PointerSample;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub table: Rc<RefCell<WebTable>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointer(&w, "pointerdown", on_pointerdown);
    wire_pointer(&w, "pointermove", on_pointermove);
    wire_pointer(&w, "pointerup", on_pointerup);
    wire_pointer(&w, "pointercancel", on_pointercancel);
    wire_pointer(&w, "lostpointercapture", on_pointercancel);
}

#[inline]
fn pointer_sample(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> PointerSample {
    let rect = canvas.get_bounding_client_rect();
    let pointer_id = match ev.pointer_id() {
        0 => MOUSE_POINTER_ID,
        id => id,
    };
    PointerSample {
        pointer_id,
        client: Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        origin: Vec2::new(rect.left() as f32, rect.top() as f32),
        time_ms: ev.time_stamp(),
    }
}

fn wire_pointer(w: &InputWiring, event: &str, handler: fn(&InputWiring, &web::PointerEvent)) {
    let w_inner = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        handler(&w_inner, &ev);
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn on_pointerdown(w: &InputWiring, ev: &web::PointerEvent) {
    let sample = pointer_sample(ev, &w.canvas);
    if w.table.borrow_mut().pointer_down(sample) {
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        log::debug!("[pointer] gesture {} started", sample.pointer_id);
    }
    ev.prevent_default();
}

fn on_pointermove(w: &InputWiring, ev: &web::PointerEvent) {
    let sample = pointer_sample(ev, &w.canvas);
    let started = Instant::now();
    let report = w.table.borrow_mut().pointer_move(sample);
    if report.is_some() {
        ev.prevent_default();
        let ms = started.elapsed().as_secs_f64() * 1000.0;
        if ms > 8.0 {
            log::debug!("[pointer] segment took {:.1} ms", ms);
        }
    }
}

fn on_pointerup(w: &InputWiring, ev: &web::PointerEvent) {
    let sample = pointer_sample(ev, &w.canvas);
    if w.table.borrow_mut().pointer_up(sample.pointer_id) {
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        log::debug!("[pointer] gesture {} ended", sample.pointer_id);
    }
}

fn on_pointercancel(w: &InputWiring, ev: &web::PointerEvent) {
    let sample = pointer_sample(ev, &w.canvas);
    if w.table.borrow_mut().pointer_cancel(sample.pointer_id) {
        log::debug!("[pointer] gesture {} cancelled ({})", sample.pointer_id, ev.type_());
    }
}
