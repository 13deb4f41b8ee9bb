use crate::WebTable;
use sand_core::{key_action, KeyAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, table: &Rc<RefCell<WebTable>>) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    let mut table = table.borrow_mut();
    match action {
        KeyAction::BlowWind => {
            if table.blow_wind() {
                log::info!("[keys] wind");
            }
        }
        KeyAction::Clear => {
            if table.request_clear() {
                log::info!("[keys] clear");
            }
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(table: Rc<RefCell<WebTable>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &table);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
