#![cfg(target_arch = "wasm32")]
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sand_core::{SandConfig, SandTable};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod haptics;
mod render;

use audio::WebAudio;
use haptics::Vibration;

/// The drawing table as wired into the page.
pub type WebTable = SandTable<WebAudio, Vibration, StdRng>;

fn wire_window_resize(table: &Rc<RefCell<WebTable>>) {
    let Some(window) = web::window() else {
        return;
    };
    let table_resize = table.clone();
    let window_resize = window.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let viewport = dom::viewport(&window_resize);
        match table_resize.borrow_mut().resize(viewport) {
            Ok(true) => log::debug!("[resize] {:?}", viewport),
            Ok(false) => {}
            Err(e) => log::warn!("[resize] ignored: {}", e),
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    resize_closure.forget();
}

fn wire_pagehide(table: &Rc<RefCell<WebTable>>) {
    let Some(window) = web::window() else {
        return;
    };
    let table_hide = table.clone();
    let closure = Closure::wrap(Box::new(move || {
        table_hide.borrow_mut().shutdown();
        log::info!("[page] hidden; audio released");
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wind_button(document: &web::Document, table: &Rc<RefCell<WebTable>>) {
    let table_wind = table.clone();
    dom::add_click_listener(document, constants::WIND_BUTTON_ID, move || {
        if table_wind.borrow_mut().blow_wind() {
            log::info!("[wind] clearing drawing");
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sand-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let texture = render::LayerCanvas::new(
        "texture",
        dom::canvas_by_id(&document, constants::TEXTURE_CANVAS_ID)?,
    )?;
    let drawing = render::LayerCanvas::new(
        "drawing",
        dom::canvas_by_id(&document, constants::DRAWING_CANVAS_ID)?,
    )?;

    let viewport = dom::viewport(&window);
    let table = SandTable::new(
        viewport,
        SandConfig::default(),
        WebAudio::default(),
        Vibration::detect(),
        StdRng::from_entropy(),
    )?;
    let (w_px, h_px) = viewport.physical_size();
    log::info!(
        "[init] surface {}x{} px (dpr {:.2})",
        w_px,
        h_px,
        viewport.dpr
    );
    let table = Rc::new(RefCell::new(table));

    wire_window_resize(&table);
    wire_pagehide(&table);
    wire_wind_button(&document, &table);
    events::wire_global_keydown(table.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: drawing.canvas().clone(),
        table: table.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        table,
        texture,
        drawing,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
