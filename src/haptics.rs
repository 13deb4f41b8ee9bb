use sand_core::{HapticPattern, HapticSink};
use wasm_bindgen::JsValue;
use web_sys as web;

/// `navigator.vibrate`, when the browser has it. Desktop browsers and iOS
/// Safari do not, in which case every pulse is dropped.
pub struct Vibration {
    navigator: Option<web::Navigator>,
}

impl Vibration {
    pub fn detect() -> Self {
        let navigator = web::window()
            .map(|w| w.navigator())
            .filter(|n| js_sys::Reflect::has(n, &JsValue::from_str("vibrate")).unwrap_or(false));
        if navigator.is_none() {
            log::info!("[haptics] vibrate unsupported; haptics disabled");
        }
        Self { navigator }
    }
}

impl HapticSink for Vibration {
    fn pulse(&mut self, pattern: HapticPattern) {
        let Some(nav) = &self.navigator else {
            return;
        };
        match pattern.durations_ms() {
            [single] => {
                nav.vibrate_with_duration(*single);
            }
            steps => {
                let arr: js_sys::Array = steps.iter().map(|ms| JsValue::from(*ms)).collect();
                nav.vibrate_with_pattern(&arr);
            }
        }
    }
}
