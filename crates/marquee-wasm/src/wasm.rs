#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the CarouselRunner and PageRunner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] and
//! [`super::page_core::PageCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::page_core::PageCore;
use super::runner_core::RunnerCore;
use marquee_core::geometry::Rect;
use marquee_web::page::nav::NavInput;
use marquee_web::page::tilt::Tilt;
use marquee_web::{CaptureOp, StylePatch};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn patch_to_js(patch: &StylePatch) -> JsValue {
    let obj = Object::new();
    set_js(
        &obj,
        "item",
        JsValue::from_f64(patch.target.js_index() as f64),
    );
    set_js(&obj, "kind", JsValue::from_str(patch.kind.as_str()));
    set_js(&obj, "name", JsValue::from_str(patch.name));
    set_js(&obj, "value", JsValue::from_str(&patch.value));
    obj.into()
}

fn capture_to_js(op: CaptureOp) -> JsValue {
    let obj = Object::new();
    set_js(&obj, "op", JsValue::from_str(op.as_str()));
    set_js(&obj, "pointerId", JsValue::from_f64(f64::from(op.pointer_id())));
    obj.into()
}

fn captures_to_js(ops: Vec<CaptureOp>) -> Array {
    ops.into_iter().map(capture_to_js).collect()
}

fn tilt_to_js(tilt: Tilt) -> JsValue {
    let (x, y) = tilt.css();
    let obj = Object::new();
    set_js(&obj, "x", JsValue::from_str(&x));
    set_js(&obj, "y", JsValue::from_str(&y));
    obj.into()
}

fn json_error(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Carousel runner driven by the page's event listeners and one timer.
#[wasm_bindgen]
pub struct CarouselRunner {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl CarouselRunner {
    /// Mount over `itemCount` cards.
    ///
    /// `configJson` is an optional JSON object of config overrides. When the
    /// carousel cannot mount the runner stays inert; check `isMounted()`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        item_count: u32,
        reduced_motion: bool,
        config_json: Option<String>,
        now_ms: f64,
    ) -> Self {
        install_panic_hook();
        Self {
            inner: RunnerCore::new(item_count, reduced_motion, config_json.as_deref(), now_ms),
        }
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    #[wasm_bindgen(js_name = mountError)]
    pub fn mount_error(&self) -> Option<String> {
        self.inner.mount_error().map(str::to_owned)
    }

    /// Parse a JSON-encoded DOM event and route it.
    ///
    /// Returns `"consumed"` (call `preventDefault()`), `"handled"`,
    /// `"ignored"`, or `"rejected"`.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str, now_ms: f64) -> String {
        self.inner.push_encoded_input(json, now_ms).as_str().to_owned()
    }

    #[wasm_bindgen(js_name = captureAcquired)]
    pub fn capture_acquired(&mut self, pointer_id: u32) -> bool {
        self.inner.capture_acquired(pointer_id)
    }

    #[wasm_bindgen(js_name = captureLost)]
    pub fn capture_lost(&mut self, pointer_id: u32, x: f32, y: f32, now_ms: f64) -> bool {
        self.inner.capture_lost(pointer_id, x, y, now_ms)
    }

    pub fn next(&mut self, now_ms: f64) -> bool {
        self.inner.next(now_ms)
    }

    pub fn previous(&mut self, now_ms: f64) -> bool {
        self.inner.previous(now_ms)
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: f64, restart_autoplay: bool, now_ms: f64) -> bool {
        if !index.is_finite() {
            return false;
        }
        self.inner.go_to(index as i64, restart_autoplay, now_ms)
    }

    /// Fire due timers. Call from the single timer armed for `nextDeadlineMs()`.
    pub fn advance(&mut self, now_ms: f64) {
        self.inner.advance(now_ms);
    }

    /// Earliest pending timer in host milliseconds, or `undefined`.
    #[wasm_bindgen(js_name = nextDeadlineMs)]
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.inner.next_deadline_ms()
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> Option<u32> {
        self.inner
            .active_index()
            .and_then(|i| u32::try_from(i).ok())
    }

    /// Drain style writes as `[{item, kind, name, value}]` (`item` is `-1`
    /// for the carousel surface).
    #[wasm_bindgen(js_name = drainPatches)]
    pub fn drain_patches(&mut self) -> Array {
        self.inner
            .drain_patches()
            .iter()
            .map(patch_to_js)
            .collect()
    }

    /// Drain pointer-capture commands as `[{op, pointerId}]`.
    #[wasm_bindgen(js_name = drainCaptures)]
    pub fn drain_captures(&mut self) -> Array {
        captures_to_js(self.inner.drain_captures())
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.inner.snapshot_json()
    }

    /// Tear down; returns the final capture commands.
    pub fn destroy(&mut self) -> Array {
        captures_to_js(self.inner.destroy())
    }
}

/// Page helpers: nav menu, reveal-on-scroll, active section, tilt, hero.
///
/// The page keeps its own listeners and observers and forwards their
/// payloads; every method returns what to write back to the DOM.
#[wasm_bindgen]
pub struct PageRunner {
    inner: PageCore,
}

#[wasm_bindgen]
impl PageRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(
        reduced_motion: bool,
        reveal_count: u32,
        intersection_supported: bool,
        section_count: u32,
        tilt_cards: u32,
    ) -> Self {
        install_panic_hook();
        Self {
            inner: PageCore::new(
                reduced_motion,
                reveal_count,
                intersection_supported,
                section_count,
                tilt_cards,
            ),
        }
    }

    /// Each nav method returns whether the menu opened or closed.
    #[wasm_bindgen(js_name = navToggle)]
    pub fn nav_toggle(&mut self) -> bool {
        self.inner.nav_input(NavInput::ToggleClick)
    }

    #[wasm_bindgen(js_name = navLinkClick)]
    pub fn nav_link_click(&mut self, viewport_width: f32) -> bool {
        self.inner.nav_input(NavInput::LinkClick { viewport_width })
    }

    #[wasm_bindgen(js_name = navDocumentClick)]
    pub fn nav_document_click(&mut self, inside: bool) -> bool {
        self.inner.nav_input(NavInput::DocumentClick { inside })
    }

    #[wasm_bindgen(js_name = navKey)]
    pub fn nav_key(&mut self, key: &str) -> bool {
        self.inner.nav_key(key)
    }

    #[wasm_bindgen(js_name = navResize)]
    pub fn nav_resize(&mut self, viewport_width: f32) -> bool {
        self.inner.nav_input(NavInput::Resize { viewport_width })
    }

    #[wasm_bindgen(js_name = navOpen)]
    pub fn nav_open(&self) -> bool {
        self.inner.nav_open()
    }

    #[wasm_bindgen(js_name = navAriaExpanded)]
    pub fn nav_aria_expanded(&self) -> String {
        self.inner.nav_aria_expanded().to_owned()
    }

    #[wasm_bindgen(js_name = revealObserving)]
    pub fn reveal_observing(&self) -> bool {
        self.inner.reveal_observing()
    }

    /// `--reveal-delay` for the element at `index`.
    #[wasm_bindgen(js_name = revealDelay)]
    pub fn reveal_delay(index: u32) -> String {
        PageCore::reveal_delay_css(index)
    }

    #[wasm_bindgen(js_name = revealed)]
    pub fn revealed(&self, count: u32) -> Vec<u32> {
        self.inner.revealed(count)
    }

    /// Throws on a malformed batch.
    #[wasm_bindgen(js_name = observeReveal)]
    pub fn observe_reveal(&mut self, entries_json: &str) -> Result<Vec<u32>, JsValue> {
        self.inner.observe_reveal(entries_json).map_err(json_error)
    }

    /// Throws on a malformed batch.
    #[wasm_bindgen(js_name = observeSections)]
    pub fn observe_sections(&mut self, entries_json: &str) -> Result<Option<u32>, JsValue> {
        self.inner.observe_sections(entries_json).map_err(json_error)
    }

    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<u32> {
        self.inner.active_section()
    }

    #[wasm_bindgen(js_name = tiltMove)]
    pub fn tilt_move(&mut self, card: u32, x: f32, y: f32) -> bool {
        self.inner.tilt_move(card, x, y)
    }

    /// `{x, y}` for `--tilt-x` / `--tilt-y`, or `undefined`.
    #[wasm_bindgen(js_name = tiltFrame)]
    pub fn tilt_frame(&mut self, card: u32, left: f32, top: f32, width: f32, height: f32) -> JsValue {
        self.inner
            .tilt_frame(card, Rect::new(left, top, width, height))
            .map_or(JsValue::UNDEFINED, tilt_to_js)
    }

    #[wasm_bindgen(js_name = tiltReset)]
    pub fn tilt_reset(&mut self, card: u32) -> JsValue {
        self.inner
            .tilt_reset(card)
            .map_or(JsValue::UNDEFINED, tilt_to_js)
    }

    #[wasm_bindgen(js_name = heroInitial)]
    pub fn hero_initial(&self) -> Option<String> {
        self.inner.hero_initial()
    }

    #[wasm_bindgen(js_name = heroRequest)]
    pub fn hero_request(&mut self) -> bool {
        self.inner.hero_request()
    }

    /// `--hero-progress` value, or `undefined` without a pending frame.
    #[wasm_bindgen(js_name = heroFrame)]
    pub fn hero_frame(&mut self, viewport_height: f32, hero_top: f32, hero_height: f32) -> Option<String> {
        self.inner.hero_frame(viewport_height, hero_top, hero_height)
    }
}
