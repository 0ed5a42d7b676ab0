//! Bootstrap tooltips and popovers

use crate::dom::{query_all, DomContract};
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Tooltip;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Tooltip, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Popover;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Popover, JsValue>;
}

pub fn init(dom: &DomContract) {
    let mut failures = 0usize;

    for element in query_all(&dom.tooltip_selector) {
        if Tooltip::new(&element).is_err() {
            failures += 1;
        }
    }

    for element in query_all(&dom.popover_selector) {
        if Popover::new(&element).is_err() {
            failures += 1;
        }
    }

    if failures > 0 {
        tracing::warn!("{} widget(s) not initialized; is bootstrap loaded?", failures);
    }
}
