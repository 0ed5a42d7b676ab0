//! Functions callable from inline page scripts

use crate::behaviors::details;
use crate::dom::shared_contract;
use scanboard_core::display::format_timestamp;
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen(js_name = toggleVulnerabilityDetails)]
pub fn toggle_vulnerability_details(element: &Element) {
    details::toggle(element, &shared_contract());
}

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(value: Option<String>) -> String {
    format_timestamp(value.as_deref())
}
