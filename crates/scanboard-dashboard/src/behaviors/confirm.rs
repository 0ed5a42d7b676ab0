//! Confirmation before destructive actions

use crate::dom::{listen, query_all, DomContract};
use leptos::window;
use scanboard_core::display::{CONFIRM_CANCEL_SCAN, CONFIRM_DELETE_REPORT};
use web_sys::Event;

pub fn wire(dom: &DomContract) {
    guard_clicks(&dom.delete_report_selector, CONFIRM_DELETE_REPORT);
    guard_clicks(&dom.cancel_scan_selector, CONFIRM_CANCEL_SCAN);
}

fn guard_clicks(selector: &str, prompt: &'static str) {
    for button in query_all(selector) {
        listen(&button, "click", move |event: Event| {
            if !confirmed(prompt) {
                event.prevent_default();
            }
        });
    }
}

// A dialog that cannot be shown counts as declined
fn confirmed(prompt: &str) -> bool {
    window().confirm_with_message(prompt).unwrap_or(false)
}
