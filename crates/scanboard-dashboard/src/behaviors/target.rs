//! Target field validation and the submit guard

use crate::dom::{listen, set_class, DomContract};
use leptos::{document, window};
use scanboard_core::target::{validate_target, SUBMIT_BLOCKED_MESSAGE};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

/// Validate the target field and reflect the result in its feedback element.
///
/// A page without a target field has nothing to block.
pub fn validate_field(dom: &DomContract) -> bool {
    let document = document();

    let Some(input) = document
        .get_element_by_id(&dom.target_input_id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    else {
        return true;
    };

    let result = validate_target(&input.value());

    if let Some(feedback) = document.get_element_by_id(&dom.target_feedback_id) {
        feedback.set_text_content(Some(result.message()));
        set_class(&feedback, &dom.hidden_class, result.is_valid());
    }

    result.is_valid()
}

pub fn wire(dom: &DomContract) {
    let document = document();

    if let Some(input) = document.get_element_by_id(&dom.target_input_id) {
        let dom = dom.clone();
        listen(&input, "input", move |_| {
            validate_field(&dom);
        });
    }

    if let Some(form) = document.get_element_by_id(&dom.scan_form_id) {
        let dom = dom.clone();
        listen(&form, "submit", move |event: Event| {
            if !validate_field(&dom) {
                event.prevent_default();
                if let Err(e) = window().alert_with_message(SUBMIT_BLOCKED_MESSAGE) {
                    tracing::warn!("Alert failed: {:?}", e);
                }
            }
        });
    }
}
