//! Collapsible finding details

use crate::dom::{listen, query_all, set_class, DomContract};
use leptos::document;
use scanboard_core::display::DetailsVisibility;
use web_sys::Element;

/// Flip the panel named by the button's target attribute and relabel the
/// button. A missing panel leaves everything untouched.
pub fn toggle(button: &Element, dom: &DomContract) {
    let Some(target_id) = button.get_attribute(&dom.details_target_attribute) else {
        return;
    };
    let Some(panel) = document().get_element_by_id(&target_id) else {
        tracing::debug!("No details panel #{}", target_id);
        return;
    };

    let current = if panel.class_list().contains(&dom.hidden_class) {
        DetailsVisibility::Hidden
    } else {
        DetailsVisibility::Shown
    };
    let next = current.toggled();

    set_class(&panel, &dom.hidden_class, next == DetailsVisibility::Hidden);
    button.set_text_content(Some(next.button_label()));
}

pub fn wire(dom: &DomContract) {
    for button in query_all(&dom.details_toggle_selector) {
        let dom = dom.clone();
        let target = button.clone();
        listen(&button, "click", move |_| toggle(&target, &dom));
    }
}
