//! DOM contract and browser implementations of the poller seams

use futures::future::LocalBoxFuture;
use leptos::{document, window};
use once_cell::unsync::OnceCell;
use scanboard_core::{PageControl, Scheduler, StatusView};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

/// Selectors, ids, attributes and classes the server-rendered page provides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomContract {
    pub active_scan_selector: String,
    pub scan_id_attribute: String,
    pub scan_status_selector: String,
    pub target_input_id: String,
    pub target_feedback_id: String,
    pub scan_form_id: String,
    pub delete_report_selector: String,
    pub cancel_scan_selector: String,
    pub tooltip_selector: String,
    pub popover_selector: String,
    pub details_toggle_selector: String,
    pub details_target_attribute: String,
    pub hidden_class: String,
}

impl Default for DomContract {
    fn default() -> Self {
        Self {
            active_scan_selector: ".active-scan".to_string(),
            scan_id_attribute: "data-scan-id".to_string(),
            scan_status_selector: ".scan-status".to_string(),
            target_input_id: "target".to_string(),
            target_feedback_id: "target-feedback".to_string(),
            scan_form_id: "scan-form".to_string(),
            delete_report_selector: ".delete-report".to_string(),
            cancel_scan_selector: ".cancel-scan".to_string(),
            tooltip_selector: r#"[data-bs-toggle="tooltip"]"#.to_string(),
            popover_selector: r#"[data-bs-toggle="popover"]"#.to_string(),
            details_toggle_selector: ".toggle-details".to_string(),
            details_target_attribute: "data-target".to_string(),
            hidden_class: "d-none".to_string(),
        }
    }
}

thread_local! {
    static SHARED_CONTRACT: OnceCell<DomContract> = OnceCell::new();
}

/// Publish the page's contract to entry points outside the installed
/// behaviors. The first contract shared wins.
pub fn share_contract(dom: DomContract) {
    SHARED_CONTRACT.with(|cell| {
        let _ = cell.set(dom);
    });
}

/// The contract shared at install time, or the defaults before that
pub fn shared_contract() -> DomContract {
    SHARED_CONTRACT.with(|cell| cell.get().cloned().unwrap_or_default())
}

/// All elements matching `selector`; an invalid selector matches nothing
pub fn query_all(selector: &str) -> Vec<Element> {
    let nodes = match document().query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            tracing::warn!("Invalid selector {}: {:?}", selector, e);
            return Vec::new();
        }
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attach a listener for the lifetime of the page
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::warn!("Failed to attach {} listener: {:?}", event, e);
    }
    closure.forget();
}

/// Add or remove a class, logging instead of failing
pub fn set_class(element: &Element, class: &str, present: bool) {
    let classes = element.class_list();
    let result = if present {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };

    if let Err(e) = result {
        tracing::warn!("Failed to update class {}: {:?}", class, e);
    }
}

/// The status cell of one active scan row
pub struct ElementStatusView {
    element: Element,
}

impl ElementStatusView {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl StatusView for ElementStatusView {
    fn show_status(&self, status: &str) {
        self.element.set_text_content(Some(status));
    }
}

pub struct WindowPage;

impl PageControl for WindowPage {
    fn reload(&self) {
        if let Err(e) = window().location().reload() {
            tracing::error!("Page reload failed: {:?}", e);
        }
    }
}

/// Browser event loop timers via leptos
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::spawn_local(task);
    }

    fn every(&self, period: Duration, tick: Box<dyn Fn()>) {
        if let Err(e) = leptos::set_interval_with_handle(move || tick(), period) {
            tracing::error!("Failed to start polling interval: {:?}", e);
        }
    }

    fn after(&self, delay: Duration, action: Box<dyn FnOnce()>) {
        leptos::set_timeout(action, delay);
    }
}
