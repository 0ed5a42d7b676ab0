//! Page bootstrap

use crate::behaviors;
use crate::dom::{share_contract, DomContract};
use leptos::document;
use scanboard_core::PollerConfig;
use serde::{Deserialize, Serialize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Id of an optional `<script type="application/json">` block overriding defaults
const CONFIG_ELEMENT_ID: &str = "scanboard-config";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub poller: PollerConfig,
    pub dom: DomContract,
}

/// Install behaviors now, or once the document has been parsed
pub fn run_when_ready() {
    let document = document();

    if document.ready_state() != "loading" {
        install();
        return;
    }

    let callback = Closure::once_into_js(install);
    if let Err(e) =
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        tracing::error!("Failed to wait for DOMContentLoaded: {:?}", e);
    }
}

fn install() {
    let config = load_config();
    share_contract(config.dom.clone());

    behaviors::scans::start(&config);
    behaviors::widgets::init(&config.dom);
    behaviors::target::wire(&config.dom);
    behaviors::confirm::wire(&config.dom);
    behaviors::details::wire(&config.dom);
}

fn load_config() -> DashboardConfig {
    let Some(element) = document().get_element_by_id(CONFIG_ELEMENT_ID) else {
        return DashboardConfig::default();
    };

    parse_config(&element.text_content().unwrap_or_default())
}

fn parse_config(text: &str) -> DashboardConfig {
    match serde_json::from_str(text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring malformed dashboard config: {}", e);
            DashboardConfig::default()
        }
    }
}
