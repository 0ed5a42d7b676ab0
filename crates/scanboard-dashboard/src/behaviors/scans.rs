//! Live status for scans rendered as active

use crate::app::DashboardConfig;
use crate::dom::{query_all, BrowserScheduler, DomContract, ElementStatusView, WindowPage};
use leptos::window;
use scanboard_core::{ActiveScanPoller, HttpStatusSource, ScanReference};
use std::rc::Rc;

/// Start polling when the page shows at least one active scan.
///
/// The poller keeps itself alive through its interval callback until the
/// page reloads.
pub fn start(config: &DashboardConfig) -> bool {
    let scans = active_scans(&config.dom);
    if scans.is_empty() {
        return false;
    }

    let origin = match window().location().origin() {
        Ok(origin) => origin,
        Err(e) => {
            tracing::error!("Cannot resolve page origin: {:?}", e);
            return false;
        }
    };

    let source = HttpStatusSource::new(origin, &config.poller);
    let poller = match ActiveScanPoller::new(
        config.poller.clone(),
        scans,
        Rc::new(source),
        Rc::new(WindowPage),
        Rc::new(BrowserScheduler),
    ) {
        Ok(poller) => poller,
        Err(e) => {
            tracing::error!("Active scan poller not started: {}", e);
            return false;
        }
    };

    poller.start()
}

fn active_scans(dom: &DomContract) -> Vec<ScanReference> {
    query_all(&dom.active_scan_selector)
        .into_iter()
        .filter_map(|row| {
            let Some(scan_id) = row.get_attribute(&dom.scan_id_attribute) else {
                tracing::warn!("Active scan row without {}", dom.scan_id_attribute);
                return None;
            };

            match row.query_selector(&dom.scan_status_selector) {
                Ok(Some(status)) => Some(ScanReference::new(scan_id, ElementStatusView::new(status))),
                _ => {
                    tracing::warn!("Active scan {} has no status element", scan_id);
                    None
                }
            }
        })
        .collect()
}
