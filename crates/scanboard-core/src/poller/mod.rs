//! Active scan polling
//!
//! Every scan rendered as active is polled on a fixed period until it reports
//! a terminal status; the first settling scan schedules a page reload.
//! Execution is single-threaded: the runtime behind [`Scheduler`] multiplexes
//! the per-scan requests on one event loop, so shared state is `Rc` + `Cell`.

mod http;
mod tracker;

pub use http::HttpStatusSource;
pub use tracker::{ScanTracker, TrackState, Transition};

use crate::{CoreResult, PollerConfig, ScanId, ScanStatusSnapshot};
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Where snapshots come from
#[async_trait(?Send)]
pub trait StatusSource {
    async fn fetch_status(&self, scan_id: &ScanId) -> CoreResult<ScanStatusSnapshot>;
}

/// The element displaying one scan's status
pub trait StatusView {
    fn show_status(&self, status: &str);
}

/// Page-level actions
pub trait PageControl {
    fn reload(&self);
}

/// Timers and task spawning of the hosting event loop
pub trait Scheduler {
    /// Run a task without waiting for it
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Call `tick` every `period`, first after one full period
    fn every(&self, period: Duration, tick: Box<dyn Fn()>);

    /// Call `action` once after `delay`
    fn after(&self, delay: Duration, action: Box<dyn FnOnce()>);
}

/// A scan row rendered as active
pub struct ScanReference {
    pub scan_id: ScanId,
    pub view: Box<dyn StatusView>,
}

impl ScanReference {
    pub fn new(scan_id: impl Into<ScanId>, view: impl StatusView + 'static) -> Self {
        Self {
            scan_id: scan_id.into(),
            view: Box::new(view),
        }
    }
}

struct PollerState {
    config: PollerConfig,
    trackers: Vec<ScanTracker>,
    source: Rc<dyn StatusSource>,
    page: Rc<dyn PageControl>,
    scheduler: Rc<dyn Scheduler>,
    started: Cell<bool>,
    rounds: Cell<u64>,
    reload_scheduled: Cell<bool>,
}

impl PollerState {
    /// Issue one request per active scan without waiting on any of them
    fn start_round(self: &Rc<Self>) {
        let round = self.rounds.get() + 1;
        self.rounds.set(round);

        let mut issued = 0usize;
        for (index, tracker) in self.trackers.iter().enumerate() {
            if !tracker.is_active() {
                continue;
            }

            let state = Rc::clone(self);
            self.scheduler.spawn(Box::pin(async move {
                state.poll_scan(index).await;
            }));
            issued += 1;
        }

        debug!(round, requests = issued, "Started polling round");
    }

    async fn poll_scan(&self, index: usize) {
        let tracker = &self.trackers[index];

        match self.source.fetch_status(tracker.scan_id()).await {
            Ok(snapshot) => {
                if tracker.observe(&snapshot) == Transition::Settled {
                    self.schedule_reload();
                }
            }
            Err(e) => {
                error!(scan_id = %tracker.scan_id(), "Error fetching scan status: {}", e);
            }
        }
    }

    fn schedule_reload(&self) {
        if self.reload_scheduled.replace(true) {
            return;
        }

        info!("Reloading page in {} ms", self.config.reload_delay_ms);
        let page = Rc::clone(&self.page);
        self.scheduler
            .after(self.config.reload_delay(), Box::new(move || page.reload()));
    }
}

/// Keeps displayed status of in-progress scans fresh and reloads the page
/// once any of them settles
pub struct ActiveScanPoller {
    state: Rc<PollerState>,
}

impl ActiveScanPoller {
    pub fn new(
        config: PollerConfig,
        scans: Vec<ScanReference>,
        source: Rc<dyn StatusSource>,
        page: Rc<dyn PageControl>,
        scheduler: Rc<dyn Scheduler>,
    ) -> CoreResult<Self> {
        config.validate()?;

        let trackers = scans
            .into_iter()
            .map(|scan| ScanTracker::new(scan.scan_id, scan.view))
            .collect();

        Ok(Self {
            state: Rc::new(PollerState {
                config,
                trackers,
                source,
                page,
                scheduler,
                started: Cell::new(false),
                rounds: Cell::new(0),
                reload_scheduled: Cell::new(false),
            }),
        })
    }

    /// Poll immediately, then every configured period.
    ///
    /// Returns false without touching the scheduler when no scans are
    /// tracked. Starting twice is a no-op.
    pub fn start(&self) -> bool {
        if self.state.trackers.is_empty() {
            debug!("No active scans on page; poller not started");
            return false;
        }

        if self.state.started.replace(true) {
            return true;
        }

        info!(
            "Polling {} active scan(s) every {} ms",
            self.state.trackers.len(),
            self.state.config.poll_interval_ms
        );

        self.state.start_round();

        let state = Rc::clone(&self.state);
        self.state
            .scheduler
            .every(self.state.config.poll_interval(), Box::new(move || state.start_round()));

        true
    }

    pub fn tracked(&self) -> usize {
        self.state.trackers.len()
    }

    pub fn active_count(&self) -> usize {
        self.state.trackers.iter().filter(|t| t.is_active()).count()
    }

    pub fn state_of(&self, scan_id: &ScanId) -> Option<TrackState> {
        self.state
            .trackers
            .iter()
            .find(|t| t.scan_id() == scan_id)
            .map(|t| t.state())
    }

    pub fn rounds_started(&self) -> u64 {
        self.state.rounds.get()
    }

    pub fn reload_scheduled(&self) -> bool {
        self.state.reload_scheduled.get()
    }
}
