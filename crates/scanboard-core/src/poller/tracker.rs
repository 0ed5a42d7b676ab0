//! Per-scan polling state

use super::StatusView;
use crate::{ScanId, ScanStatusSnapshot};

/// Where a tracked scan stands within the current page lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Displayed as queued or running; polled every round
    Active,
    /// Reported a terminal status; never polled again
    Settled,
}

/// Effect of one observed snapshot on a tracked scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Settled,
}

/// One active scan row and its state machine
pub struct ScanTracker {
    scan_id: ScanId,
    view: Box<dyn StatusView>,
    state: std::cell::Cell<TrackState>,
}

impl ScanTracker {
    pub fn new(scan_id: ScanId, view: Box<dyn StatusView>) -> Self {
        Self {
            scan_id,
            view,
            state: std::cell::Cell::new(TrackState::Active),
        }
    }

    pub fn scan_id(&self) -> &ScanId {
        &self.scan_id
    }

    pub fn state(&self) -> TrackState {
        self.state.get()
    }

    pub fn is_active(&self) -> bool {
        self.state.get() == TrackState::Active
    }

    /// Display the reported status and advance the state machine.
    ///
    /// Once settled, late responses are ignored so the terminal status stays
    /// on screen until the page reloads.
    pub fn observe(&self, snapshot: &ScanStatusSnapshot) -> Transition {
        if !self.is_active() {
            return Transition::Unchanged;
        }

        self.view.show_status(snapshot.status.as_str());

        if !snapshot.status.is_active() {
            self.state.set(TrackState::Settled);
            tracing::info!(
                scan_id = %self.scan_id,
                status = %snapshot.status,
                end_time = snapshot.end_time.as_deref().unwrap_or("-"),
                "Scan settled"
            );
            return Transition::Settled;
        }

        Transition::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingView(Rc<RefCell<Vec<String>>>);

    impl StatusView for RecordingView {
        fn show_status(&self, status: &str) {
            self.0.borrow_mut().push(status.to_string());
        }
    }

    fn tracker() -> (ScanTracker, Rc<RefCell<Vec<String>>>) {
        let shown = Rc::new(RefCell::new(Vec::new()));
        let tracker = ScanTracker::new(ScanId::new("3"), Box::new(RecordingView(shown.clone())));
        (tracker, shown)
    }

    #[test]
    fn test_starts_active() {
        let (tracker, shown) = tracker();
        assert_eq!(tracker.state(), TrackState::Active);
        assert!(shown.borrow().is_empty());
    }

    #[test]
    fn test_in_progress_statuses_stay_active() {
        let (tracker, shown) = tracker();
        assert_eq!(tracker.observe(&ScanStatusSnapshot::new("queued")), Transition::Unchanged);
        assert_eq!(tracker.observe(&ScanStatusSnapshot::new("running")), Transition::Unchanged);
        assert!(tracker.is_active());
        assert_eq!(*shown.borrow(), vec!["queued", "running"]);
    }

    #[test]
    fn test_terminal_status_settles_once() {
        let (tracker, shown) = tracker();
        assert_eq!(tracker.observe(&ScanStatusSnapshot::new("failed")), Transition::Settled);
        assert_eq!(tracker.state(), TrackState::Settled);

        // Settled is terminal even if a later response claims otherwise
        assert_eq!(tracker.observe(&ScanStatusSnapshot::new("running")), Transition::Unchanged);
        assert_eq!(tracker.state(), TrackState::Settled);
        assert_eq!(*shown.borrow(), vec!["failed"]);
    }

    #[test]
    fn test_unknown_status_settles() {
        let (tracker, _) = tracker();
        assert_eq!(tracker.observe(&ScanStatusSnapshot::new("archived")), Transition::Settled);
    }
}
