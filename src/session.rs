//! Search lifecycle control for UI-style drivers.
//!
//! Wraps a single worker thread around [`Search`] so a driver can request
//! cancellation from outside the search and then wait for confirmation
//! that it has fully unwound before starting another. The search itself
//! stays single-threaded and deterministic; the worker exists only so the
//! caller is free while it runs.

use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::debug;

use crate::solver::{Report, Search, Step};
use crate::stack::{Puzzle, Stack};

/// Returned when a search is started while another is still in flight.
///
/// Cancel the running search and call [`Session::await_idle`] first.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("a search is already in flight; cancel it and await idle first")]
pub struct SearchActive;

/// Owns the cancellation flag and at most one in-flight search.
pub struct Session {
    puzzle: Puzzle,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<Report>>,
}

impl Session {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            cancel: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// A handle to the shared cancellation flag, for wiring up signal
    /// handlers. Setting it has the same effect as
    /// [`Session::request_cancel`].
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Whether a search has been started and not yet awaited.
    pub fn is_active(&self) -> bool {
        self.worker.is_some()
    }

    /// Starts solving `stack` on the worker thread.
    ///
    /// `on_step` runs on the worker, synchronously after every move
    /// application and leaf evaluation. The cancellation flag is cleared
    /// before the search begins.
    pub fn start<F>(&mut self, stack: Stack, on_step: F) -> Result<(), SearchActive>
    where
        F: FnMut(&Step) + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(SearchActive);
        }
        self.cancel.store(false, Relaxed);
        let search = Search::new(self.puzzle.clone(), stack, Arc::clone(&self.cancel));
        debug!(height = self.puzzle.height(), "search started");
        self.worker = Some(thread::spawn(move || search.run(on_step)));
        Ok(())
    }

    /// Asks the in-flight search to stop at its next step.
    pub fn request_cancel(&self) {
        debug!("cancellation requested");
        self.cancel.store(true, Relaxed);
    }

    /// Blocks until the in-flight search has fully unwound and returns its
    /// report, or `None` when no search was started.
    ///
    /// Once this returns, no further `on_step` invocations can occur and a
    /// new search may be started.
    pub fn await_idle(&mut self) -> Option<Report> {
        let worker = self.worker.take()?;
        let report = worker.join().expect("search worker panicked");
        debug!(
            outcome = ?report.outcome,
            attempts = report.attempts,
            "search finished"
        );
        Some(report)
    }
}
