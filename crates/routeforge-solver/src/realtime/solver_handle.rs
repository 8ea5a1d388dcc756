//! Solver handle for submitting fact changes during solving.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use super::FactChange;

/// Result of a fact change submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactChangeResult {
    /// Change was successfully queued.
    Queued,
    /// Solver is not running, change was not queued.
    SolverNotRunning,
    /// The solving loop has ended and dropped its receiver.
    Disconnected,
}

/// Handle for submitting fact changes to a running solving loop.
///
/// Dropping every handle disconnects the channel, which wakes a loop that
/// is parked waiting for changes.
pub struct SolverHandle {
    change_tx: Sender<FactChange>,
    solving: Arc<AtomicBool>,
    terminate_early: Arc<AtomicBool>,
}

impl SolverHandle {
    /// Creates a new solver handle and its corresponding receiver.
    ///
    /// The receiver should be moved into the solving loop.
    pub fn new() -> (Self, FactChangeReceiver) {
        let (tx, rx) = mpsc::channel();
        let solving = Arc::new(AtomicBool::new(false));
        let terminate_early = Arc::new(AtomicBool::new(false));

        let handle = Self {
            change_tx: tx,
            solving: Arc::clone(&solving),
            terminate_early: Arc::clone(&terminate_early),
        };

        let receiver = FactChangeReceiver {
            change_rx: rx,
            solving,
            terminate_early,
        };

        (handle, receiver)
    }

    /// Queues a fact change. Never blocks.
    pub fn submit(&self, change: FactChange) -> FactChangeResult {
        if !self.solving.load(Ordering::SeqCst) {
            return FactChangeResult::SolverNotRunning;
        }

        match self.change_tx.send(change) {
            Ok(()) => FactChangeResult::Queued,
            Err(_) => FactChangeResult::Disconnected,
        }
    }

    /// Returns true if the solver is currently running.
    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }

    /// Requests termination of the solving loop.
    ///
    /// The loop stops at the next step boundary.
    pub fn terminate_early(&self) {
        self.terminate_early.store(true, Ordering::SeqCst);
    }

    pub fn set_solving(&self, solving: bool) {
        self.solving.store(solving, Ordering::SeqCst);
    }
}

impl Debug for SolverHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverHandle")
            .field("solving", &self.solving.load(Ordering::SeqCst))
            .field("terminate_early", &self.terminate_early.load(Ordering::SeqCst))
            .finish()
    }
}

/// What a parked loop woke up for.
#[derive(Debug)]
pub enum WaitOutcome {
    Change(FactChange),
    Timeout,
    /// Every handle was dropped.
    Disconnected,
}

/// Receiver for fact changes, owned by the solving loop.
pub struct FactChangeReceiver {
    change_rx: Receiver<FactChange>,
    solving: Arc<AtomicBool>,
    terminate_early: Arc<AtomicBool>,
}

impl FactChangeReceiver {
    /// Tries to receive a pending fact change without blocking.
    pub fn try_recv(&self) -> Option<FactChange> {
        match self.change_rx.try_recv() {
            Ok(change) => Some(change),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Receives all pending fact changes without blocking, oldest first.
    pub fn drain_pending(&self) -> Vec<FactChange> {
        let mut changes = Vec::new();
        while let Some(change) = self.try_recv() {
            changes.push(change);
        }
        changes
    }

    /// Blocks for at most `timeout` waiting for the next change.
    pub fn wait(&self, timeout: Duration) -> WaitOutcome {
        match self.change_rx.recv_timeout(timeout) {
            Ok(change) => WaitOutcome::Change(change),
            Err(RecvTimeoutError::Timeout) => WaitOutcome::Timeout,
            Err(RecvTimeoutError::Disconnected) => WaitOutcome::Disconnected,
        }
    }

    /// Returns true if termination has been requested.
    pub fn is_terminate_early_requested(&self) -> bool {
        self.terminate_early.load(Ordering::SeqCst)
    }

    pub fn set_solving(&self, solving: bool) {
        self.solving.store(solving, Ordering::SeqCst);
    }
}

impl Debug for FactChangeReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactChangeReceiver")
            .field("solving", &self.solving.load(Ordering::SeqCst))
            .finish()
    }
}
