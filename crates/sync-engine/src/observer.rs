// crates/sync-engine/src/observer.rs
//! Reporting seam between the engine and the user interface

use crate::conflict::SyncDecision;
use crate::error::SyncError;
use crate::target::SyncTarget;

/// Facts about one target, announced after the decision and before any
/// transfer I/O
#[derive(Debug, Clone)]
pub struct TargetReport<'a> {
    /// Zero-based position in the run
    pub index: usize,
    /// Total number of targets in the run
    pub total: usize,
    /// The target being processed
    pub target: &'a SyncTarget,
    /// Remote mtime, whole-second epoch
    pub remote_time: i64,
    /// Local mtime; `None` when there is no local copy yet
    pub local_time: Option<i64>,
    /// The chosen action
    pub decision: SyncDecision,
}

/// Receives engine events.
///
/// Purely observational: implementations must never affect control flow.
/// Chunk progress arrives as cumulative bytes against the transfer total.
pub trait SyncObserver: Send + Sync {
    /// One target's summary, before its transfer starts
    fn target_started(&self, _report: &TargetReport<'_>) {}

    /// Cumulative progress after each chunk
    fn transfer_progress(&self, _transferred: u64, _total: u64) {}

    /// A download or upload finished cleanly
    fn transfer_finished(&self) {}

    /// A target failed; the run continues unless the error was cancellation
    fn target_failed(&self, _remote_path: &str, _error: &SyncError) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SyncObserver for NullObserver {}
