// crates/sync-engine/src/engine.rs
//! Sync orchestration

use crate::conflict::{decide, SyncDecision};
use crate::error::{SyncError, SyncResult};
use crate::executor::TransferExecutor;
use crate::fs;
use crate::observer::{SyncObserver, TargetReport};
use crate::remote::RemoteStore;
use crate::target::SyncTarget;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Configuration for the sync engine
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Transfer chunk size in bytes
    pub chunk_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            chunk_size: crate::executor::DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Outcome counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Targets pulled down from the device
    pub downloaded: usize,
    /// Targets pushed up to the device
    pub uploaded: usize,
    /// Targets already in sync
    pub in_sync: usize,
    /// Targets that failed; each was logged and skipped
    pub failed: usize,
    /// True when the run stopped early on cancellation
    pub cancelled: bool,
    /// Wall-clock duration of the whole loop
    pub duration: Duration,
}

impl SyncReport {
    /// Number of targets that reached an outcome
    pub fn total(&self) -> usize {
        self.downloaded + self.uploaded + self.in_sync + self.failed
    }
}

/// Drives the decide-then-execute sequence over an ordered target list.
///
/// Targets are strictly sequential over one session; nothing is carried
/// from one target to the next. A failing target is logged with its remote
/// path and skipped; only cancellation stops the loop early.
pub struct SyncEngine {
    config: SyncConfig,
}

impl SyncEngine {
    /// Creates an engine with the given configuration
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Processes every target in order over the open session.
    pub async fn run<R: RemoteStore + ?Sized>(
        &self,
        remote: &mut R,
        targets: &[SyncTarget],
        observer: &dyn SyncObserver,
        cancel: &AtomicBool,
    ) -> SyncReport {
        let started = Instant::now();
        let mut report = SyncReport::default();

        for (index, target) in targets.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                report.cancelled = true;
                break;
            }

            let outcome = self
                .sync_target(remote, target, index, targets.len(), observer, cancel)
                .await;

            match outcome {
                Ok(SyncDecision::Download) => report.downloaded += 1,
                Ok(SyncDecision::Upload) => report.uploaded += 1,
                Ok(SyncDecision::NoOp) => report.in_sync += 1,
                Err(SyncError::Cancelled) => {
                    log::warn!("cancelled while syncing {}", target.remote_path());
                    observer.target_failed(target.remote_path(), &SyncError::Cancelled);
                    report.failed += 1;
                    report.cancelled = true;
                    break;
                }
                Err(err) => {
                    log::error!("error syncing {}: {err}", target.remote_path());
                    observer.target_failed(target.remote_path(), &err);
                    report.failed += 1;
                }
            }
        }

        report.duration = started.elapsed();
        report
    }

    async fn sync_target<R: RemoteStore + ?Sized>(
        &self,
        remote: &mut R,
        target: &SyncTarget,
        index: usize,
        total: usize,
        observer: &dyn SyncObserver,
        cancel: &AtomicBool,
    ) -> SyncResult<SyncDecision> {
        let path = target.remote_path();

        let remote_time = remote
            .modified_time(path)
            .await
            .map_err(|err| err.in_query(path))?;
        let local_time = fs::local_modified_time(target.local_path())?;
        let decision = decide(remote_time, local_time);

        observer.target_started(&TargetReport {
            index,
            total,
            target,
            remote_time,
            local_time,
            decision,
        });

        let mut executor =
            TransferExecutor::new(remote, observer, cancel, self.config.chunk_size);
        match decision {
            SyncDecision::Download => {
                executor.download(target, remote_time).await?;
            }
            SyncDecision::Upload => {
                executor.upload(target).await?;
            }
            SyncDecision::NoOp => {}
        }

        Ok(decision)
    }
}
