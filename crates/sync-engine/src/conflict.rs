// crates/sync-engine/src/conflict.rs
//! Conflict resolution: most recent side wins

use std::fmt;

/// The action chosen for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    /// Remote copy wins; pull it down
    Download,
    /// Local copy wins; push it up
    Upload,
    /// Both sides agree to the second; nothing to do
    NoOp,
}

impl fmt::Display for SyncDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDecision::Download => write!(f, "download"),
            SyncDecision::Upload => write!(f, "upload"),
            SyncDecision::NoOp => write!(f, "no-op"),
        }
    }
}

/// Compares whole-second timestamps and picks the transfer direction.
///
/// `local_time` is `None` when no local copy exists yet, which always
/// resolves to a download. Equality at second granularity is a no-op on
/// purpose: the protocol cannot express sub-second precision, so drift
/// below one second must never trigger a spurious transfer.
pub fn decide(remote_time: i64, local_time: Option<i64>) -> SyncDecision {
    match local_time {
        None => SyncDecision::Download,
        Some(local) if remote_time > local => SyncDecision::Download,
        Some(local) if local > remote_time => SyncDecision::Upload,
        Some(_) => SyncDecision::NoOp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_local_file_downloads() {
        assert_eq!(decide(100, None), SyncDecision::Download);
    }

    #[test]
    fn test_newer_remote_downloads() {
        assert_eq!(decide(100, Some(50)), SyncDecision::Download);
    }

    #[test]
    fn test_newer_local_uploads() {
        assert_eq!(decide(50, Some(100)), SyncDecision::Upload);
    }

    #[test]
    fn test_equal_times_is_noop() {
        assert_eq!(decide(100, Some(100)), SyncDecision::NoOp);
    }

    #[test]
    fn test_decision_is_antisymmetric_off_the_diagonal() {
        for (a, b) in [(0i64, 1i64), (50, 100), (1_700_000_000, 1_700_000_001)] {
            assert_eq!(decide(a, Some(b)), SyncDecision::Upload);
            assert_eq!(decide(b, Some(a)), SyncDecision::Download);
        }
    }

    #[test]
    fn test_one_second_apart_still_transfers() {
        // Whole seconds are the resolution limit, not a tolerance band
        assert_eq!(decide(101, Some(100)), SyncDecision::Download);
        assert_eq!(decide(100, Some(101)), SyncDecision::Upload);
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(SyncDecision::Download.to_string(), "download");
        assert_eq!(SyncDecision::Upload.to_string(), "upload");
        assert_eq!(SyncDecision::NoOp.to_string(), "no-op");
    }
}
