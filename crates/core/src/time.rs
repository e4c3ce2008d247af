// crates/core/src/time.rs
//! Whole-second timestamp helpers
//!
//! Remote MDTM responses and local mtimes are both reduced to whole-second
//! POSIX epoch values before any comparison; the protocol cannot express
//! sub-second precision, so residual drift below one second must never
//! trigger a transfer.

use chrono::{DateTime, Local};
use std::time::{SystemTime, UNIX_EPOCH};

/// Converts a `SystemTime` to whole seconds since the POSIX epoch
pub fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}

/// Formats an epoch value as `dd/mm/yyyy hh:mm:ss` in local time.
///
/// Used for the per-target summary lines; epoch 0 renders as the epoch
/// itself, which is how "no local file yet" shows up in the summary.
pub fn pretty_epoch(epoch: i64) -> String {
    match DateTime::from_timestamp(epoch, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M:%S")
            .to_string(),
        None => format!("@{epoch}"),
    }
}
