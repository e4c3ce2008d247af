// crates/sync-engine/src/lib.rs
//! Memory-card synchronization engine
//!
//! Decides the transfer direction for each card image from last-modified
//! timestamps and executes chunked transfers over an abstract remote
//! store:
//!
//! - [`MappingStrategy`] resolves a logical name to remote and local paths
//! - [`SyncTarget`] binds one name to its resolved locations
//! - [`decide`] picks download, upload, or no-op (most recent side wins)
//! - [`TransferExecutor`] streams chunks and reconciles timestamps
//! - [`SyncEngine`] drives the ordered target loop, isolating failures
//!
//! The transport is injected through [`RemoteStore`]; [`FtpRemote`] is the
//! device-facing implementation.

mod conflict;
mod engine;
mod error;
mod executor;
mod fs;
mod mapping;
mod observer;
mod remote;
mod target;

pub use conflict::{decide, SyncDecision};
pub use engine::{SyncConfig, SyncEngine, SyncReport};
pub use error::{SyncError, SyncResult};
pub use executor::{TransferExecutor, DEFAULT_CHUNK_SIZE};
pub use fs::{local_modified_time, set_file_times};
pub use mapping::{FlatMapping, MappingStrategy, StructuredMapping};
pub use observer::{NullObserver, SyncObserver, TargetReport};
pub use remote::{FtpRemote, RemoteStore, RemoteStream};
pub use target::SyncTarget;
