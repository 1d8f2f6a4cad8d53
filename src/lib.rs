//! # dumpdiff
//!
//! Compares two directories of exported data-store dumps and reports keys
//! missing on either side, keys whose metadata diverged, and keys seen a
//! number of times other than the expected replica count.

pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod loader;
pub mod output;
pub mod progress;
pub mod record;
pub mod replica;
pub mod snapshot;

pub use commands::{Comparison, TransferComparison, ViewComparison};
pub use config::Config;
pub use diff::{diff_snapshots, SnapshotDiff};
pub use error::{DumpDiffError, Result};
pub use record::{TransferRecord, ViewRecord};
pub use snapshot::Snapshot;
