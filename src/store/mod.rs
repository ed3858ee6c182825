//! # Storage Layer
//!
//! This module defines the storage abstraction for vitals. The
//! [`ReportStore`] trait allows the application to work with different
//! storage backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** without changing core logic
//! - Keep business logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Metadata stored in `index.json`, newest-first
//!   - Report bytes in individual files: `{uuid}.pdf`
//!   - Self-healing: index entries whose file is gone are pruned on load
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── index.json                # Metadata for all reports (JSON array)
//! ├── {uuid}.pdf                # Individual report files
//! └── config.json               # Persisted configuration
//! ```
//!
//! Metadata and report bytes are stored separately so listing never
//! requires reading the PDFs themselves.
//!
//! ## Change Notifications
//!
//! Every mutating operation broadcasts a payload-free signal on a
//! [`ChangeFeed`] owned by the store. Observers subscribe explicitly and
//! re-query [`ReportStore::list_reports`] when woken; there is no
//! process-global notification name.
//!
//! ## Concurrency
//!
//! Mutations take `&mut self`; a store instance has a single owner and
//! callers serialize mutations. There is no internal locking.

use crate::error::Result;
use crate::model::StoredReport;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Report from the `doctor` operation.
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Index entries removed because their backing file was missing.
    pub pruned_entries: usize,
    /// Report files on disk that no index entry references. Counted,
    /// not deleted: their titles are unrecoverable.
    pub orphan_files: usize,
}

/// Broadcast feed signalling "store contents changed".
///
/// The signal carries no payload; subscribers re-query the store.
pub struct ChangeFeed {
    tx: broadcast::Sender<()>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify all current subscribers. Having no subscribers is fine.
    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Abstract interface for report storage.
///
/// Implementations must keep the listed order newest-first and emit a
/// change notification on every mutation.
pub trait ReportStore {
    /// Store raw report bytes under a fresh id. Never registers an
    /// entry whose file write failed.
    fn add_report(&mut self, data: &[u8], title: &str) -> Result<StoredReport>;

    /// Read all bytes from `path` (typically a download's temporary
    /// location), then behave as [`ReportStore::add_report`].
    fn add_report_from_file(&mut self, path: &Path, title: &str) -> Result<StoredReport> {
        let data = std::fs::read(path)?;
        self.add_report(&data, title)
    }

    /// Get a report's metadata by id.
    fn get_report(&self, id: &Uuid) -> Result<StoredReport>;

    /// List all reports, newest first.
    fn list_reports(&self) -> Result<Vec<StoredReport>>;

    /// Delete one report: best-effort file removal, unconditional index
    /// removal. Deleting an unknown id is a no-op, not an error.
    fn delete_report(&mut self, id: &Uuid) -> Result<()>;

    /// Delete every report. Returns how many entries were removed.
    fn delete_all(&mut self) -> Result<usize>;

    /// True iff the store holds no reports.
    fn is_empty(&self) -> bool;

    /// On-disk location of a stored report (for external viewers).
    fn report_path(&self, id: &Uuid) -> Result<PathBuf>;

    /// Verify and fix consistency issues.
    fn doctor(&mut self) -> Result<DoctorReport>;

    /// Subscribe to the store's change feed.
    fn subscribe(&self) -> broadcast::Receiver<()>;
}
