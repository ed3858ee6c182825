use super::{ChangeFeed, DoctorReport, ReportStore};
use crate::error::{Result, VitalsError};
use crate::model::StoredReport;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::broadcast;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    reports: Vec<StoredReport>,
    data: HashMap<Uuid, Vec<u8>>,
    feed: ChangeFeed,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of a stored report, for assertions.
    pub fn report_data(&self, id: &Uuid) -> Option<&[u8]> {
        self.data.get(id).map(|d| d.as_slice())
    }
}

impl ReportStore for InMemoryStore {
    fn add_report(&mut self, data: &[u8], title: &str) -> Result<StoredReport> {
        let report = StoredReport::new(title);
        self.data.insert(report.id, data.to_vec());
        self.reports.push(report.clone());
        self.feed.notify();
        Ok(report)
    }

    fn get_report(&self, id: &Uuid) -> Result<StoredReport> {
        self.reports
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or(VitalsError::ReportNotFound(*id))
    }

    fn list_reports(&self) -> Result<Vec<StoredReport>> {
        let mut reports = self.reports.clone();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    fn delete_report(&mut self, id: &Uuid) -> Result<()> {
        self.data.remove(id);
        self.reports.retain(|r| r.id != *id);
        self.feed.notify();
        Ok(())
    }

    fn delete_all(&mut self) -> Result<usize> {
        let removed = self.reports.len();
        self.reports.clear();
        self.data.clear();
        self.feed.notify();
        Ok(removed)
    }

    fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    fn report_path(&self, id: &Uuid) -> Result<PathBuf> {
        let _ = self.get_report(id)?;
        Err(VitalsError::Store(
            "in-memory reports have no file path".to_string(),
        ))
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        // Nothing to heal without a filesystem
        Ok(DoctorReport::default())
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.feed.subscribe()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_reports(mut self, count: usize) -> Self {
            for i in 0..count {
                let title = format!("Test Report {}", i + 1);
                self.store
                    .add_report(b"%PDF-1.4 fixture", &title)
                    .unwrap();
            }
            self
        }

        pub fn with_report(mut self, title: &str) -> Self {
            self.store.add_report(b"%PDF-1.4 fixture", title).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_a_store() {
        let mut store = InMemoryStore::new();
        let report = store.add_report(b"%PDF-1.4", "a").unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.get_report(&report.id).unwrap().title, "a");

        store.delete_report(&report.id).unwrap();
        assert!(store.is_empty());
        assert!(store.report_data(&report.id).is_none());
    }

    #[test]
    fn delete_unknown_id_is_a_noop() {
        let mut store = InMemoryStore::new();
        store.add_report(b"%PDF-1.4", "kept").unwrap();
        store.delete_report(&Uuid::new_v4()).unwrap();
        assert_eq!(store.list_reports().unwrap().len(), 1);
    }
}
