use super::{ChangeFeed, DoctorReport, ReportStore};
use crate::error::{Result, VitalsError};
use crate::model::{StoredReport, REPORT_FILE_EXT};
use log::warn;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::broadcast;
use uuid::Uuid;

const INDEX_FILENAME: &str = "index.json";

/// File-backed report store: one directory of PDFs plus a JSON index,
/// mirrored by an in-memory cache.
///
/// The store exclusively owns its directory and index file. Opening the
/// store prunes index entries whose backing file is gone and re-persists
/// the filtered index, so a crash between a file delete and an index
/// save heals itself on the next start.
pub struct FileStore {
    directory: PathBuf,
    cache: Vec<StoredReport>,
    feed: ChangeFeed,
}

impl FileStore {
    /// Open (creating if necessary) the store rooted at `directory`.
    ///
    /// A missing or undecodable index yields an empty store; only a
    /// failure to create the directory itself is an error.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;

        let mut store = Self {
            directory,
            cache: Vec::new(),
            feed: ChangeFeed::new(),
        };
        store.load_index();
        Ok(store)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn index_path(&self) -> PathBuf {
        self.directory.join(INDEX_FILENAME)
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }

    fn load_index(&mut self) {
        self.cache = match fs::read_to_string(self.index_path()) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("index is not decodable, starting empty: {}", e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };

        let before = self.cache.len();
        let directory = self.directory.clone();
        self.cache
            .retain(|r| directory.join(&r.file_name).exists());
        if self.cache.len() < before {
            warn!(
                "pruned {} index entr(ies) with missing files",
                before - self.cache.len()
            );
        }

        // Re-persist so a pruned or freshly created index hits disk now
        if let Err(e) = self.save_index() {
            warn!("failed to re-persist index on load: {}", e);
        }
    }

    fn save_index(&self) -> Result<()> {
        let mut sorted = self.cache.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let content = serde_json::to_string_pretty(&sorted)?;
        write_atomic(&self.index_path(), content.as_bytes())
    }
}

/// Write `data` to a temp file in the target's directory, then rename
/// into place. Readers never observe a half-written file.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| VitalsError::Store(format!("no parent directory: {}", path.display())))?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| VitalsError::Io(e.error))?;
    Ok(())
}

impl ReportStore for FileStore {
    fn add_report(&mut self, data: &[u8], title: &str) -> Result<StoredReport> {
        let report = StoredReport::new(title);

        // File first; a failed write must not register an entry
        write_atomic(&self.file_path(&report.file_name), data)?;

        self.cache.push(report.clone());
        self.save_index()?;
        self.feed.notify();
        Ok(report)
    }

    fn get_report(&self, id: &Uuid) -> Result<StoredReport> {
        self.cache
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or(VitalsError::ReportNotFound(*id))
    }

    fn list_reports(&self) -> Result<Vec<StoredReport>> {
        let mut reports = self.cache.clone();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    fn delete_report(&mut self, id: &Uuid) -> Result<()> {
        if let Some(report) = self.cache.iter().find(|r| r.id == *id) {
            // Best-effort: a file that is already gone is not an error
            if let Err(e) = fs::remove_file(self.file_path(&report.file_name)) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("could not remove {}: {}", report.file_name, e);
                }
            }
        }

        self.cache.retain(|r| r.id != *id);
        self.save_index()?;
        self.feed.notify();
        Ok(())
    }

    fn delete_all(&mut self) -> Result<usize> {
        for report in &self.cache {
            if let Err(e) = fs::remove_file(self.file_path(&report.file_name)) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("could not remove {}: {}", report.file_name, e);
                }
            }
        }

        let removed = self.cache.len();
        self.cache.clear();
        self.save_index()?;
        self.feed.notify();
        Ok(removed)
    }

    fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn report_path(&self, id: &Uuid) -> Result<PathBuf> {
        let report = self.get_report(id)?;
        Ok(self.file_path(&report.file_name))
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        let mut report = DoctorReport::default();

        let before = self.cache.len();
        let directory = self.directory.clone();
        self.cache
            .retain(|r| directory.join(&r.file_name).exists());
        report.pruned_entries = before - self.cache.len();

        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(REPORT_FILE_EXT) {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !self.cache.iter().any(|r| r.file_name == file_name) {
                report.orphan_files += 1;
            }
        }

        if report.pruned_entries > 0 {
            self.save_index()?;
            self.feed.notify();
        }

        Ok(report)
    }

    fn subscribe(&self) -> broadcast::Receiver<()> {
        self.feed.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDF: &[u8] = b"%PDF-1.4 test payload";

    fn open_store(dir: &Path) -> FileStore {
        FileStore::open(dir).unwrap()
    }

    #[test]
    fn add_then_list_returns_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());

        let a = store.add_report(PDF, "first").unwrap();
        let b = store.add_report(PDF, "second").unwrap();
        let c = store.add_report(PDF, "third").unwrap();

        let listed = store.list_reports().unwrap();
        assert_eq!(
            listed.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![c.id, b.id, a.id]
        );
    }

    #[test]
    fn add_writes_file_and_index_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());

        let report = store
            .add_report(PDF, "Vital Result – Jan 1, 2025")
            .unwrap();

        assert_eq!(report.file_name, format!("{}.pdf", report.id));
        assert_eq!(fs::read(tmp.path().join(&report.file_name)).unwrap(), PDF);

        let listed = store.list_reports().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Vital Result – Jan 1, 2025");
    }

    #[test]
    fn delete_removes_file_and_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());

        let report = store.add_report(PDF, "doomed").unwrap();
        let path = tmp.path().join(&report.file_name);
        assert!(path.exists());

        store.delete_report(&report.id).unwrap();
        assert!(!path.exists());
        assert!(store.list_reports().unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn delete_unknown_id_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());
        store.add_report(PDF, "kept").unwrap();

        store.delete_report(&Uuid::new_v4()).unwrap();
        assert_eq!(store.list_reports().unwrap().len(), 1);
    }

    #[test]
    fn delete_survives_externally_removed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());

        let report = store.add_report(PDF, "gone").unwrap();
        fs::remove_file(tmp.path().join(&report.file_name)).unwrap();

        store.delete_report(&report.id).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn delete_all_clears_files_and_index() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());

        store.add_report(PDF, "a").unwrap();
        let b = store.add_report(PDF, "b").unwrap();

        let removed = store.delete_all().unwrap();
        assert_eq!(removed, 2);
        assert!(store.is_empty());
        assert!(store.list_reports().unwrap().is_empty());
        assert!(!tmp.path().join(&b.file_name).exists());
    }

    #[test]
    fn reopen_round_trips_the_index() {
        let tmp = tempfile::tempdir().unwrap();
        let (a, b) = {
            let mut store = open_store(tmp.path());
            let a = store.add_report(PDF, "a").unwrap();
            let b = store.add_report(PDF, "b").unwrap();
            (a, b)
        };

        let store = open_store(tmp.path());
        let listed = store.list_reports().unwrap();
        assert_eq!(listed, vec![b, a]);
    }

    #[test]
    fn reopen_prunes_entries_whose_file_is_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let (kept, lost) = {
            let mut store = open_store(tmp.path());
            let kept = store.add_report(PDF, "kept").unwrap();
            let lost = store.add_report(PDF, "lost").unwrap();
            (kept, lost)
        };

        fs::remove_file(tmp.path().join(&lost.file_name)).unwrap();

        let store = open_store(tmp.path());
        let listed = store.list_reports().unwrap();
        assert_eq!(listed, vec![kept]);

        // The filtered index was re-persisted immediately
        let raw = fs::read_to_string(tmp.path().join(INDEX_FILENAME)).unwrap();
        assert!(!raw.contains(&lost.file_name));
    }

    #[test]
    fn undecodable_index_yields_empty_store() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(INDEX_FILENAME), b"not json at all").unwrap();

        let store = open_store(tmp.path());
        assert!(store.is_empty());
    }

    #[test]
    fn mutations_notify_subscribers() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());
        let mut rx = store.subscribe();

        let report = store.add_report(PDF, "a").unwrap();
        assert!(rx.try_recv().is_ok());

        store.delete_report(&report.id).unwrap();
        assert!(rx.try_recv().is_ok());

        store.delete_all().unwrap();
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn doctor_prunes_and_counts_orphans() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());

        let lost = store.add_report(PDF, "lost").unwrap();
        store.add_report(PDF, "kept").unwrap();
        fs::remove_file(tmp.path().join(&lost.file_name)).unwrap();
        fs::write(tmp.path().join("stray.pdf"), PDF).unwrap();

        let report = store.doctor().unwrap();
        assert_eq!(report.pruned_entries, 1);
        assert_eq!(report.orphan_files, 1);
        assert_eq!(store.list_reports().unwrap().len(), 1);
    }

    #[test]
    fn add_from_file_reads_the_source() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("incoming.pdf");
        fs::write(&src, PDF).unwrap();

        let store_dir = tmp.path().join("store");
        let mut store = open_store(&store_dir);
        let report = store.add_report_from_file(&src, "downloaded").unwrap();

        assert_eq!(fs::read(store_dir.join(&report.file_name)).unwrap(), PDF);
    }

    #[test]
    fn add_from_missing_file_fails_without_registering() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = open_store(tmp.path());

        let missing = tmp.path().join("nope.pdf");
        assert!(store.add_report_from_file(&missing, "x").is_err());
        assert!(store.is_empty());
    }
}
