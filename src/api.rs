//! # API Facade
//!
//! The API layer is a thin facade over the command layer: it is the
//! single entry point for all vitals operations regardless of the UI
//! driving them. It dispatches to command functions, normalizes inputs
//! (raw selector strings become [`ReportSelector`]s), and returns
//! structured `Result<CmdResult>` values. No business logic, no
//! terminal I/O, no presentation concerns live here.
//!
//! `VitalsApi<S: ReportStore>` is generic over the storage backend:
//! production wires in `FileStore`, tests use `InMemoryStore`.

use crate::acquire::{self, PollPolicy, ReportFetcher};
use crate::commands;
use crate::commands::config::ConfigAction;
use crate::error::Result;
use crate::index::ReportSelector;
use crate::model::StoredReport;
use crate::sdk::MeasurementSdk;
use crate::store::ReportStore;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The main API facade for vitals operations.
///
/// Owns the store; all clients (CLI, an app shell, tests) interact
/// through this type.
pub struct VitalsApi<S: ReportStore> {
    store: S,
    config_dir: PathBuf,
}

impl<S: ReportStore> VitalsApi<S> {
    pub fn new(store: S, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            config_dir: config_dir.into(),
        }
    }

    pub fn list_reports(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn import_report(
        &mut self,
        path: &Path,
        title: Option<String>,
    ) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, path, title)
    }

    pub async fn fetch_report(
        &mut self,
        fetcher: &dyn ReportFetcher,
        url: &str,
        title: &str,
    ) -> Result<commands::CmdResult> {
        commands::fetch::run(&mut self.store, fetcher, url, title).await
    }

    /// Run the full acquisition flow against a vendor SDK and persist
    /// the outcome.
    pub async fn acquire_measurement(
        &mut self,
        sdk: &dyn MeasurementSdk,
        fetcher: &dyn ReportFetcher,
        title: &str,
        policy: &PollPolicy,
    ) -> Result<StoredReport> {
        acquire::acquire_report(sdk, fetcher, &mut self.store, title, policy).await
    }

    pub fn delete_reports<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn clear_reports(&mut self, skip_confirm: bool) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.store, skip_confirm)
    }

    pub fn doctor(&mut self) -> Result<commands::CmdResult> {
        commands::doctor::run(&mut self.store)
    }

    pub fn report_paths<I: AsRef<str>>(&self, selectors: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::paths::run(&self.store, &selectors)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}

fn parse_selectors<I: AsRef<str>>(raw: &[I]) -> Result<Vec<ReportSelector>> {
    raw.iter()
        .map(|s| ReportSelector::from_str(s.as_ref()))
        .collect()
}
