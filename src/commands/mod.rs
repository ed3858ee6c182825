use crate::config::VitalsConfig;
use crate::index::ListedReport;
use crate::model::StoredReport;
use std::path::PathBuf;

pub mod clear;
pub mod config;
pub mod delete;
pub mod doctor;
pub mod fetch;
pub mod helpers;
pub mod import;
pub mod list;
pub mod paths;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_reports: Vec<StoredReport>,
    pub listed_reports: Vec<ListedReport>,
    pub report_paths: Vec<PathBuf>,
    pub config: Option<VitalsConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_reports(mut self, reports: Vec<ListedReport>) -> Self {
        self.listed_reports = reports;
        self
    }

    pub fn with_report_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.report_paths = paths;
        self
    }

    pub fn with_config(mut self, config: VitalsConfig) -> Self {
        self.config = Some(config);
        self
    }
}
