use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const REPORT_FILE_EXT: &str = "pdf";

/// One stored measurement report.
///
/// Records are immutable once created. The index JSON keeps the
/// historical camelCase key names (`fileName`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: Uuid,
    pub title: String,
    // Derived from the id so filenames never collide
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

impl StoredReport {
    pub fn new(title: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            title: title.into(),
            file_name: format!("{}.{}", id, REPORT_FILE_EXT),
            created_at: Utc::now(),
        }
    }
}
