//! Display positions for the history listing.
//!
//! Stored reports are addressed by stable UUIDs, but the CLI shows a
//! plain 1-based list (newest first). A [`ReportSelector`] accepts
//! either form, so `vitals delete 2` and `vitals delete <uuid>` both
//! work.

use crate::error::VitalsError;
use crate::model::StoredReport;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A report paired with its 1-based position in the current listing.
#[derive(Debug, Clone)]
pub struct ListedReport {
    pub position: usize,
    pub report: StoredReport,
}

/// Assign positions to an already newest-first list.
pub fn index_reports(reports: Vec<StoredReport>) -> Vec<ListedReport> {
    reports
        .into_iter()
        .enumerate()
        .map(|(i, report)| ListedReport {
            position: i + 1,
            report,
        })
        .collect()
}

/// How the user referred to a report on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSelector {
    Position(usize),
    Id(Uuid),
}

impl FromStr for ReportSelector {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(position) = s.parse::<usize>() {
            if position == 0 {
                return Err(VitalsError::Api(
                    "List positions start at 1".to_string(),
                ));
            }
            return Ok(ReportSelector::Position(position));
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(ReportSelector::Id(id));
        }
        Err(VitalsError::Api(format!(
            "Invalid selector '{}': expected a list position or a report id",
            s
        )))
    }
}

impl fmt::Display for ReportSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSelector::Position(n) => write!(f, "{}", n),
            ReportSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_start_at_one() {
        let reports = vec![StoredReport::new("b"), StoredReport::new("a")];
        let listed = index_reports(reports);
        assert_eq!(listed[0].position, 1);
        assert_eq!(listed[1].position, 2);
    }

    #[test]
    fn parses_positions_and_ids() {
        assert_eq!(
            "3".parse::<ReportSelector>().unwrap(),
            ReportSelector::Position(3)
        );

        let id = Uuid::new_v4();
        assert_eq!(
            id.to_string().parse::<ReportSelector>().unwrap(),
            ReportSelector::Id(id)
        );
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!("0".parse::<ReportSelector>().is_err());
        assert!("latest".parse::<ReportSelector>().is_err());
    }
}
