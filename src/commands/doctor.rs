use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ReportStore;

pub fn run<S: ReportStore>(store: &mut S) -> Result<CmdResult> {
    let report = store.doctor()?;
    let mut result = CmdResult::default();

    if report.pruned_entries == 0 && report.orphan_files == 0 {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found:"));
        if report.pruned_entries > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} entr(ies) listed in the index but missing from disk.",
                report.pruned_entries
            )));
        }
        if report.orphan_files > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Found {} file(s) on disk that no index entry references.",
                report.orphan_files
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn clean_store_reports_no_issues() {
        let fixture = StoreFixture::new().with_reports(2);
        let mut store = fixture.store;

        let result = run(&mut store).unwrap();
        assert!(result.messages[0].content.contains("No inconsistencies"));
    }
}
