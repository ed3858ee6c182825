use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ReportStore;

use super::helpers::indexed_reports;

pub fn run<S: ReportStore>(store: &S) -> Result<CmdResult> {
    let listed = indexed_reports(store)?;
    Ok(CmdResult::default().with_listed_reports(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_reports_newest_first() {
        let fixture = StoreFixture::new().with_report("old").with_report("new");

        let result = run(&fixture.store).unwrap();
        assert_eq!(result.listed_reports.len(), 2);
        assert_eq!(result.listed_reports[0].report.title, "new");
        assert_eq!(result.listed_reports[0].position, 1);
        assert_eq!(result.listed_reports[1].report.title, "old");
    }

    #[test]
    fn empty_store_lists_nothing() {
        let fixture = StoreFixture::new();
        let result = run(&fixture.store).unwrap();
        assert!(result.listed_reports.is_empty());
    }
}
