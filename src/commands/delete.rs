use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::ReportSelector;
use crate::store::ReportStore;

use super::helpers::resolve_selectors;

pub fn run<S: ReportStore>(store: &mut S, selectors: &[ReportSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (selector, id) in resolved {
        let report = store.get_report(&id)?;
        store.delete_report(&id)?;
        result.add_message(CmdMessage::success(format!(
            "Report deleted ({}): {}",
            selector, report.title
        )));
        result.affected_reports.push(report);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn deletes_by_position() {
        let fixture = StoreFixture::new().with_report("old").with_report("new");
        let mut store = fixture.store;

        run(&mut store, &[ReportSelector::Position(1)]).unwrap();

        let remaining = list::run(&store).unwrap().listed_reports;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].report.title, "old");
    }

    #[test]
    fn deletes_by_id() {
        let fixture = StoreFixture::new().with_report("target");
        let mut store = fixture.store;
        let id = store.list_reports().unwrap()[0].id;

        run(&mut store, &[ReportSelector::Id(id)]).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_selector_deletes_nothing() {
        let fixture = StoreFixture::new().with_reports(2);
        let mut store = fixture.store;

        assert!(run(&mut store, &[ReportSelector::Position(9)]).is_err());
        assert_eq!(store.list_reports().unwrap().len(), 2);
    }
}
