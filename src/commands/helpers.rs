use crate::error::{Result, VitalsError};
use crate::index::{index_reports, ListedReport, ReportSelector};
use crate::store::ReportStore;
use uuid::Uuid;

pub fn indexed_reports<S: ReportStore>(store: &S) -> Result<Vec<ListedReport>> {
    let reports = store.list_reports()?;
    Ok(index_reports(reports))
}

pub fn resolve_selectors<S: ReportStore>(
    store: &S,
    selectors: &[ReportSelector],
) -> Result<Vec<(ReportSelector, Uuid)>> {
    let indexed = indexed_reports(store)?;

    selectors
        .iter()
        .map(|selector| {
            indexed
                .iter()
                .find(|lr| match selector {
                    ReportSelector::Position(n) => lr.position == *n,
                    ReportSelector::Id(id) => lr.report.id == *id,
                })
                .map(|lr| (selector.clone(), lr.report.id))
                .ok_or_else(|| VitalsError::Api(format!("No report matches '{}'", selector)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn resolves_positions_newest_first() {
        let fixture = StoreFixture::new().with_report("old").with_report("new");
        let resolved =
            resolve_selectors(&fixture.store, &[ReportSelector::Position(1)]).unwrap();

        let newest = fixture.store.list_reports().unwrap()[0].clone();
        assert_eq!(resolved[0].1, newest.id);
        assert_eq!(newest.title, "new");
    }

    #[test]
    fn unknown_selector_is_an_api_error() {
        let fixture = StoreFixture::new().with_reports(1);
        let err = resolve_selectors(&fixture.store, &[ReportSelector::Position(5)]);
        assert!(matches!(err, Err(VitalsError::Api(_))));
    }
}
