use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::ReportSelector;
use crate::store::ReportStore;

use super::helpers::resolve_selectors;

pub fn run<S: ReportStore>(store: &S, selectors: &[ReportSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut paths = Vec::with_capacity(resolved.len());
    for (_, id) in resolved {
        paths.push(store.report_path(&id)?);
    }
    Ok(CmdResult::default().with_report_paths(paths))
}
