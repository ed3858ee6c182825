use crate::acquire::ReportFetcher;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ReportStore;

/// Download a prepared report over HTTP and store it.
pub async fn run<S: ReportStore>(
    store: &mut S,
    fetcher: &dyn ReportFetcher,
    url: &str,
    title: &str,
) -> Result<CmdResult> {
    let tmp = fetcher.download(url).await?;
    let report = store.add_report_from_file(tmp.path(), title)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Saved: {}", report.title)));
    result.affected_reports.push(report);
    Ok(result)
}
