use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ReportStore;
use std::fs;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Add an existing PDF file to the store. The title defaults to the
/// file stem when the caller supplies none.
pub fn run<S: ReportStore>(
    store: &mut S,
    path: &Path,
    title: Option<String>,
) -> Result<CmdResult> {
    let data = fs::read(path)?;

    let title = title.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    });

    let mut result = CmdResult::default();
    if !data.starts_with(PDF_MAGIC) {
        result.add_message(CmdMessage::warning(format!(
            "{} does not look like a PDF; storing it anyway",
            path.display()
        )));
    }

    let report = store.add_report(&data, &title)?;
    result.add_message(CmdMessage::success(format!(
        "Imported: {}",
        report.title
    )));
    result.affected_reports.push(report);
    Ok(result)
}
