use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ReportStore;
use std::io::{self, Write};

/// Delete every stored report, with an interactive confirmation unless
/// `skip_confirm` is set.
pub fn run<S: ReportStore>(store: &mut S, skip_confirm: bool) -> Result<CmdResult> {
    if store.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No reports to remove."));
        return Ok(res);
    }

    if !skip_confirm {
        let count = store.list_reports()?.len();
        println!("This will permanently remove {} report(s).", count);
        print!("[Y] To delete: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if input.trim() != "Y" {
            let mut res = CmdResult::default();
            res.add_message(CmdMessage::info("Operation cancelled."));
            return Ok(res);
        }
    }

    let removed = store.delete_all()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed {} report(s).",
        removed
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn clears_everything() {
        let fixture = StoreFixture::new().with_reports(3);
        let mut store = fixture.store;

        let result = run(&mut store, true).unwrap();
        assert!(store.is_empty());
        assert!(result.messages[0].content.contains("Removed 3"));
    }

    #[test]
    fn empty_store_is_reported() {
        let fixture = StoreFixture::new();
        let mut store = fixture.store;

        let result = run(&mut store, true).unwrap();
        assert!(result.messages[0].content.contains("No reports"));
    }
}
