use chrono::{DateTime, Local, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use log::LevelFilter;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;
use vitals::acquire::HttpFetcher;
use vitals::api::VitalsApi;
use vitals::commands::config::ConfigAction;
use vitals::commands::{CmdMessage, MessageLevel};
use vitals::config::Language;
use vitals::error::Result;
use vitals::index::ListedReport;
use vitals::store::fs::FileStore;

mod args;
use args::{Cli, Commands};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: VitalsApi<FileStore>,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Import { path, title }) => handle_import(&mut ctx, path, title),
        Some(Commands::Fetch { url, title }) => handle_fetch(&mut ctx, url, title).await,
        Some(Commands::Path { selectors }) => handle_paths(&ctx, selectors),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, selectors),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::List) | None => handle_list(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => match std::env::var_os("VITALS_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let proj_dirs = ProjectDirs::from("com", "vitals", "vitals")
                    .expect("Could not determine data dir");
                proj_dirs.data_dir().join("reports")
            }
        },
    };

    let store = FileStore::open(&data_dir)?;
    let api = VitalsApi::new(store, data_dir);
    Ok(AppContext { api })
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_reports()?;
    print_reports(&result.listed_reports);
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf, title: Option<String>) -> Result<()> {
    let result = ctx.api.import_report(&path, title)?;
    print_messages(&result.messages);
    Ok(())
}

async fn handle_fetch(ctx: &mut AppContext, url: String, title: Option<String>) -> Result<()> {
    let title = title.unwrap_or_else(default_report_title);
    let fetcher = HttpFetcher::new()?;
    let result = ctx.api.fetch_report(&fetcher, &url, &title).await?;
    print_messages(&result.messages);
    Ok(())
}

fn default_report_title() -> String {
    format!("Vital Result – {}", Local::now().format("%b %e, %Y %H:%M"))
}

fn handle_paths(ctx: &AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.report_paths(&selectors)?;
    for path in &result.report_paths {
        println!("{}", path.display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_reports(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    let result = ctx.api.clear_reports(yes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.as_deref(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some("language"), None) => ConfigAction::ShowKey("language".to_string()),
        (Some("language"), Some(v)) => ConfigAction::SetLanguage(v.parse::<Language>()?),
        (Some("user-id"), None) => ConfigAction::ShowKey("user-id".to_string()),
        (Some("user-id"), Some(v)) => ConfigAction::SetUserId(v),
        (Some("api-key"), None) => ConfigAction::ShowKey("api-key".to_string()),
        (Some("api-key"), Some(v)) => ConfigAction::SetApiKey(v),
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
            return Ok(());
        }
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        // ShowAll: no per-key message was produced
        if let Some(config) = &result.config {
            println!("language = {}", config.language);
            println!("user-id = {}", config.user_id);
            println!(
                "api-key = {}",
                config.api_key.as_deref().unwrap_or("<unset>")
            );
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_reports(reports: &[ListedReport]) {
    if reports.is_empty() {
        println!("No scan history found.");
        return;
    }

    for lr in reports {
        let idx_str = format!("{}. ", lr.position);
        let time_ago = format_time_ago(lr.report.created_at);

        let fixed_width = 4 + idx_str.width() + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let title_display = truncate_to_width(&lr.report.title, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "    {}{}{}  {}",
            idx_str,
            title_display,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

fn format_time_ago(created_at: DateTime<Utc>) -> String {
    let elapsed = Utc::now()
        .signed_duration_since(created_at)
        .to_std()
        .unwrap_or_default();
    timeago::Formatter::new().convert(elapsed)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
