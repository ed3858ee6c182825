use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vitals")]
#[command(about = "Browse and manage vital-sign measurement reports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the reports directory (also: VITALS_DATA_DIR)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List stored reports, newest first
    #[command(alias = "ls")]
    List,

    /// Add an existing PDF file to the history
    Import {
        /// Path to the PDF file
        path: PathBuf,

        /// Title for the report (defaults to the file name)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Download a prepared report and store it
    Fetch {
        /// URL of the prepared report
        url: String,

        /// Title for the report (defaults to "Vital Result – <date>")
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Print the on-disk path of one or more reports
    Path {
        /// List positions or report ids (e.g. 1 2)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Delete one or more reports
    #[command(alias = "rm")]
    Delete {
        /// List positions or report ids (e.g. 1 2)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Delete every stored report
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Check and repair store consistency
    Doctor,

    /// Show or set configuration (language, user-id, api-key)
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}
