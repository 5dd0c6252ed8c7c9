use std::path::PathBuf;

use clap::{value_parser, Args, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::model::TaskStatus;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklist",
    version,
    about = "Fetch a todo list and manage it in a keyboard-first table.",
    after_help = "Examples:\n  tasklist                      Launch the TUI (same as `tasklist tui`)\n  tasklist --page-size 50\n  tasklist list --status done --search aut\n  tasklist --source-file todos.json list --json"
)]
pub struct Cli {
    /// Override the data directory used for the log file
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Todo list endpoint (defaults to TASKLIST_ENDPOINT or the public placeholder API)
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Read the todo list from a local JSON file instead of the endpoint
    #[arg(long = "source-file", value_name = "PATH", global = true)]
    pub source_file: Option<PathBuf>,

    /// Request timeout for the initial load (seconds)
    #[arg(long = "timeout", value_name = "SECONDS", global = true, value_parser = value_parser!(u64))]
    pub timeout_secs: Option<u64>,

    /// Rows per table page (10, 20, 50 or 100)
    #[arg(long = "page-size", value_name = "ROWS", global = true, value_parser = value_parser!(usize))]
    pub page_size: Option<usize>,

    /// How long confirmation toasts stay visible (seconds)
    #[arg(long = "toast-secs", value_name = "SECONDS", global = true, value_parser = value_parser!(u64))]
    pub toast_secs: Option<u64>,

    /// Override the tracing filter (e.g. "debug" or "info,tasklist_core=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            endpoint: self.endpoint.clone(),
            source_file: self.source_file.clone(),
            timeout_secs: self.timeout_secs,
            page_size: self.page_size,
            toast_secs: self.toast_secs,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the terminal UI (default command)
    Tui,
    /// Load the todo list once and print it
    List(ListArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Keep tasks whose title or description contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Keep tasks with this status
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    /// Emit JSON instead of a plain table
    #[arg(long)]
    pub json: bool,
}
