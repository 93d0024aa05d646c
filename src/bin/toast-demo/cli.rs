use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Drive the storefront toast manager from a script on stdin",
    long_about = None
)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep every toast until it is clicked or dismissed.
    #[arg(long, action = ArgAction::SetTrue)]
    pub sticky: bool,

    /// Print lifecycle events as JSON lines.
    #[arg(long, action = ArgAction::SetTrue)]
    pub events: bool,

    /// Print the markup of every mounted toast.
    #[arg(long, action = ArgAction::SetTrue)]
    pub markup: bool,

    /// JSON log output (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter, e.g. "storefront_toast=debug".
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
