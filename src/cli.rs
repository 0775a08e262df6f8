use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Menu-driven Gantt chart manager.
/// Data lives under ~/gantt_outputs or a directory passed via --dir.
#[derive(Parser)]
#[command(name = "gantt", version, about = "Menu-driven Gantt chart manager")]
pub struct Cli {
    /// Directory holding the data file and rendered charts.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
