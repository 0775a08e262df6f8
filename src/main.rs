//! Command-line entry point for the Gantt chart manager.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use gantt_manager::cli::Cli;
use gantt_manager::cmd::{self, Commands};
use gantt_manager::storage;

fn main() {
    let cli = Cli::parse();

    // Determine the output directory and make sure it exists up front,
    // the way the data file readers and the renderer expect.
    let dir = match cli.dir {
        Some(dir) => dir,
        None => storage::default_output_dir()
            .unwrap_or_else(|| PathBuf::from(".").join(storage::OUTPUT_DIR_NAME)),
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Failed to create output directory {}: {e}", dir.display());
        process::exit(1);
    }

    let data_path = dir.join(storage::DATA_FILE_NAME);
    let chart_path = dir.join(storage::CHART_FILE_NAME);

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => cmd::cmd_menu(&data_path, &chart_path),
        Commands::Show => cmd::cmd_show(&data_path),
        Commands::Render { output } => {
            let chart_path = output.unwrap_or(chart_path);
            cmd::cmd_render(&data_path, &chart_path);
        }
        Commands::Completions { shell } => cmd::cmd_completions(shell),
    }
}
