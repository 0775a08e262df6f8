//! Command implementations for the CLI interface.
//!
//! Thin handlers that wire the persistence layer, the menu, and the
//! renderer together. Each one loads with the same seed-fallback policy
//! the menu uses, so one-shot invocations and interactive sessions see
//! the data identically.

use std::path::{Path, PathBuf};
use std::process;

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::menu;
use crate::plan::Plan;
use crate::storage::{self, LoadOutcome};

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (default when no command is given).
    Menu,

    /// Print the current project structure and exit.
    Show,

    /// Render the Gantt chart without entering the menu.
    Render {
        /// Output file path (default: gantt_chart_2026.svg in the data directory).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Load the plan, falling back to the built-in seed when there is no file
/// yet or the file cannot be used. Loaded data gets a checkmark, a broken
/// file gets a warning, a missing file is a normal first run and says
/// nothing.
pub fn load_or_seed(data_path: &Path) -> Plan {
    match storage::load_plan(data_path) {
        LoadOutcome::Loaded(plan) => {
            println!("✓ Loaded existing project data");
            plan
        }
        LoadOutcome::Missing => Plan::seed(),
        LoadOutcome::Invalid(e) => {
            println!("Error loading data: {e}. Using default data.");
            Plan::seed()
        }
    }
}

/// Run the interactive menu over stdin.
pub fn cmd_menu(data_path: &Path, chart_path: &Path) {
    let mut plan = load_or_seed(data_path);
    let stdin = std::io::stdin();
    menu::run_menu(stdin.lock(), &mut plan, data_path, chart_path);
}

/// Print the current structure and exit.
pub fn cmd_show(data_path: &Path) {
    let plan = load_or_seed(data_path);
    menu::print_structure(&plan);
}

/// Render the chart once; exits non-zero when nothing was written.
pub fn cmd_render(data_path: &Path, chart_path: &Path) {
    let plan = load_or_seed(data_path);
    if !menu::generate_chart_report(&plan, chart_path) {
        process::exit(1);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
