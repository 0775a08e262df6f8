//! # Gantt Chart Manager
//!
//! A menu-driven planner that keeps a small hierarchy of categories and
//! tasks in a local JSON file and renders it as an SVG Gantt chart.
//!
//! ## Key Features
//!
//! - **Interactive Menu**: Numbered-choice editing of categories and tasks,
//!   with every change saved immediately
//! - **Local File Storage**: One human-diffable JSON file that round-trips
//!   category and task order exactly
//! - **SVG Timeline Export**: A one-year Gantt chart with per-category
//!   colors and a legend
//! - **Safe Loading**: A missing or corrupt data file falls back to the
//!   built-in starter plan instead of crashing
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the interactive menu (the default)
//! gantt
//!
//! # Print the current structure without entering the menu
//! gantt show
//!
//! # Render the chart straight to a file
//! gantt render -o roadmap.svg
//!
//! # Keep the data somewhere else
//! gantt --dir ./planning menu
//! ```
//!
//! Data is stored in `~/gantt_outputs/gantt_data.json`; rendered charts
//! land next to it as `gantt_chart_2026.svg`.

pub mod cli;
pub mod cmd;
pub mod menu;
pub mod plan;
pub mod render;
pub mod storage;

pub use plan::{Category, EditOutcome, FieldEdit, Plan, PlanError, Task};
pub use storage::{load_plan, save_plan, LoadOutcome, StorageError};
