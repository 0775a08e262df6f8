//! Reading and writing the plan file.
//!
//! The plan lives in a single pretty-printed JSON file inside the output
//! directory. Loading never fails hard: a missing or unreadable file is
//! reported through [`LoadOutcome`] and the caller decides what to fall
//! back to, so a corrupt file can never brick the program.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::plan::Plan;

/// Directory under `$HOME` that holds the data file and rendered charts.
pub const OUTPUT_DIR_NAME: &str = "gantt_outputs";

/// File name of the JSON plan store.
pub const DATA_FILE_NAME: &str = "gantt_data.json";

/// File name of the rendered chart.
pub const CHART_FILE_NAME: &str = "gantt_chart_2026.svg";

/// Failure while reading or writing the plan file.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::Serialize(err) => write!(f, "serialization error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// What [`load_plan`] found on disk. A status value rather than a plain
/// `Result`, because a missing file is a normal first run and a broken file
/// is survivable; only the caller knows what to say about each.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file existed and parsed.
    Loaded(Plan),
    /// No file at the path yet.
    Missing,
    /// The file exists but could not be read or parsed.
    Invalid(StorageError),
}

/// Load the plan from `path` without ever raising.
pub fn load_plan(path: &Path) -> LoadOutcome {
    if !path.exists() {
        return LoadOutcome::Missing;
    }
    let mut buf = String::new();
    if let Err(e) = File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
        return LoadOutcome::Invalid(e.into());
    }
    match serde_json::from_str::<Plan>(&buf) {
        Ok(plan) => LoadOutcome::Loaded(plan),
        Err(e) => LoadOutcome::Invalid(e.into()),
    }
}

/// Save the plan to `path`, creating parent directories as needed.
pub fn save_plan(path: &Path, plan: &Plan) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(plan)?;
    // Atomic-ish write via temp + rename.
    let tmp = path.with_extension("json.tmp");
    let mut f = File::create(&tmp)?;
    f.write_all(data.as_bytes())?;
    f.flush()?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// The default output directory, `$HOME/gantt_outputs`. `None` when the
/// environment has no home directory to anchor it to.
pub fn default_output_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(OUTPUT_DIR_NAME))
}
