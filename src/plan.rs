//! The in-memory plan: categories of tasks, and every operation that edits them.
//!
//! This module is the core of the crate. `Plan` owns an ordered list of
//! categories, each owning an ordered list of tasks; that order drives both
//! menu numbering and chart row order, so it is part of the data contract.
//! All mutation goes through the methods here, which validate inputs up
//! front and leave the plan untouched on failure.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Date format accepted for task starts.
pub const START_DATE_FORMAT: &str = "%Y-%m-%d";

/// Start date applied when a new task is added without one.
pub const DEFAULT_TASK_START: &str = "2026-01-01";

/// Duration in days applied when a new task is added without one.
pub const DEFAULT_TASK_DURATION: i64 = 60;

/// A single bar on the chart: a named unit of work with a start date and a
/// duration in days.
///
/// `start` is stored as the validated `YYYY-MM-DD` string rather than a
/// parsed date so the persisted file round-trips the exact bytes the user
/// entered. `duration` accepts any integer, zero and negative included;
/// that looseness is inherited behaviour and callers rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub start: String,
    pub duration: i64,
}

impl Task {
    /// Parse the stored start string back into a date.
    ///
    /// Stored starts were validated on write, so this only fails for data
    /// that was edited outside the program.
    pub fn start_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.start, START_DATE_FORMAT)
    }
}

/// A named grouping of tasks, unique by name within the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub tasks: Vec<Task>,
}

/// Why a plan operation was refused. The plan is unchanged whenever one of
/// these is returned (edits excepted; see [`Plan::edit_task`]).
#[derive(Debug)]
pub enum PlanError {
    /// A category or task name was blank or whitespace-only.
    EmptyName,
    /// A category with this name already exists.
    DuplicateName(String),
    /// A category or task index fell outside the current enumeration.
    InvalidIndex,
    /// The category holds no tasks, so there is nothing to address.
    EmptyCategory(String),
    /// The start input did not parse as a `YYYY-MM-DD` date.
    InvalidDate(String),
    /// The duration input did not parse as an integer.
    InvalidDuration(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::EmptyName => write!(f, "name cannot be empty"),
            PlanError::DuplicateName(name) => write!(f, "category '{name}' already exists"),
            PlanError::InvalidIndex => write!(f, "number out of range"),
            PlanError::EmptyCategory(name) => write!(f, "no tasks in '{name}'"),
            PlanError::InvalidDate(input) => {
                write!(f, "invalid date '{input}' (expected YYYY-MM-DD)")
            }
            PlanError::InvalidDuration(input) => {
                write!(f, "invalid duration '{input}' (expected a whole number of days)")
            }
        }
    }
}

impl std::error::Error for PlanError {}

/// Result of editing one field of a task.
#[derive(Debug)]
pub enum FieldEdit {
    /// No new value supplied; the field keeps its old value.
    Kept,
    /// The new value validated and was applied.
    Updated,
    /// The new value was rejected; the field keeps its old value.
    Rejected(PlanError),
}

/// Per-field report from [`Plan::edit_task`]. One field may update while the
/// other is rejected; the edit as a whole still counts as completed.
#[derive(Debug)]
pub struct EditOutcome {
    pub start: FieldEdit,
    pub duration: FieldEdit,
}

/// The whole data set: an ordered list of categories, each with its ordered
/// tasks. Vec position is enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    categories: Vec<Category>,
}

impl Plan {
    /// An empty plan with no categories.
    pub fn new() -> Self {
        Plan { categories: Vec::new() }
    }

    /// The built-in starter plan: six categories with three tasks each.
    /// Used whenever no data file exists yet.
    pub fn seed() -> Self {
        fn t(name: &str, start: &str, duration: i64) -> Task {
            Task { name: name.to_string(), start: start.to_string(), duration }
        }
        fn cat(name: &str, tasks: Vec<Task>) -> Category {
            Category { name: name.to_string(), tasks }
        }
        Plan {
            categories: vec![
                cat("Models Page", vec![
                    t("A1: Subcategory 1", "2026-01-01", 60),
                    t("A2: Subcategory 2", "2026-02-15", 90),
                    t("A3: Subcategory 3", "2026-04-01", 120),
                ]),
                cat("Scheme It", vec![
                    t("B1: Subcategory 1", "2026-01-15", 75),
                    t("B2: Subcategory 2", "2026-03-01", 100),
                    t("B3: Subcategory 3", "2026-05-15", 90),
                ]),
                cat("Compare Page", vec![
                    t("C1: Subcategory 1", "2026-02-01", 80),
                    t("C2: Subcategory 2", "2026-04-15", 85),
                    t("C3: Subcategory 3", "2026-07-01", 120),
                ]),
                cat("XREF", vec![
                    t("D1: Subcategory 1", "2026-01-20", 95),
                    t("D2: Subcategory 2", "2026-05-01", 110),
                    t("D3: Subcategory 3", "2026-08-01", 90),
                ]),
                cat("RDL", vec![
                    t("E1: Subcategory 1", "2026-03-15", 70),
                    t("E2: Subcategory 2", "2026-06-01", 95),
                    t("E3: Subcategory 3", "2026-09-01", 100),
                ]),
                cat("Calculators", vec![
                    t("F1: Subcategory 1", "2026-02-15", 85),
                    t("F2: Subcategory 2", "2026-05-15", 105),
                    t("F3: Subcategory 3", "2026-10-01", 92),
                ]),
            ],
        }
    }

    /// Categories in enumeration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when the plan has no categories at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    fn category_mut(&mut self, index: usize) -> Result<&mut Category, PlanError> {
        self.categories.get_mut(index).ok_or(PlanError::InvalidIndex)
    }

    /// Resolve a task position inside a category, refusing empty categories
    /// before checking the task index.
    fn task_mut(&mut self, category: usize, task: usize) -> Result<&mut Task, PlanError> {
        let cat = self.category_mut(category)?;
        if cat.tasks.is_empty() {
            return Err(PlanError::EmptyCategory(cat.name.clone()));
        }
        cat.tasks.get_mut(task).ok_or(PlanError::InvalidIndex)
    }

    /// Append a new empty category at the end of enumeration order.
    pub fn add_category(&mut self, name: &str) -> Result<(), PlanError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::EmptyName);
        }
        if self.contains(name) {
            return Err(PlanError::DuplicateName(name.to_string()));
        }
        self.categories.push(Category { name: name.to_string(), tasks: Vec::new() });
        Ok(())
    }

    /// Rename the category at `index`, keeping its tasks intact.
    ///
    /// The renamed category moves to the end of enumeration order: in the
    /// JSON object on disk a rename is a key replacement, and a replaced
    /// key lands last. Users rely on this; do not "fix" it to rename in
    /// place. Renaming a category to its own current name also moves it.
    pub fn rename_category(&mut self, index: usize, new_name: &str) -> Result<(), PlanError> {
        let new_name = new_name.trim();
        if index >= self.categories.len() {
            return Err(PlanError::InvalidIndex);
        }
        if new_name.is_empty() {
            return Err(PlanError::EmptyName);
        }
        if new_name != self.categories[index].name && self.contains(new_name) {
            return Err(PlanError::DuplicateName(new_name.to_string()));
        }
        let mut cat = self.categories.remove(index);
        cat.name = new_name.to_string();
        self.categories.push(cat);
        Ok(())
    }

    /// Remove the category at `index` together with all its tasks.
    pub fn delete_category(&mut self, index: usize) -> Result<Category, PlanError> {
        if index >= self.categories.len() {
            return Err(PlanError::InvalidIndex);
        }
        Ok(self.categories.remove(index))
    }

    /// Append a task to the category at `index`.
    ///
    /// `start` and `duration` are raw user inputs; `None` (the blank prompt
    /// answer) fills in [`DEFAULT_TASK_START`] and [`DEFAULT_TASK_DURATION`].
    /// Validation failures abandon the add entirely.
    pub fn add_task(
        &mut self,
        index: usize,
        name: &str,
        start: Option<&str>,
        duration: Option<&str>,
    ) -> Result<(), PlanError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::EmptyName);
        }
        let start = match start {
            Some(input) => {
                check_start(input)?;
                input.trim().to_string()
            }
            None => DEFAULT_TASK_START.to_string(),
        };
        let duration = match duration {
            Some(input) => parse_duration(input)?,
            None => DEFAULT_TASK_DURATION,
        };
        let cat = self.category_mut(index)?;
        cat.tasks.push(Task { name: name.to_string(), start, duration });
        Ok(())
    }

    /// Rename the task at (`category`, `task`); its position is unchanged.
    pub fn rename_task(
        &mut self,
        category: usize,
        task: usize,
        new_name: &str,
    ) -> Result<(), PlanError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(PlanError::EmptyName);
        }
        let slot = self.task_mut(category, task)?;
        slot.name = new_name.to_string();
        Ok(())
    }

    /// Remove the task at (`category`, `task`); later tasks shift down one
    /// enumeration position.
    pub fn delete_task(&mut self, category: usize, task: usize) -> Result<Task, PlanError> {
        let cat = self.category_mut(category)?;
        if cat.tasks.is_empty() {
            return Err(PlanError::EmptyCategory(cat.name.clone()));
        }
        if task >= cat.tasks.len() {
            return Err(PlanError::InvalidIndex);
        }
        Ok(cat.tasks.remove(task))
    }

    /// Update the start date and/or duration of a task.
    ///
    /// Each supplied field is validated on its own: a rejected value leaves
    /// that field unchanged while the other may still apply. Structural
    /// failures (bad indices, empty category) reject the whole edit.
    pub fn edit_task(
        &mut self,
        category: usize,
        task: usize,
        new_start: Option<&str>,
        new_duration: Option<&str>,
    ) -> Result<EditOutcome, PlanError> {
        let slot = self.task_mut(category, task)?;
        let start = match new_start {
            None => FieldEdit::Kept,
            Some(input) => match check_start(input) {
                Ok(()) => {
                    slot.start = input.trim().to_string();
                    FieldEdit::Updated
                }
                Err(e) => FieldEdit::Rejected(e),
            },
        };
        let duration = match new_duration {
            None => FieldEdit::Kept,
            Some(input) => match parse_duration(input) {
                Ok(days) => {
                    slot.duration = days;
                    FieldEdit::Updated
                }
                Err(e) => FieldEdit::Rejected(e),
            },
        };
        Ok(EditOutcome { start, duration })
    }
}

impl Default for Plan {
    fn default() -> Self {
        Plan::new()
    }
}

/// Validate a start input as a real `YYYY-MM-DD` date.
pub(crate) fn check_start(input: &str) -> Result<(), PlanError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, START_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| PlanError::InvalidDate(trimmed.to_string()))
}

/// Parse a duration input. Any integer passes, negative values included;
/// only non-numeric input is rejected.
fn parse_duration(input: &str) -> Result<i64, PlanError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| PlanError::InvalidDuration(trimmed.to_string()))
}

// The persisted file is a JSON object keyed by category name, in category
// order, each value being the task array. Serializing the Vec through a map
// keeps that shape (and its ordering) without an extra map type.
impl Serialize for Plan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for cat in &self.categories {
            map.serialize_entry(&cat.name, &cat.tasks)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Plan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlanVisitor;

        impl<'de> Visitor<'de> for PlanVisitor {
            type Value = Plan;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to task list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Plan, A::Error> {
                let mut categories: Vec<Category> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, tasks)) = access.next_entry::<String, Vec<Task>>()? {
                    // A hand-edited file may repeat a key; keep the last
                    // value at the first occurrence's position so category
                    // names stay unique after every load.
                    match categories.iter_mut().find(|c| c.name == name) {
                        Some(existing) => existing.tasks = tasks,
                        None => categories.push(Category { name, tasks }),
                    }
                }
                Ok(Plan { categories })
            }
        }

        deserializer.deserialize_map(PlanVisitor)
    }
}
