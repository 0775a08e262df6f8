//! The interactive menu.
//!
//! A plain numbered-choice loop over stdin. Every action re-prints the
//! current structure, prompts for what it needs, applies the change through
//! [`Plan`], and the loop saves after each completed mutation. Input comes
//! through any `BufRead`, so tests drive the whole surface with scripted
//! cursors.
//!
//! Prompt and status wording is part of the user contract here; people
//! pipe this tool and grep its output, so messages change only
//! deliberately.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::plan::{
    check_start, FieldEdit, Plan, PlanError, DEFAULT_TASK_DURATION, DEFAULT_TASK_START,
};
use crate::render;
use crate::storage;

/// Run the menu loop until the user exits or input ends.
///
/// `data_path` is where mutations are saved; `chart_path` is where choice 9
/// renders to. The plan is mutated in place so callers can inspect the
/// final state.
pub fn run_menu<R: BufRead>(
    mut input: R,
    plan: &mut Plan,
    data_path: &Path,
    chart_path: &Path,
) {
    loop {
        print_banner();
        let Some(choice) = prompt(&mut input, "Enter your choice: ") else {
            break;
        };
        let mutated = match choice.trim() {
            "1" => {
                print_structure(plan);
                false
            }
            "2" => run_add_category(&mut input, plan),
            "3" => run_delete_category(&mut input, plan),
            "4" => run_rename_category(&mut input, plan),
            "5" => run_add_task(&mut input, plan),
            "6" => run_delete_task(&mut input, plan),
            "7" => run_rename_task(&mut input, plan),
            "8" => run_edit_task(&mut input, plan),
            "9" => {
                generate_chart_report(plan, chart_path);
                false
            }
            "0" => {
                println!("\nExiting program. Goodbye!");
                break;
            }
            _ => {
                println!("✗ Invalid choice. Please try again.");
                false
            }
        };
        if mutated {
            save_and_report(plan, data_path);
        }
    }
}

fn print_banner() {
    let bar = "=".repeat(70);
    println!("\n{bar}");
    println!("GANTT CHART MANAGER - MAIN MENU");
    println!("{bar}");
    println!("1. View current project structure");
    println!("2. Add category");
    println!("3. Delete category");
    println!("4. Rename category");
    println!("5. Add task");
    println!("6. Delete task");
    println!("7. Rename task");
    println!("8. Edit task details (date/duration)");
    println!("9. Generate Gantt chart");
    println!("0. Exit");
    println!("{bar}");
}

/// Print the numbered category/task listing shown before every edit.
pub fn print_structure(plan: &Plan) {
    let bar = "=".repeat(70);
    println!("\n{bar}");
    println!("CURRENT PROJECT STRUCTURE");
    println!("{bar}");
    for (idx, cat) in plan.categories().iter().enumerate() {
        println!("\n[{}] {}", idx + 1, cat.name);
        for (task_idx, task) in cat.tasks.iter().enumerate() {
            println!(
                "    [{}] {} | Start: {} | Duration: {} days",
                task_idx + 1,
                task.name,
                task.start,
                task.duration
            );
        }
    }
    println!("{bar}");
}

/// Render the chart and report in the menu's voice. Returns whether a chart
/// was written; the one-shot CLI path uses that for its exit status.
pub fn generate_chart_report(plan: &Plan, chart_path: &Path) -> bool {
    if plan.is_empty() {
        println!("✗ No categories to display");
        return false;
    }
    match render::render_chart(plan, chart_path) {
        Ok(()) => {
            println!("\n✓ Gantt chart saved to: {}", chart_path.display());
            true
        }
        Err(e) => {
            println!("✗ Error generating Gantt chart: {e}");
            false
        }
    }
}

fn save_and_report(plan: &Plan, data_path: &Path) {
    match storage::save_plan(data_path, plan) {
        Ok(()) => println!("✓ Data saved successfully"),
        Err(e) => println!("Error saving data: {e}"),
    }
}

/// Print `text`, then read one line. `None` means end of input.
fn prompt<R: BufRead>(input: &mut R, text: &str) -> Option<String> {
    print!("{text}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }
            Some(line)
        }
    }
}

/// Prompt for a 1-based position and return it 0-based. `None` covers
/// cancellation (`0`), unparseable or out-of-range input (reported here),
/// and end of input.
fn prompt_index<R: BufRead>(
    input: &mut R,
    text: &str,
    len: usize,
    noun: &str,
) -> Option<usize> {
    let line = prompt(input, text)?;
    let value: i64 = match line.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            println!("✗ Invalid input");
            return None;
        }
    };
    if value == 0 {
        return None;
    }
    // Range-checked in i64 space; a cast before the check would truncate
    // on 32-bit targets.
    if value >= 1 && value <= len as i64 {
        Some(value as usize - 1)
    } else {
        println!("✗ Invalid {noun} number");
        None
    }
}

/// Ask a `(y/n)` question; only a bare `y` (any case) counts as consent.
fn confirm<R: BufRead>(input: &mut R, text: &str) -> bool {
    matches!(prompt(input, text), Some(line) if line.eq_ignore_ascii_case("y"))
}

fn run_add_category<R: BufRead>(input: &mut R, plan: &mut Plan) -> bool {
    println!("\n--- ADD NEW CATEGORY ---");
    let Some(name) = prompt(input, "Enter category name: ") else {
        return false;
    };
    match plan.add_category(&name) {
        Ok(()) => {
            println!("✓ Category '{}' added successfully", name.trim());
            true
        }
        Err(PlanError::EmptyName) => {
            println!("✗ Category name cannot be empty");
            false
        }
        Err(PlanError::DuplicateName(n)) => {
            println!("✗ Category '{n}' already exists");
            false
        }
        Err(e) => {
            println!("✗ {e}");
            false
        }
    }
}

fn run_delete_category<R: BufRead>(input: &mut R, plan: &mut Plan) -> bool {
    print_structure(plan);
    println!("\n--- DELETE CATEGORY ---");
    let Some(ci) = prompt_index(
        input,
        "Enter category number to delete (0 to cancel): ",
        plan.len(),
        "category",
    ) else {
        return false;
    };
    let name = plan.categories()[ci].name.clone();
    if !confirm(input, &format!("Delete '{name}' and all its tasks? (y/n): ")) {
        return false;
    }
    match plan.delete_category(ci) {
        Ok(removed) => {
            println!("✓ Category '{}' deleted", removed.name);
            true
        }
        Err(e) => {
            println!("✗ {e}");
            false
        }
    }
}

fn run_rename_category<R: BufRead>(input: &mut R, plan: &mut Plan) -> bool {
    print_structure(plan);
    println!("\n--- RENAME CATEGORY ---");
    let Some(ci) = prompt_index(
        input,
        "Enter category number to rename (0 to cancel): ",
        plan.len(),
        "category",
    ) else {
        return false;
    };
    let old_name = plan.categories()[ci].name.clone();
    let Some(new_name) = prompt(input, &format!("Enter new name for '{old_name}': ")) else {
        return false;
    };
    match plan.rename_category(ci, &new_name) {
        Ok(()) => {
            println!("✓ Category renamed from '{old_name}' to '{}'", new_name.trim());
            true
        }
        Err(PlanError::EmptyName) => {
            println!("✗ Name cannot be empty");
            false
        }
        Err(PlanError::DuplicateName(n)) => {
            println!("✗ Category '{n}' already exists");
            false
        }
        Err(e) => {
            println!("✗ {e}");
            false
        }
    }
}

fn run_add_task<R: BufRead>(input: &mut R, plan: &mut Plan) -> bool {
    print_structure(plan);
    println!("\n--- ADD TASK ---");
    let Some(ci) = prompt_index(
        input,
        "Enter category number (0 to cancel): ",
        plan.len(),
        "category",
    ) else {
        return false;
    };
    let cat_name = plan.categories()[ci].name.clone();

    let Some(name) = prompt(input, "Enter task name: ") else {
        return false;
    };
    if name.trim().is_empty() {
        println!("✗ Task name cannot be empty");
        return false;
    }

    let Some(start_line) = prompt(
        input,
        &format!("Enter start date (YYYY-MM-DD) [default: {DEFAULT_TASK_START}]: "),
    ) else {
        return false;
    };
    let start_line = start_line.trim().to_string();
    let start = (!start_line.is_empty()).then_some(start_line.as_str());
    // Bad dates abort before the duration prompt is ever shown.
    if let Some(s) = start {
        if check_start(s).is_err() {
            println!("✗ Invalid date format. Use YYYY-MM-DD");
            return false;
        }
    }

    let Some(dur_line) = prompt(
        input,
        &format!("Enter duration in days [default: {DEFAULT_TASK_DURATION}]: "),
    ) else {
        return false;
    };
    let dur_line = dur_line.trim().to_string();
    let duration = (!dur_line.is_empty()).then_some(dur_line.as_str());

    match plan.add_task(ci, &name, start, duration) {
        Ok(()) => {
            println!("✓ Task '{}' added to '{cat_name}'", name.trim());
            true
        }
        Err(PlanError::InvalidDuration(_)) => {
            println!("✗ Invalid input");
            false
        }
        Err(e) => {
            println!("✗ {e}");
            false
        }
    }
}

fn run_delete_task<R: BufRead>(input: &mut R, plan: &mut Plan) -> bool {
    print_structure(plan);
    println!("\n--- DELETE TASK ---");
    let Some(ci) = prompt_index(
        input,
        "Enter category number (0 to cancel): ",
        plan.len(),
        "category",
    ) else {
        return false;
    };
    let (cat_name, count) = {
        let cat = &plan.categories()[ci];
        (cat.name.clone(), cat.tasks.len())
    };
    if count == 0 {
        println!("✗ No tasks in '{cat_name}'");
        return false;
    }
    let Some(ti) = prompt_index(
        input,
        &format!("Enter task number to delete (1-{count}, 0 to cancel): "),
        count,
        "task",
    ) else {
        return false;
    };
    let task_name = plan.categories()[ci].tasks[ti].name.clone();
    if !confirm(input, &format!("Delete '{task_name}'? (y/n): ")) {
        return false;
    }
    match plan.delete_task(ci, ti) {
        Ok(removed) => {
            println!("✓ Task '{}' deleted", removed.name);
            true
        }
        Err(e) => {
            println!("✗ {e}");
            false
        }
    }
}

fn run_rename_task<R: BufRead>(input: &mut R, plan: &mut Plan) -> bool {
    print_structure(plan);
    println!("\n--- RENAME TASK ---");
    let Some(ci) = prompt_index(
        input,
        "Enter category number (0 to cancel): ",
        plan.len(),
        "category",
    ) else {
        return false;
    };
    let (cat_name, count) = {
        let cat = &plan.categories()[ci];
        (cat.name.clone(), cat.tasks.len())
    };
    if count == 0 {
        println!("✗ No tasks in '{cat_name}'");
        return false;
    }
    let Some(ti) = prompt_index(
        input,
        &format!("Enter task number to rename (1-{count}, 0 to cancel): "),
        count,
        "task",
    ) else {
        return false;
    };
    let old_name = plan.categories()[ci].tasks[ti].name.clone();
    let Some(new_name) = prompt(input, &format!("Enter new name for '{old_name}': ")) else {
        return false;
    };
    match plan.rename_task(ci, ti, &new_name) {
        Ok(()) => {
            println!("✓ Task renamed from '{old_name}' to '{}'", new_name.trim());
            true
        }
        Err(PlanError::EmptyName) => {
            println!("✗ Name cannot be empty");
            false
        }
        Err(e) => {
            println!("✗ {e}");
            false
        }
    }
}

fn run_edit_task<R: BufRead>(input: &mut R, plan: &mut Plan) -> bool {
    print_structure(plan);
    println!("\n--- EDIT TASK DETAILS ---");
    let Some(ci) = prompt_index(
        input,
        "Enter category number (0 to cancel): ",
        plan.len(),
        "category",
    ) else {
        return false;
    };
    let (cat_name, count) = {
        let cat = &plan.categories()[ci];
        (cat.name.clone(), cat.tasks.len())
    };
    if count == 0 {
        println!("✗ No tasks in '{cat_name}'");
        return false;
    }
    let Some(ti) = prompt_index(
        input,
        &format!("Enter task number to edit (1-{count}, 0 to cancel): "),
        count,
        "task",
    ) else {
        return false;
    };
    let (name, old_start, old_duration) = {
        let task = &plan.categories()[ci].tasks[ti];
        (task.name.clone(), task.start.clone(), task.duration)
    };
    println!("\nCurrent details for '{name}':");
    println!("  Start: {old_start}");
    println!("  Duration: {old_duration} days");

    // Fields apply one at a time so a rejection is reported right under
    // its own prompt, before the next one appears.
    let Some(start_line) = prompt(
        input,
        &format!("\nNew start date (YYYY-MM-DD) [press Enter to keep '{old_start}']: "),
    ) else {
        return false;
    };
    let start_line = start_line.trim().to_string();
    if !start_line.is_empty() {
        match plan.edit_task(ci, ti, Some(&start_line), None) {
            Ok(outcome) => {
                if matches!(outcome.start, FieldEdit::Rejected(_)) {
                    println!("✗ Invalid date format. Keeping original date.");
                }
            }
            Err(e) => {
                println!("✗ {e}");
                return false;
            }
        }
    }

    let Some(dur_line) = prompt(
        input,
        &format!("New duration in days [press Enter to keep '{old_duration}']: "),
    ) else {
        return false;
    };
    let dur_line = dur_line.trim().to_string();
    if !dur_line.is_empty() {
        match plan.edit_task(ci, ti, None, Some(&dur_line)) {
            Ok(outcome) => {
                if matches!(outcome.duration, FieldEdit::Rejected(_)) {
                    println!("✗ Invalid duration. Keeping original value.");
                }
            }
            Err(e) => {
                println!("✗ {e}");
                return false;
            }
        }
    }

    // The edit session completes (and saves) even when every field kept
    // its old value.
    println!("✓ Task '{name}' updated");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_plan() -> Plan {
        let mut plan = Plan::new();
        plan.add_category("Design").unwrap();
        plan.add_category("Build").unwrap();
        plan.add_task(0, "Wireframes", Some("2026-01-10"), Some("14")).unwrap();
        plan.add_task(0, "Mockups", Some("2026-02-01"), Some("21")).unwrap();
        plan
    }

    #[test]
    fn add_category_action_appends_and_reports_mutation() {
        let mut plan = sample_plan();
        let mutated = run_add_category(&mut Cursor::new("Docs\n"), &mut plan);
        assert!(mutated);
        assert_eq!(plan.categories()[2].name, "Docs");
    }

    #[test]
    fn add_category_action_rejects_duplicate() {
        let mut plan = sample_plan();
        let mutated = run_add_category(&mut Cursor::new("Design\n"), &mut plan);
        assert!(!mutated);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn delete_category_needs_exact_y() {
        let mut plan = sample_plan();
        // "yes" is not consent.
        assert!(!run_delete_category(&mut Cursor::new("1\nyes\n"), &mut plan));
        assert_eq!(plan.len(), 2);
        // Uppercase Y is.
        assert!(run_delete_category(&mut Cursor::new("1\nY\n"), &mut plan));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.categories()[0].name, "Build");
    }

    #[test]
    fn delete_category_zero_cancels_silently() {
        let mut plan = sample_plan();
        assert!(!run_delete_category(&mut Cursor::new("0\n"), &mut plan));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn bad_index_input_aborts_without_change() {
        let mut plan = sample_plan();
        assert!(!run_delete_category(&mut Cursor::new("abc\ny\n"), &mut plan));
        assert!(!run_delete_category(&mut Cursor::new("-1\ny\n"), &mut plan));
        assert!(!run_delete_category(&mut Cursor::new("9\ny\n"), &mut plan));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn oversized_index_is_rejected_not_truncated() {
        let mut plan = sample_plan();
        // 2^32 + 1 must not wrap into a valid selection on any target.
        assert!(!run_delete_category(&mut Cursor::new("4294967297\ny\n"), &mut plan));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn rename_category_moves_to_end_via_menu() {
        let mut plan = sample_plan();
        assert!(run_rename_category(&mut Cursor::new("1\nDesign v2\n"), &mut plan));
        let names: Vec<&str> = plan.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Build", "Design v2"]);
    }

    #[test]
    fn add_task_blank_inputs_take_defaults() {
        let mut plan = sample_plan();
        assert!(run_add_task(&mut Cursor::new("2\nScaffolding\n\n\n"), &mut plan));
        let task = &plan.categories()[1].tasks[0];
        assert_eq!(task.name, "Scaffolding");
        assert_eq!(task.start, DEFAULT_TASK_START);
        assert_eq!(task.duration, DEFAULT_TASK_DURATION);
    }

    #[test]
    fn add_task_bad_date_aborts_before_duration_prompt() {
        let mut plan = sample_plan();
        let mut input = Cursor::new("1\nGhost\n2026-99-01\n45\n");
        assert!(!run_add_task(&mut input, &mut plan));
        assert_eq!(plan.categories()[0].tasks.len(), 2);
        // The duration line is still unread: the abort came first.
        assert_eq!(input.position() as usize, "1\nGhost\n2026-99-01\n".len());
    }

    #[test]
    fn add_task_bad_duration_aborts() {
        let mut plan = sample_plan();
        assert!(!run_add_task(&mut Cursor::new("1\nGhost\n2026-06-01\nsoon\n"), &mut plan));
        assert_eq!(plan.categories()[0].tasks.len(), 2);
    }

    #[test]
    fn delete_task_reports_empty_category() {
        let mut plan = sample_plan();
        assert!(!run_delete_task(&mut Cursor::new("2\n"), &mut plan));
    }

    #[test]
    fn delete_task_confirmed_removes_and_shifts() {
        let mut plan = sample_plan();
        assert!(run_delete_task(&mut Cursor::new("1\n1\ny\n"), &mut plan));
        let tasks = &plan.categories()[0].tasks;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Mockups");
    }

    #[test]
    fn delete_task_refused_confirmation_keeps_count() {
        let mut plan = sample_plan();
        assert!(!run_delete_task(&mut Cursor::new("1\n1\nn\n"), &mut plan));
        assert_eq!(plan.categories()[0].tasks.len(), 2);
        assert_eq!(plan.categories()[0].tasks[0].name, "Wireframes");
        // "yes" is not consent here either.
        assert!(!run_delete_task(&mut Cursor::new("1\n1\nyes\n"), &mut plan));
        assert_eq!(plan.categories()[0].tasks.len(), 2);
    }

    #[test]
    fn delete_task_out_of_range_number_aborts_before_confirmation() {
        let mut plan = sample_plan();
        let mut input = Cursor::new("1\n9\ny\n");
        assert!(!run_delete_task(&mut input, &mut plan));
        assert_eq!(plan.categories()[0].tasks.len(), 2);
        // The confirmation line is still unread: the range check came first.
        assert_eq!(input.position() as usize, "1\n9\n".len());
    }

    #[test]
    fn rename_task_keeps_position() {
        let mut plan = sample_plan();
        assert!(run_rename_task(&mut Cursor::new("1\n2\nMockups v2\n"), &mut plan));
        assert_eq!(plan.categories()[0].tasks[1].name, "Mockups v2");
        assert_eq!(plan.categories()[0].tasks[0].name, "Wireframes");
    }

    #[test]
    fn edit_task_partial_success_keeps_date_updates_duration() {
        let mut plan = sample_plan();
        assert!(run_edit_task(&mut Cursor::new("1\n1\n2026-02-30\n45\n"), &mut plan));
        let task = &plan.categories()[0].tasks[0];
        assert_eq!(task.start, "2026-01-10");
        assert_eq!(task.duration, 45);
    }

    #[test]
    fn edit_task_all_blank_still_completes() {
        let mut plan = sample_plan();
        assert!(run_edit_task(&mut Cursor::new("1\n1\n\n\n"), &mut plan));
        let task = &plan.categories()[0].tasks[0];
        assert_eq!(task.start, "2026-01-10");
        assert_eq!(task.duration, 14);
    }

    #[test]
    fn menu_loop_saves_after_mutation_and_exits_on_zero() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("gantt_data.json");
        let chart = dir.path().join("chart.svg");
        let mut plan = sample_plan();

        run_menu(Cursor::new("2\nDocs\n0\n"), &mut plan, &data, &chart);

        assert_eq!(plan.len(), 3);
        let saved = std::fs::read_to_string(&data).unwrap();
        assert!(saved.contains("\"Docs\""));
    }

    #[test]
    fn menu_loop_ends_cleanly_on_eof() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("gantt_data.json");
        let chart = dir.path().join("chart.svg");
        let mut plan = sample_plan();

        // No exit choice; input just runs out mid-session.
        run_menu(Cursor::new("1\n"), &mut plan, &data, &chart);
        assert!(!data.exists());
    }

    #[test]
    fn junk_menu_choice_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("gantt_data.json");
        let chart = dir.path().join("chart.svg");
        let mut plan = sample_plan();

        run_menu(Cursor::new("x\n42\n0\n"), &mut plan, &data, &chart);
        assert!(!data.exists());
        assert_eq!(plan.len(), 2);
    }
}
