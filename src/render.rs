//! Gantt chart rendering.
//!
//! Turns the current plan into an SVG timeline: one header row per
//! category, one bar row per task, a fixed one-year window on the x axis.
//! Rendering is a pure consumer of the plan; it regenerates the whole
//! artifact on every call and never touches the data file.
//!
//! Row layout is split out as [`layout_rows`] so the geometry can be
//! checked without a drawing backend.

use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::plan::Plan;

/// Chart canvas size in pixels.
const CHART_SIZE: (u32, u32) = (1600, 1000);

/// Bar height as a fraction of one row.
const BAR_HALF_HEIGHT: f64 = 0.3;

/// Vertical gap inserted after each category block, in rows.
const CATEGORY_GAP: f64 = 0.5;

/// The fixed x-axis window covering the plan year.
pub fn chart_window() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
    )
}

fn bold(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Bold)
}

/// What a single layout row shows.
#[derive(Debug, PartialEq)]
pub enum RowKind {
    /// Category heading; no bar.
    Header,
    /// Task bar spanning `start..end` with the owning category's palette
    /// index. `end` may precede `start` in the data; spans are normalised
    /// here so `start <= end` always holds.
    Bar {
        start: NaiveDate,
        end: NaiveDate,
        color: usize,
    },
}

/// One vertical slot on the chart. `y` grows downward from zero, matching
/// top-to-bottom reading order.
#[derive(Debug, PartialEq)]
pub struct Row {
    pub label: String,
    pub y: f64,
    pub kind: RowKind,
}

/// Compute the row layout for a plan: per category a header row, then one
/// row per task, then a gap. Returns the rows plus the total height in
/// row units.
///
/// Fails only when a stored start date does not parse, which takes a
/// hand-edited data file.
pub fn layout_rows(plan: &Plan) -> Result<(Vec<Row>, f64), String> {
    let mut rows = Vec::new();
    let mut y = 0.0;
    for (color, cat) in plan.categories().iter().enumerate() {
        rows.push(Row {
            label: cat.name.clone(),
            y,
            kind: RowKind::Header,
        });
        y += 1.0;
        for task in &cat.tasks {
            let start = task.start_date().map_err(|e| {
                format!("task '{}' has an unreadable start date '{}': {e}", task.name, task.start)
            })?;
            let end = Duration::try_days(task.duration)
                .and_then(|d| start.checked_add_signed(d))
                .ok_or_else(|| {
                    format!("task '{}' has a duration that overflows the calendar", task.name)
                })?;
            let (start, end) = if end < start { (end, start) } else { (start, end) };
            rows.push(Row {
                label: task.name.clone(),
                y,
                kind: RowKind::Bar { start, end, color },
            });
            y += 1.0;
        }
        y += CATEGORY_GAP;
    }
    Ok((rows, y))
}

/// Clip a bar span to the chart window. `None` means the bar lies entirely
/// outside and is not drawn.
fn clamp_span(
    start: NaiveDate,
    end: NaiveDate,
    window: (NaiveDate, NaiveDate),
) -> Option<(NaiveDate, NaiveDate)> {
    if end < window.0 || start > window.1 {
        return None;
    }
    Some((start.max(window.0), end.min(window.1)))
}

/// Render the plan to an SVG file at `path`, creating parent directories
/// as needed. Refuses an empty plan.
pub fn render_chart(plan: &Plan, path: &Path) -> Result<(), Box<dyn Error>> {
    if plan.is_empty() {
        return Err("no categories to display".into());
    }
    let (rows, height) = layout_rows(plan)?;
    let window = chart_window();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    // y is plotted ascending, so rows are flipped to put row zero at the
    // top; 0.6 rows of headroom keeps the first label clear of the edge.
    let y_top = height + 0.6;
    let flip = |row_y: f64| height - row_y;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Gantt Chart: Project Timeline (January 1, 2026 - January 1, 2027)",
            bold(28.0),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(40)
        .build_cartesian_2d((window.0..window.1).monthly(), 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(0)
        .x_label_formatter(&|d: &NaiveDate| d.format("%b %Y").to_string())
        .label_style(("sans-serif", 14))
        .light_line_style(&BLACK.mix(0.08))
        .bold_line_style(&BLACK.mix(0.2))
        .x_desc("Timeline")
        .y_desc("Tasks")
        .axis_desc_style(bold(18.0))
        .draw()?;

    // Bars and legend, one series per category so every category gets a
    // legend entry even when it has no tasks yet.
    for (idx, cat) in plan.categories().iter().enumerate() {
        let fill = Palette99::pick(idx).mix(0.8);
        let mut bars = Vec::new();
        let mut outlines = Vec::new();
        for row in rows.iter() {
            if let RowKind::Bar { start, end, color } = row.kind {
                if color != idx {
                    continue;
                }
                if let Some((x0, x1)) = clamp_span(start, end, window) {
                    let yc = flip(row.y);
                    let corners = [(x0, yc - BAR_HALF_HEIGHT), (x1, yc + BAR_HALF_HEIGHT)];
                    bars.push(Rectangle::new(corners, fill.filled()));
                    outlines.push(Rectangle::new(corners, BLACK.stroke_width(1)));
                }
            }
        }
        chart
            .draw_series(bars)?
            .label(cat.name.clone())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 14, y + 6)], fill.filled())
            });
        chart.draw_series(outlines)?;
    }

    // Row labels go inside the plot at the left edge: category names bold,
    // task names indented below them.
    let anchor = Pos::new(HPos::Left, VPos::Center);
    let header_style = TextStyle::from(bold(20.0)).pos(anchor);
    let task_style = TextStyle::from(("sans-serif", 16).into_font()).pos(anchor);
    for row in rows.iter() {
        let (x, style) = match row.kind {
            RowKind::Header => (window.0 + Duration::days(2), header_style.clone()),
            RowKind::Bar { .. } => (window.0 + Duration::days(8), task_style.clone()),
        };
        chart.draw_series(std::iter::once(Text::new(
            row.label.clone(),
            (x, flip(row.y)),
            style,
        )))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.9))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Plan;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_category_plan() -> Plan {
        let mut plan = Plan::new();
        plan.add_category("Alpha").unwrap();
        plan.add_category("Beta").unwrap();
        plan.add_task(0, "A1", Some("2026-01-01"), Some("10")).unwrap();
        plan.add_task(0, "A2", Some("2026-02-01"), Some("20")).unwrap();
        plan.add_task(1, "B1", Some("2026-03-01"), Some("30")).unwrap();
        plan
    }

    #[test]
    fn layout_interleaves_headers_tasks_and_gaps() {
        let (rows, height) = layout_rows(&two_category_plan()).unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Alpha", "A1", "A2", "Beta", "B1"]);

        assert_eq!(rows[0].y, 0.0);
        assert_eq!(rows[1].y, 1.0);
        assert_eq!(rows[2].y, 2.0);
        // Half-row gap after Alpha's block.
        assert_eq!(rows[3].y, 3.5);
        assert_eq!(rows[4].y, 4.5);
        assert_eq!(height, 6.0);

        assert_eq!(rows[0].kind, RowKind::Header);
        assert_eq!(
            rows[1].kind,
            RowKind::Bar { start: date(2026, 1, 1), end: date(2026, 1, 11), color: 0 }
        );
        assert_eq!(
            rows[4].kind,
            RowKind::Bar { start: date(2026, 3, 1), end: date(2026, 3, 31), color: 1 }
        );
    }

    #[test]
    fn layout_normalises_negative_durations() {
        let mut plan = Plan::new();
        plan.add_category("Alpha").unwrap();
        plan.add_task(0, "Rewind", Some("2026-06-01"), Some("-10")).unwrap();
        let (rows, _) = layout_rows(&plan).unwrap();
        assert_eq!(
            rows[1].kind,
            RowKind::Bar { start: date(2026, 5, 22), end: date(2026, 6, 1), color: 0 }
        );
    }

    #[test]
    fn layout_reports_unreadable_start_dates() {
        let mut plan = Plan::new();
        plan.add_category("Alpha").unwrap();
        plan.add_task(0, "Ok", Some("2026-01-01"), Some("5")).unwrap();
        // Corrupt the stored string the way a hand edit would.
        let json = serde_json::to_string(&plan).unwrap().replace("2026-01-01", "not-a-date");
        let broken: Plan = serde_json::from_str(&json).unwrap();

        let err = layout_rows(&broken).unwrap_err();
        assert!(err.contains("not-a-date"), "unexpected message: {err}");
    }

    #[test]
    fn clamp_discards_bars_outside_the_window() {
        let w = chart_window();
        assert_eq!(clamp_span(date(2025, 1, 1), date(2025, 6, 1), w), None);
        assert_eq!(clamp_span(date(2027, 2, 1), date(2027, 3, 1), w), None);
        assert_eq!(
            clamp_span(date(2025, 12, 1), date(2026, 2, 1), w),
            Some((date(2026, 1, 1), date(2026, 2, 1)))
        );
        assert_eq!(
            clamp_span(date(2026, 11, 1), date(2027, 4, 1), w),
            Some((date(2026, 11, 1), date(2027, 1, 1)))
        );
    }

    #[test]
    fn render_refuses_empty_plan() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("chart.svg");
        let err = render_chart(&Plan::new(), &out).unwrap_err();
        assert_eq!(err.to_string(), "no categories to display");
        assert!(!out.exists());
    }

    #[test]
    fn render_writes_svg_for_seed_plan() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("chart.svg");
        render_chart(&Plan::seed(), &out).unwrap();
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.starts_with("<?xml") || svg.starts_with("<svg"));
        assert!(svg.contains("Models Page"));
        assert!(svg.contains("F3: Subcategory 3"));
    }
}
