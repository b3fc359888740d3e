//! Terminal rendering for the month grid and agenda.
//!
//! Colored output via owo_colors. The profile's display color paints the
//! per-day event markers and agenda times, mirroring how the profile color
//! is the one piece of personalization the calendar carries.

use chrono::{Datelike, NaiveDate};
use moncal_core::grid::{GridCell, MonthView};
use moncal_core::grouping::CalendarDay;
use owo_colors::OwoColorize;

const GRID_WIDTH: usize = 7 * 5;

/// Render the full month view: title, boundary dates, weekday header, and
/// one row of cells per week.
pub fn render_month(view: &MonthView, cells: &[GridCell], color: (u8, u8, u8)) -> String {
    let mut lines = Vec::new();

    let title = view.reference().format("%B %Y").to_string();
    lines.push(format!("{title:^width$}", width = GRID_WIDTH).bold().to_string());

    let range = format!(
        "{} - {}",
        view.first_of_month().format("%b %-d, %Y"),
        view.last_of_month().format("%b %-d, %Y")
    );
    lines.push(format!("{range:^width$}", width = GRID_WIDTH).dimmed().to_string());
    lines.push(String::new());

    let header: String = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        .iter()
        .map(|d| format!(" {d} "))
        .collect();
    lines.push(header.dimmed().to_string());

    for week in cells.chunks(7) {
        let row: String = week.iter().map(|cell| render_cell(cell, color)).collect();
        lines.push(row);
    }

    lines.join("\n")
}

/// One fixed-width cell: two-space gutter, day number, event marker.
fn render_cell(cell: &GridCell, color: (u8, u8, u8)) -> String {
    let num = format!("{:>2}", cell.day.day());

    let num = if cell.is_today {
        num.reversed().bold().to_string()
    } else if !cell.in_current_month {
        num.dimmed().to_string()
    } else {
        num
    };

    let num = if cell.is_selected {
        num.underline().to_string()
    } else {
        num
    };

    let marker = if cell.events.is_empty() {
        " ".to_string()
    } else {
        let (r, g, b) = color;
        "•".truecolor(r, g, b).to_string()
    };

    format!("  {num}{marker}")
}

/// Render the month's events as a per-day agenda.
///
/// Event ids are printed dimmed so they can be fed to `moncal delete`.
pub fn render_agenda(days: &[CalendarDay], today: NaiveDate, color: (u8, u8, u8)) -> String {
    let mut lines = Vec::new();
    let (r, g, b) = color;

    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(date_label(day.day, today).bold().to_string());

        for event in &day.events {
            let time = format!("{:>8}", event.time);
            lines.push(format!(
                "  {}  {}  {}",
                time.truecolor(r, g, b),
                event.name,
                format!("[{}]", event.id).dimmed()
            ));
        }
    }

    lines.join("\n")
}

/// Format a date as a human-readable label (e.g. "Today" or "Sat Dec 21").
fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else {
        date.format("%a %b %-d").to_string()
    }
}
