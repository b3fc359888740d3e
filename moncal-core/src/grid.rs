//! Month grid generation and navigation.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::event::Event;
use crate::grouping::CalendarDay;

/// One rendered day-slot in the month view, in- or out-of-month.
///
/// `is_selected` is a UI slot carried in the cell contract: the core never
/// decides selection, it just stamps the flag for whichever date the
/// caller passed.
#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    pub day: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub events: Vec<Event>,
}

/// Navigation state for the month view.
///
/// The reference date identifies the displayed month. Navigation shifts it
/// by whole calendar months (not a fixed day count), so variable month
/// lengths stay correct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthView {
    reference: NaiveDate,
}

impl MonthView {
    pub fn new(reference: NaiveDate) -> Self {
        MonthView { reference }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// First day of the displayed month.
    pub fn first_of_month(&self) -> NaiveDate {
        self.reference.with_day(1).unwrap()
    }

    /// Last day of the displayed month.
    pub fn last_of_month(&self) -> NaiveDate {
        self.first_of_month() + Months::new(1) - Days::new(1)
    }

    /// Shift the view one calendar month forward.
    pub fn next_month(&mut self) {
        self.reference = self.reference + Months::new(1);
    }

    /// Shift the view one calendar month back.
    pub fn previous_month(&mut self) {
        self.reference = self.reference - Months::new(1);
    }

    /// Reset the view to the current date.
    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.reference = today;
    }

    /// Whether a date falls in the displayed month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.reference.year() && date.month() == self.reference.month()
    }
}

/// Generate the visible grid for the view's month.
///
/// Cells run in complete Sunday-first weeks: from the Sunday on or before
/// the 1st of the month through the Saturday on or after its last day. The
/// result length is always a multiple of 7 (35 or 42 for ordinary months).
///
/// `today` and `selected` are passed in rather than observed, so callers
/// control the clock and grids stay reproducible under test.
pub fn month_grid(
    view: &MonthView,
    today: NaiveDate,
    selected: Option<NaiveDate>,
    days: &[CalendarDay],
) -> Vec<GridCell> {
    let first = view.first_of_month();
    let last = view.last_of_month();

    let start = first - Days::new(u64::from(first.weekday().num_days_from_sunday()));
    let end = last + Days::new(u64::from(6 - last.weekday().num_days_from_sunday()));

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| GridCell {
            day,
            in_current_month: view.contains(day),
            is_today: day == today,
            is_selected: selected == Some(day),
            events: days
                .iter()
                .find(|d| d.day == day)
                .map(|d| d.events.clone())
                .unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_on(id: &str, datetime: &str) -> Event {
        Event {
            id: id.to_string(),
            name: format!("event {id}"),
            time: "All Day".to_string(),
            datetime: datetime.to_string(),
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn december_2024_grid_boundaries() {
        let view = MonthView::new(date(2024, 12, 15));
        let cells = month_grid(&view, date(2024, 12, 15), None, &[]);

        // Dec 1 2024 is itself a Sunday; the trailing edge pads to Jan 4 2025.
        assert_eq!(cells.len(), 35);
        assert_eq!(cells.first().unwrap().day, date(2024, 12, 1));
        assert_eq!(cells.last().unwrap().day, date(2025, 1, 4));
    }

    #[test]
    fn grid_starts_sunday_and_ends_saturday() {
        for (y, m) in [(2024, 2), (2024, 12), (2025, 3), (2025, 8), (2026, 1)] {
            let view = MonthView::new(date(y, m, 10));
            let cells = month_grid(&view, date(2024, 1, 1), None, &[]);

            assert_eq!(cells.len() % 7, 0);
            assert!(cells.len() >= 28);
            assert_eq!(cells.first().unwrap().day.weekday(), chrono::Weekday::Sun);
            assert_eq!(cells.last().unwrap().day.weekday(), chrono::Weekday::Sat);
        }
    }

    #[test]
    fn every_in_range_date_appears_exactly_once() {
        let view = MonthView::new(date(2025, 3, 1));
        let cells = month_grid(&view, date(2025, 3, 1), None, &[]);

        for cell in &cells {
            let count = cells.iter().filter(|c| c.day == cell.day).count();
            assert_eq!(count, 1, "{} appears {} times", cell.day, count);
        }
        // All days of March itself are present.
        for d in 1..=31 {
            assert!(cells.iter().any(|c| c.day == date(2025, 3, d)));
        }
    }

    #[test]
    fn flags_are_stamped_per_cell() {
        let view = MonthView::new(date(2024, 12, 1));
        let today = date(2024, 12, 21);
        let selected = date(2024, 12, 22);
        let days = vec![CalendarDay {
            day: date(2024, 12, 21),
            events: vec![event_on("a", "2024-12-21T10:00:00")],
        }];

        let cells = month_grid(&view, today, Some(selected), &days);

        let dec_21 = cells.iter().find(|c| c.day == today).unwrap();
        assert!(dec_21.is_today && !dec_21.is_selected && dec_21.in_current_month);
        assert_eq!(dec_21.events.len(), 1);

        let dec_22 = cells.iter().find(|c| c.day == selected).unwrap();
        assert!(dec_22.is_selected && !dec_22.is_today);
        assert!(dec_22.events.is_empty());

        // Leading/trailing cells belong to adjacent months.
        let jan_4 = cells.iter().find(|c| c.day == date(2025, 1, 4)).unwrap();
        assert!(!jan_4.in_current_month);
    }

    #[test]
    fn next_then_previous_returns_to_the_same_month() {
        let mut view = MonthView::new(date(2024, 12, 21));
        view.next_month();
        assert!(view.contains(date(2025, 1, 10)));
        view.previous_month();
        assert!(view.contains(date(2024, 12, 1)));
    }

    #[test]
    fn month_navigation_handles_variable_month_lengths() {
        // Jan 31 -> Feb: chrono clamps to Feb 29 (2024 is a leap year),
        // which still identifies February.
        let mut view = MonthView::new(date(2024, 1, 31));
        view.next_month();
        assert!(view.contains(date(2024, 2, 1)));
        view.previous_month();
        assert!(view.contains(date(2024, 1, 1)));
    }

    #[test]
    fn go_to_today_resets_the_reference() {
        let mut view = MonthView::new(date(2020, 5, 5));
        view.go_to_today(date(2024, 12, 21));
        assert_eq!(view.reference(), date(2024, 12, 21));
    }
}
