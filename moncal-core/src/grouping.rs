//! Grouping of flat event lists into per-day buckets.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{MoncalError, MoncalResult};
use crate::event::{Event, date_key};

/// All events sharing one calendar date, in fetch order.
///
/// Derived and ephemeral: recomputed on every reload, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub day: NaiveDate,
    pub events: Vec<Event>,
}

/// Group a flat event list into one `CalendarDay` per calendar date.
///
/// Events keep their input order within a bucket, so a list fetched in
/// ascending `datetime` order yields ascending time-of-day order per day.
/// The result is ordered by date, each date appearing at most once.
///
/// A malformed timestamp fails the whole grouping: a row the adapter never
/// wrote is a data-integrity problem to surface, not to drop.
pub fn group_events(events: Vec<Event>) -> MoncalResult<Vec<CalendarDay>> {
    let mut buckets: BTreeMap<String, Vec<Event>> = BTreeMap::new();

    for event in events {
        let key = date_key(&event.datetime)?.to_string();
        buckets.entry(key).or_default().push(event);
    }

    buckets
        .into_iter()
        .map(|(key, events)| {
            let day = parse_date_key(&key)?;
            Ok(CalendarDay { day, events })
        })
        .collect()
}

/// Rebuild a date from its `YYYY-MM-DD` key components.
///
/// Goes through the plain date constructor rather than any epoch-based
/// parse, so the resulting day is exactly what the key says — no
/// off-by-one-day shifts near midnight boundaries.
fn parse_date_key(key: &str) -> MoncalResult<NaiveDate> {
    // The key shape (digits and dashes) was validated during extraction;
    // out-of-range components like month 13 are caught here.
    let year: i32 = key[..4].parse().unwrap_or_default();
    let month: u32 = key[5..7].parse().unwrap_or_default();
    let day: u32 = key[8..10].parse().unwrap_or_default();

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| MoncalError::MalformedTimestamp(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, name: &str, datetime: &str) -> Event {
        Event {
            id: id.to_string(),
            name: name.to_string(),
            time: "All Day".to_string(),
            datetime: datetime.to_string(),
            user_id: "user-1".to_string(),
        }
    }

    #[test]
    fn groups_events_into_per_day_buckets() {
        let events = vec![
            event("a", "Dev Meeting", "2024-12-21T10:00:00"),
            event("b", "Code Review", "2024-12-21T14:00:00"),
            event("c", "Sprint Planning", "2024-12-22T09:00:00"),
        ];

        let days = group_events(events).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, NaiveDate::from_ymd_opt(2024, 12, 21).unwrap());
        assert_eq!(days[0].events.len(), 2);
        assert_eq!(days[0].events[0].name, "Dev Meeting");
        assert_eq!(days[0].events[1].name, "Code Review");
        assert_eq!(days[1].day, NaiveDate::from_ymd_opt(2024, 12, 22).unwrap());
        assert_eq!(days[1].events.len(), 1);
    }

    #[test]
    fn flattening_recovers_the_original_set() {
        let events = vec![
            event("a", "One", "2024-12-21T10:00:00"),
            event("b", "Two", "2024-11-03T08:00:00"),
            event("c", "Three", "2024-12-21T14:00:00"),
            event("d", "Four", "2025-01-01T00:00:00"),
        ];

        let days = group_events(events.clone()).unwrap();

        let flattened: Vec<Event> = days.into_iter().flat_map(|d| d.events).collect();
        assert_eq!(flattened.len(), events.len());
        for original in &events {
            assert_eq!(flattened.iter().filter(|e| e.id == original.id).count(), 1);
        }
        // Order within a day is preserved.
        let dec_21: Vec<_> = flattened
            .iter()
            .filter(|e| e.datetime.starts_with("2024-12-21"))
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(dec_21, vec!["a", "c"]);
    }

    #[test]
    fn result_is_ordered_by_date() {
        let events = vec![
            event("a", "Late", "2025-02-10T10:00:00"),
            event("b", "Early", "2024-06-01T10:00:00"),
        ];

        let days = group_events(events).unwrap();
        assert!(days[0].day < days[1].day);
    }

    #[test]
    fn empty_input_yields_empty_grouping() {
        assert!(group_events(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn malformed_timestamp_is_surfaced() {
        let events = vec![
            event("a", "Fine", "2024-12-21T10:00:00"),
            event("b", "Broken", "no separator here"),
        ];

        assert!(matches!(
            group_events(events),
            Err(MoncalError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn out_of_range_date_component_is_surfaced() {
        let events = vec![event("a", "Bad Month", "2024-13-41T10:00:00")];

        assert!(matches!(
            group_events(events),
            Err(MoncalError::MalformedTimestamp(_))
        ));
    }
}
