use std::cmp::Ordering;

use crate::storage::DateRange;

use super::types::Event;

/// Returns true if the event belongs in a listing for `window`.
///
/// An event matches when both of its dates lie inside the window. Recurring
/// events also match when their anchor `start_date` lies inside the window, or
/// when they carry no dates at all. Occurrences are not expanded.
pub fn matches_window(event: &Event, window: &DateRange) -> bool {
    match (event.start_date, event.end_date) {
        (Some(start), Some(end)) if window.contains(&start) && window.contains(&end) => true,
        (Some(start), _) => event.repeats.is_recurring() && window.contains(&start),
        (None, None) => event.repeats.is_recurring(),
        (None, Some(_)) => false,
    }
}

/// Filters events for a listing window, see [`matches_window`].
pub fn filter_events_in_window<'a>(events: &'a [Event], window: &DateRange) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| matches_window(event, window))
        .collect()
}

/// Sorts by `start_date` ascending with dateless events last, then by
/// `created_at` so pages are stable.
pub fn sort_events_by_start(events: &mut [Event]) {
    events.sort_by(|a, b| {
        let by_start = match (a.start_date, b.start_date) {
            (Some(a_start), Some(b_start)) => a_start.cmp(&b_start),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_start
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{NewEvent, Repeats};
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 12, d, 0, 0, 0).unwrap()
    }

    fn window(a: u32, b: u32) -> DateRange {
        DateRange::new(day(a), day(b)).unwrap()
    }

    fn event(title: &str, start: u32, end: u32) -> Event {
        NewEvent::new(title)
            .with_dates(day(start), day(end))
            .into_event(day(1))
    }

    #[test]
    fn test_event_fully_inside_window_matches() {
        assert!(matches_window(&event("a", 21, 22), &window(20, 23)));
        assert!(matches_window(&event("edge", 20, 23), &window(20, 23)));
    }

    #[test]
    fn test_event_straddling_window_does_not_match() {
        assert!(!matches_window(&event("late", 22, 25), &window(20, 23)));
        assert!(!matches_window(&event("early", 18, 21), &window(20, 23)));
    }

    #[test]
    fn test_recurring_anchor_inside_window_matches() {
        let mut monthly = event("rent", 22, 28);
        monthly.repeats = Repeats::Monthly;

        assert!(matches_window(&monthly, &window(20, 23)));
        assert!(!matches_window(&monthly, &window(1, 10)));
    }

    #[test]
    fn test_dateless_events() {
        let recurring = NewEvent::new("gym")
            .with_repeats(Repeats::EveryWeekday)
            .into_event(day(1));
        let one_off = NewEvent::new("someday").into_event(day(1));

        assert!(matches_window(&recurring, &window(1, 2)));
        assert!(!matches_window(&one_off, &window(1, 2)));
    }

    #[test]
    fn test_filter_events_in_window() {
        let events = vec![event("in", 21, 21), event("out", 26, 26)];
        let filtered = filter_events_in_window(&events, &window(20, 23));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "in");
    }

    #[test]
    fn test_sort_puts_dateless_last() {
        let mut events = vec![
            NewEvent::new("none")
                .with_repeats(Repeats::Daily)
                .into_event(day(1)),
            event("later", 26, 26),
            event("sooner", 21, 22),
        ];
        sort_events_by_start(&mut events);

        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["sooner", "later", "none"]);
    }
}
