// src/table.rs
use crate::calendar::{Event, SessionState};
use crate::format::parse_timestamp;
use std::cmp::Ordering;
use std::fmt;

/// Badge appended to the description of events flagged `is_new`.
pub const NEW_BADGE: &str = "new chitte!";

pub const COLUMN_TITLES: [&str; 5] = ["Date", "Time", "Venue", "Description", "Category"];

/// Value of the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Fetch order.
    #[default]
    Unsorted,
    Date,
    Venue,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Unsorted => "default",
            SortKey::Date => "date",
            SortKey::Venue => "venue",
        }
    }

    /// Next value in the selector, wrapping around.
    pub fn next(&self) -> SortKey {
        match self {
            SortKey::Unsorted => SortKey::Date,
            SortKey::Date => SortKey::Venue,
            SortKey::Venue => SortKey::Unsorted,
        }
    }
}

// Any value other than "date" or "venue" keeps the fetch order.
impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value {
            "date" => SortKey::Date,
            "venue" => SortKey::Venue,
            _ => SortKey::Unsorted,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered table row. `source_index` points back into the session's
/// stored event order so click handlers can find the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub source_index: usize,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub description: String,
    pub category: String,
    pub is_new: bool,
}

impl TableRow {
    fn from_event(source_index: usize, event: &Event) -> Self {
        Self {
            source_index,
            date: event.date().to_string(),
            time: event.time().to_string(),
            venue: event.venue().to_string(),
            description: event.description().to_string(),
            category: event.category().to_string(),
            is_new: event.is_new(),
        }
    }

    pub fn badge(&self) -> Option<&'static str> {
        self.is_new.then_some(NEW_BADGE)
    }

    /// Description cell text, badge included.
    pub fn description_cell(&self) -> String {
        match self.badge() {
            Some(badge) => format!("{} {}", self.description, badge),
            None => self.description.clone(),
        }
    }
}

/// Case-insensitive first; on a tie lowercase sorts before uppercase.
pub fn compare_venues(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a))
}

// Parseable dates first, ascending; unparseable ones keep their relative order at the end.
fn compare_dates(a: &Event, b: &Event) -> Ordering {
    match (parse_timestamp(a.date()), parse_timestamp(b.date())) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Indices into `events` in display order. `events` itself is left untouched.
pub fn sorted_view(events: &[Event], key: SortKey) -> Vec<usize> {
    let mut order: Vec<usize> = (0..events.len()).collect();
    match key {
        SortKey::Date => order.sort_by(|&a, &b| compare_dates(&events[a], &events[b])),
        SortKey::Venue => {
            order.sort_by(|&a, &b| compare_venues(events[a].venue(), events[b].venue()))
        }
        SortKey::Unsorted => {}
    }
    order
}

/// Full table body for `state` under `key`. Pure: same inputs, same rows.
pub fn render_rows(state: &SessionState, key: SortKey) -> Vec<TableRow> {
    let events = state.events();
    sorted_view(events, key)
        .into_iter()
        .map(|i| TableRow::from_event(i, &events[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::VenueInfo;

    fn event(date: &str, venue: &str, is_new: bool) -> Event {
        Event::new(date, "8pm", venue, VenueInfo::default(), "desc", "", "music", is_new)
    }

    fn state(events: Vec<Event>) -> SessionState {
        SessionState::new(events, vec![], String::new())
    }

    #[test]
    fn test_sort_key_from_selector_value() {
        assert_eq!(SortKey::from("date"), SortKey::Date);
        assert_eq!(SortKey::from("venue"), SortKey::Venue);
        assert_eq!(SortKey::from("category"), SortKey::Unsorted);
        assert_eq!(SortKey::from(""), SortKey::Unsorted);
    }

    #[test]
    fn test_sort_key_cycles_through_all_values() {
        let key = SortKey::Unsorted;
        assert_eq!(key.next(), SortKey::Date);
        assert_eq!(key.next().next(), SortKey::Venue);
        assert_eq!(key.next().next().next(), SortKey::Unsorted);
    }

    #[test]
    fn test_date_sort_is_non_decreasing() {
        let s = state(vec![
            event("2025-09-03", "C", false),
            event("2025-08-30", "A", false),
            event("2025-09-01T20:00:00Z", "B", false),
            event("2025-09-01", "D", false),
        ]);
        let rows = render_rows(&s, SortKey::Date);
        let dates: Vec<_> = rows.iter().map(|r| parse_timestamp(&r.date).unwrap()).collect();

        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(rows[0].venue, "A");
        assert_eq!(rows[3].venue, "C");
    }

    #[test]
    fn test_date_sort_puts_unparseable_last_in_fetch_order() {
        let s = state(vec![
            event("soon", "X", false),
            event("2025-09-03", "C", false),
            event("tbd", "Y", false),
            event("2025-08-01", "A", false),
        ]);
        let venues: Vec<_> =
            render_rows(&s, SortKey::Date).into_iter().map(|r| r.venue).collect();

        assert_eq!(venues, vec!["A", "C", "X", "Y"]);
    }

    #[test]
    fn test_venue_sort_is_case_aware() {
        let s = state(vec![
            event("", "banana Bar", false),
            event("", "Apple Hall", false),
            event("", "apple hall", false),
            event("", "Cellar", false),
        ]);
        let venues: Vec<_> =
            render_rows(&s, SortKey::Venue).into_iter().map(|r| r.venue).collect();

        assert_eq!(venues, vec!["apple hall", "Apple Hall", "banana Bar", "Cellar"]);
        assert!(venues.windows(2).all(|w| compare_venues(&w[0], &w[1]) != Ordering::Greater));
    }

    #[test]
    fn test_unsorted_keeps_fetch_order() {
        let s = state(vec![
            event("2025-09-03", "Z", false),
            event("2025-08-01", "A", false),
            event("2025-08-15", "M", false),
        ]);
        let indices: Vec<_> =
            render_rows(&s, SortKey::Unsorted).into_iter().map(|r| r.source_index).collect();

        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_sorting_does_not_touch_stored_order() {
        let s = state(vec![event("2025-09-03", "Z", false), event("2025-08-01", "A", false)]);
        let before = s.clone();

        let _ = render_rows(&s, SortKey::Date);
        let _ = render_rows(&s, SortKey::Venue);

        assert_eq!(s, before);
    }

    #[test]
    fn test_render_is_idempotent() {
        let s = state(vec![
            event("2025-09-03", "Z", true),
            event("2025-08-01", "a", false),
            event("2025-08-01", "A", false),
        ]);
        for key in [SortKey::Unsorted, SortKey::Date, SortKey::Venue] {
            assert_eq!(render_rows(&s, key), render_rows(&s, key));
        }
    }

    #[test]
    fn test_badge_iff_new() {
        let s = state(vec![event("", "A", true), event("", "B", false)]);
        let rows = render_rows(&s, SortKey::Unsorted);

        assert_eq!(rows[0].description_cell(), "desc new chitte!");
        assert_eq!(rows[1].description_cell(), "desc");
        assert!(!rows[1].description_cell().contains(NEW_BADGE));
    }
}
