//! In-memory event store keyed by timestamp.

use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::event::{Event, truncate_to_minute};

/// Events keyed by their minute-precision timestamp.
///
/// There is at most one description per timestamp: adding at an occupied
/// timestamp replaces the previous description. Iteration is always in
/// ascending timestamp order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventStore {
    events: BTreeMap<NaiveDateTime, String>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry at `timestamp`.
    pub fn add(&mut self, timestamp: NaiveDateTime, description: impl Into<String>) {
        self.events
            .insert(truncate_to_minute(timestamp), description.into());
    }

    pub fn insert(&mut self, event: Event) {
        self.add(event.timestamp, event.description);
    }

    pub fn get(&self, timestamp: NaiveDateTime) -> Option<&str> {
        self.events
            .get(&truncate_to_minute(timestamp))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All entries, ascending by timestamp.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (NaiveDateTime, &str)> + '_ {
        self.events.iter().map(|(ts, desc)| (*ts, desc.as_str()))
    }

    /// Entries whose date is `day`, ascending by time of day.
    pub fn entries_on(&self, day: NaiveDate) -> impl DoubleEndedIterator<Item = (NaiveDateTime, &str)> + '_ {
        let start = day.and_time(NaiveTime::MIN);
        let end = match day.checked_add_days(Days::new(1)) {
            Some(next) => Bound::Excluded(next.and_time(NaiveTime::MIN)),
            None => Bound::Unbounded,
        };

        self.events
            .range((Bound::Included(start), end))
            .map(|(ts, desc)| (*ts, desc.as_str()))
    }

    /// Entries strictly after `cutoff`, ascending.
    pub fn retained(&self, cutoff: NaiveDateTime) -> impl DoubleEndedIterator<Item = (NaiveDateTime, &str)> + '_ {
        self.events
            .range((Bound::Excluded(cutoff), Bound::Unbounded))
            .map(|(ts, desc)| (*ts, desc.as_str()))
    }
}

impl FromIterator<Event> for EventStore {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut store = EventStore::new();
        for event in iter {
            store.insert(event);
        }
        store
    }
}
