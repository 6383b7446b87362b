//! Immutable, queryable collection of schedule entries.
//!
//! A [`ScheduleIndex`] is built once per refresh and never edited. Every
//! query borrows from it and returns a derived view, so readers holding an
//! older index keep a consistent picture until they pick up a new one.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::entry::ScheduleEntry;
use crate::types::Venue;

/// All entries of one event, from a single refresh.
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    entries: Arc<[ScheduleEntry]>,
}

/// Entries of one venue, ordered by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueGroup<'a> {
    pub venue: &'a Venue,
    pub entries: Vec<&'a ScheduleEntry>,
}

impl ScheduleIndex {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// The full set of entries, in source order.
    pub fn all_entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries labeled with the given nominal day, including slots that
    /// rolled over past midnight.
    pub fn filter_by_day(&self, date: NaiveDate) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.nominal_date() == date)
            .collect()
    }

    /// Entries that have not ended at `as_of`.
    pub fn filter_upcoming(&self, as_of: NaiveDateTime) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.end() > as_of)
            .collect()
    }

    /// Every nominal day present, ascending.
    pub fn distinct_days(&self) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self
            .entries
            .iter()
            .map(ScheduleEntry::nominal_date)
            .collect();
        days.sort_unstable();
        days.dedup();
        days
    }

    /// The earliest nominal day, if any.
    pub fn default_day(&self) -> Option<NaiveDate> {
        self.entries.iter().map(ScheduleEntry::nominal_date).min()
    }

    /// Unique venues of `within`, in first-seen order.
    pub fn distinct_venues<'a>(within: &[&'a ScheduleEntry]) -> Vec<&'a Venue> {
        let mut seen = HashSet::new();
        within
            .iter()
            .map(|entry| entry.venue())
            .filter(|venue| seen.insert(*venue))
            .collect()
    }

    /// Groups `entries` per venue. Groups follow [`Self::distinct_venues`]
    /// order; each group is sorted by start time.
    pub fn group_by_venue<'a>(entries: &[&'a ScheduleEntry]) -> Vec<VenueGroup<'a>> {
        Self::distinct_venues(entries)
            .into_iter()
            .map(|venue| {
                let mut slots: Vec<&ScheduleEntry> = entries
                    .iter()
                    .copied()
                    .filter(|entry| entry.venue() == venue)
                    .collect();
                slots.sort_by_key(|entry| entry.start());
                VenueGroup {
                    venue,
                    entries: slots,
                }
            })
            .collect()
    }

    /// Entries whose performer matches `name` exactly. Zero or several
    /// matches are both valid answers.
    pub fn find_by_performer(&self, name: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.performer() == name)
            .collect()
    }

    /// Runs a composed query.
    pub fn query(&self, query: &ScheduleQuery) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|entry| query.upcoming_as_of.is_none_or(|as_of| entry.end() > as_of))
            .filter(|entry| query.day.is_none_or(|day| entry.nominal_date() == day))
            .collect()
    }
}

/// The page-level filters: optionally hide finished slots, optionally pick
/// one nominal day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub upcoming_as_of: Option<NaiveDateTime>,
    pub day: Option<NaiveDate>,
}
