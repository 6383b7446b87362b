//! Normalized schedule entries.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};

use crate::error::TimeResolutionError;
use crate::row::ParsedRow;
use crate::types::{Performer, Venue};

/// One performance slot with absolute, date-carrying times.
///
/// `nominal_date` is the organizer's day label and is never adjusted;
/// `start` and `end` are the resolved instants, which may fall on the next
/// calendar day for slots after midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    venue: Venue,
    nominal_date: NaiveDate,
    performer: Performer,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(rename = "time")]
    raw_time_range: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    mid: NaiveDateTime,
    #[serde(rename = "duration_minutes", serialize_with = "serialize_minutes")]
    duration: TimeDelta,
}

impl ScheduleEntry {
    /// Builds an entry from a parsed row and its resolved instants.
    pub fn new(
        row: ParsedRow,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, TimeResolutionError> {
        let duration = end - start;
        if duration <= TimeDelta::zero() {
            return Err(TimeResolutionError {
                nominal_date: row.nominal_date,
                start,
                end,
            });
        }
        let mid = start + duration / 2;

        Ok(Self {
            venue: row.venue,
            nominal_date: row.nominal_date,
            performer: row.performer,
            link: row.link,
            raw_time_range: row.raw_time_range,
            start,
            end,
            mid,
            duration,
        })
    }

    pub const fn venue(&self) -> &Venue {
        &self.venue
    }

    pub const fn nominal_date(&self) -> NaiveDate {
        self.nominal_date
    }

    pub const fn performer(&self) -> &Performer {
        &self.performer
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Display form of the time range, e.g. `"23:00 - 00:30"`.
    pub fn raw_time_range(&self) -> &str {
        &self.raw_time_range
    }

    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Halfway point between start and end.
    pub const fn mid(&self) -> NaiveDateTime {
        self.mid
    }

    pub const fn duration(&self) -> TimeDelta {
        self.duration
    }
}

fn serialize_minutes<S: Serializer>(duration: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_minutes())
}
