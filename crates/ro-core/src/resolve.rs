//! Absolute start/end resolution with the overnight rollover rule.
//!
//! Stages run past midnight, so a slot printed under a nominal day at
//! `01:30` actually happens early the next morning. Any clock time strictly
//! before [`ROLLOVER_CUTOFF`] is moved to the following calendar day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::TimeResolutionError;

/// Clock times before this belong to the day after the nominal date.
pub const ROLLOVER_CUTOFF: NaiveTime = match NaiveTime::from_hms_opt(6, 0, 0) {
    Some(time) => time,
    None => panic!("invalid rollover cutoff"),
};

/// Offset applied to a UTC clock reading to get festival local time when
/// deciding which slots are still upcoming.
pub const UPCOMING_LOOKAHEAD: TimeDelta = TimeDelta::hours(2);

/// Nominal date format used by the organizer (`13.08.2025`).
pub const NOMINAL_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses an organizer day label such as `13.08.2025`.
pub fn parse_nominal_date(label: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(label.trim(), NOMINAL_DATE_FORMAT)
}

/// Combines a nominal date with a clock time, rolling early-morning times
/// over to the next calendar day.
pub fn resolve_instant(nominal_date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    let instant = nominal_date.and_time(time);
    if time < ROLLOVER_CUTOFF {
        instant + TimeDelta::days(1)
    } else {
        instant
    }
}

/// Resolves both ends of a slot. The end must come strictly after the start.
pub fn resolve_slot(
    nominal_date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Result<(NaiveDateTime, NaiveDateTime), TimeResolutionError> {
    let start = resolve_instant(nominal_date, start);
    let end = resolve_instant(nominal_date, end);
    if end <= start {
        return Err(TimeResolutionError {
            nominal_date,
            start,
            end,
        });
    }
    Ok((start, end))
}

/// Festival-local reference time for "upcoming" comparisons, given the
/// current UTC wall clock.
pub fn upcoming_reference(utc_now: NaiveDateTime) -> NaiveDateTime {
    utc_now + UPCOMING_LOOKAHEAD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_nominal_date(s).unwrap()
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn parses_organizer_date_label() {
        assert_eq!(
            date("13.08.2025"),
            NaiveDate::from_ymd_opt(2025, 8, 13).unwrap()
        );
        assert!(parse_nominal_date("2025-08-13").is_err());
    }

    #[test]
    fn early_morning_rolls_to_next_day() {
        let d = date("15.08.2025");
        assert_eq!(resolve_instant(d, hm(1, 30)), at("2025-08-16T01:30"));
        assert_eq!(resolve_instant(d, hm(0, 0)), at("2025-08-16T00:00"));
        assert_eq!(resolve_instant(d, hm(5, 59)), at("2025-08-16T05:59"));
    }

    #[test]
    fn cutoff_itself_does_not_roll() {
        let d = date("14.08.2025");
        assert_eq!(resolve_instant(d, hm(6, 0)), at("2025-08-14T06:00"));
        assert_eq!(resolve_instant(d, hm(23, 59)), at("2025-08-14T23:59"));
    }

    #[test]
    fn slot_crossing_midnight() {
        let (start, end) = resolve_slot(date("13.08.2025"), hm(23, 0), hm(0, 30)).unwrap();
        assert_eq!(start, at("2025-08-13T23:00"));
        assert_eq!(end, at("2025-08-14T00:30"));
    }

    #[test]
    fn slot_entirely_after_midnight() {
        let (start, end) = resolve_slot(date("13.08.2025"), hm(1, 0), hm(2, 15)).unwrap();
        assert_eq!(start, at("2025-08-14T01:00"));
        assert_eq!(end, at("2025-08-14T02:15"));
    }

    #[test]
    fn inverted_slot_is_an_error() {
        let err = resolve_slot(date("13.08.2025"), hm(1, 0), hm(23, 0)).unwrap_err();
        assert_eq!(err.start, at("2025-08-14T01:00"));
        assert_eq!(err.end, at("2025-08-13T23:00"));
    }

    #[test]
    fn zero_length_slot_is_an_error() {
        assert!(resolve_slot(date("13.08.2025"), hm(20, 0), hm(20, 0)).is_err());
    }

    #[test]
    fn upcoming_reference_adds_lookahead() {
        assert_eq!(
            upcoming_reference(at("2025-08-13T21:00")),
            at("2025-08-13T23:00")
        );
    }
}
