//! Shared utilities for CLI commands.

use anyhow::bail;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Utc};
use clap::Args;
use ro_core::{ScheduleEntry, ScheduleIndex, ScheduleQuery, parse_nominal_date, upcoming_reference};

/// Accepted formats for `--now`.
const LOCAL_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Day and upcoming filters shared by the schedule views.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ViewArgs {
    /// Day to show (13.08.2025 or 2025-08-13). Defaults to the earliest day.
    #[arg(long, value_parser = parse_day)]
    pub day: Option<NaiveDate>,

    /// Only show slots that have not ended yet.
    #[arg(long)]
    pub upcoming: bool,
}

/// Entries picked by a view, with the day they belong to.
#[derive(Debug)]
pub struct Selection<'a> {
    pub day: Option<NaiveDate>,
    pub entries: Vec<&'a ScheduleEntry>,
}

/// Applies the upcoming filter, then the day filter.
///
/// Without an explicit day, the earliest day left after the upcoming filter
/// is used. Entries come back sorted by start.
pub fn select<'a>(index: &'a ScheduleIndex, view: ViewArgs, now: NaiveDateTime) -> Selection<'a> {
    let upcoming_as_of = view.upcoming.then_some(now);
    let day = view.day.or_else(|| {
        index
            .query(&ScheduleQuery {
                upcoming_as_of,
                day: None,
            })
            .iter()
            .map(|entry| entry.nominal_date())
            .min()
    });

    let mut entries = index.query(&ScheduleQuery {
        upcoming_as_of,
        day,
    });
    entries.sort_by_key(|entry| entry.start());
    Selection { day, entries }
}

/// Festival-local time: `fixed` when given, otherwise the current time
/// shifted by the festival's offset from UTC.
pub fn local_now(fixed: Option<NaiveDateTime>) -> NaiveDateTime {
    fixed.unwrap_or_else(|| upcoming_reference(Utc::now().naive_utc()))
}

/// Parses a day as `13.08.2025` or `2025-08-13`.
pub fn parse_day(s: &str) -> anyhow::Result<NaiveDate> {
    if let Ok(day) = parse_nominal_date(s) {
        return Ok(day);
    }
    if let Ok(day) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        return Ok(day);
    }
    bail!("Invalid day: {s}. Use 13.08.2025 or 2025-08-13")
}

/// Parses a festival-local date-time such as `2025-08-13T22:00`.
pub fn parse_local_time(s: &str) -> anyhow::Result<NaiveDateTime> {
    LOCAL_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s.trim(), format).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid time: {s}. Use e.g. 2025-08-13T22:00"))
}

/// Formats a day like `Wed 13.08.2025`.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%a %d.%m.%Y").to_string()
}

/// Formats an instant like `13.08. 23:00`.
pub fn format_instant(instant: NaiveDateTime) -> String {
    instant.format("%d.%m. %H:%M").to_string()
}

/// Formats a duration as "Xh Ym" if >= 1 hour, "Xm" otherwise.
pub fn format_duration(duration: TimeDelta) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_local_time(s).unwrap()
    }

    #[test]
    fn parse_day_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 13).unwrap();
        assert_eq!(parse_day("13.08.2025").unwrap(), expected);
        assert_eq!(parse_day("2025-08-13").unwrap(), expected);
        assert!(parse_day("13/08/2025").is_err());
    }

    #[test]
    fn parse_local_time_formats() {
        assert_eq!(at("2025-08-13 22:00"), at("2025-08-13T22:00"));
        assert_eq!(at("2025-08-13T22:00:00"), at("2025-08-13T22:00"));
        assert!(parse_local_time("22:00").is_err());
    }

    #[test]
    fn local_now_prefers_fixed_time() {
        assert_eq!(local_now(Some(at("2025-08-13T22:00"))), at("2025-08-13T22:00"));
        let live = local_now(None);
        let utc = Utc::now().naive_utc();
        assert!(live > utc + TimeDelta::minutes(119));
    }

    #[test]
    fn format_duration_hours_and_minutes() {
        assert_eq!(format_duration(TimeDelta::minutes(90)), "1h 30m");
        assert_eq!(format_duration(TimeDelta::minutes(45)), "45m");
        assert_eq!(format_duration(TimeDelta::minutes(-5)), "0m");
    }

    #[test]
    fn format_day_includes_weekday() {
        assert_eq!(
            format_day(NaiveDate::from_ymd_opt(2025, 8, 13).unwrap()),
            "Wed 13.08.2025"
        );
    }

    #[test]
    fn select_defaults_to_earliest_day() {
        let index = fixtures::index();
        let selection = select(&index, ViewArgs::default(), at("2025-08-10T12:00"));
        assert_eq!(selection.day, NaiveDate::from_ymd_opt(2025, 8, 13));
        assert_eq!(selection.entries.len(), 4);
    }

    #[test]
    fn select_upcoming_moves_default_day_forward() {
        let index = fixtures::index();
        let view = ViewArgs {
            day: None,
            upcoming: true,
        };
        let selection = select(&index, view, at("2025-08-14T03:00"));
        assert_eq!(selection.day, NaiveDate::from_ymd_opt(2025, 8, 14));
        let names: Vec<&str> = selection
            .entries
            .iter()
            .map(|entry| entry.performer().as_str())
            .collect();
        assert_eq!(names, ["Hasenscheisse", "Sabaton"]);
    }

    #[test]
    fn select_keeps_rolled_over_slot_on_its_day() {
        let index = fixtures::index();
        let view = ViewArgs {
            day: NaiveDate::from_ymd_opt(2025, 8, 13),
            upcoming: true,
        };
        let selection = select(&index, view, at("2025-08-14T00:45"));
        let names: Vec<&str> = selection
            .entries
            .iter()
            .map(|entry| entry.performer().as_str())
            .collect();
        assert_eq!(names, ["Nachtblut"]);
    }
}
