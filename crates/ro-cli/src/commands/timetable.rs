//! Timetable command: one day's slots, venue by venue.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use ro_core::{ScheduleIndex, VenueGroup};
use serde::Serialize;

use super::util::{ViewArgs, format_day, format_duration, select};

#[derive(Debug, Default, Args)]
pub struct TimetableArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TimetableJson<'a> {
    day: Option<NaiveDate>,
    venues: Vec<VenueGroup<'a>>,
}

pub fn run<W: Write>(
    writer: &mut W,
    index: &ScheduleIndex,
    args: &TimetableArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let selection = select(index, args.view, now);
    let groups = ScheduleIndex::group_by_venue(&selection.entries);

    if args.json {
        let json = TimetableJson {
            day: selection.day,
            venues: groups,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(());
    }

    let Some(day) = selection.day.filter(|_| !groups.is_empty()) else {
        if args.view.upcoming {
            writeln!(writer, "No upcoming slots.")?;
        } else {
            writeln!(writer, "No slots.")?;
        }
        return Ok(());
    };

    writeln!(writer, "{}", format_day(day))?;
    for group in &groups {
        writeln!(writer)?;
        writeln!(writer, "{}", group.venue)?;
        for entry in &group.entries {
            writeln!(
                writer,
                "  {}  {} ({})",
                entry.raw_time_range(),
                entry.performer(),
                format_duration(entry.duration())
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::util::{fixtures, parse_local_time};

    use insta::assert_snapshot;

    fn render(args: &TimetableArgs, now: &str) -> String {
        let index = fixtures::index();
        let mut output = Vec::new();
        run(&mut output, &index, args, parse_local_time(now).unwrap()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn timetable_groups_venues_in_time_order() {
        let output = render(&TimetableArgs::default(), "2025-08-01T12:00");
        assert_snapshot!(output, @r"
        Wed 13.08.2025

        Main Stage
          20:00 - 21:00  Kreator (1h 0m)
          22:30 - 23:45  Arch Enemy (1h 15m)

        T-Stage
          23:00 - 00:30  Insomnium (1h 30m)
          01:00 - 02:00  Nachtblut (1h 0m)
        ");
    }

    #[test]
    fn timetable_upcoming_after_everything() {
        let args = TimetableArgs {
            view: ViewArgs {
                day: None,
                upcoming: true,
            },
            json: false,
        };
        let output = render(&args, "2025-08-20T12:00");
        assert_snapshot!(output, @"No upcoming slots.");
    }

    #[test]
    fn timetable_json_carries_resolved_instants() {
        let args = TimetableArgs {
            view: ViewArgs {
                day: NaiveDate::from_ymd_opt(2025, 8, 13),
                upcoming: false,
            },
            json: true,
        };
        let output = render(&args, "2025-08-01T12:00");
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["day"], "2025-08-13");
        let t_stage = &parsed["venues"][1];
        assert_eq!(t_stage["venue"], "T-Stage");
        assert_eq!(t_stage["entries"][1]["performer"], "Nachtblut");
        assert_eq!(t_stage["entries"][1]["start"], "2025-08-14T01:00:00");
        assert_eq!(t_stage["entries"][1]["nominal_date"], "2025-08-13");
        assert!(t_stage["entries"][1].get("link").is_none());
    }
}
