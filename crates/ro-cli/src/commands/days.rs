//! Days command for listing the festival days.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use ro_core::ScheduleIndex;
use serde::Serialize;

use super::util::format_day;

#[derive(Debug, Default, Args)]
pub struct DaysArgs {
    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct DaySummary {
    date: NaiveDate,
    slots: usize,
    venues: usize,
}

pub fn run<W: Write>(writer: &mut W, index: &ScheduleIndex, args: &DaysArgs) -> Result<()> {
    let summaries: Vec<DaySummary> = index
        .distinct_days()
        .into_iter()
        .map(|date| {
            let entries = index.filter_by_day(date);
            DaySummary {
                date,
                slots: entries.len(),
                venues: ScheduleIndex::distinct_venues(&entries).len(),
            }
        })
        .collect();

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summaries)?)?;
        return Ok(());
    }

    for summary in &summaries {
        writeln!(
            writer,
            "{}  {} slots on {} stages",
            format_day(summary.date),
            summary.slots,
            summary.venues
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::util::fixtures;

    use insta::assert_snapshot;

    #[test]
    fn days_lists_each_nominal_day() {
        let index = fixtures::index();
        let mut output = Vec::new();
        run(&mut output, &index, &DaysArgs::default()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Wed 13.08.2025  4 slots on 2 stages
        Thu 14.08.2025  2 slots on 2 stages
        ");
    }

    #[test]
    fn days_json() {
        let index = fixtures::index();
        let mut output = Vec::new();
        run(&mut output, &index, &DaysArgs { json: true }).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed[0]["date"], "2025-08-13");
        assert_eq!(parsed[0]["slots"], 4);
        assert_eq!(parsed[1]["venues"], 2);
    }
}
