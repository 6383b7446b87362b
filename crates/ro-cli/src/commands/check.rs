//! Check command: how much of the page made it into the schedule.

use std::io::Write;

use anyhow::Result;
use ro_core::{BuildReport, ScheduleIndex};

use super::util::format_day;

pub fn run<W: Write>(writer: &mut W, report: &BuildReport) -> Result<()> {
    let index = &report.index;
    let entries: Vec<_> = index.all_entries().iter().collect();
    let venues = ScheduleIndex::distinct_venues(&entries);

    writeln!(writer, "Entries:  {}", index.len())?;
    writeln!(writer, "Days:     {}", index.distinct_days().len())?;
    for day in index.distinct_days() {
        writeln!(
            writer,
            "  {}  {}",
            format_day(day),
            index.filter_by_day(day).len()
        )?;
    }
    writeln!(writer, "Venues:   {}", venues.len())?;
    writeln!(writer, "Skipped:  {}", report.issues.len())?;
    for issue in &report.issues {
        writeln!(writer, "  {issue}")?;
    }
    Ok(())
}
