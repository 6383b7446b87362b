//! Performer command: where and when a performer plays.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use ro_core::ScheduleIndex;
use ro_core::types::normalize_whitespace;

use super::util::{format_day, format_duration, format_instant};

#[derive(Debug, Args)]
pub struct PerformerArgs {
    /// Performer name, as printed in the running order.
    pub name: String,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, index: &ScheduleIndex, args: &PerformerArgs) -> Result<()> {
    let name = normalize_whitespace(&args.name);
    let mut matches = index.find_by_performer(&name);
    matches.sort_by_key(|entry| entry.start());

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&matches)?)?;
        return Ok(());
    }

    if matches.is_empty() {
        writeln!(writer, "No slot found for \"{name}\".")?;
        return Ok(());
    }

    for (i, entry) in matches.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "{}", entry.performer())?;
        writeln!(writer, "  Venue:    {}", entry.venue())?;
        writeln!(writer, "  Day:      {}", format_day(entry.nominal_date()))?;
        writeln!(writer, "  Time:     {}", entry.raw_time_range())?;
        writeln!(
            writer,
            "  Runs:     {} to {} ({})",
            format_instant(entry.start()),
            format_instant(entry.end()),
            format_duration(entry.duration())
        )?;
        if let Some(link) = entry.link() {
            writeln!(writer, "  Link:     {link}")?;
        }
    }
    Ok(())
}
