//! Links command: performer links per venue, as Markdown.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use ro_core::{ScheduleEntry, ScheduleIndex};

use super::util::{ViewArgs, format_day, select};

#[derive(Debug, Default, Args)]
pub struct LinksArgs {
    #[command(flatten)]
    pub view: ViewArgs,
}

fn link_line(entry: &ScheduleEntry) -> String {
    match entry.link() {
        Some(link) => format!("{} [{}]({link})", entry.raw_time_range(), entry.performer()),
        None => format!("{} {}", entry.raw_time_range(), entry.performer()),
    }
}

pub fn run<W: Write>(
    writer: &mut W,
    index: &ScheduleIndex,
    args: &LinksArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let selection = select(index, args.view, now);
    let Some(day) = selection.day.filter(|_| !selection.entries.is_empty()) else {
        writeln!(writer, "No slots.")?;
        return Ok(());
    };

    writeln!(writer, "# {}", format_day(day))?;
    for group in ScheduleIndex::group_by_venue(&selection.entries) {
        writeln!(writer)?;
        writeln!(writer, "**{}**", group.venue)?;
        writeln!(writer)?;
        for entry in group.entries {
            writeln!(writer, "{}", link_line(entry))?;
        }
    }
    Ok(())
}
