//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

use crate::commands::util::parse_local_time;
use crate::commands::{
    days::DaysArgs, links::LinksArgs, performer::PerformerArgs, timetable::TimetableArgs,
    watch::WatchArgs,
};

/// Festival running order.
///
/// Reads the published running order, resolves slots that run past midnight,
/// and shows timetables, link lists and single performers.
#[derive(Debug, Parser)]
#[command(name = "ro", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read a saved running-order page instead of fetching it.
    #[arg(long, global = true, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Festival-local time for "upcoming" filters (e.g. 2025-08-13T22:00).
    #[arg(long, global = true, value_parser = parse_local_time)]
    pub now: Option<NaiveDateTime>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the festival days.
    Days(DaysArgs),

    /// Show one day's slots per venue.
    Timetable(TimetableArgs),

    /// List performer links per venue, ordered by time.
    Links(LinksArgs),

    /// Look up the slot of a performer.
    Performer(PerformerArgs),

    /// Report entry counts and skipped rows.
    Check,

    /// Keep showing what is playing now and next.
    Watch(WatchArgs),
}
