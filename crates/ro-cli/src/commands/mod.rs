//! CLI subcommand implementations.

pub mod check;
pub mod days;
pub mod links;
pub mod performer;
pub mod timetable;
pub mod util;
pub mod watch;
