//! Core normalization logic for festival running orders.
//!
//! This crate turns raw running-order rows into a queryable schedule:
//! - Row parsing: validating the named row shape and splitting time ranges
//! - Time resolution: absolute instants with the overnight rollover rule
//! - Indexing: day, upcoming, venue and performer views over the entries

mod build;
mod entry;
pub mod error;
mod index;
pub mod resolve;
pub mod row;
pub mod types;

pub use build::{BuildReport, build_schedule};
pub use entry::ScheduleEntry;
pub use error::{BuildIssue, EmptySourceError, RowParseError, TimeResolutionError};
pub use index::{ScheduleIndex, ScheduleQuery, VenueGroup};
pub use resolve::{
    ROLLOVER_CUTOFF, UPCOMING_LOOKAHEAD, parse_nominal_date, resolve_instant, resolve_slot,
    upcoming_reference,
};
pub use row::{ParsedRow, RawRow, RawTable, TableContext, parse_row};
pub use types::{Performer, ValidationError, Venue};
