//! Error taxonomy for the normalization pipeline.
//!
//! Row and entry errors are recovered by the builder: the offending row is
//! skipped and the error is recorded as a [`BuildIssue`]. Only
//! [`EmptySourceError`] aborts a refresh.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A raw row that does not match the expected input shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowParseError {
    /// The time range has a start token but no end token.
    #[error("table {table_index}, row {row_index}: missing end time in {raw:?}")]
    MissingEndTime {
        table_index: usize,
        row_index: usize,
        raw: String,
    },

    /// The time range is empty or has more than two tokens.
    #[error("table {table_index}, row {row_index}: malformed time range {raw:?}")]
    MalformedTimeRange {
        table_index: usize,
        row_index: usize,
        raw: String,
    },

    /// A token is not a 24-hour `HH:MM` clock time.
    #[error("table {table_index}, row {row_index}: invalid clock time {token:?} in {raw:?}")]
    InvalidClockTime {
        table_index: usize,
        row_index: usize,
        raw: String,
        token: String,
    },

    /// The performer cell carried no text.
    #[error("table {table_index}, row {row_index}: missing performer for {raw:?}")]
    MissingPerformer {
        table_index: usize,
        row_index: usize,
        raw: String,
    },

    /// The table context has no venue name.
    #[error("table {table_index}, row {row_index}: missing venue for {raw:?}")]
    MissingVenue {
        table_index: usize,
        row_index: usize,
        raw: String,
    },

    /// The performer link is present but not a usable reference.
    #[error("table {table_index}, row {row_index}: malformed link {link:?} for {raw:?}")]
    MalformedLink {
        table_index: usize,
        row_index: usize,
        raw: String,
        link: String,
    },
}

impl RowParseError {
    /// Position of the source table within the page.
    pub const fn table_index(&self) -> usize {
        match self {
            Self::MissingEndTime { table_index, .. }
            | Self::MalformedTimeRange { table_index, .. }
            | Self::InvalidClockTime { table_index, .. }
            | Self::MissingPerformer { table_index, .. }
            | Self::MissingVenue { table_index, .. }
            | Self::MalformedLink { table_index, .. } => *table_index,
        }
    }

    /// Position of the row within its table.
    pub const fn row_index(&self) -> usize {
        match self {
            Self::MissingEndTime { row_index, .. }
            | Self::MalformedTimeRange { row_index, .. }
            | Self::InvalidClockTime { row_index, .. }
            | Self::MissingPerformer { row_index, .. }
            | Self::MissingVenue { row_index, .. }
            | Self::MalformedLink { row_index, .. } => *row_index,
        }
    }

    /// The raw time-range text of the rejected row.
    pub fn raw(&self) -> &str {
        match self {
            Self::MissingEndTime { raw, .. }
            | Self::MalformedTimeRange { raw, .. }
            | Self::InvalidClockTime { raw, .. }
            | Self::MissingPerformer { raw, .. }
            | Self::MissingVenue { raw, .. }
            | Self::MalformedLink { raw, .. } => raw,
        }
    }
}

/// A slot whose resolved end does not come after its start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("slot on {nominal_date} ends at {end}, which is not after its start {start}")]
pub struct TimeResolutionError {
    pub nominal_date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// The raw source produced no tables at all.
///
/// An empty schedule cannot be told apart from a fetch outage, so callers
/// must report the data as unavailable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("schedule source yielded no tables")]
pub struct EmptySourceError;

/// A recoverable problem recorded while building a schedule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildIssue {
    /// The row was rejected by the row parser.
    #[error(transparent)]
    Parse(#[from] RowParseError),

    /// The row parsed but its times do not form a valid slot.
    #[error("table {table_index}, row {row_index} ({performer}): {source}")]
    Resolve {
        table_index: usize,
        row_index: usize,
        performer: String,
        #[source]
        source: TimeResolutionError,
    },
}

impl BuildIssue {
    /// Position of the source table within the page.
    pub const fn table_index(&self) -> usize {
        match self {
            Self::Parse(err) => err.table_index(),
            Self::Resolve { table_index, .. } => *table_index,
        }
    }

    /// Position of the row within its table.
    pub const fn row_index(&self) -> usize {
        match self {
            Self::Parse(err) => err.row_index(),
            Self::Resolve { row_index, .. } => *row_index,
        }
    }
}
