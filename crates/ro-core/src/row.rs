//! Raw running-order rows and the row parser.
//!
//! The table source hands over rows with named fields instead of positional
//! columns. [`parse_row`] validates one row against that shape and splits its
//! time range into clock tokens; resolving those tokens to absolute instants
//! is left to [`crate::resolve`].

use chrono::{NaiveDate, NaiveTime};

use crate::error::RowParseError;
use crate::types::{Performer, Venue};

/// Separator between start and end clock times in the source text.
pub const TIME_RANGE_SEPARATOR: &str = "  ";

/// Separator used in the display form of a time range.
pub const DISPLAY_SEPARATOR: &str = " - ";

/// Clock token format (24-hour).
pub const CLOCK_FORMAT: &str = "%H:%M";

/// One row of a running-order table as supplied by the table source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Start and end clock times, e.g. `"23:00  23:45"`.
    pub time_range_text: String,
    /// Visible performer text.
    pub performer_text: String,
    /// Detail page of the performer, if the cell links to one.
    pub performer_link: Option<String>,
}

impl RawRow {
    pub fn new(
        time_range_text: impl Into<String>,
        performer_text: impl Into<String>,
        performer_link: Option<String>,
    ) -> Self {
        Self {
            time_range_text: time_range_text.into(),
            performer_text: performer_text.into(),
            performer_link,
        }
    }
}

/// All rows of one (venue, nominal date) block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub venue: String,
    pub nominal_date: NaiveDate,
    pub rows: Vec<RawRow>,
}

/// Context shared by every row of a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableContext<'a> {
    pub table_index: usize,
    pub venue: &'a str,
    pub nominal_date: NaiveDate,
}

/// A row that passed validation but has no absolute times yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub venue: Venue,
    pub nominal_date: NaiveDate,
    pub performer: Performer,
    pub link: Option<String>,
    /// Display form, e.g. `"23:00 - 23:45"`.
    pub raw_time_range: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Parses one raw row in the context of its table.
pub fn parse_row(
    context: TableContext<'_>,
    row_index: usize,
    row: &RawRow,
) -> Result<ParsedRow, RowParseError> {
    let table_index = context.table_index;
    let raw = row.time_range_text.clone();

    let venue = Venue::new(context.venue).map_err(|_| RowParseError::MissingVenue {
        table_index,
        row_index,
        raw: raw.clone(),
    })?;

    let (start_token, end_token) = split_time_range(&raw).map_err(|kind| match kind {
        SplitFailure::MissingEnd => RowParseError::MissingEndTime {
            table_index,
            row_index,
            raw: raw.clone(),
        },
        SplitFailure::Malformed => RowParseError::MalformedTimeRange {
            table_index,
            row_index,
            raw: raw.clone(),
        },
        SplitFailure::InvalidToken(token) => RowParseError::InvalidClockTime {
            table_index,
            row_index,
            raw: raw.clone(),
            token,
        },
    })?;

    let clock = |token: &str| {
        parse_clock(token).ok_or_else(|| RowParseError::InvalidClockTime {
            table_index,
            row_index,
            raw: raw.clone(),
            token: token.to_string(),
        })
    };
    let start_time = clock(start_token)?;
    let end_time = clock(end_token)?;

    let performer =
        Performer::new(&row.performer_text).map_err(|_| RowParseError::MissingPerformer {
            table_index,
            row_index,
            raw: raw.clone(),
        })?;

    let link = match row.performer_link.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(link) if link.contains(char::is_whitespace) => {
            return Err(RowParseError::MalformedLink {
                table_index,
                row_index,
                raw: raw.clone(),
                link: link.to_string(),
            });
        }
        Some(link) => Some(link.to_string()),
    };

    Ok(ParsedRow {
        venue,
        nominal_date: context.nominal_date,
        performer,
        link,
        raw_time_range: format!("{start_token}{DISPLAY_SEPARATOR}{end_token}"),
        start_time,
        end_time,
    })
}

#[derive(Debug)]
enum SplitFailure {
    MissingEnd,
    Malformed,
    InvalidToken(String),
}

/// Splits `"HH:MM  HH:MM"` into its two clock tokens.
fn split_time_range(text: &str) -> Result<(&str, &str), SplitFailure> {
    let tokens: Vec<&str> = text
        .trim()
        .split(TIME_RANGE_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    match tokens.as_slice() {
        [start, end] => Ok((*start, *end)),
        [single] if parse_clock(single).is_some() => Err(SplitFailure::MissingEnd),
        [single] => Err(SplitFailure::InvalidToken((*single).to_string())),
        _ => Err(SplitFailure::Malformed),
    }
}

/// Parses a strict `HH:MM` token.
pub fn parse_clock(token: &str) -> Option<NaiveTime> {
    if token.len() != 5 {
        return None;
    }
    NaiveTime::parse_from_str(token, CLOCK_FORMAT).ok()
}
