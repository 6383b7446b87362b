//! Schedule building: rows → parsed rows → resolved entries → index.

use crate::entry::ScheduleEntry;
use crate::error::{BuildIssue, EmptySourceError, TimeResolutionError};
use crate::index::ScheduleIndex;
use crate::resolve::resolve_slot;
use crate::row::{RawRow, RawTable, TableContext, parse_row};

/// Result of one build: the index plus every row that was skipped.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub index: ScheduleIndex,
    pub issues: Vec<BuildIssue>,
}

/// Builds a schedule from all tables of one refresh.
///
/// Rows that fail to parse or resolve are skipped and recorded; the rest of
/// their table and all following tables are still processed. Only a source
/// with no tables at all fails the build.
pub fn build_schedule(tables: &[RawTable]) -> Result<BuildReport, EmptySourceError> {
    if tables.is_empty() {
        return Err(EmptySourceError);
    }

    let mut entries = Vec::new();
    let mut issues = Vec::new();

    for (table_index, table) in tables.iter().enumerate() {
        let context = TableContext {
            table_index,
            venue: &table.venue,
            nominal_date: table.nominal_date,
        };

        for (row_index, row) in table.rows.iter().enumerate() {
            match build_entry(context, row_index, row) {
                Ok(entry) => entries.push(entry),
                Err(issue) => {
                    tracing::warn!(%issue, "skipping running-order row");
                    issues.push(issue);
                }
            }
        }
    }

    tracing::debug!(
        tables = tables.len(),
        entries = entries.len(),
        skipped = issues.len(),
        "built schedule"
    );

    Ok(BuildReport {
        index: ScheduleIndex::new(entries),
        issues,
    })
}

fn build_entry(
    context: TableContext<'_>,
    row_index: usize,
    row: &RawRow,
) -> Result<ScheduleEntry, BuildIssue> {
    let parsed = parse_row(context, row_index, row)?;
    let performer = parsed.performer.to_string();
    let resolve_issue = |source: TimeResolutionError| BuildIssue::Resolve {
        table_index: context.table_index,
        row_index,
        performer: performer.clone(),
        source,
    };

    let (start, end) = resolve_slot(parsed.nominal_date, parsed.start_time, parsed.end_time)
        .map_err(resolve_issue)?;
    ScheduleEntry::new(parsed, start, end).map_err(resolve_issue)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, TimeDelta};

    use super::*;
    use crate::error::RowParseError;
    use crate::resolve::parse_nominal_date;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn midnight_slot_round_trip() {
        let tables = vec![RawTable {
            venue: "Main Stage".to_string(),
            nominal_date: parse_nominal_date("13.08.2025").unwrap(),
            rows: vec![RawRow::new("23:00  00:30", "Insomnium", None)],
        }];
        let report = build_schedule(&tables).unwrap();
        assert!(report.issues.is_empty());

        let entry = &report.index.all_entries()[0];
        assert_eq!(entry.start(), at("2025-08-13T23:00"));
        assert_eq!(entry.end(), at("2025-08-14T00:30"));
        assert_eq!(entry.duration(), TimeDelta::minutes(90));
        assert_eq!(entry.raw_time_range(), "23:00 - 00:30");
    }

    #[test]
    fn six_o_clock_start_does_not_roll() {
        let tables = vec![RawTable {
            venue: "Wera Tool Rebel Stage".to_string(),
            nominal_date: parse_nominal_date("14.08.2025").unwrap(),
            rows: vec![RawRow::new("06:00  06:30", "Sunrise Set", None)],
        }];
        let report = build_schedule(&tables).unwrap();
        assert_eq!(report.index.all_entries()[0].start(), at("2025-08-14T06:00"));
    }

    #[test]
    fn malformed_row_is_skipped_and_recorded() {
        let tables = vec![
            RawTable {
                venue: "T-Stage".to_string(),
                nominal_date: parse_nominal_date("15.08.2025").unwrap(),
                rows: vec![
                    RawRow::new("18:00  18:45", "First", None),
                    RawRow::new("19:00", "Broken", None),
                    RawRow::new("20:00  20:45", "Third", None),
                ],
            },
            RawTable {
                venue: "Main Stage".to_string(),
                nominal_date: parse_nominal_date("15.08.2025").unwrap(),
                rows: vec![RawRow::new("21:00  22:00", "Fourth", None)],
            },
        ];
        let report = build_schedule(&tables).unwrap();

        let names: Vec<&str> = report
            .index
            .all_entries()
            .iter()
            .map(|entry| entry.performer().as_str())
            .collect();
        assert_eq!(names, ["First", "Third", "Fourth"]);
        assert_eq!(
            report.issues,
            vec![BuildIssue::Parse(RowParseError::MissingEndTime {
                table_index: 0,
                row_index: 1,
                raw: "19:00".to_string(),
            })]
        );
    }

    #[test]
    fn inverted_slot_is_excluded_not_corrected() {
        let tables = vec![RawTable {
            venue: "Camel Stage".to_string(),
            nominal_date: parse_nominal_date("16.08.2025").unwrap(),
            rows: vec![
                RawRow::new("02:00  23:00", "Inverted", None),
                RawRow::new("12:00  12:30", "Fine", None),
            ],
        }];
        let report = build_schedule(&tables).unwrap();
        assert_eq!(report.index.len(), 1);
        assert_eq!(report.issues.len(), 1);
        let issue = &report.issues[0];
        assert!(matches!(issue, BuildIssue::Resolve { performer, .. } if performer == "Inverted"));
        assert_eq!((issue.table_index(), issue.row_index()), (0, 0));
    }

    #[test]
    fn table_with_only_bad_rows_contributes_nothing() {
        let tables = vec![
            RawTable {
                venue: "Ficken Party Stage".to_string(),
                nominal_date: parse_nominal_date("13.08.2025").unwrap(),
                rows: vec![RawRow::new("tba", "Surprise", None), RawRow::default()],
            },
            RawTable {
                venue: "Main Stage".to_string(),
                nominal_date: parse_nominal_date("13.08.2025").unwrap(),
                rows: vec![RawRow::new("16:00  17:00", "Headliner", None)],
            },
        ];
        let report = build_schedule(&tables).unwrap();
        assert_eq!(report.index.len(), 1);
        assert_eq!(report.issues.len(), 2);
    }

    #[test]
    fn empty_source_fails() {
        assert_eq!(build_schedule(&[]).unwrap_err(), EmptySourceError);
    }

    #[test]
    fn table_without_rows_is_not_an_error() {
        let tables = vec![RawTable {
            venue: "Main Stage".to_string(),
            nominal_date: parse_nominal_date("13.08.2025").unwrap(),
            rows: Vec::new(),
        }];
        let report = build_schedule(&tables).unwrap();
        assert!(report.index.is_empty());
        assert!(report.issues.is_empty());
    }
}
