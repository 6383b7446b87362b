//! Nominal dates per table position.
//!
//! The running-order page carries no machine-readable date per table; the
//! day of each table follows from its position on the page.

use chrono::NaiveDate;
use ro_core::{RawTable, parse_nominal_date};

use crate::error::SourceError;
use crate::html::HtmlTable;

/// Day labels of the 2025 page, by table position.
pub const SUMMER_BREEZE_2025: [&str; 17] = [
    "13.08.2025",
    "13.08.2025",
    "13.08.2025",
    "13.08.2025",
    "14.08.2025",
    "14.08.2025",
    "14.08.2025",
    "14.08.2025",
    "15.08.2025",
    "15.08.2025",
    "15.08.2025",
    "15.08.2025",
    "16.08.2025",
    "16.08.2025",
    "16.08.2025",
    "16.08.2025",
    "12.08.2025",
];

/// Maps table positions to nominal dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    days: Vec<NaiveDate>,
}

impl DayPlan {
    pub const fn new(days: Vec<NaiveDate>) -> Self {
        Self { days }
    }

    /// Builds a plan from `dd.mm.yyyy` labels.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, SourceError> {
        let days = labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                parse_nominal_date(label).map_err(|source| SourceError::InvalidDayLabel {
                    label: label.to_string(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { days })
    }

    pub fn day_for(&self, table_index: usize) -> Option<NaiveDate> {
        self.days.get(table_index).copied()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Attaches venue and nominal date to extracted tables.
    ///
    /// Tables past the end of the plan are skipped with a warning. A table
    /// without heading keeps an empty venue, so its rows are reported by the
    /// row parser instead of disappearing here.
    pub fn assign(&self, tables: Vec<HtmlTable>) -> Vec<RawTable> {
        let total = tables.len();
        let mut assigned = Vec::with_capacity(total.min(self.days.len()));

        for (table_index, table) in tables.into_iter().enumerate() {
            let Some(nominal_date) = self.day_for(table_index) else {
                tracing::warn!(
                    table_index,
                    total,
                    planned = self.days.len(),
                    "table has no planned day, skipping"
                );
                continue;
            };
            if table.heading.is_none() {
                tracing::warn!(table_index, "table has no heading");
            }
            assigned.push(RawTable {
                venue: table.heading.unwrap_or_default(),
                nominal_date,
                rows: table.rows,
            });
        }
        assigned
    }
}

impl Default for DayPlan {
    fn default() -> Self {
        let days = SUMMER_BREEZE_2025
            .iter()
            .filter_map(|label| parse_nominal_date(label).ok())
            .collect();
        Self { days }
    }
}
