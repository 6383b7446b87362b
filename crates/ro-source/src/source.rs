//! Raw table sources.

use std::path::{Path, PathBuf};

use ro_core::RawTable;

use crate::error::SourceError;
use crate::html::extract_tables;
use crate::plan::DayPlan;

/// Supplies one raw table per (venue, nominal date) block.
pub trait RawTableSource {
    fn raw_tables(&self) -> Result<Vec<RawTable>, SourceError>;
}

/// A running-order page already held in memory.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    html: String,
    plan: DayPlan,
}

impl HtmlDocument {
    pub const fn new(html: String, plan: DayPlan) -> Self {
        Self { html, plan }
    }
}

impl RawTableSource for HtmlDocument {
    fn raw_tables(&self) -> Result<Vec<RawTable>, SourceError> {
        let tables = extract_tables(&self.html);
        tracing::debug!(tables = tables.len(), bytes = self.html.len(), "extracted tables");
        Ok(self.plan.assign(tables))
    }
}

/// A running-order page saved to disk.
#[derive(Debug, Clone)]
pub struct HtmlFile {
    path: PathBuf,
    plan: DayPlan,
}

impl HtmlFile {
    pub fn new(path: impl Into<PathBuf>, plan: DayPlan) -> Self {
        Self {
            path: path.into(),
            plan,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawTableSource for HtmlFile {
    fn raw_tables(&self) -> Result<Vec<RawTable>, SourceError> {
        let html = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        HtmlDocument::new(html, self.plan.clone()).raw_tables()
    }
}
