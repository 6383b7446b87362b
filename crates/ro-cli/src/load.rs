//! Turning the configured source into a built schedule.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ro_core::{BuildReport, RawTable, ScheduleIndex, build_schedule};
use ro_source::{DayPlan, HtmlFile, HttpSource, RawTableSource};
use tokio::runtime::Runtime;

use crate::config::Config;

/// Where the running order comes from on each refresh.
#[derive(Debug)]
pub enum ScheduleLoader {
    /// A page saved to disk.
    File(HtmlFile),
    /// The live page, fetched on a runtime shared by every refresh.
    Http {
        source: HttpSource,
        plan: DayPlan,
        runtime: Runtime,
    },
}

impl ScheduleLoader {
    /// Picks the saved page when one is given, the configured URL otherwise.
    pub fn from_config(config: &Config, html: Option<&Path>) -> Result<Self> {
        let plan = config.day_plan().context("invalid table_days in configuration")?;
        match html {
            Some(path) => Ok(Self::File(HtmlFile::new(PathBuf::from(path), plan))),
            None => {
                let source = HttpSource::new(config.source_url.clone(), config.request_timeout())
                    .context("failed to set up HTTP source")?;
                let runtime = Runtime::new().context("failed to initialize tokio runtime")?;
                Ok(Self::Http {
                    source,
                    plan,
                    runtime,
                })
            }
        }
    }

    fn raw_tables(&self) -> Result<Vec<RawTable>> {
        match self {
            Self::File(file) => {
                tracing::debug!(path = %file.path().display(), "reading saved running order");
                Ok(file.raw_tables()?)
            }
            Self::Http {
                source,
                plan,
                runtime,
            } => {
                let document = runtime.block_on(source.fetch_document(plan.clone()))?;
                Ok(document.raw_tables()?)
            }
        }
    }

    /// Fetches and builds the schedule, keeping the list of skipped rows.
    pub fn load_report(&self) -> Result<BuildReport> {
        let report = self
            .raw_tables()
            .and_then(|tables| Ok(build_schedule(&tables)?))
            .context("schedule data unavailable")?;
        tracing::debug!(
            entries = report.index.len(),
            skipped = report.issues.len(),
            "schedule loaded"
        );
        Ok(report)
    }

    pub fn load_index(&self) -> Result<ScheduleIndex> {
        Ok(self.load_report()?.index)
    }
}
