//! Raw running-order tables and the refresh boundary.
//!
//! This crate supplies the core with raw tables:
//! - HTML scanning: tables, headings, cells and performer links
//! - Day plans: nominal dates by table position
//! - Sources: in-memory pages, saved pages and the live page over HTTP
//! - Caching: a freshness window around the built schedule

mod cache;
mod error;
pub mod html;
mod http;
mod plan;
mod source;

pub use cache::{DEFAULT_TTL, ScheduleCache};
pub use error::SourceError;
pub use html::{HtmlTable, extract_tables};
pub use http::{DEFAULT_TIMEOUT, DEFAULT_URL, HttpSource};
pub use plan::{DayPlan, SUMMER_BREEZE_2025};
pub use source::{HtmlDocument, HtmlFile, RawTableSource};
