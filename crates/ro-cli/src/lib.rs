//! Festival running-order CLI library.
//!
//! This crate provides the CLI interface over the normalized schedule.

mod cli;
pub mod commands;
mod config;
mod load;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use load::ScheduleLoader;
