use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use ro_source::ScheduleCache;
use tracing_subscriber::EnvFilter;

use ro_cli::commands::util::local_now;
use ro_cli::commands::{check, days, links, performer, timetable, watch};
use ro_cli::{Cli, Commands, Config, ScheduleLoader};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let loader = ScheduleLoader::from_config(&config, cli.html.as_deref())?;
    let now = local_now(cli.now);
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Days(args) => days::run(&mut stdout, &loader.load_index()?, args)?,
        Commands::Timetable(args) => {
            timetable::run(&mut stdout, &loader.load_index()?, args, now)?;
        }
        Commands::Links(args) => links::run(&mut stdout, &loader.load_index()?, args, now)?,
        Commands::Performer(args) => performer::run(&mut stdout, &loader.load_index()?, args)?,
        Commands::Check => check::run(&mut stdout, &loader.load_report()?)?,
        Commands::Watch(args) => {
            let mut cache = ScheduleCache::new(config.cache_ttl());
            let clock = watch::SystemClock { fixed: cli.now };
            watch::run(&mut stdout, args, &mut cache, &clock, || loader.load_index())?;
        }
    }

    Ok(())
}
