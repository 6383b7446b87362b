//! Watch command: what is on now and next, per venue.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use ro_core::{ScheduleEntry, ScheduleIndex};
use ro_source::ScheduleCache;

use super::util::{format_instant, local_now};

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between redraws.
    #[arg(long, default_value_t = 60)]
    pub interval: u64,

    /// Stop after this many redraws.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub iterations: Option<u32>,
}

fn slot_line<W: Write>(writer: &mut W, label: &str, entry: &ScheduleEntry) -> Result<()> {
    writeln!(
        writer,
        "  {label:<5} {} {}  {}",
        entry.nominal_date().format("%d.%m."),
        entry.raw_time_range(),
        entry.performer()
    )?;
    Ok(())
}

/// Writes the slot playing at `now` and the one after it, for every venue
/// that still has something to play. Slots carry their nominal day.
pub fn render_upcoming<W: Write>(
    writer: &mut W,
    index: &ScheduleIndex,
    now: NaiveDateTime,
) -> Result<()> {
    let mut upcoming = index.filter_upcoming(now);
    upcoming.sort_by_key(|entry| entry.start());

    writeln!(writer, "{}", format_instant(now))?;
    if upcoming.is_empty() {
        writeln!(writer, "Nothing left to play.")?;
        return Ok(());
    }

    for group in ScheduleIndex::group_by_venue(&upcoming) {
        writeln!(writer, "{}", group.venue)?;
        let mut slots = group.entries.into_iter();
        let Some(first) = slots.next() else {
            continue;
        };
        if first.start() <= now {
            slot_line(writer, "now", first)?;
            if let Some(next) = slots.next() {
                slot_line(writer, "next", next)?;
            }
        } else {
            slot_line(writer, "next", first)?;
        }
    }
    Ok(())
}

/// Time sources of the watch loop.
pub trait WatchClock {
    /// Monotonic time, measured against the cache window.
    fn instant(&self) -> Instant;

    /// Festival-local time, used for the now/next split.
    fn local(&self) -> NaiveDateTime;
}

/// The real clocks, with an optional fixed festival-local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    pub fixed: Option<NaiveDateTime>,
}

impl WatchClock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn local(&self) -> NaiveDateTime {
        local_now(self.fixed)
    }
}

/// Redraws the upcoming view until the iteration limit is reached.
///
/// The schedule is rebuilt through `refresh` only when `cache` has gone
/// stale. A failed refresh is reported for that round and retried on the
/// next one.
pub fn run<W, C, R>(
    writer: &mut W,
    args: &WatchArgs,
    cache: &mut ScheduleCache,
    clock: &C,
    mut refresh: R,
) -> Result<()>
where
    W: Write,
    C: WatchClock,
    R: FnMut() -> Result<ScheduleIndex>,
{
    let interval = Duration::from_secs(args.interval);
    let mut rounds = 0u32;

    loop {
        match cache.get_or_try_refresh(clock.instant(), &mut refresh) {
            Ok(index) => render_upcoming(writer, &index, clock.local())?,
            Err(err) => {
                tracing::warn!(error = %err, "schedule refresh failed");
                writeln!(writer, "Schedule data unavailable: {err:#}")?;
            }
        }
        writer.flush()?;

        rounds += 1;
        if args.iterations.is_some_and(|limit| rounds >= limit) {
            return Ok(());
        }
        writeln!(writer)?;
        thread::sleep(interval);
    }
}
