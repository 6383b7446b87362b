//! Time-bounded memoization of the built schedule.
//!
//! Fetching and building is the expensive part of a refresh. Within the
//! freshness window every caller gets the same [`ScheduleIndex`]; after it,
//! the next refresh builds a new index and replaces the cached one. Readers
//! that still hold the old `Arc` keep a consistent, if outdated, view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ro_core::ScheduleIndex;

/// Default freshness window (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug)]
pub struct ScheduleCache {
    ttl: Duration,
    current: Option<(Instant, Arc<ScheduleIndex>)>,
}

impl ScheduleCache {
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached index if it was stored less than one TTL before `now`.
    pub fn fresh(&self, now: Instant) -> Option<Arc<ScheduleIndex>> {
        self.current
            .as_ref()
            .filter(|(stored_at, _)| now.saturating_duration_since(*stored_at) < self.ttl)
            .map(|(_, index)| Arc::clone(index))
    }

    /// Replaces the cached index.
    pub fn store(&mut self, now: Instant, index: ScheduleIndex) -> Arc<ScheduleIndex> {
        let index = Arc::new(index);
        self.current = Some((now, Arc::clone(&index)));
        index
    }

    /// Returns the fresh index or runs `refresh` to build a new one.
    ///
    /// A failed refresh leaves the previous entry in place.
    pub fn get_or_try_refresh<E>(
        &mut self,
        now: Instant,
        refresh: impl FnOnce() -> Result<ScheduleIndex, E>,
    ) -> Result<Arc<ScheduleIndex>, E> {
        if let Some(index) = self.fresh(now) {
            tracing::debug!("schedule cache hit");
            return Ok(index);
        }
        tracing::debug!(ttl_secs = self.ttl.as_secs(), "schedule cache expired, refreshing");
        let index = refresh()?;
        Ok(self.store(now, index))
    }

    pub fn invalidate(&mut self) {
        self.current = None;
    }
}

impl Default for ScheduleCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
