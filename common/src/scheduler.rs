//! Polling cadences for the two data sources.
//!
//! Each source has its own timer; one source failing or running late never
//! holds the other back. Times are milliseconds on a monotonic clock owned by
//! the caller.

use crate::error::FetchError;

// =============================================================================
// Cadence
// =============================================================================

/// Fires when more than `interval_ms` has passed since the last attempt, or
/// immediately if there has never been one.
#[derive(Clone, Copy, Debug)]
pub struct Cadence {
    interval_ms: u64,
    last_ms: Option<u64>,
}

impl Cadence {
    pub const fn new(interval_ms: u64) -> Self { Self { interval_ms, last_ms: None } }

    #[inline]
    pub const fn interval_ms(&self) -> u64 { self.interval_ms }

    #[inline]
    pub const fn last_ms(&self) -> Option<u64> { self.last_ms }

    pub const fn is_due(
        &self,
        now_ms: u64,
    ) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    /// Record an attempt at `now_ms`, successful or not.
    #[inline]
    pub fn mark(
        &mut self,
        now_ms: u64,
    ) {
        self.last_ms = Some(now_ms);
    }
}

// =============================================================================
// Sources
// =============================================================================

/// A polled data source.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Source {
    /// Current conditions and forecast.
    Primary,
    Uv,
}

impl Source {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Uv => "uv",
        }
    }
}

/// Independent cadences for both sources.
#[derive(Clone, Copy, Debug)]
pub struct Scheduler {
    primary: Cadence,
    uv: Cadence,
}

impl Scheduler {
    pub const fn new(
        primary_interval_ms: u64,
        uv_interval_ms: u64,
    ) -> Self {
        Self { primary: Cadence::new(primary_interval_ms), uv: Cadence::new(uv_interval_ms) }
    }

    /// The source to fetch this tick, if any. Primary wins a tie; the UV
    /// fetch then runs on the next tick because the primary attempt has been
    /// marked.
    pub const fn next_due(
        &self,
        now_ms: u64,
    ) -> Option<Source> {
        if self.primary.is_due(now_ms) {
            Some(Source::Primary)
        } else if self.uv.is_due(now_ms) {
            Some(Source::Uv)
        } else {
            None
        }
    }

    pub fn mark_attempt(
        &mut self,
        source: Source,
        now_ms: u64,
    ) {
        match source {
            Source::Primary => self.primary.mark(now_ms),
            Source::Uv => self.uv.mark(now_ms),
        }
    }
}

// =============================================================================
// Retry
// =============================================================================

/// Run `attempt` until it succeeds, fails with a non-transient error, or has
/// been retried `retries` times. Returns the last error on failure.
pub fn fetch_with_retry<T>(
    source: Source,
    retries: u8,
    mut attempt: impl FnMut() -> Result<T, FetchError>,
) -> Result<T, FetchError> {
    let mut tries: u8 = 0;
    loop {
        match attempt() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && tries < retries => {
                tries += 1;
                log::warn!("{} fetch failed ({err}), retry {tries}/{retries}", source.name());
            }
            Err(err) => return Err(err),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
