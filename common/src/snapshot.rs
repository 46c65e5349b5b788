//! Fetched data snapshots and the store that holds the latest of each.
//!
//! Snapshots are replaced wholesale: a fetch either produces a complete,
//! plausible [`ConditionsSnapshot`] or nothing changes.

use heapless::{String, Vec};
use time::Date;

use crate::config::Units;
use crate::timefmt::TimeLabel;

// =============================================================================
// Sizes
// =============================================================================

/// Points in the hourly temperature series.
pub const HOURLY_POINTS: usize = 9;

/// Slots in the precipitation probability series.
pub const PRECIP_SLOTS: usize = 8;

/// Days shown in the forecast region.
pub const FORECAST_DAYS: usize = 4;

/// 3-hourly samples making up one forecast day.
pub const SAMPLES_PER_DAY: usize = 8;

/// Upper bound on forecast samples per fetch (5 days of 3-hourly data).
pub const MAX_FORECAST_SAMPLES: usize = 40;

/// Sample within a day whose code represents that day (around midday).
pub const REPRESENTATIVE_SAMPLE: usize = 4;

/// Capacity of the condition description.
pub const DESCRIPTION_LEN: usize = 48;

const _: () = assert!(FORECAST_DAYS * SAMPLES_PER_DAY <= MAX_FORECAST_SAMPLES);
const _: () = assert!(REPRESENTATIVE_SAMPLE < SAMPLES_PER_DAY);

// =============================================================================
// Primary Conditions
// =============================================================================

/// One 3-hourly forecast sample.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ForecastSample {
    /// Local calendar date of the sample.
    pub date: Date,
    /// Local hour of day.
    pub hour: u8,
    pub temperature: f32,
    pub code: u16,
}

/// Current conditions plus forecast, as returned by the primary provider.
#[derive(Clone, PartialEq, Debug)]
pub struct ConditionsSnapshot {
    pub temperature: f32,
    pub code: u16,
    pub wind_speed: f32,
    /// Degrees clockwise from north.
    pub wind_bearing: f32,
    pub cloud_pct: u8,
    pub humidity_pct: u8,
    /// Unix seconds, UTC.
    pub sunrise: i64,
    /// Unix seconds, UTC.
    pub sunset: i64,
    pub description: String<DESCRIPTION_LEN>,
    pub hourly_temps: [f32; HOURLY_POINTS],
    /// Fractions in `0.0..=1.0`.
    pub precip_probability: [f32; PRECIP_SLOTS],
    pub forecast: Vec<ForecastSample, MAX_FORECAST_SAMPLES>,
}

impl ConditionsSnapshot {
    /// Current temperature is finite and inside the plausible range for `units`.
    pub fn is_plausible(
        &self,
        units: Units,
    ) -> bool {
        let (lo, hi) = units.plausible_range();
        self.temperature >= lo && self.temperature <= hi
    }

    /// Per-day summaries for the forecast region.
    pub fn day_summaries(&self) -> Vec<DaySummary, FORECAST_DAYS> { day_summaries(&self.forecast) }
}

/// Min/max and representative condition for one forecast day.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DaySummary {
    pub date: Date,
    pub min: f32,
    pub max: f32,
    pub code: u16,
}

/// Index of the first sample whose date differs from the first sample's date.
///
/// 0 when the series is empty or all samples share one date.
pub fn next_day_index(samples: &[ForecastSample]) -> usize {
    let Some(first) = samples.first() else {
        return 0;
    };
    samples.iter().position(|s| s.date != first.date).unwrap_or(0)
}

/// Group samples into days starting at the first full day after today.
///
/// Each day is `SAMPLES_PER_DAY` consecutive samples; a short final day is
/// summarised from whatever samples remain.
pub fn day_summaries(samples: &[ForecastSample]) -> Vec<DaySummary, FORECAST_DAYS> {
    let mut days = Vec::new();
    let start = next_day_index(samples);
    for chunk in samples[start..].chunks(SAMPLES_PER_DAY).take(FORECAST_DAYS) {
        let mut min = chunk[0].temperature;
        let mut max = chunk[0].temperature;
        for s in &chunk[1..] {
            if s.temperature < min {
                min = s.temperature;
            }
            if s.temperature > max {
                max = s.temperature;
            }
        }
        let code = chunk[REPRESENTATIVE_SAMPLE.min(chunk.len() - 1)].code;
        days.push(DaySummary { date: chunk[0].date, min, max, code }).ok();
    }
    days
}

// =============================================================================
// UV
// =============================================================================

/// Raw UV provider result.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct UvReading {
    pub current: f32,
    pub max: f32,
    /// Unix seconds, UTC, of the daily maximum.
    pub max_time_utc: i64,
}

/// UV values as shown on the panel.
#[derive(Clone, PartialEq, Debug)]
pub struct UvSnapshot {
    pub current: f32,
    pub max: f32,
    /// Local time of day of the maximum.
    pub max_time_label: TimeLabel,
    pub valid: bool,
    /// Unix seconds of the fetch that produced this snapshot.
    pub updated_at: i64,
}

impl UvSnapshot {
    /// Snapshot for a source that has no usable reading.
    pub fn invalid(updated_at: i64) -> Self {
        Self {
            current: -1.0,
            max: -1.0,
            max_time_label: TimeLabel::new(),
            valid: false,
            updated_at,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Health of one data source.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SourceState {
    #[default]
    NeverFetched,
    Valid,
    Invalid,
}

impl SourceState {
    #[inline]
    pub const fn is_valid(self) -> bool { matches!(self, Self::Valid) }
}

/// Latest snapshot of each source.
#[derive(Default)]
pub struct SnapshotStore {
    conditions: Option<ConditionsSnapshot>,
    uv: Option<UvSnapshot>,
    conditions_state: SourceState,
    uv_state: SourceState,
}

impl SnapshotStore {
    pub const fn new() -> Self {
        Self {
            conditions: None,
            uv: None,
            conditions_state: SourceState::NeverFetched,
            uv_state: SourceState::NeverFetched,
        }
    }

    pub fn replace_conditions(
        &mut self,
        snapshot: ConditionsSnapshot,
    ) {
        self.conditions = Some(snapshot);
        self.conditions_state = SourceState::Valid;
    }

    pub fn replace_uv(
        &mut self,
        snapshot: UvSnapshot,
    ) {
        self.uv_state = if snapshot.valid { SourceState::Valid } else { SourceState::Invalid };
        self.uv = Some(snapshot);
    }

    /// Mark the UV source unusable; the panel shows N/A.
    pub fn invalidate_uv(
        &mut self,
        now: i64,
    ) {
        self.replace_uv(UvSnapshot::invalid(now));
    }

    #[inline]
    pub const fn conditions(&self) -> Option<&ConditionsSnapshot> { self.conditions.as_ref() }

    #[inline]
    pub const fn uv(&self) -> Option<&UvSnapshot> { self.uv.as_ref() }

    #[inline]
    pub const fn conditions_state(&self) -> SourceState { self.conditions_state }

    #[inline]
    pub const fn uv_state(&self) -> SourceState { self.uv_state }

    /// Both sources hold a valid snapshot.
    #[inline]
    pub const fn all_valid(&self) -> bool { self.conditions_state.is_valid() && self.uv_state.is_valid() }
}

// =============================================================================
// Unit Tests
// =============================================================================
