//! Dirty sets and the last-rendered state.
//!
//! The panel has no frame buffer, so what is on the glass is only known
//! through [`RenderedState`]: the values committed by the last successful draw
//! of each region. `None` means the region has never been drawn and compares
//! unequal to any observation.

use heapless::Vec;
use time::Date;

use crate::config::{REGION_COUNT, RegionId};
use crate::snapshot::{DaySummary, FORECAST_DAYS, HOURLY_POINTS, PRECIP_SLOTS};
use crate::timefmt::TimeLabel;

// =============================================================================
// Dirty Set
// =============================================================================

/// Set of regions, one bit per [`RegionId`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DirtySet(u8);

const _: () = assert!(REGION_COUNT <= 8);

impl DirtySet {
    pub const EMPTY: Self = Self(0);

    /// Every region.
    pub const ALL: Self = Self((1 << REGION_COUNT) - 1);

    /// Regions fed by the primary provider.
    pub const PRIMARY: Self = Self::EMPTY
        .with(RegionId::CurrentConditions)
        .with(RegionId::Forecast)
        .with(RegionId::PrecipitationGraph)
        .with(RegionId::Astronomy)
        .with(RegionId::TemperatureGraph);

    /// Regions fed by the UV provider.
    pub const UV: Self = Self::EMPTY.with(RegionId::UvBand);

    /// Regions driven by the clock.
    pub const CLOCK: Self = Self::EMPTY.with(RegionId::Time);

    /// Regions re-checked on every clock tick: the clock itself, plus the
    /// night icon flip at sunrise/sunset and the moon phase rollover.
    pub const CLOCK_DRIVEN: Self = Self::CLOCK.with(RegionId::CurrentConditions).with(RegionId::Astronomy);

    #[inline]
    #[must_use]
    pub const fn with(
        self,
        id: RegionId,
    ) -> Self {
        Self(self.0 | (1 << id as u8))
    }

    #[inline]
    pub fn insert(
        &mut self,
        id: RegionId,
    ) {
        *self = self.with(id);
    }

    #[inline]
    pub const fn contains(
        self,
        id: RegionId,
    ) -> bool {
        self.0 & (1 << id as u8) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    #[inline]
    pub const fn len(self) -> u32 { self.0.count_ones() }

    #[inline]
    #[must_use]
    pub const fn union(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn intersect(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 & other.0)
    }

    /// Members in region index order.
    pub fn iter(self) -> impl Iterator<Item = RegionId> { RegionId::ALL.into_iter().filter(move |&id| self.contains(id)) }
}

// =============================================================================
// Committed Values
// =============================================================================

/// Clock as last drawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimeCommit {
    pub minute_of_day: u16,
    pub date: Date,
}

/// Current conditions as last drawn.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ConditionsCommit {
    pub temperature: f32,
    pub code: u16,
    /// The icon was drawn in its night variant.
    pub night: bool,
}

/// Astronomy panel as last drawn.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AstronomyCommit {
    pub wind_speed: f32,
    pub wind_bearing: f32,
    pub cloud_pct: u8,
    pub humidity_pct: u8,
    pub sunrise: i64,
    pub sunset: i64,
    pub moon_phase: u8,
}

/// UV line as last drawn.
#[derive(Clone, PartialEq, Debug)]
pub enum UvCommit {
    /// "N/A" is showing.
    Unavailable,
    Reading { max: f32, time_label: TimeLabel },
}

/// Forecast day summaries as last drawn.
pub type ForecastCommit = Vec<DaySummary, FORECAST_DAYS>;

// =============================================================================
// Rendered State
// =============================================================================

/// Last values committed to the display, per region.
///
/// Mutated only by the orchestrator, right after a region is drawn.
#[derive(Clone, Debug, Default)]
pub struct RenderedState {
    pub time: Option<TimeCommit>,
    pub conditions: Option<ConditionsCommit>,
    pub uv: Option<UvCommit>,
    pub astronomy: Option<AstronomyCommit>,
    pub forecast: Option<ForecastCommit>,
    pub precip: Option<[f32; PRECIP_SLOTS]>,
    pub hourly: Option<[f32; HOURLY_POINTS]>,
    /// Regions whose static labels are already on screen.
    static_drawn: DirtySet,
}

impl RenderedState {
    pub fn new() -> Self { Self::default() }

    /// Has `id` ever been committed?
    pub const fn is_committed(
        &self,
        id: RegionId,
    ) -> bool {
        match id {
            RegionId::Time => self.time.is_some(),
            RegionId::CurrentConditions => self.conditions.is_some(),
            RegionId::UvBand => self.uv.is_some(),
            RegionId::Astronomy => self.astronomy.is_some(),
            RegionId::Forecast => self.forecast.is_some(),
            RegionId::PrecipitationGraph => self.precip.is_some(),
            RegionId::TemperatureGraph => self.hourly.is_some(),
        }
    }

    /// Regions that have been committed at least once.
    pub fn committed(&self) -> DirtySet {
        let mut set = DirtySet::EMPTY;
        for id in RegionId::ALL {
            if self.is_committed(id) {
                set.insert(id);
            }
        }
        set
    }

    #[inline]
    pub const fn static_drawn(
        &self,
        id: RegionId,
    ) -> bool {
        self.static_drawn.contains(id)
    }

    #[inline]
    pub fn mark_static_drawn(
        &mut self,
        id: RegionId,
    ) {
        self.static_drawn.insert(id);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
