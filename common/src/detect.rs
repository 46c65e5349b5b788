//! Change detection.
//!
//! Compares what the panel should show now ([`Observation`]) with what it
//! last showed ([`RenderedState`]) and returns the regions that need a redraw.
//! Every numeric comparison goes through [`differs`], so the result does not
//! depend on which side is "old".

use crate::classify::{current_icon, icon_for_code};
use crate::config::RegionId;
use crate::providers::Clock;
use crate::render::{
    AstronomyCommit,
    ConditionsCommit,
    DirtySet,
    ForecastCommit,
    RenderedState,
    TimeCommit,
    UvCommit,
};
use crate::snapshot::{DaySummary, HOURLY_POINTS, PRECIP_SLOTS, SnapshotStore};
use crate::thresholds::{
    PROBABILITY_TOLERANCE,
    TEMP_TOLERANCE,
    UV_TOLERANCE,
    WIND_BEARING_TOLERANCE,
    WIND_SPEED_TOLERANCE,
    differs,
};
use crate::timefmt::minute_of_day;

// =============================================================================
// Observation
// =============================================================================

/// Display values derived from the store and the clock at one instant.
///
/// `None` means there is nothing to show for that region yet.
#[derive(Clone, Debug, Default)]
pub struct Observation {
    pub time: Option<TimeCommit>,
    pub conditions: Option<ConditionsCommit>,
    pub uv: Option<UvCommit>,
    pub astronomy: Option<AstronomyCommit>,
    pub forecast: Option<ForecastCommit>,
    pub precip: Option<[f32; PRECIP_SLOTS]>,
    pub hourly: Option<[f32; HOURLY_POINTS]>,
}

impl Observation {
    /// Derive display values from the latest snapshots.
    pub fn gather<C: Clock + ?Sized>(
        store: &SnapshotStore,
        clock: &C,
    ) -> Self {
        let now_utc = clock.now_utc();
        let local = clock.now_local();

        let mut obs = Self {
            time: Some(TimeCommit { minute_of_day: minute_of_day(local.time()), date: local.date() }),
            ..Self::default()
        };

        if let Some(c) = store.conditions() {
            let icon = current_icon(c.code, now_utc.unix_timestamp(), c.sunrise, c.sunset);
            obs.conditions = Some(ConditionsCommit {
                temperature: c.temperature,
                code: c.code,
                night: icon != icon_for_code(c.code),
            });
            obs.astronomy = Some(AstronomyCommit {
                wind_speed: c.wind_speed,
                wind_bearing: c.wind_bearing,
                cloud_pct: c.cloud_pct,
                humidity_pct: c.humidity_pct,
                sunrise: c.sunrise,
                sunset: c.sunset,
                moon_phase: clock.lunar_phase_index(now_utc.date(), now_utc.hour()),
            });
            obs.forecast = Some(c.day_summaries());
            obs.precip = Some(c.precip_probability);
            obs.hourly = Some(c.hourly_temps);
        }

        if let Some(uv) = store.uv() {
            obs.uv = Some(if uv.valid {
                UvCommit::Reading { max: uv.max, time_label: uv.max_time_label.clone() }
            } else {
                UvCommit::Unavailable
            });
        }

        obs
    }

    /// Copy the observed value of `id` into `rendered`. Called after `id`
    /// has been drawn.
    pub fn commit(
        &self,
        id: RegionId,
        rendered: &mut RenderedState,
    ) {
        match id {
            RegionId::Time => rendered.time = self.time,
            RegionId::CurrentConditions => rendered.conditions = self.conditions,
            RegionId::UvBand => rendered.uv.clone_from(&self.uv),
            RegionId::Astronomy => rendered.astronomy = self.astronomy,
            RegionId::Forecast => rendered.forecast.clone_from(&self.forecast),
            RegionId::PrecipitationGraph => rendered.precip = self.precip,
            RegionId::TemperatureGraph => rendered.hourly = self.hourly,
        }
    }

    /// Does the observation hold a value for `id`?
    pub const fn has(
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
}

// =============================================================================
// Detection
// =============================================================================

/// Regions among `sections` whose observed value differs from the rendered
/// one. With `force`, every section with something to show is dirty.
pub fn detect(
    obs: &Observation,
    rendered: &RenderedState,
    sections: DirtySet,
    force: bool,
) -> DirtySet {
    let mut dirty = DirtySet::EMPTY;
    for id in sections.iter() {
        if !obs.has(id) {
            continue;
        }
        if force || region_changed(obs, rendered, id) {
            dirty.insert(id);
        }
    }
    dirty
}

fn region_changed(
    obs: &Observation,
    rendered: &RenderedState,
    id: RegionId,
) -> bool {
    match id {
        RegionId::Time => changed(obs.time.as_ref(), rendered.time.as_ref(), |a, b| a != b),
        RegionId::CurrentConditions => changed(obs.conditions.as_ref(), rendered.conditions.as_ref(), conditions_differ),
        RegionId::UvBand => changed(obs.uv.as_ref(), rendered.uv.as_ref(), uv_differs),
        RegionId::Astronomy => changed(obs.astronomy.as_ref(), rendered.astronomy.as_ref(), astronomy_differs),
        RegionId::Forecast => changed(obs.forecast.as_ref(), rendered.forecast.as_ref(), |a, b| forecast_differs(a, b)),
        RegionId::PrecipitationGraph => changed(obs.precip.as_ref(), rendered.precip.as_ref(), |a, b| {
            series_differs(a, b, PROBABILITY_TOLERANCE)
        }),
        RegionId::TemperatureGraph => {
            changed(obs.hourly.as_ref(), rendered.hourly.as_ref(), |a, b| series_differs(a, b, TEMP_TOLERANCE))
        }
    }
}

/// Nothing observed is never dirty; never rendered is always dirty.
#[inline]
fn changed<T>(
    observed: Option<&T>,
    committed: Option<&T>,
    differ: impl Fn(&T, &T) -> bool,
) -> bool {
    match (observed, committed) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(a), Some(b)) => differ(a, b),
    }
}

fn conditions_differ(
    a: &ConditionsCommit,
    b: &ConditionsCommit,
) -> bool {
    differs(a.temperature, b.temperature, TEMP_TOLERANCE) || a.code != b.code || a.night != b.night
}

fn uv_differs(
    a: &UvCommit,
    b: &UvCommit,
) -> bool {
    match (a, b) {
        (UvCommit::Unavailable, UvCommit::Unavailable) => false,
        (
            UvCommit::Reading { max: max_a, time_label: label_a },
            UvCommit::Reading { max: max_b, time_label: label_b },
        ) => differs(*max_a, *max_b, UV_TOLERANCE) || label_a != label_b,
        // valid <-> invalid
        _ => true,
    }
}

fn astronomy_differs(
    a: &AstronomyCommit,
    b: &AstronomyCommit,
) -> bool {
    differs(a.wind_speed, b.wind_speed, WIND_SPEED_TOLERANCE)
        || differs(a.wind_bearing, b.wind_bearing, WIND_BEARING_TOLERANCE)
        || a.cloud_pct != b.cloud_pct
        || a.humidity_pct != b.humidity_pct
        || a.sunrise != b.sunrise
        || a.sunset != b.sunset
        || a.moon_phase != b.moon_phase
}

fn forecast_differs(
    a: &[DaySummary],
    b: &[DaySummary],
) -> bool {
    a.len() != b.len()
        || a.iter().zip(b).any(|(x, y)| {
            x.date != y.date
                || x.code != y.code
                || differs(x.min, y.min, TEMP_TOLERANCE)
                || differs(x.max, y.max, TEMP_TOLERANCE)
        })
}

fn series_differs(
    a: &[f32],
    b: &[f32],
    tolerance: f32,
) -> bool {
    a.len() != b.len() || a.iter().zip(b).any(|(&x, &y)| differs(x, y, tolerance))
}

// =============================================================================
// Unit Tests
// =============================================================================
