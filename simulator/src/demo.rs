//! Synthetic weather providers.
//!
//! Values drift slowly with wall time so the incremental renderer has real
//! changes to pick up, and both sources can be forced into failure modes
//! from the keyboard.

use heapless::{String, Vec};
use time::{Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use weather_common::snapshot::{DESCRIPTION_LEN, HOURLY_POINTS, MAX_FORECAST_SAMPLES, PRECIP_SLOTS};
use weather_common::{
    ConditionsSnapshot,
    FetchError,
    FetchRequest,
    ForecastProvider,
    ForecastSample,
    UvProvider,
    UvReading,
};

/// Condition codes the demo cycles through, with their descriptions.
const CONDITIONS: [(u16, &str); 9] = [
    (800, "clear sky"),
    (801, "few clouds"),
    (803, "broken clouds"),
    (500, "light rain"),
    (521, "shower rain"),
    (300, "light intensity drizzle"),
    (211, "thunderstorm"),
    (600, "light snow"),
    (741, "fog"),
];

const SAMPLE_STEP_HOURS: i64 = 3;

/// Wall time in `offset` at `hour:minute` on the local date of `now`.
fn local_at(
    now: OffsetDateTime,
    offset: UtcOffset,
    hour: u8,
    minute: u8,
) -> i64 {
    let date = now.to_offset(offset).date();
    let time = Time::from_hms(hour, minute, 0).unwrap_or(Time::MIDNIGHT);
    PrimitiveDateTime::new(date, time).assume_offset(offset).unix_timestamp()
}

/// Daily temperature swing, coldest around 04:00.
fn diurnal(
    base: f32,
    hour: f32,
) -> f32 {
    base + 6.0 * ((hour - 10.0) / 24.0 * core::f32::consts::TAU).sin()
}

// =============================================================================
// Primary
// =============================================================================

pub struct DemoForecast {
    offset: UtcOffset,
    outage: bool,
    calls: u32,
}

impl DemoForecast {
    pub const fn new(offset: UtcOffset) -> Self { Self { offset, outage: false, calls: 0 } }

    /// Toggle a simulated network outage. Returns the new state.
    pub fn toggle_outage(&mut self) -> bool {
        self.outage = !self.outage;
        self.outage
    }

    fn snapshot(
        &self,
        now: OffsetDateTime,
    ) -> ConditionsSnapshot {
        let local = now.to_offset(self.offset);
        let hour = f32::from(local.hour()) + f32::from(local.minute()) / 60.0;
        // Warmer on each call so the temperature region moves now and then
        let base = 12.0 + (self.calls % 5) as f32 * 0.4;
        let (code, text) = CONDITIONS[(self.calls as usize / 2) % CONDITIONS.len()];

        let mut description: String<DESCRIPTION_LEN> = String::new();
        description.push_str(text).ok();

        let mut hourly_temps = [0.0; HOURLY_POINTS];
        for (i, t) in hourly_temps.iter_mut().enumerate() {
            *t = diurnal(base, hour + (i as f32) * SAMPLE_STEP_HOURS as f32);
        }

        let mut precip_probability = [0.0; PRECIP_SLOTS];
        let wet = matches!(code, 200..=699);
        for (i, p) in precip_probability.iter_mut().enumerate() {
            let wave = 0.5 + 0.5 * ((i as f32 + self.calls as f32) * 0.9).sin();
            *p = if wet { wave } else { wave * 0.2 };
        }

        let slot_hour = local.hour() - local.hour() % SAMPLE_STEP_HOURS as u8;
        let mut at = PrimitiveDateTime::new(local.date(), Time::from_hms(slot_hour, 0, 0).unwrap_or(Time::MIDNIGHT));
        let mut forecast: Vec<ForecastSample, MAX_FORECAST_SAMPLES> = Vec::new();
        for i in 0..MAX_FORECAST_SAMPLES {
            let (code, _) = CONDITIONS[(i / 5 + self.calls as usize) % CONDITIONS.len()];
            let sample = ForecastSample {
                date: at.date(),
                hour: at.hour(),
                temperature: diurnal(base - 1.0 + (i / 8) as f32, f32::from(at.hour())),
                code,
            };
            forecast.push(sample).ok();
            at += Duration::hours(SAMPLE_STEP_HOURS);
        }

        ConditionsSnapshot {
            temperature: hourly_temps[0],
            code,
            wind_speed: 3.0 + (self.calls % 7) as f32 * 0.8,
            wind_bearing: (self.calls * 40 % 360) as f32,
            cloud_pct: if wet { 90 } else { 20 },
            humidity_pct: 60 + (self.calls % 4) as u8 * 5,
            sunrise: local_at(now, self.offset, 6, 30),
            sunset: local_at(now, self.offset, 19, 45),
            description,
            hourly_temps,
            precip_probability,
            forecast,
        }
    }
}

impl ForecastProvider for DemoForecast {
    fn fetch_forecast(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<ConditionsSnapshot, FetchError> {
        log::debug!("forecast request for {},{} ({})", request.latitude, request.longitude, request.units.as_str());
        if self.outage {
            return Err(FetchError::Timeout);
        }
        let snapshot = self.snapshot(OffsetDateTime::now_utc());
        self.calls = self.calls.wrapping_add(1);
        Ok(snapshot)
    }
}

// =============================================================================
// UV
// =============================================================================

/// How the demo UV source answers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UvMode {
    Live,
    /// Every attempt times out; the last reading stays up.
    Timeout,
    /// The provider rejects the request; the panel shows N/A.
    Rejected,
}

impl UvMode {
    pub const fn next(self) -> Self {
        match self {
            Self::Live => Self::Timeout,
            Self::Timeout => Self::Rejected,
            Self::Rejected => Self::Live,
        }
    }
}

/// Readings in call order. The second differs from the first by less than
/// the redraw tolerance.
const UV_SERIES: [f32; 5] = [8.3, 8.35, 9.1, 11.2, 2.4];

pub struct DemoUv {
    offset: UtcOffset,
    mode: UvMode,
    calls: usize,
}

impl DemoUv {
    pub const fn new(offset: UtcOffset) -> Self { Self { offset, mode: UvMode::Live, calls: 0 } }

    /// Switch to the next failure mode. Returns the new mode.
    pub fn cycle_mode(&mut self) -> UvMode {
        self.mode = self.mode.next();
        self.mode
    }
}

impl UvProvider for DemoUv {
    fn fetch_uv(
        &mut self,
        _request: &FetchRequest<'_>,
    ) -> Result<UvReading, FetchError> {
        match self.mode {
            UvMode::Timeout => Err(FetchError::Timeout),
            UvMode::Rejected => Err(FetchError::Provider(401)),
            UvMode::Live => {
                let max = UV_SERIES[self.calls % UV_SERIES.len()];
                self.calls += 1;
                let now = OffsetDateTime::now_utc();
                Ok(UvReading { current: max * 0.7, max, max_time_utc: local_at(now, self.offset, 13, 0) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use weather_common::Units;

    use super::*;

    fn now() -> OffsetDateTime { OffsetDateTime::from_unix_timestamp(1_718_452_800).unwrap() }

    #[test]
    fn test_snapshot_is_plausible_and_full() {
        let demo = DemoForecast::new(UtcOffset::UTC);
        let snap = demo.snapshot(now());
        assert!(snap.is_plausible(Units::Metric));
        assert_eq!(snap.forecast.len(), MAX_FORECAST_SAMPLES);
        assert!(snap.sunrise < snap.sunset);
        assert_eq!(snap.day_summaries().len(), 4);
    }

    #[test]
    fn test_outage_times_out() {
        let settings = weather_common::Settings::default();
        let mut demo = DemoForecast::new(UtcOffset::UTC);
        assert!(demo.toggle_outage());
        assert_eq!(demo.fetch_forecast(&FetchRequest::forecast(&settings)), Err(FetchError::Timeout));
    }

    #[test]
    fn test_uv_modes_cycle() {
        let settings = weather_common::Settings::default();
        let mut demo = DemoUv::new(UtcOffset::UTC);
        assert_eq!(demo.fetch_uv(&FetchRequest::uv(&settings)).map(|r| r.max), Ok(8.3));
        assert_eq!(demo.cycle_mode(), UvMode::Timeout);
        assert_eq!(demo.cycle_mode(), UvMode::Rejected);
        assert_eq!(demo.fetch_uv(&FetchRequest::uv(&settings)), Err(FetchError::Provider(401)));
        assert_eq!(demo.cycle_mode(), UvMode::Live);
    }
}
