//! End-to-end control loop tests with scripted providers.

use std::collections::VecDeque;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time};
use weather_common::render::UvCommit;
use weather_common::snapshot::SourceState;
use weather_common::{
    Anchor,
    AssetStore,
    Clock,
    ConditionsSnapshot,
    Dashboard,
    FetchError,
    FetchRequest,
    FontSize,
    ForecastProvider,
    ForecastSample,
    RegionId,
    RenderSurface,
    Settings,
    Source,
    StartupError,
    UvProvider,
    UvReading,
};

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Default)]
struct Surface {
    clears: usize,
    texts: std::vec::Vec<std::string::String>,
}

impl Surface {
    fn reset(&mut self) {
        self.clears = 0;
        self.texts.clear();
    }
}

impl RenderSurface for Surface {
    fn clear_rect(
        &mut self,
        _area: Rectangle,
    ) {
        self.clears += 1;
    }

    fn draw_text(
        &mut self,
        _pos: Point,
        text: &str,
        _font: FontSize,
        _color: Rgb565,
        _anchor: Anchor,
    ) {
        self.texts.push(text.into());
    }

    fn draw_image_asset(
        &mut self,
        _path: &str,
        _top_left: Point,
    ) {
    }

    fn draw_line(
        &mut self,
        _from: Point,
        _to: Point,
        _color: Rgb565,
    ) {
    }

    fn draw_circle(
        &mut self,
        _center: Point,
        _diameter: u32,
        _color: Rgb565,
        _filled: bool,
    ) {
    }
}

/// Fixed at 2024-06-15 12:00 UTC, local time equal to UTC.
struct FixedClock;

fn noon() -> OffsetDateTime { PrimitiveDateTime::new(june(15), Time::from_hms(12, 0, 0).unwrap()).assume_utc() }

fn june(day: u8) -> Date { Date::from_calendar_date(2024, Month::June, day).unwrap() }

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime { noon() }

    fn to_local(
        &self,
        utc: OffsetDateTime,
    ) -> PrimitiveDateTime {
        PrimitiveDateTime::new(utc.date(), utc.time())
    }
}

/// Pops scripted results; times out once the script runs dry.
struct Scripted<T> {
    results: VecDeque<Result<T, FetchError>>,
    calls: usize,
}

impl<T> Default for Scripted<T> {
    fn default() -> Self { Self { results: VecDeque::new(), calls: 0 } }
}

impl<T> Scripted<T> {
    fn new(results: impl IntoIterator<Item = Result<T, FetchError>>) -> Self {
        Self { results: results.into_iter().collect(), calls: 0 }
    }

    fn next(&mut self) -> Result<T, FetchError> {
        self.calls += 1;
        self.results.pop_front().unwrap_or(Err(FetchError::Timeout))
    }
}

impl ForecastProvider for Scripted<ConditionsSnapshot> {
    fn fetch_forecast(
        &mut self,
        _request: &FetchRequest<'_>,
    ) -> Result<ConditionsSnapshot, FetchError> {
        self.next()
    }
}

impl UvProvider for Scripted<UvReading> {
    fn fetch_uv(
        &mut self,
        _request: &FetchRequest<'_>,
    ) -> Result<UvReading, FetchError> {
        self.next()
    }
}

struct AllAssets;

impl AssetStore for AllAssets {
    fn contains(
        &self,
        _path: &str,
    ) -> bool {
        true
    }
}

struct MissingMoon;

impl AssetStore for MissingMoon {
    fn contains(
        &self,
        path: &str,
    ) -> bool {
        !path.starts_with("/moon/")
    }
}

fn conditions(temperature: f32) -> ConditionsSnapshot {
    let start = noon();
    let mut forecast = Vec::new();
    let mut t = PrimitiveDateTime::new(start.date(), start.time());
    for i in 0..40u16 {
        let sample = ForecastSample { date: t.date(), hour: t.hour(), temperature: 10.0 + f32::from(i % 8), code: 500 };
        forecast.push(sample).unwrap();
        t += Duration::hours(3);
    }
    let mut description = String::new();
    description.push_str("light rain").unwrap();
    ConditionsSnapshot {
        temperature,
        code: 500,
        wind_speed: 4.2,
        wind_bearing: 225.0,
        cloud_pct: 75,
        humidity_pct: 81,
        sunrise: start.unix_timestamp() - 5 * 3600,
        sunset: start.unix_timestamp() + 5 * 3600,
        description,
        hourly_temps: [9.0, 10.0, 11.5, 12.0, 12.5, 12.0, 11.0, 10.0, 9.5],
        precip_probability: [0.1, 0.2, 0.6, 0.8, 0.4, 0.0, 0.0, 0.1],
        forecast,
    }
}

fn uv(max: f32) -> UvReading {
    // 13:00 UTC
    UvReading { current: 6.0, max, max_time_utc: noon().unix_timestamp() + 3600 }
}

fn settings() -> Settings {
    Settings { primary_interval_ms: 1000, uv_interval_ms: 1000, ..Settings::default() }
}

fn dashboard() -> Dashboard { Dashboard::startup(settings(), 320, 240, &AllAssets).unwrap() }

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_startup_reports_missing_asset() {
    let err = Dashboard::startup(settings(), 320, 240, &MissingMoon).err().unwrap();
    assert!(matches!(err, StartupError::MissingAsset(ref p) if p.starts_with("/moon/")));
}

#[test]
fn test_first_tick_draws_clock_and_fetches_primary() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Ok(conditions(12.3))]);
    let mut uv_source = Scripted::<UvReading>::default();

    let outcome = dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(outcome.fetch.map(|f| f.source), Some(Source::Primary));
    assert!(outcome.drawn.contains(RegionId::Time));
    assert!(outcome.drawn.contains(RegionId::CurrentConditions));
    assert!(outcome.drawn.contains(RegionId::TemperatureGraph));
    assert!(!outcome.drawn.contains(RegionId::UvBand));
    assert!(surface.texts.iter().any(|t| t == "12:00"));
    assert!(surface.texts.iter().any(|t| t == "12C"));
    // UV still missing
    assert!(dash.is_busy());
}

#[test]
fn test_primary_failures_leave_rendered_state_untouched() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Err(FetchError::Provider(500)), Err(FetchError::Provider(500)), Ok(conditions(12.3))]);
    let mut uv_source = Scripted::new([Ok(uv(8.3))]);

    let first = dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(first.fetch.unwrap().result, Err(FetchError::Provider(500)));
    assert!(dash.rendered().conditions.is_none());

    dash.tick(1, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    let second = dash.tick(1002, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(second.fetch.unwrap().source, Source::Primary);
    assert!(second.fetch.unwrap().result.is_err());
    assert!(dash.rendered().conditions.is_none());
    assert!(dash.rendered().hourly.is_none());
    assert_eq!(dash.store().conditions_state(), SourceState::NeverFetched);

    let third = dash.tick(2004, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(third.fetch.unwrap().result, Ok(()));
    assert!(third.drawn.contains(RegionId::CurrentConditions));
    assert_eq!(dash.rendered().conditions.map(|c| c.temperature), Some(12.3));
    assert_eq!(primary.calls, 3);
}

#[test]
fn test_primary_failure_does_not_block_uv() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Err(FetchError::Provider(503))]);
    let mut uv_source = Scripted::new([Ok(uv(8.3))]);

    dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    let outcome = dash.tick(1, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(outcome.fetch.unwrap().source, Source::Uv);
    assert!(outcome.drawn.contains(RegionId::UvBand));
    assert_eq!(dash.store().uv_state(), SourceState::Valid);
    assert!(dash.is_busy());
}

#[test]
fn test_transient_errors_are_retried_within_one_fetch() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Err(FetchError::Timeout), Err(FetchError::Transport), Ok(conditions(12.3))]);
    let mut uv_source = Scripted::<UvReading>::default();

    let outcome = dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(outcome.fetch.unwrap().result, Ok(()));
    assert_eq!(primary.calls, 3);
}

#[test]
fn test_implausible_temperature_is_discarded() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Ok(conditions(150.0))]);
    let mut uv_source = Scripted::<UvReading>::default();

    let outcome = dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(outcome.fetch.unwrap().result, Err(FetchError::Implausible));
    assert!(dash.store().conditions().is_none());
}

#[test]
fn test_unchanged_snapshot_draws_nothing() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Ok(conditions(12.3)), Ok(conditions(12.3))]);
    let mut uv_source = Scripted::new([Ok(uv(8.3))]);

    dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    dash.tick(1, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert!(!dash.is_busy());
    surface.reset();

    let outcome = dash.tick(1002, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(outcome.fetch.unwrap().result, Ok(()));
    assert!(outcome.drawn.is_empty());
    assert!(surface.texts.is_empty());
}

#[test]
fn test_small_temperature_change_is_ignored() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Ok(conditions(12.3)), Ok(conditions(12.6))]);
    let mut uv_source = Scripted::new([Ok(uv(8.3))]);

    dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    dash.tick(1, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    let outcome = dash.tick(1002, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert!(!outcome.drawn.contains(RegionId::CurrentConditions));
    assert_eq!(dash.rendered().conditions.map(|c| c.temperature), Some(12.3));
}

#[test]
fn test_uv_within_tolerance_stays_clean() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Ok(conditions(12.3)), Ok(conditions(12.3))]);
    let mut uv_source = Scripted::new([Ok(uv(8.3)), Ok(uv(8.35))]);

    dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    let first = dash.tick(1, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert!(first.drawn.contains(RegionId::UvBand));
    assert!(surface.texts.iter().any(|t| t.starts_with("8.3 VERY HIGH")));

    dash.tick(1002, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    let second = dash.tick(1003, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(second.fetch.unwrap().source, Source::Uv);
    assert!(second.drawn.is_empty());
    assert!(matches!(dash.rendered().uv, Some(UvCommit::Reading { max, .. }) if max == 8.3));
}

#[test]
fn test_uv_provider_error_shows_not_available() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Ok(conditions(12.3)), Ok(conditions(12.3))]);
    let mut uv_source = Scripted::new([Ok(uv(8.3)), Err(FetchError::Provider(401))]);

    dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    dash.tick(1, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    dash.tick(1002, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    surface.reset();

    let outcome = dash.tick(1003, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert!(outcome.drawn.contains(RegionId::UvBand));
    assert_eq!(dash.rendered().uv, Some(UvCommit::Unavailable));
    assert_eq!(dash.store().uv_state(), SourceState::Invalid);
    assert!(surface.texts.iter().any(|t| t == "N/A"));
    assert!(dash.is_busy());
}

#[test]
fn test_uv_timeout_keeps_last_value() {
    let mut dash = dashboard();
    let mut surface = Surface::default();
    let mut primary = Scripted::new([Ok(conditions(12.3)), Ok(conditions(12.3))]);
    let mut uv_source = Scripted::new([Ok(uv(8.3))]);

    dash.tick(0, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    dash.tick(1, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    dash.tick(1002, &mut surface, &mut primary, &mut uv_source, &FixedClock);

    let outcome = dash.tick(1003, &mut surface, &mut primary, &mut uv_source, &FixedClock);
    assert_eq!(outcome.fetch.unwrap().result, Err(FetchError::Timeout));
    assert!(outcome.drawn.is_empty());
    assert_eq!(dash.store().uv_state(), SourceState::Valid);
    assert!(matches!(dash.rendered().uv, Some(UvCommit::Reading { .. })));
    // One attempt plus two retries
    assert_eq!(uv_source.calls, 4);
}
