//! Recording surface, clock and snapshot fixtures for unit tests.

use std::string::{String, ToString};
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime};

use crate::providers::Clock;
use crate::snapshot::{ConditionsSnapshot, ForecastSample, UvSnapshot};
use crate::surface::{Anchor, FontSize, RenderSurface, text_bounds};
use crate::timefmt::TimeLabel;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear(Rectangle),
    Text { pos: Point, text: String, font: FontSize, color: Rgb565, anchor: Anchor },
    Image { path: String, top_left: Point },
    Line { from: Point, to: Point },
    Circle { center: Point, diameter: u32 },
}

/// Surface that records every call instead of drawing.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
    /// Reported width of any non-empty text, standing in for a wider face.
    pub measured_width: Option<u32>,
}

impl RecordingSurface {
    pub fn new() -> Self { Self::default() }

    /// Surface whose fonts measure every non-empty string as `width` pixels.
    pub fn with_measured_width(width: u32) -> Self { Self { measured_width: Some(width), ..Self::default() } }

    pub fn count(
        &self,
        pred: impl Fn(&Call) -> bool,
    ) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn clears(&self) -> Vec<Rectangle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Clear(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Bounding boxes of every text call.
    pub fn text_boxes(&self) -> Vec<Rectangle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text { pos, text, font, anchor, .. } => Some(text_bounds(*pos, text, *font, *anchor)),
                _ => None,
            })
            .collect()
    }

    pub fn reset(&mut self) { self.calls.clear(); }
}

impl RenderSurface for RecordingSurface {
    fn measure_text_width(
        &self,
        text: &str,
        font: FontSize,
    ) -> u32 {
        match self.measured_width {
            Some(w) if !text.is_empty() => w,
            _ => crate::styles::text_width(text, font),
        }
    }

    fn clear_rect(
        &mut self,
        area: Rectangle,
    ) {
        self.calls.push(Call::Clear(area));
    }

    fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        font: FontSize,
        color: Rgb565,
        anchor: Anchor,
    ) {
        self.calls.push(Call::Text { pos, text: text.to_string(), font, color, anchor });
    }

    fn draw_image_asset(
        &mut self,
        path: &str,
        top_left: Point,
    ) {
        self.calls.push(Call::Image { path: path.to_string(), top_left });
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        _color: Rgb565,
    ) {
        self.calls.push(Call::Line { from, to });
    }

    fn draw_circle(
        &mut self,
        center: Point,
        diameter: u32,
        _color: Rgb565,
        _filled: bool,
    ) {
        self.calls.push(Call::Circle { center, diameter });
    }
}

// =============================================================================
// Clock
// =============================================================================

/// Clock frozen at one UTC instant, local time a whole number of hours ahead.
pub struct FixedClock {
    pub now: OffsetDateTime,
    pub offset_hours: i64,
}

impl FixedClock {
    /// 2024-06-15 at `hour`:00 UTC, local equal to UTC.
    pub fn june_15(hour: u8) -> Self { Self::utc(2024, Month::June, 15, hour) }

    pub fn utc(
        year: i32,
        month: Month,
        day: u8,
        hour: u8,
    ) -> Self {
        let now = Date::from_calendar_date(year, month, day).unwrap().with_hms(hour, 0, 0).unwrap().assume_utc();
        Self { now, offset_hours: 0 }
    }

    pub fn with_offset(
        mut self,
        hours: i64,
    ) -> Self {
        self.offset_hours = hours;
        self
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime { self.now }

    fn to_local(
        &self,
        utc: OffsetDateTime,
    ) -> PrimitiveDateTime {
        let local = utc + Duration::hours(self.offset_hours);
        PrimitiveDateTime::new(local.date(), local.time())
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// Five days of 3-hourly light rain starting at `now`, sun up from five hours
/// before until five hours after.
pub fn conditions_at(now: OffsetDateTime) -> ConditionsSnapshot {
    let mut forecast = heapless::Vec::new();
    let mut t = PrimitiveDateTime::new(now.date(), now.time());
    for i in 0..40u16 {
        let sample = ForecastSample { date: t.date(), hour: t.hour(), temperature: 10.0 + f32::from(i % 8), code: 500 };
        forecast.push(sample).unwrap();
        t += Duration::hours(3);
    }
    let mut description = heapless::String::new();
    description.push_str("light rain").unwrap();
    ConditionsSnapshot {
        temperature: 12.3,
        code: 500,
        wind_speed: 4.2,
        wind_bearing: 225.0,
        cloud_pct: 75,
        humidity_pct: 81,
        sunrise: now.unix_timestamp() - 5 * 3600,
        sunset: now.unix_timestamp() + 5 * 3600,
        description,
        hourly_temps: [9.0, 10.0, 11.5, 12.0, 12.5, 12.0, 11.0, 10.0, 9.5],
        precip_probability: [0.1, 0.2, 0.6, 0.8, 0.4, 0.0, 0.0, 0.1],
        forecast,
    }
}

/// Valid UV snapshot peaking at `max` at 13:00.
pub fn uv_at(
    max: f32,
    updated_at: i64,
) -> UvSnapshot {
    UvSnapshot {
        current: 6.0,
        max,
        max_time_label: TimeLabel::try_from("13:00").unwrap(),
        valid: true,
        updated_at,
    }
}
