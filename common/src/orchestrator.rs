//! Incremental render orchestration.
//!
//! Given a dirty set, draws each dirty region in a fixed order and commits
//! the drawn values into [`RenderedState`] right after its draw. Regions that
//! are not dirty are never touched.
//!
//! # Render Order
//!
//! ```text
//! time -> conditions -> uv -> forecast -> precip graph -> astronomy
//!      -> temperature graph -> uv (text only, no clear, no commit)
//! ```
//!
//! The temperature graph's clear runs along the row the UV text descends
//! toward, so the UV text is drawn again after it.

use embedded_graphics::primitives::Rectangle;
use time::{PrimitiveDateTime, Time};

use crate::classify::icon_for_code;
use crate::config::RegionId;
use crate::detect::Observation;
use crate::render::{DirtySet, RenderedState};
use crate::snapshot::SnapshotStore;
pub use crate::snapshot::next_day_index;
use crate::surface::RenderSurface;
use crate::widgets::{
    AstronomyView,
    ConditionsView,
    RenderContext,
    draw_astronomy,
    draw_astronomy_static,
    draw_conditions,
    draw_forecast,
    draw_precipitation,
    draw_precipitation_static,
    draw_temperature,
    draw_temperature_static,
    draw_time,
    draw_uv,
    draw_uv_static,
};

/// Fixed draw order.
pub const RENDER_ORDER: [RegionId; 7] = [
    RegionId::Time,
    RegionId::CurrentConditions,
    RegionId::UvBand,
    RegionId::Forecast,
    RegionId::PrecipitationGraph,
    RegionId::Astronomy,
    RegionId::TemperatureGraph,
];

// =============================================================================
// Helpers
// =============================================================================

/// Split `text` in two at the last interior space at or before its midpoint.
///
/// Returns `(text, "")` when there is no such space. The space itself is
/// dropped.
pub fn split_label(text: &str) -> (&str, &str) {
    let bytes = text.as_bytes();
    let mid = bytes.len() / 2;
    if mid == 0 {
        return (text, "");
    }
    // Interior: never split at index 0
    match bytes[1..=mid].iter().rposition(|&b| b == b' ') {
        Some(i) => {
            let at = i + 1;
            (&text[..at], &text[at + 1..])
        }
        None => (text, ""),
    }
}

// =============================================================================
// Orchestration
// =============================================================================

/// Draw every region in `dirty` that has something to show, in
/// [`RENDER_ORDER`], committing each one. Returns the regions drawn.
pub fn render_dirty<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    store: &SnapshotStore,
    obs: &Observation,
    rendered: &mut RenderedState,
    dirty: DirtySet,
) -> DirtySet {
    let mut drawn = DirtySet::EMPTY;
    for id in RENDER_ORDER {
        if !dirty.contains(id) || !obs.has(id) {
            continue;
        }
        let region = ctx.layout.region(id);
        if !rendered.static_drawn(id) {
            draw_static(surface, ctx, id, region);
            rendered.mark_static_drawn(id);
        }
        if draw_region(surface, ctx, store, obs, id, region) {
            obs.commit(id, rendered);
            drawn.insert(id);
        }
    }

    if drawn.contains(RegionId::TemperatureGraph) {
        if let Some(uv) = &rendered.uv {
            draw_uv(surface, ctx, ctx.layout.region(RegionId::UvBand), uv, false);
        }
    }

    if !drawn.is_empty() {
        log::debug!("rendered {} region(s): {:?}", drawn.len(), drawn);
    }
    drawn
}

fn draw_static<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    id: RegionId,
    region: Rectangle,
) {
    match id {
        RegionId::UvBand => draw_uv_static(surface, ctx, region),
        RegionId::Astronomy => draw_astronomy_static(surface, ctx, region),
        RegionId::PrecipitationGraph => draw_precipitation_static(surface, ctx, region),
        RegionId::TemperatureGraph => draw_temperature_static(surface, ctx, region),
        RegionId::Time | RegionId::CurrentConditions | RegionId::Forecast => {}
    }
}

/// Clear and draw one region. Returns false if there was nothing to draw.
fn draw_region<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    store: &SnapshotStore,
    obs: &Observation,
    id: RegionId,
    region: Rectangle,
) -> bool {
    match id {
        RegionId::Time => {
            let Some(t) = obs.time else { return false };
            let time = Time::from_hms((t.minute_of_day / 60) as u8, (t.minute_of_day % 60) as u8, 0)
                .unwrap_or(Time::MIDNIGHT);
            draw_time(surface, ctx, region, PrimitiveDateTime::new(t.date, time));
        }
        RegionId::CurrentConditions => {
            let Some(c) = obs.conditions else { return false };
            let icon = icon_for_code(c.code);
            let view = ConditionsView {
                temperature: c.temperature,
                icon: if c.night { icon.to_night() } else { icon },
                description: store.conditions().map_or("", |s| s.description.as_str()),
            };
            draw_conditions(surface, ctx, region, &view);
        }
        RegionId::UvBand => {
            let Some(uv) = &obs.uv else { return false };
            draw_uv(surface, ctx, region, uv, true);
        }
        RegionId::Forecast => {
            let Some(days) = &obs.forecast else { return false };
            draw_forecast(surface, ctx, region, days);
        }
        RegionId::PrecipitationGraph => {
            let Some(p) = &obs.precip else { return false };
            draw_precipitation(surface, ctx, region, p);
        }
        RegionId::Astronomy => {
            let Some(a) = obs.astronomy else { return false };
            let view = AstronomyView {
                sunrise: a.sunrise,
                sunset: a.sunset,
                wind_speed: a.wind_speed,
                wind_bearing: a.wind_bearing,
                cloud_pct: a.cloud_pct,
                humidity_pct: a.humidity_pct,
                moon_phase: a.moon_phase,
            };
            draw_astronomy(surface, ctx, region, &view);
        }
        RegionId::TemperatureGraph => {
            let Some(h) = &obs.hourly else { return false };
            draw_temperature(surface, ctx, region, h);
        }
    }
    true
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use embedded_graphics::prelude::*;

    use super::*;
    use crate::config::{Layout, Units, compute_layout};
    use crate::mocks::{Call, FixedClock, RecordingSurface, conditions_at, uv_at};

    struct Fixture {
        layout: Layout,
        clock: FixedClock,
        store: SnapshotStore,
        rendered: RenderedState,
    }

    impl Fixture {
        fn new() -> Self {
            let clock = FixedClock::june_15(12);
            let mut store = SnapshotStore::new();
            store.replace_conditions(conditions_at(clock.now));
            store.replace_uv(uv_at(8.3, clock.now.unix_timestamp()));
            Self { layout: compute_layout(320, 240), clock, store, rendered: RenderedState::new() }
        }

        fn render(
            &mut self,
            surface: &mut RecordingSurface,
            dirty: DirtySet,
        ) -> DirtySet {
            let ctx = RenderContext { layout: &self.layout, units: Units::Metric, use_24h: true, clock: &self.clock };
            let obs = Observation::gather(&self.store, &self.clock);
            render_dirty(surface, &ctx, &self.store, &obs, &mut self.rendered, dirty)
        }

        /// Region a recorded call draws into, by its anchor point.
        fn region_of(
            &self,
            call: &Call,
        ) -> Option<RegionId> {
            let at = match call {
                Call::Clear(r) => r.top_left,
                Call::Text { pos, .. } => *pos,
                Call::Image { top_left, .. } => *top_left,
                Call::Line { .. } | Call::Circle { .. } => return None,
            };
            RENDER_ORDER.into_iter().find(|&id| self.layout.region(id).contains(at))
        }
    }

    fn is_clear(call: &Call) -> bool { matches!(call, Call::Clear(_)) }

    #[test]
    fn test_split_label_at_midpoint() {
        assert_eq!(split_label("light rain showers"), ("light", "rain showers"));
        assert_eq!(split_label("broken clouds"), ("broken", "clouds"));
    }

    #[test]
    fn test_split_label_without_interior_space() {
        assert_eq!(split_label("thunderstorm"), ("thunderstorm", ""));
        assert_eq!(split_label(" rain"), (" rain", ""));
        assert_eq!(split_label(""), ("", ""));
        assert_eq!(split_label("a"), ("a", ""));
    }

    #[test]
    fn test_split_label_ignores_late_space() {
        // Only space is past the midpoint
        assert_eq!(split_label("drizzling rain"), ("drizzling rain", ""));
        assert_eq!(split_label("overcast clouds"), ("overcast clouds", ""));
    }

    #[test]
    fn test_render_order_covers_all_regions() {
        let mut set = DirtySet::EMPTY;
        for id in RENDER_ORDER {
            set.insert(id);
        }
        assert_eq!(set, DirtySet::ALL);
    }

    #[test]
    fn test_clears_follow_render_order() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new();
        assert_eq!(fx.render(&mut surface, DirtySet::ALL), DirtySet::ALL);

        let mut order: Vec<RegionId> = Vec::new();
        for rect in surface.clears() {
            let id = fx.region_of(&Call::Clear(rect)).unwrap();
            let region = fx.layout.region(id);
            assert_eq!(region.intersection(&rect), rect, "{id:?} clear {rect:?} leaves {region:?}");
            if order.last() != Some(&id) {
                order.push(id);
            }
        }
        assert_eq!(order, RENDER_ORDER);
    }

    #[test]
    fn test_uv_redrawn_after_temperature_graph() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new();
        fx.render(&mut surface, DirtySet::ALL);

        let graph_clear = surface
            .calls
            .iter()
            .rposition(|c| is_clear(c) && fx.region_of(c) == Some(RegionId::TemperatureGraph))
            .unwrap();
        let tail = &surface.calls[graph_clear + 1..];
        let uv_texts: Vec<&str> = tail
            .iter()
            .filter(|c| fx.region_of(c) == Some(RegionId::UvBand))
            .filter_map(|c| match c {
                Call::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(uv_texts, ["8.3 VERY HIGH 13:00"]);
        assert!(!tail.iter().any(|c| is_clear(c) && fx.region_of(c) == Some(RegionId::UvBand)));
        assert!(matches!(surface.calls.last(), Some(Call::Text { text, .. }) if text == "8.3 VERY HIGH 13:00"));
    }

    #[test]
    fn test_each_region_clears_before_drawing() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new();
        fx.render(&mut surface, DirtySet::ALL);
        assert!(surface.texts().contains(&"UV"));

        // Static labels are already up; every region starts with its clear
        surface.reset();
        assert_eq!(fx.render(&mut surface, DirtySet::ALL), DirtySet::ALL);
        assert!(!surface.texts().contains(&"UV"));
        for id in RENDER_ORDER {
            let first = surface.calls.iter().find(|c| fx.region_of(c) == Some(id)).unwrap();
            assert!(is_clear(first), "{id:?} drew {first:?} before clearing");
        }
    }

    #[test]
    fn test_text_stays_inside_its_region() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new();
        fx.render(&mut surface, DirtySet::ALL);

        let anchors = surface.calls.iter().filter(|c| matches!(c, Call::Text { .. }));
        for (call, bounds) in anchors.zip(surface.text_boxes()) {
            let id = fx.region_of(call).unwrap();
            let region = fx.layout.region(id);
            assert_eq!(region.intersection(&bounds), bounds, "{call:?} leaves {id:?}");
        }
    }

    #[test]
    fn test_clean_regions_are_untouched() {
        let mut fx = Fixture::new();
        let mut surface = RecordingSurface::new();
        fx.render(&mut surface, DirtySet::ALL);
        surface.reset();

        let only = DirtySet::EMPTY.with(RegionId::CurrentConditions);
        assert_eq!(fx.render(&mut surface, only), only);
        assert!(!surface.calls.is_empty());
        for call in surface.calls.iter().filter(|c| fx.region_of(c).is_some()) {
            assert_eq!(fx.region_of(call), Some(RegionId::CurrentConditions), "{call:?}");
        }
        // No temperature graph, so no UV re-emit
        assert!(!surface.texts().contains(&"8.3 VERY HIGH 13:00"));
    }
}
