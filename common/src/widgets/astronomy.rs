//! Sun times, wind, cloud, humidity and moon phase.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::{RenderContext, clear_slot, right_edge, row_y};
use crate::classify::{IconSize, compass_label, moon_asset_path, moon_phase_name};
use crate::colors::{LABEL_GRAY, WHITE};
use crate::config::settings::{CLOUD_LABEL, HUMIDITY_LABEL, SUN_LABEL};
use crate::styles::text_width;
use crate::surface::{Anchor, FontSize, RenderSurface};
use crate::timefmt::{datetime_from_unix, format_hm};

/// Rows of the value column.
const ROWS: u32 = 4;

/// First row the moon image sits beside.
const MOON_ROW: u32 = 1;

/// What the region shows.
#[derive(Clone, Copy, Debug)]
pub struct AstronomyView {
    pub sunrise: i64,
    pub sunset: i64,
    pub wind_speed: f32,
    pub wind_bearing: f32,
    pub cloud_pct: u8,
    pub humidity_pct: u8,
    pub moon_phase: u8,
}

fn origin(
    region: Rectangle,
    pad: u32,
) -> Point {
    region.top_left + Point::new(pad as i32, pad as i32)
}

/// Everything right of the label column: values, moon image and name.
pub(crate) fn content_slot(
    region: Rectangle,
    pad: u32,
) -> Rectangle {
    let o = origin(region, pad);
    let x = o.x + (text_width(HUMIDITY_LABEL, FontSize::Small) + pad) as i32;
    let w = (right_edge(&region) - pad as i32 - x).max(0) as u32;
    let h = (row_y(0, ROWS, FontSize::Small)) as u32;
    Rectangle::new(Point::new(x, o.y), Size::new(w, h))
}

/// Moon image box: right-aligned beside the wind and cloud rows, so the sun
/// times on row 0 get the full width of the slot.
pub(crate) fn moon_rect(slot: Rectangle) -> Rectangle {
    let px = IconSize::Small.px();
    let top = row_y(slot.top_left.y, MOON_ROW, FontSize::Small);
    Rectangle::new(Point::new(right_edge(&slot) - px as i32, top), Size::new(px, px))
}

/// Static row labels.
pub fn draw_astronomy_static<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
) {
    let o = origin(region, ctx.pad());
    for (row, label) in [(0, SUN_LABEL), (2, CLOUD_LABEL), (3, HUMIDITY_LABEL)] {
        surface.draw_text(
            Point::new(o.x, row_y(o.y, row, FontSize::Small)),
            label,
            FontSize::Small,
            LABEL_GRAY,
            Anchor::Left,
        );
    }
}

/// Redraw the values and the moon.
pub fn draw_astronomy<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
    view: &AstronomyView,
) {
    let slot = content_slot(region, ctx.pad());
    clear_slot(surface, region, slot);

    let x = slot.top_left.x;
    let top = slot.top_left.y;
    let small = FontSize::Small;

    let rise = format_hm(ctx.clock.to_local(datetime_from_unix(view.sunrise)).time(), ctx.use_24h);
    let set = format_hm(ctx.clock.to_local(datetime_from_unix(view.sunset)).time(), ctx.use_24h);
    let mut text: String<24> = String::new();
    write!(text, "{rise} {set}").ok();
    surface.draw_text(Point::new(x, row_y(top, 0, small)), &text, small, WHITE, Anchor::Left);

    text.clear();
    write!(text, "{:.1}{} {}", view.wind_speed, ctx.units.speed_suffix(), compass_label(view.wind_bearing)).ok();
    surface.draw_text(Point::new(x, row_y(top, 1, small)), &text, small, WHITE, Anchor::Left);

    text.clear();
    write!(text, "{}%", view.cloud_pct).ok();
    surface.draw_text(Point::new(x, row_y(top, 2, small)), &text, small, WHITE, Anchor::Left);

    text.clear();
    write!(text, "{}%", view.humidity_pct).ok();
    surface.draw_text(Point::new(x, row_y(top, 3, small)), &text, small, WHITE, Anchor::Left);

    let moon = moon_rect(slot);
    surface.draw_image_asset(moon_asset_path(view.moon_phase).as_str(), moon.top_left);
    surface.draw_text(
        Point::new(right_edge(&slot), row_y(top, 3, small)),
        moon_phase_name(view.moon_phase),
        small,
        LABEL_GRAY,
        Anchor::Right,
    );
}
