//! Clock and date, top-left.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;
use time::PrimitiveDateTime;

use super::{RenderContext, clear_slot, fitting_font, right_edge};
use crate::colors::{LABEL_GRAY, WHITE};
use crate::styles::text_width;
use crate::surface::{Anchor, FontSize, RenderSurface};
use crate::timefmt::{format_hm, short_weekday};

/// Side of the busy-indicator square in the region's top-right corner.
pub const SPINNER_PX: u32 = 10;

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Widest clock string in either format.
const WIDEST_TIME: &str = "12:00pm";

/// Widest date line.
const WIDEST_DATE: &str = "WED 30 Sep";

const GAP: u32 = 2;

/// Busy-indicator square. Outside both text slots.
pub fn spinner_rect(
    region: Rectangle,
    pad: u32,
) -> Rectangle {
    let x = right_edge(&region) - (pad + SPINNER_PX) as i32;
    region.intersection(&Rectangle::new(
        Point::new(x, region.top_left.y + pad as i32),
        Size::new(SPINNER_PX, SPINNER_PX),
    ))
}

fn time_font(
    region: Rectangle,
    pad: u32,
) -> FontSize {
    let reserved = pad + GAP + FontSize::Small.line_height();
    fitting_font(&[FontSize::Large, FontSize::Medium], reserved, region.size.height)
}

/// Text slots for the clock and the date line.
pub(crate) fn slots(
    region: Rectangle,
    pad: u32,
) -> (Rectangle, Rectangle, FontSize) {
    let font = time_font(region, pad);
    let cx = region.center().x;
    let top = region.top_left.y + pad as i32;

    let mut time_w = text_width(WIDEST_TIME, font);
    // Keep clear of the spinner
    let spinner_left = spinner_rect(region, pad).top_left.x;
    let max_half = (spinner_left - cx).max(0) as u32;
    time_w = time_w.min(max_half * 2);
    let time_slot = Rectangle::new(Point::new(cx - (time_w / 2) as i32, top), Size::new(time_w, font.line_height()));

    let date_w = text_width(WIDEST_DATE, FontSize::Small).min(time_w.max(region.size.width - 2 * pad));
    let date_top = top + (font.line_height() + GAP) as i32;
    let date_slot = Rectangle::new(
        Point::new(cx - (date_w / 2) as i32, date_top),
        Size::new(date_w, FontSize::Small.line_height()),
    );
    (time_slot, date_slot, font)
}

/// Redraw the clock and date.
pub fn draw_time<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
    local: PrimitiveDateTime,
) {
    let (time_slot, date_slot, font) = slots(region, ctx.pad());
    clear_slot(surface, region, time_slot);
    clear_slot(surface, region, date_slot);

    let cx = region.center().x;
    let clock = format_hm(local.time(), ctx.use_24h);
    surface.draw_text(Point::new(cx, time_slot.top_left.y), clock.as_str(), font, WHITE, Anchor::Center);

    let mut date: String<16> = String::new();
    write!(date, "{} {} {}", short_weekday(local.date()), local.day(), MONTHS[local.month() as usize - 1]).ok();
    surface.draw_text(Point::new(cx, date_slot.top_left.y), date.as_str(), FontSize::Small, LABEL_GRAY, Anchor::Center);
}
