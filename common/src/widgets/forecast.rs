//! Four forecast columns: weekday, icon, max and min.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::conditions::format_temperature;
use super::{RenderContext, clear_slot};
use crate::classify::{IconSize, icon_for_code};
use crate::colors::{CYAN, ORANGE, WHITE};
use crate::snapshot::{DaySummary, FORECAST_DAYS};
use crate::surface::{Anchor, FontSize, RenderSurface};
use crate::timefmt::short_weekday;

/// Column `index` of the region.
pub(crate) fn column(
    region: Rectangle,
    index: usize,
) -> Rectangle {
    let w = region.size.width / FORECAST_DAYS as u32;
    Rectangle::new(
        region.top_left + Point::new((w * index as u32) as i32, 0),
        Size::new(w, region.size.height),
    )
}

/// Redraw every column. Columns past the end of `days` are left blank.
pub fn draw_forecast<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
    days: &[DaySummary],
) {
    let pad = ctx.pad();
    let line = FontSize::Small.line_height();
    let icon_px = IconSize::Small.px();

    for index in 0..FORECAST_DAYS {
        let col = column(region, index);
        let content = Rectangle::new(
            col.top_left + Point::new(1, pad as i32),
            Size::new(col.size.width.saturating_sub(2), line + icon_px + line + 2),
        );
        clear_slot(surface, region, content);

        let Some(day) = days.get(index) else {
            continue;
        };
        let cx = col.center().x;
        let mut y = content.top_left.y;

        surface.draw_text(Point::new(cx, y), short_weekday(day.date), FontSize::Small, WHITE, Anchor::Center);
        y += line as i32 + 1;

        let icon = icon_for_code(day.code);
        surface.draw_image_asset(icon.asset_path(IconSize::Small).as_str(), Point::new(cx - icon_px as i32 / 2, y));
        y += icon_px as i32 + 1;

        // No unit letter; the current temperature carries it
        let max = format_temperature(day.max, "");
        let min = format_temperature(day.min, "");
        surface.draw_text(Point::new(cx - 1, y), max.as_str(), FontSize::Small, ORANGE, Anchor::Right);
        surface.draw_text(Point::new(cx + 1, y), min.as_str(), FontSize::Small, CYAN, Anchor::Left);
    }
}
