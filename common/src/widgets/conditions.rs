//! Current temperature, weather icon and description.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::{RenderContext, clear_slot, right_edge, row_y};
use crate::classify::{IconCategory, IconSize};
use crate::colors::{LABEL_GRAY, WHITE};
use crate::orchestrator::split_label;
use crate::styles::text_width;
use crate::surface::{Anchor, FontSize, RenderSurface};

/// What the region shows.
#[derive(Clone, Copy, Debug)]
pub struct ConditionsView<'a> {
    pub temperature: f32,
    pub icon: IconCategory,
    pub description: &'a str,
}

/// Variable-content slots of the region.
pub(crate) struct Slots {
    pub icon: Rectangle,
    pub icon_size: IconSize,
    pub temperature: Rectangle,
    pub temperature_font: FontSize,
    pub description: Rectangle,
}

pub(crate) fn slots(
    region: Rectangle,
    pad: u32,
) -> Slots {
    let line = FontSize::Small.line_height() + 2;
    let icon_size = if IconSize::Large.px() + 2 * line + 2 * pad <= region.size.height {
        IconSize::Large
    } else {
        IconSize::Small
    };
    let origin = region.top_left + Point::new(pad as i32, pad as i32);
    let icon = Rectangle::new(origin, Size::new(icon_size.px(), icon_size.px()));

    let temp_x = origin.x + (icon_size.px() + pad) as i32;
    let temp_w = (right_edge(&region) - pad as i32 - temp_x).max(0) as u32;
    let temperature_font = if text_width("-88C", FontSize::Large) <= temp_w && FontSize::Large.line_height() <= icon_size.px() {
        FontSize::Large
    } else {
        FontSize::Medium
    };
    let temperature = Rectangle::new(Point::new(temp_x, origin.y), Size::new(temp_w, temperature_font.line_height()));

    let description = Rectangle::new(
        Point::new(origin.x, origin.y + (icon_size.px() + pad / 2) as i32),
        Size::new(region.size.width.saturating_sub(2 * pad), 2 * line),
    );

    Slots { icon, icon_size, temperature, temperature_font, description }
}

/// Format a temperature as whole degrees with the unit letter.
pub(crate) fn format_temperature(
    value: f32,
    suffix: &str,
) -> String<8> {
    let mut out = String::new();
    // Avoid "-0"
    let value = if value > -0.5 && value < 0.5 { 0.0 } else { value };
    write!(out, "{value:.0}{suffix}").ok();
    out
}

/// Redraw temperature, icon and description.
pub fn draw_conditions<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
    view: &ConditionsView<'_>,
) {
    let s = slots(region, ctx.pad());
    clear_slot(surface, region, s.icon);
    clear_slot(surface, region, s.temperature);
    clear_slot(surface, region, s.description);

    surface.draw_image_asset(view.icon.asset_path(s.icon_size).as_str(), s.icon.top_left);

    let temp = format_temperature(view.temperature, ctx.units.temp_suffix());
    surface.draw_text(s.temperature.top_left, temp.as_str(), s.temperature_font, WHITE, Anchor::Left);

    let (first, second) = if surface.measure_text_width(view.description, FontSize::Small) > s.description.size.width {
        split_label(view.description)
    } else {
        (view.description, "")
    };
    let top = s.description.top_left.y;
    surface.draw_text(
        Point::new(s.description.top_left.x, row_y(top, 0, FontSize::Small)),
        first,
        FontSize::Small,
        LABEL_GRAY,
        Anchor::Left,
    );
    if !second.is_empty() {
        surface.draw_text(
            Point::new(s.description.top_left.x, row_y(top, 1, FontSize::Small)),
            second,
            FontSize::Small,
            LABEL_GRAY,
            Anchor::Left,
        );
    }
}
