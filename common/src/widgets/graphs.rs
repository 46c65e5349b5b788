//! Precipitation bars and the hourly temperature line graph.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::conditions::format_temperature;
use super::{RenderContext, bottom_edge, clear_slot, right_edge};
use crate::colors::{GRAY, LABEL_GRAY, RAIN_BLUE, WHITE};
use crate::config::layout::inset;
use crate::styles::text_width;
use crate::surface::{Anchor, FontSize, RenderSurface};

const RAIN_LABEL: &str = "Rain";

/// Widest min/max label on the temperature graph.
const WIDEST_SCALE_LABEL: &str = "-88";

/// Diameter of a temperature sample marker.
const MARKER_PX: u32 = 3;

// =============================================================================
// Precipitation
// =============================================================================

/// Bar area, above the static axis line.
pub(crate) fn precipitation_plot(
    region: Rectangle,
    pad: u32,
) -> Rectangle {
    let x = region.top_left.x + (pad + text_width(RAIN_LABEL, FontSize::Small) + pad) as i32;
    let y = region.top_left.y + pad as i32;
    let w = (right_edge(&region) - pad as i32 - x).max(0) as u32;
    // Leave the bottom row for the axis
    let h = region.size.height.saturating_sub(2 * pad + 1);
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

pub fn draw_precipitation_static<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
) {
    let pad = ctx.pad();
    let plot = precipitation_plot(region, pad);
    surface.draw_text(
        region.top_left + Point::new(pad as i32, pad as i32),
        RAIN_LABEL,
        FontSize::Small,
        LABEL_GRAY,
        Anchor::Left,
    );
    surface.draw_hline(plot.top_left.x, bottom_edge(&plot), plot.size.width, GRAY);
}

/// Redraw one bar per probability slot.
pub fn draw_precipitation<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
    probabilities: &[f32],
) {
    let plot = precipitation_plot(region, ctx.pad());
    clear_slot(surface, region, plot);
    if probabilities.is_empty() || plot.is_zero_sized() {
        return;
    }

    let slot_w = plot.size.width / probabilities.len() as u32;
    let bar_w = slot_w.saturating_sub(2).max(1);
    let base = bottom_edge(&plot) - 1;
    for (i, &p) in probabilities.iter().enumerate() {
        let p = p.clamp(0.0, 1.0);
        let h = (p * plot.size.height as f32) as u32;
        if h == 0 {
            continue;
        }
        let x0 = plot.top_left.x + (slot_w * i as u32) as i32 + 1;
        for dx in 0..bar_w as i32 {
            surface.draw_vline(x0 + dx, base - h as i32 + 1, h, RAIN_BLUE);
        }
    }
}

// =============================================================================
// Temperature
// =============================================================================

/// Variable slots of the temperature graph: the min/max scale labels and the
/// plot area inside the axes.
pub(crate) fn temperature_slots(
    region: Rectangle,
    pad: u32,
) -> (Rectangle, Rectangle) {
    let label_w = text_width(WIDEST_SCALE_LABEL, FontSize::Small);
    let top = region.top_left.y + pad as i32;
    let inner_h = region.size.height.saturating_sub(2 * pad);
    let labels = Rectangle::new(Point::new(region.top_left.x + pad as i32, top), Size::new(label_w, inner_h));

    let axis_x = right_edge(&labels) + pad as i32;
    let plot_x = axis_x + 1;
    let plot_w = (right_edge(&region) - pad as i32 - plot_x).max(0) as u32;
    let plot = Rectangle::new(Point::new(plot_x, top), Size::new(plot_w, inner_h.saturating_sub(1)));
    (labels, plot)
}

pub fn draw_temperature_static<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
) {
    let (_, plot) = temperature_slots(region, ctx.pad());
    let axis_x = plot.top_left.x - 1;
    surface.draw_vline(axis_x, plot.top_left.y, plot.size.height + 1, GRAY);
    surface.draw_hline(axis_x, bottom_edge(&plot), plot.size.width + 1, GRAY);
}

/// Redraw the scale labels and the line through the hourly points.
pub fn draw_temperature<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
    series: &[f32],
) {
    let (labels, plot) = temperature_slots(region, ctx.pad());
    clear_slot(surface, region, labels);
    clear_slot(surface, region, plot);
    if series.len() < 2 {
        return;
    }

    let mut min = series[0];
    let mut max = series[0];
    for &v in &series[1..] {
        min = min.min(v);
        max = max.max(v);
    }

    let lo = format_temperature(min, "");
    let hi = format_temperature(max, "");
    let label_x = right_edge(&labels);
    surface.draw_text(Point::new(label_x, labels.top_left.y), &hi, FontSize::Small, LABEL_GRAY, Anchor::Right);
    surface.draw_text(
        Point::new(label_x, bottom_edge(&labels) - FontSize::Small.line_height() as i32),
        &lo,
        FontSize::Small,
        LABEL_GRAY,
        Anchor::Right,
    );

    // Markers must stay inside the plot
    let area = inset(plot, MARKER_PX / 2 + 1);
    if area.is_zero_sized() {
        return;
    }
    let graph_h = area.size.height as i32;
    let range = max - min;
    let y_scale = if range > 0.1 { (graph_h - 1) as f32 / range } else { 0.0 };
    let x_step = (area.size.width - 1) as f32 / (series.len() - 1) as f32;
    let max_x = right_edge(&area) - 1;
    let max_y = bottom_edge(&area) - 1;

    let mut prev: Option<Point> = None;
    for (i, &v) in series.iter().enumerate() {
        let x = (area.top_left.x + (i as f32 * x_step) as i32).min(max_x);
        let y = if y_scale > 0.0 {
            (area.top_left.y + graph_h - 1 - ((v - min) * y_scale) as i32).clamp(area.top_left.y, max_y)
        } else {
            area.top_left.y + (graph_h - 1) / 2
        };
        let pt = Point::new(x, y);
        if let Some(p) = prev {
            surface.draw_line(p, pt, WHITE);
        }
        surface.draw_circle(pt, MARKER_PX, WHITE, true);
        prev = Some(pt);
    }
}
