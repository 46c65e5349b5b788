//! UV index line.

use core::fmt::Write;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::String;

use super::{RenderContext, clear_slot, fitting_font, right_edge};
use crate::classify::UvBand;
use crate::colors::LABEL_GRAY;
use crate::render::UvCommit;
use crate::styles::text_width;
use crate::surface::{Anchor, FontSize, RenderSurface};

const LABEL: &str = "UV";

fn label_pos(
    region: Rectangle,
    pad: u32,
) -> Point {
    region.top_left + Point::new(pad as i32, pad as i32)
}

/// Slot holding the value text and the tallest font it may use.
pub(crate) fn value_slot(
    region: Rectangle,
    pad: u32,
) -> (Rectangle, FontSize) {
    let font = fitting_font(&[FontSize::Medium], 2 * pad, region.size.height);
    let origin = label_pos(region, pad);
    let x = origin.x + (text_width(LABEL, FontSize::Small) + pad) as i32;
    let w = (right_edge(&region) - pad as i32 - x).max(0) as u32;
    (Rectangle::new(Point::new(x, origin.y), Size::new(w, font.line_height())), font)
}

fn value_text(view: &UvCommit) -> (String<32>, UvBand) {
    let mut text = String::new();
    match view {
        UvCommit::Unavailable => {
            text.push_str(UvBand::NotAvailable.label()).ok();
            (text, UvBand::NotAvailable)
        }
        UvCommit::Reading { max, time_label } => {
            let band = UvBand::from_index(*max);
            write!(text, "{:.1} {} {}", max, band.label(), time_label).ok();
            (text, band)
        }
    }
}

/// Static "UV" label.
pub fn draw_uv_static<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
) {
    surface.draw_text(label_pos(region, ctx.pad()), LABEL, FontSize::Small, LABEL_GRAY, Anchor::Left);
}

/// Draw the value text over whatever is there. `clear` wipes the slot first.
pub fn draw_uv<S: RenderSurface + ?Sized>(
    surface: &mut S,
    ctx: &RenderContext<'_>,
    region: Rectangle,
    view: &UvCommit,
    clear: bool,
) {
    let (slot, tallest) = value_slot(region, ctx.pad());
    if clear {
        clear_slot(surface, region, slot);
    }
    let (text, band) = value_text(view);
    let font = if surface.measure_text_width(&text, tallest) <= slot.size.width { tallest } else { FontSize::Small };
    surface.draw_text(slot.top_left, text.as_str(), font, band.color(), Anchor::Left);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RegionId, Units, compute_layout};
    use crate::mocks::{Call, FixedClock, RecordingSurface};
    use crate::timefmt::TimeLabel;

    fn drawn_font(
        surface: &mut RecordingSurface,
        view: &UvCommit,
    ) -> FontSize {
        let layout = compute_layout(480, 320);
        let clock = FixedClock::june_15(12);
        let ctx = RenderContext { layout: &layout, units: Units::Metric, use_24h: true, clock: &clock };
        draw_uv(surface, &ctx, layout.region(RegionId::UvBand), view, true);
        surface
            .calls
            .iter()
            .find_map(|c| match c {
                Call::Text { font, .. } => Some(*font),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_value_text() {
        let (text, band) = value_text(&UvCommit::Reading { max: 8.3, time_label: TimeLabel::try_from("13:00").unwrap() });
        assert_eq!(text.as_str(), "8.3 VERY HIGH 13:00");
        assert_eq!(band, UvBand::VeryHigh);

        let (text, band) = value_text(&UvCommit::Unavailable);
        assert_eq!(text.as_str(), "N/A");
        assert_eq!(band, UvBand::NotAvailable);
    }

    #[test]
    fn test_font_falls_back_on_surface_metrics() {
        let layout = compute_layout(480, 320);
        let (_, tallest) = value_slot(layout.region(RegionId::UvBand), layout.geometry().pad);
        assert_eq!(tallest, FontSize::Medium);

        let mut surface = RecordingSurface::new();
        assert_eq!(drawn_font(&mut surface, &UvCommit::Unavailable), FontSize::Medium);

        let mut wide = RecordingSurface::with_measured_width(10_000);
        assert_eq!(drawn_font(&mut wide, &UvCommit::Unavailable), FontSize::Small);
    }
}
