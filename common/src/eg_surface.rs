//! [`RenderSurface`] over any `embedded-graphics` RGB565 draw target.
//!
//! Works the same against the SPI panel driver and the desktop simulator
//! window. Image assets are resolved to procedural glyphs by path; draw
//! errors are discarded, there is nothing to roll back on a non-buffered
//! target.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use crate::classify::{IconCategory, IconSize, moon_index_from_path};
use crate::colors::{BLACK, GRAY};
use crate::glyphs::{draw_moon, draw_weather_icon};
use crate::styles::{font, text_style};
use crate::surface::{Anchor, FontSize, RenderSurface};

/// Size of the moon phase image.
pub const MOON_PX: u32 = IconSize::Small.px();

/// Adapter from [`RenderSurface`] calls to primitives on `D`.
pub struct EgSurface<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    display: &'a mut D,
}

impl<'a, D> EgSurface<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(display: &'a mut D) -> Self { Self { display } }
}

/// Resolve an image path to something drawable.
enum Asset {
    Icon(IconCategory, IconSize),
    Moon(u8),
}

fn resolve(path: &str) -> Option<Asset> {
    if let Some(index) = moon_index_from_path(path) {
        return Some(Asset::Moon(index));
    }
    for size in [IconSize::Small, IconSize::Large] {
        if let Some(stem) = path.strip_prefix(size.dir()).and_then(|rest| rest.strip_suffix(".bmp")) {
            return IconCategory::from_asset_name(stem).map(|icon| Asset::Icon(icon, size));
        }
    }
    None
}

impl<D> RenderSurface for EgSurface<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn clear_rect(
        &mut self,
        area: Rectangle,
    ) {
        if area.is_zero_sized() {
            return;
        }
        area.into_styled(PrimitiveStyle::with_fill(BLACK)).draw(self.display).ok();
    }

    fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        font_size: FontSize,
        color: Rgb565,
        anchor: Anchor,
    ) {
        let style = MonoTextStyle::new(font(font_size), color);
        Text::with_text_style(text, pos, style, text_style(anchor)).draw(self.display).ok();
    }

    fn draw_image_asset(
        &mut self,
        path: &str,
        top_left: Point,
    ) {
        match resolve(path) {
            Some(Asset::Icon(icon, size)) => draw_weather_icon(self.display, icon, top_left, size.px()),
            Some(Asset::Moon(index)) => draw_moon(self.display, index, top_left, MOON_PX),
            None => {
                log::warn!("no glyph for asset {path}");
                Rectangle::new(top_left, Size::new(MOON_PX, MOON_PX))
                    .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
                    .draw(self.display)
                    .ok();
            }
        }
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb565,
    ) {
        Line::new(from, to).into_styled(PrimitiveStyle::with_stroke(color, 1)).draw(self.display).ok();
    }

    fn draw_circle(
        &mut self,
        center: Point,
        diameter: u32,
        color: Rgb565,
        filled: bool,
    ) {
        let style = if filled { PrimitiveStyle::with_fill(color) } else { PrimitiveStyle::with_stroke(color, 1) };
        Circle::with_center(center, diameter).into_styled(style).draw(self.display).ok();
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    #[test]
    fn test_resolve_paths() {
        assert!(matches!(resolve("/icon/rain.bmp"), Some(Asset::Icon(IconCategory::Rain, IconSize::Large))));
        assert!(matches!(
            resolve("/icon50/clear-night.bmp"),
            Some(Asset::Icon(IconCategory::ClearNight, IconSize::Small))
        ));
        assert!(matches!(resolve("/moon/moonphase_L3.bmp"), Some(Asset::Moon(3))));
        assert!(resolve("/icon/hail.bmp").is_none());
        assert!(resolve("/fonts/NSBold15.vlw").is_none());
    }

    #[test]
    fn test_glyphs_stay_inside_their_square() {
        for icon in IconCategory::ALL {
            let mut display: MockDisplay<Rgb565> = MockDisplay::new();
            display.set_allow_overdraw(true);
            let mut surface = EgSurface::new(&mut display);
            surface.draw_image_asset(icon.asset_path(IconSize::Small).as_str(), Point::new(8, 8));

            let bounds = display.affected_area();
            let square = Rectangle::new(Point::new(8, 8), Size::new(24, 24));
            assert_eq!(square.intersection(&bounds), bounds, "{icon:?} drew outside its square");
        }
    }

    #[test]
    fn test_moon_stays_inside_its_square() {
        for index in 0..8 {
            let mut display: MockDisplay<Rgb565> = MockDisplay::new();
            display.set_allow_overdraw(true);
            let mut surface = EgSurface::new(&mut display);
            surface.draw_image_asset(crate::classify::moon_asset_path(index).as_str(), Point::new(4, 4));

            let bounds = display.affected_area();
            let square = Rectangle::new(Point::new(4, 4), Size::new(MOON_PX, MOON_PX));
            assert_eq!(square.intersection(&bounds), bounds);
        }
    }

    #[test]
    fn test_clear_rect_fills_black() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        let mut surface = EgSurface::new(&mut display);
        surface.clear_rect(Rectangle::new(Point::new(1, 1), Size::new(2, 2)));
        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(BLACK));
        assert_eq!(display.get_pixel(Point::new(3, 3)), None);
    }
}
