//! Procedural weather and moon glyphs.
//!
//! Icons are drawn from primitives instead of bitmaps, so one table scales to
//! both icon sizes and the shared crate carries no image data. Every glyph
//! is clipped to its `size` x `size` square so it can never paint over a
//! neighbouring region.

use embedded_graphics::draw_target::DrawTargetExt;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle};

use crate::classify::IconCategory;
use crate::colors::{BLACK, CYAN, GRAY, LIGHT_GRAY, RAIN_BLUE, WHITE, YELLOW};

#[inline]
fn fill(color: Rgb565) -> PrimitiveStyle<Rgb565> { PrimitiveStyle::with_fill(color) }

#[inline]
fn stroke(
    color: Rgb565,
    width: u32,
) -> PrimitiveStyle<Rgb565> {
    PrimitiveStyle::with_stroke(color, width)
}

/// Scale `v` (in 1/16ths of the icon) to pixels.
#[inline]
const fn u(
    size: u32,
    v: u32,
) -> i32 {
    (size * v / 16) as i32
}

// =============================================================================
// Building Blocks
// =============================================================================

fn sun<D>(
    display: &mut D,
    center: Point,
    radius: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    // Rays on the 8 compass points, unit vectors scaled by 1/16
    const RAYS: [(i32, i32); 8] = [(16, 0), (11, 11), (0, 16), (-11, 11), (-16, 0), (-11, -11), (0, -16), (11, -11)];
    let r = radius as i32;
    let ray_style = stroke(YELLOW, 1.max(radius / 6));
    for (dx, dy) in RAYS {
        let inner = center + Point::new(dx * (r + 2) / 16, dy * (r + 2) / 16);
        let outer = center + Point::new(dx * (r + r / 2 + 2) / 16, dy * (r + r / 2 + 2) / 16);
        Line::new(inner, outer).into_styled(ray_style).draw(display).ok();
    }
    Circle::with_center(center, radius * 2).into_styled(fill(YELLOW)).draw(display).ok();
}

fn crescent<D>(
    display: &mut D,
    center: Point,
    radius: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(center, radius * 2).into_styled(fill(LIGHT_GRAY)).draw(display).ok();
    let shift = Point::new(radius as i32 / 2, -(radius as i32) / 3);
    Circle::with_center(center + shift, radius * 2).into_styled(fill(BLACK)).draw(display).ok();
}

fn cloud<D>(
    display: &mut D,
    top_left: Point,
    size: u32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = fill(color);
    Circle::new(top_left + Point::new(u(size, 2), u(size, 6)), size * 5 / 16).into_styled(style).draw(display).ok();
    Circle::new(top_left + Point::new(u(size, 5), u(size, 3)), size * 7 / 16).into_styled(style).draw(display).ok();
    Circle::new(top_left + Point::new(u(size, 9), u(size, 5)), size * 5 / 16).into_styled(style).draw(display).ok();
    Rectangle::new(top_left + Point::new(u(size, 3), u(size, 8)), Size::new(size * 10 / 16, size * 3 / 16))
        .into_styled(style)
        .draw(display)
        .ok();
}

fn streaks<D>(
    display: &mut D,
    top_left: Point,
    size: u32,
    color: Rgb565,
    count: u32,
    slant: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = stroke(color, 1.max(size / 24));
    let step = size * 10 / 16 / count.max(1);
    for i in 0..count {
        let x = u(size, 4) + (i * step) as i32;
        let top = top_left + Point::new(x, u(size, 12));
        let dx = if slant { -u(size, 1) } else { 0 };
        Line::new(top, top + Point::new(dx, u(size, 3))).into_styled(style).draw(display).ok();
    }
}

fn flakes<D>(
    display: &mut D,
    top_left: Point,
    size: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let d = 2.max(size / 10);
    for (x, y) in [(4, 12), (8, 14), (12, 12)] {
        Circle::new(top_left + Point::new(u(size, x), u(size, y)), d).into_styled(fill(WHITE)).draw(display).ok();
    }
}

// =============================================================================
// Weather Icons
// =============================================================================

/// Draw a weather icon inside the `size` square at `top_left`.
pub fn draw_weather_icon<D>(
    display: &mut D,
    icon: IconCategory,
    top_left: Point,
    size: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let display = &mut display.clipped(&Rectangle::new(top_left, Size::new(size, size)));
    let center = top_left + Point::new(u(size, 8), u(size, 8));
    match icon {
        IconCategory::ClearDay => sun(display, center, size * 4 / 16),
        IconCategory::ClearNight => crescent(display, center, size * 5 / 16),
        IconCategory::PartlyCloudyDay => {
            sun(display, top_left + Point::new(u(size, 6), u(size, 6)), size * 3 / 16);
            cloud(display, top_left + Point::new(0, u(size, 2)), size, LIGHT_GRAY);
        }
        IconCategory::PartlyCloudyNight => {
            crescent(display, top_left + Point::new(u(size, 6), u(size, 5)), size * 3 / 16);
            cloud(display, top_left + Point::new(0, u(size, 2)), size, GRAY);
        }
        IconCategory::Cloudy => cloud(display, top_left, size, LIGHT_GRAY),
        IconCategory::LightRain => {
            cloud(display, top_left, size, LIGHT_GRAY);
            streaks(display, top_left, size, RAIN_BLUE, 2, true);
        }
        IconCategory::Rain => {
            cloud(display, top_left, size, GRAY);
            streaks(display, top_left, size, CYAN, 4, true);
        }
        IconCategory::Drizzle => {
            cloud(display, top_left, size, LIGHT_GRAY);
            streaks(display, top_left, size, RAIN_BLUE, 3, false);
        }
        IconCategory::Sleet => {
            cloud(display, top_left, size, GRAY);
            streaks(display, top_left, size, CYAN, 2, true);
            flakes(display, top_left, size);
        }
        IconCategory::Snow => {
            cloud(display, top_left, size, LIGHT_GRAY);
            flakes(display, top_left, size);
        }
        IconCategory::Thunderstorm => {
            cloud(display, top_left, size, GRAY);
            let bolt = Triangle::new(
                top_left + Point::new(u(size, 9), u(size, 9)),
                top_left + Point::new(u(size, 6), u(size, 15)),
                top_left + Point::new(u(size, 8), u(size, 12)),
            );
            bolt.into_styled(fill(YELLOW)).draw(display).ok();
        }
        IconCategory::Fog => {
            let style = stroke(LIGHT_GRAY, 1.max(size / 16));
            for row in [4, 7, 10, 13] {
                let y = u(size, row);
                Line::new(top_left + Point::new(u(size, 2), y), top_left + Point::new(u(size, 14), y))
                    .into_styled(style)
                    .draw(display)
                    .ok();
            }
        }
        IconCategory::Unknown => {
            Rectangle::new(top_left + Point::new(u(size, 3), u(size, 3)), Size::new(size * 10 / 16, size * 10 / 16))
                .into_styled(stroke(GRAY, 1))
                .draw(display)
                .ok();
        }
    }
}

// =============================================================================
// Moon
// =============================================================================

/// Draw lunar phase `index` (0 new .. 4 full .. 7) inside the `size` square.
///
/// The lit part is a full disc with a dark disc slid across it; the slide
/// distance follows the phase, so waxing phases are lit on the right and
/// waning on the left.
pub fn draw_moon<D>(
    display: &mut D,
    index: u8,
    top_left: Point,
    size: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let display = &mut display.clipped(&Rectangle::new(top_left, Size::new(size, size)));
    let index = index % 8;
    let diameter = size.saturating_sub(2).max(2);
    let center = top_left + Point::new(size as i32 / 2, size as i32 / 2);
    let disc = Circle::with_center(center, diameter);

    if index == 0 {
        disc.into_styled(stroke(GRAY, 1)).draw(display).ok();
        return;
    }
    disc.into_styled(fill(LIGHT_GRAY)).draw(display).ok();
    if index == 4 {
        return;
    }

    // Shadow offset in quarters of the diameter: 1 -> crescent, 2 -> half, 3 -> gibbous
    let quarters = i32::from(if index < 4 { 4 - index } else { index - 4 });
    let offset = diameter as i32 * (4 - quarters) / 4;
    let shadow = if index < 4 { center - Point::new(offset, 0) } else { center + Point::new(offset, 0) };
    Circle::with_center(shadow, diameter).into_styled(fill(BLACK)).draw(display).ok();
    disc.into_styled(stroke(GRAY, 1)).draw(display).ok();
}
