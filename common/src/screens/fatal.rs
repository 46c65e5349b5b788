//! Terminal diagnostic screen for startup failures.
//!
//! Drawn straight onto the draw target: the layout may be the thing that
//! failed, so nothing here depends on it.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::colors::{BLACK, RED, WHITE};
use crate::error::StartupError;
use crate::styles::{CENTER_TOP, MEDIUM_FONT, SMALL_FONT};

const BANNER_HEIGHT: u32 = 60;
const BORDER: u32 = 3;

const WHITE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);
const RED_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(RED);

/// Clear the screen and show a red banner describing `err`.
pub fn draw_fatal<D>(
    display: &mut D,
    err: &StartupError,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let screen = display.bounding_box();
    display.clear(BLACK).ok();

    let width = screen.size.width.saturating_sub(2 * BORDER + 8).max(1);
    let height = BANNER_HEIGHT.min(screen.size.height.saturating_sub(2 * BORDER)).max(1);
    let banner = Rectangle::with_center(screen.center(), Size::new(width, height));
    let border = Rectangle::with_center(screen.center(), Size::new(width + 2 * BORDER, height + 2 * BORDER));

    border.into_styled(WHITE_FILL).draw(display).ok();
    banner.into_styled(RED_FILL).draw(display).ok();

    let cx = banner.center().x;
    let top = banner.top_left.y + 6;
    Text::with_text_style(
        "STARTUP FAILED",
        Point::new(cx, top),
        MonoTextStyle::new(MEDIUM_FONT, WHITE),
        CENTER_TOP,
    )
    .draw(display)
    .ok();

    let mut detail: String<96> = String::new();
    write!(detail, "{err}").ok();
    Text::with_text_style(
        &detail,
        Point::new(cx, top + MEDIUM_FONT.character_size.height as i32 + 6),
        MonoTextStyle::new(SMALL_FONT, WHITE),
        CENTER_TOP,
    )
    .draw(display)
    .ok();

    log::error!("startup failed: {err}");
}
