//! Fonts and pre-computed text styles.
//!
//! Fonts are fixed-width, so text metrics are a pure function of the string
//! length. Both the display adapter and layout code rely on this to size
//! clear rectangles without touching the panel.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::prelude::Size;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_24_POINT;

use crate::surface::{Anchor, FontSize};

// =============================================================================
// Text Alignment Styles
// =============================================================================
// Positions passed to the surface are the top edge of the text, so every
// style uses a top baseline.

pub const LEFT_TOP: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).baseline(Baseline::Top).build();

pub const CENTER_TOP: TextStyle =
    TextStyleBuilder::new().alignment(Alignment::Center).baseline(Baseline::Top).build();

pub const RIGHT_TOP: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).baseline(Baseline::Top).build();

/// Text style for an anchor.
#[inline]
pub const fn text_style(anchor: Anchor) -> TextStyle {
    match anchor {
        Anchor::Left => LEFT_TOP,
        Anchor::Center => CENTER_TOP,
        Anchor::Right => RIGHT_TOP,
    }
}

// =============================================================================
// Fonts
// =============================================================================

/// Labels, dates, forecast temperatures (6x10).
pub const SMALL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Secondary values (10x20).
pub const MEDIUM_FONT: &MonoFont<'static> = &FONT_10X20;

/// Clock and current temperature.
pub const LARGE_FONT: &MonoFont<'static> = &PROFONT_24_POINT;

/// Font backing a size class.
#[inline]
pub const fn font(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Small => SMALL_FONT,
        FontSize::Medium => MEDIUM_FONT,
        FontSize::Large => LARGE_FONT,
    }
}

/// Width in pixels of `text` set in `size`.
pub fn text_width(
    text: &str,
    size: FontSize,
) -> u32 {
    let f = font(size);
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    n * f.character_size.width + (n - 1) * f.character_spacing
}

/// Bounding size of one line of `text`.
#[inline]
pub fn text_size(
    text: &str,
    size: FontSize,
) -> Size {
    Size::new(text_width(text, size), size.line_height())
}
