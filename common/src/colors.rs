//! Color constants for the weather display.
//!
//! All colors are `Rgb565`, the native pixel format of the SPI TFT panels this
//! runs on. Standard colors come from the `RgbColor` trait constants; the rest
//! are hand-tuned for contrast on a black background.
//!
//! ## Rgb565 Color Format
//!
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Screen background and the color every clear uses.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Primary values (temperatures, time).
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. UV "VERY HIGH" and the fatal diagnostic banner.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. UV "LOW".
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. UV "MODERATE", sun glyphs.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Cyan. Forecast minimum temperatures and rain glyph streaks.
pub const CYAN: Rgb565 = Rgb565::CYAN;

// =============================================================================
// Custom Colors
// =============================================================================

/// Orange. UV "HIGH", forecast maximum temperatures.
/// RGB565: (31, 32, 0).
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Violet. UV "EXTREME".
/// RGB565: (18, 0, 31).
pub const VIOLET: Rgb565 = Rgb565::new(18, 0, 31);

/// Mid gray for static labels ("Sun", "Cloud", "Humidity").
/// RGB565: (16, 32, 16) - roughly 50% brightness.
pub const LABEL_GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray for graph axes and dividers.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Light gray for cloud glyphs and the N/A UV state.
/// RGB565: (24, 48, 24).
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(24, 48, 24);

/// Steel blue for precipitation bars.
/// RGB565: (8, 30, 28).
pub const RAIN_BLUE: Rgb565 = Rgb565::new(8, 30, 28);

/// Teal accent for the update-in-progress spinner.
/// RGB565: (0, 40, 20).
pub const ACCENT: Rgb565 = Rgb565::new(0, 40, 20);
