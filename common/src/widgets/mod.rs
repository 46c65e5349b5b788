//! Region widgets.
//!
//! One module per screen region. Every widget draws through
//! [`RenderSurface`] and follows the same contract:
//!
//! - `draw_static` puts up the labels that never change; the orchestrator
//!   calls it once per region.
//! - `draw` clears only the slots holding variable content, then draws them.
//!   Slots are sized for the widest possible value, so a shorter value never
//!   leaves residue, and are clipped to the region so a clear never reaches a
//!   neighbour.

mod astronomy;
mod conditions;
mod forecast;
mod graphs;
mod time;
mod uv;

pub use astronomy::{AstronomyView, draw_astronomy, draw_astronomy_static};
pub use conditions::{ConditionsView, draw_conditions};
pub use forecast::draw_forecast;
pub use graphs::{draw_precipitation, draw_precipitation_static, draw_temperature, draw_temperature_static};
pub use time::{SPINNER_PX, draw_time, spinner_rect};
pub use uv::{draw_uv, draw_uv_static};

use embedded_graphics::primitives::Rectangle;

use crate::config::{Layout, Units};
use crate::providers::Clock;
use crate::surface::{FontSize, RenderSurface};

/// Per-run values every widget may need.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub layout: &'a Layout,
    pub units: Units,
    pub use_24h: bool,
    pub clock: &'a dyn Clock,
}

impl RenderContext<'_> {
    #[inline]
    pub const fn pad(&self) -> u32 { self.layout.geometry().pad }
}

/// `rect` clipped to `region`.
#[inline]
pub(crate) fn slot(
    region: Rectangle,
    rect: Rectangle,
) -> Rectangle {
    region.intersection(&rect)
}

/// Clear a slot clipped to its region.
#[inline]
pub(crate) fn clear_slot<S: RenderSurface + ?Sized>(
    surface: &mut S,
    region: Rectangle,
    rect: Rectangle,
) {
    let area = slot(region, rect);
    if !area.is_zero_sized() {
        surface.clear_rect(area);
    }
}

/// Top y of text row `row` starting at `top`, rows spaced one line plus 2px.
#[inline]
pub(crate) const fn row_y(
    top: i32,
    row: u32,
    font: FontSize,
) -> i32 {
    top + (row * (font.line_height() + 2)) as i32
}

/// Largest font of `candidates` (largest first) that fits in `height` with
/// `reserved` pixels left over for the rest of the region.
pub(crate) fn fitting_font(
    candidates: &[FontSize],
    reserved: u32,
    height: u32,
) -> FontSize {
    candidates
        .iter()
        .copied()
        .find(|f| f.line_height() + reserved <= height)
        .unwrap_or(FontSize::Small)
}

#[inline]
pub(crate) fn right_edge(r: &Rectangle) -> i32 { r.top_left.x + r.size.width as i32 }

#[inline]
pub(crate) fn bottom_edge(r: &Rectangle) -> i32 { r.top_left.y + r.size.height as i32 }
