//! Update-in-progress spinner.
//!
//! A ring of eight dots in the Time region's top-right corner with one bright
//! "head" dot walking around it. It shows while a fetch is running or while
//! either data source has no valid snapshot, and is wiped once both are valid.
//!
//! # Drawing Cost
//!
//! Each step repaints only two dots: the old head back to the ring color and
//! the new head in the accent color. The square is cleared once, on stop.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::{ACCENT, GRAY};
use crate::surface::RenderSurface;

/// Dot offsets from the spinner centre, clockwise from 12 o'clock.
const DOT_OFFSETS: [(i32, i32); 8] = [(0, -3), (2, -2), (3, 0), (2, 2), (0, 3), (-2, 2), (-3, 0), (-2, -2)];

const DOT_PX: u32 = 2;

/// Busy indicator state.
#[derive(Debug, Default)]
pub struct BusyIndicator {
    active: bool,
    step: u8,
}

impl BusyIndicator {
    pub const fn new() -> Self { Self { active: false, step: 0 } }

    #[inline]
    pub const fn is_active(&self) -> bool { self.active }

    #[inline]
    pub const fn step(&self) -> u8 { self.step }

    fn dot<S: RenderSurface + ?Sized>(
        surface: &mut S,
        area: Rectangle,
        index: u8,
        color: Rgb565,
    ) {
        let (dx, dy) = DOT_OFFSETS[(index % 8) as usize];
        surface.draw_circle(area.center() + Point::new(dx, dy), DOT_PX, color, true);
    }

    /// Show the ring if it is not already up.
    pub fn start<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        area: Rectangle,
    ) {
        if self.active || area.is_zero_sized() {
            return;
        }
        for i in 0..8 {
            Self::dot(surface, area, i, if i == self.step { ACCENT } else { GRAY });
        }
        self.active = true;
    }

    /// Move the head one dot clockwise.
    pub fn advance<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        area: Rectangle,
    ) {
        if !self.active {
            return;
        }
        Self::dot(surface, area, self.step, GRAY);
        self.step = (self.step + 1) % 8;
        Self::dot(surface, area, self.step, ACCENT);
    }

    /// Wipe the spinner square.
    pub fn stop<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        area: Rectangle,
    ) {
        if !self.active {
            return;
        }
        surface.clear_rect(area);
        self.active = false;
    }
}
