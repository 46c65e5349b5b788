//! Rendering surface abstraction.
//!
//! Widgets draw through [`RenderSurface`] only. The panel adapter
//! ([`EgSurface`](crate::eg_surface::EgSurface)) maps it onto an
//! `embedded-graphics` draw target; tests record the calls instead.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::styles;

/// Font size class.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    /// Pixel height of one line.
    #[inline]
    pub const fn line_height(self) -> u32 { styles::font(self).character_size.height }
}

/// Horizontal anchor of a text position. The y coordinate is always the top
/// of the text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// Drawing primitives the widgets need.
pub trait RenderSurface {
    /// Fill `area` with the background color.
    fn clear_rect(
        &mut self,
        area: Rectangle,
    );

    fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        font: FontSize,
        color: Rgb565,
        anchor: Anchor,
    );

    /// Draw an image asset with its top-left corner at `top_left`.
    fn draw_image_asset(
        &mut self,
        path: &str,
        top_left: Point,
    );

    fn measure_text_width(
        &self,
        text: &str,
        font: FontSize,
    ) -> u32 {
        styles::text_width(text, font)
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb565,
    );

    fn draw_circle(
        &mut self,
        center: Point,
        diameter: u32,
        color: Rgb565,
        filled: bool,
    );

    fn draw_hline(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        color: Rgb565,
    ) {
        if len > 0 {
            self.draw_line(Point::new(x, y), Point::new(x + len as i32 - 1, y), color);
        }
    }

    fn draw_vline(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        color: Rgb565,
    ) {
        if len > 0 {
            self.draw_line(Point::new(x, y), Point::new(x, y + len as i32 - 1), color);
        }
    }
}

/// Bounding box of text drawn at `pos` with `anchor`.
pub fn text_bounds(
    pos: Point,
    text: &str,
    font: FontSize,
    anchor: Anchor,
) -> Rectangle {
    let size = styles::text_size(text, font);
    let x = match anchor {
        Anchor::Left => pos.x,
        Anchor::Center => pos.x - size.width as i32 / 2,
        Anchor::Right => pos.x - size.width as i32,
    };
    Rectangle::new(Point::new(x, pos.y), size)
}
