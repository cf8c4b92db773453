//! Render module: Drawing capabilities and their terminal implementation.
//!
//! Widgets never touch pixels directly. They issue calls on a [`Canvas`],
//! which is implemented by:
//! - [`CellGrid`]: rasterises into a grid of terminal cells
//! - [`Recorder`]: captures the calls, for tests and headless runs
//!
//! [`diff`] turns successive grids into minimal ANSI output.

mod cell;
pub mod diff;
mod grid;
mod record;
mod texture;

pub use cell::{Cell, Rgb};
pub use grid::CellGrid;
pub use record::{DrawCommand, Recorder};
pub use texture::{Texture, TextureError, IDLE_ART, SPEAKING_ART};

use crate::layout::{Point, Rect, Triangle};

/// The drawing backend consumed by widgets.
pub trait Canvas {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Draw a line segment; both endpoints are included.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgb);

    /// Fill a triangle, edges included.
    fn fill_triangle(&mut self, triangle: Triangle, color: Rgb);

    /// Draw a texture with its top-left corner at `origin`, scaled by `scale`.
    fn draw_texture(&mut self, texture: &Texture, origin: Point, scale: f32);

    /// Outline a rectangle with four line segments.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        if rect.is_empty() {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        self.draw_line(Point::new(left, top), Point::new(right, top), color);
        self.draw_line(Point::new(right, top), Point::new(right, bottom), color);
        self.draw_line(Point::new(right, bottom), Point::new(left, bottom), color);
        self.draw_line(Point::new(left, bottom), Point::new(left, top), color);
    }
}
