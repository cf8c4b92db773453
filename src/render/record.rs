//! Recorder: A canvas that captures draw calls instead of rasterising them.

use super::cell::Rgb;
use super::texture::Texture;
use super::Canvas;
use crate::layout::{Point, Rect, Triangle};

/// One captured draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `fill_rect`
    FillRect {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Rgb,
    },
    /// `draw_line`
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line color.
        color: Rgb,
    },
    /// `fill_triangle`
    Triangle {
        /// Filled triangle.
        triangle: Triangle,
        /// Fill color.
        color: Rgb,
    },
    /// `draw_texture`
    Texture {
        /// Texture size in cells, unscaled.
        size: (usize, usize),
        /// Top-left corner.
        origin: Point,
        /// Scale factor.
        scale: f32,
    },
}

/// Canvas that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Calls recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget every recorded call.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All `fill_rect` calls with the given color.
    pub fn filled_with(&self, color: Rgb) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
            _ => None,
        })
    }
}

impl Canvas for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn fill_triangle(&mut self, triangle: Triangle, color: Rgb) {
        self.commands.push(DrawCommand::Triangle { triangle, color });
    }

    fn draw_texture(&mut self, texture: &Texture, origin: Point, scale: f32) {
        self.commands.push(DrawCommand::Texture {
            size: (texture.width(), texture.height()),
            origin,
            scale,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_rect_uses_four_lines() {
        let mut rec = Recorder::new();
        rec.stroke_rect(Rect::new(0, 0, 5, 3), Rgb::WHITE);
        let lines = rec
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 4);

        rec.clear();
        rec.stroke_rect(Rect::new(0, 0, 0, 3), Rgb::WHITE);
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn test_filled_with() {
        let mut rec = Recorder::new();
        rec.fill_rect(Rect::new(0, 0, 1, 1), Rgb::RED);
        rec.fill_rect(Rect::new(1, 1, 1, 1), Rgb::WHITE);
        rec.fill_rect(Rect::new(2, 2, 1, 1), Rgb::RED);
        let red: Vec<_> = rec.filled_with(Rgb::RED).collect();
        assert_eq!(red, vec![Rect::new(0, 0, 1, 1), Rect::new(2, 2, 1, 1)]);
    }
}
