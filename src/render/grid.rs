//! CellGrid: A grid of cells representing the terminal screen.
//!
//! The grid uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order. All drawing is clipped to the grid.

use super::cell::{Cell, Rgb};
use super::texture::Texture;
use super::Canvas;
use crate::layout::{Point, Rect, Triangle};

const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
const DIAGONAL: char = '•';

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct CellGrid {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl CellGrid {
    /// Create a new grid with the given dimensions.
    ///
    /// All cells are initialized to empty (space with default colors).
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole grid as a rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert signed coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to a cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index_of(x, y).map(|i| &mut self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Clear the entire grid to a background color.
    pub fn clear(&mut self, bg: Rgb) {
        self.cells.fill(Cell::solid(bg));
    }

    /// Resize the grid. Content is discarded; every frame repaints it.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        assert!(width > 0 && height > 0, "Grid dimensions must be non-zero");
        self.cells = vec![Cell::EMPTY; (width as usize) * (height as usize)];
        self.width = width;
        self.height = height;
    }

    /// Copy content from another grid of the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.cells.copy_from_slice(&other.cells);
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Render one row's glyphs as a string (for tests and debugging).
    pub fn row_text(&self, y: u16) -> String {
        self.rows()
            .nth(y as usize)
            .map(|row| row.iter().map(Cell::glyph).collect())
            .unwrap_or_default()
    }

    /// Visible part of `rect`, as row and column ranges.
    fn clip(&self, rect: Rect) -> Option<(std::ops::Range<i32>, std::ops::Range<i32>)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(i32::from(self.width));
        let y1 = rect.bottom().min(i32::from(self.height));
        (x0 < x1 && y0 < y1).then_some((y0..y1, x0..x1))
    }

    fn put_glyph(&mut self, x: i32, y: i32, glyph: char, fg: Rgb) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.set_glyph(glyph, fg);
        }
    }
}

impl Canvas for CellGrid {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let Some((rows, cols)) = self.clip(rect) else {
            return;
        };
        for y in rows {
            for x in cols.clone() {
                self.set(x, y, Cell::solid(color));
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb) {
        let glyph = if from.y == to.y {
            HORIZONTAL
        } else if from.x == to.x {
            VERTICAL
        } else {
            DIAGONAL
        };

        // Bresenham, all octants.
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);

        loop {
            self.put_glyph(x, y, glyph, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_triangle(&mut self, triangle: Triangle, color: Rgb) {
        let Some((rows, cols)) = self.clip(triangle.bounds()) else {
            return;
        };
        for y in rows {
            for x in cols.clone() {
                if triangle.contains(Point::new(x, y)) {
                    self.set(x, y, Cell::solid(color));
                }
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn draw_texture(&mut self, texture: &Texture, origin: Point, scale: f32) {
        let (width, height) = texture.scaled_size(scale);
        let dest = Rect::new(origin.x, origin.y, width, height);
        let Some((rows, cols)) = self.clip(dest) else {
            return;
        };

        // Nearest-neighbour sampling.
        for y in rows {
            let v = ((y - origin.y) as f32 / scale) as usize;
            for x in cols.clone() {
                let u = ((x - origin.x) as f32 / scale) as usize;
                if let Some(glyph) = texture.get(u, v) {
                    self.put_glyph(x, y, glyph, texture.color());
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        if rect.is_empty() {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        self.draw_line(Point::new(left, top), Point::new(right, top), color);
        self.draw_line(Point::new(left, bottom), Point::new(right, bottom), color);
        // Placed per cell: a one-row side would pick the horizontal glyph.
        for y in top + 1..bottom {
            self.put_glyph(left, y, VERTICAL, color);
            self.put_glyph(right, y, VERTICAL, color);
        }
        if right > left && bottom > top {
            self.put_glyph(left, top, '┌', color);
            self.put_glyph(right, top, '┐', color);
            self.put_glyph(left, bottom, '└', color);
            self.put_glyph(right, bottom, '┘', color);
        }
    }
}

impl std::fmt::Debug for CellGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = CellGrid::new(80, 24);
        assert_eq!(grid.width(), 80);
        assert_eq!(grid.height(), 24);
        assert_eq!(grid.len(), 80 * 24);
    }

    #[test]
    #[should_panic]
    fn test_grid_zero_width() {
        CellGrid::new(0, 24);
    }

    #[test]
    fn test_grid_bounds() {
        let grid = CellGrid::new(80, 24);
        assert!(grid.get(79, 23).is_some());
        assert!(grid.get(80, 23).is_none());
        assert!(grid.get(-1, 0).is_none());
        assert_eq!(grid.index_of(5, 10), Some(10 * 80 + 5));
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut grid = CellGrid::new(10, 5);
        grid.fill_rect(Rect::new(-2, 3, 5, 10), Rgb::RED);

        assert_eq!(grid.get(0, 3).unwrap().bg(), Rgb::RED);
        assert_eq!(grid.get(2, 4).unwrap().bg(), Rgb::RED);
        assert_eq!(grid.get(3, 4).unwrap().bg(), Rgb::BLACK);
        assert_eq!(grid.get(0, 2).unwrap().bg(), Rgb::BLACK);
    }

    #[test]
    fn test_lines() {
        let mut grid = CellGrid::new(10, 5);
        grid.draw_line(Point::new(1, 1), Point::new(4, 1), Rgb::WHITE);
        assert_eq!(grid.row_text(1), " ────     ");

        grid.draw_line(Point::new(8, 0), Point::new(8, 4), Rgb::WHITE);
        for y in 0..5 {
            assert_eq!(grid.get(8, y).unwrap().glyph(), '│');
        }

        // Diagonal hits both endpoints and one cell per row.
        grid.draw_line(Point::new(0, 0), Point::new(3, 3), Rgb::WHITE);
        for i in 0..4 {
            assert_eq!(grid.get(i, i).unwrap().glyph(), '•');
        }
    }

    #[test]
    fn test_line_keeps_background() {
        let mut grid = CellGrid::new(6, 1);
        grid.fill_rect(grid.bounds(), Rgb::PURE_GREEN);
        grid.draw_line(Point::new(0, 0), Point::new(5, 0), Rgb::WHITE);
        assert_eq!(grid.get(3, 0).unwrap().bg(), Rgb::PURE_GREEN);
        assert_eq!(grid.get(3, 0).unwrap().fg(), Rgb::WHITE);
    }

    #[test]
    fn test_fill_triangle() {
        let mut grid = CellGrid::new(10, 10);
        let tri = Triangle::new(Point::new(2, 5), Point::new(6, 1), Point::new(6, 9));
        grid.fill_triangle(tri, Rgb::WHITE);

        assert_eq!(grid.get(2, 5).unwrap().bg(), Rgb::WHITE);
        assert_eq!(grid.get(6, 1).unwrap().bg(), Rgb::WHITE);
        assert_eq!(grid.get(5, 5).unwrap().bg(), Rgb::WHITE);
        assert_eq!(grid.get(2, 4).unwrap().bg(), Rgb::BLACK);
        assert_eq!(grid.get(7, 5).unwrap().bg(), Rgb::BLACK);
    }

    #[test]
    fn test_stroke_rect_corners() {
        let mut grid = CellGrid::new(6, 4);
        grid.stroke_rect(Rect::new(0, 0, 4, 3), Rgb::WHITE);
        assert_eq!(grid.row_text(0), "┌──┐  ");
        assert_eq!(grid.row_text(1), "│  │  ");
        assert_eq!(grid.row_text(2), "└──┘  ");
        assert_eq!(grid.row_text(3), "      ");
    }

    #[test]
    fn test_stroke_rect_sides_stay_vertical() {
        let mut grid = CellGrid::new(5, 6);
        grid.stroke_rect(Rect::new(1, 0, 3, 6), Rgb::WHITE);
        for y in 1..5 {
            assert_eq!(grid.row_text(y), " │ │ ", "row {y}");
        }

        // Two rows: corners only, no sides.
        let mut grid = CellGrid::new(4, 2);
        grid.stroke_rect(Rect::new(0, 0, 4, 2), Rgb::WHITE);
        assert_eq!(grid.row_text(0), "┌──┐");
        assert_eq!(grid.row_text(1), "└──┘");
    }

    #[test]
    fn test_draw_texture_scaled() {
        let tex = Texture::from_art("ab\ncd", Rgb::RED).unwrap();
        let mut grid = CellGrid::new(8, 6);

        grid.draw_texture(&tex, Point::new(1, 1), 1.0);
        assert_eq!(grid.row_text(1), " ab     ");
        assert_eq!(grid.row_text(2), " cd     ");
        assert_eq!(grid.get(1, 1).unwrap().fg(), Rgb::RED);

        let mut grid = CellGrid::new(8, 6);
        grid.draw_texture(&tex, Point::new(0, 0), 2.0);
        assert_eq!(grid.row_text(0), "aabb    ");
        assert_eq!(grid.row_text(1), "aabb    ");
        assert_eq!(grid.row_text(3), "ccdd    ");
    }

    #[test]
    fn test_texture_transparency() {
        let tex = Texture::from_art("a b", Rgb::WHITE).unwrap();
        let mut grid = CellGrid::new(3, 1);
        grid.fill_rect(grid.bounds(), Rgb::PURE_GREEN);
        grid.draw_texture(&tex, Point::new(0, 0), 1.0);
        let middle = grid.get(1, 0).unwrap();
        assert_eq!(middle.glyph(), ' ');
        assert_eq!(middle.bg(), Rgb::PURE_GREEN);
    }

    #[test]
    fn test_resize_and_clear() {
        let mut grid = CellGrid::new(4, 4);
        grid.resize(10, 2);
        assert_eq!(grid.len(), 20);
        grid.clear(Rgb::RED);
        assert!(grid.cells().iter().all(|c| c.bg() == Rgb::RED));
    }
}
