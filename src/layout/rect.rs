//! Rect: A rectangle primitive for layout calculations.
//!
//! Coordinates are signed so that degenerate arithmetic (margins wider than
//! the rectangle, pointers dragged off-screen) stays representable; sizes
//! produced by the layout code are always clamped to zero or more.

/// A rectangle defined by position and size, in terminal cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: i32,
    /// Y coordinate (row) of the top-left corner.
    pub y: i32,
    /// Width in columns.
    pub width: i32,
    /// Height in rows.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a terminal size (full screen).
    #[inline]
    pub fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, i32::from(width), i32::from(height))
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink the rectangle by a margin.
    ///
    /// Sides that collapse past each other yield a zero extent on that axis.
    #[inline]
    #[must_use]
    pub fn inset(&self, margin: Margin) -> Self {
        Self::new(
            self.x + margin.left,
            self.y + margin.top,
            (self.width - margin.left - margin.right).max(0),
            (self.height - margin.top - margin.bottom).max(0),
        )
    }

    /// Extent along an axis (width for horizontal, height for vertical).
    #[inline]
    pub const fn extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// Inset applied to a layout frame's rectangle before it is partitioned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Margin {
    /// Rows removed from the top.
    pub top: i32,
    /// Rows removed from the bottom.
    pub bottom: i32,
    /// Columns removed from the left.
    pub left: i32,
    /// Columns removed from the right.
    pub right: i32,
}

impl Margin {
    /// No inset.
    pub const ZERO: Self = Self::uniform(0);

    /// Create a margin with individual sides.
    #[inline]
    pub const fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self { top, bottom, left, right }
    }

    /// Create a margin with the same inset on every side.
    #[inline]
    pub const fn uniform(v: i32) -> Self {
        Self::new(v, v, v, v)
    }
}

/// Axis along which a layout frame hands out its slots.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Orientation {
    /// Slots run left to right.
    #[default]
    Horizontal,
    /// Slots run top to bottom.
    Vertical,
}

/// A position in cell coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for Point {
    #[inline]
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(i32::from(x), i32::from(y))
    }
}

/// A triangle, used for slider handles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Triangle {
    /// Vertices in any winding order.
    pub points: [Point; 3],
}

impl Triangle {
    /// Create a triangle from three vertices.
    #[inline]
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { points: [a, b, c] }
    }

    /// Edge-inclusive point-in-triangle test.
    ///
    /// Works for either winding; a degenerate triangle contains only the
    /// points on its collapsed edge.
    pub fn contains(&self, p: Point) -> bool {
        let [a, b, c] = self.points;
        let d1 = edge(a, b, p);
        let d2 = edge(b, c, p);
        let d3 = edge(c, a, p);

        let has_neg = d1 < 0 || d2 < 0 || d3 < 0;
        let has_pos = d1 > 0 || d2 > 0 || d3 > 0;
        if !(has_neg && has_pos) {
            // All zero means collinear vertices; require p on the segment hull.
            if d1 == 0 && d2 == 0 && d3 == 0 {
                return self.bounds().contains(p.x, p.y);
            }
            return true;
        }
        false
    }

    /// Smallest rectangle enclosing all three vertices (inclusive of the
    /// far edge, so a vertex on `right()` is never outside).
    pub fn bounds(&self) -> Rect {
        let [a, b, c] = self.points;
        let min_x = a.x.min(b.x).min(c.x);
        let max_x = a.x.max(b.x).max(c.x);
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);
        Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }
}

/// Twice the signed area of (a, b, p).
#[inline]
const fn edge(a: Point, b: Point, p: Point) -> i64 {
    (b.x as i64 - a.x as i64) * (p.y as i64 - a.y as i64)
        - (b.y as i64 - a.y as i64) * (p.x as i64 - a.x as i64)
}
