//! Cell: The atomic unit of terminal display.
//!
//! A cell is one glyph plus its foreground and background colours. Drawing
//! primitives that cover an area paint the background; lines and textures
//! paint glyphs and leave the background underneath intact.

/// True-color RGB representation.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Red (230, 41, 55), the meter fill.
    pub const RED: Self = Self::new(230, 41, 55);
    /// Pure green (0, 255, 0), the chroma-key backdrop behind the avatar.
    pub const PURE_GREEN: Self = Self::new(0, 255, 0);
    /// Default foreground (white)
    pub const DEFAULT_FG: Self = Self::WHITE;
    /// Default background (black)
    pub const DEFAULT_BG: Self = Self::BLACK;
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    glyph: char,
    fg: Rgb,
    bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space character with default colors).
    pub const EMPTY: Self = Self {
        glyph: ' ',
        fg: Rgb::DEFAULT_FG,
        bg: Rgb::DEFAULT_BG,
    };

    /// Create a new cell holding `glyph` with default colors.
    ///
    /// Glyphs are expected to be one column wide.
    #[inline]
    pub const fn new(glyph: char) -> Self {
        Self {
            glyph,
            fg: Rgb::DEFAULT_FG,
            bg: Rgb::DEFAULT_BG,
        }
    }

    /// A blank cell painted with a background color.
    #[inline]
    pub const fn solid(bg: Rgb) -> Self {
        Self::new(' ').with_bg(bg)
    }

    /// Get the glyph.
    #[inline]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Set the glyph and foreground, keeping the background.
    #[inline]
    pub const fn set_glyph(&mut self, glyph: char, fg: Rgb) -> &mut Self {
        self.glyph = glyph;
        self.fg = fg;
        self
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("glyph", &self.glyph)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_glyph_keeps_background() {
        let mut cell = Cell::solid(Rgb::PURE_GREEN);
        cell.set_glyph('@', Rgb::WHITE);
        assert_eq!(cell.glyph(), '@');
        assert_eq!(cell.fg(), Rgb::WHITE);
        assert_eq!(cell.bg(), Rgb::PURE_GREEN);
    }

    #[test]
    fn test_default_is_blank() {
        assert_eq!(Cell::default(), Cell::EMPTY);
        assert_eq!(Cell::solid(Rgb::RED).glyph(), ' ');
        assert_eq!(format!("{:?}", Rgb::RED), "#e62937");
    }
}
