//! Texture: Glyph art drawn by the avatar widget.
//!
//! A texture is a grid of single-column glyphs parsed from plain text. Spaces
//! are transparent, so whatever was painted underneath (the chroma-key
//! backdrop) shows through.

use super::cell::Rgb;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

/// Built-in art for the idle (silent) avatar.
pub const IDLE_ART: &str = r"
   .--------.
  /          \
 |   o    o   |
 |            |
 |    ____    |
  \          /
   '--------'
";

/// Built-in art for the speaking avatar.
pub const SPEAKING_ART: &str = r"
   .--------.
  /          \
 |   O    O   |
 |     __     |
 |    (  )    |
  \    ''    /
   '--------'
";

/// Failure to build a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The art file could not be read.
    #[error("failed to read texture {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The art contains no visible glyph.
    #[error("texture has no visible glyphs")]
    Empty,
    /// A glyph is not exactly one terminal column wide.
    #[error("glyph {glyph:?} at row {row}, column {column} is not one column wide")]
    UnsupportedGlyph {
        /// The offending glyph.
        glyph: char,
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        column: usize,
    },
}

/// A grid of glyphs with a single tint.
#[derive(Clone, PartialEq, Eq)]
pub struct Texture {
    glyphs: Vec<Option<char>>,
    width: usize,
    height: usize,
    color: Rgb,
}

impl Texture {
    /// Parse glyph art.
    ///
    /// Leading and trailing blank lines are dropped; rows are padded to the
    /// widest row with transparent cells.
    pub fn from_art(art: &str, color: Rgb) -> Result<Self, TextureError> {
        let rows: Vec<&str> = art.lines().map(str::trim_end).collect();
        let first = rows.iter().position(|r| !r.is_empty()).ok_or(TextureError::Empty)?;
        let last = rows.iter().rposition(|r| !r.is_empty()).unwrap_or(first);
        let rows = &rows[first..=last];

        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut glyphs = vec![None; width * height];

        for (row, line) in rows.iter().enumerate() {
            for (column, glyph) in line.chars().enumerate() {
                if glyph == ' ' {
                    continue;
                }
                if glyph.width() != Some(1) {
                    return Err(TextureError::UnsupportedGlyph { glyph, row, column });
                }
                glyphs[row * width + column] = Some(glyph);
            }
        }

        Ok(Self {
            glyphs,
            width,
            height,
            color,
        })
    }

    /// Load glyph art from a text file.
    pub fn load(path: impl AsRef<Path>, color: Rgb) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let art = std::fs::read_to_string(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_art(&art, color)
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Tint applied to every glyph.
    #[inline]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Glyph at (column, row); `None` if transparent or out of range.
    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Option<char> {
        if column < self.width && row < self.height {
            self.glyphs[row * self.width + column]
        } else {
            None
        }
    }

    /// Size of the texture when drawn at `scale`, rounded to whole cells.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn scaled_size(&self, scale: f32) -> (i32, i32) {
        if scale <= 0.0 || !scale.is_finite() {
            return (0, 0);
        }
        (
            (self.width as f32 * scale).round() as i32,
            (self.height as f32 * scale).round() as i32,
        )
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Texture({}x{}, {:?})", self.width, self.height, self.color)
    }
}
