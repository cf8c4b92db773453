//! Diffing Engine: Generate minimal ANSI sequences from grid changes.
//!
//! 1. Compare the current and next grids
//! 2. Emit escape sequences only for changed cells
//! 3. Skip cursor moves when writing adjacent cells
//! 4. Track color state to avoid redundant SGR sequences
//!
//! All output is accumulated in a single buffer and flushed with one syscall.

use super::{Cell, CellGrid, Rgb};
use std::io::Write;

/// State tracker for the diffing algorithm.
///
/// Tracks the terminal's cursor position and colors so that redundant
/// escape sequences can be skipped.
#[derive(Debug, Clone)]
pub struct DiffState {
    cursor_x: u16,
    cursor_y: u16,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            fg: None,
            bg: None,
        }
    }

    /// Reset the state (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.fg = None;
        self.bg = None;
        // Force cursor move on next write
        self.cursor_x = u16::MAX;
        self.cursor_y = u16::MAX;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Render the difference between two grids into an ANSI sequence buffer.
///
/// Both grids must have the same dimensions.
pub fn render_diff(
    current: &CellGrid,
    next: &CellGrid,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    let width = current.width() as usize;

    for (idx, (current_cell, next_cell)) in current.cells().iter().zip(next.cells()).enumerate() {
        if current_cell == next_cell {
            continue;
        }

        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);
        result.cells_changed += 1;

        if state.cursor_y != y || state.cursor_x != x {
            emit_cursor_move(output, x, y);
            state.cursor_x = x;
            state.cursor_y = y;
            result.cursor_moves += 1;
        }

        result.color_changes += emit_colors(output, next_cell, state);
        emit_glyph(output, next_cell);
        state.cursor_x = state.cursor_x.saturating_add(1);
    }

    result
}

/// Generate a full redraw sequence (no diffing).
///
/// This is used for the first frame, after a resize, or whenever the
/// terminal state is unknown.
pub fn render_full(grid: &CellGrid, output: &mut Vec<u8>) {
    output.extend_from_slice(b"\x1b[?25l\x1b[H");

    let mut state = DiffState::new();
    for (y, row) in grid.rows().enumerate() {
        if y > 0 {
            output.extend_from_slice(b"\r\n");
        }
        for cell in row {
            emit_colors(output, cell, &mut state);
            emit_glyph(output, cell);
        }
    }

    output.extend_from_slice(b"\x1b[0m");
}

/// Emit the SGR sequences needed to switch to `cell`'s colors.
///
/// Returns the number of sequences written.
fn emit_colors(output: &mut Vec<u8>, cell: &Cell, state: &mut DiffState) -> usize {
    let mut changes = 0;
    if state.fg != Some(cell.fg()) {
        emit_fg_color(output, cell.fg());
        state.fg = Some(cell.fg());
        changes += 1;
    }
    if state.bg != Some(cell.bg()) {
        emit_bg_color(output, cell.bg());
        state.bg = Some(cell.bg());
        changes += 1;
    }
    changes
}

/// Emit a cursor move sequence.
///
/// Uses the most compact representation:
/// - `\x1b[H` for home (1,1)
/// - `\x1b[{row}H` for column 1
/// - `\x1b[{row};{col}H` otherwise
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    // ANSI uses 1-indexed positions
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

/// Emit a foreground color sequence (true color).
#[inline]
fn emit_fg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

/// Emit a background color sequence (true color).
#[inline]
fn emit_bg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

#[inline]
fn emit_glyph(output: &mut Vec<u8>, cell: &Cell) {
    let mut bytes = [0u8; 4];
    output.extend_from_slice(cell.glyph().encode_utf8(&mut bytes).as_bytes());
}
