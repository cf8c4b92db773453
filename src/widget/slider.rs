//! Slider Widget: A vertical value control with a triangular drag handle.
//!
//! ```text
//!  ┌───┐
//!  │   │
//!  │   │  ◢
//!  ├───┼─◀█   ← mark row, handle tip on the track's right edge
//!  │███│  ◥
//!  │███│      ← background (e.g. amplitude meter)
//!  └───┘
//! ```
//!
//! The track takes the left part of the slot, the handle fills the rest. The
//! value fills from the bottom: 0 puts the mark below the track, 1 on its top
//! row.

use super::background::SliderBackground;
use crate::interaction::{DragOutcome, Slider};
use crate::layout::{Point, Rect, Triangle};
use crate::render::Rgb;
use crate::session::Ui;

/// Visual parameters of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderStyle {
    /// Fraction of the slot width taken by the track.
    pub track_fraction: f32,
    /// Half the height of the handle's base, in cells.
    pub handle_half_extent: i32,
    /// Color of the handle, mark and track outline.
    pub color: Rgb,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            track_fraction: 0.65,
            handle_half_extent: 2,
            color: Rgb::WHITE,
        }
    }
}

/// Where the parts of a slider land for a given value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderGeometry {
    /// The track rectangle.
    pub track: Rect,
    /// The handle, tip at the mark on the track's right edge.
    pub handle: Triangle,
    /// Absolute row of the mark.
    pub mark_y: i32,
}

impl SliderGeometry {
    /// Lay a slider with `value` out inside `rect`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn new(rect: Rect, value: f32, style: &SliderStyle) -> Self {
        let track_width = ((rect.width as f32) * style.track_fraction) as i32;
        let height = rect.height as f32;
        let mark = (height - height * value) as i32;
        let mark_y = rect.y + mark;

        let tip = Point::new(rect.x + track_width, mark_y);
        let base_x = (rect.right() - 1).max(tip.x);
        let handle = Triangle::new(
            Point::new(base_x, mark_y - style.handle_half_extent),
            tip,
            Point::new(base_x, mark_y + style.handle_half_extent),
        );

        Self {
            track: Rect::new(rect.x, rect.y, track_width, rect.height),
            handle,
            mark_y,
        }
    }
}

/// Result of drawing a slider for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderResponse {
    /// Track rectangle as drawn.
    pub track: Rect,
    /// Handle as drawn.
    pub handle: Triangle,
    /// Absolute row of the mark as drawn.
    pub mark_y: i32,
    /// The value changed this frame.
    pub changed: bool,
    /// The slider owns the pointer after this frame.
    pub dragging: bool,
}

/// Run and draw one slider inside `rect`.
///
/// Hit-testing uses the handle where it was at the start of the frame; the
/// drawing reflects the value after this frame's drag update.
pub fn slider_widget(
    ui: &mut Ui<'_>,
    rect: Rect,
    slider: &mut Slider,
    background: &mut SliderBackground,
    style: &SliderStyle,
) -> SliderResponse {
    let level = ui.level();
    let (canvas, interaction, pointer) = ui.parts();

    let before = SliderGeometry::new(rect, slider.value(), style);
    let over_handle = before.handle.contains(pointer.position);
    let DragOutcome {
        changed, dragging, ..
    } = interaction.update(slider, over_handle, pointer, before.track);

    let geometry = if changed {
        SliderGeometry::new(rect, slider.value(), style)
    } else {
        before
    };
    let track = geometry.track;

    background.draw(canvas, track, level);
    canvas.fill_triangle(geometry.handle, style.color);
    canvas.draw_line(
        Point::new(track.x, geometry.mark_y),
        Point::new(track.right(), geometry.mark_y),
        style.color,
    );
    canvas.stroke_rect(track, style.color);

    SliderResponse {
        track,
        handle: geometry.handle,
        mark_y: geometry.mark_y,
        changed,
        dragging,
    }
}
