//! Pointer input: Per-frame snapshots built from a stream of mouse events.
//!
//! Widgets see the pointer once per render frame as a [`PointerInput`]. The
//! [`PointerTracker`] folds the mouse events that arrived since the previous
//! frame into that snapshot. A press and release that land in the same frame
//! are split: the press is reported first and the release is held back for the
//! following frame, so edge-triggered claims can never be missed. A press that
//! follows such a held-back release is reported one frame after it.

use crate::actor::{MouseButton, MouseEvent};
use crate::layout::Point;
use bitflags::bitflags;

bitflags! {
    /// Set of mouse buttons currently held.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
    pub struct Buttons: u8 {
        /// Left / primary button.
        const PRIMARY = 0b0000_0001;
        /// Right / secondary button.
        const SECONDARY = 0b0000_0010;
        /// Middle button.
        const MIDDLE = 0b0000_0100;
    }
}

impl From<MouseButton> for Buttons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::PRIMARY,
            MouseButton::Right => Self::SECONDARY,
            MouseButton::Middle => Self::MIDDLE,
        }
    }
}

/// Level state of the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Not held.
    #[default]
    Up,
    /// Held.
    Down,
}

/// Transition of the primary button during the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonEdge {
    /// No transition.
    #[default]
    None,
    /// Went from up to down.
    Pressed,
    /// Went from down to up.
    Released,
}

/// Pointer state for one render frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerInput {
    /// Pointer position in cells.
    pub position: Point,
    /// Primary button level.
    pub primary: ButtonState,
    /// Primary button transition this frame.
    pub edge: ButtonEdge,
}

impl PointerInput {
    /// A pointer resting at `position` with the button up.
    pub const fn idle(position: Point) -> Self {
        Self {
            position,
            primary: ButtonState::Up,
            edge: ButtonEdge::None,
        }
    }

    /// The primary button went down this frame at `position`.
    pub const fn pressed(position: Point) -> Self {
        Self {
            position,
            primary: ButtonState::Down,
            edge: ButtonEdge::Pressed,
        }
    }

    /// The primary button is held at `position`.
    pub const fn held(position: Point) -> Self {
        Self {
            position,
            primary: ButtonState::Down,
            edge: ButtonEdge::None,
        }
    }

    /// The primary button was released this frame at `position`.
    pub const fn released(position: Point) -> Self {
        Self {
            position,
            primary: ButtonState::Up,
            edge: ButtonEdge::Released,
        }
    }

    /// Check if the primary button went down this frame.
    #[inline]
    pub fn just_pressed(&self) -> bool {
        self.edge == ButtonEdge::Pressed
    }

    /// Check if the primary button is up or went up this frame.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.edge == ButtonEdge::Released || self.primary == ButtonState::Up
    }
}

/// Accumulates mouse events between render frames.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Point,
    held: Buttons,
    pressed: bool,
    released: bool,
    deferred_release: Option<Point>,
    deferred_press: Option<Point>,
}

impl PointerTracker {
    /// Create a tracker with the pointer at the origin and no buttons held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buttons currently held.
    pub const fn held(&self) -> Buttons {
        self.held
    }

    /// Feed a button press.
    pub fn press(&mut self, event: &MouseEvent) {
        let at = Point::from((event.x, event.y));
        let Some(button) = event.button else {
            self.moved(event);
            return;
        };
        let button = Buttons::from(button);
        if button == Buttons::PRIMARY
            && (self.deferred_release.is_some() || self.deferred_press.is_some())
        {
            // Down again before the release was reported.
            self.deferred_press = Some(at);
            return;
        }
        self.position = at;
        if button == Buttons::PRIMARY && !self.held.contains(Buttons::PRIMARY) {
            self.pressed = true;
        }
        self.held.insert(button);
    }

    /// Feed a button release.
    pub fn release(&mut self, event: &MouseEvent) {
        let at = Point::from((event.x, event.y));
        let Some(button) = event.button else {
            self.position = at;
            return;
        };
        let button = Buttons::from(button);
        if button == Buttons::PRIMARY && self.deferred_press.take().is_some() {
            // The re-press never reached a frame; the net state is up.
            match &mut self.deferred_release {
                Some(release) => *release = at,
                None => self.position = at,
            }
            return;
        }
        if button == Buttons::PRIMARY && self.held.contains(Buttons::PRIMARY) {
            if self.pressed {
                // Press not yet observed by a frame: report it first.
                self.deferred_release = Some(at);
                return;
            }
            self.released = true;
        }
        self.position = at;
        self.held.remove(button);
    }

    /// Feed a pointer motion.
    pub fn moved(&mut self, event: &MouseEvent) {
        let at = Point::from((event.x, event.y));
        if let Some(press) = &mut self.deferred_press {
            *press = at;
        } else if let Some(release) = &mut self.deferred_release {
            *release = at;
        } else {
            self.position = at;
        }
    }

    /// Forget held buttons, e.g. when the terminal loses focus.
    pub fn cancel(&mut self) {
        if self.held.contains(Buttons::PRIMARY) {
            self.released = true;
        }
        self.held = Buttons::empty();
        self.pressed = false;
        self.deferred_release = None;
        self.deferred_press = None;
    }

    /// Produce the snapshot for this frame and start accumulating the next.
    pub fn snapshot(&mut self) -> PointerInput {
        let primary = if self.held.contains(Buttons::PRIMARY) {
            ButtonState::Down
        } else {
            ButtonState::Up
        };
        let edge = if self.pressed {
            ButtonEdge::Pressed
        } else if self.released {
            ButtonEdge::Released
        } else {
            ButtonEdge::None
        };
        let input = PointerInput {
            position: self.position,
            primary,
            edge,
        };

        self.pressed = false;
        self.released = false;
        if let Some(at) = self.deferred_release.take() {
            self.position = at;
            self.held.remove(Buttons::PRIMARY);
            self.released = true;
        } else if let Some(at) = self.deferred_press.take() {
            self.position = at;
            self.held.insert(Buttons::PRIMARY);
            self.pressed = true;
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyModifiers;

    fn mouse(x: u16, y: u16, button: Option<MouseButton>) -> MouseEvent {
        MouseEvent {
            x,
            y,
            button,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quiet_frame() {
        let mut tracker = PointerTracker::new();
        tracker.moved(&mouse(3, 4, None));
        let input = tracker.snapshot();
        assert_eq!(input, PointerInput::idle(Point::new(3, 4)));
    }

    #[test]
    fn test_press_hold_release() {
        let mut tracker = PointerTracker::new();
        tracker.press(&mouse(5, 5, Some(MouseButton::Left)));
        assert_eq!(tracker.snapshot(), PointerInput::pressed(Point::new(5, 5)));

        tracker.moved(&mouse(5, 9, Some(MouseButton::Left)));
        assert_eq!(tracker.snapshot(), PointerInput::held(Point::new(5, 9)));

        tracker.release(&mouse(6, 9, Some(MouseButton::Left)));
        assert_eq!(tracker.snapshot(), PointerInput::released(Point::new(6, 9)));

        assert_eq!(tracker.snapshot(), PointerInput::idle(Point::new(6, 9)));
    }

    #[test]
    fn test_click_within_one_frame_is_split() {
        let mut tracker = PointerTracker::new();
        tracker.press(&mouse(2, 2, Some(MouseButton::Left)));
        tracker.release(&mouse(2, 3, Some(MouseButton::Left)));

        let first = tracker.snapshot();
        assert_eq!(first, PointerInput::pressed(Point::new(2, 2)));
        let second = tracker.snapshot();
        assert_eq!(second, PointerInput::released(Point::new(2, 3)));
        assert!(tracker.held().is_empty());
    }

    #[test]
    fn test_press_after_split_click_is_kept() {
        let mut tracker = PointerTracker::new();
        tracker.press(&mouse(2, 2, Some(MouseButton::Left)));
        tracker.release(&mouse(2, 2, Some(MouseButton::Left)));
        tracker.press(&mouse(2, 3, Some(MouseButton::Left)));
        tracker.moved(&mouse(2, 6, Some(MouseButton::Left)));

        assert_eq!(tracker.snapshot(), PointerInput::pressed(Point::new(2, 2)));
        assert_eq!(tracker.snapshot(), PointerInput::released(Point::new(2, 2)));
        assert_eq!(tracker.snapshot(), PointerInput::pressed(Point::new(2, 6)));
        assert!(tracker.held().contains(Buttons::PRIMARY));

        tracker.moved(&mouse(2, 8, Some(MouseButton::Left)));
        assert_eq!(tracker.snapshot(), PointerInput::held(Point::new(2, 8)));

        // The real release still arrives.
        tracker.release(&mouse(2, 8, Some(MouseButton::Left)));
        assert_eq!(tracker.snapshot(), PointerInput::released(Point::new(2, 8)));
        assert!(tracker.held().is_empty());
    }

    #[test]
    fn test_double_click_within_one_frame_ends_up() {
        let mut tracker = PointerTracker::new();
        tracker.press(&mouse(4, 4, Some(MouseButton::Left)));
        tracker.release(&mouse(4, 4, Some(MouseButton::Left)));
        tracker.press(&mouse(4, 4, Some(MouseButton::Left)));
        tracker.release(&mouse(4, 5, Some(MouseButton::Left)));

        assert_eq!(tracker.snapshot(), PointerInput::pressed(Point::new(4, 4)));
        assert_eq!(tracker.snapshot(), PointerInput::released(Point::new(4, 5)));
        assert_eq!(tracker.snapshot(), PointerInput::idle(Point::new(4, 5)));
        assert!(tracker.held().is_empty());
    }

    #[test]
    fn test_secondary_button_ignored_for_edges() {
        let mut tracker = PointerTracker::new();
        tracker.press(&mouse(1, 1, Some(MouseButton::Right)));
        let input = tracker.snapshot();
        assert_eq!(input.edge, ButtonEdge::None);
        assert_eq!(input.primary, ButtonState::Up);
        assert!(tracker.held().contains(Buttons::SECONDARY));
    }

    #[test]
    fn test_cancel_reports_release() {
        let mut tracker = PointerTracker::new();
        tracker.press(&mouse(1, 1, Some(MouseButton::Left)));
        tracker.snapshot();
        tracker.cancel();
        let input = tracker.snapshot();
        assert_eq!(input.edge, ButtonEdge::Released);
        assert!(input.is_released());
    }
}
