//! Session: Everything the immediate-mode UI needs across frames.
//!
//! A [`Session`] owns the layout stack, the drag-ownership state and the
//! shared loudness cell. Each render frame borrows it as a [`Ui`], which
//! also carries the canvas being drawn into and the pointer snapshot for the
//! frame. [`Ui::finish`] closes the frame and checks that every layout frame
//! opened during it was closed again.

use crate::audio::SharedLevel;
use crate::interaction::{DragPolicy, InteractionState, PointerInput, Slider};
use crate::layout::{LayoutError, LayoutFrame, LayoutStack, Margin, Orientation, Rect};
use crate::render::Canvas;

/// Long-lived UI state.
#[derive(Debug, Default)]
pub struct Session {
    layout: LayoutStack,
    interaction: InteractionState,
    level: SharedLevel,
    frames: u64,
}

impl Session {
    /// Create a session with the given drag policy and a silent level.
    pub fn new(policy: DragPolicy) -> Self {
        Self {
            interaction: InteractionState::new(policy),
            ..Self::default()
        }
    }

    /// The level cell audio producers publish into. Clone it for them.
    pub const fn level(&self) -> &SharedLevel {
        &self.level
    }

    /// Drag ownership state.
    pub const fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Mutable drag ownership state.
    pub fn interaction_mut(&mut self) -> &mut InteractionState {
        &mut self.interaction
    }

    /// Issue a new slider.
    pub fn create_slider(&mut self, initial_value: f32) -> Slider {
        self.interaction.create_slider(initial_value)
    }

    /// Number of frames finished so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Start a render frame drawing into `canvas`.
    ///
    /// The loudness is sampled once here so every widget in the frame sees
    /// the same value.
    pub fn frame<'a>(&'a mut self, canvas: &'a mut dyn Canvas, pointer: PointerInput) -> Ui<'a> {
        let base_depth = self.layout.depth();
        let level = self.level.load();
        Ui {
            session: self,
            canvas,
            pointer,
            level,
            base_depth,
        }
    }
}

/// One render frame of the UI.
pub struct Ui<'a> {
    session: &'a mut Session,
    canvas: &'a mut dyn Canvas,
    pointer: PointerInput,
    level: f32,
    base_depth: usize,
}

impl Ui<'_> {
    /// Open a layout frame over `rect`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ZeroCapacity`] if `capacity` is 0.
    pub fn begin_frame(
        &mut self,
        rect: Rect,
        orientation: Orientation,
        margin: Margin,
        gap: i32,
        capacity: usize,
    ) -> Result<(), LayoutError> {
        self.session
            .layout
            .begin_frame(rect, orientation, margin, gap, capacity)
    }

    /// Take the next slot of the innermost open frame.
    ///
    /// # Errors
    ///
    /// Returns an error if no frame is open or the frame has no slots left.
    pub fn next_slot(&mut self) -> Result<Rect, LayoutError> {
        self.session.layout.next_slot()
    }

    /// Close the innermost open frame.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::EmptyStack`] if no frame is open.
    pub fn end_frame(&mut self) -> Result<LayoutFrame, LayoutError> {
        self.session.layout.end_frame()
    }

    /// Number of layout frames currently open.
    pub fn depth(&self) -> usize {
        self.session.layout.depth()
    }

    /// Pointer snapshot for this frame.
    pub const fn pointer(&self) -> &PointerInput {
        &self.pointer
    }

    /// Loudness sampled at the start of this frame.
    pub const fn level(&self) -> f32 {
        self.level
    }

    /// The canvas widgets draw into.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Split borrow used by widgets that both draw and update drag state.
    pub(crate) fn parts(&mut self) -> (&mut dyn Canvas, &mut InteractionState, &PointerInput) {
        (&mut *self.canvas, &mut self.session.interaction, &self.pointer)
    }

    /// Close the render frame.
    ///
    /// Frames left open are discarded so the next render frame starts clean.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Unbalanced`] if the layout depth differs from
    /// the depth the frame started with.
    ///
    /// # Panics
    ///
    /// In debug builds an unbalanced frame also trips a debug assertion.
    pub fn finish(self) -> Result<(), LayoutError> {
        self.session.frames += 1;
        let result = self.session.layout.check_balance(self.base_depth);
        if let Err(err) = result {
            log::error!("{err}");
            self.session.layout.truncate(self.base_depth);
            debug_assert!(false, "unbalanced layout: {err}");
        }
        result
    }

    /// Drop the render frame after a layout error, discarding open frames.
    pub fn abandon(self) {
        self.session.layout.truncate(self.base_depth);
    }
}

impl std::fmt::Debug for Ui<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("depth", &self.session.layout.depth())
            .field("pointer", &self.pointer)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
