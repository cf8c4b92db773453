//! Drag ownership: which slider, if any, owns the pointer.
//!
//! Exactly one [`InteractionState`] exists per session. It issues slider ids
//! and holds the id of the slider currently being dragged. A slider can only
//! claim ownership on the frame the primary button goes down inside its
//! handle, and only while nobody else owns the pointer.

use super::pointer::PointerInput;
use crate::layout::Rect;
use std::num::NonZeroU32;

/// Identity of a slider, unique for the life of its [`InteractionState`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SliderId(NonZeroU32);

impl SliderId {
    /// Raw id value (never zero).
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl std::fmt::Display for SliderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slider#{}", self.0)
    }
}

/// A draggable value in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    id: SliderId,
    value: f32,
}

impl Slider {
    /// This slider's identity.
    #[inline]
    pub const fn id(&self) -> SliderId {
        self.id
    }

    /// Current value.
    #[inline]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, clamped to `[0, 1]`. NaN becomes 0.
    pub fn set_value(&mut self, value: f32) {
        self.value = clamp_unit(value);
    }
}

/// How an owned drag continues after the claiming press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPolicy {
    /// Claim on press; the value follows the pointer anywhere until release.
    #[default]
    Latched,
    /// Claim on press; the value only follows while the pointer stays inside
    /// the handle. Outside it the drag pauses until the pointer returns or the
    /// button is released.
    Hover,
}

/// What happened to a slider during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragOutcome {
    /// The slider claimed ownership this frame.
    pub claimed: bool,
    /// The slider gave up ownership this frame.
    pub released: bool,
    /// The value changed this frame.
    pub changed: bool,
    /// The slider owns the pointer after this frame.
    pub dragging: bool,
}

/// Process-wide slider bookkeeping.
#[derive(Debug, Clone)]
pub struct InteractionState {
    next_id: NonZeroU32,
    active: Option<SliderId>,
    policy: DragPolicy,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(DragPolicy::default())
    }
}

impl InteractionState {
    /// Create the state with no sliders and nothing active.
    pub const fn new(policy: DragPolicy) -> Self {
        Self {
            next_id: NonZeroU32::MIN,
            active: None,
            policy,
        }
    }

    /// Issue a new slider. Ids start at 1 and strictly increase.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX - 1` sliders are created.
    pub fn create_slider(&mut self, initial_value: f32) -> Slider {
        let id = SliderId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("slider id space exhausted");
        Slider {
            id,
            value: clamp_unit(initial_value),
        }
    }

    /// The slider that currently owns the pointer, if any.
    #[inline]
    pub const fn active(&self) -> Option<SliderId> {
        self.active
    }

    /// Check if `id` currently owns the pointer.
    #[inline]
    pub fn is_active(&self, id: SliderId) -> bool {
        self.active == Some(id)
    }

    /// The drag continuation policy.
    #[inline]
    pub const fn policy(&self) -> DragPolicy {
        self.policy
    }

    /// Drop ownership unconditionally.
    pub fn release(&mut self) {
        if let Some(id) = self.active.take() {
            log::debug!("{id} released (forced)");
        }
    }

    /// Run one frame of the drag state machine for `slider`.
    ///
    /// `over_handle` says whether the pointer is inside the slider's handle
    /// this frame; `track` is the rectangle the value is measured against.
    pub fn update(
        &mut self,
        slider: &mut Slider,
        over_handle: bool,
        pointer: &PointerInput,
        track: Rect,
    ) -> DragOutcome {
        let mut outcome = DragOutcome::default();

        if self.active.is_none() && over_handle && pointer.just_pressed() {
            self.active = Some(slider.id);
            outcome.claimed = true;
            log::debug!("{} claimed at {:?}", slider.id, pointer.position);
        }

        if self.active == Some(slider.id) {
            if pointer.is_released() {
                self.active = None;
                outcome.released = true;
                log::debug!("{} released at value {:.3}", slider.id, slider.value);
            } else if self.policy == DragPolicy::Latched || over_handle {
                if let Some(value) = value_at(track, pointer.position.y) {
                    outcome.changed = value != slider.value;
                    slider.value = value;
                }
            }
        }

        outcome.dragging = self.active == Some(slider.id);
        outcome
    }
}

/// Map a pointer row onto a track, filling from the bottom edge.
///
/// The top edge maps to 1, the bottom edge to 0; positions outside the track
/// clamp. Returns `None` for a track with no height.
#[allow(clippy::cast_precision_loss)]
pub fn value_at(track: Rect, y: i32) -> Option<f32> {
    if track.height <= 0 {
        return None;
    }
    let from_bottom = track.height - (y - track.y);
    Some(clamp_unit(from_bottom as f32 / track.height as f32))
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
