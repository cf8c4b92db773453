//! Interaction module: Pointer snapshots and slider drag ownership.
//!
//! ```text
//!            press inside handle, nobody active
//!   ┌──────┐ ─────────────────────────────────▶ ┌──────────────┐
//!   │ Idle │                                    │ Dragging(id) │ ─┐ held: value follows
//!   └──────┘ ◀───────────────────────────────── └──────────────┘ ◀┘ pointer row
//!                     primary released
//! ```

mod pointer;
mod state;

pub use pointer::{ButtonEdge, ButtonState, Buttons, PointerInput, PointerTracker};
pub use state::{value_at, DragOutcome, DragPolicy, InteractionState, Slider, SliderId};
