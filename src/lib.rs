//! # Quavatar
//!
//! A microphone-driven avatar overlay for the terminal.
//!
//! The overlay shows one of two pieces of glyph art on a pure green panel:
//! idle while the microphone is quiet, speaking once the loudness reaches a
//! threshold. Two vertical sliders set the threshold (with a live meter) and
//! the avatar's scale.
//!
//! ## Core Concepts
//!
//! - **Layout stack**: nested frames that hand out equally sized slots
//! - **Drag ownership**: at most one slider owns the pointer at a time
//! - **Immediate mode**: widgets are plain function calls made every frame
//! - **Actor model**: isolated threads for input, rendering and audio
//!
//! ## Example
//!
//! ```rust
//! use quavatar::interaction::PointerInput;
//! use quavatar::layout::{Margin, Orientation, Rect};
//! use quavatar::render::Recorder;
//! use quavatar::Session;
//!
//! let mut session = Session::default();
//! let mut canvas = Recorder::new();
//! let mut ui = session.frame(&mut canvas, PointerInput::default());
//!
//! ui.begin_frame(Rect::new(0, 0, 500, 100), Orientation::Horizontal, Margin::ZERO, 10, 2)?;
//! assert_eq!(ui.next_slot()?, Rect::new(0, 0, 245, 100));
//! assert_eq!(ui.next_slot()?, Rect::new(255, 0, 245, 100));
//! ui.end_frame()?;
//! ui.finish()?;
//! # Ok::<(), quavatar::layout::LayoutError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod audio;
pub mod cli;
mod error;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod session;
pub mod widget;

// Re-exports for convenience
pub use actor::{Engine, EngineConfig, InputEvent};
pub use app::{run, App, Overlay, OverlayConfig};
pub use audio::{AudioError, AudioInput, SharedLevel, SourceKind};
pub use error::{Error, Result};
pub use interaction::{DragPolicy, InteractionState, PointerInput, Slider, SliderId};
pub use layout::{LayoutError, LayoutStack, Margin, Orientation, Rect};
pub use render::{Canvas, CellGrid, Rgb, Texture};
pub use session::{Session, Ui};
