//! Actor Model: Message-passing concurrency for the terminal overlay.
//!
//! This module implements a simple actor system using crossbeam channels:
//! - **Input Actor**: Polls terminal events, forwards to main loop
//! - **Render Actor**: Receives finished frames, diffs and flushes
//! - **Main Loop**: Runs the UI once per frame
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │  Main Loop   │
//!                                      │              │
//! ┌──────────────┐    RenderCommand    │              │
//! │Render Thread │ ◀────────────────── │              │
//! └──────────────┘                     └──────────────┘
//!                                             ▲
//!                                             │ SharedLevel
//!                                      ┌──────────────┐
//!                                      │ Audio Thread │
//!                                      └──────────────┘
//! ```

mod engine;
mod input;
mod messages;
mod renderer;

pub use engine::{Engine, EngineConfig};
pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent, RenderCommand};
pub use renderer::{RenderStats, RendererActor};
