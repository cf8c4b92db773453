//! Layout module: Immediate-mode rectangle partitioning.
//!
//! Layouts are rebuilt from scratch every render frame. There is no retained
//! tree: the application pushes frames that divide a rectangle into equal
//! slots, widgets pull slots in call order, and the frames are popped again.

mod rect;
mod stack;

pub use rect::{Margin, Orientation, Point, Rect, Triangle};
pub use stack::{LayoutError, LayoutFrame, LayoutStack};
