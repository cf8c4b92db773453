//! Widgets: Immediate-mode functions drawing into the current [`Ui`].
//!
//! Widgets keep no state of their own between frames beyond what the caller
//! passes in (a [`Slider`], a [`SliderBackground`]). Each call takes the
//! rectangle to occupy, reacts to this frame's pointer snapshot and issues its
//! draw calls immediately.
//!
//! [`Ui`]: crate::session::Ui
//! [`Slider`]: crate::interaction::Slider

mod avatar;
mod background;
mod slider;

pub use avatar::{avatar_widget, AvatarStyle, AvatarTextures, AvatarVariant};
pub use background::{LevelMeter, SliderBackground};
pub use slider::{slider_widget, SliderGeometry, SliderResponse, SliderStyle};
