//! Avatar Widget: Idle or speaking art on a chroma-key backdrop.

use crate::layout::{Point, Rect};
use crate::render::{Rgb, Texture, TextureError, IDLE_ART, SPEAKING_ART};
use crate::session::Ui;
use std::path::Path;

/// Which art the avatar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarVariant {
    /// Below the threshold.
    Idle,
    /// At or above the threshold.
    Speaking,
}

impl AvatarVariant {
    /// Pick the variant for a loudness level.
    #[inline]
    pub fn select(level: f32, threshold: f32) -> Self {
        if level >= threshold {
            Self::Speaking
        } else {
            Self::Idle
        }
    }
}

/// The two pieces of avatar art.
#[derive(Debug, Clone)]
pub struct AvatarTextures {
    /// Shown while quiet.
    pub idle: Texture,
    /// Shown while loud.
    pub speaking: Texture,
}

impl AvatarTextures {
    /// The built-in art.
    ///
    /// # Errors
    ///
    /// Never fails for the bundled art; the result type matches [`Self::load`].
    pub fn builtin(color: Rgb) -> Result<Self, TextureError> {
        Ok(Self {
            idle: Texture::from_art(IDLE_ART, color)?,
            speaking: Texture::from_art(SPEAKING_ART, color)?,
        })
    }

    /// Load art from files, using the built-in art for any path not given.
    ///
    /// # Errors
    ///
    /// Returns an error if a given file cannot be read or is not valid art.
    pub fn load(
        idle: Option<&Path>,
        speaking: Option<&Path>,
        color: Rgb,
    ) -> Result<Self, TextureError> {
        let idle = match idle {
            Some(path) => Texture::load(path, color)?,
            None => Texture::from_art(IDLE_ART, color)?,
        };
        let speaking = match speaking {
            Some(path) => Texture::load(path, color)?,
            None => Texture::from_art(SPEAKING_ART, color)?,
        };
        Ok(Self { idle, speaking })
    }

    /// The texture for `variant`.
    pub const fn get(&self, variant: AvatarVariant) -> &Texture {
        match variant {
            AvatarVariant::Idle => &self.idle,
            AvatarVariant::Speaking => &self.speaking,
        }
    }
}

/// Visual parameters of the avatar panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarStyle {
    /// Scale applied when the scale control is at 1.
    pub max_scale: f32,
    /// Panel fill behind the art.
    pub backdrop: Rgb,
}

impl Default for AvatarStyle {
    fn default() -> Self {
        Self {
            max_scale: 2.0,
            backdrop: Rgb::PURE_GREEN,
        }
    }
}

/// Draw the avatar into `rect`.
///
/// `threshold` and `scale_value` are the values of the two sliders; the
/// loudness comes from the frame.
#[allow(clippy::cast_possible_truncation)]
pub fn avatar_widget(
    ui: &mut Ui<'_>,
    rect: Rect,
    textures: &AvatarTextures,
    threshold: f32,
    scale_value: f32,
    style: &AvatarStyle,
) -> AvatarVariant {
    let variant = AvatarVariant::select(ui.level(), threshold);
    let texture = textures.get(variant);
    let scale = scale_value * style.max_scale;
    let (width, height) = texture.scaled_size(scale);
    let origin = Point::new(
        rect.x + (rect.width - width) / 2,
        rect.y + (rect.height - height) / 2,
    );

    let canvas = ui.canvas();
    canvas.fill_rect(rect, style.backdrop);
    canvas.draw_texture(texture, origin, scale);
    variant
}
