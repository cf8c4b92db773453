//! Crate-wide error type.

use crate::audio::AudioError;
use crate::layout::LayoutError;
use crate::render::TextureError;
use thiserror::Error;

/// Any failure surfaced by the overlay.
#[derive(Debug, Error)]
pub enum Error {
    /// Layout stack misuse.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
    /// Avatar art could not be loaded.
    #[error(transparent)]
    Texture(#[from] TextureError),
    /// Audio source could not be started.
    #[error("audio error: {0}")]
    Audio(#[from] AudioError),
    /// Terminal or thread I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let err: Error = LayoutError::EmptyStack.into();
        assert!(matches!(err, Error::Layout(LayoutError::EmptyStack)));
        assert_eq!(err.to_string(), "layout error: layout stack is empty");

        let err: Error = AudioError::NoInputDevice.into();
        assert_eq!(err.to_string(), "audio error: no default input device");

        let err: Error = TextureError::Empty.into();
        assert_eq!(err.to_string(), "texture has no visible glyphs");
    }
}
