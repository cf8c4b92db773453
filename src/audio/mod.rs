//! Audio module: Loudness producers for the avatar.
//!
//! Producers run on their own thread (or the audio host's callback thread)
//! and publish one RMS value per buffer into a [`SharedLevel`]. The UI reads
//! that value once per frame.
//!
//! - [`PcmSource`]: raw `f32` samples from a pipe
//! - `MicCapture`: a microphone through cpal (feature `capture`)

#[cfg(feature = "capture")]
mod capture;
mod level;
mod source;

#[cfg(feature = "capture")]
pub use capture::MicCapture;
pub use level::{lerp, rms, SharedLevel};
pub use source::{decode_f32_le, PcmSource};

use std::io::IsTerminal;
use thiserror::Error;

/// Failure to start an audio producer.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The host has no default input device.
    #[error("no default input device")]
    NoInputDevice,
    /// No input device with the requested name.
    #[error("input device not found: {0}")]
    DeviceNotFound(String),
    /// The device configuration could not be queried.
    #[error("failed to query input config: {0}")]
    Config(String),
    /// The device delivers a sample format we do not decode.
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),
    /// The input stream could not be built.
    #[error("failed to initialize audio capture device: {0}")]
    Build(String),
    /// The input stream could not be started.
    #[error("failed to start audio device: {0}")]
    Start(String),
    /// Stdin was chosen as the source but is the terminal itself.
    #[error("stdin is a terminal; pipe raw f32 samples in or use `--source mic`")]
    StdinIsTerminal,
    /// Microphone capture was requested but not compiled in.
    #[error("microphone capture is not available; rebuild with `--features capture`")]
    CaptureDisabled,
    /// The reader thread could not be spawned.
    #[error("failed to spawn audio thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Where loudness comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Raw mono `f32` little-endian samples on stdin.
    #[default]
    Stdin,
    /// The default (or named) microphone.
    Mic,
}

/// A running producer. Dropping it stops publishing.
pub enum AudioInput {
    /// Reader thread over a PCM stream.
    Pcm(PcmSource),
    /// Microphone stream.
    #[cfg(feature = "capture")]
    Mic(MicCapture),
}

impl AudioInput {
    /// Start the producer selected by `kind`, publishing into `level`.
    pub fn start(
        kind: SourceKind,
        level: SharedLevel,
        block_size: usize,
        device: Option<&str>,
    ) -> Result<Self, AudioError> {
        match kind {
            SourceKind::Stdin => {
                let _ = device;
                let stdin = std::io::stdin();
                if stdin.is_terminal() {
                    return Err(AudioError::StdinIsTerminal);
                }
                Ok(Self::Pcm(PcmSource::spawn(stdin, level, block_size)?))
            }
            #[cfg(feature = "capture")]
            SourceKind::Mic => Ok(Self::Mic(MicCapture::start(level, device)?)),
            #[cfg(not(feature = "capture"))]
            SourceKind::Mic => {
                let _ = (level, device);
                Err(AudioError::CaptureDisabled)
            }
        }
    }

    /// Check if the producer can still deliver levels.
    pub fn is_live(&self) -> bool {
        match self {
            Self::Pcm(source) => source.is_running(),
            #[cfg(feature = "capture")]
            Self::Mic(_) => true,
        }
    }
}

impl std::fmt::Debug for AudioInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pcm(_) => f.write_str("AudioInput::Pcm"),
            #[cfg(feature = "capture")]
            Self::Mic(mic) => write!(f, "AudioInput::Mic({:?})", mic.device_name()),
        }
    }
}
