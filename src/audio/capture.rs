//! Microphone capture through cpal.
//!
//! The input callback runs on the audio host's own thread; it computes the
//! RMS of every buffer it receives and publishes it into the shared level.

use super::level::{rms, SharedLevel};
use super::AudioError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};

/// Preferred capture rate, used when the device supports it.
pub const SAMPLE_RATE: u32 = 44_100;

/// A running microphone stream. Capture stops when this is dropped.
pub struct MicCapture {
    _stream: Stream,
    device_name: String,
}

impl MicCapture {
    /// Open `device_name` (or the default input device) and start capturing.
    pub fn start(level: SharedLevel, device_name: Option<&str>) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = match device_name {
            Some(name) => find_input_device(&host, name)
                .ok_or_else(|| AudioError::DeviceNotFound(name.to_string()))?,
            None => host.default_input_device().ok_or(AudioError::NoInputDevice)?,
        };
        let device_name = device.name().unwrap_or_default();

        let supported = device
            .default_input_config()
            .map_err(|e| AudioError::Config(e.to_string()))?;
        let sample_format = supported.sample_format();
        let mut config: StreamConfig = supported.into();
        if supports_rate(&device, SAMPLE_RATE) {
            config.sample_rate = cpal::SampleRate(SAMPLE_RATE);
        }

        let on_error = |err: cpal::StreamError| log::warn!("audio input error: {err}");
        let stream = match sample_format {
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| level.publish(rms(data)),
                on_error,
                None,
            ),
            SampleFormat::I16 => {
                let mut scratch = Vec::new();
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        scratch.clear();
                        scratch.extend(data.iter().map(|&s| f32::from(s) / f32::from(i16::MAX)));
                        level.publish(rms(&scratch));
                    },
                    on_error,
                    None,
                )
            }
            other => return Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
        }
        .map_err(|e| AudioError::Build(e.to_string()))?;

        stream.play().map_err(|e| AudioError::Start(e.to_string()))?;
        log::info!(
            "capturing from {device_name:?} at {} Hz, {} channel(s)",
            config.sample_rate.0,
            config.channels
        );

        Ok(Self {
            _stream: stream,
            device_name,
        })
    }

    /// Name of the device being captured.
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

fn find_input_device(host: &cpal::Host, name: &str) -> Option<Device> {
    host.input_devices()
        .ok()?
        .find(|device| device.name().is_ok_and(|n| n == name))
}

fn supports_rate(device: &Device, rate: u32) -> bool {
    device.supported_input_configs().is_ok_and(|mut configs| {
        configs.any(|c| c.min_sample_rate().0 <= rate && rate <= c.max_sample_rate().0)
    })
}
