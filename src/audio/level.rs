//! Loudness: RMS computation and the cross-thread level cell.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Root-mean-square of a sample buffer. An empty buffer is silent.
#[allow(clippy::cast_precision_loss)]
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Linear interpolation from `a` towards `b` by `f`.
#[inline]
pub fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a.mul_add(1.0 - f, b * f)
}

/// Single-slot level shared between the audio producer and the UI.
///
/// The value is stored as `f32` bits in an atomic, so reads are never torn.
/// One thread publishes, one thread reads; the reader sees the latest value
/// within one audio buffer period.
#[derive(Clone, Debug, Default)]
pub struct SharedLevel {
    bits: Arc<AtomicU32>,
}

impl SharedLevel {
    /// Create a cell holding silence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new level. Non-finite and negative values are stored as 0.
    #[inline]
    pub fn publish(&self, level: f32) {
        let level = if level.is_finite() { level.max(0.0) } else { 0.0 };
        self.bits.store(level.to_bits(), Ordering::Relaxed);
    }

    /// Latest published level.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Compute the RMS of `samples` and publish it.
    pub fn publish_rms(&self, samples: &[f32]) {
        self.publish(rms(samples));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(rms(&[0.0; 64]), 0.0);
        assert!((rms(&[0.5; 32]) - 0.5).abs() < 1e-6);
        assert!((rms(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-6);
        // sqrt((9 + 16) / 2)
        assert!((rms(&[3.0, 4.0]) - 12.5_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 1.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 1.0, 1.0), 1.0);
        assert!((lerp(0.0, 1.0, 0.2) - 0.2).abs() < 1e-6);
        assert!((lerp(1.0, 0.0, 0.2) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_publish_and_load() {
        let level = SharedLevel::new();
        assert_eq!(level.load(), 0.0);
        level.publish(0.25);
        assert_eq!(level.load(), 0.25);
        level.publish(f32::NAN);
        assert_eq!(level.load(), 0.0);
        level.publish(-1.0);
        assert_eq!(level.load(), 0.0);
    }

    #[test]
    fn test_cross_thread_visibility() {
        let level = SharedLevel::new();
        let writer = level.clone();
        thread::spawn(move || writer.publish_rms(&[0.5; 128]))
            .join()
            .unwrap();
        assert!((level.load() - 0.5).abs() < 1e-6);
    }
}
