//! PCM Source: Dedicated thread turning a raw sample stream into levels.
//!
//! Reads mono `f32` little-endian samples from any reader (typically stdin
//! fed by `arecord -f FLOAT_LE -t raw` or `parec --format=float32le`), one
//! block at a time, and publishes the RMS of each block.
//!
//! A blocking read cannot be interrupted. Dropping a [`PcmSource`] joins the
//! thread once it has finished; a reader still waiting on its stream is
//! detached and stops at its next block or when the process exits.

use super::level::SharedLevel;
use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Handle to a running PCM reader thread.
pub struct PcmSource {
    handle: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
}

impl PcmSource {
    /// Spawn the reader thread.
    ///
    /// # Arguments
    ///
    /// * `reader` - Source of raw `f32` little-endian samples.
    /// * `level` - Cell the block RMS is published into.
    /// * `block_size` - Samples per published block (at least 1).
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn<R>(reader: R, level: SharedLevel, block_size: usize) -> std::io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let running = Arc::new(AtomicBool::new(true));
        let shutdown_clone = shutdown.clone();
        let running_clone = running.clone();
        let block_size = block_size.max(1);

        let handle = thread::Builder::new()
            .name("quavatar-audio".to_string())
            .spawn(move || {
                Self::run_loop(reader, &level, block_size, &shutdown_clone);
                running_clone.store(false, Ordering::Relaxed);
            })?;

        log::info!("PCM source started ({block_size} samples per block)");
        Ok(Self {
            handle: Some(handle),
            shutdown,
            running,
        })
    }

    /// Check if the reader is still producing levels.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Ask the reader to stop after the block it is waiting on.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop and wait for the reader thread to finish.
    ///
    /// Blocks until the underlying reader yields its next block or EOF.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop<R: Read>(mut reader: R, level: &SharedLevel, block_size: usize, shutdown: &AtomicBool) {
        let mut bytes = vec![0u8; block_size * 4];
        let mut samples = vec![0f32; block_size];

        while !shutdown.load(Ordering::Relaxed) {
            match read_block(&mut reader, &mut bytes) {
                Ok(0) => {
                    log::info!("PCM source reached end of stream");
                    break;
                }
                Ok(filled) => {
                    let count = filled / 4;
                    decode_f32_le(&bytes[..count * 4], &mut samples[..count]);
                    level.publish_rms(&samples[..count]);
                }
                Err(e) => {
                    log::warn!("PCM source read failed: {e}");
                    break;
                }
            }
        }
        level.publish(0.0);
    }
}

impl Drop for PcmSource {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                log::debug!("PCM reader still blocked on its stream, detaching");
            }
        }
    }
}

/// Fill `buf` as far as the stream allows; returns the bytes read.
///
/// Only a short count at end of stream is returned partially filled.
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Decode little-endian `f32` samples.
pub fn decode_f32_le(bytes: &[u8], out: &mut [f32]) {
    for (chunk, sample) in bytes.chunks_exact(4).zip(out.iter_mut()) {
        *sample = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(samples: &[f32]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode() {
        let bytes = encode(&[0.5, -0.25, 1.0]);
        let mut out = [0.0; 3];
        decode_f32_le(&bytes, &mut out);
        assert_eq!(out, [0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_read_block_short_at_eof() {
        let mut reader = Cursor::new(vec![1u8, 2, 3, 4, 5, 6]);
        let mut buf = [0u8; 4];
        assert_eq!(read_block(&mut reader, &mut buf).unwrap(), 4);
        assert_eq!(read_block(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(read_block(&mut reader, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_stream_publishes_then_goes_silent() {
        let level = SharedLevel::new();
        let observed = SharedLevel::new();

        // Tee the published levels through a reader wrapper.
        struct Tee {
            inner: Cursor<Vec<u8>>,
            level: SharedLevel,
            observed: SharedLevel,
        }
        impl Read for Tee {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                self.observed.publish(self.observed.load().max(self.level.load()));
                self.inner.read(buf)
            }
        }

        let mut samples = vec![0.5f32; 8];
        samples.extend_from_slice(&[0.0; 8]);
        let tee = Tee {
            inner: Cursor::new(encode(&samples)),
            level: level.clone(),
            observed: observed.clone(),
        };

        let source = PcmSource::spawn(tee, level.clone(), 8).unwrap();
        while source.is_running() {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        source.join();

        assert!((observed.load() - 0.5).abs() < 1e-6);
        assert_eq!(level.load(), 0.0);
    }

    /// Reader that blocks until bytes arrive on a channel.
    struct Blocking(crossbeam_channel::Receiver<Vec<u8>>);

    impl Read for Blocking {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.recv() {
                Ok(bytes) => {
                    let n = bytes.len().min(buf.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    Ok(n)
                }
                Err(_) => Ok(0),
            }
        }
    }

    #[test]
    fn test_drop_does_not_wait_on_blocked_reader() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let level = SharedLevel::new();
        let source = PcmSource::spawn(Blocking(rx), level.clone(), 4).unwrap();
        assert!(source.is_running());

        // Returns while the reader is parked in `recv`.
        drop(source);

        // The next block wakes the detached thread, which then sees the
        // shutdown flag and drops its end of the channel.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while tx.send(encode(&[0.5; 4])).is_ok() {
            assert!(std::time::Instant::now() < deadline, "reader kept running");
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert_eq!(level.load(), 0.0);
    }

    #[test]
    fn test_drop_joins_finished_reader() {
        let level = SharedLevel::new();
        let source = PcmSource::spawn(Cursor::new(encode(&[0.25; 4])), level.clone(), 4).unwrap();
        while source.is_running() {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        drop(source);
        assert_eq!(level.load(), 0.0);
    }
}
