//! Renderer Actor: Dedicated thread for rendering to the terminal.
//!
//! This actor owns the visible copy of the screen. It receives finished
//! cell grids from the main loop, diffs them against what is on screen and
//! flushes the result in a single write.

use super::messages::RenderCommand;
use crate::render::diff::{render_diff, render_full, DiffState};
use crate::render::CellGrid;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Renderer actor that handles terminal output.
pub struct RendererActor {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

/// Render statistics, logged when the thread exits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames rendered.
    pub frames: u64,
    /// Total cells changed across all frames.
    pub cells_changed: u64,
    /// Cursor move sequences emitted by diffed frames.
    pub cursor_moves: u64,
    /// Color change sequences emitted by diffed frames.
    pub color_changes: u64,
    /// Total bytes written to terminal.
    pub bytes_written: u64,
    /// Smoothed render time in microseconds.
    pub avg_render_us: u64,
    /// Slowest render in microseconds.
    pub max_render_us: u64,
}

impl std::fmt::Display for RenderStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames, {} cells, {} cursor moves, {} color changes, {} bytes, avg {} us, max {} us",
            self.frames,
            self.cells_changed,
            self.cursor_moves,
            self.color_changes,
            self.bytes_written,
            self.avg_render_us,
            self.max_render_us
        )
    }
}

/// Internal renderer state, generic over the output for tests.
struct Renderer<W: Write> {
    /// Grid currently on screen.
    current: CellGrid,
    /// Diff state for cursor/color tracking.
    diff_state: DiffState,
    /// Pre-allocated output buffer.
    output: Vec<u8>,
    /// Terminal handle.
    out: W,
    /// Render statistics.
    stats: RenderStats,
    /// Whether the next frame must repaint everything.
    needs_full_redraw: bool,
}

impl<W: Write> Renderer<W> {
    fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            current: CellGrid::new(width.max(1), height.max(1)),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(65536),
            out,
            stats: RenderStats::default(),
            needs_full_redraw: true,
        }
    }

    /// Bring the screen up to date with `next`.
    fn render(&mut self, next: &CellGrid) -> io::Result<()> {
        let start = Instant::now();
        self.output.clear();

        let size_changed =
            next.width() != self.current.width() || next.height() != self.current.height();
        if self.needs_full_redraw || size_changed {
            render_full(next, &mut self.output);
            self.needs_full_redraw = false;
            self.diff_state.reset();
            self.stats.cells_changed += next.len() as u64;
        } else {
            let result = render_diff(&self.current, next, &mut self.output, &mut self.diff_state);
            self.stats.cells_changed += result.cells_changed as u64;
            self.stats.cursor_moves += result.cursor_moves as u64;
            self.stats.color_changes += result.color_changes as u64;
        }

        if !self.output.is_empty() {
            self.out.write_all(&self.output)?;
            self.out.flush()?;
        }

        if size_changed {
            self.current = next.clone();
        } else {
            self.current.copy_from(next);
        }

        let elapsed = start.elapsed();
        self.stats.frames += 1;
        self.stats.bytes_written += self.output.len() as u64;
        let render_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.stats.max_render_us = self.stats.max_render_us.max(render_us);
        if self.stats.avg_render_us == 0 {
            self.stats.avg_render_us = render_us;
        } else {
            self.stats.avg_render_us = self
                .stats
                .avg_render_us
                .saturating_mul(15)
                .saturating_add(render_us)
                / 16;
        }

        Ok(())
    }

    /// Apply one command. Returns `false` when the thread should exit.
    fn handle(&mut self, command: RenderCommand) -> io::Result<bool> {
        match command {
            RenderCommand::FullRedraw(grid) => {
                self.needs_full_redraw = true;
                self.render(&grid)?;
            }
            RenderCommand::Update(grid) => self.render(&grid)?,
            RenderCommand::Resize { width, height } => {
                self.current.resize(width.max(1), height.max(1));
                self.needs_full_redraw = true;
            }
            RenderCommand::Shutdown => return Ok(false),
        }
        Ok(true)
    }
}

impl RendererActor {
    /// Spawn the renderer actor thread writing to stdout.
    ///
    /// # Arguments
    ///
    /// * `receiver` - Channel to receive render commands from.
    /// * `width` - Initial terminal width.
    /// * `height` - Initial terminal height.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(receiver: Receiver<RenderCommand>, width: u16, height: u16) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("quavatar-render".to_string())
            .spawn(move || {
                let mut renderer = Renderer::new(io::stdout(), width, height);
                match Self::run_loop(&mut renderer, &receiver, &shutdown_clone) {
                    Ok(()) => log::info!("renderer stopped: {}", renderer.stats),
                    Err(e) => log::error!("render thread error: {e}"),
                }
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the render thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the render thread to finish.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop<W: Write>(
        renderer: &mut Renderer<W>,
        receiver: &Receiver<RenderCommand>,
        shutdown: &AtomicBool,
    ) -> io::Result<()> {
        while !shutdown.load(Ordering::Relaxed) {
            match receiver.recv_timeout(Duration::from_millis(16)) {
                Ok(command) => {
                    if !renderer.handle(command)? {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        Ok(())
    }
}

impl Drop for RendererActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
