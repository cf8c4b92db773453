//! Engine: Main coordinator that ties actors together.
//!
//! The Engine owns the terminal for the lifetime of the overlay: it switches
//! to raw mode and the alternate screen, enables mouse and focus reporting,
//! spawns the input and render actors and paces frames. Dropping it restores
//! the terminal.

use super::messages::{InputEvent, RenderCommand};
use super::{InputActor, RendererActor};
use crate::render::{CellGrid, Rgb};
use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::{Duration, Instant};

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target frames per second.
    pub target_fps: u32,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to enable mouse capture.
    pub enable_mouse: bool,
    /// Whether to report focus changes.
    pub focus_events: bool,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            input_poll_timeout: Duration::from_millis(10),
            enable_mouse: true,
            focus_events: true,
            alternate_screen: true,
        }
    }
}

impl EngineConfig {
    /// Time budget of one frame at the target rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

/// The terminal engine.
pub struct Engine {
    config: EngineConfig,
    input_rx: Receiver<InputEvent>,
    render_tx: Sender<RenderCommand>,
    input_actor: Option<InputActor>,
    renderer_actor: Option<RendererActor>,
    /// Grid the application draws the next frame into.
    grid: CellGrid,
    frame_start: Instant,
    frame_duration: Duration,
    frame_count: u64,
}

impl Engine {
    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails or an actor thread cannot be
    /// spawned.
    pub fn with_config(config: EngineConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let (width, height) = (width.max(1), height.max(1));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if config.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        if config.focus_events {
            execute!(stdout, EnableFocusChange)?;
        }
        execute!(stdout, cursor::Hide)?;

        let (input_tx, input_rx) = bounded::<InputEvent>(256);
        let (render_tx, render_rx) = bounded::<RenderCommand>(4);

        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout)?;
        let renderer_actor = RendererActor::spawn(render_rx, width, height)?;

        log::info!("engine started: {width}x{height} at {} fps", config.target_fps);
        let frame_duration = config.frame_duration();
        Ok(Self {
            config,
            input_rx,
            render_tx,
            input_actor: Some(input_actor),
            renderer_actor: Some(renderer_actor),
            grid: CellGrid::new(width, height),
            frame_start: Instant::now(),
            frame_duration,
            frame_count: 0,
        })
    }

    /// The grid the next frame is drawn into.
    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut self.grid
    }

    /// Drain all pending input events.
    pub fn drain_input(&self) -> Vec<InputEvent> {
        self.input_rx.try_iter().collect()
    }

    /// Handle a resize event.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let (width, height) = (width.max(1), height.max(1));
        self.grid.resize(width, height);
        let _ = self.render_tx.send(RenderCommand::Resize { width, height });
    }

    /// Begin a new frame: clear the grid to `background`.
    pub fn begin_frame(&mut self, background: Rgb) {
        self.frame_start = Instant::now();
        self.grid.clear(background);
    }

    /// End a frame: hand the grid to the renderer, then sleep off the rest
    /// of the frame budget.
    pub fn end_frame(&mut self) {
        self.frame_count += 1;

        // Drop the frame rather than block if the renderer is behind.
        let _ = self
            .render_tx
            .try_send(RenderCommand::Update(Box::new(self.grid.clone())));

        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_duration {
            std::thread::sleep(self.frame_duration - elapsed);
        }
    }

    /// Ask the renderer to repaint everything on the next frame.
    pub fn request_redraw(&self) {
        let _ = self
            .render_tx
            .send(RenderCommand::FullRedraw(Box::new(self.grid.clone())));
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }

        let _ = self.render_tx.send(RenderCommand::Shutdown);
        if let Some(actor) = self.renderer_actor.take() {
            actor.join();
        }

        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.config.focus_events {
            let _ = execute!(stdout, DisableFocusChange);
        }
        if self.config.enable_mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        log::info!("engine stopped after {} frames", self.frame_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        let config = EngineConfig::default();
        assert_eq!(config.frame_duration(), Duration::from_secs(1) / 60);
        let zero = EngineConfig {
            target_fps: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_default_enables_pointer() {
        let config = EngineConfig::default();
        assert!(config.enable_mouse);
        assert!(config.focus_events);
        assert!(config.alternate_screen);
    }
}
