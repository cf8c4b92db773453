//! Overlay application: Layout of the two sliders and the avatar, and the
//! per-event / per-frame glue between terminal input and the UI.
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────┐
//! │ ┌──┐  ┌──┐               │                          │
//! │ │  │◀ │  │◀   (unused)   │        avatar on         │
//! │ │██│  │  │               │        pure green        │
//! │ └──┘  └──┘               │                          │
//! └──────────────────────────┴──────────────────────────┘
//!  threshold  scale
//! ```

use crate::actor::{Engine, InputEvent, KeyCode};
use crate::audio::AudioInput;
use crate::cli::Args;
use crate::interaction::{PointerTracker, Slider};
use crate::layout::{LayoutError, Margin, Orientation, Rect};
use crate::render::{Canvas, Rgb};
use crate::session::{Session, Ui};
use crate::widget::{
    avatar_widget, slider_widget, AvatarStyle, AvatarTextures, AvatarVariant, SliderBackground,
    SliderResponse, SliderStyle,
};

/// Configuration of the overlay layout and its controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig {
    /// Outer margin and spacing between slots, in cells.
    pub gap: i32,
    /// Number of slider slots in the left half (at least 2).
    pub slider_slots: usize,
    /// Initial value of the loudness threshold slider.
    pub threshold: f32,
    /// Initial value of the avatar scale slider.
    pub scale: f32,
    /// Slider look.
    pub slider: SliderStyle,
    /// Avatar look.
    pub avatar: AvatarStyle,
    /// Color the screen is cleared to every frame.
    pub clear_color: Rgb,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            gap: 1,
            slider_slots: 6,
            threshold: 0.5,
            scale: 0.5,
            slider: SliderStyle::default(),
            avatar: AvatarStyle::default(),
            clear_color: Rgb::BLACK,
        }
    }
}

/// What one overlay frame produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFrame {
    /// The threshold slider.
    pub threshold: SliderResponse,
    /// The scale slider.
    pub scale: SliderResponse,
    /// Rectangle the avatar was drawn into.
    pub avatar_rect: Rect,
    /// Art shown this frame.
    pub avatar: AvatarVariant,
}

/// The overlay's controls and art.
#[derive(Debug)]
pub struct Overlay {
    config: OverlayConfig,
    threshold: Slider,
    threshold_background: SliderBackground,
    scale: Slider,
    scale_background: SliderBackground,
    textures: AvatarTextures,
}

impl Overlay {
    /// Create the controls, registering both sliders with `session`.
    pub fn new(session: &mut Session, textures: AvatarTextures, config: OverlayConfig) -> Self {
        Self {
            threshold: session.create_slider(config.threshold),
            threshold_background: SliderBackground::amplitude_meter(),
            scale: session.create_slider(config.scale),
            scale_background: SliderBackground::None,
            textures,
            config,
        }
    }

    /// The loudness threshold slider.
    pub const fn threshold(&self) -> &Slider {
        &self.threshold
    }

    /// The avatar scale slider.
    pub const fn scale(&self) -> &Slider {
        &self.scale
    }

    /// The configuration in use.
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Lay out and draw the overlay over `area`.
    ///
    /// # Errors
    ///
    /// Returns a layout error if the configuration asks for an impossible
    /// layout (for example fewer than two slider slots).
    pub fn draw(&mut self, ui: &mut Ui<'_>, area: Rect) -> Result<OverlayFrame, LayoutError> {
        let gap = self.config.gap;
        ui.canvas().fill_rect(area, self.config.clear_color);

        ui.begin_frame(area, Orientation::Horizontal, Margin::uniform(gap), gap, 2)?;

        let controls = ui.next_slot()?;
        ui.begin_frame(
            controls,
            Orientation::Horizontal,
            Margin::ZERO,
            gap,
            self.config.slider_slots,
        )?;
        let slot = ui.next_slot()?;
        let threshold = slider_widget(
            ui,
            slot,
            &mut self.threshold,
            &mut self.threshold_background,
            &self.config.slider,
        );
        let slot = ui.next_slot()?;
        let scale = slider_widget(
            ui,
            slot,
            &mut self.scale,
            &mut self.scale_background,
            &self.config.slider,
        );
        ui.end_frame()?;

        let avatar_rect = ui.next_slot()?;
        let avatar = avatar_widget(
            ui,
            avatar_rect,
            &self.textures,
            self.threshold.value(),
            self.scale.value(),
            &self.config.avatar,
        );
        ui.end_frame()?;

        Ok(OverlayFrame {
            threshold,
            scale,
            avatar_rect,
            avatar,
        })
    }
}

/// What the event loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Quit,
}

/// Session, overlay and pointer tracking bundled for the event loop.
#[derive(Debug)]
pub struct App {
    session: Session,
    overlay: Overlay,
    pointer: PointerTracker,
}

impl App {
    /// Build the application state.
    pub fn new(mut session: Session, textures: AvatarTextures, config: OverlayConfig) -> Self {
        let overlay = Overlay::new(&mut session, textures, config);
        Self {
            session,
            overlay,
            pointer: PointerTracker::new(),
        }
    }

    /// The UI session.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The overlay controls.
    pub const fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Fold one input event into the application state.
    pub fn handle_event(&mut self, event: &InputEvent) -> Control {
        match event {
            InputEvent::Key { code, modifiers } => match code {
                KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
                KeyCode::Char('c') if modifiers.control => return Control::Quit,
                _ => {}
            },
            InputEvent::MouseDown(mouse) => self.pointer.press(mouse),
            InputEvent::MouseUp(mouse) => self.pointer.release(mouse),
            InputEvent::MouseMove(mouse) => self.pointer.moved(mouse),
            InputEvent::Resize { .. } | InputEvent::FocusLost => {
                // A release may never arrive for a drag in progress.
                self.pointer.cancel();
                self.session.interaction_mut().release();
            }
            InputEvent::FocusGained => {}
            InputEvent::Error(message) => log::warn!("input error: {message}"),
            InputEvent::Shutdown => return Control::Quit,
        }
        Control::Continue
    }

    /// Draw one frame over `area` of `canvas`.
    ///
    /// # Errors
    ///
    /// Returns a layout error if the overlay layout is misconfigured or left
    /// unbalanced.
    pub fn render(&mut self, canvas: &mut dyn Canvas, area: Rect) -> Result<OverlayFrame, LayoutError> {
        let pointer = self.pointer.snapshot();
        let mut ui = self.session.frame(canvas, pointer);
        match self.overlay.draw(&mut ui, area) {
            Ok(frame) => {
                ui.finish()?;
                Ok(frame)
            }
            Err(err) => {
                ui.abandon();
                Err(err)
            }
        }
    }
}

/// Run the overlay in the terminal until the user quits.
///
/// # Errors
///
/// Returns an error if the art cannot be loaded, the audio source cannot be
/// started, the terminal cannot be set up, or the layout is misconfigured.
pub fn run(args: &Args) -> crate::Result<()> {
    let textures = AvatarTextures::load(args.idle.as_deref(), args.speaking.as_deref(), Rgb::WHITE)?;
    let session = Session::new(args.drag_policy.into());
    let audio = AudioInput::start(
        args.source.into(),
        session.level().clone(),
        args.block_size(),
        args.device.as_deref(),
    )?;
    log::info!("audio input: {audio:?}");

    let mut app = App::new(session, textures, args.overlay_config());
    let mut engine = Engine::with_config(args.engine_config())?;
    let background = app.overlay().config().clear_color;
    let mut audio_live = true;

    'frames: loop {
        for event in engine.drain_input() {
            match event {
                InputEvent::Resize { width, height } => engine.handle_resize(width, height),
                InputEvent::FocusGained => engine.request_redraw(),
                _ => {}
            }
            if app.handle_event(&event) == Control::Quit {
                break 'frames;
            }
        }
        if audio_live && !audio.is_live() {
            log::warn!("audio input ended; the level stays at silence");
            audio_live = false;
        }

        engine.begin_frame(background);
        let area = engine.grid_mut().bounds();
        app.render(engine.grid_mut(), area)?;
        engine.end_frame();
    }

    drop(engine);
    drop(audio);
    log::info!("quit after {} frames", app.session().frames());
    Ok(())
}
