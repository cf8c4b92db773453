//! Slider backgrounds: What is painted inside a slider's track.

use crate::audio::lerp;
use crate::layout::Rect;
use crate::render::{Canvas, Rgb};

/// Per-slider background strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SliderBackground {
    /// Nothing behind the track.
    #[default]
    None,
    /// A bar rising from the bottom of the track with the smoothed loudness.
    AmplitudeMeter(LevelMeter),
}

impl SliderBackground {
    /// An amplitude meter with the default smoothing and color.
    pub fn amplitude_meter() -> Self {
        Self::AmplitudeMeter(LevelMeter::default())
    }

    /// Paint the background over `track`, given this frame's loudness.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, track: Rect, level: f32) {
        match self {
            Self::None => {}
            Self::AmplitudeMeter(meter) => meter.draw(canvas, track, level),
        }
    }
}

/// Exponentially smoothed loudness bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelMeter {
    /// Current smoothed level.
    pub smoothed: f32,
    /// Fraction of the distance to the new level covered each frame.
    pub rate: f32,
    /// Bar color.
    pub color: Rgb,
}

impl Default for LevelMeter {
    fn default() -> Self {
        Self {
            smoothed: 0.0,
            rate: 0.2,
            color: Rgb::RED,
        }
    }
}

impl LevelMeter {
    /// Move the smoothed level one step towards `level` and return it.
    pub fn step(&mut self, level: f32) -> f32 {
        self.smoothed = lerp(self.smoothed, level, self.rate);
        self.smoothed
    }

    /// Height of the bar, in cells, for a track of `height` cells.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn bar_height(&self, height: i32) -> i32 {
        ((height as f32 * self.smoothed) as i32).clamp(0, height.max(0))
    }

    /// Step the smoothing and paint the bar.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, track: Rect, level: f32) {
        self.step(level);
        let bar = self.bar_height(track.height);
        if bar > 0 {
            canvas.fill_rect(
                Rect::new(track.x, track.bottom() - bar, track.width, bar),
                self.color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, Recorder};

    #[test]
    fn test_none_draws_nothing() {
        let mut canvas = Recorder::new();
        SliderBackground::None.draw(&mut canvas, Rect::new(0, 0, 4, 10), 1.0);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_meter_converges() {
        let mut meter = LevelMeter::default();
        assert!((meter.step(1.0) - 0.2).abs() < 1e-6);
        assert!((meter.step(1.0) - 0.36).abs() < 1e-6);
        for _ in 0..100 {
            meter.step(1.0);
        }
        assert!((meter.smoothed - 1.0).abs() < 1e-3);
        for _ in 0..100 {
            meter.step(0.0);
        }
        assert!(meter.smoothed < 1e-3);
    }

    #[test]
    fn test_meter_fills_from_bottom() {
        let mut background = SliderBackground::AmplitudeMeter(LevelMeter {
            smoothed: 0.5,
            rate: 0.0,
            color: Rgb::RED,
        });
        let mut canvas = Recorder::new();
        background.draw(&mut canvas, Rect::new(2, 10, 3, 20), 0.9);
        assert_eq!(
            canvas.commands(),
            &[DrawCommand::FillRect {
                rect: Rect::new(2, 20, 3, 10),
                color: Rgb::RED
            }]
        );
    }

    #[test]
    fn test_silent_meter_draws_nothing() {
        let mut background = SliderBackground::amplitude_meter();
        let mut canvas = Recorder::new();
        background.draw(&mut canvas, Rect::new(0, 0, 3, 20), 0.0);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_bar_height_clamps() {
        let meter = LevelMeter {
            smoothed: 3.0,
            ..LevelMeter::default()
        };
        assert_eq!(meter.bar_height(8), 8);
        assert_eq!(meter.bar_height(0), 0);
    }
}
