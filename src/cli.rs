//! Command-line interface for quavatar.
//!
//! # Usage
//!
//! ```bash
//! # Raw float samples from ALSA on stdin
//! arecord -q -f FLOAT_LE -c1 -r44100 -t raw | quavatar
//!
//! # Microphone capture (built with `--features capture`)
//! quavatar --source mic
//!
//! # Custom art, hover-only dragging, debug log to a file
//! quavatar --idle idle.txt --speaking speaking.txt --drag-policy hover \
//!     --log-level debug --log-file quavatar.log
//! ```

use crate::actor::EngineConfig;
use crate::app::OverlayConfig;
use crate::audio::SourceKind;
use crate::interaction::DragPolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Audio source selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    /// Raw mono f32 little-endian samples on stdin
    Stdin,
    /// Microphone (needs the `capture` feature)
    Mic,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Stdin => Self::Stdin,
            SourceArg::Mic => Self::Mic,
        }
    }
}

/// Drag policy selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPolicyArg {
    /// Follow the pointer anywhere until release
    Latched,
    /// Follow only while the pointer stays on the handle
    Hover,
}

impl From<DragPolicyArg> for DragPolicy {
    fn from(arg: DragPolicyArg) -> Self {
        match arg {
            DragPolicyArg::Latched => Self::Latched,
            DragPolicyArg::Hover => Self::Hover,
        }
    }
}

/// quavatar - a microphone-driven avatar overlay for the terminal
///
/// Shows idle or speaking art on a pure green panel, ready to be
/// chroma-keyed. The left slider sets the loudness threshold (with a live
/// meter behind it), the right one scales the avatar.
#[derive(Parser, Debug, Clone)]
#[command(name = "quavatar")]
#[command(version)]
#[command(about = "Microphone-driven avatar overlay for the terminal", long_about = None)]
pub struct Args {
    /// Where loudness comes from
    #[arg(long, value_enum, default_value = "stdin")]
    pub source: SourceArg,

    /// Input device name for `--source mic` (default device if omitted)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Glyph-art file shown while quiet
    #[arg(long, value_name = "FILE")]
    pub idle: Option<PathBuf>,

    /// Glyph-art file shown while speaking
    #[arg(long, value_name = "FILE")]
    pub speaking: Option<PathBuf>,

    /// Target frames per second
    #[arg(long, default_value = "60", value_name = "FPS",
          value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Margin and spacing between panels, in cells
    #[arg(long, default_value = "1", value_name = "CELLS",
          value_parser = clap::value_parser!(i32).range(0..=16))]
    pub gap: i32,

    /// How a drag continues once the handle is grabbed
    #[arg(long, value_enum, default_value = "latched")]
    pub drag_policy: DragPolicyArg,

    /// Initial loudness threshold (0 to 1)
    #[arg(long, default_value = "0.5", value_name = "VALUE", value_parser = parse_unit)]
    pub threshold: f32,

    /// Initial avatar scale slider position (0 to 1)
    #[arg(long, default_value = "0.5", value_name = "VALUE", value_parser = parse_unit)]
    pub scale: f32,

    /// Samples per loudness update when reading stdin
    #[arg(long, default_value = "1024", value_name = "SAMPLES",
          value_parser = clap::value_parser!(u32).range(1..=65536))]
    pub block_size: u32,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,

    /// Write logs to this file (the terminal is taken by the overlay)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            source: SourceArg::Stdin,
            device: None,
            idle: None,
            speaking: None,
            fps: 60,
            gap: 1,
            drag_policy: DragPolicyArg::Latched,
            threshold: 0.5,
            scale: 0.5,
            block_size: 1024,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get log level as `env_logger` filter string
    pub fn log_filter(&self) -> &str {
        match self.log_level.to_lowercase().as_str() {
            "error" => "error",
            "warn" | "warning" => "warn",
            "debug" => "debug",
            "trace" => "trace",
            "off" => "off",
            _ => "info",
        }
    }

    /// Overlay configuration from the arguments.
    pub fn overlay_config(&self) -> OverlayConfig {
        OverlayConfig {
            gap: self.gap,
            threshold: self.threshold,
            scale: self.scale,
            ..OverlayConfig::default()
        }
    }

    /// Engine configuration from the arguments.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            target_fps: self.fps,
            input_poll_timeout: Duration::from_millis(10),
            ..EngineConfig::default()
        }
    }

    /// Samples per published level for the stdin source.
    pub fn block_size(&self) -> usize {
        self.block_size as usize
    }
}

fn parse_unit(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not between 0 and 1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::default();
        assert_eq!(args.source, SourceArg::Stdin);
        assert_eq!(args.fps, 60);
        assert_eq!(args.gap, 1);
        assert_eq!(args.threshold, 0.5);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_parse_defaults_match_default_impl() {
        let parsed = Args::try_parse_from(["quavatar"]).unwrap();
        let default = Args::default();
        assert_eq!(parsed.source, default.source);
        assert_eq!(parsed.fps, default.fps);
        assert_eq!(parsed.gap, default.gap);
        assert_eq!(parsed.drag_policy, default.drag_policy);
        assert_eq!(parsed.block_size, default.block_size);
        assert_eq!(parsed.scale, default.scale);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "quavatar",
            "--source",
            "mic",
            "--drag-policy",
            "hover",
            "--threshold",
            "0.2",
            "--gap",
            "2",
            "--idle",
            "idle.txt",
        ])
        .unwrap();
        assert_eq!(SourceKind::from(args.source), SourceKind::Mic);
        assert_eq!(DragPolicy::from(args.drag_policy), DragPolicy::Hover);
        assert_eq!(args.idle, Some(PathBuf::from("idle.txt")));

        let overlay = args.overlay_config();
        assert_eq!(overlay.gap, 2);
        assert!((overlay.threshold - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Args::try_parse_from(["quavatar", "--threshold", "1.5"]).is_err());
        assert!(Args::try_parse_from(["quavatar", "--fps", "0"]).is_err());
        assert!(Args::try_parse_from(["quavatar", "--gap", "-1"]).is_err());
        assert!(Args::try_parse_from(["quavatar", "--source", "file"]).is_err());
    }

    #[test]
    fn test_log_filter() {
        let mut args = Args::default();

        args.log_level = "debug".to_string();
        assert_eq!(args.log_filter(), "debug");

        args.log_level = "WARNING".to_string();
        assert_eq!(args.log_filter(), "warn");

        args.log_level = "invalid".to_string();
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn test_engine_config() {
        let args = Args {
            fps: 30,
            ..Args::default()
        };
        assert_eq!(args.engine_config().target_fps, 30);
        assert!(args.engine_config().enable_mouse);
    }
}
