//! CLI argument definitions.

use super::validators::{parse_non_negative_seconds, parse_positive_seconds, parse_threshold};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Copies a video with the quiet sections cut out.
#[derive(Debug, Parser)]
#[command(name = "ezcut")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Input video file.
    #[arg(required = true)]
    pub input: Option<PathBuf>,

    /// Path to the configuration file (overrides the platform default).
    #[arg(long, global = true, env = "EZCUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Options for cutting.
    #[command(flatten)]
    pub cut: CutArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments controlling segment selection and output.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CutArgs {
    /// Sample time, in seconds.
    #[arg(long, value_parser = parse_positive_seconds, env = "EZCUT_CHUNK")]
    pub chunk: Option<f64>,

    /// Mask half-width, in seconds.
    #[arg(long, value_parser = parse_non_negative_seconds, env = "EZCUT_WINDOW")]
    pub window: Option<f64>,

    /// Loudness threshold (RMS amplitude, full scale = 1.0).
    #[arg(long, value_parser = parse_threshold, env = "EZCUT_THRESH")]
    pub thresh: Option<f32>,

    /// Minimum length of a kept clip, in seconds.
    #[arg(long = "min_clip", visible_alias = "min-clip",
          value_parser = parse_non_negative_seconds, env = "EZCUT_MIN_CLIP")]
    pub min_clip: Option<f64>,

    /// Write a preview plot instead of rendering the video.
    #[arg(short, long)]
    pub graph: bool,

    /// Output directory (default: out).
    #[arg(short, long, env = "EZCUT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Overwrite the output if it already exists.
    #[arg(long)]
    pub force: bool,

    /// Keep a loud section that is still running when the audio ends.
    #[arg(long)]
    pub keep_tail: bool,

    /// Write the kept intervals to a file (.json for JSON, otherwise CSV).
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Video codec passed to ffmpeg (overrides config).
    #[arg(long)]
    pub codec: Option<String>,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable progress bars.
    #[arg(long)]
    pub no_progress: bool,
}
